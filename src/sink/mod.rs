//! Stream-style wrapper around a [`ChunkedByteBuffer`].
//!
//! - [`ByteSink`] - `std::io::Write` sink that accumulates into chunks
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use chunkbuf::ByteSink;
//!
//! let mut sink = ByteSink::new();
//! write!(sink, "hello {}", "world")?;
//!
//! let mut out = Vec::new();
//! sink.write_to(&mut out)?;
//! assert_eq!(out, b"hello world");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod writer;

pub use writer::ByteSink;
