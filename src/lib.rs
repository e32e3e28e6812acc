//! chunkbuf
//!
//! A chunked growable byte buffer for Rust.
//!
//! `chunkbuf` accumulates bytes written incrementally without the
//! reallocate-and-copy cost of a single growing array. It is designed as a
//! small staging primitive for:
//!
//! - serialization output
//! - stream copying
//! - collecting network or file reads before handing them on
//!
//! The crate intentionally:
//! - does NOT share chunk storage with callers (every read is a copy)
//! - does NOT synchronize (callers serialize access across threads)
//! - does NOT decode text beyond lossy UTF-8
//!
//! # Buffer
//!
//! ```
//! use chunkbuf::{ChunkedByteBuffer, BufferError};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut buffer = ChunkedByteBuffer::new(4);
//!     buffer.append_byte(1).append_byte(2);
//!     buffer.append_range(&[3, 4, 5, 6], 0, 4)?;
//!
//!     assert_eq!(buffer.len(), 6);
//!     assert_eq!(buffer.get(5)?, 6);
//!     assert_eq!(buffer.to_vec_range(1, 4)?, vec![2, 3, 4, 5]);
//!     Ok(())
//! }
//! ```
//!
//! # Sink
//!
//! ```
//! use std::io::Write;
//! use chunkbuf::ByteSink;
//!
//! let mut sink = ByteSink::with_min_chunk_size(16);
//! sink.write_all(b"staged ")?;
//! sink.write_all(b"output")?;
//! assert_eq!(sink.to_string_lossy(), "staged output");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use chunkbuf::{ChunkedByteBuffer, read_into_async};
//! use futures_io::AsyncRead;
//!
//! async fn collect<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<u8>, chunkbuf::BufferError> {
//!     let mut buffer = ChunkedByteBuffer::default();
//!     read_into_async(reader, &mut buffer).await?;
//!     Ok(buffer.to_vec())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod sink;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use buffer::ChunkedByteBuffer;
pub use config::{
    BufferConfig, DEFAULT_CHUNK_LIST_CAPACITY, DEFAULT_MIN_CHUNK_SIZE, MAX_MIN_CHUNK_SIZE,
};
pub use error::BufferError;
pub use sink::ByteSink;

#[cfg(feature = "async-io")]
pub use async_stream::{
    ChunkStream, ReadInto, WriteChunks, chunk_stream, read_into_async, write_chunks_async,
};
