//! Async adapters for filling and draining buffers.
//!
//! This module uses the `futures-io` traits, making it runtime-agnostic and
//! compatible with tokio (through `tokio_util::compat`), async-std, smol,
//! and other async runtimes.
//!
//! - [`read_into_async`] - Reads an async reader to EOF into a buffer
//! - [`write_chunks_async`] - Writes a buffer to an async writer chunk by chunk
//! - [`chunk_stream`] - Streams a buffer's content as one `Bytes` per chunk
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{
    ChunkStream, ReadInto, WriteChunks, chunk_stream, read_into_async, write_chunks_async,
};
