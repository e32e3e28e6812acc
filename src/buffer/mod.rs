//! Buffer storage.
//!
//! - [`ChunkedByteBuffer`] - Chunked, append-only byte buffer
//!
//! The scratch pool is internal: it backs stream copies into a buffer and
//! is not part of the public API.

mod chunked;
mod pool;

pub use chunked::ChunkedByteBuffer;
pub(crate) use pool::ScratchBuffer;
