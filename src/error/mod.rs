//! Error types for chunkbuf.

use std::fmt;

/// Errors that can occur while appending to or reading from a buffer.
///
/// Every variant except [`BufferError::Io`] is a bounds violation, raised
/// before the buffer is touched.
#[derive(Debug)]
pub enum BufferError {
    /// An I/O error occurred while moving bytes through a sink.
    Io(std::io::Error),

    /// A single-byte index was outside the buffer.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// An `offset + len` range did not fit inside the available bytes.
    RangeOutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Number of bytes that were actually available.
        available: usize,
    },

    /// A chunk index was not below the current chunk count.
    ChunkOutOfBounds {
        /// The requested chunk index.
        index: usize,
        /// Number of chunks allocated.
        count: usize,
    },
}

impl BufferError {
    /// Returns true for the bounds-violation variants.
    pub fn is_out_of_bounds(&self) -> bool {
        !matches!(self, BufferError::Io(_))
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Io(e) => write!(f, "io error: {}", e),
            BufferError::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: {} (len {})", index, len)
            }
            BufferError::RangeOutOfBounds {
                offset,
                len,
                available,
            } => write!(
                f,
                "range out of bounds: offset {} + len {} exceeds {} bytes",
                offset, len, available
            ),
            BufferError::ChunkOutOfBounds { index, count } => {
                write!(f, "chunk out of bounds: {} ({} chunks)", index, count)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BufferError {
    fn from(e: std::io::Error) -> Self {
        BufferError::Io(e)
    }
}
