//! Configuration for buffer allocation behavior.
//!
//! - [`BufferConfig`] - Minimum chunk size and initial chunk-list capacity
//!
//! # Example
//!
//! ```
//! use chunkbuf::{BufferConfig, ChunkedByteBuffer};
//!
//! let config = BufferConfig::new(4096).with_chunk_list_capacity(32);
//! let buffer = ChunkedByteBuffer::with_config(config);
//! assert_eq!(buffer.min_chunk_size(), 4096);
//! ```

/// Default minimum chunk size (1 KiB).
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 1024;

/// Default number of chunk slots reserved on first allocation.
pub const DEFAULT_CHUNK_LIST_CAPACITY: usize = 16;

/// Upper bound for the minimum chunk size (16 MiB).
///
/// Larger requests are clamped so the first allocation stays satisfiable.
/// A single append larger than this still gets an exact-fit chunk.
pub const MAX_MIN_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Absolute value of `size`, clamped to [`MAX_MIN_CHUNK_SIZE`].
const fn normalize_min_chunk_size(size: isize) -> usize {
    let size = size.unsigned_abs();
    if size > MAX_MIN_CHUNK_SIZE {
        MAX_MIN_CHUNK_SIZE
    } else {
        size
    }
}

/// Configuration for a [`ChunkedByteBuffer`](crate::ChunkedByteBuffer).
///
/// The minimum chunk size is the smallest allocation unit. Appends that
/// need more room than that get a chunk sized to fit the whole remainder
/// of the call.
///
/// # Sign Normalization
///
/// Sizes are accepted as signed integers and normalized to their absolute
/// value, so `BufferConfig::new(-10)` behaves exactly like
/// `BufferConfig::new(10)`. Zero is kept as zero: chunks are then sized to
/// exactly what each append needs. Values above [`MAX_MIN_CHUNK_SIZE`]
/// are clamped to it.
///
/// # Example
///
/// ```
/// use chunkbuf::BufferConfig;
///
/// let config = BufferConfig::new(-10);
/// assert_eq!(config.min_chunk_size(), 10);
///
/// let config = BufferConfig::default().with_min_chunk_size(64);
/// assert_eq!(config.min_chunk_size(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    /// Minimum chunk size in bytes.
    min_chunk_size: usize,

    /// Chunk slots reserved in the outer list on first allocation.
    chunk_list_capacity: usize,
}

impl BufferConfig {
    /// Creates a configuration with the given minimum chunk size.
    ///
    /// The absolute value of `min_chunk_size` is used, capped at
    /// [`MAX_MIN_CHUNK_SIZE`].
    pub const fn new(min_chunk_size: isize) -> Self {
        Self {
            min_chunk_size: normalize_min_chunk_size(min_chunk_size),
            chunk_list_capacity: DEFAULT_CHUNK_LIST_CAPACITY,
        }
    }

    /// Sets the minimum chunk size (absolute value applied, capped).
    pub const fn with_min_chunk_size(mut self, size: isize) -> Self {
        self.min_chunk_size = normalize_min_chunk_size(size);
        self
    }

    /// Sets how many chunk slots are reserved on first allocation.
    ///
    /// The outer list doubles from there as chunks are added.
    pub const fn with_chunk_list_capacity(mut self, capacity: usize) -> Self {
        self.chunk_list_capacity = capacity;
        self
    }

    /// Returns the minimum chunk size.
    pub const fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    /// Returns the initial chunk-list capacity.
    pub const fn chunk_list_capacity(&self) -> usize {
        self.chunk_list_capacity
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            chunk_list_capacity: DEFAULT_CHUNK_LIST_CAPACITY,
        }
    }
}
