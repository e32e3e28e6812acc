//! The chunked byte buffer.

use bytes::{Buf, Bytes};

#[cfg(feature = "tracing")]
use tracing::{Level, event};

use crate::config::BufferConfig;
use crate::error::BufferError;

/// An append-only byte buffer that grows by adding chunks.
///
/// Bytes are written into a list of fixed-capacity chunks instead of one
/// contiguous array, so growth never copies previously written data. A
/// chunk is never resized once allocated.
///
/// # Allocation
///
/// - A single-byte append into a full (or missing) chunk allocates one
///   chunk of `min_chunk_size` bytes.
/// - A range append first fills whatever room is left in the current
///   chunk, then allocates exactly one chunk of
///   `max(min_chunk_size, remaining)` bytes for the rest. One call touches
///   at most two chunks.
///
/// # Ownership
///
/// Every accessor returns an owned copy. Nothing hands out a reference into
/// the chunk storage, so later appends or a [`reset`](Self::reset) never
/// affect data a caller already holds.
///
/// # Thread Safety
///
/// The buffer does no internal synchronization. Sharing it across threads
/// requires the caller to serialize access (for example behind a `Mutex`);
/// the borrow checker enforces this for safe code.
///
/// # Example
///
/// ```
/// use chunkbuf::ChunkedByteBuffer;
///
/// let mut buffer = ChunkedByteBuffer::new(4);
/// buffer.append_range(&[1, 2, 3, 4, 5, 6], 0, 6)?;
///
/// assert_eq!(buffer.len(), 6);
/// assert_eq!(buffer.to_vec(), vec![1, 2, 3, 4, 5, 6]);
/// assert_eq!(buffer.get(4)?, 5);
/// assert!(buffer.get(6).is_err());
/// # Ok::<(), chunkbuf::BufferError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedByteBuffer {
    /// Allocated chunks. The last one is the chunk being filled.
    chunks: Vec<Box<[u8]>>,
    /// Logical offset of the first byte of each chunk.
    chunk_starts: Vec<usize>,
    /// Next free position inside the last chunk.
    offset: usize,
    /// Logical number of bytes appended.
    size: usize,
    config: BufferConfig,
}

impl ChunkedByteBuffer {
    /// Creates an empty buffer with the given minimum chunk size.
    ///
    /// The absolute value of `min_chunk_size` is used, so a negative size
    /// is accepted rather than rejected.
    ///
    /// ```
    /// use chunkbuf::ChunkedByteBuffer;
    ///
    /// let buffer = ChunkedByteBuffer::new(-10);
    /// assert_eq!(buffer.min_chunk_size(), 10);
    /// ```
    pub fn new(min_chunk_size: isize) -> Self {
        Self::with_config(BufferConfig::new(min_chunk_size))
    }

    /// Creates an empty buffer from a configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            chunks: Vec::new(),
            chunk_starts: Vec::new(),
            offset: 0,
            size: 0,
            config,
        }
    }

    /// Returns the configuration this buffer was built with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Returns the minimum chunk allocation size.
    pub fn min_chunk_size(&self) -> usize {
        self.config.min_chunk_size()
    }

    /// Appends a single byte.
    pub fn append_byte(&mut self, value: u8) -> &mut Self {
        let has_room = self
            .chunks
            .last()
            .is_some_and(|chunk| self.offset < chunk.len());
        if !has_room {
            self.allocate_chunk(1);
        }

        // `allocate_chunk` guarantees a last chunk with room for one byte.
        if let Some(chunk) = self.chunks.last_mut() {
            chunk[self.offset] = value;
            self.offset += 1;
            self.size += 1;
        }
        self
    }

    /// Appends `len` bytes of `data` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RangeOutOfBounds`] if `offset + len` overflows
    /// or exceeds `data.len()`. The buffer is left untouched in that case.
    pub fn append_range(
        &mut self,
        data: &[u8],
        offset: usize,
        len: usize,
    ) -> Result<&mut Self, BufferError> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= data.len())
            .ok_or(BufferError::RangeOutOfBounds {
                offset,
                len,
                available: data.len(),
            })?;

        Ok(self.append_slice(&data[offset..end]))
    }

    /// Appends a whole slice.
    pub fn append_slice(&mut self, data: &[u8]) -> &mut Self {
        if data.is_empty() {
            return self;
        }

        let mut rest = data;

        // Fill the tail of the current chunk first.
        if let Some(chunk) = self.chunks.last_mut() {
            let n = (chunk.len() - self.offset).min(rest.len());
            chunk[self.offset..self.offset + n].copy_from_slice(&rest[..n]);
            self.offset += n;
            self.size += n;
            rest = &rest[n..];
        }

        // One fresh chunk holds everything that is left.
        if !rest.is_empty() {
            self.allocate_chunk(rest.len());
            if let Some(chunk) = self.chunks.last_mut() {
                chunk[..rest.len()].copy_from_slice(rest);
                self.offset = rest.len();
                self.size += rest.len();
            }
        }

        self
    }

    /// Appends every remaining byte of a [`Buf`], consuming it.
    pub fn extend_from_buf<B: Buf>(&mut self, mut buf: B) -> &mut Self {
        while buf.has_remaining() {
            let n = {
                let chunk = buf.chunk();
                self.append_slice(chunk);
                chunk.len()
            };
            buf.advance(n);
        }
        self
    }

    /// Returns the number of bytes appended.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no bytes have been appended.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of chunks allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the byte at logical position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<u8, BufferError> {
        if index >= self.size {
            return Err(BufferError::IndexOutOfBounds {
                index,
                len: self.size,
            });
        }

        let chunk = self.chunk_index_of(index);
        Ok(self.chunks[chunk][index - self.chunk_starts[chunk]])
    }

    /// Copies the whole logical content into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size);
        for chunk in self.filled_chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Copies the whole logical content into a new [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_vec())
    }

    /// Copies the logical range `[start, start + len)` into a new vector.
    ///
    /// The range may span any number of chunks.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RangeOutOfBounds`] if `start + len` overflows
    /// or exceeds `len()`.
    pub fn to_vec_range(&self, start: usize, len: usize) -> Result<Vec<u8>, BufferError> {
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.size)
            .ok_or(BufferError::RangeOutOfBounds {
                offset: start,
                len,
                available: self.size,
            })?;

        let mut out = Vec::with_capacity(len);
        if len == 0 {
            return Ok(out);
        }

        let first = self.chunk_index_of(start);
        for (i, chunk) in self.filled_chunks().enumerate().skip(first) {
            let chunk_start = self.chunk_starts[i];
            if chunk_start >= end {
                break;
            }
            let from = start.saturating_sub(chunk_start);
            let to = (end - chunk_start).min(chunk.len());
            out.extend_from_slice(&chunk[from..to]);
        }

        Ok(out)
    }

    /// Returns a copy of the full backing storage of chunk `index`.
    ///
    /// For the chunk currently being filled this includes the unfilled
    /// tail, which reads as zeroes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ChunkOutOfBounds`] if `index >= chunk_count()`.
    pub fn chunk_copy(&self, index: usize) -> Result<Vec<u8>, BufferError> {
        self.chunks
            .get(index)
            .map(|chunk| chunk.to_vec())
            .ok_or(BufferError::ChunkOutOfBounds {
                index,
                count: self.chunks.len(),
            })
    }

    /// Returns the buffer to the empty state.
    ///
    /// All chunks are dropped. The outer chunk list keeps its capacity.
    pub fn reset(&mut self) {
        #[cfg(feature = "tracing")]
        event!(
            Level::TRACE,
            message = "buffer reset",
            size = self.size,
            chunks = self.chunks.len()
        );

        self.chunks.clear();
        self.chunk_starts.clear();
        self.offset = 0;
        self.size = 0;
    }

    /// Iterates over the logically filled part of each chunk, in order.
    pub(crate) fn filled_chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let last = self.chunks.len().saturating_sub(1);
        self.chunks.iter().enumerate().map(move |(i, chunk)| {
            if i == last {
                &chunk[..self.offset]
            } else {
                &chunk[..]
            }
        })
    }

    /// Returns the filled part of chunk `index`, if it exists.
    #[cfg_attr(not(feature = "async-io"), allow(dead_code))]
    pub(crate) fn filled_chunk(&self, index: usize) -> Option<&[u8]> {
        let chunk = self.chunks.get(index)?;
        if index + 1 == self.chunks.len() {
            Some(&chunk[..self.offset])
        } else {
            Some(&chunk[..])
        }
    }

    /// Finds the chunk holding logical position `index` (`index < size`).
    fn chunk_index_of(&self, index: usize) -> usize {
        self.chunk_starts
            .partition_point(|&start| start <= index)
            .saturating_sub(1)
    }

    /// Adds a chunk with room for at least `needed` bytes and makes it current.
    fn allocate_chunk(&mut self, needed: usize) {
        let capacity = self.config.min_chunk_size().max(needed);

        if self.chunks.capacity() == 0 {
            let slots = self.config.chunk_list_capacity();
            self.chunks.reserve(slots);
            self.chunk_starts.reserve(slots);
        }

        #[cfg(feature = "tracing")]
        event!(
            Level::TRACE,
            message = "chunk allocated",
            index = self.chunks.len(),
            capacity
        );

        self.chunk_starts.push(self.size);
        self.chunks.push(vec![0u8; capacity].into_boxed_slice());
        self.offset = 0;
    }
}

impl Default for ChunkedByteBuffer {
    fn default() -> Self {
        Self::with_config(BufferConfig::default())
    }
}

impl From<ChunkedByteBuffer> for Bytes {
    fn from(buffer: ChunkedByteBuffer) -> Self {
        buffer.to_bytes()
    }
}

impl Extend<u8> for ChunkedByteBuffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for byte in iter {
            self.append_byte(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for ChunkedByteBuffer {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
