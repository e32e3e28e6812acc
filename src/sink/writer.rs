//! The ByteSink type.

use std::io::{self, Read, Write};

use bytes::Bytes;

use crate::buffer::{ChunkedByteBuffer, ScratchBuffer};
use crate::config::BufferConfig;
use crate::error::BufferError;

/// A write-only byte stream backed by a [`ChunkedByteBuffer`].
///
/// Writes always succeed and accept the whole input; `flush` does nothing
/// and dropping the sink never fails. Content can be pulled out as a
/// single copy or streamed chunk by chunk into another writer.
#[derive(Debug, Clone, Default)]
pub struct ByteSink {
    buffer: ChunkedByteBuffer,
}

impl ByteSink {
    /// Creates a sink with the default minimum chunk size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink with the given minimum chunk size (absolute value).
    pub fn with_min_chunk_size(min_chunk_size: isize) -> Self {
        Self {
            buffer: ChunkedByteBuffer::new(min_chunk_size),
        }
    }

    /// Creates a sink from a buffer configuration.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            buffer: ChunkedByteBuffer::with_config(config),
        }
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.buffer.reset();
    }

    /// Returns the underlying buffer.
    pub fn buffer(&self) -> &ChunkedByteBuffer {
        &self.buffer
    }

    /// Consumes the sink and returns the underlying buffer.
    pub fn into_inner(self) -> ChunkedByteBuffer {
        self.buffer
    }

    /// Copies the written bytes into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Copies the written bytes into a new [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        self.buffer.to_bytes()
    }

    /// Decodes the written bytes as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buffer.to_vec()).into_owned()
    }

    /// Writes the content to `writer` one chunk at a time.
    ///
    /// The whole content is never materialized as one array.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BufferError> {
        for chunk in self.buffer.filled_chunks() {
            writer.write_all(chunk)?;
        }
        Ok(())
    }

    /// Reads `reader` to EOF, appending everything read.
    ///
    /// Returns the number of bytes copied. Interrupted reads are retried.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize, BufferError> {
        let mut scratch = ScratchBuffer::take();
        let scratch = scratch.as_mut_slice();
        let mut total = 0;

        loop {
            match reader.read(scratch) {
                Ok(0) => return Ok(total),
                Ok(n) => {
                    self.buffer.append_slice(&scratch[..n]);
                    total += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(BufferError::Io(e)),
            }
        }
    }
}

impl Write for ByteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.append_slice(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buffer.append_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<ChunkedByteBuffer> for ByteSink {
    fn from(buffer: ChunkedByteBuffer) -> Self {
        Self { buffer }
    }
}

impl From<ByteSink> for Bytes {
    fn from(sink: ByteSink) -> Self {
        sink.to_bytes()
    }
}

#[cfg(feature = "async-io")]
impl futures_io::AsyncWrite for ByteSink {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<io::Result<usize>> {
        self.get_mut().buffer.append_slice(buf);
        std::task::Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn poll_close(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        std::task::Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that yields `Interrupted` once before each real read.
    struct FlakyReader<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for FlakyReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "again"));
            }
            self.data.read(buf)
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_accepts_everything() {
        let mut sink = ByteSink::with_min_chunk_size(4);
        assert_eq!(sink.write(b"hello world").unwrap(), 11);
        sink.flush().unwrap();
        assert_eq!(sink.len(), 11);
        assert_eq!(sink.to_vec(), b"hello world");
    }

    #[test]
    fn test_write_to_streams_logical_content_only() {
        let mut sink = ByteSink::with_min_chunk_size(8);
        sink.write_all(b"abc").unwrap();
        sink.write_all(b"defghijklmn").unwrap();

        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        assert_eq!(out, b"abcdefghijklmn");
    }

    #[test]
    fn test_write_to_propagates_io_error() {
        let mut sink = ByteSink::new();
        sink.write_all(b"data").unwrap();
        let err = sink.write_to(&mut FailingWriter).unwrap_err();
        assert!(matches!(err, BufferError::Io(_)));
    }

    #[test]
    fn test_read_from_retries_interrupted() {
        let data: Vec<u8> = (0..20_000).map(|i| (i * 7 + 13) as u8).collect();
        let mut reader = FlakyReader {
            data: &data,
            interrupt: false,
        };
        let mut sink = ByteSink::with_min_chunk_size(1024);
        let copied = sink.read_from(&mut reader).unwrap();
        assert_eq!(copied, data.len());
        assert_eq!(sink.to_vec(), data);
    }

    #[test]
    fn test_to_string_lossy() {
        let mut sink = ByteSink::new();
        sink.write_all("grüße".as_bytes()).unwrap();
        sink.write_all(&[0xFF]).unwrap();
        assert_eq!(sink.to_string_lossy(), "grüße\u{FFFD}");
    }

    #[test]
    fn test_reset_and_into_bytes() {
        let mut sink = ByteSink::with_min_chunk_size(2);
        sink.write_all(b"discard").unwrap();
        sink.reset();
        assert!(sink.is_empty());

        sink.write_all(b"keep").unwrap();
        let bytes: Bytes = sink.into();
        assert_eq!(&bytes[..], b"keep");
    }
}
