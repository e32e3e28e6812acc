//! Async fill and drain futures plus the chunk stream.
//!
//! # Example
//!
//! ```ignore
//! use chunkbuf::{ChunkedByteBuffer, read_into_async, write_chunks_async};
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn relay<R, W>(reader: R, writer: W) -> Result<usize, chunkbuf::BufferError>
//! where
//!     R: AsyncRead + Unpin,
//!     W: AsyncWrite + Unpin,
//! {
//!     let mut buffer = ChunkedByteBuffer::default();
//!     let n = read_into_async(reader, &mut buffer).await?;
//!     write_chunks_async(&buffer, writer).await?;
//!     Ok(n)
//! }
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::{AsyncRead, AsyncWrite};
use pin_project_lite::pin_project;

use crate::buffer::{ChunkedByteBuffer, ScratchBuffer};
use crate::error::BufferError;

pin_project! {
    /// Future returned by [`read_into_async`].
    ///
    /// Resolves to the number of bytes appended once the reader hits EOF.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct ReadInto<'a, R> {
        #[pin]
        reader: R,
        buffer: &'a mut ChunkedByteBuffer,
        scratch: ScratchBuffer,
        total: usize,
    }
}

impl<R: AsyncRead> Future for ReadInto<'_, R> {
    type Output = Result<usize, BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            let scratch = this.scratch.as_mut_slice();
            match this.reader.as_mut().poll_read(cx, scratch) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => return Poll::Ready(Ok(*this.total)),
                Poll::Ready(Ok(n)) => {
                    this.buffer.append_slice(&scratch[..n]);
                    *this.total += n;
                }
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(BufferError::Io(e))),
            }
        }
    }
}

/// Reads `reader` to EOF, appending everything to `buffer`.
///
/// Uses `futures_io::AsyncRead`; tokio readers can be adapted with
/// `tokio_util::compat::TokioAsyncReadCompatExt::compat`.
pub fn read_into_async<R: AsyncRead>(
    reader: R,
    buffer: &mut ChunkedByteBuffer,
) -> ReadInto<'_, R> {
    ReadInto {
        reader,
        buffer,
        scratch: ScratchBuffer::take(),
        total: 0,
    }
}

pin_project! {
    /// Future returned by [`write_chunks_async`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct WriteChunks<'a, W> {
        #[pin]
        writer: W,
        buffer: &'a ChunkedByteBuffer,
        chunk: usize,
        pos: usize,
    }
}

impl<W: AsyncWrite> Future for WriteChunks<'_, W> {
    type Output = Result<(), BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        while let Some(chunk) = this.buffer.filled_chunk(*this.chunk) {
            if *this.pos == chunk.len() {
                *this.chunk += 1;
                *this.pos = 0;
                continue;
            }

            match this.writer.as_mut().poll_write(cx, &chunk[*this.pos..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    return Poll::Ready(Err(BufferError::Io(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "writer accepted zero bytes",
                    ))));
                }
                Poll::Ready(Ok(n)) => *this.pos += n,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(BufferError::Io(e))),
            }
        }

        this.writer.poll_flush(cx).map_err(BufferError::Io)
    }
}

/// Writes the logical content of `buffer` to `writer`, then flushes it.
///
/// Each chunk is written directly; the content is never copied into one
/// contiguous array. Short writes are continued.
pub fn write_chunks_async<W: AsyncWrite>(
    buffer: &ChunkedByteBuffer,
    writer: W,
) -> WriteChunks<'_, W> {
    WriteChunks {
        writer,
        buffer,
        chunk: 0,
        pos: 0,
    }
}

/// A stream of independent copies of each chunk's logical content.
///
/// Every item is ready immediately; the stream exists so buffered data can
/// be fed into stream-based pipelines.
#[derive(Debug)]
pub struct ChunkStream<'a> {
    buffer: &'a ChunkedByteBuffer,
    next: usize,
}

impl Stream for ChunkStream<'_> {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let item = self.buffer.filled_chunk(self.next).map(Bytes::copy_from_slice);
        if item.is_some() {
            self.next += 1;
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.chunk_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// Creates a [`ChunkStream`] over `buffer`.
pub fn chunk_stream(buffer: &ChunkedByteBuffer) -> ChunkStream<'_> {
    ChunkStream { buffer, next: 0 }
}
