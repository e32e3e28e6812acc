// Integration tests for the async adapters (feature = "async-io")
// Tests cover: async fill, chunked async drain, chunk stream, AsyncWrite sink

#![cfg(feature = "async-io")]

use std::pin::Pin;
use std::task::{Context, Poll};

use chunkbuf::{
    BufferError, ByteSink, ChunkedByteBuffer, chunk_stream, read_into_async, write_chunks_async,
};
use futures_util::StreamExt;
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 13) as u8).collect()
}

/// Writer that accepts one byte per call and alternates with `Pending`.
struct TrickleWriter {
    out: Vec<u8>,
    ready: bool,
}

impl futures_io::AsyncWrite for TrickleWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.ready = !self.ready;
        if !self.ready {
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.out.push(buf[0]);
        Poll::Ready(Ok(1))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

struct ZeroWriter;

impl futures_io::AsyncWrite for ZeroWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Poll::Ready(Ok(0))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn test_read_into_async_collects_everything() {
    let data = sample(50_000);
    let mut buffer = ChunkedByteBuffer::new(1024);

    let n = read_into_async((&data[..]).compat(), &mut buffer)
        .await
        .unwrap();

    assert_eq!(n, data.len());
    assert_eq!(buffer.to_vec(), data);
}

#[tokio::test]
async fn test_write_chunks_async_round_trip() {
    let data = sample(10_000);
    let mut buffer = ChunkedByteBuffer::new(300);
    for piece in data.chunks(77) {
        buffer.append_slice(piece);
    }

    let mut out = Vec::new();
    write_chunks_async(&buffer, (&mut out).compat_write())
        .await
        .unwrap();
    assert_eq!(out, data);
}

#[tokio::test]
async fn test_write_chunks_async_survives_pending_and_short_writes() {
    let mut buffer = ChunkedByteBuffer::new(4);
    buffer.append_slice(b"hello, chunked world");

    let mut writer = TrickleWriter {
        out: Vec::new(),
        ready: false,
    };
    write_chunks_async(&buffer, &mut writer).await.unwrap();
    assert_eq!(writer.out, b"hello, chunked world");
}

#[tokio::test]
async fn test_write_chunks_async_zero_write_is_error() {
    let mut buffer = ChunkedByteBuffer::new(4);
    buffer.append_slice(b"data");

    let err = write_chunks_async(&buffer, ZeroWriter).await.unwrap_err();
    match err {
        BufferError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::WriteZero),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_write_chunks_async_empty_buffer() {
    let buffer = ChunkedByteBuffer::default();
    write_chunks_async(&buffer, ZeroWriter).await.unwrap();
}

#[tokio::test]
async fn test_chunk_stream_yields_logical_chunks() {
    let mut buffer = ChunkedByteBuffer::new(4);
    buffer.append_slice(&[1, 2, 3]);
    buffer.append_slice(&[4, 5, 6, 7, 8]);

    let chunks: Vec<_> = chunk_stream(&buffer).collect().await;
    assert_eq!(chunks.len(), buffer.chunk_count());
    assert_eq!(&chunks[0][..], &[1, 2, 3, 4]);
    assert_eq!(&chunks[1][..], &[5, 6, 7, 8]);

    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
    assert_eq!(joined, buffer.to_vec());
}

#[tokio::test]
async fn test_byte_sink_as_async_writer() {
    use futures_util::io::AsyncWriteExt;

    let mut sink = ByteSink::with_min_chunk_size(8);
    sink.write_all(b"async ").await.unwrap();
    sink.write_all(b"sink").await.unwrap();
    sink.flush().await.unwrap();
    sink.close().await.unwrap();

    assert_eq!(sink.to_string_lossy(), "async sink");
}
