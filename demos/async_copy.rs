//! Async fill and drain of a ChunkedByteBuffer.
//!
//! Uses tokio through `tokio_util::compat`; the crate itself only depends on
//! the runtime-agnostic `futures-io` traits.
//!
//! Run with:
//!     cargo run --example async_copy --features async-io

use chunkbuf::{ChunkedByteBuffer, chunk_stream, read_into_async, write_chunks_async};
use futures_util::StreamExt;
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..256 * 1024u32).map(|i| (i * 7 + 13) as u8).collect();
    let mut buffer = ChunkedByteBuffer::new(16 * 1024);

    // Fill from an async reader
    let n = read_into_async((&data[..]).compat(), &mut buffer).await?;
    println!("Read {} bytes into {} chunks", n, buffer.chunk_count());

    // Inspect chunks as a stream
    let mut chunks = chunk_stream(&buffer);
    let mut index = 0;
    while let Some(chunk) = chunks.next().await {
        println!("chunk {}: {} bytes", index, chunk.len());
        index += 1;
    }

    // Drain into an async writer
    let mut out = Vec::new();
    write_chunks_async(&buffer, (&mut out).compat_write()).await?;
    assert_eq!(out, data);
    println!("Wrote {} bytes back out", out.len());

    Ok(())
}
