//! Basic buffer usage: incremental appends, indexed reads, range copies.
//!
//! Run with:
//!     cargo run --example sync_basic

use chunkbuf::ChunkedByteBuffer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data
    let data: Vec<u8> = (0..100_000u32).map(|i| (i * 7 + 13) as u8).collect();

    // Small minimum chunk so growth is visible
    let mut buffer = ChunkedByteBuffer::new(4 * 1024);

    println!("Appending {} bytes in uneven batches...\n", data.len());

    // Simulate incremental writes of varying size
    let mut start = 0;
    let mut batch = 1;
    while start < data.len() {
        let len = batch.min(data.len() - start);
        buffer.append_range(&data, start, len)?;
        start += len;
        batch = batch * 3 + 1;

        println!(
            "appended {:>6} bytes -> len={:>6}, chunks={}",
            len,
            buffer.len(),
            buffer.chunk_count()
        );
    }

    for i in 0..buffer.chunk_count() {
        println!("chunk {}: capacity {} bytes", i, buffer.chunk_copy(i)?.len());
    }

    let middle = buffer.to_vec_range(50_000, 16)?;
    println!("\nbytes 50000..50016: {:02x?}", middle);
    println!("byte 99999: {:#04x}", buffer.get(99_999)?);

    assert_eq!(buffer.to_vec(), data);
    println!("\nTotal: {} bytes in {} chunks", buffer.len(), buffer.chunk_count());

    Ok(())
}
