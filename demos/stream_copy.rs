//! Stream copy through a ByteSink.
//!
//! Reads a file (or generated data) into a sink, then drains it chunk by
//! chunk into another writer without materializing one big array.
//!
//! Run with:
//!     cargo run --example stream_copy -- <path>

use std::fs::File;
use std::io::{Cursor, Write};

use chunkbuf::ByteSink;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sink = ByteSink::with_min_chunk_size(64 * 1024);

    let copied = match std::env::args().nth(1) {
        Some(path) => {
            println!("Reading {}...", path);
            sink.read_from(&mut File::open(path)?)?
        }
        None => {
            let data = vec![0xABu8; 1024 * 1024]; // 1 MB
            println!("No path given, copying {} generated bytes...", data.len());
            sink.read_from(&mut Cursor::new(data))?
        }
    };

    writeln!(sink)?;
    println!(
        "Copied {} bytes into {} chunks",
        copied,
        sink.buffer().chunk_count()
    );

    let mut out = Vec::with_capacity(sink.len());
    sink.write_to(&mut out)?;
    println!("Drained {} bytes", out.len());

    Ok(())
}
