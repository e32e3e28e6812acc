#![no_main]

use std::io::{Cursor, Write};

use libfuzzer_sys::fuzz_target;
use chunkbuf::ByteSink;

fuzz_target!(|data: Vec<u8>| {
    // Test with various minimum chunk sizes
    for min_chunk in [1isize, 7, 64, 4096] {
        let mut sink = ByteSink::with_min_chunk_size(min_chunk);
        let copied = sink.read_from(&mut Cursor::new(&data)).unwrap();

        // Verify: stream copy preserves every byte
        assert_eq!(copied, data.len());
        assert_eq!(sink.to_vec(), data);

        // Verify: chunked drain equals the materialized copy
        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        assert_eq!(out, data);

        // Verify: piecewise writes produce the same content
        let mut pieces = ByteSink::with_min_chunk_size(min_chunk);
        for piece in data.chunks(min_chunk as usize) {
            pieces.write_all(piece).unwrap();
        }
        assert_eq!(pieces.to_bytes(), sink.to_bytes());
    }
});
