#![no_main]

use libfuzzer_sys::fuzz_target;
use chunkbuf::ChunkedByteBuffer;

fuzz_target!(|data: Vec<u8>| {
    if data.is_empty() {
        return;
    }

    // First byte picks the minimum chunk size, including zero and negatives.
    let min_chunk = (data[0] as i8) as isize;
    let mut buffer = ChunkedByteBuffer::new(min_chunk);
    let mut model: Vec<u8> = Vec::new();

    // Remaining bytes drive a sequence of operations against a Vec model.
    for op in data[1..].chunks(3) {
        match op {
            [0, value, ..] => {
                buffer.append_byte(*value);
                model.push(*value);
            }
            [1, offset, len] => {
                let source = &data[1..];
                let (offset, len) = (*offset as usize, *len as usize);
                let result = buffer.append_range(source, offset, len);
                if offset + len <= source.len() {
                    assert!(result.is_ok());
                    model.extend_from_slice(&source[offset..offset + len]);
                } else {
                    assert!(result.is_err());
                }
            }
            [2, ..] => {
                buffer.reset();
                model.clear();
            }
            [_, start, len] => {
                let (start, len) = (*start as usize, *len as usize);
                match buffer.to_vec_range(start, len) {
                    Ok(copy) => assert_eq!(copy, &model[start..start + len]),
                    Err(_) => assert!(start + len > model.len()),
                }
            }
            _ => {}
        }

        // Verify: size, indexed reads and chunk invariants track the model
        assert_eq!(buffer.len(), model.len());
        assert_eq!(buffer.is_empty(), model.is_empty());
        if let Some(last) = model.len().checked_sub(1) {
            assert_eq!(buffer.get(last).unwrap(), model[last]);
        }
        assert!(buffer.get(model.len()).is_err());
        for i in 0..buffer.chunk_count() {
            assert!(buffer.chunk_copy(i).unwrap().len() >= buffer.min_chunk_size());
        }
    }

    // Verify: full materialization matches the model
    assert_eq!(buffer.to_vec(), model);
});
