#![no_main]

use std::collections::VecDeque;
use std::io::Cursor;

use chainbuf::ChainBuffer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let mut buffer = ChainBuffer::new();
    let mut model: VecDeque<u8> = VecDeque::new();

    // Each op is two bytes: opcode, size
    for op in data.chunks(2) {
        let size = op.get(1).copied().unwrap_or(0) as usize * 16;

        match op[0] % 5 {
            0 => {
                let chunk: Vec<u8> = (0..size).map(|i| (i as u8) ^ op[0]).collect();
                buffer.add(&chunk).unwrap();
                model.extend(chunk);
            }
            1 => {
                buffer.drain(size);
                model.drain(..size.min(model.len()));
            }
            2 => {
                let mut dest = vec![0u8; size];
                let n = buffer.remove(&mut dest);
                let expected: Vec<u8> = model.drain(..n).collect();
                assert_eq!(n, size.min(n + model.len()));
                assert_eq!(&dest[..n], &expected[..]);
            }
            3 => {
                let chunk = vec![op[0]; size];
                let outcome = buffer
                    .add_from_reader(&mut Cursor::new(&chunk), Some(size))
                    .unwrap();
                assert_eq!(outcome.read, size);
                model.extend(chunk);
            }
            _ => {
                if let Some(index) = size.checked_sub(1) {
                    assert_eq!(buffer.byte_at(index), model.get(index).copied());
                }
            }
        }

        // Verify: length and content stay in sync with the model
        assert_eq!(buffer.len(), model.len());
        let total: usize = buffer.chunks().map(<[u8]>::len).sum();
        assert_eq!(total, model.len());
    }

    // Verify: the final stream matches
    let expected: Vec<u8> = model.into_iter().collect();
    assert_eq!(buffer.to_vec(), expected);
});
