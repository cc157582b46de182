// Integration tests for ChainBuffer
// Tests cover: append/drain/remove semantics, growth policy, search, properties

use std::io::Cursor;

use bytes::Buf;
use chainbuf::{BufferConfig, ChainBuffer, FillOutcome};
use proptest::prelude::*;

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_add_then_remove_concatenates() {
    let mut buffer = ChainBuffer::new();
    buffer.add(b"hello").unwrap();
    buffer.add(b" world").unwrap();

    let mut dest = [0u8; 11];
    assert_eq!(buffer.remove(&mut dest), 11);
    assert_eq!(&dest, b"hello world");
    assert!(buffer.is_empty());
}

#[test]
fn test_drain_then_remove() {
    let mut buffer = ChainBuffer::new();
    buffer.add(b"hello").unwrap();
    buffer.drain(2);

    let mut dest = [0u8; 3];
    assert_eq!(buffer.remove(&mut dest), 3);
    assert_eq!(&dest, b"llo");
}

#[test]
fn test_interleaved_600_add_550_drain() {
    let mut buffer = ChainBuffer::new();
    let mut expected = Vec::new();
    let mut consumed = 0usize;

    for round in 0..20u32 {
        let chunk: Vec<u8> = (0..600).map(|i| ((round * 600 + i) % 251) as u8).collect();
        buffer.add(&chunk).unwrap();
        expected.extend_from_slice(&chunk);

        buffer.drain(550);
        consumed += 550;

        assert_eq!(buffer.len(), expected.len() - consumed);
    }

    let mut dest = vec![0u8; buffer.len()];
    assert_eq!(buffer.remove(&mut dest), 20 * 50);
    assert_eq!(dest, &expected[consumed..]);
}

#[test]
fn test_immediate_eof_reports_zero() {
    let mut buffer = ChainBuffer::new();
    let outcome = buffer
        .add_from_reader(&mut Cursor::new(Vec::<u8>::new()), None)
        .unwrap();
    assert_eq!(outcome, FillOutcome { read: 0, eof: true });
}

// ============================================================================
// Emptiness and Growth
// ============================================================================

#[test]
fn test_drain_empty_and_overdrain() {
    let mut buffer = ChainBuffer::new();
    buffer.drain(10);
    assert!(buffer.is_empty());

    buffer.add(&[1u8; 1500]).unwrap();
    buffer.drain(10_000);
    assert!(buffer.is_empty());
    assert_eq!(buffer.segment_count(), 0);

    let mut dest = [0u8; 4];
    assert_eq!(buffer.remove(&mut dest), 0);
}

#[test]
fn test_growth_matches_power_of_two() {
    for len in [1usize, 100, 511, 512, 513, 4000, 4096, 70_000] {
        let mut buffer = ChainBuffer::new();
        buffer.add(&vec![0xAB; len]).unwrap();

        assert_eq!(buffer.segment_count(), 1, "len {}", len);
        assert_eq!(
            buffer.capacity(),
            len.max(512).next_power_of_two(),
            "len {}",
            len
        );
    }
}

#[test]
fn test_growth_respects_configured_minimum() {
    let config = BufferConfig::new(1024, 8192).unwrap();
    let mut buffer = ChainBuffer::with_config(config).unwrap();
    buffer.add(&[0u8; 10]).unwrap();
    assert_eq!(buffer.capacity(), 1024);

    let outcome = buffer
        .add_from_reader(&mut Cursor::new(vec![0u8; 2000]), None)
        .unwrap();
    assert_eq!(outcome.read, 2000);
    // 1014 bytes fit in the first segment, the rest in an 8 KiB read segment
    assert_eq!(buffer.capacity(), 1024 + 8192);
}

#[test]
fn test_steady_state_does_not_grow() {
    let mut buffer = ChainBuffer::new();
    for _ in 0..1000 {
        buffer.add(&[7u8; 100]).unwrap();
        buffer.drain(100);
    }
    assert!(buffer.segment_count() <= 1);

    for _ in 0..1000 {
        buffer.add(&[7u8; 100]).unwrap();
        buffer.drain(60);
    }
    assert_eq!(buffer.len(), 40_000);
    assert!(buffer.capacity() < 2 * 40_000 + 4096);
}

// ============================================================================
// Search and Access
// ============================================================================

#[test]
fn test_find_across_segment_boundary() {
    let mut buffer = ChainBuffer::new();
    buffer.add(&[b'-'; 510]).unwrap();
    buffer.add(b"\r\n\r\nbody").unwrap();
    assert_eq!(buffer.segment_count(), 2);

    assert_eq!(buffer.find_str("\r\n\r\n"), Some(510));
    assert_eq!(buffer.byte_at(512), Some(b'\r'));
    assert_eq!(buffer.find_str("body"), Some(514));
    assert_eq!(buffer.find_str("nope"), None);
}

#[test]
fn test_buf_trait_extraction() {
    let mut buffer = ChainBuffer::new();
    buffer.add(&[0x00, 0x00, 0x01, 0x00]).unwrap();
    buffer.add_str("payload").unwrap();

    let len = buffer.get_u32() as usize;
    assert_eq!(len, 256);
    let payload = buffer.copy_to_bytes(buffer.remaining());
    assert_eq!(&payload[..], b"payload");
}

#[test]
fn test_add_fmt_and_add_str() {
    let mut buffer = ChainBuffer::new();
    buffer.add_str("HTTP/1.1 ").unwrap();
    let n = buffer
        .add_fmt(format_args!("{} {}\r\n", 200, "OK"))
        .unwrap();
    assert_eq!(n, 8);
    assert_eq!(buffer.to_vec(), b"HTTP/1.1 200 OK\r\n");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_round_trip(parts in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2000), 0..20)) {
        let mut buffer = ChainBuffer::new();
        let mut expected = Vec::new();
        for part in &parts {
            buffer.add(part).unwrap();
            expected.extend_from_slice(part);
        }

        prop_assert_eq!(buffer.len(), expected.len());
        let mut dest = vec![0u8; expected.len()];
        prop_assert_eq!(buffer.remove(&mut dest), expected.len());
        prop_assert_eq!(dest, expected);
        prop_assert!(buffer.is_empty());
    }

    #[test]
    fn prop_matches_model(ops in prop::collection::vec((any::<bool>(), 0usize..1500), 0..60)) {
        let mut buffer = ChainBuffer::new();
        let mut model: Vec<u8> = Vec::new();
        let mut next = 0u8;

        for (is_add, n) in ops {
            if is_add {
                let chunk: Vec<u8> = (0..n).map(|_| { next = next.wrapping_add(1); next }).collect();
                buffer.add(&chunk).unwrap();
                model.extend_from_slice(&chunk);
            } else {
                buffer.drain(n);
                model.drain(..n.min(model.len()));
            }

            prop_assert_eq!(buffer.len(), model.len());
            let total: usize = buffer.chunks().map(<[u8]>::len).sum();
            prop_assert_eq!(total, model.len());
        }

        prop_assert_eq!(buffer.to_vec(), model);
    }

    #[test]
    fn prop_find_agrees_with_slice_search(
        parts in prop::collection::vec(prop::collection::vec(0u8..4, 0..700), 1..6),
        needle in prop::collection::vec(0u8..4, 1..5),
    ) {
        let mut buffer = ChainBuffer::new();
        let mut flat = Vec::new();
        for part in &parts {
            buffer.add(part).unwrap();
            flat.extend_from_slice(part);
        }

        let expected = flat.windows(needle.len()).position(|w| w == &needle[..]);
        prop_assert_eq!(buffer.find(&needle), expected);
    }
}
