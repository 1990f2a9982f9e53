//! Fuzz-like tests for wire-format parsing.
//!
//! These tests feed arbitrary/random bytes to the frame parsers to verify:
//! - Parsers never panic on malformed input
//! - Parsers return appropriate errors for invalid data
//! - Truncation at every byte boundary is reported, never read past
//!
//! Since full cargo-fuzz setup can be complex, these tests use deterministic
//! pseudo-random byte generation within standard test infrastructure.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Cursor};

use framing::{
    BorrowedFrame, BorrowedFrames, ContentHeader, Frame, FrameHeader, FrameType, HEADER_LEN,
    MethodPayload, read_frame,
};

// ============================================================================
// Test Utilities: Pseudo-random byte generation
// ============================================================================

/// Generates a deterministic sequence of pseudo-random bytes for
/// reproducible testing.
fn generate_random_bytes(seed: u64, count: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(count);
    for i in 0..count {
        let mut hasher = DefaultHasher::new();
        (seed, i).hash(&mut hasher);
        bytes.push((hasher.finish() & 0xFF) as u8);
    }
    bytes
}

/// Edge-case byte patterns worth probing explicitly.
fn edge_case_byte_patterns() -> Vec<Vec<u8>> {
    vec![
        // Empty
        vec![],
        // Single bytes, including every valid frame-type tag
        vec![0x00],
        vec![0x01],
        vec![0x02],
        vec![0x03],
        vec![0x08],
        vec![0xCE],
        vec![0xFF],
        // Partial headers
        vec![0x01, 0x00],
        vec![0x02, 0x00, 0x01],
        vec![0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
        // Complete header claiming a huge payload, nothing behind it
        vec![0x03, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF],
        // Header-only frame with zero length and no terminator
        vec![0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        // Zero-length frame with a wrong terminator
        vec![0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        // All terminator octets
        vec![0xCE; 16],
    ]
}

// ============================================================================
// Module: Slice Decoder Fuzz Tests
// ============================================================================

mod slice_decode_fuzz {
    use super::*;

    /// Verify Frame::decode_from_slice never panics on arbitrary bytes.
    #[test]
    fn decode_from_slice_no_panic_random_bytes() {
        for seed in 0..100 {
            for len in 0..=32 {
                let bytes = generate_random_bytes(seed, len);
                // Should not panic - result is either Ok or Err.
                let _ = Frame::decode_from_slice(&bytes);
            }
        }
    }

    #[test]
    fn decode_from_slice_no_panic_edge_cases() {
        for pattern in edge_case_byte_patterns() {
            let _ = Frame::decode_from_slice(&pattern);
            let _ = BorrowedFrame::decode_from_slice(&pattern);
        }
    }

    /// Every strict prefix of a valid frame must fail with UnexpectedEof.
    #[test]
    fn every_truncation_point_reports_eof() {
        let frames = [
            Frame::method(1, MethodPayload::new(10, 11, vec![0x01, 0x02, 0x03])),
            Frame::content_header(1, ContentHeader::new(60, 4096)),
            Frame::body(2, generate_random_bytes(7, 40)),
            Frame::heartbeat(0),
        ];

        for frame in frames {
            let bytes = frame.encode().expect("encodable frame");
            for len in 0..bytes.len() {
                let err = Frame::decode_from_slice(&bytes[..len]).unwrap_err();
                assert_eq!(
                    err.kind(),
                    io::ErrorKind::UnexpectedEof,
                    "prefix {len} of {:?}",
                    frame.frame_type()
                );
            }
        }
    }

    /// Flipping the terminator of a valid frame must fail as a sync error,
    /// regardless of which octet replaced it.
    #[test]
    fn corrupted_terminator_always_detected() {
        let frame = Frame::body(1, b"payload".to_vec());
        let bytes = frame.encode().expect("encodable frame");
        let last = bytes.len() - 1;

        for replacement in 0..=u8::MAX {
            if replacement == 0xCE {
                continue;
            }
            let mut corrupted = bytes.clone();
            corrupted[last] = replacement;

            let err = Frame::decode_from_slice(&corrupted).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        }
    }

    /// Every unassigned frame-type tag must be rejected, not dispatched.
    #[test]
    fn unknown_frame_type_tags_rejected() {
        for tag in 0..=u8::MAX {
            if FrameType::from_u8(tag).is_some() {
                continue;
            }

            let mut bytes = vec![tag, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
            bytes.push(0xCE);

            let err = Frame::decode_from_slice(&bytes).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData, "tag {tag}");
        }
    }
}

// ============================================================================
// Module: Header and Payload Parser Fuzz Tests
// ============================================================================

mod field_parser_fuzz {
    use super::*;

    #[test]
    fn header_decode_no_panic_random_bytes() {
        for seed in 0..100 {
            for len in 0..=HEADER_LEN + 2 {
                let bytes = generate_random_bytes(seed, len);
                let _ = FrameHeader::decode(&bytes);
            }
        }
    }

    #[test]
    fn content_header_decode_no_panic_random_bytes() {
        for seed in 0..100 {
            for len in 0..=20 {
                let bytes = generate_random_bytes(seed, len);
                let _ = ContentHeader::decode_payload(&bytes);
            }
        }
    }

    #[test]
    fn method_payload_decode_no_panic_random_bytes() {
        for seed in 0..100 {
            for len in 0..=20 {
                let bytes = generate_random_bytes(seed, len);
                let _ = MethodPayload::decode(&bytes);
            }
        }
    }

    /// Random header bytes that do decode must describe themselves
    /// consistently.
    #[test]
    fn decoded_headers_are_internally_consistent() {
        for seed in 0..200 {
            let bytes = generate_random_bytes(seed, HEADER_LEN);
            if let Ok(header) = FrameHeader::decode(&bytes) {
                assert_eq!(header.encode(), bytes.as_slice());
                assert_eq!(
                    header.frame_len(),
                    HEADER_LEN + header.payload_len_usize() + 1
                );
            }
        }
    }
}

// ============================================================================
// Module: Stream Reader Fuzz Tests
// ============================================================================

mod stream_fuzz {
    use super::*;

    /// Reading from a random byte stream either produces a frame or a
    /// clean error, never a panic.
    #[test]
    fn read_frame_no_panic_random_streams() {
        for seed in 0..100 {
            let bytes = generate_random_bytes(seed, 64);
            let mut cursor = Cursor::new(bytes);
            let _ = read_frame(&mut cursor);
        }
    }

    /// The borrowed iterator must terminate on garbage rather than loop.
    #[test]
    fn borrowed_frames_terminates_on_garbage() {
        for seed in 0..100 {
            let bytes = generate_random_bytes(seed, 128);
            let iter = BorrowedFrames::new(&bytes);
            // Bounded by construction: each item consumes at least 8 bytes
            // or ends the iteration.
            assert!(iter.count() <= 17);
        }
    }

    /// Valid frames interleaved into the iterator decode until the first
    /// corruption and not beyond.
    #[test]
    fn borrowed_frames_stops_at_corruption_boundary() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&Frame::heartbeat(0).encode().expect("encodable"));
        bytes.extend_from_slice(&Frame::body(1, b"ok".to_vec()).encode().expect("encodable"));
        bytes.extend_from_slice(&generate_random_bytes(3, 5));

        let mut iter = BorrowedFrames::new(&bytes);
        assert!(iter.next().expect("heartbeat").is_ok());
        assert!(iter.next().expect("body").is_ok());

        let tail = iter.next().expect("corrupt tail yields an error");
        assert!(tail.is_err());
        assert!(iter.next().is_none());
    }
}
