#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Wire-frame codec for the AMQP 0-9-1 framing layer.
//!
//! Every unit on the wire is a frame: a 7-byte big-endian header (type
//! tag, channel number, payload length), a type-specific payload, and the
//! fixed `0xCE` frame-end octet. This crate converts between in-memory
//! [`Frame`] values and that byte representation in both directions, and
//! nothing more: connection negotiation, channel state, and heartbeat
//! timers belong to the transport built on top of it.
//!
//! The codec is a pure, stateless transformation. Each call operates only
//! on its own input and output buffers, so encoding and decoding are safe
//! to invoke concurrently without locking.
//!
//! # Examples
//!
//! Encode a content-header frame and decode it back:
//!
//! ```
//! use framing::{ContentHeader, Frame};
//!
//! # fn example() -> std::io::Result<()> {
//! let frame = Frame::content_header(1, ContentHeader::new(60, 1024));
//! let bytes = frame.encode()?;
//!
//! assert_eq!(bytes.len(), 7 + 14 + 1);
//! assert_eq!(*bytes.last().expect("nonempty"), 0xCE);
//!
//! let (decoded, remainder) = Frame::decode_from_slice(&bytes)?;
//! assert_eq!(decoded, frame);
//! assert!(remainder.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Stream frames over any blocking reader or writer:
//!
//! ```
//! use std::io::Cursor;
//! use framing::{Frame, read_frame, write_frame};
//!
//! # fn example() -> std::io::Result<()> {
//! let mut stream = Vec::new();
//! write_frame(&mut stream, &Frame::body(1, b"hello".to_vec()))?;
//! write_frame(&mut stream, &Frame::heartbeat(0))?;
//!
//! let mut cursor = Cursor::new(stream);
//! assert_eq!(read_frame(&mut cursor)?, Frame::body(1, b"hello".to_vec()));
//! assert_eq!(read_frame(&mut cursor)?, Frame::heartbeat(0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Malformed input is reported, never read past: truncated payloads fail
//! with a malformed-frame error, unknown type tags with an
//! unsupported-frame-type error, and a wrong terminator octet with a
//! frame-sync error (see [`FrameError`]).

mod content;
mod frame;
mod header;
mod method;

pub use content::{CONTENT_HEADER_LEN, CONTENT_HEADER_MIN_LEN, ContentHeader};
#[cfg(feature = "async")]
pub use frame::FrameCodec;
pub use frame::{
    BorrowedFrame, BorrowedFrames, Frame, FramePayload, read_frame, read_frame_into, write_frame,
    write_raw_frame,
};
pub use header::{
    FRAME_END, FRAME_ERROR, FRAME_MIN_SIZE, FrameError, FrameHeader, FrameType, HEADER_LEN,
    MAX_PAYLOAD_LENGTH, UNEXPECTED_FRAME,
};
pub use method::{METHOD_PREFIX_LEN, MethodDescriptor, MethodPayload};
