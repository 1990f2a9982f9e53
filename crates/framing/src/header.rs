use ::core::convert::TryFrom;

use std::io;

use thiserror::Error;

/// Number of bytes in the fixed header preceding every frame payload.
pub const HEADER_LEN: usize = 7;

/// Sentinel octet terminating every frame on the wire.
///
/// A mismatch after the payload indicates stream desynchronization and must
/// surface as [`FrameError::FrameSync`] rather than being skipped.
pub const FRAME_END: u8 = 0xCE;

/// Smallest maximum-frame-size a peer is permitted to negotiate.
///
/// Frame-size negotiation itself happens above this crate; the constant is
/// exposed so transports can validate tuning parameters against the
/// published protocol constants table.
pub const FRAME_MIN_SIZE: u32 = 4096;

/// Maximum payload length representable in the 32-bit size field.
pub const MAX_PAYLOAD_LENGTH: u32 = u32::MAX;

/// Reply code peers use to report a malformed frame (`frame-error`).
pub const FRAME_ERROR: u16 = 501;

/// Reply code peers use to report a well-formed frame that arrived out of
/// context (`unexpected-frame`).
pub const UNEXPECTED_FRAME: u16 = 505;

/// Tags identifying the kind of payload a frame carries.
///
/// The numeric values mirror the published AMQP 0-9-1 constants table so
/// that decoded tags can be compared against captures from other
/// implementations without translation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum FrameType {
    #[doc(alias = "FRAME_METHOD")]
    /// Carries a class/method identifier pair followed by method-specific
    /// argument bytes.
    Method = 1,
    #[doc(alias = "FRAME_HEADER")]
    /// Announces a content body: class id, body size, property flags.
    Header = 2,
    #[doc(alias = "FRAME_BODY")]
    /// A raw chunk of content with no further structure.
    Body = 3,
    #[doc(alias = "FRAME_HEARTBEAT")]
    /// Empty frame exchanged to signal connection liveness.
    Heartbeat = 8,
}

impl FrameType {
    /// Returns the numeric representation expected on the wire.
    #[must_use]
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Attempts to construct a [`FrameType`] from its on-the-wire numeric
    /// representation.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Method),
            2 => Some(Self::Header),
            3 => Some(Self::Body),
            8 => Some(Self::Heartbeat),
            _ => None,
        }
    }

    /// Ordered list of all frame types defined by the wire format.
    ///
    /// The variants are arranged by their numeric value so callers can
    /// iterate deterministically when constructing golden streams or
    /// exhaustively testing round-trips.
    pub const ALL: [FrameType; 4] = [
        FrameType::Method,
        FrameType::Header,
        FrameType::Body,
        FrameType::Heartbeat,
    ];

    /// Returns the ordered list of all known frame types.
    #[must_use]
    pub const fn all() -> &'static [FrameType; 4] {
        &Self::ALL
    }
}

impl TryFrom<u8> for FrameType {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, FrameError> {
        Self::from_u8(value).ok_or(FrameError::UnsupportedFrameType(value))
    }
}

/// Failures surfaced while encoding or decoding frames.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FrameError {
    /// Fewer bytes were available than the structure being decoded
    /// requires. Decoders bounds-check before slicing, so truncated input
    /// is reported instead of read past.
    #[error("malformed frame: expected at least {expected} bytes, got {actual}")]
    MalformedFrame {
        /// Number of bytes the structure requires.
        expected: usize,
        /// Number of bytes that were available when decoding began.
        actual: usize,
    },
    /// The frame-type tag is not one of the four defined kinds.
    #[error("unsupported frame type tag {0}")]
    UnsupportedFrameType(u8),
    /// The octet following the payload was not [`FRAME_END`], indicating
    /// the stream has lost frame alignment.
    #[error("frame-end mismatch: expected {expected:#04x}, found {found:#04x}", expected = FRAME_END)]
    FrameSync {
        /// The octet found where the terminator was expected.
        found: u8,
    },
    /// The payload length cannot be represented in the 32-bit size field.
    #[error("payload length {0} exceeds maximum {max}", max = MAX_PAYLOAD_LENGTH)]
    OversizedPayload(u64),
    /// A method payload carried a different class/method pair than the one
    /// the caller asked to decode.
    #[error(
        "unexpected method: expected ({expected_class}, {expected_method}), got ({actual_class}, {actual_method})"
    )]
    UnexpectedMethod {
        /// Class id the caller expected.
        expected_class: u16,
        /// Method id the caller expected.
        expected_method: u16,
        /// Class id carried by the payload.
        actual_class: u16,
        /// Method id carried by the payload.
        actual_method: u16,
    },
}

impl FrameError {
    /// Returns the unrecognized frame-type tag, if that is what failed.
    ///
    /// Peers reply with [`UNEXPECTED_FRAME`] diagnostics that quote the
    /// offending tag; exposing it here saves callers from pattern matching
    /// on [`FrameError::UnsupportedFrameType`] to recover the value.
    #[must_use]
    pub const fn unsupported_frame_type(&self) -> Option<u8> {
        match self {
            Self::UnsupportedFrameType(tag) => Some(*tag),
            _ => None,
        }
    }

    /// Returns the octet found in place of the frame-end terminator, if the
    /// failure was a synchronization error.
    #[must_use]
    pub const fn found_terminator(&self) -> Option<u8> {
        match self {
            Self::FrameSync { found } => Some(*found),
            _ => None,
        }
    }
}

impl From<FrameError> for io::Error {
    fn from(err: FrameError) -> Self {
        let kind = match &err {
            FrameError::OversizedPayload(_) => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

/// A fully decoded frame header.
///
/// The header is the fixed 7-byte prefix of every frame: a 1-byte frame
/// type tag, a 2-byte channel number, and a 4-byte payload length, all
/// big-endian. It carries no cross-frame state; each header describes
/// exactly the payload that follows it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameHeader {
    frame_type: FrameType,
    channel: u16,
    payload_len: u32,
}

impl FrameHeader {
    /// Creates a new header for a frame of `frame_type` on `channel` with
    /// the provided payload length.
    #[must_use]
    pub const fn new(frame_type: FrameType, channel: u16, payload_len: u32) -> Self {
        Self {
            frame_type,
            channel,
            payload_len,
        }
    }

    /// Parses a header from the beginning of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_LEN {
            return Err(FrameError::MalformedFrame {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let frame_type = FrameType::try_from(bytes[0])?;
        let channel = u16::from_be_bytes([bytes[1], bytes[2]]);
        let payload_len = u32::from_be_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);

        Ok(Self {
            frame_type,
            channel,
            payload_len,
        })
    }

    /// Encodes this header into the big-endian format used on the wire.
    #[must_use]
    pub fn encode(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = self.frame_type.as_u8();
        bytes[1..3].copy_from_slice(&self.channel.to_be_bytes());
        bytes[3..HEADER_LEN].copy_from_slice(&self.payload_len.to_be_bytes());
        bytes
    }

    /// Returns the decoded frame type.
    #[must_use]
    #[inline]
    pub const fn frame_type(self) -> FrameType {
        self.frame_type
    }

    /// Returns the channel number the frame belongs to.
    #[must_use]
    #[inline]
    pub const fn channel(self) -> u16 {
        self.channel
    }

    /// Returns the payload length encoded in the header.
    #[must_use]
    #[inline]
    pub const fn payload_len(self) -> u32 {
        self.payload_len
    }

    /// Returns the payload length as a `usize` for buffer sizing.
    #[must_use]
    #[inline]
    pub const fn payload_len_usize(self) -> usize {
        self.payload_len as usize
    }

    /// Total number of bytes the frame occupies on the wire: header,
    /// payload, and the trailing frame-end octet.
    #[must_use]
    #[inline]
    pub const fn frame_len(self) -> usize {
        HEADER_LEN + self.payload_len as usize + 1
    }

    /// Reports whether the frame travels on the connection-level channel
    /// (channel number 0).
    #[must_use]
    #[inline]
    pub const fn is_connection_level(self) -> bool {
        self.channel == 0
    }
}
