use crate::header::FrameError;

/// Encoded length of a content-header frame payload carrying no properties:
/// class id, weight, body size, and the zero property-flags word.
pub const CONTENT_HEADER_LEN: usize = 14;

/// Minimum payload length a decoder accepts: class id, weight, and body
/// size. The property-flags region that follows is ignored on decode.
pub const CONTENT_HEADER_MIN_LEN: usize = 12;

/// The fixed fields of a content-header frame payload.
///
/// A content header announces the body frames that follow it on the same
/// channel: the content class and the total size of the body in bytes. The
/// `weight` field is reserved and always zero, and the property-flags word
/// is always encoded as zero because property lists are not modeled here;
/// any flags present on incoming frames are skipped rather than parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContentHeader {
    class_id: u16,
    body_size: u64,
}

impl ContentHeader {
    /// Creates a content header for `class_id` announcing `body_size` bytes
    /// of following body frames.
    #[must_use]
    pub const fn new(class_id: u16, body_size: u64) -> Self {
        Self {
            class_id,
            body_size,
        }
    }

    /// Returns the content class identifier.
    #[must_use]
    #[inline]
    pub const fn class_id(self) -> u16 {
        self.class_id
    }

    /// Returns the total byte length of the body frames this header
    /// announces.
    #[must_use]
    #[inline]
    pub const fn body_size(self) -> u64 {
        self.body_size
    }

    /// Returns the reserved weight field, which is always zero on the wire.
    #[must_use]
    #[inline]
    pub const fn weight(self) -> u16 {
        0
    }

    /// Encodes the payload region of a content-header frame.
    ///
    /// All fields are big-endian: 2 bytes class id, 2 bytes weight (zero),
    /// 8 bytes body size, 2 bytes property flags (zero, the "no
    /// properties" sentinel).
    #[must_use]
    pub fn encode_payload(self) -> [u8; CONTENT_HEADER_LEN] {
        let mut bytes = [0u8; CONTENT_HEADER_LEN];
        bytes[..2].copy_from_slice(&self.class_id.to_be_bytes());
        // bytes 2..4 stay zero: reserved weight
        bytes[4..12].copy_from_slice(&self.body_size.to_be_bytes());
        // bytes 12..14 stay zero: property flags, "no properties"
        bytes
    }

    /// Parses the payload region of a content-header frame.
    ///
    /// Requires at least [`CONTENT_HEADER_MIN_LEN`] bytes. The weight field
    /// is skipped without validation and everything after the body size
    /// (property flags and any property list) is ignored.
    pub fn decode_payload(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < CONTENT_HEADER_MIN_LEN {
            return Err(FrameError::MalformedFrame {
                expected: CONTENT_HEADER_MIN_LEN,
                actual: bytes.len(),
            });
        }

        let class_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        // bytes 2..4: reserved weight, skipped
        let mut size = [0u8; 8];
        size.copy_from_slice(&bytes[4..12]);
        let body_size = u64::from_be_bytes(size);

        Ok(Self {
            class_id,
            body_size,
        })
    }
}
