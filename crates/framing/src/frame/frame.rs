use std::io::{self, Write};

use crate::content::ContentHeader;
use crate::header::{FRAME_END, FrameError, FrameHeader, FrameType, HEADER_LEN};
use crate::method::MethodPayload;

use super::helpers::{
    ensure_payload_length, map_allocation_error, map_frame_error, split_frame_parts,
    trailing_frame_data_error,
};

/// The type-specific payload of a frame.
///
/// The wire format dispatches on a one-byte tag; in memory that dispatch is
/// a tagged union, with one variant per frame kind. Each variant owns
/// exactly the data its payload region carries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FramePayload {
    /// A class/method pair with opaque argument bytes.
    Method(MethodPayload),
    /// A content header announcing the size of the body that follows.
    Header(ContentHeader),
    /// A raw chunk of content bytes.
    Body(Vec<u8>),
    /// The empty liveness payload.
    Heartbeat,
}

impl FramePayload {
    /// Returns the wire tag for this payload kind.
    #[must_use]
    pub const fn frame_type(&self) -> FrameType {
        match self {
            Self::Method(_) => FrameType::Method,
            Self::Header(_) => FrameType::Header,
            Self::Body(_) => FrameType::Body,
            Self::Heartbeat => FrameType::Heartbeat,
        }
    }

    /// Returns the number of bytes this payload occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Method(method) => method.encoded_len(),
            Self::Header(_) => crate::content::CONTENT_HEADER_LEN,
            Self::Body(content) => content.len(),
            Self::Heartbeat => 0,
        }
    }

    /// Appends the encoded payload region to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Method(method) => method.encode_into(out),
            Self::Header(header) => out.extend_from_slice(&header.encode_payload()),
            Self::Body(content) => out.extend_from_slice(content),
            Self::Heartbeat => {}
        }
    }

    /// Parses a payload region according to `frame_type`.
    ///
    /// Heartbeat payloads are ignored rather than validated: the frame kind
    /// alone carries the signal. Body payloads are taken verbatim. Header
    /// and method payloads are bounds-checked before any field is read.
    pub fn decode(frame_type: FrameType, payload: &[u8]) -> Result<Self, FrameError> {
        match frame_type {
            FrameType::Method => MethodPayload::decode(payload).map(Self::Method),
            FrameType::Header => ContentHeader::decode_payload(payload).map(Self::Header),
            FrameType::Body => Ok(Self::Body(payload.to_vec())),
            FrameType::Heartbeat => Ok(Self::Heartbeat),
        }
    }
}

/// One discrete unit of the wire protocol: a channel number and a typed
/// payload.
///
/// Frames are constructed immediately before encoding or produced by
/// decoding, and are immutable once built. The codec holds no cross-frame
/// state; sequencing and multiplexing belong to the transport above it.
///
/// # Examples
///
/// ```
/// use framing::Frame;
///
/// # fn example() -> std::io::Result<()> {
/// let frame = Frame::body(1, b"hello".to_vec());
/// let bytes = frame.encode()?;
///
/// assert_eq!(bytes.len(), 7 + 5 + 1);
/// assert_eq!(*bytes.last().expect("nonempty"), 0xCE);
///
/// let (decoded, remainder) = Frame::decode_from_slice(&bytes)?;
/// assert_eq!(decoded, frame);
/// assert!(remainder.is_empty());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    channel: u16,
    payload: FramePayload,
}

impl Frame {
    /// Constructs a frame from a channel number and payload.
    #[must_use]
    pub const fn new(channel: u16, payload: FramePayload) -> Self {
        Self { channel, payload }
    }

    /// Constructs a heartbeat frame on `channel`.
    ///
    /// Heartbeats are normally sent on the connection-level channel 0; the
    /// codec does not enforce that, since channel policy lives above it.
    #[must_use]
    pub const fn heartbeat(channel: u16) -> Self {
        Self::new(channel, FramePayload::Heartbeat)
    }

    /// Constructs a body frame wrapping `content` verbatim.
    #[must_use]
    pub const fn body(channel: u16, content: Vec<u8>) -> Self {
        Self::new(channel, FramePayload::Body(content))
    }

    /// Constructs a content-header frame.
    #[must_use]
    pub const fn content_header(channel: u16, header: ContentHeader) -> Self {
        Self::new(channel, FramePayload::Header(header))
    }

    /// Constructs a method frame.
    #[must_use]
    pub const fn method(channel: u16, method: MethodPayload) -> Self {
        Self::new(channel, FramePayload::Method(method))
    }

    /// Decodes a frame from a payload region already extracted by a
    /// transport-level reader.
    ///
    /// The caller supplies the frame-type tag and channel from the header
    /// it has already consumed; this function parses only the payload. Use
    /// [`Frame::decode_from_slice`] when the full frame, header and
    /// terminator included, is at hand.
    pub fn from_payload(
        frame_type: FrameType,
        channel: u16,
        payload: &[u8],
    ) -> Result<Self, FrameError> {
        FramePayload::decode(frame_type, payload).map(|payload| Self::new(channel, payload))
    }

    /// Returns the channel number the frame travels on.
    #[must_use]
    #[inline]
    pub const fn channel(&self) -> u16 {
        self.channel
    }

    /// Returns the typed payload.
    #[must_use]
    #[inline]
    pub const fn payload(&self) -> &FramePayload {
        &self.payload
    }

    /// Returns the wire tag of the payload.
    #[must_use]
    #[inline]
    pub const fn frame_type(&self) -> FrameType {
        self.payload.frame_type()
    }

    /// Returns the number of bytes the payload region occupies on the wire.
    #[must_use]
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.encoded_len()
    }

    /// Reports whether the frame travels on the connection-level channel.
    #[must_use]
    #[inline]
    pub const fn is_connection_level(&self) -> bool {
        self.channel == 0
    }

    /// Consumes the frame and returns the owned payload.
    #[must_use]
    #[inline]
    pub fn into_payload(self) -> FramePayload {
        self.payload
    }

    /// Consumes the frame and returns the channel together with the owned
    /// payload.
    #[must_use]
    #[inline]
    pub fn into_parts(self) -> (u16, FramePayload) {
        (self.channel, self.payload)
    }

    /// Returns the wire header that matches the current frame contents.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the payload length
    /// exceeds the 32-bit size field, mirroring the error that
    /// [`crate::write_frame`] would produce for the same frame.
    pub fn header(&self) -> io::Result<FrameHeader> {
        let payload_len = ensure_payload_length(self.payload_len())?;
        Ok(FrameHeader::new(self.frame_type(), self.channel, payload_len))
    }

    /// Returns the total encoded size: header, payload, and terminator.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.payload_len() + 1
    }

    /// Encodes the frame into the caller-provided buffer.
    ///
    /// The buffer is extended with the 7-byte header, the payload region,
    /// and the frame-end octet without clearing any existing contents.
    /// Capacity is grown with [`Vec::try_reserve`] so allocation failure
    /// surfaces as [`io::ErrorKind::OutOfMemory`] instead of aborting.
    pub fn encode_into_vec(&self, out: &mut Vec<u8>) -> io::Result<()> {
        let header = self.header()?;
        out.try_reserve(self.encoded_len())
            .map_err(map_allocation_error)?;

        out.extend_from_slice(&header.encode());
        self.payload.encode_into(out);
        out.push(FRAME_END);

        Ok(())
    }

    /// Encodes the frame into a freshly allocated buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use framing::Frame;
    ///
    /// # fn example() -> std::io::Result<()> {
    /// let bytes = Frame::heartbeat(0).encode()?;
    /// assert_eq!(bytes, [0x08, 0, 0, 0, 0, 0, 0, 0xCE]);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn encode(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into_vec(&mut out)?;
        Ok(out)
    }

    /// Writes the frame into an [`io::Write`] implementor.
    ///
    /// Forwards to [`crate::write_frame`], which uses vectored writes to
    /// avoid assembling the frame in an intermediate buffer.
    pub fn encode_into_writer<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        super::io::write_frame(writer, self)
    }

    /// Decodes one frame from the beginning of `bytes`.
    ///
    /// The returned tuple contains the decoded frame together with a slice
    /// pointing at the remaining, unread bytes. The frame-end octet is
    /// validated; a mismatch fails with a [`FrameError::FrameSync`] source
    /// rather than silently proceeding. Callers that require the slice to
    /// contain exactly one frame can use [`TryFrom<&[u8]>`] instead, and
    /// [`crate::BorrowedFrame::decode_from_slice`] parses without copying
    /// the payload when a borrowed view suffices.
    pub fn decode_from_slice(bytes: &[u8]) -> io::Result<(Self, &[u8])> {
        let (header, payload, remainder) = split_frame_parts(bytes)?;
        let frame = Self::from_payload(header.frame_type(), header.channel(), payload)
            .map_err(map_frame_error)?;
        Ok((frame, remainder))
    }
}

impl std::convert::TryFrom<&[u8]> for Frame {
    type Error = io::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let (frame, remainder) = Frame::decode_from_slice(bytes)?;
        if remainder.is_empty() {
            Ok(frame)
        } else {
            Err(trailing_frame_data_error(remainder.len()))
        }
    }
}

impl From<Frame> for (u16, FramePayload) {
    fn from(frame: Frame) -> Self {
        frame.into_parts()
    }
}
