//! Async codec for wire frames using tokio-util.
//!
//! This module provides [`FrameCodec`], a [`tokio_util::codec::Decoder`]
//! and [`tokio_util::codec::Encoder`] implementation for the frame format:
//! a 7-byte big-endian header, a variable-length payload, and the fixed
//! frame-end octet.

use bytes::{Buf, BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

use crate::header::{FRAME_END, FrameHeader, FrameType, HEADER_LEN, MAX_PAYLOAD_LENGTH};

use super::frame::{Frame, FramePayload};
use super::helpers::{ensure_payload_length, frame_sync_error, map_frame_error};

/// Async codec for wire frames.
///
/// Implements both [`Decoder`] and [`Encoder`] from tokio-util to enable
/// bidirectional framed I/O over async streams:
///
/// - **Decoding** reads the 7-byte header to determine the frame type,
///   channel, and payload length, then waits until the payload and the
///   frame-end octet are buffered before producing a [`Frame`]. A
///   mismatched terminator fails the stream instead of resynchronizing.
/// - **Encoding** writes the header, the payload region, and the
///   terminator.
///
/// # Example
///
/// ```ignore
/// use futures::{SinkExt, StreamExt};
/// use tokio_util::codec::Framed;
/// use framing::{Frame, FrameCodec};
///
/// async fn example(stream: impl AsyncRead + AsyncWrite + Unpin) {
///     let mut framed = Framed::new(stream, FrameCodec::new());
///
///     framed.send(Frame::body(1, b"hello".to_vec())).await?;
///
///     if let Some(frame) = framed.next().await {
///         println!("received: {:?}", frame?);
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct FrameCodec {
    /// Maximum payload size to accept when decoding.
    ///
    /// Defaults to [`MAX_PAYLOAD_LENGTH`]. Transports that have negotiated
    /// a smaller frame-max reduce this so an oversized length prefix fails
    /// fast instead of buffering to the declared size.
    max_payload_len: u32,
}

impl FrameCodec {
    /// Creates a new codec accepting payloads up to [`MAX_PAYLOAD_LENGTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_payload_len: MAX_PAYLOAD_LENGTH,
        }
    }

    /// Creates a codec with a custom maximum accepted payload length.
    ///
    /// Use this after frame-size negotiation, or in memory-constrained
    /// environments where buffering multi-gigabyte payloads would be
    /// problematic.
    #[must_use]
    pub const fn with_max_payload_len(max_payload_len: u32) -> Self {
        Self { max_payload_len }
    }

    /// Returns the maximum payload length this codec will accept.
    #[must_use]
    pub const fn max_payload_len(&self) -> u32 {
        self.max_payload_len
    }

    fn put_frame_parts(dst: &mut BytesMut, header: FrameHeader, payload: &FramePayload) {
        dst.put_slice(&header.encode());
        match payload {
            FramePayload::Method(method) => {
                dst.put_slice(&method.prefix_bytes());
                dst.put_slice(method.arguments());
            }
            FramePayload::Header(content_header) => {
                dst.put_slice(&content_header.encode_payload());
            }
            FramePayload::Body(content) => dst.put_slice(content),
            FramePayload::Heartbeat => {}
        }
        dst.put_u8(FRAME_END);
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Need at least the header to proceed.
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        // Peek at the header without consuming, in case the rest of the
        // frame is not buffered yet.
        let header = FrameHeader::decode(&src[..HEADER_LEN]).map_err(map_frame_error)?;
        let payload_len = header.payload_len();

        if payload_len > self.max_payload_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "payload length {} exceeds maximum {}",
                    payload_len, self.max_payload_len
                ),
            ));
        }

        let total_len = header.frame_len();
        if src.len() < total_len {
            src.reserve(total_len - src.len());
            return Ok(None);
        }

        let terminator = src[total_len - 1];
        if terminator != FRAME_END {
            return Err(frame_sync_error(terminator));
        }

        src.advance(HEADER_LEN);
        let payload = src.split_to(header.payload_len_usize());
        src.advance(1);

        let frame = Frame::from_payload(header.frame_type(), header.channel(), &payload)
            .map_err(map_frame_error)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            frame_type = ?frame.frame_type(),
            channel = frame.channel(),
            payload_len = header.payload_len(),
            "decoded frame"
        );

        Ok(Some(frame))
    }
}

impl Encoder<Frame> for FrameCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Frame>>::encode(self, &item, dst)
    }
}

/// Encoder implementation for borrowed frames to avoid cloning.
impl Encoder<&Frame> for FrameCodec {
    type Error = io::Error;

    fn encode(&mut self, item: &Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let header = item.header()?;

        dst.reserve(item.encoded_len());
        Self::put_frame_parts(dst, header, item.payload());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            frame_type = ?item.frame_type(),
            channel = item.channel(),
            payload_len = header.payload_len(),
            "encoded frame"
        );

        Ok(())
    }
}

/// Encoder implementation for raw parts, for zero-copy sending of payload
/// regions the caller already has in serialized form.
impl Encoder<(FrameType, u16, &[u8])> for FrameCodec {
    type Error = io::Error;

    fn encode(
        &mut self,
        (frame_type, channel, payload): (FrameType, u16, &[u8]),
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        let payload_len = ensure_payload_length(payload.len())?;
        let header = FrameHeader::new(frame_type, channel, payload_len);

        dst.reserve(header.frame_len());
        dst.put_slice(&header.encode());
        dst.put_slice(payload);
        dst.put_u8(FRAME_END);

        Ok(())
    }
}
