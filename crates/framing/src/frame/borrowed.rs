use std::io;

use crate::header::FrameType;

use super::frame::Frame;
use super::helpers::{map_frame_error, split_frame_parts, trailing_frame_data_error};

/// A decoded frame whose payload borrows from the input slice.
///
/// Decoding a [`Frame`] copies the payload region into an owned buffer.
/// When the caller only needs to inspect a frame — dispatch on its type,
/// peek at a body chunk, route by channel — the copy is wasted work;
/// `BorrowedFrame` validates the same wire structure (header, declared
/// length, frame-end octet) while leaving the payload in place.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorrowedFrame<'a> {
    frame_type: FrameType,
    channel: u16,
    payload: &'a [u8],
}

impl<'a> BorrowedFrame<'a> {
    /// Decodes one frame from the beginning of `bytes` without copying the
    /// payload.
    ///
    /// The returned tuple contains the borrowed frame and a slice pointing
    /// at the remaining bytes after the frame-end octet.
    pub fn decode_from_slice(bytes: &'a [u8]) -> io::Result<(Self, &'a [u8])> {
        let (header, payload, remainder) = split_frame_parts(bytes)?;
        let frame = Self {
            frame_type: header.frame_type(),
            channel: header.channel(),
            payload,
        };
        Ok((frame, remainder))
    }

    /// Returns the frame-type tag decoded from the header.
    #[must_use]
    #[inline]
    pub const fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Returns the channel number the frame travels on.
    #[must_use]
    #[inline]
    pub const fn channel(&self) -> u16 {
        self.channel
    }

    /// Returns the borrowed payload region.
    #[must_use]
    #[inline]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Reports whether the frame travels on the connection-level channel.
    #[must_use]
    #[inline]
    pub const fn is_connection_level(&self) -> bool {
        self.channel == 0
    }

    /// Parses the payload into an owned, typed [`Frame`].
    ///
    /// This is where the per-type payload structure is validated; the
    /// borrowed decode only checks the frame envelope.
    pub fn into_owned(self) -> io::Result<Frame> {
        Frame::from_payload(self.frame_type, self.channel, self.payload).map_err(map_frame_error)
    }
}

impl<'a> std::convert::TryFrom<&'a [u8]> for BorrowedFrame<'a> {
    type Error = io::Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let (frame, remainder) = BorrowedFrame::decode_from_slice(bytes)?;
        if remainder.is_empty() {
            Ok(frame)
        } else {
            Err(trailing_frame_data_error(remainder.len()))
        }
    }
}

/// Iterator over the consecutive frames in a byte slice.
///
/// Yields `io::Result<BorrowedFrame>` items; the first decode failure is
/// yielded once and terminates the iteration, leaving the unconsumed bytes
/// (including the frame that failed) available through
/// [`BorrowedFrames::remainder`]. Trailing bytes that do not form a
/// complete frame are likewise left in the remainder.
#[derive(Clone, Debug)]
pub struct BorrowedFrames<'a> {
    bytes: &'a [u8],
    failed: bool,
}

impl<'a> BorrowedFrames<'a> {
    /// Creates an iterator over the frames in `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            failed: false,
        }
    }

    /// Returns the bytes not yet consumed by the iterator.
    #[must_use]
    #[inline]
    pub const fn remainder(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Iterator for BorrowedFrames<'a> {
    type Item = io::Result<BorrowedFrame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.bytes.is_empty() {
            return None;
        }

        match BorrowedFrame::decode_from_slice(self.bytes) {
            Ok((frame, remainder)) => {
                self.bytes = remainder;
                Some(Ok(frame))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
