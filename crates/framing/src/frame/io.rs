use std::io::{self, IoSlice, Read, Write};

use crate::header::{FRAME_END, FrameHeader, FrameType, HEADER_LEN};

use super::frame::{Frame, FramePayload};
use super::helpers::{
    ensure_payload_length, frame_sync_error, map_frame_error, read_payload_into,
};

/// Writes `frame` to `writer` in its wire representation.
///
/// The header, payload, and frame-end octet are submitted as a single
/// vectored write where the platform supports it, falling back to
/// sequential writes otherwise, so a frame is never assembled in an
/// intermediate buffer. The payload length is validated against the 32-bit
/// size field; violations surface as [`io::ErrorKind::InvalidInput`].
///
/// # Examples
///
/// ```
/// use framing::{Frame, write_frame};
///
/// # fn example() -> std::io::Result<()> {
/// let mut bytes = Vec::new();
/// write_frame(&mut bytes, &Frame::heartbeat(0))?;
///
/// assert_eq!(bytes.len(), 8);
/// assert_eq!(bytes[0], 0x08);
/// assert_eq!(bytes[7], 0xCE);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> io::Result<()> {
    let header = frame.header()?;
    let header_bytes = header.encode();
    let end = [FRAME_END];

    match frame.payload() {
        FramePayload::Heartbeat => {
            let mut parts: [&[u8]; 2] = [&header_bytes, &end];
            write_all_parts(writer, &mut parts)
        }
        FramePayload::Body(content) => {
            let mut parts: [&[u8]; 3] = [&header_bytes, content, &end];
            write_all_parts(writer, &mut parts)
        }
        FramePayload::Header(content_header) => {
            let payload = content_header.encode_payload();
            let mut parts: [&[u8]; 3] = [&header_bytes, &payload, &end];
            write_all_parts(writer, &mut parts)
        }
        FramePayload::Method(method) => {
            let prefix = method.prefix_bytes();
            let mut parts: [&[u8]; 4] = [&header_bytes, &prefix, method.arguments(), &end];
            write_all_parts(writer, &mut parts)
        }
    }
}

/// Writes a frame from raw parts without constructing a [`Frame`] value.
///
/// Useful for streaming body chunks straight out of a caller-owned buffer:
/// the payload slice is framed and terminated in place. The payload bytes
/// are not interpreted, so the caller is responsible for handing over a
/// region that matches `frame_type`.
pub fn write_raw_frame<W: Write>(
    writer: &mut W,
    frame_type: FrameType,
    channel: u16,
    payload: &[u8],
) -> io::Result<()> {
    let payload_len = ensure_payload_length(payload.len())?;
    let header = FrameHeader::new(frame_type, channel, payload_len);
    let header_bytes = header.encode();
    let end = [FRAME_END];
    let mut parts: [&[u8]; 3] = [&header_bytes, payload, &end];

    write_all_parts(writer, &mut parts)
}

/// Reads the next frame from `reader`.
///
/// Blocks until the full header, payload, and terminator are read or an
/// I/O error occurs. Invalid headers and terminator mismatches surface as
/// [`io::ErrorKind::InvalidData`]; a stream that ends mid-frame surfaces
/// as [`io::ErrorKind::UnexpectedEof`].
pub fn read_frame<R: Read>(reader: &mut R) -> io::Result<Frame> {
    let mut payload = Vec::new();
    let header = read_frame_into(reader, &mut payload)?;

    Frame::from_payload(header.frame_type(), header.channel(), &payload).map_err(map_frame_error)
}

/// Reads the next frame's payload into a caller-provided buffer.
///
/// Mirrors [`read_frame`] but avoids allocating a new vector for every
/// frame: the buffer is cleared and resized to the exact payload length,
/// reusing existing capacity. The decoded header is returned so the caller
/// can dispatch on the frame type while reading the payload from `buffer`.
/// The frame-end octet is consumed and validated before returning.
pub fn read_frame_into<R: Read>(reader: &mut R, buffer: &mut Vec<u8>) -> io::Result<FrameHeader> {
    let header = read_header(reader)?;
    read_payload_into(reader, buffer, header.payload_len_usize())?;
    read_terminator(reader)?;

    Ok(header)
}

fn read_header<R: Read>(reader: &mut R) -> io::Result<FrameHeader> {
    let mut header_bytes = [0u8; HEADER_LEN];
    reader.read_exact(&mut header_bytes)?;
    FrameHeader::decode(&header_bytes).map_err(map_frame_error)
}

fn read_terminator<R: Read>(reader: &mut R) -> io::Result<()> {
    let mut end = [0u8; 1];
    reader.read_exact(&mut end)?;
    if end[0] == FRAME_END {
        Ok(())
    } else {
        Err(frame_sync_error(end[0]))
    }
}

/// Writes every part in order, preferring a single vectored submission.
///
/// Writers that do not support vectored I/O (or reject the slice count)
/// are retried with plain sequential writes. A writer that reports zero
/// progress on a nonempty buffer fails with [`io::ErrorKind::WriteZero`],
/// and one that claims more progress than was offered fails with
/// [`io::ErrorKind::InvalidData`].
fn write_all_parts<W: Write + ?Sized>(writer: &mut W, parts: &mut [&[u8]]) -> io::Result<()> {
    const MAX_PARTS: usize = 4;
    debug_assert!(parts.len() <= MAX_PARTS);

    let mut start = 0;
    let mut use_vectored = true;

    while start < parts.len() {
        if parts[start].is_empty() {
            start += 1;
            continue;
        }

        let written = if use_vectored {
            let mut slices = [IoSlice::new(&[]); MAX_PARTS];
            let mut count = 0;
            for part in &parts[start..] {
                if !part.is_empty() {
                    slices[count] = IoSlice::new(part);
                    count += 1;
                }
            }

            match writer.write_vectored(&slices[..count]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write frame",
                    ));
                }
                Ok(written) => written,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(ref err)
                    if err.kind() == io::ErrorKind::Unsupported
                        || err.kind() == io::ErrorKind::InvalidInput =>
                {
                    use_vectored = false;
                    continue;
                }
                Err(err) => return Err(err),
            }
        } else {
            match writer.write(parts[start]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write frame",
                    ));
                }
                Ok(written) => written,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };

        let mut remaining = written;
        while remaining > 0 && start < parts.len() {
            let part: &[u8] = parts[start];
            if remaining >= part.len() {
                remaining -= part.len();
                parts[start] = &[];
                start += 1;
            } else {
                parts[start] = &part[remaining..];
                remaining = 0;
            }
        }

        if remaining > 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("writer reported writing {remaining} more bytes than were provided"),
            ));
        }
    }

    Ok(())
}
