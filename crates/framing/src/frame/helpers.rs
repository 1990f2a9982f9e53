use std::collections::TryReserveError;
use std::io::{self, Read};

use crate::header::{FRAME_END, FrameError, FrameHeader, HEADER_LEN, MAX_PAYLOAD_LENGTH};

pub(super) fn map_frame_error(err: FrameError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

pub(super) fn map_frame_error_for_input(err: FrameError) -> io::Error {
    match err {
        FrameError::OversizedPayload(_) => io::Error::new(io::ErrorKind::InvalidInput, err),
        other => map_frame_error(other),
    }
}

pub(super) fn frame_sync_error(found: u8) -> io::Error {
    map_frame_error(FrameError::FrameSync { found })
}

pub(super) fn truncated_frame_error(expected: usize, actual: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("frame truncated: expected {expected} bytes but received {actual}"),
    )
}

pub(super) fn truncated_payload_error(expected: usize, actual: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("frame payload truncated: expected {expected} bytes but received {actual}"),
    )
}

pub(super) fn trailing_frame_data_error(trailing: usize) -> io::Error {
    let unit = if trailing == 1 { "byte" } else { "bytes" };
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("input slice contains {trailing} trailing {unit} after frame"),
    )
}

/// Validates that a payload length fits the 32-bit size field of the frame
/// header, returning the wire representation.
pub(super) fn ensure_payload_length(len: usize) -> io::Result<u32> {
    if len > MAX_PAYLOAD_LENGTH as usize {
        return Err(map_frame_error_for_input(FrameError::OversizedPayload(
            len as u64,
        )));
    }

    Ok(len as u32)
}

pub(super) fn map_allocation_error(err: TryReserveError) -> io::Error {
    io::Error::new(io::ErrorKind::OutOfMemory, err)
}

pub(super) fn reserve_payload(buffer: &mut Vec<u8>, len: usize) -> io::Result<()> {
    if buffer.capacity() < len {
        let additional = len - buffer.len();
        buffer
            .try_reserve_exact(additional)
            .map_err(map_allocation_error)?;
    }

    Ok(())
}

/// Reads exactly `len` payload bytes into `buffer`, reusing its capacity.
///
/// The buffer is cleared first and holds the bytes read so far when the
/// stream ends early, so callers can inspect partial payloads while the
/// returned error reports the shortfall.
pub(super) fn read_payload_into<R: Read>(
    reader: &mut R,
    buffer: &mut Vec<u8>,
    len: usize,
) -> io::Result<()> {
    buffer.clear();

    if len == 0 {
        return Ok(());
    }

    reserve_payload(buffer, len)?;
    buffer.resize(len, 0);

    let mut read_total = 0;
    while read_total < len {
        match reader.read(&mut buffer[read_total..]) {
            Ok(0) => {
                buffer.truncate(read_total);
                return Err(truncated_payload_error(len, read_total));
            }
            Ok(bytes_read) => read_total += bytes_read,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                buffer.truncate(read_total);
                if err.kind() == io::ErrorKind::UnexpectedEof {
                    return Err(truncated_payload_error(len, read_total));
                }
                return Err(err);
            }
        }
    }

    Ok(())
}

/// Splits one complete frame off the front of `bytes`.
///
/// Returns the decoded header, the payload region, and the remaining bytes
/// after the frame-end octet. The terminator is validated here so that no
/// slice-level decode path can silently continue past a desynchronized
/// stream.
pub(super) fn split_frame_parts(bytes: &[u8]) -> io::Result<(FrameHeader, &[u8], &[u8])> {
    if bytes.len() < HEADER_LEN {
        return Err(truncated_frame_error(HEADER_LEN, bytes.len()));
    }

    let header = FrameHeader::decode(&bytes[..HEADER_LEN]).map_err(map_frame_error)?;
    let frame_len = header.frame_len();

    if bytes.len() < frame_len {
        return Err(truncated_frame_error(frame_len, bytes.len()));
    }

    let terminator = bytes[frame_len - 1];
    if terminator != FRAME_END {
        return Err(frame_sync_error(terminator));
    }

    let payload = &bytes[HEADER_LEN..frame_len - 1];
    let remainder = &bytes[frame_len..];

    Ok((header, payload, remainder))
}
