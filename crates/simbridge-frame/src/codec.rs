use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: 4-byte big-endian unsigned payload length.
pub const HEADER_SIZE: usize = 4;

/// The device's keep-alive marker. Must never cross the outbound channel.
pub const SENTINEL: &[u8] = b"wait";

/// Encode a message into the wire format.
///
/// Wire format:
/// ```text
/// ┌─────────────────┬──────────────────┐
/// │ Length (4B BE)  │ Payload           │
/// │                 │ (Length bytes)    │
/// └─────────────────┴──────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one message from a buffer.
///
/// Returns `None` until the buffer holds the complete prefix and payload.
/// On success, consumes the frame bytes from the buffer. A buffer ending
/// mid-frame is never a message; deciding what a short stream means belongs
/// to the caller.
pub fn decode_frame(src: &mut BytesMut) -> Option<Bytes> {
    if src.len() < HEADER_SIZE {
        return None;
    }

    let length = u32::from_be_bytes(src[..HEADER_SIZE].try_into().unwrap()) as usize;
    if src.len() - HEADER_SIZE < length {
        return None;
    }

    src.advance(HEADER_SIZE);
    Some(src.split_to(length).freeze())
}
