//! Frame builder, the inverse of [`super::decoder::FrameDecoder`]
//!
//! The service never transmits to the sensor; frames built here feed the
//! mock link and the decoder tests.

use bytes::{BufMut, Bytes, BytesMut};

use super::constants::{DEFAULT_SENTINEL, ESCAPE, ESCAPE_XOR, FLAG, FRAME_OVERHEAD};
use super::crc::frame_crc;

/// Build a complete, stuffed frame around `payload`
///
/// The checksum covers `payload` followed by `sentinel` and is appended low
/// byte first before stuffing.
pub fn encode_frame(payload: &[u8], sentinel: u8) -> Bytes {
    let mut body = Vec::with_capacity(payload.len() + 3);
    body.extend_from_slice(payload);
    body.push(sentinel);
    let crc = frame_crc(&body);
    body.extend_from_slice(&crc.to_le_bytes());

    let mut out = BytesMut::with_capacity(body.len() * 2 + FRAME_OVERHEAD);
    out.put_u8(FLAG);
    for &byte in &body {
        if byte == FLAG || byte == ESCAPE {
            out.put_u8(ESCAPE);
            out.put_u8(byte ^ ESCAPE_XOR);
        } else {
            out.put_u8(byte);
        }
    }
    out.put_u8(FLAG);
    out.freeze()
}

/// Frame carrying a raw sensor count as ASCII decimal digits
pub fn encode_reading(raw: i64) -> Bytes {
    encode_frame(raw.to_string().as_bytes(), DEFAULT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let frame = encode_reading(1340);
        let crc = frame_crc(b"1340;").to_le_bytes();

        assert_eq!(frame[0], FLAG);
        assert_eq!(&frame[1..6], b"1340;");
        assert_eq!(&frame[6..8], &crc);
        assert_eq!(frame[frame.len() - 1], FLAG);
    }

    #[test]
    fn test_flag_and_escape_are_stuffed() {
        let frame = encode_frame(&[FLAG, ESCAPE], b';');
        assert_eq!(&frame[1..5], &[ESCAPE, 0x5E, ESCAPE, 0x5D]);
        // Only the outer flags remain unescaped
        assert_eq!(frame.iter().filter(|&&b| b == FLAG).count(), 2);
    }

    #[test]
    fn test_negative_reading() {
        let frame = encode_reading(-15);
        assert_eq!(&frame[1..5], b"-15;");
    }
}
