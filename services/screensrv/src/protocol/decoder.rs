//! Incremental frame decoder
//!
//! Turns the raw serial byte stream into validated payloads. The decoder is a
//! pure state machine: bytes go in through [`FrameDecoder::feed`], frame
//! outcomes come out, and a frame that is still incomplete when a read ends is
//! kept for the next call.
//!
//! ```text
//! 0x7E | payload ... | sentinel | crc_lo | crc_hi | 0x7E
//! ```
//!
//! Bytes equal to the flag or the escape inside the frame are sent as
//! `0x7D, byte ^ 0x20`.

use bytes::Bytes;
use thiserror::Error;

use super::constants::{ESCAPE, ESCAPE_XOR, FLAG, MAX_FRAME_LEN};
use super::crc::frame_crc;

/// Recoverable frame-level failures. The decoder resynchronizes by itself
/// after either of them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Checksum carried by the frame differs from the one computed over its body
    #[error("CRC mismatch: frame carries {received:04x}, computed {computed:04x}")]
    CrcMismatch { received: u16, computed: u16 },

    /// No closing flag within the frame length limit
    #[error("Frame exceeded {max} bytes without a closing flag")]
    FrameTooLong { max: usize },
}

/// Outcome of one terminated (or abandoned) frame
pub type FrameResult = std::result::Result<Bytes, FrameError>;

/// Bytes of the frame being assembled
#[derive(Debug, Default)]
struct FrameBuffer {
    bytes: Vec<u8>,
    escape_pending: bool,
}

impl FrameBuffer {
    fn clear(&mut self) {
        self.bytes.clear();
        self.escape_pending = false;
    }
}

/// Stateful decoder for the sensor byte stream
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: FrameBuffer,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buffer: FrameBuffer {
                bytes: Vec::with_capacity(MAX_FRAME_LEN + 1),
                escape_pending: false,
            },
        }
    }

    /// Feed a chunk of raw bytes, returning every frame outcome it completes
    pub fn feed(&mut self, input: &[u8]) -> Vec<FrameResult> {
        input.iter().filter_map(|&byte| self.push(byte)).collect()
    }

    /// Process a single byte
    pub fn push(&mut self, byte: u8) -> Option<FrameResult> {
        let buffer = &mut self.buffer;

        // Hunting for a start flag; anything else is line noise
        if buffer.bytes.is_empty() {
            if byte == FLAG {
                buffer.bytes.push(byte);
            }
            return None;
        }

        if buffer.escape_pending {
            buffer.escape_pending = false;
            buffer.bytes.push(byte ^ ESCAPE_XOR);
            return self.check_length();
        }

        match byte {
            ESCAPE => {
                buffer.escape_pending = true;
                None
            },
            // Repeated opening flag (idle fill between frames)
            FLAG if buffer.bytes.len() == 1 => None,
            FLAG => {
                buffer.bytes.push(byte);
                let result = Self::finish(&buffer.bytes);
                buffer.clear();
                Some(result)
            },
            _ => {
                buffer.bytes.push(byte);
                self.check_length()
            },
        }
    }

    /// Drop any partially assembled frame
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// True when no frame is being assembled
    pub fn is_idle(&self) -> bool {
        self.buffer.bytes.is_empty()
    }

    /// Number of bytes held for the frame being assembled
    pub fn buffered_len(&self) -> usize {
        self.buffer.bytes.len()
    }

    fn check_length(&mut self) -> Option<FrameResult> {
        if self.buffer.bytes.len() > MAX_FRAME_LEN {
            self.buffer.clear();
            return Some(Err(FrameError::FrameTooLong { max: MAX_FRAME_LEN }));
        }
        None
    }

    /// Validate a complete frame, flags included.
    ///
    /// The body is `frame[1..len-3]`; the checksum sits at `len-3` (low) and
    /// `len-2` (high). A frame too short to hold a body yields an empty body,
    /// which can only pass if the carried checksum happens to be 0xFFFF.
    fn finish(frame: &[u8]) -> FrameResult {
        let len = frame.len();
        let received = u16::from_le_bytes([frame[len - 3], frame[len - 2]]);
        let data = frame.get(1..len - 3).unwrap_or(&[]);
        let computed = frame_crc(data);

        if received != computed {
            return Err(FrameError::CrcMismatch { received, computed });
        }

        // Last body byte is the sentinel
        let payload = &data[..data.len().saturating_sub(1)];
        Ok(Bytes::copy_from_slice(payload))
    }
}
