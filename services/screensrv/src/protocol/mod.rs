//! Sensor wire protocol
//!
//! HDLC-style byte-stuffed frames protected by CRC-16/MCRF4XX.

pub mod constants;
pub mod crc;
pub mod decoder;
pub mod encoder;

pub use constants::{DEFAULT_BAUD_RATE, ESCAPE, FLAG, MAX_FRAME_LEN};
pub use decoder::{FrameDecoder, FrameError, FrameResult};
pub use encoder::{encode_frame, encode_reading};
