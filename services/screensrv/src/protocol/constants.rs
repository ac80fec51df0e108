//! Framing constants of the position sensor link

/// Frame delimiter, opens and closes every frame
pub const FLAG: u8 = 0x7E;

/// Escape marker; the byte after it was XOR-ed with [`ESCAPE_XOR`]
pub const ESCAPE: u8 = 0x7D;

/// Mask applied to stuffed bytes
pub const ESCAPE_XOR: u8 = 0x20;

/// Most bytes a frame may accumulate before a closing flag must appear
pub const MAX_FRAME_LEN: usize = 32;

/// Sensor line speed (8N1)
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Trailing byte appended by the sensor after the digits.
/// The decoder drops it without looking at it.
pub const DEFAULT_SENTINEL: u8 = b';';

/// Frame overhead around the payload: two flags, sentinel, two CRC bytes
pub const FRAME_OVERHEAD: usize = 5;
