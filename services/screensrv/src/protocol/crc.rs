//! CRC-16/MCRF4XX frame check
//!
//! Reflected polynomial 0x8408, init 0xFFFF, no final XOR. The sensor sends
//! the checksum low byte first.

use crc::{Crc, CRC_16_MCRF4XX};

const FRAME_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_MCRF4XX);

/// Checksum over the unstuffed frame body (payload and sentinel)
pub fn frame_crc(data: &[u8]) -> u16 {
    FRAME_CRC.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference implementation
    fn reference_crc(data: &[u8]) -> u16 {
        let mut crc: u16 = 0xFFFF;
        for byte in data {
            crc ^= u16::from(*byte);
            for _ in 0..8 {
                if crc & 0x0001 != 0 {
                    crc = (crc >> 1) ^ 0x8408;
                } else {
                    crc >>= 1;
                }
            }
        }
        crc
    }

    #[test]
    fn test_check_value() {
        assert_eq!(frame_crc(b"123456789"), 0x6F91);
    }

    #[test]
    fn test_empty_input_is_init_value() {
        assert_eq!(frame_crc(&[]), 0xFFFF);
    }

    #[test]
    fn test_matches_reference() {
        let samples: [&[u8]; 4] = [b"1340;", b"0;", b"2680;", &[0x7E, 0x7D, 0x00, 0xFF]];
        for sample in samples {
            assert_eq!(frame_crc(sample), reference_crc(sample), "{:02X?}", sample);
        }
    }
}
