//! Payload parsing and range normalization
//!
//! A validated payload holds the raw sensor count as ASCII decimal digits.
//! The count is mapped linearly onto `[minPosition, maxPosition] -> [0, 100]`
//! and rounded to two decimals. Counts outside the configured range are passed
//! through, so the percentage may fall outside `[0, 100]`.

use thiserror::Error;

use crate::config::LinkConfig;

/// Payload that passed the CRC but does not hold a number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Payload is not valid UTF-8: {0:02x?}")]
    NotUtf8(Vec<u8>),

    #[error("Payload '{0}' is not an integer")]
    NotInteger(String),
}

/// One sensor sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedReading {
    /// Raw sensor count
    pub raw: i64,
    /// Position in percent of the configured range, two decimals
    pub percentage: f64,
}

impl DecodedReading {
    /// Parse a payload and normalize it against `config`
    pub fn from_payload(payload: &[u8], config: &LinkConfig) -> Result<Self, ParseError> {
        let raw = parse_raw(payload)?;
        Ok(Self {
            raw,
            percentage: normalize(raw, config.min_position, config.max_position),
        })
    }
}

/// Parse the ASCII decimal payload; surrounding whitespace is tolerated
pub fn parse_raw(payload: &[u8]) -> Result<i64, ParseError> {
    let text = std::str::from_utf8(payload).map_err(|_| ParseError::NotUtf8(payload.to_vec()))?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::NotInteger(text.to_string()))
}

/// `round((raw - min) * 100 / (max - min), 2)` without clamping
///
/// Computed in `f64`: any `i64` count can arrive in a frame with a valid CRC,
/// and integer subtraction would overflow at the extremes. Callers guarantee
/// `max > min` (checked when the configuration is loaded).
pub fn normalize(raw: i64, min: i64, max: i64) -> f64 {
    let delta = max as f64 - min as f64;
    round2((raw as f64 - min as f64) * 100.0 / delta)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    fn config(min: i64, max: i64) -> LinkConfig {
        LinkConfig {
            min_position: min,
            max_position: max,
            ..LinkConfig::default()
        }
    }

    #[test]
    fn test_normalize_reference_points() {
        assert_eq!(normalize(1340, 0, 2680), 50.0);
        assert_eq!(normalize(0, 0, 2680), 0.0);
        assert_eq!(normalize(2680, 0, 2680), 100.0);
    }

    #[test]
    fn test_normalize_rounds_to_two_decimals() {
        // 1000 / 2680 * 100 = 37.3134...
        assert_eq!(normalize(1000, 0, 2680), 37.31);
        // 1 / 3 * 100 = 33.333...
        assert_eq!(normalize(1, 0, 3), 33.33);
        assert_eq!(normalize(2, 0, 3), 66.67);
    }

    #[test]
    fn test_normalize_with_offset_range() {
        assert_eq!(normalize(150, 100, 300), 25.0);
        assert_eq!(normalize(300, 100, 300), 100.0);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        assert_eq!(normalize(2948, 0, 2680), 110.0);
        assert_eq!(normalize(-268, 0, 2680), -10.0);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let config = config(120, 3000);
        for payload in [&b"-9223372036854775808"[..], &b"9223372036854775807"[..]] {
            let reading = DecodedReading::from_payload(payload, &config).unwrap();
            assert!(reading.percentage.is_finite(), "{:?}", reading);
        }

        let low = DecodedReading::from_payload(b"-9223372036854775808", &config).unwrap();
        assert_eq!(low.raw, i64::MIN);
        assert!(low.percentage < 0.0);
        assert!(normalize(i64::MAX, -5, 3000) > 100.0);
    }

    #[test]
    fn test_full_i64_range() {
        assert_eq!(normalize(0, i64::MIN, i64::MAX), 50.0);
        assert_eq!(normalize(i64::MIN, i64::MIN, i64::MAX), 0.0);
    }

    #[test]
    fn test_parse_raw() {
        assert_eq!(parse_raw(b"1340").unwrap(), 1340);
        assert_eq!(parse_raw(b"0007").unwrap(), 7);
        assert_eq!(parse_raw(b"-12").unwrap(), -12);
        assert_eq!(parse_raw(b" 42\r").unwrap(), 42);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            parse_raw(b"12a4"),
            Err(ParseError::NotInteger("12a4".to_string()))
        );
        assert_eq!(parse_raw(b""), Err(ParseError::NotInteger(String::new())));
        assert!(matches!(
            parse_raw(&[0xFF, 0xFE]),
            Err(ParseError::NotUtf8(_))
        ));
    }

    #[test]
    fn test_from_payload() {
        let reading = DecodedReading::from_payload(b"1340", &config(0, 2680)).unwrap();
        assert_eq!(reading.raw, 1340);
        assert_eq!(reading.percentage, 50.0);
    }
}
