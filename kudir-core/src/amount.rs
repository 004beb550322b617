//! Locale-tolerant parsing of monetary cells.
//!
//! KUDiR exports write amounts the Russian way: decimal comma, spaces (or
//! non-breaking spaces) as thousand separators. `parse_amount` normalizes
//! that into an `f64`; callers decide what to do with a failure — the
//! aggregation paths default unparseable amounts to 0.0 without dropping
//! the record.

use crate::error::{KudirError, Result};

/// Parse a locale-formatted amount string.
///
/// The decimal comma is rewritten to a point BEFORE separator spaces are
/// stripped: `"1 234,56"` parses to `1234.56`, `"1,234 567"` to
/// `1.234567`.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(KudirError::BadAmount(raw.to_string()));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| KudirError::BadAmount(raw.to_string()))
}

/// Round to 2 decimal places (kopeck precision) for reported totals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma_and_thousand_spaces() {
        assert_eq!(parse_amount("1 234,56").unwrap(), 1234.56);
    }

    #[test]
    fn comma_rewritten_before_space_strip() {
        // The comma becomes the decimal point, then the space is dropped.
        let parsed = parse_amount("1,234 567").unwrap();
        assert!((parsed - 1.234567).abs() < 1e-12);
    }

    #[test]
    fn plain_and_negative_values() {
        assert_eq!(parse_amount("100.5").unwrap(), 100.5);
        assert_eq!(parse_amount("-15,00").unwrap(), -15.0);
    }

    #[test]
    fn non_breaking_space_separator() {
        assert_eq!(parse_amount("12\u{a0}500,00").unwrap(), 12500.0);
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("  ").is_err());
        assert!(parse_amount("оплата").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    #[test]
    fn rounding_to_kopecks() {
        assert_eq!(round2(150.004999), 150.0);
        assert_eq!(round2(99.999), 100.0);
        assert_eq!(round2(-0.005001), -0.01);
    }
}
