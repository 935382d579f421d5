//! Byte-size quantities with SI and binary multipliers.
//!
//! A [`Size`] is a magnitude-only unsigned 64-bit quantity. Its text grammar
//! is a decimal literal with an optional case-insensitive multiplier suffix:
//! `k M G T P` (powers of 1000) or `Ki Mi Gi Ti Pi` (powers of 1024).
//! Fractional results round to the nearest whole unit.
//!
//! ```rust
//! use stanza::Size;
//!
//! assert_eq!(Size::parse("42Ki"), Some(Size::new(43008)));
//! assert_eq!(Size::new(1234).to_scaled_binary_string(), "1.21Ki");
//! assert_eq!(Size::new(1500).to_kilo_string(), "1.5k");
//! ```

use std::fmt;

const SI_SUFFIXES: [&str; 6] = ["", "k", "M", "G", "T", "P"];
const BINARY_SUFFIXES: [&str; 6] = ["", "Ki", "Mi", "Gi", "Ti", "Pi"];

/// Default significant-digit count for scaled renderings.
const DEFAULT_DIGITS: usize = 3;

/// A magnitude-only byte quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size(u64);

impl Size {
    #[must_use]
    pub const fn new(bytes: u64) -> Self {
        Size(bytes)
    }

    /// Raw byte count.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.0
    }

    /// Parses `<decimal>[multiplier]`, multiplier case-insensitive.
    ///
    /// Returns `None` for malformed text or results outside `u64`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Size> {
        let text = text.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(text.len());
        let (number, suffix) = text.split_at(split);
        if number.is_empty() {
            return None;
        }

        let multiplier: u64 = match suffix.to_ascii_lowercase().as_str() {
            "" => 1,
            "k" => 1000,
            "m" => 1000_u64.pow(2),
            "g" => 1000_u64.pow(3),
            "t" => 1000_u64.pow(4),
            "p" => 1000_u64.pow(5),
            "ki" => 1024,
            "mi" => 1024_u64.pow(2),
            "gi" => 1024_u64.pow(3),
            "ti" => 1024_u64.pow(4),
            "pi" => 1024_u64.pow(5),
            _ => return None,
        };

        if let Ok(whole) = number.parse::<u64>() {
            return whole.checked_mul(multiplier).map(Size);
        }

        // fractional literal: multiply then round to the nearest whole unit
        let fractional: f64 = number.parse().ok()?;
        let scaled = (fractional * multiplier as f64).round();
        if !scaled.is_finite() || scaled < 0.0 || scaled > u64::MAX as f64 {
            return None;
        }
        Some(Size(scaled as u64))
    }

    /// Auto-scaled SI rendering (largest unit keeping the integer part in
    /// `[1, 1000)`), with the default three significant digits.
    #[must_use]
    pub fn to_scaled_si_string(&self) -> String {
        self.to_scaled_si_string_with_digits(DEFAULT_DIGITS)
    }

    #[must_use]
    pub fn to_scaled_si_string_with_digits(&self, digits: usize) -> String {
        scaled(self.0, 1000, &SI_SUFFIXES, digits)
    }

    /// Auto-scaled binary rendering (largest unit keeping the integer part in
    /// `[1, 1024)`), with the default three significant digits.
    #[must_use]
    pub fn to_scaled_binary_string(&self) -> String {
        self.to_scaled_binary_string_with_digits(DEFAULT_DIGITS)
    }

    #[must_use]
    pub fn to_scaled_binary_string_with_digits(&self, digits: usize) -> String {
        scaled(self.0, 1024, &BINARY_SUFFIXES, digits)
    }
}

macro_rules! fixed_unit_strings {
    ($($fn_name:ident => $divisor:expr, $suffix:expr;)*) => {$(
        #[doc = concat!("Fixed-unit rendering in `", $suffix, "` with three significant digits.")]
        #[must_use]
        pub fn $fn_name(&self) -> String {
            fixed(self.0, $divisor, $suffix, DEFAULT_DIGITS)
        }
    )*};
}

impl Size {
    fixed_unit_strings! {
        to_kilo_string => 1000_u64.pow(1), "k";
        to_mega_string => 1000_u64.pow(2), "M";
        to_giga_string => 1000_u64.pow(3), "G";
        to_tera_string => 1000_u64.pow(4), "T";
        to_peta_string => 1000_u64.pow(5), "P";
        to_kibi_string => 1024_u64.pow(1), "Ki";
        to_mebi_string => 1024_u64.pow(2), "Mi";
        to_gibi_string => 1024_u64.pow(3), "Gi";
        to_tebi_string => 1024_u64.pow(4), "Ti";
        to_pebi_string => 1024_u64.pow(5), "Pi";
    }
}

fn scaled(bytes: u64, base: u64, suffixes: &[&str; 6], digits: usize) -> String {
    let base = base as f64;
    let mut value = bytes as f64;
    let mut index = 0;
    while value >= base && index + 1 < suffixes.len() {
        value /= base;
        index += 1;
    }
    // rounding at `digits` significant digits can carry the mantissa up to
    // the base itself, which forces the next unit
    value = round_significant(value, digits);
    if value >= base && index + 1 < suffixes.len() {
        value /= base;
        index += 1;
    }
    format!("{}{}", significant(value, digits), suffixes[index])
}

fn fixed(bytes: u64, divisor: u64, suffix: &str, digits: usize) -> String {
    format!("{}{}", significant(bytes as f64 / divisor as f64, digits), suffix)
}

fn integer_digits(value: f64) -> usize {
    if value.abs() < 1.0 {
        1
    } else {
        value.abs().log10().floor() as usize + 1
    }
}

/// Rounds to `digits` significant digits.
fn round_significant(value: f64, digits: usize) -> f64 {
    let decimals = digits.saturating_sub(integer_digits(value));
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Formats with `digits` significant digits, trailing zeros trimmed.
fn significant(value: f64, digits: usize) -> String {
    let decimals = digits.saturating_sub(integer_digits(value));
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

impl From<u64> for Size {
    fn from(bytes: u64) -> Self {
        Size(bytes)
    }
}

impl From<Size> for u64 {
    fn from(size: Size) -> Self {
        size.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binary_multipliers() {
        assert_eq!(Size::parse("42Ki"), Some(Size::new(43008)));
        assert_eq!(Size::parse("1Mi"), Some(Size::new(1_048_576)));
        assert_eq!(Size::parse("2Gi"), Some(Size::new(2 * 1024_u64.pow(3))));
    }

    #[test]
    fn test_parse_si_multipliers_case_insensitive() {
        assert_eq!(Size::parse("5k"), Some(Size::new(5000)));
        assert_eq!(Size::parse("5K"), Some(Size::new(5000)));
        assert_eq!(Size::parse("3M"), Some(Size::new(3_000_000)));
        assert_eq!(Size::parse("3m"), Some(Size::new(3_000_000)));
        assert_eq!(Size::parse("1p"), Some(Size::new(1000_u64.pow(5))));
        assert_eq!(Size::parse("7ki"), Some(Size::new(7168)));
        assert_eq!(Size::parse("7KI"), Some(Size::new(7168)));
    }

    #[test]
    fn test_parse_fractional_rounds_to_nearest() {
        assert_eq!(Size::parse("1.5k"), Some(Size::new(1500)));
        assert_eq!(Size::parse("1.5Ki"), Some(Size::new(1536)));
        assert_eq!(Size::parse("0.1k"), Some(Size::new(100)));
        assert_eq!(Size::parse("2.5"), Some(Size::new(3)));
    }

    #[test]
    fn test_parse_rejects_garbage_and_overflow() {
        assert_eq!(Size::parse(""), None);
        assert_eq!(Size::parse("k"), None);
        assert_eq!(Size::parse("12x"), None);
        assert_eq!(Size::parse("-5k"), None);
        assert_eq!(Size::parse("99999999999999999999P"), None);
    }

    #[test]
    fn test_scaled_binary_default_digits() {
        assert_eq!(Size::new(1234).to_scaled_binary_string(), "1.21Ki");
        assert_eq!(Size::new(999).to_scaled_binary_string(), "999");
        assert_eq!(Size::new(1024).to_scaled_binary_string(), "1Ki");
        assert_eq!(
            Size::new(5 * 1024_u64.pow(2) + 300 * 1024).to_scaled_binary_string(),
            "5.29Mi"
        );
        // mantissa rounds up to the base and rolls over to the next unit
        assert_eq!(Size::new(1_048_575).to_scaled_binary_string(), "1Mi");
    }

    #[test]
    fn test_scaled_si() {
        assert_eq!(Size::new(1234).to_scaled_si_string(), "1.23k");
        assert_eq!(Size::new(999).to_scaled_si_string(), "999");
        assert_eq!(Size::new(1_000_000).to_scaled_si_string(), "1M");
        assert_eq!(Size::new(999_999).to_scaled_si_string(), "1M");
        assert_eq!(Size::new(1234).to_scaled_si_string_with_digits(4), "1.234k");
    }

    #[test]
    fn test_fixed_unit_strings() {
        assert_eq!(Size::new(43008).to_kibi_string(), "42Ki");
        assert_eq!(Size::new(1500).to_kilo_string(), "1.5k");
        assert_eq!(Size::new(1_048_576).to_mebi_string(), "1Mi");
        assert_eq!(Size::new(2_500_000_000).to_giga_string(), "2.5G");
    }
}
