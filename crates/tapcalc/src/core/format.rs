//! Number <-> display string conversion
//!
//! Display strings carry grouped integer digits and a bounded fraction:
//! `1234567.891` shows as `1,234,567.891`, `0.123456` as `0.1235`.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Display formatting rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Integer digits always shown (`.85` shows as `0.85`)
    pub min_integer_digits: usize,
    /// Integer digits kept; higher digits are dropped
    pub max_integer_digits: usize,
    /// Fractional digits kept after rounding
    pub max_fraction_digits: usize,
    /// Decimal separator
    pub decimal_separator: char,
    /// Grouping separator between integer digit runs
    pub grouping_separator: char,
    /// Digits per group
    pub grouping_size: usize,
    /// Whether integer digits are grouped at all
    pub uses_grouping: bool,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            min_integer_digits: 1,
            max_integer_digits: 11,
            max_fraction_digits: 4,
            decimal_separator: '.',
            grouping_separator: ',',
            grouping_size: 3,
            uses_grouping: true,
        }
    }
}

impl DisplayFormat {
    /// Set maximum fractional digits
    #[must_use]
    pub const fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Set maximum integer digits
    #[must_use]
    pub const fn with_max_integer_digits(mut self, digits: usize) -> Self {
        self.max_integer_digits = digits;
        self
    }

    /// Set decimal and grouping separators
    #[must_use]
    pub const fn with_separators(mut self, decimal: char, grouping: char) -> Self {
        self.decimal_separator = decimal;
        self.grouping_separator = grouping;
        self
    }

    /// Enable or disable digit grouping
    #[must_use]
    pub const fn with_grouping(mut self, uses_grouping: bool) -> Self {
        self.uses_grouping = uses_grouping;
        self
    }
}

/// Converts between numbers and display strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    format: DisplayFormat,
}

impl Formatter {
    /// Creates a formatter with the default display rules
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with custom rules
    #[must_use]
    pub const fn with_format(format: DisplayFormat) -> Self {
        Self { format }
    }

    /// Returns the formatting rules
    #[must_use]
    pub const fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Renders a number for the display.
    ///
    /// The shortest decimal form of the value is rounded half-to-even to
    /// `max_fraction_digits` and trailing zeros are trimmed. Integer digits
    /// beyond `max_integer_digits` are dropped from the high end, so callers
    /// check the magnitude first. Negative values keep their sign even when
    /// they round to zero, so `-0.0` shows as `-0`.
    pub fn format_number(&self, value: f64) -> CalcResult<String> {
        if !value.is_finite() {
            return Err(CalcError::Unformattable(value));
        }

        let fmt = &self.format;
        let (int_part, frac_part) = round_half_even(value.abs(), fmt.max_fraction_digits);
        let frac = frac_part.trim_end_matches('0');

        let int_digits = int_part.trim_start_matches('0');
        let int_digits = if int_digits.len() > fmt.max_integer_digits {
            int_digits[int_digits.len() - fmt.max_integer_digits..].trim_start_matches('0')
        } else {
            int_digits
        };

        let mut out = String::with_capacity(int_part.len() + frac.len() + 8);
        if value.is_sign_negative() {
            out.push('-');
        }

        let padding = fmt.min_integer_digits.saturating_sub(int_digits.len());
        let padded = format!("{}{int_digits}", "0".repeat(padding));
        out.push_str(&self.group(&padded));

        if !frac.is_empty() {
            out.push(fmt.decimal_separator);
            out.push_str(frac);
        }
        Ok(out)
    }

    /// Reads a display string back as a number.
    ///
    /// Grouping separators are ignored; a trailing decimal separator (`"12."`)
    /// is accepted.
    pub fn parse_display(&self, text: &str) -> CalcResult<f64> {
        let normalized = self.strip_grouping(text.trim());
        if !is_plain_decimal(&normalized) {
            return Err(CalcError::Unparseable(text.to_string()));
        }
        normalized
            .parse::<f64>()
            .map_err(|_| CalcError::Unparseable(text.to_string()))
    }

    /// Removes grouping separators and normalizes the decimal separator to `.`
    #[must_use]
    pub fn strip_grouping(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| c != self.format.grouping_separator)
            .map(|c| if c == self.format.decimal_separator { '.' } else { c })
            .collect()
    }

    /// Returns true if the text contains the decimal separator
    #[must_use]
    pub fn has_decimal_separator(&self, text: &str) -> bool {
        text.contains(self.format.decimal_separator)
    }

    fn group(&self, digits: &str) -> String {
        let size = self.format.grouping_size;
        if !self.format.uses_grouping || size == 0 || digits.len() <= size {
            return digits.to_string();
        }

        let mut out = String::with_capacity(digits.len() + digits.len() / size);
        let lead = digits.len() % size;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + size - lead) % size == 0 {
                out.push(self.format.grouping_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Rounds the shortest round-trip decimal form of a non-negative finite
/// value to `digits` fractional digits, ties to even.
///
/// Returns the integer and fraction digit strings.
fn round_half_even(value: f64, digits: usize) -> (String, String) {
    // f64 Display never uses exponent notation
    let text = value.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
    if frac_part.len() <= digits {
        return (int_part.to_string(), frac_part.to_string());
    }

    let (kept, dropped) = frac_part.split_at(digits);
    let mut mantissa: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();

    let first = dropped.as_bytes()[0];
    let above_half = dropped.bytes().skip(1).any(|b| b != b'0');
    let last_is_odd = mantissa.last().is_some_and(|b| (b - b'0') % 2 == 1);
    if first > b'5' || (first == b'5' && (above_half || last_is_odd)) {
        let mut carry = true;
        for digit in mantissa.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            mantissa.insert(0, b'1');
        }
    }

    let split = mantissa.len() - digits;
    let int_digits = mantissa[..split].iter().copied().map(char::from).collect();
    let frac_digits = mantissa[split..].iter().copied().map(char::from).collect();
    (int_digits, frac_digits)
}

/// `-?digits(.digits?)?` or `-?.digits`, with at least one digit
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && all_digits(frac_part) && (!int_part.is_empty() || !frac_part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64) -> String {
        Formatter::new().format_number(value).unwrap()
    }

    fn parse(text: &str) -> CalcResult<f64> {
        Formatter::new().parse_display(text)
    }

    // ===== format_number =====

    #[test]
    fn test_format_integers() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(7.0), "7");
        assert_eq!(fmt(999.0), "999");
        assert_eq!(fmt(1000.0), "1,000");
        assert_eq!(fmt(15_927_312.0), "15,927,312");
        assert_eq!(fmt(99_999_999_999.0), "99,999,999,999");
    }

    #[test]
    fn test_format_fraction_trims_zeros() {
        assert_eq!(fmt(7.5), "7.5");
        assert_eq!(fmt(3.1415), "3.1415");
        assert_eq!(fmt(15_927_312.22), "15,927,312.22");
    }

    #[test]
    fn test_format_leading_zero() {
        assert_eq!(fmt(0.85), "0.85");
        assert_eq!(fmt(-0.05), "-0.05");
    }

    #[test]
    fn test_format_rounds_to_four_digits() {
        assert_eq!(fmt(0.123_456), "0.1235");
        assert_eq!(fmt(2.0 / 3.0), "0.6667");
        assert_eq!(fmt(1.999_99), "2");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(fmt(-1234.5), "-1,234.5");
        assert_eq!(fmt(-8.0), "-8");
    }

    #[test]
    fn test_format_rounds_ties_to_even() {
        assert_eq!(fmt(0.123_45), "0.1234");
        assert_eq!(fmt(0.123_55), "0.1236");
        assert_eq!(fmt(1.000_05), "1");
        assert_eq!(fmt(2.000_05), "2");
        assert_eq!(fmt(0.001_25), "0.0012");
        assert_eq!(fmt(0.000_15), "0.0002");
        assert_eq!(fmt(0.123_450_1), "0.1235");
    }

    #[test]
    fn test_format_rounding_carries_into_integer() {
        assert_eq!(fmt(9.999_95), "10");
        assert_eq!(fmt(999.999_99), "1,000");
        let f = Formatter::with_format(DisplayFormat::default().with_max_fraction_digits(0));
        assert_eq!(f.format_number(2.5).unwrap(), "2");
        assert_eq!(f.format_number(3.5).unwrap(), "4");
    }

    #[test]
    fn test_format_keeps_negative_zero_sign() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(-0.0), "-0");
        assert_eq!(fmt(-0.000_01), "-0");
    }

    #[test]
    fn test_format_drops_high_integer_digits() {
        assert_eq!(fmt(123_456_789_012.0), "23,456,789,012");
        assert_eq!(fmt(100_000_000_005.0), "5");
    }

    #[test]
    fn test_format_rejects_non_finite() {
        let f = Formatter::new();
        assert!(matches!(
            f.format_number(f64::INFINITY),
            Err(CalcError::Unformattable(_))
        ));
        assert!(f.format_number(f64::NAN).is_err());
    }

    #[test]
    fn test_format_custom_separators() {
        let f = Formatter::with_format(DisplayFormat::default().with_separators(',', '.'));
        assert_eq!(f.format_number(1234.5).unwrap(), "1.234,5");
        assert_eq!(f.parse_display("1.234,5").unwrap(), 1234.5);
    }

    #[test]
    fn test_format_without_grouping() {
        let f = Formatter::with_format(DisplayFormat::default().with_grouping(false));
        assert_eq!(f.format_number(1_234_567.0).unwrap(), "1234567");
    }

    #[test]
    fn test_format_custom_precision() {
        let f = Formatter::with_format(DisplayFormat::default().with_max_fraction_digits(2));
        assert_eq!(f.format_number(3.14159).unwrap(), "3.14");
    }

    // ===== parse_display =====

    #[test]
    fn test_parse_grouped() {
        assert_eq!(parse("1,234,567.89"), Ok(1_234_567.89));
        assert_eq!(parse("-1,000"), Ok(-1000.0));
    }

    #[test]
    fn test_parse_trailing_decimal() {
        assert_eq!(parse("0."), Ok(0.0));
        assert_eq!(parse("12."), Ok(12.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse("Error (∞)"), Err(CalcError::Unparseable(_))));
        assert!(parse("").is_err());
        assert!(parse(".").is_err());
        assert!(parse("1.2.3").is_err());
        assert!(parse("inf").is_err());
        assert!(parse("1e5").is_err());
    }

    #[test]
    fn test_strip_grouping() {
        let f = Formatter::new();
        assert_eq!(f.strip_grouping("99,999,999,999"), "99999999999");
    }

    #[test]
    fn test_has_decimal_separator() {
        let f = Formatter::new();
        assert!(f.has_decimal_separator("1,234."));
        assert!(!f.has_decimal_separator("1,234"));
    }
}
