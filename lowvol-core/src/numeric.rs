//! Lenient integer parsing for report fields
//!
//! Report rows carry their numeric metrics as strings. Parsing follows the
//! usual report-scripting behavior:
//! - leading whitespace is skipped (including a byte-order mark)
//! - an optional `+` or `-` sign is accepted
//! - digits are consumed until the first non-digit, the rest is ignored
//! - input without a leading digit is not a number
//!
//! Global invariants enforced:
//! - Parsing never fails; unparsable input becomes `ParsedInt::NotANumber`
//! - Parsed values are exact at any length; ordering never loses precision
//! - Any comparison involving `NotANumber` is false

use std::cmp::Ordering;
use std::fmt;

/// Exact decimal integer of arbitrary length
///
/// Stored as a sign and a magnitude without leading zeros, so derived
/// equality is numeric equality. Zero is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    negative: bool,
    magnitude: String,
}

impl Integer {
    fn from_digits(negative: bool, digits: &str) -> Self {
        let magnitude = digits.trim_start_matches('0');
        if magnitude.is_empty() {
            Self {
                negative: false,
                magnitude: "0".to_string(),
            }
        } else {
            Self {
                negative,
                magnitude: magnitude.to_string(),
            }
        }
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.magnitude
            .len()
            .cmp(&other.magnitude.len())
            .then_with(|| self.magnitude.cmp(&other.magnitude))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::from_digits(value < 0, &value.unsigned_abs().to_string())
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.magnitude)
    }
}

/// Result of parsing a numeric report field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInt {
    Value(Integer),
    NotANumber,
}

impl ParsedInt {
    pub fn is_nan(&self) -> bool {
        matches!(self, ParsedInt::NotANumber)
    }

    /// Strict less-than; false whenever either side is not a number
    pub fn less_than(&self, other: &ParsedInt) -> bool {
        match (self, other) {
            (ParsedInt::Value(a), ParsedInt::Value(b)) => a < b,
            _ => false,
        }
    }
}

impl From<i64> for ParsedInt {
    fn from(value: i64) -> Self {
        ParsedInt::Value(value.into())
    }
}

impl fmt::Display for ParsedInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedInt::Value(v) => write!(f, "{}", v),
            ParsedInt::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Whitespace skipped before a number: Unicode space separators, tab,
/// vertical tab, form feed, line terminators and the byte-order mark.
/// NEL (U+0085) is not included.
fn is_leading_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Parse a decimal integer prefix out of `input`
pub fn parse_int(input: &str) -> ParsedInt {
    let trimmed = input.trim_start_matches(is_leading_space);

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());

    if end == 0 {
        ParsedInt::NotANumber
    } else {
        ParsedInt::Value(Integer::from_digits(negative, &rest[..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(input: &str) -> Integer {
        match parse_int(input) {
            ParsedInt::Value(v) => v,
            ParsedInt::NotANumber => panic!("{:?} should parse", input),
        }
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_int("10"), ParsedInt::from(10));
        assert_eq!(parse_int("0"), ParsedInt::from(0));
    }

    #[test]
    fn test_leading_whitespace_and_sign() {
        assert_eq!(parse_int("  42"), ParsedInt::from(42));
        assert_eq!(parse_int("\t-7"), ParsedInt::from(-7));
        assert_eq!(parse_int("+15"), ParsedInt::from(15));
        assert_eq!(parse_int("\u{00A0}\u{3000}8"), ParsedInt::from(8));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        assert_eq!(parse_int("\u{FEFF}3"), ParsedInt::from(3));
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert_eq!(parse_int("\u{0085}3"), ParsedInt::NotANumber);
    }

    #[test]
    fn test_trailing_garbage_truncates() {
        assert_eq!(parse_int(" 42px"), ParsedInt::from(42));
        assert_eq!(parse_int("3.9"), ParsedInt::from(3));
        assert_eq!(parse_int("12 34"), ParsedInt::from(12));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(parse_int("abc"), ParsedInt::NotANumber);
        assert_eq!(parse_int(""), ParsedInt::NotANumber);
        assert_eq!(parse_int("   "), ParsedInt::NotANumber);
        assert_eq!(parse_int("-"), ParsedInt::NotANumber);
        assert_eq!(parse_int("- 5"), ParsedInt::NotANumber);
    }

    #[test]
    fn test_hex_prefix_is_not_special() {
        assert_eq!(parse_int("0x1A"), ParsedInt::from(0));
    }

    #[test]
    fn test_leading_zeros_and_negative_zero() {
        assert_eq!(parse_int("007"), ParsedInt::from(7));
        assert_eq!(parse_int("-000"), ParsedInt::from(0));
        assert_eq!(parse_int("-0").to_string(), "0");
    }

    #[test]
    fn test_values_beyond_i64_stay_ordered() {
        let small = int("10000000000000000000");
        let large = int("20000000000000000000");
        assert!(small < large);
        assert_ne!(small, large);

        assert!(int("-20000000000000000000") < int("-10000000000000000000"));
        assert!(int("-99999999999999999999") < int("1"));
        assert!(int("99999999999999999999") < int("100000000000000000000"));
        assert_eq!(large.to_string(), "20000000000000000000");
    }

    #[test]
    fn test_ordering_matches_i64() {
        let values = [-1000, -11, -2, -1, 0, 1, 2, 11, 1000, i64::MIN, i64::MAX];
        for a in values {
            for b in values {
                assert_eq!(
                    Integer::from(a).cmp(&Integer::from(b)),
                    a.cmp(&b),
                    "{} vs {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_nan_comparisons_are_false() {
        let nan = ParsedInt::NotANumber;
        let ten = ParsedInt::from(10);
        assert!(!nan.less_than(&ten));
        assert!(!ten.less_than(&nan));
        assert!(!nan.less_than(&nan));
        assert!(ParsedInt::from(3).less_than(&ten));
        assert!(!ten.less_than(&ten));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParsedInt::from(-3).to_string(), "-3");
        assert_eq!(ParsedInt::NotANumber.to_string(), "NaN");
    }
}
