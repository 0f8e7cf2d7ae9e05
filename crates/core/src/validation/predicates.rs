//! Type-agnostic field checks shared by every rule set.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse form text as a number.
///
/// The whole trimmed text must be a plain decimal number: an optional sign,
/// digits and at most one point. `"3.5"` parses; `"3.5abc"`, `"1e1"` and
/// `"1_0"` do not.
#[must_use]
pub fn parse_number(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let plain = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    if !plain {
        return None;
    }
    Decimal::from_str(value).ok()
}

/// True if the value parses as a number under [`parse_number`].
#[must_use]
pub fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// Inclusive bounds check.
#[must_use]
pub fn in_range<T: PartialOrd>(number: T, lower: T, upper: T) -> bool {
    number >= lower && number <= upper
}

/// True if the text has at least `length` characters.
#[must_use]
pub fn min_length(text: &str, length: usize) -> bool {
    text.chars().count() >= length
}

/// True if every character is an ASCII letter or whitespace.
///
/// The empty string passes.
#[must_use]
pub fn letters_and_spaces_only(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}
