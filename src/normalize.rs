//! Text to number conversions for tariff table cells.
//!
//! None of these fail. Text without usable digits yields `0` (or `None` for
//! channel counts), and so does a digit run too long to fit the target type.
//! Any Unicode decimal digit counts, so `"５００"` reads as `500`.

use lazy_regex::regex;

/// Drops every non-digit character and parses what is left.
///
/// `"1 234 руб."` becomes `1234`, `"—"` becomes `0`.
pub fn clean_price(text: &str) -> u64 {
    let digits = regex!(r"\d")
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<String>();
    parse_digits(&digits).unwrap_or(0)
}

/// Reads the first digit run as kilobits per second and converts it to
/// megabits per second, truncating.
///
/// The source table is assumed to always report kbit/s, so a value already
/// given in Mbit/s comes out a thousand times too small.
pub fn clean_speed(text: &str) -> u64 {
    first_number(text).map(|kbps| kbps / 1000).unwrap_or(0)
}

/// Channel count from a plan label such as `"Базовый 120 каналов"`.
pub fn extract_channels(text: &str) -> Option<u32> {
    regex!(r"(\d+)\s*канал")
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_digits(m.as_str()))
        .and_then(|n| u32::try_from(n).ok())
}

/// First run of decimal digits, used as-is.
pub fn first_number(text: &str) -> Option<u64> {
    regex!(r"\d+")
        .find(text)
        .and_then(|m| parse_digits(m.as_str()))
}

/// Value of a string made only of decimal digits. `None` when empty, when a
/// char is not a digit, or on overflow.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(digit_value(c)?)
    })
}

/// Numeric value of a Unicode decimal digit (general category `Nd`).
///
/// Every `Nd` block is a contiguous run of whole `0..=9` sets, so the value
/// is the distance to the start of the run, modulo 10.
fn digit_value(c: char) -> Option<u64> {
    if let Some(d) = c.to_digit(10) {
        return Some(u64::from(d));
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut run = 0u64;
    let mut cp = u32::from(c);
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        run += 1;
        cp -= 1;
    }
    Some(run % 10)
}

fn is_decimal_digit(c: char) -> bool {
    regex!(r"\A\d\z").is_match(c.encode_utf8(&mut [0; 4]))
}
