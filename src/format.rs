//! Keystroke normalization and blur-time formatting.
//!
//! `normalize_value` runs on every keystroke, before validation;
//! `format_value` and `format_year` run once on field exit.

use crate::consts::CENTURY_CYCLE;

/// Canonicalizes a partial keystroke: truncates to `max_len` characters and,
/// when the result is an all-zero run of exactly `max_len` zeros, drops one
/// zero so a lone "0" stays a sentinel instead of growing into "00".
pub fn normalize_value(value: &str, max_len: usize) -> String {
    let mut value: String = value.chars().take(max_len).collect();
    if value.len() == max_len && !value.is_empty() && value.bytes().all(|b| b == b'0') {
        value.pop();
    }
    value
}

/// Zero-pads a single-character day or month on blur; anything else passes
/// through unchanged, so formatting is idempotent.
pub fn format_value(value: &str) -> String {
    if value.chars().count() != 1 {
        return value.to_owned();
    }

    format!("0{value}")
}

/// Expands a 2-character year to 4 on blur by picking a century against
/// `current_year`: two digits greater than the current year's last two are
/// taken to belong to the previous century ("99" near 2024 means 1999, "20"
/// means 2020). Other lengths pass through unchanged.
pub fn format_year(year: &str, current_year: u16) -> String {
    if year.chars().count() != 2 {
        return year.to_owned();
    }

    let two_digit = year.parse::<u16>().unwrap_or(0);
    let mut century = current_year / CENTURY_CYCLE;
    if two_digit > current_year % CENTURY_CYCLE {
        century = century.saturating_sub(1);
    }

    format!("{century}{year}")
}
