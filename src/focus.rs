//! Focus movement decisions.
//!
//! Pure functions: they decide where focus should go and whether the default
//! key action must be suppressed, and leave actually moving input focus to the
//! presentation layer. They never touch validation state.

use crate::fields::DateField;

/// A key press as seen by the entry shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Delete/backspace.
    Backspace,
    /// A printable character.
    Char(char),
    /// Anything else (arrows, tab, ...).
    Other,
}

/// Focus transfer requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    /// Segment to focus next.
    pub target: DateField,
    /// Whether the key's default action must be suppressed.
    pub prevent_default: bool,
}

/// Per-field thresholds for the quick-advance rule.
struct FocusNextOptions {
    /// Largest single digit that can still take a second digit.
    max_quick_focus_value: u16,
    /// Length at which a single digit is eligible for quick-advance.
    min_focus_length: usize,
    /// Full length of the segment.
    max_focus_length: usize,
}

const fn focus_next_options(field: DateField) -> FocusNextOptions {
    match field {
        // Days 4-9 cannot take a second digit, months 2-9 likewise.
        DateField::Day => FocusNextOptions {
            max_quick_focus_value: 3,
            min_focus_length: 1,
            max_focus_length: 2,
        },
        DateField::Month => FocusNextOptions {
            max_quick_focus_value: 1,
            min_focus_length: 1,
            max_focus_length: 2,
        },
        // Years never quick-advance on a partial value.
        DateField::Year => FocusNextOptions {
            max_quick_focus_value: 9999,
            min_focus_length: 4,
            max_focus_length: 4,
        },
    }
}

/// Retreat focus to the previous segment on delete in an already-empty field.
/// Returns `None` for any other key, a non-empty field, or the first segment.
pub fn focus_previous_input(
    key: Key,
    current_value: &str,
    previous: Option<DateField>,
) -> Option<FocusMove> {
    if key != Key::Backspace || !current_value.is_empty() {
        return None;
    }

    previous.map(|target| FocusMove {
        target,
        prevent_default: true,
    })
}

/// Advance focus to the next segment once a just-validated keystroke either
/// fills the field or types a digit too large to take a second one.
pub fn try_focus_next_input(
    is_valid: bool,
    value: &str,
    previous_value_length: usize,
    field: DateField,
    next: Option<DateField>,
) -> Option<DateField> {
    if !is_valid {
        return None;
    }
    let next = next?;

    let options = focus_next_options(field);
    let length = value.chars().count();

    let is_max_field_length =
        previous_value_length == options.max_focus_length - 1 && length == options.max_focus_length;
    let is_max_quick_focus_value = length == options.min_focus_length
        && value.parse::<u16>().is_ok_and(|v| v > options.max_quick_focus_value);

    if is_max_field_length || is_max_quick_focus_value {
        Some(next)
    } else {
        None
    }
}

/// Keypress filter for the numeric segments: suppress anything a number input
/// would otherwise admit (e, -, +, .) along with every other non-digit.
pub const fn suppress_non_numeric(ch: char) -> bool {
    !ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_previous_on_delete_in_empty_field() {
        let moved = focus_previous_input(Key::Backspace, "", Some(DateField::Month));
        assert_eq!(
            moved,
            Some(FocusMove {
                target: DateField::Month,
                prevent_default: true,
            })
        );
    }

    #[test]
    fn test_no_focus_previous_on_other_keys() {
        assert_eq!(
            focus_previous_input(Key::Other, "", Some(DateField::Month)),
            None
        );
        assert_eq!(
            focus_previous_input(Key::Char('4'), "", Some(DateField::Month)),
            None
        );
    }

    #[test]
    fn test_no_focus_previous_when_field_not_empty() {
        assert_eq!(
            focus_previous_input(Key::Backspace, "0", Some(DateField::Month)),
            None
        );
    }

    #[test]
    fn test_no_focus_previous_without_previous_field() {
        assert_eq!(focus_previous_input(Key::Backspace, "", None), None);
    }

    #[test]
    fn test_focus_next_when_field_filled() {
        let next = try_focus_next_input(true, "12", 1, DateField::Day, Some(DateField::Year));
        assert_eq!(next, Some(DateField::Year));
    }

    #[test]
    fn test_focus_next_on_quick_focus_digit() {
        assert_eq!(
            try_focus_next_input(true, "2", 1, DateField::Month, Some(DateField::Day)),
            Some(DateField::Day)
        );
        assert_eq!(
            try_focus_next_input(true, "4", 0, DateField::Day, Some(DateField::Year)),
            Some(DateField::Year)
        );
    }

    #[test]
    fn test_no_focus_next_below_quick_focus_threshold() {
        assert_eq!(
            try_focus_next_input(true, "1", 0, DateField::Month, Some(DateField::Day)),
            None
        );
        assert_eq!(
            try_focus_next_input(true, "3", 0, DateField::Day, Some(DateField::Year)),
            None
        );
    }

    #[test]
    fn test_no_focus_next_when_invalid_or_missing_next() {
        assert_eq!(
            try_focus_next_input(false, "12", 1, DateField::Day, Some(DateField::Year)),
            None
        );
        assert_eq!(try_focus_next_input(true, "12", 1, DateField::Year, None), None);
    }

    #[test]
    fn test_year_never_quick_advances_short_values() {
        assert_eq!(
            try_focus_next_input(true, "200", 0, DateField::Year, Some(DateField::Month)),
            None
        );
        assert_eq!(
            try_focus_next_input(true, "9", 0, DateField::Year, Some(DateField::Month)),
            None
        );
    }

    #[test]
    fn test_suppress_non_numeric() {
        assert!(suppress_non_numeric('E'));
        assert!(suppress_non_numeric('-'));
        assert!(suppress_non_numeric('+'));
        assert!(suppress_non_numeric('.'));
        assert!(!suppress_non_numeric('0'));
        assert!(!suppress_non_numeric('9'));
    }
}
