//! Field-level and cross-field validation.
//!
//! Field validators are syntax-only (range plus optional leading zero, not
//! calendar-aware); `validate_date` is the single place the calendar is
//! consulted. A field counts as "Required" only once a sibling has committed
//! a value that is itself error-free, so fields can be filled in any order
//! without premature errors.

use crate::calendar;
use crate::consts::{FALLBACK_LEAP_YEAR, MAX_DAY, MAX_MONTH, SEGMENT_LENGTH, YEAR_LENGTH};
use crate::fields::{DateError, DateFieldErrors, DateFields, FieldError};

/// Result of the cross-field pass: the (possibly cleared) field errors plus
/// the date-level error. Returned whole because the all-empty branch clears
/// every slot, stale sibling errors included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub field_errors: DateFieldErrors,
    pub date_error: Option<DateError>,
}

fn in_segment_range(value: &str, max: u8) -> bool {
    matches!(value.chars().count(), 1..=SEGMENT_LENGTH)
        && matches!(value.parse::<u8>(), Ok(v) if (1..=max).contains(&v))
}

/// Syntax check for the day segment: 1-31 with optional leading zero, or
/// `Required` when empty while an error-free sibling is present.
pub fn validate_day(fields: &DateFields, errors: &DateFieldErrors) -> Option<FieldError> {
    if fields.day.is_empty() {
        let sibling_committed = (!fields.month.is_empty() && errors.month.is_none())
            || (!fields.year.is_empty() && errors.year.is_none());
        return sibling_committed.then_some(FieldError::Required);
    }

    (!in_segment_range(&fields.day, MAX_DAY)).then_some(FieldError::InvalidDay)
}

/// Syntax check for the month segment: 1-12 with optional leading zero.
pub fn validate_month(fields: &DateFields, errors: &DateFieldErrors) -> Option<FieldError> {
    if fields.month.is_empty() {
        let sibling_committed = (!fields.day.is_empty() && errors.day.is_none())
            || (!fields.year.is_empty() && errors.year.is_none());
        return sibling_committed.then_some(FieldError::Required);
    }

    (!in_segment_range(&fields.month, MAX_MONTH)).then_some(FieldError::InvalidMonth)
}

/// Syntax check for the year segment: any 4-character value passes. Numeric
/// range is deliberately not enforced, so "0000" is accepted here.
pub fn validate_year(fields: &DateFields, errors: &DateFieldErrors) -> Option<FieldError> {
    if fields.year.is_empty() {
        let sibling_committed = (!fields.day.is_empty() && errors.day.is_none())
            || (!fields.month.is_empty() && errors.month.is_none());
        return sibling_committed.then_some(FieldError::Required);
    }

    (fields.year.chars().count() != YEAR_LENGTH).then_some(FieldError::InvalidYear)
}

/// Cross-field pass over the whole row.
///
/// Fully blank clears everything; any field error suppresses the date-level
/// check; otherwise a present, non-zero month/day pair is checked against the
/// calendar, substituting [`FALLBACK_LEAP_YEAR`] while no year has landed.
pub fn validate_date(fields: &DateFields, errors: &DateFieldErrors) -> Validated {
    if fields.is_empty() {
        return Validated::default();
    }

    if errors.any() {
        return Validated {
            field_errors: *errors,
            date_error: None,
        };
    }

    Validated {
        field_errors: *errors,
        date_error: day_of_month_error(fields),
    }
}

fn day_of_month_error(fields: &DateFields) -> Option<DateError> {
    if fields.month.is_empty()
        || fields.month == "0"
        || fields.day.is_empty()
        || fields.day == "0"
    {
        return None;
    }

    let month = fields.month.parse::<u8>().ok()?;
    let day = fields.day.parse::<u8>().ok()?;
    let year = fields
        .year
        .parse::<u16>()
        .ok()
        .filter(|year| *year != 0)
        .unwrap_or(FALLBACK_LEAP_YEAR);

    if calendar::is_real_date(year, month, day) {
        None
    } else {
        calendar::month_name(month).map(DateError::InvalidDayForMonth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(day: &str, month: &str, year: &str) -> DateFields {
        DateFields {
            day: day.to_owned(),
            month: month.to_owned(),
            year: year.to_owned(),
        }
    }

    const NO_ERRORS: DateFieldErrors = DateFieldErrors {
        day: None,
        month: None,
        year: None,
    };

    #[test]
    fn test_validate_day() {
        assert_eq!(validate_day(&fields("", "", ""), &NO_ERRORS), None);
        assert_eq!(validate_day(&fields("1", "", ""), &NO_ERRORS), None);
        assert_eq!(validate_day(&fields("01", "", ""), &NO_ERRORS), None);
        assert_eq!(validate_day(&fields("31", "", ""), &NO_ERRORS), None);
        assert_eq!(
            validate_day(&fields("00", "", ""), &NO_ERRORS),
            Some(FieldError::InvalidDay)
        );
        assert_eq!(
            validate_day(&fields("33", "", ""), &NO_ERRORS),
            Some(FieldError::InvalidDay)
        );
        assert_eq!(
            validate_day(&fields("0", "", ""), &NO_ERRORS),
            Some(FieldError::InvalidDay)
        );
        assert_eq!(
            validate_day(&fields("", "02", ""), &NO_ERRORS),
            Some(FieldError::Required)
        );
        assert_eq!(
            validate_day(&fields("", "", "2002"), &NO_ERRORS),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn test_validate_day_tolerates_erroring_siblings() {
        // A sibling that itself carries an error does not make the day required.
        let errors = DateFieldErrors {
            month: Some(FieldError::InvalidMonth),
            ..NO_ERRORS
        };
        assert_eq!(validate_day(&fields("", "13", ""), &errors), None);
    }

    #[test]
    fn test_validate_month() {
        assert_eq!(validate_month(&fields("", "", ""), &NO_ERRORS), None);
        assert_eq!(validate_month(&fields("", "1", ""), &NO_ERRORS), None);
        assert_eq!(validate_month(&fields("", "01", ""), &NO_ERRORS), None);
        assert_eq!(validate_month(&fields("", "12", ""), &NO_ERRORS), None);
        assert_eq!(
            validate_month(&fields("", "00", ""), &NO_ERRORS),
            Some(FieldError::InvalidMonth)
        );
        assert_eq!(
            validate_month(&fields("", "13", ""), &NO_ERRORS),
            Some(FieldError::InvalidMonth)
        );
        assert_eq!(
            validate_month(&fields("02", "", ""), &NO_ERRORS),
            Some(FieldError::Required)
        );
        assert_eq!(
            validate_month(&fields("", "", "2002"), &NO_ERRORS),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn test_validate_year() {
        assert_eq!(validate_year(&fields("", "", ""), &NO_ERRORS), None);
        assert_eq!(validate_year(&fields("", "", "0001"), &NO_ERRORS), None);
        assert_eq!(validate_year(&fields("", "", "2016"), &NO_ERRORS), None);
        // Numeric range is not checked, only length.
        assert_eq!(validate_year(&fields("", "", "0000"), &NO_ERRORS), None);
        assert_eq!(
            validate_year(&fields("", "", "1"), &NO_ERRORS),
            Some(FieldError::InvalidYear)
        );
        assert_eq!(
            validate_year(&fields("", "", "01"), &NO_ERRORS),
            Some(FieldError::InvalidYear)
        );
        assert_eq!(
            validate_year(&fields("", "", "001"), &NO_ERRORS),
            Some(FieldError::InvalidYear)
        );
        assert_eq!(
            validate_year(&fields("02", "", ""), &NO_ERRORS),
            Some(FieldError::Required)
        );
        assert_eq!(
            validate_year(&fields("", "12", ""), &NO_ERRORS),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn test_validate_date_accepts_leap_day() {
        // No year yet: the fallback leap year keeps Feb-29 optimistic.
        assert_eq!(
            validate_date(&fields("29", "2", ""), &NO_ERRORS),
            Validated::default()
        );
        assert_eq!(
            validate_date(&fields("29", "2", "2016"), &NO_ERRORS),
            Validated::default()
        );
    }

    #[test]
    fn test_validate_date_rejects_day_outside_month() {
        assert_eq!(
            validate_date(&fields("30", "2", ""), &NO_ERRORS).date_error,
            Some(DateError::InvalidDayForMonth("February"))
        );
        assert_eq!(
            validate_date(&fields("32", "4", ""), &NO_ERRORS).date_error,
            Some(DateError::InvalidDayForMonth("April"))
        );
        assert_eq!(
            validate_date(&fields("29", "2", "2015"), &NO_ERRORS).date_error,
            Some(DateError::InvalidDayForMonth("February"))
        );
    }

    #[test]
    fn test_validate_date_skips_partial_rows() {
        assert_eq!(
            validate_date(&fields("", "2", "2015"), &NO_ERRORS),
            Validated::default()
        );
        assert_eq!(
            validate_date(&fields("10", "2", "2015"), &NO_ERRORS),
            Validated::default()
        );
        assert_eq!(
            validate_date(&fields("10", "", "2015"), &NO_ERRORS),
            Validated::default()
        );
        assert_eq!(
            validate_date(&fields("0", "0", "2015"), &NO_ERRORS),
            Validated::default()
        );
    }

    #[test]
    fn test_validate_date_clears_errors_when_inputs_cleared() {
        let stale = DateFieldErrors {
            day: Some(FieldError::InvalidDay),
            month: Some(FieldError::InvalidMonth),
            year: Some(FieldError::InvalidYear),
        };
        assert_eq!(validate_date(&fields("", "", ""), &stale), Validated::default());
    }

    #[test]
    fn test_validate_date_passes_field_errors_through() {
        let day_error = DateFieldErrors {
            day: Some(FieldError::InvalidDay),
            ..NO_ERRORS
        };
        assert_eq!(
            validate_date(&fields("32", "01", "2016"), &day_error),
            Validated {
                field_errors: day_error,
                date_error: None,
            }
        );

        let year_error = DateFieldErrors {
            year: Some(FieldError::InvalidYear),
            ..NO_ERRORS
        };
        assert_eq!(
            validate_date(&fields("01", "01", "201"), &year_error),
            Validated {
                field_errors: year_error,
                date_error: None,
            }
        );
    }

    #[test]
    fn test_validate_date_uses_partial_year_as_typed() {
        // A 3-digit year parses and is used as-is; year 201 is not a leap year.
        assert_eq!(
            validate_date(&fields("29", "2", "201"), &NO_ERRORS).date_error,
            Some(DateError::InvalidDayForMonth("February"))
        );
    }
}
