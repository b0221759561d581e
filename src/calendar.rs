//! Calendar arithmetic backing the cross-field date check.
//!
//! Everything here is Gregorian-proleptic and pure; the rest of the crate asks
//! one question of it: "is this year/month/day a real calendar date?"

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MONTH_NAMES,
};

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether `year`/`month`/`day` (month 1-indexed) names an existing date.
pub const fn is_real_date(year: u16, month: u8, day: u8) -> bool {
    if month == 0 || month > MAX_MONTH || day == 0 {
        return false;
    }
    day <= days_in_month(year, month)
}

/// English name for a 1-indexed month, `None` outside `1..=12`.
pub fn month_name(month: u8) -> Option<&'static str> {
    if month == 0 || month > MAX_MONTH {
        return None;
    }
    Some(MONTH_NAMES[month as usize])
}
