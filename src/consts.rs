/// Maximum valid day of month before calendar-aware checks
pub const MAX_DAY: u8 = 31;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// English month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Maximum entry length for the day and month segments
pub const SEGMENT_LENGTH: usize = 2;

/// Maximum (and required) entry length for the year segment
pub const YEAR_LENGTH: usize = 4;

/// Year substituted when the day/month pair is checked before a year exists.
/// A leap year, so Feb-29 is optimistically accepted until a real year lands.
pub const FALLBACK_LEAP_YEAR: u16 = 2016;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
