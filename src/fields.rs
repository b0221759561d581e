//! Field records and error values for the three-segment date entry.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// One of the three entry segments, in visual order month / day / year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateField {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "year")]
    Year,
}

impl DateField {
    /// The segment to the left, if any.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Month => None,
            Self::Day => Some(Self::Month),
            Self::Year => Some(Self::Day),
        }
    }

    /// The segment to the right, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Month => Some(Self::Day),
            Self::Day => Some(Self::Year),
            Self::Year => None,
        }
    }
}

/// Raw in-progress text of each segment. Empty string means "not yet entered".
///
/// Values stay as text rather than numbers so partial input (a lone leading
/// zero, a half-typed year) round-trips exactly as the user left it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFields {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateFields {
    /// True when no segment has been entered at all.
    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.month.is_empty() && self.year.is_empty()
    }

    /// The current text of one segment.
    pub fn get(&self, field: DateField) -> &str {
        match field {
            DateField::Day => &self.day,
            DateField::Month => &self.month,
            DateField::Year => &self.year,
        }
    }

    pub(crate) fn set(&mut self, field: DateField, value: String) {
        match field {
            DateField::Day => self.day = value,
            DateField::Month => self.month = value,
            DateField::Year => self.year = value,
        }
    }
}

/// Per-segment validation message. At most one per field at a time; a field's
/// error is always recomputed from scratch, never appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FieldError {
    /// A sibling segment has committed a valid value and this one is empty.
    #[display(fmt = "Required")]
    Required,
    #[display(fmt = "Please enter a valid day")]
    InvalidDay,
    #[display(fmt = "Please enter a valid month")]
    InvalidMonth,
    #[display(fmt = "Please enter a valid year")]
    InvalidYear,
}

/// The three per-segment error slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFieldErrors {
    pub day: Option<FieldError>,
    pub month: Option<FieldError>,
    pub year: Option<FieldError>,
}

impl DateFieldErrors {
    /// True when any segment currently carries an error.
    pub const fn any(&self) -> bool {
        self.day.is_some() || self.month.is_some() || self.year.is_some()
    }

    /// The error slot for one segment.
    pub const fn get(&self, field: DateField) -> Option<FieldError> {
        match field {
            DateField::Day => self.day,
            DateField::Month => self.month,
            DateField::Year => self.year,
        }
    }

    pub(crate) const fn set(&mut self, field: DateField, error: Option<FieldError>) {
        match field {
            DateField::Day => self.day = error,
            DateField::Month => self.month = error,
            DateField::Year => self.year = error,
        }
    }
}

/// Cross-field error: the segments are individually well-formed but do not
/// name a real calendar date, or the initial value could not be parsed.
///
/// `InvalidDayForMonth` is only ever set while all three field errors are
/// absent; field errors always suppress it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Please enter a valid day for {_0}")]
    InvalidDayForMonth(&'static str),
    #[display(fmt = "Invalid date supplied: {_0}")]
    InvalidDate(String),
}

/// Geometry of the focus underline, in pixels relative to the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightBar {
    pub width: f64,
    pub left: f64,
}

/// Measured geometry of a focused segment, in absolute pixels as reported by
/// the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldBounds {
    pub left: f64,
    pub width: f64,
}
