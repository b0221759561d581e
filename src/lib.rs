//! Core of a segmented month/day/year date entry widget.
//!
//! Three text segments are typed independently; this crate decides, on every
//! keystroke and on every field exit, whether the partial input is well
//! formed, whether focus should move to an adjacent segment, and what single
//! combined error (if any) to surface. Rendering, styling and the host that
//! owns the value are external; they feed events into [`DateEntry::apply`]
//! and read the resulting state back out.

mod calendar;
mod consts;
mod fields;
mod focus;
mod format;
mod prelude;
mod validate;

pub use calendar::{days_in_month, is_leap_year, is_real_date, month_name};
pub use consts::*;
pub use fields::{
    DateError, DateField, DateFieldErrors, DateFields, FieldBounds, FieldError, HighlightBar,
};
pub use focus::{FocusMove, Key, focus_previous_input, suppress_non_numeric, try_focus_next_input};
pub use format::{format_value, format_year, normalize_value};
pub use validate::{Validated, validate_date, validate_day, validate_month, validate_year};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Error for an initial date value the entry cannot mount from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDateError {
    #[error("Invalid date supplied: {0}")]
    Unparseable(String),
}

/// An initial date accepted at mount: an ISO-ish string or explicit parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialDate {
    /// `YYYY-MM-DD`, optionally a full RFC 3339 date-time.
    Iso(String),
    /// Already-split parts, month 1-indexed.
    Ymd { year: u16, month: u8, day: u8 },
}

impl From<&str> for InitialDate {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_owned())
    }
}

impl From<String> for InitialDate {
    fn from(value: String) -> Self {
        Self::Iso(value)
    }
}

impl From<NaiveDate> for InitialDate {
    fn from(value: NaiveDate) -> Self {
        Self::Iso(value.format("%Y-%m-%d").to_string())
    }
}

impl From<(u16, u8, u8)> for InitialDate {
    fn from((year, month, day): (u16, u8, u8)) -> Self {
        Self::Ymd { year, month, day }
    }
}

/// Splits an initial date into unpadded field strings, month 1-indexed.
/// No initial date yields a fully blank row.
///
/// # Errors
/// Returns [`ParseDateError::Unparseable`] if the value does not name a real
/// calendar date.
pub fn parse_date(initial: Option<InitialDate>) -> Result<DateFields, ParseDateError> {
    let Some(initial) = initial else {
        return Ok(DateFields::default());
    };

    let (year, month, day) = match initial {
        InitialDate::Iso(ref raw) => {
            let date = raw
                .parse::<NaiveDate>()
                .or_else(|_| {
                    DateTime::<FixedOffset>::parse_from_rfc3339(raw).map(|dt| dt.date_naive())
                })
                .map_err(|_| ParseDateError::Unparseable(raw.clone()))?;
            (date.year().to_string(), date.month(), date.day())
        }
        InitialDate::Ymd { year, month, day } => {
            if !is_real_date(year, month, day) {
                return Err(ParseDateError::Unparseable(format!(
                    "{year:04}{DATE_SEPARATOR}{month:02}{DATE_SEPARATOR}{day:02}"
                )));
            }
            (year.to_string(), u32::from(month), u32::from(day))
        }
    };

    Ok(DateFields {
        day: day.to_string(),
        month: month.to_string(),
        year,
    })
}

/// The normalized result reported to the owner on every change and blur.
///
/// `date` is always rendered `YYYY-MM-DD` with blank segments left out
/// (`"2012--07"` when the month is missing); `is_valid` is true only when all
/// three segments are present, the year is exactly 4 characters, and no field
/// or date error exists. Derived from current state, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOutput {
    pub is_valid: bool,
    pub date: String,
}

/// Projects fields and errors into the owner-facing [`DateOutput`].
pub fn generate_output(
    fields: &DateFields,
    errors: &DateFieldErrors,
    date_error: Option<&DateError>,
) -> DateOutput {
    let is_complete = !fields.day.is_empty()
        && !fields.month.is_empty()
        && fields.year.chars().count() == YEAR_LENGTH;
    let is_valid = !errors.any() && date_error.is_none() && is_complete;

    DateOutput {
        is_valid,
        date: format!(
            "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{}",
            fields.year,
            format_value(&fields.month),
            format_value(&fields.day)
        ),
    }
}

/// An interaction event fed in by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The segment's text changed (keystroke, paste).
    Change { field: DateField, value: String },
    /// The segment lost focus; `value` is its text at that moment.
    Blur { field: DateField, value: String },
    /// A key went down in the segment before any text change.
    KeyDown { field: DateField, key: Key },
    /// The segment gained focus.
    Focus {
        field: DateField,
        bounds: FieldBounds,
        container_left: f64,
    },
}

/// Side effects the shell must carry out after a transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Result to hand to the owner's change/blur callback, when one fired.
    pub output: Option<DateOutput>,
    /// Segment that should receive input focus.
    pub focus: Option<DateField>,
    /// Whether the triggering key's default action must be suppressed.
    pub prevent_default: bool,
}

/// State machine behind the three segments.
///
/// Owns the field strings, the per-field errors, the combined date error and
/// the highlight state; every transition runs synchronously inside
/// [`apply`](Self::apply) as a total function of the event and current state.
/// Within one event the order is fixed: field validation, then date
/// validation, then the owner output, then the state commit, then any focus
/// decision.
#[derive(Debug, Clone)]
pub struct DateEntry {
    fields: DateFields,
    errors: DateFieldErrors,
    date_error: Option<DateError>,
    highlight_error: bool,
    highlight: HighlightBar,
    current_year: u16,
}

impl DateEntry {
    /// Mounts the entry, splitting `initial` into the three segments or, when
    /// it cannot be parsed, leaving the row blank with a date error.
    pub fn new(initial: Option<InitialDate>) -> Self {
        let (fields, date_error) = match parse_date(initial) {
            Ok(fields) => (fields, None),
            Err(ParseDateError::Unparseable(input)) => {
                (DateFields::default(), Some(DateError::InvalidDate(input)))
            }
        };

        Self {
            fields,
            errors: DateFieldErrors::default(),
            date_error,
            highlight_error: false,
            highlight: HighlightBar::default(),
            current_year: u16::try_from(Utc::now().year()).unwrap_or(FALLBACK_LEAP_YEAR),
        }
    }

    /// Overrides the year the century pivot compares 2-digit years against
    /// (builder). Defaults to the current wall-clock year.
    pub fn with_current_year(mut self, year: u16) -> Self {
        self.current_year = year;
        self
    }

    // --- State access ---

    pub fn fields(&self) -> &DateFields {
        &self.fields
    }

    pub fn field_errors(&self) -> &DateFieldErrors {
        &self.errors
    }

    pub fn date_error(&self) -> Option<&DateError> {
        self.date_error.as_ref()
    }

    pub const fn highlight(&self) -> HighlightBar {
        self.highlight
    }

    pub const fn highlight_error(&self) -> bool {
        self.highlight_error
    }

    /// Whether a segment should carry the error marker class: its own error,
    /// or the combined date error (which marks every segment).
    pub fn field_has_error(&self, field: DateField) -> bool {
        self.errors.get(field).is_some() || self.date_error.is_some()
    }

    /// The single error line to display, in priority order: month, day, year,
    /// then the combined date error.
    pub fn display_error(&self) -> Option<String> {
        self.errors
            .month
            .or(self.errors.day)
            .or(self.errors.year)
            .map(|error| error.to_string())
            .or_else(|| self.date_error.as_ref().map(DateError::to_string))
    }

    /// The owner-facing projection of the current state.
    pub fn output(&self) -> DateOutput {
        generate_output(&self.fields, &self.errors, self.date_error.as_ref())
    }

    // --- Transitions ---

    /// Runs one transition and returns the side effects the shell must apply.
    pub fn apply(&mut self, event: InputEvent) -> Effects {
        match event {
            InputEvent::Change { field, value } => self.change(field, &value),
            InputEvent::Blur { field, value } => self.blur(field, &value),
            InputEvent::KeyDown { field, key } => self.key_down(field, key),
            InputEvent::Focus {
                field,
                bounds,
                container_left,
            } => self.focus(field, bounds, container_left),
        }
    }

    fn change(&mut self, field: DateField, raw: &str) -> Effects {
        let max_len = match field {
            DateField::Year => YEAR_LENGTH,
            DateField::Day | DateField::Month => SEGMENT_LENGTH,
        };
        let value = normalize_value(raw, max_len);
        let previous_length = self.fields.get(field).chars().count();
        trace!(field = %field, value = %value, "change");

        // The changed field is probed in isolation, so Required never fires
        // mid-typing; a lone "0" is a valid in-progress sentinel and skips
        // validation entirely. The year is only validated on blur.
        let field_error = match field {
            DateField::Day | DateField::Month if value == "0" => None,
            DateField::Day => validate_day(&lone_field(field, &value), &DateFieldErrors::default()),
            DateField::Month => {
                validate_month(&lone_field(field, &value), &DateFieldErrors::default())
            }
            DateField::Year => None,
        };

        let mut fields = self.fields.clone();
        fields.set(field, value.clone());
        let mut errors = self.errors;
        errors.set(field, field_error);

        let validated = validate_date(&fields, &errors);
        if let Some(error) = &validated.date_error {
            debug!(error = %error, "date validation failed");
        }
        let is_valid = field_error.is_none() && validated.date_error.is_none();

        let output = generate_output(&fields, &validated.field_errors, validated.date_error.as_ref());

        self.fields = fields;
        self.errors = validated.field_errors;
        self.date_error = validated.date_error;
        self.highlight_error = match field {
            DateField::Year => self.date_error.is_some(),
            DateField::Day | DateField::Month => !is_valid,
        };

        let focus = match field {
            DateField::Year => None,
            DateField::Day | DateField::Month => {
                try_focus_next_input(is_valid, &value, previous_length, field, field.next())
            }
        };

        Effects {
            output: Some(output),
            focus,
            prevent_default: false,
        }
    }

    fn blur(&mut self, field: DateField, raw: &str) -> Effects {
        let value = match field {
            DateField::Year => format_year(raw, self.current_year),
            DateField::Day | DateField::Month => format_value(raw),
        };
        trace!(field = %field, value = %value, "blur");

        let mut fields = self.fields.clone();
        fields.set(field, value);

        // Full-row validation on exit: Required applies here.
        let field_error = match field {
            DateField::Day => validate_day(&fields, &self.errors),
            DateField::Month => validate_month(&fields, &self.errors),
            DateField::Year => validate_year(&fields, &self.errors),
        };
        let mut errors = self.errors;
        errors.set(field, field_error);
        let validated = validate_date(&fields, &errors);
        if let Some(error) = &validated.date_error {
            debug!(error = %error, "date validation failed");
        }

        // Only the blurred field's slot and the date error are committed;
        // sibling errors stay exactly as they were.
        let mut committed = self.errors;
        committed.set(field, field_error);

        let output = generate_output(&fields, &committed, validated.date_error.as_ref());

        self.fields = fields;
        self.errors = committed;
        self.date_error = validated.date_error;
        self.highlight = HighlightBar::default();

        Effects {
            output: Some(output),
            focus: None,
            prevent_default: false,
        }
    }

    fn key_down(&mut self, field: DateField, key: Key) -> Effects {
        let moved = focus_previous_input(key, self.fields.get(field), field.previous());

        Effects {
            output: None,
            focus: moved.map(|m| m.target),
            prevent_default: moved.is_some_and(|m| m.prevent_default),
        }
    }

    fn focus(&mut self, field: DateField, bounds: FieldBounds, container_left: f64) -> Effects {
        self.highlight = HighlightBar {
            left: bounds.left - container_left,
            width: bounds.width,
        };
        self.highlight_error = self.field_has_error(field);

        Effects::default()
    }
}

impl Default for DateEntry {
    fn default() -> Self {
        Self::new(None)
    }
}

fn lone_field(field: DateField, value: &str) -> DateFields {
    let mut fields = DateFields::default();
    fields.set(field, value.to_owned());
    fields
}
