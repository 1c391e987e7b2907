//! Calendar-date window during which a task is planned.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a client date into a calendar date, discarding any time of day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps. RFC
/// 3339 values keep the calendar date of their own offset.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Optional start and end dates; the end never precedes the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    start_at: Option<NaiveDate>,
    end_at: Option<NaiveDate>,
}

impl Schedule {
    /// Creates a schedule from already-parsed dates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EndBeforeStart`] when both dates are set and
    /// `end_at` is earlier than `start_at`.
    pub fn new(
        start_at: Option<NaiveDate>,
        end_at: Option<NaiveDate>,
    ) -> Result<Self, TaskDomainError> {
        if let (Some(start), Some(end)) = (start_at, end_at)
            && end < start
        {
            return Err(TaskDomainError::EndBeforeStart { start, end });
        }
        Ok(Self { start_at, end_at })
    }

    /// Parses client-supplied dates. Absent or blank values leave that end of
    /// the window open.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStartDate`] or
    /// [`TaskDomainError::InvalidEndDate`] for unparseable input, and
    /// [`TaskDomainError::EndBeforeStart`] for an inverted window.
    pub fn parse(start_at: Option<&str>, end_at: Option<&str>) -> Result<Self, TaskDomainError> {
        let start = parse_optional(start_at, TaskDomainError::InvalidStartDate)?;
        let end = parse_optional(end_at, TaskDomainError::InvalidEndDate)?;
        Self::new(start, end)
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_at(&self) -> Option<NaiveDate> {
        self.start_at
    }

    /// Returns the end date, if any.
    #[must_use]
    pub const fn end_at(&self) -> Option<NaiveDate> {
        self.end_at
    }
}

fn parse_optional(
    raw: Option<&str>,
    invalid: fn(String) -> TaskDomainError,
) -> Result<Option<NaiveDate>, TaskDomainError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => parse_calendar_date(value)
            .map(Some)
            .ok_or_else(|| invalid(value.to_owned())),
    }
}
