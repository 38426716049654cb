//! Date and time handling for trip requests.
//!
//! Clients send a departure (or arrival) instant either as separate `date`
//! and `time` strings, or as a single ISO 8601 timestamp in `time`. This
//! module turns those strings into one instant. "Now" comes from a
//! [`Clock`] so that resolution is deterministic under test.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Error returned when parsing an invalid date or time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date/time {value:?}: {reason}")]
pub struct TimeError {
    reason: &'static str,
    value: String,
}

impl TimeError {
    fn new(reason: &'static str, value: &str) -> Self {
        Self {
            reason,
            value: value.to_string(),
        }
    }
}

/// Source of the current instant.
pub trait Clock {
    /// Returns the current instant, in the offset used to interpret
    /// dates and times that carry no offset of their own.
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// The server's wall clock, in the local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stopped at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];

const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M%p", "%I:%M %p"];

const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `MM-DD-YYYY` and `YYYYMMDD`.
///
/// # Examples
///
/// ```
/// use plan_server::domain::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(parse_date("2024-03-15").unwrap(), expected);
/// assert_eq!(parse_date("03/15/2024").unwrap(), expected);
/// assert_eq!(parse_date("20240315").unwrap(), expected);
/// assert!(parse_date("15th March").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let s = s.trim();

    // chrono's %Y is greedy, so the compact form is split by hand
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().map_err(|_| TimeError::new("bad year", s))?;
        let month = s[4..6].parse().map_err(|_| TimeError::new("bad month", s))?;
        let day = s[6..8].parse().map_err(|_| TimeError::new("bad day", s))?;
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| TimeError::new("no such date", s));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::new("unrecognized date format", s))
}

/// Parse a time of day.
///
/// Accepts `HH:MM`, `HH:MM:SS` and 12-hour forms such as `1:30pm` or
/// `1:30 PM`.
pub fn parse_clock_time(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::new("unrecognized time format", s))
}

/// Parse a complete ISO 8601 timestamp.
///
/// A timestamp with an explicit offset is converted into `offset`; one
/// without is taken to already be in `offset`.
///
/// # Examples
///
/// ```
/// use plan_server::domain::parse_iso_datetime;
/// use chrono::FixedOffset;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// let t = parse_iso_datetime("2024-03-15T10:30:00+01:00", utc).unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-03-15T09:30:00+00:00");
///
/// // A bare clock time is not a timestamp
/// assert!(parse_iso_datetime("10:30", utc).is_err());
/// ```
pub fn parse_iso_datetime(
    s: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimeError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&offset));
    }

    let naive = ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::new("not an ISO 8601 timestamp", s))?;

    localize(naive, offset, s)
}

/// Combine optional `date` and `time` strings into one instant.
///
/// Missing parts default from `clock`:
///
/// - date and time: that date at that time
/// - date only: that date at the current time of day
/// - time only: today at that time
/// - neither: now
pub fn combine_date_time(
    date: Option<&str>,
    time: Option<&str>,
    clock: &impl Clock,
) -> Result<DateTime<FixedOffset>, TimeError> {
    let now = clock.now();
    let offset = *now.offset();

    let day = date.map(parse_date).transpose()?;
    let clock_time = time.map(parse_clock_time).transpose()?;

    match (day, clock_time) {
        (None, None) => Ok(now),
        (day, clock_time) => {
            let day = day.unwrap_or_else(|| now.date_naive());
            let clock_time = clock_time.unwrap_or_else(|| now.time());
            let raw = format!("{} {}", date.unwrap_or(""), time.unwrap_or(""));
            localize(day.and_time(clock_time), offset, raw.trim())
        }
    }
}

fn localize(
    naive: NaiveDateTime,
    offset: FixedOffset,
    raw: &str,
) -> Result<DateTime<FixedOffset>, TimeError> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeError::new("instant out of range", raw))
}
