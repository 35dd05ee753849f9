//! Date and timestamp handling
//!
//! Platform timestamps arrive as ISO-8601 strings of varying strictness
//! (full RFC 3339, naive date-times, or bare dates). Parsing is lenient by
//! design: a record whose timestamp cannot be read is excluded from
//! time-ordered aggregates rather than failing the run.

use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Parse a CLI date argument (YYYYMMDD or YYYY-MM-DD).
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a record timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`2024-01-02T10:00:00+03:00`), naive date-times with
/// optional fractional seconds, and bare dates (read as midnight UTC).
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }
    None
}

/// Timezone used to turn UTC instants into display dates.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    fn shift(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                local.with_timezone(&local.offset().fix())
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                local.with_timezone(&local.offset().fix())
            }
        }
    }

    /// Calendar date of `utc` in this timezone (used for --since/--until).
    pub(crate) fn local_date(self, utc: DateTime<Utc>) -> NaiveDate {
        self.shift(utc).date_naive()
    }

    /// Display form of a timeline instant, e.g. `2024-01-02 13:45`.
    pub(crate) fn format_minute(self, utc: DateTime<Utc>) -> String {
        self.shift(utc).format("%Y-%m-%d %H:%M").to_string()
    }

    /// Display form of a timeline day, e.g. `2024-01-02`.
    pub(crate) fn format_day(self, utc: DateTime<Utc>) -> String {
        self.shift(utc).format("%Y-%m-%d").to_string()
    }
}
