//! Timestamp parsing and decomposition into integer date parts.

use crate::error::{CtrError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl From<NaiveDateTime> for DateParts {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
        }
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS` (also `T`-separated, minutes-only, or date-only).
pub fn parse_timestamp(raw: &str) -> Result<DateParts> {
    let s = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.into());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(DateParts::from)
        .ok_or_else(|| CtrError::Timestamp {
            value: raw.to_string(),
        })
}

/// Join separate date and time inputs into one timestamp string.
/// A missing or blank time means midnight; `HH:MM` gets `:00` seconds.
pub fn synthesize_timestamp(date: &str, time: Option<&str>) -> String {
    let time = match time.map(str::trim) {
        None | Some("") => "00:00:00".to_string(),
        Some(t) if t.len() == 5 => format!("{t}:00"),
        Some(t) => t.to_string(),
    };
    format!("{} {}", date.trim(), time)
}
