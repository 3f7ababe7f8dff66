use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::foundation::error::{CountdownError, CountdownResult};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Offset-less date-time layouts, interpreted in the caller's time zone.
const LOCAL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a target-time literal, reading offset-less forms as host-local time.
///
/// See [`parse_target_time_in`] for the accepted layouts.
pub fn parse_target_time(literal: &str) -> CountdownResult<DateTime<Utc>> {
    parse_target_time_in(literal, &Local)
}

/// Parse a target-time literal into an absolute instant.
///
/// Accepted, in order: RFC 3339 (`2026-10-18T12:00:00Z`), ISO 8601 with a numeric offset
/// (`2026-10-18T12:00:00+0200`), an offset-less date-time (`T` or space separated, seconds
/// optional) and a bare `YYYY-MM-DD` meaning midnight. Offset-less forms are resolved in `tz`.
pub fn parse_target_time_in<Tz: TimeZone>(
    literal: &str,
    tz: &Tz,
) -> CountdownResult<DateTime<Utc>> {
    let s = literal.trim();
    if s.is_empty() {
        return Err(CountdownError::invalid_time("time must be non-empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| CountdownError::invalid_time(format!("unrecognized time \"{s}\"")))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CountdownError::invalid_time(format!("\"{s}\" does not exist in the local time zone"))
        })
}

/// Signed time left until the target, in milliseconds.
///
/// Negative values mean the target is already in the past.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Remaining {
    millis: i64,
}

impl Remaining {
    /// Time from `now` until `target` (`target - now`).
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            millis: (target - now).num_milliseconds(),
        }
    }

    /// Build from a raw millisecond count.
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Raw millisecond count.
    pub fn as_millis(self) -> i64 {
        self.millis
    }

    /// Return `true` once the target instant has passed.
    pub fn is_expired(self) -> bool {
        self.millis < 0
    }

    /// Move one second closer to (or further past) the target.
    pub fn advance_one_second(&mut self) {
        self.millis = self.millis.saturating_sub(MS_PER_SECOND);
    }

    /// Split into day/hour/minute/second parts, truncating sub-second remainders.
    ///
    /// Returns `None` for expired durations; those render the fallback message instead.
    pub fn parts(self) -> Option<TimeParts> {
        if self.is_expired() {
            return None;
        }

        let ms = self.millis;
        let days = ms / MS_PER_DAY;
        let hours = ms / MS_PER_HOUR - days * 24;
        let minutes = ms / MS_PER_MINUTE - days * 24 * 60 - hours * 60;
        let seconds = ms / MS_PER_SECOND - days * 24 * 60 * 60 - hours * 60 * 60 - minutes * 60;
        Some(TimeParts {
            days,
            hours,
            minutes,
            seconds,
        })
    }
}

/// Calendar-free decomposition of a non-negative [`Remaining`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    /// Whole days.
    pub days: i64,
    /// Hours past the whole days (`0..24`).
    pub hours: i64,
    /// Minutes past the whole hours (`0..60`).
    pub minutes: i64,
    /// Seconds past the whole minutes (`0..60`).
    pub seconds: i64,
}

impl TimeParts {
    /// Re-sum the parts into whole seconds.
    pub fn total_seconds(self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/duration.rs"]
mod tests;
