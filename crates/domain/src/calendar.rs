// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly date sequencing in a fixed civil timezone.
//!
//! The schedule calendar is civil: a session happens on a `YYYY-MM-DD` date
//! in the school's IANA timezone, never at an instant. Incoming instants are
//! resolved to civil dates with an explicit [`chrono_tz::Tz`] parameter; no
//! ambient or process-default zone is consulted.
//!
//! ## Invariants
//!
//! - The first produced date is the first occurrence of the target weekday on
//!   or after the range start (the start itself when it already matches).
//! - Consecutive dates are exactly 7 calendar days apart.
//! - Termination compares `YYYY-MM-DD` day-key strings lexicographically, not
//!   numeric dates. Zero-padded day keys order identically to their dates,
//!   and string comparison stays immune to offset artifacts when the bounds
//!   were resolved from instants near midnight.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::DomainError;
use crate::types::Weekday;

/// Formats a civil date as its `YYYY-MM-DD` day key.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` day key into a civil date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_civil_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Resolves an instant to the civil date observed in `tz`.
#[must_use]
pub fn civil_date_in_zone(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    tz.from_utc_datetime(&instant.naive_utc()).date_naive()
}

/// A lazy, finite, restartable sequence of weekly calendar dates.
///
/// Produces every occurrence of one weekday from `start` through `end`
/// inclusive, stepping 7 days at a time. `Clone` restarts the sequence from
/// the beginning.
#[derive(Debug, Clone)]
pub struct WeeklyDates {
    next: NaiveDate,
    end_key: String,
}

impl WeeklyDates {
    /// Creates the sequence of `weekday` occurrences in `[start, end]`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> Self {
        let offset = weekday.days_from(start.weekday());
        Self {
            next: start + Duration::days(i64::from(offset)),
            end_key: day_key(end),
        }
    }
}

impl Iterator for WeeklyDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if day_key(self.next) > self.end_key {
            return None;
        }
        let produced = self.next;
        self.next = produced + Duration::days(7);
        Some(produced)
    }
}
