// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input shape validation for the scheduling engine.
//!
//! These checks run at the api boundary before any write; a failure here
//! never reaches the store.

use chrono::NaiveDate;

use crate::error::DomainError;
use crate::types::{TimeOfDay, Weekday};

/// Validates a 0-based weekday index (0 = Sunday).
///
/// # Errors
///
/// Returns an error if the index is outside 0..=6.
pub fn validate_weekday_index(index: i64) -> Result<Weekday, DomainError> {
    Weekday::new(index)
}

/// Validates a strict `HH:MM` time string.
///
/// # Errors
///
/// Returns an error if the string does not match the shape.
pub fn validate_time_of_day(value: &str) -> Result<TimeOfDay, DomainError> {
    TimeOfDay::parse(value)
}

/// Validates that a term's end date does not precede its start date.
///
/// # Errors
///
/// Returns an error if `end` is before `start`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates a class duration in minutes.
///
/// # Errors
///
/// Returns an error if the duration is zero or negative.
pub fn validate_duration(minutes: i64) -> Result<(), DomainError> {
    if minutes <= 0 {
        return Err(DomainError::InvalidDuration { minutes });
    }
    Ok(())
}

/// Validates the per-offering session cap.
///
/// # Errors
///
/// Returns an error if the count is zero or negative.
pub fn validate_week_count(count: i64) -> Result<u32, DomainError> {
    u32::try_from(count)
        .ok()
        .filter(|c| *c > 0)
        .ok_or(DomainError::InvalidWeekCount { count })
}
