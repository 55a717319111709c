// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use crate::error::DomainError;
use crate::validation::{
    validate_date_range, validate_duration, validate_time_of_day, validate_week_count,
    validate_weekday_index,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn weekday_index_bounds() {
    assert!(validate_weekday_index(0).is_ok());
    assert!(validate_weekday_index(6).is_ok());
    assert_eq!(
        validate_weekday_index(7).unwrap_err(),
        DomainError::InvalidWeekday(7)
    );
    assert_eq!(
        validate_weekday_index(-3).unwrap_err(),
        DomainError::InvalidWeekday(-3)
    );
}

#[test]
fn time_shape_is_strict() {
    assert!(validate_time_of_day("16:45").is_ok());
    assert_eq!(
        validate_time_of_day("16:5").unwrap_err(),
        DomainError::InvalidTimeOfDay(String::from("16:5"))
    );
}

#[test]
fn date_range_rejects_inverted_bounds() {
    assert!(validate_date_range(date(2026, 1, 5), date(2026, 3, 1)).is_ok());
    assert!(validate_date_range(date(2026, 1, 5), date(2026, 1, 5)).is_ok());
    assert_eq!(
        validate_date_range(date(2026, 3, 1), date(2026, 1, 5)).unwrap_err(),
        DomainError::InvalidDateRange {
            start: date(2026, 3, 1),
            end: date(2026, 1, 5),
        }
    );
}

#[test]
fn duration_must_be_positive() {
    assert!(validate_duration(30).is_ok());
    assert!(validate_duration(0).is_err());
    assert!(validate_duration(-15).is_err());
}

#[test]
fn week_count_must_be_positive() {
    assert_eq!(validate_week_count(8).unwrap(), 8);
    assert!(validate_week_count(0).is_err());
    assert!(validate_week_count(-1).is_err());
}
