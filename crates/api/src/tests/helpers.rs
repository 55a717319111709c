// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures for API tests.

use chrono::NaiveDate;

use swim_sched_domain::ClassRatio;
use swim_sched_persistence::Persistence;

use crate::request_response::{ClassTemplateInput, CreateTermScheduleRequest};
use crate::{ResolvedStaff, StaffRole};

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn admin() -> ResolvedStaff {
    ResolvedStaff::new(1, StaffRole::Admin)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn template_input(
    title: &str,
    weekday: i64,
    start_time: &str,
    capacity: i64,
) -> ClassTemplateInput {
    ClassTemplateInput {
        title: title.to_string(),
        weekday,
        start_time: start_time.to_string(),
        duration_minutes: 30,
        capacity,
        instructor_count: Some(1),
        notes: None,
    }
}

/// A winter-term request: 2026-01-05 (a Monday) through 2026-03-01, eight
/// occurrences of every weekday.
pub fn term_request(name: &str, templates: Vec<ClassTemplateInput>) -> CreateTermScheduleRequest {
    CreateTermScheduleRequest {
        name: name.to_string(),
        slug: None,
        start_date: String::from("2026-01-05"),
        end_date: String::from("2026-03-01"),
        week_count: None,
        templates,
    }
}

pub fn enrolled_student(
    persistence: &mut Persistence,
    name: (&str, &str),
    offering_id: i64,
    ratio: &str,
) -> (i64, i64) {
    let student_id = persistence.create_student(name.0, name.1).expect("student");
    let enrollment_id = persistence
        .create_enrollment(
            student_id,
            offering_id,
            &ClassRatio::from_label(ratio),
            date(2026, 1, 1),
            None,
        )
        .expect("enrollment");
    (student_id, enrollment_id)
}
