// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared fixtures for persistence tests.
//!
//! The default fixture term runs 2026-01-05 (a Monday) through 2026-03-01,
//! which holds exactly eight occurrences of every weekday.

use chrono::NaiveDate;

use swim_sched_domain::{ClassRatio, ClassTemplate, TermScheduleSpec, TimeOfDay, Weekday};

use crate::{CreatedTermSchedule, Persistence};

pub fn persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn template(
    title: &str,
    weekday: i64,
    start: &str,
    duration_minutes: i64,
    capacity: i64,
    instructor_count: i64,
) -> ClassTemplate {
    ClassTemplate {
        title: title.to_string(),
        weekday: Weekday::new(weekday).unwrap(),
        start_time: TimeOfDay::parse(start).unwrap(),
        duration_minutes,
        capacity,
        instructor_count,
        notes: None,
    }
}

pub fn spec(name: &str, templates: Vec<ClassTemplate>) -> TermScheduleSpec {
    TermScheduleSpec {
        name: name.to_string(),
        slug: None,
        start_date: date(2026, 1, 5),
        end_date: date(2026, 3, 1),
        week_count: 8,
        templates,
        created_by: 1,
    }
}

pub fn create_default_term(persistence: &mut Persistence) -> CreatedTermSchedule {
    persistence
        .create_term_with_schedule(&spec(
            "Winter 2026",
            vec![
                template("Monday Beginners", 1, "16:00", 30, 3, 1),
                template("Wednesday Beginners", 3, "16:00", 30, 3, 1),
            ],
        ))
        .expect("fixture term")
}

pub fn student(persistence: &mut Persistence, first: &str, last: &str) -> i64 {
    persistence.create_student(first, last).expect("student")
}

pub fn enroll(
    persistence: &mut Persistence,
    student_id: i64,
    offering_id: i64,
    ratio: &str,
) -> i64 {
    persistence
        .create_enrollment(
            student_id,
            offering_id,
            &ClassRatio::from_label(ratio),
            date(2026, 1, 1),
            None,
        )
        .expect("enrollment")
}
