// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Seat-availability guard and booking tests.
//!
//! The fixture term's Monday offering meets 2026-01-05, -12, -19, … with
//! base capacity 3 and one instructor.

use swim_sched_domain::{DomainError, MakeUpStatus};

use crate::PersistenceError;
use crate::tests::helpers::{
    create_default_term, date, enroll, persistence, spec, student, template,
};

#[test]
fn make_up_booking_succeeds_with_open_seat() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let visitor = student(&mut persistence, "Mara", "Voss");
    let booking = persistence
        .book_make_up(visitor, monday, date(2026, 1, 12), Some("missed week one"))
        .unwrap();

    assert_eq!(booking.status, MakeUpStatus::Scheduled);
    assert_eq!(booking.student_id, visitor);

    let usage = persistence.seat_usage(monday, date(2026, 1, 12)).unwrap();
    assert_eq!(usage.session_id, booking.class_session_id);
    assert!((usage.figures.filled - 1.0).abs() < f64::EPSILON);
    assert_eq!(usage.figures.open_seats, 2);
}

#[test]
fn duplicate_make_up_is_a_clean_conflict() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let visitor = student(&mut persistence, "Mara", "Voss");
    let first = persistence
        .book_make_up(visitor, monday, date(2026, 1, 12), None)
        .unwrap();

    let err = persistence
        .book_make_up(visitor, monday, date(2026, 1, 12), None)
        .unwrap_err();
    assert_eq!(
        err,
        PersistenceError::RuleViolation(DomainError::DuplicateMakeUpBooking {
            student_id: visitor,
            session_id: first.class_session_id,
        })
    );

    // Occupancy was not incremented twice.
    let usage = persistence.seat_usage(monday, date(2026, 1, 12)).unwrap();
    assert!((usage.figures.filled - 1.0).abs() < f64::EPSILON);
}

#[test]
fn full_session_rejects_make_up() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    for (first, last) in [("Ada", "Kim"), ("Ben", "Li"), ("Cleo", "Tran")] {
        let s = student(&mut persistence, first, last);
        enroll(&mut persistence, s, monday, "3:1");
    }

    let visitor = student(&mut persistence, "Mara", "Voss");
    let err = persistence
        .book_make_up(visitor, monday, date(2026, 1, 12), None)
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::RuleViolation(DomainError::InsufficientSeats { .. })
    ));
}

#[test]
fn skip_frees_a_seat_for_a_make_up() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let mut enrollment_ids = Vec::new();
    for (first, last) in [("Ada", "Kim"), ("Ben", "Li"), ("Cleo", "Tran")] {
        let s = student(&mut persistence, first, last);
        enrollment_ids.push(enroll(&mut persistence, s, monday, "3:1"));
    }

    // Ada skips the Jan 12 session.
    let sessions = persistence.sessions_for_offering(monday).unwrap();
    let jan12 = sessions
        .iter()
        .find(|s| s.session_date == date(2026, 1, 12))
        .unwrap();
    persistence
        .record_skip(enrollment_ids[0], jan12.session_id)
        .unwrap();

    let visitor = student(&mut persistence, "Mara", "Voss");
    let booking = persistence
        .book_make_up(visitor, monday, date(2026, 1, 12), None)
        .unwrap();
    assert_eq!(booking.class_session_id, jan12.session_id);
}

#[test]
fn weighted_private_lesson_fills_faster_than_headcount() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    // One private enrollment weighs 3.0 against capacity 3.
    let s = student(&mut persistence, "Ada", "Kim");
    enroll(&mut persistence, s, monday, "1:1");

    let usage = persistence.seat_usage(monday, date(2026, 1, 5)).unwrap();
    assert!((usage.figures.filled - 3.0).abs() < f64::EPSILON);
    assert!(usage.figures.is_full());

    let visitor = student(&mut persistence, "Mara", "Voss");
    let err = persistence
        .book_make_up(visitor, monday, date(2026, 1, 5), None)
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::RuleViolation(DomainError::InsufficientSeats { .. })
    ));
}

#[test]
fn two_instructor_floor_admits_past_base_capacity() {
    let mut persistence = persistence();
    let created = persistence
        .create_term_with_schedule(&spec(
            "Floor Term",
            vec![template("Staffed Up", 1, "10:00", 30, 2, 2)],
        ))
        .unwrap();
    let offering = created.offerings[0].offering_id;

    // Base capacity 2 but two instructors: effective capacity 5.
    for (first, last) in [("Ada", "Kim"), ("Ben", "Li"), ("Cleo", "Tran"), ("Dev", "Rao")] {
        let s = student(&mut persistence, first, last);
        enroll(&mut persistence, s, offering, "3:1");
    }

    let fifth = student(&mut persistence, "Eli", "Nash");
    persistence
        .book_make_up(fifth, offering, date(2026, 1, 12), None)
        .unwrap();

    // Weighted fill is now 5 of 5; the next request is rejected.
    let sixth = student(&mut persistence, "Fay", "Osei");
    let err = persistence
        .book_make_up(sixth, offering, date(2026, 1, 12), None)
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::RuleViolation(DomainError::InsufficientSeats { .. })
    ));
}

#[test]
fn same_day_enrollment_blocks_make_up() {
    let mut persistence = persistence();
    let created = persistence
        .create_term_with_schedule(&spec(
            "Conflicts",
            vec![
                template("Monday Early", 1, "09:00", 30, 4, 1),
                template("Monday Late", 1, "17:00", 30, 4, 1),
            ],
        ))
        .unwrap();
    let early = created.offerings[0].offering_id;
    let late = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, early, "3:1");

    // The student already owes attendance that Monday, regardless of slot.
    assert!(persistence.has_time_conflict(s, date(2026, 1, 12)).unwrap());
    let err = persistence
        .book_make_up(s, late, date(2026, 1, 12), None)
        .unwrap_err();
    assert_eq!(
        err,
        PersistenceError::RuleViolation(DomainError::ScheduleConflict {
            student_id: s,
            date: date(2026, 1, 12),
        })
    );

    // Skipping the early session clears the collision.
    let sessions = persistence.sessions_for_offering(early).unwrap();
    let jan12 = sessions
        .iter()
        .find(|sess| sess.session_date == date(2026, 1, 12))
        .unwrap();
    persistence.record_skip(enrollment, jan12.session_id).unwrap();

    assert!(!persistence.has_time_conflict(s, date(2026, 1, 12)).unwrap());
    persistence
        .book_make_up(s, late, date(2026, 1, 12), None)
        .unwrap();
}

#[test]
fn excused_attendance_frees_a_seat_like_a_skip() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let mut enrollment_ids = Vec::new();
    for (first, last) in [("Ada", "Kim"), ("Ben", "Li"), ("Cleo", "Tran")] {
        let s = student(&mut persistence, first, last);
        enrollment_ids.push(enroll(&mut persistence, s, monday, "3:1"));
    }

    let sessions = persistence.sessions_for_offering(monday).unwrap();
    let jan19 = sessions
        .iter()
        .find(|s| s.session_date == date(2026, 1, 19))
        .unwrap();
    persistence
        .record_attendance(
            enrollment_ids[1],
            jan19.session_id,
            swim_sched_domain::AttendanceStatus::Excused,
            None,
        )
        .unwrap();

    let usage = persistence.seat_usage(monday, date(2026, 1, 19)).unwrap();
    assert!((usage.figures.filled - 2.0).abs() < f64::EPSILON);
    assert_eq!(usage.figures.open_seats, 1);
}

#[test]
fn trial_booking_passes_the_same_seat_gate() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let trial = persistence
        .book_trial(monday, date(2026, 1, 5), "Noa Vale", Some(6), Some("555-0142"))
        .unwrap();
    assert_eq!(trial.child_name, "Noa Vale");

    // Fill every weighted seat, then the gate closes for trials too.
    for (first, last) in [("Ada", "Kim"), ("Ben", "Li"), ("Cleo", "Tran")] {
        let s = student(&mut persistence, first, last);
        enroll(&mut persistence, s, monday, "3:1");
    }
    let err = persistence
        .book_trial(monday, date(2026, 1, 5), "Rio Sand", None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::RuleViolation(DomainError::InsufficientSeats { .. })
    ));
}

#[test]
fn booking_against_a_missing_session_is_not_found() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let visitor = student(&mut persistence, "Mara", "Voss");
    // A Tuesday: the Monday offering has no session there.
    let err = persistence
        .book_make_up(visitor, monday, date(2026, 1, 13), None)
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}
