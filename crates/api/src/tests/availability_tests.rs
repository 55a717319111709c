// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Seat-availability check and booking handler tests.

use crate::error::ApiError;
use crate::handlers::{
    book_make_up, book_trial, check_make_up_availability, create_term_with_schedule,
};
use crate::request_response::{
    BookMakeUpRequest, BookTrialRequest, MakeUpAvailabilityRequest,
};
use crate::tests::helpers::{admin, enrolled_student, persistence, template_input, term_request};

fn availability(student_id: i64, offering_id: i64, date: &str) -> MakeUpAvailabilityRequest {
    MakeUpAvailabilityRequest {
        student_id,
        offering_id,
        date: date.to_string(),
    }
}

fn booking(student_id: i64, offering_id: i64, date: &str) -> BookMakeUpRequest {
    BookMakeUpRequest {
        student_id,
        offering_id,
        date: date.to_string(),
        notes: None,
    }
}

#[test]
fn availability_reports_weighted_figures_with_floor() {
    let mut persistence = persistence();
    // Base capacity 2 with two instructors: effective capacity 5.
    let mut request = term_request("Winter 2026", vec![template_input("Staffed", 1, "10:00", 2)]);
    request.templates[0].instructor_count = Some(2);
    let created = create_term_with_schedule(&mut persistence, &request, &admin())
        .unwrap()
        .response;
    let offering_id = created.offerings[0].offering_id;

    enrolled_student(&mut persistence, ("Ada", "Kim"), offering_id, "1:1");

    let visitor = persistence.create_student("Mara", "Voss").unwrap();
    let response =
        check_make_up_availability(&mut persistence, &availability(visitor, offering_id, "2026-01-12"))
            .unwrap();

    assert!((response.filled - 3.0).abs() < f64::EPSILON);
    assert_eq!(response.effective_capacity, 5);
    assert_eq!(response.open_seats, 2);
    assert!(!response.has_time_conflict);
    assert!(response.bookable);
}

#[test]
fn availability_flags_same_day_conflicts() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request(
            "Winter 2026",
            vec![
                template_input("Early", 1, "09:00", 4),
                template_input("Late", 1, "17:00", 4),
            ],
        ),
        &admin(),
    )
    .unwrap()
    .response;
    let early = created.offerings[0].offering_id;
    let late = created.offerings[1].offering_id;

    let (student_id, _) = enrolled_student(&mut persistence, ("Ada", "Kim"), early, "3:1");

    let response =
        check_make_up_availability(&mut persistence, &availability(student_id, late, "2026-01-12"))
            .unwrap();
    assert!(response.has_time_conflict);
    assert!(!response.bookable);
    assert_eq!(response.open_seats, 4);
}

#[test]
fn booking_then_duplicate_is_a_conflict() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request("Winter 2026", vec![template_input("Beginners", 1, "16:00", 4)]),
        &admin(),
    )
    .unwrap()
    .response;
    let offering_id = created.offerings[0].offering_id;

    let visitor = persistence.create_student("Mara", "Voss").unwrap();
    let outcome = book_make_up(
        &mut persistence,
        &booking(visitor, offering_id, "2026-01-12"),
        &admin(),
    )
    .unwrap();
    assert_eq!(outcome.response.status, "scheduled");
    assert_eq!(outcome.change.entity, "makeup_booking");

    let err = book_make_up(
        &mut persistence,
        &booking(visitor, offering_id, "2026-01-12"),
        &admin(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));

    // Occupancy counted the booking once.
    let response =
        check_make_up_availability(&mut persistence, &availability(visitor, offering_id, "2026-01-12"))
            .unwrap();
    assert!((response.filled - 1.0).abs() < f64::EPSILON);
}

#[test]
fn full_sessions_are_not_bookable() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request("Winter 2026", vec![template_input("Beginners", 1, "16:00", 2)]),
        &admin(),
    )
    .unwrap()
    .response;
    let offering_id = created.offerings[0].offering_id;

    enrolled_student(&mut persistence, ("Ada", "Kim"), offering_id, "3:1");
    enrolled_student(&mut persistence, ("Ben", "Li"), offering_id, "3:1");

    let visitor = persistence.create_student("Mara", "Voss").unwrap();
    let response =
        check_make_up_availability(&mut persistence, &availability(visitor, offering_id, "2026-01-12"))
            .unwrap();
    assert_eq!(response.open_seats, 0);
    assert!(!response.bookable);

    let err = book_make_up(
        &mut persistence,
        &booking(visitor, offering_id, "2026-01-12"),
        &admin(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn missing_session_is_not_found_and_bad_date_is_invalid() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request("Winter 2026", vec![template_input("Beginners", 1, "16:00", 4)]),
        &admin(),
    )
    .unwrap()
    .response;
    let offering_id = created.offerings[0].offering_id;
    let visitor = persistence.create_student("Mara", "Voss").unwrap();

    // A Tuesday: the Monday offering has no session there.
    let err =
        check_make_up_availability(&mut persistence, &availability(visitor, offering_id, "2026-01-13"))
            .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    let err = book_make_up(
        &mut persistence,
        &booking(visitor, offering_id, "not-a-date"),
        &admin(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "date"
    ));
}

#[test]
fn trial_booking_requires_a_child_name() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request("Winter 2026", vec![template_input("Beginners", 1, "16:00", 4)]),
        &admin(),
    )
    .unwrap()
    .response;
    let offering_id = created.offerings[0].offering_id;

    let mut request = BookTrialRequest {
        offering_id,
        date: String::from("2026-01-12"),
        child_name: String::from("  "),
        child_age: Some(5),
        contact_phone: None,
    };
    let err = book_trial(&mut persistence, &request, &admin()).unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "child_name"
    ));

    request.child_name = String::from("Noa Vale");
    let outcome = book_trial(&mut persistence, &request, &admin()).unwrap();
    assert_eq!(outcome.response.status, "scheduled");
    assert!(outcome.change.summary.contains("Noa Vale"));
}
