// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Transfer handler tests.

use swim_sched_domain::{AttendanceStatus, EnrollmentStatus};

use crate::error::ApiError;
use crate::handlers::{create_term_with_schedule, transfer_enrollment};
use crate::request_response::TransferEnrollmentRequest;
use crate::tests::helpers::{admin, enrolled_student, persistence, template_input, term_request};

fn transfer_request(enrollment_id: i64, target_offering_id: i64) -> TransferEnrollmentRequest {
    TransferEnrollmentRequest {
        enrollment_id,
        target_offering_id,
        skipped_session_ids: Vec::new(),
        notes: Some(String::from("requested by guardian")),
    }
}

#[test]
fn transfer_reports_remapped_history() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request(
            "Winter 2026",
            vec![
                template_input("Mondays", 1, "16:00", 4),
                template_input("Wednesdays", 3, "16:00", 4),
            ],
        ),
        &admin(),
    )
    .unwrap()
    .response;
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let (_, enrollment_id) = enrolled_student(&mut persistence, ("Ada", "Kim"), monday, "3:1");

    // Attendance on Monday #3; ask to skip the paired Wednesday #3 plus #5.
    let monday_sessions = persistence.sessions_for_offering(monday).unwrap();
    persistence
        .record_attendance(
            enrollment_id,
            monday_sessions[2].session_id,
            AttendanceStatus::Present,
            None,
        )
        .unwrap();
    let wednesday_sessions = persistence.sessions_for_offering(wednesday).unwrap();
    let mut request = transfer_request(enrollment_id, wednesday);
    request.skipped_session_ids = vec![
        wednesday_sessions[2].session_id,
        wednesday_sessions[4].session_id,
    ];

    let outcome =
        transfer_enrollment(&mut persistence, &request, &admin(), chrono_tz::UTC).unwrap();

    // Attendance wins on the paired session; only the other skip lands.
    assert_eq!(outcome.response.attendance_copied, 1);
    assert_eq!(outcome.response.skips_created, 1);
    assert_eq!(outcome.change.operation, "transfer_enrollment");
    assert_eq!(outcome.change.entity_id, outcome.response.new_enrollment_id);

    let old = persistence
        .enrollment_by_id(outcome.response.old_enrollment_id)
        .unwrap();
    assert_eq!(old.status, EnrollmentStatus::Transferred);
    let new = persistence
        .enrollment_by_id(outcome.response.new_enrollment_id)
        .unwrap();
    assert_eq!(new.status, EnrollmentStatus::Active);
    assert_eq!(new.offering_id, wednesday);
}

#[test]
fn transfer_conflicts_surface_as_conflicts() {
    let mut persistence = persistence();
    let created = create_term_with_schedule(
        &mut persistence,
        &term_request(
            "Winter 2026",
            vec![
                template_input("Mondays", 1, "16:00", 4),
                template_input("Wednesdays", 3, "16:00", 4),
            ],
        ),
        &admin(),
    )
    .unwrap()
    .response;
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let (student_id, enrollment_id) =
        enrolled_student(&mut persistence, ("Ada", "Kim"), monday, "3:1");

    // The student already holds a Wednesday enrollment.
    persistence
        .create_enrollment(
            student_id,
            wednesday,
            &swim_sched_domain::ClassRatio::from_label("3:1"),
            crate::tests::helpers::date(2026, 1, 1),
            None,
        )
        .unwrap();

    let err = transfer_enrollment(
        &mut persistence,
        &transfer_request(enrollment_id, wednesday),
        &admin(),
        chrono_tz::UTC,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));

    let err = transfer_enrollment(
        &mut persistence,
        &transfer_request(999, wednesday),
        &admin(),
        chrono_tz::UTC,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
