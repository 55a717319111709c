// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Enrollment transfer tests.

use swim_sched_domain::{AttendanceStatus, DomainError, EnrollmentStatus};

use crate::tests::helpers::{
    create_default_term, date, enroll, persistence, spec, student, template,
};
use crate::{Persistence, PersistenceError, TransferCommand};

fn command(enrollment_id: i64, target_offering_id: i64) -> TransferCommand {
    TransferCommand {
        enrollment_id,
        target_offering_id,
        skipped_session_ids: Vec::new(),
        notes: Some(String::from("family moved to Wednesdays")),
        transfer_date: date(2026, 1, 20),
        transferred_at: String::from("2026-01-20T15:04:05Z"),
    }
}

fn session_id_at(persistence: &mut Persistence, offering_id: i64, index: usize) -> i64 {
    persistence.sessions_for_offering(offering_id).unwrap()[index].session_id
}

#[test]
fn transfer_moves_the_enrollment_and_links_both_sides() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "2:1");

    let outcome = persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap();

    let old = persistence.enrollment_by_id(outcome.old_enrollment_id).unwrap();
    assert_eq!(old.status, EnrollmentStatus::Transferred);
    assert_eq!(old.transferred_to_id, Some(outcome.new_enrollment_id));
    assert_eq!(old.transferred_at.as_deref(), Some("2026-01-20T15:04:05Z"));
    assert_eq!(old.end_date, Some(date(2026, 1, 20)));
    assert_eq!(old.notes.as_deref(), Some("family moved to Wednesdays"));

    let new = persistence.enrollment_by_id(outcome.new_enrollment_id).unwrap();
    assert_eq!(new.status, EnrollmentStatus::Active);
    assert_eq!(new.offering_id, wednesday);
    assert_eq!(new.student_id, s);
    assert_eq!(new.class_ratio.as_str(), "2:1");
    assert_eq!(new.transferred_from_id, Some(enrollment));
    assert_eq!(new.enroll_date, date(2026, 1, 20));
}

#[test]
fn attendance_copies_by_session_index_and_beats_requested_skips() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");

    // Attendance on Monday session #2 (index 1).
    let old_second = session_id_at(&mut persistence, monday, 1);
    persistence
        .record_attendance(enrollment, old_second, AttendanceStatus::Present, Some("strong kick"))
        .unwrap();

    // The caller asks to skip the paired Wednesday session #2 and also #6.
    let new_second = session_id_at(&mut persistence, wednesday, 1);
    let new_sixth = session_id_at(&mut persistence, wednesday, 5);
    let mut cmd = command(enrollment, wednesday);
    cmd.skipped_session_ids = vec![new_second, new_sixth];

    let outcome = persistence.transfer_enrollment(&cmd).unwrap();
    assert_eq!(outcome.attendance_copied, 1);
    // Attendance wins over the requested skip on the paired session.
    assert_eq!(outcome.skips_created, 1);

    let bundle = persistence.load_day_bundle(date(2026, 1, 14)).unwrap();
    let copied = bundle
        .attendance
        .iter()
        .find(|a| a.enrollment_id == outcome.new_enrollment_id)
        .unwrap();
    assert_eq!(copied.class_session_id, new_second);
    assert_eq!(copied.status, AttendanceStatus::Present);
    assert_eq!(copied.notes.as_deref(), Some("[transferred] strong kick"));
    assert!(
        !bundle
            .skips
            .iter()
            .any(|skip| skip.class_session_id == new_second)
    );
}

#[test]
fn only_active_enrollments_transfer() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");
    persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap();

    // The source is now terminal; a second transfer is rejected.
    let err = persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap_err();
    assert_eq!(
        err,
        PersistenceError::RuleViolation(DomainError::EnrollmentNotActive {
            enrollment_id: enrollment,
            status: EnrollmentStatus::Transferred,
        })
    );
}

#[test]
fn transfers_are_same_term_only() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let other_term = persistence
        .create_term_with_schedule(&spec(
            "Spring 2026",
            vec![template("Spring Mondays", 1, "16:00", 30, 3, 1)],
        ))
        .unwrap();

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");

    let err = persistence
        .transfer_enrollment(&command(enrollment, other_term.offerings[0].offering_id))
        .unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::RuleViolation(DomainError::TermMismatch { .. })
    ));
}

#[test]
fn existing_enrollment_in_target_blocks_transfer() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");
    enroll(&mut persistence, s, wednesday, "3:1");

    let err = persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap_err();
    assert_eq!(
        err,
        PersistenceError::RuleViolation(DomainError::DuplicateEnrollment {
            student_id: s,
            offering_id: wednesday,
        })
    );

    // The source enrollment is untouched.
    let source = persistence.enrollment_by_id(enrollment).unwrap();
    assert_eq!(source.status, EnrollmentStatus::Active);
    assert_eq!(source.transferred_to_id, None);
}

#[test]
fn missing_enrollment_or_target_is_not_found() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;

    let err = persistence
        .transfer_enrollment(&command(999, monday))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");
    let err = persistence
        .transfer_enrollment(&command(enrollment, 999))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn invoice_line_items_follow_the_transfer() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");
    persistence
        .add_invoice_line_item(enrollment, "Winter 2026 tuition", 18_000)
        .unwrap();

    let outcome = persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap();
    assert_eq!(outcome.invoice_items_relinked, 1);
    assert_eq!(persistence.invoice_line_item_count(enrollment).unwrap(), 0);
    assert_eq!(
        persistence
            .invoice_line_item_count(outcome.new_enrollment_id)
            .unwrap(),
        1
    );
}

#[test]
fn mismatched_session_counts_drop_trailing_attendance_silently() {
    let mut persistence = persistence();
    // Mondays get 7 occurrences before 2026-02-17, Wednesdays only 6.
    let mut uneven = spec(
        "Uneven",
        vec![
            template("Mondays", 1, "16:00", 30, 6, 1),
            template("Wednesdays", 3, "16:00", 30, 6, 1),
        ],
    );
    uneven.end_date = date(2026, 2, 17);

    let created = persistence.create_term_with_schedule(&uneven).unwrap();
    let monday = created.offerings[0].offering_id;
    let wednesday = created.offerings[1].offering_id;
    assert_eq!(created.offerings[0].session_count, 7);
    assert_eq!(created.offerings[1].session_count, 6);

    let s = student(&mut persistence, "Ada", "Kim");
    let enrollment = enroll(&mut persistence, s, monday, "3:1");

    // Attendance on the last Monday (index 6) has no Wednesday counterpart.
    let last_monday = session_id_at(&mut persistence, monday, 6);
    persistence
        .record_attendance(enrollment, last_monday, AttendanceStatus::Present, None)
        .unwrap();

    let outcome = persistence
        .transfer_enrollment(&command(enrollment, wednesday))
        .unwrap();
    assert_eq!(outcome.attendance_copied, 0);
}
