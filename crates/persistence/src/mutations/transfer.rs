// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment transfer between two offerings of one term.
//!
//! Sessions of the source and target offerings are paired positionally by
//! date-ascending index (old session #k maps to new session #k). This is an
//! index-alignment heuristic assuming congruent weekly cadences, not a
//! date-equality match. A count mismatch is NOT rejected: trailing old
//! sessions' attendance is silently dropped and trailing new sessions are
//! touched only by the caller's skip set. See DESIGN.md for the recorded
//! risk.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use diesel::prelude::*;
use tracing::{debug, info};

use swim_sched_domain::{DomainError, EnrollmentStatus, day_key};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{AttendanceRow, EnrollmentRow, NewAttendance, NewEnrollment, NewSkip};
use crate::diesel_schema::{attendance_records, enrollment_skips, enrollments, invoice_line_items};
use crate::error::PersistenceError;
use crate::queries::{offerings, sessions};
use crate::Persistence;

/// Note prefix marking attendance rows copied by a transfer.
const TRANSFER_NOTE_MARKER: &str = "[transferred]";

/// A validated enrollment-transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    /// The enrollment to move.
    pub enrollment_id: i64,
    /// The offering to move it to.
    pub target_offering_id: i64,
    /// Target-offering sessions the student will not attend.
    pub skipped_session_ids: Vec<i64>,
    /// Notes recorded on the closed-out source enrollment.
    pub notes: Option<String>,
    /// Civil date the new enrollment takes effect.
    pub transfer_date: NaiveDate,
    /// RFC 3339 timestamp recorded on the source enrollment.
    pub transferred_at: String,
}

/// The result of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// The closed-out source enrollment.
    pub old_enrollment_id: i64,
    /// The newly created enrollment.
    pub new_enrollment_id: i64,
    /// Attendance rows copied onto paired target sessions.
    pub attendance_copied: usize,
    /// Skip rows created from the caller's skip set.
    pub skips_created: usize,
    /// Invoice line items re-linked to the new enrollment.
    pub invoice_items_relinked: usize,
}

impl Persistence {
    /// Moves an active enrollment to another offering of the same term,
    /// remapping attendance and skips session-by-session, atomically.
    ///
    /// Attendance takes precedence over skips: a paired target session that
    /// receives a copied attendance row is removed from the caller's skip
    /// set before skips are created.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing enrollment or target offering, a
    /// rule violation when the enrollment is not active, the terms differ,
    /// or the student already has an enrollment in the target offering, or
    /// an error if a write fails — in every case neither enrollment is
    /// mutated.
    pub fn transfer_enrollment(
        &mut self,
        command: &TransferCommand,
    ) -> Result<TransferOutcome, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let source = enrollment_row(conn, command.enrollment_id)?;
            let source_status: EnrollmentStatus = source
                .status
                .parse()
                .map_err(PersistenceError::RuleViolation)?;
            if source_status != EnrollmentStatus::Active {
                return Err(PersistenceError::RuleViolation(
                    DomainError::EnrollmentNotActive {
                        enrollment_id: source.enrollment_id,
                        status: source_status,
                    },
                ));
            }

            let source_offering = offerings::offering_by_id(conn, source.offering_id)?;
            let target_offering =
                offerings::offering_by_id(conn, command.target_offering_id)?;
            if target_offering.term_id != source_offering.term_id {
                return Err(PersistenceError::RuleViolation(DomainError::TermMismatch {
                    source_offering_id: source_offering.offering_id,
                    target_offering_id: target_offering.offering_id,
                }));
            }

            let existing: Option<i64> = enrollments::table
                .filter(enrollments::student_id.eq(source.student_id))
                .filter(enrollments::offering_id.eq(target_offering.offering_id))
                .select(enrollments::enrollment_id)
                .first::<i64>(conn)
                .optional()?;
            if existing.is_some() {
                return Err(PersistenceError::RuleViolation(
                    DomainError::DuplicateEnrollment {
                        student_id: source.student_id,
                        offering_id: target_offering.offering_id,
                    },
                ));
            }

            let old_sessions =
                sessions::sessions_for_offering_ordered(conn, source_offering.offering_id)?;
            let new_sessions =
                sessions::sessions_for_offering_ordered(conn, target_offering.offering_id)?;

            diesel::insert_into(enrollments::table)
                .values(&NewEnrollment {
                    student_id: source.student_id,
                    offering_id: target_offering.offering_id,
                    status: EnrollmentStatus::Active.as_str().to_string(),
                    enroll_date: day_key(command.transfer_date),
                    class_ratio: source.class_ratio.clone(),
                    transferred_from_id: Some(source.enrollment_id),
                    notes: None,
                })
                .execute(conn)?;
            let new_enrollment_id = get_last_insert_rowid(conn)?;

            // Attendance of the source enrollment, keyed by its session.
            let attendance: Vec<AttendanceRow> = attendance_records::table
                .filter(attendance_records::enrollment_id.eq(source.enrollment_id))
                .select(AttendanceRow::as_select())
                .load(conn)?;
            let by_old_session: HashMap<i64, &AttendanceRow> = attendance
                .iter()
                .map(|row| (row.class_session_id, row))
                .collect();

            let mut skip_set: HashSet<i64> =
                command.skipped_session_ids.iter().copied().collect();

            let mut attendance_copied = 0usize;
            for (old, new) in old_sessions.iter().zip(new_sessions.iter()) {
                let Some(record) = by_old_session.get(&old.session_id) else {
                    continue;
                };
                let notes = match &record.notes {
                    Some(existing) => format!("{TRANSFER_NOTE_MARKER} {existing}"),
                    None => TRANSFER_NOTE_MARKER.to_string(),
                };
                diesel::insert_into(attendance_records::table)
                    .values(&NewAttendance {
                        enrollment_id: new_enrollment_id,
                        class_session_id: new.session_id,
                        status: record.status.clone(),
                        notes: Some(notes),
                    })
                    .execute(conn)?;
                // Attendance takes precedence over a requested skip.
                skip_set.remove(&new.session_id);
                attendance_copied += 1;
            }

            let mut skips_created = 0usize;
            for session_id in &command.skipped_session_ids {
                if !skip_set.remove(session_id) {
                    continue;
                }
                diesel::insert_into(enrollment_skips::table)
                    .values(&NewSkip {
                        enrollment_id: new_enrollment_id,
                        class_session_id: *session_id,
                    })
                    .execute(conn)?;
                skips_created += 1;
            }

            diesel::update(
                enrollments::table.filter(enrollments::enrollment_id.eq(source.enrollment_id)),
            )
            .set((
                enrollments::status.eq(EnrollmentStatus::Transferred.as_str()),
                enrollments::transferred_to_id.eq(Some(new_enrollment_id)),
                enrollments::transferred_at.eq(Some(command.transferred_at.clone())),
                enrollments::end_date.eq(Some(day_key(command.transfer_date))),
                enrollments::notes.eq(command.notes.clone()),
            ))
            .execute(conn)?;

            let invoice_items_relinked = diesel::update(
                invoice_line_items::table
                    .filter(invoice_line_items::enrollment_id.eq(source.enrollment_id)),
            )
            .set(invoice_line_items::enrollment_id.eq(new_enrollment_id))
            .execute(conn)?;

            debug!(
                old_enrollment_id = source.enrollment_id,
                new_enrollment_id,
                attendance_copied,
                skips_created,
                invoice_items_relinked,
                "Remapped enrollment history"
            );
            info!(
                old_enrollment_id = source.enrollment_id,
                new_enrollment_id,
                target_offering_id = target_offering.offering_id,
                "Transferred enrollment"
            );

            Ok(TransferOutcome {
                old_enrollment_id: source.enrollment_id,
                new_enrollment_id,
                attendance_copied,
                skips_created,
                invoice_items_relinked,
            })
        })
    }
}

fn enrollment_row(
    conn: &mut SqliteConnection,
    enrollment_id: i64,
) -> Result<EnrollmentRow, PersistenceError> {
    enrollments::table
        .find(enrollment_id)
        .select(EnrollmentRow::as_select())
        .first::<EnrollmentRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Enrollment {enrollment_id} not found")))
}
