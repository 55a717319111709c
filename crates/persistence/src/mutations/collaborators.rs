// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The narrow store surface consumed by the external record services.
//!
//! Students, enrollments, attendance, skips, and invoice line items are
//! owned by collaborator services outside the scheduling core; they reach
//! the shared store through these operations. The engine's own tests seed
//! fixtures the same way.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use swim_sched_domain::{
    AttendanceStatus, ClassRatio, DomainError, Enrollment, EnrollmentStatus, day_key,
};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{
    EnrollmentRow, NewAttendance, NewEnrollment, NewInvoiceLineItem, NewSkip, NewStudent,
};
use crate::diesel_schema::{
    attendance_records, enrollment_skips, enrollments, invoice_line_items, students,
};
use crate::error::PersistenceError;
use crate::Persistence;

impl Persistence {
    /// Creates a student record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn create_student(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            diesel::insert_into(students::table)
                .values(&NewStudent {
                    first_name,
                    last_name,
                })
                .execute(conn)?;
            get_last_insert_rowid(conn)
        })
    }

    /// Creates an active enrollment of a student in an offering.
    ///
    /// # Errors
    ///
    /// Returns a rule violation if the student already holds an active
    /// enrollment in the offering, or an error if the write fails.
    pub fn create_enrollment(
        &mut self,
        student_id: i64,
        offering_id: i64,
        class_ratio: &ClassRatio,
        enroll_date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let inserted = diesel::insert_into(enrollments::table)
                .values(&NewEnrollment {
                    student_id,
                    offering_id,
                    status: EnrollmentStatus::Active.as_str().to_string(),
                    enroll_date: day_key(enroll_date),
                    class_ratio: class_ratio.as_str().to_string(),
                    transferred_from_id: None,
                    notes: notes.map(ToString::to_string),
                })
                .execute(conn);
            match inserted {
                Ok(_) => get_last_insert_rowid(conn),
                Err(diesel::result::Error::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    _,
                )) => Err(PersistenceError::RuleViolation(
                    DomainError::DuplicateEnrollment {
                        student_id,
                        offering_id,
                    },
                )),
                Err(other) => Err(other.into()),
            }
        })
    }

    /// Records attendance for an enrollment at a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails, including a uniqueness violation
    /// when attendance for the pair already exists.
    pub fn record_attendance(
        &mut self,
        enrollment_id: i64,
        class_session_id: i64,
        status: AttendanceStatus,
        notes: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            diesel::insert_into(attendance_records::table)
                .values(&NewAttendance {
                    enrollment_id,
                    class_session_id,
                    status: status.as_str().to_string(),
                    notes: notes.map(ToString::to_string),
                })
                .execute(conn)?;
            get_last_insert_rowid(conn)
        })
    }

    /// Records a per-session skip for an enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails, including a uniqueness violation
    /// when the pair is already skipped.
    pub fn record_skip(
        &mut self,
        enrollment_id: i64,
        class_session_id: i64,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            diesel::insert_into(enrollment_skips::table)
                .values(&NewSkip {
                    enrollment_id,
                    class_session_id,
                })
                .execute(conn)?;
            get_last_insert_rowid(conn)
        })
    }

    /// Adds an invoice line item against an enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_invoice_line_item(
        &mut self,
        enrollment_id: i64,
        description: &str,
        amount_cents: i64,
    ) -> Result<i64, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            diesel::insert_into(invoice_line_items::table)
                .values(&NewInvoiceLineItem {
                    enrollment_id,
                    description,
                    amount_cents,
                })
                .execute(conn)?;
            get_last_insert_rowid(conn)
        })
    }

    /// Loads an enrollment by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such enrollment exists, or an error if the
    /// query fails.
    pub fn enrollment_by_id(
        &mut self,
        enrollment_id: i64,
    ) -> Result<Enrollment, PersistenceError> {
        self.conn.transaction(|conn| {
            enrollments::table
                .find(enrollment_id)
                .select(EnrollmentRow::as_select())
                .first::<EnrollmentRow>(conn)
                .optional()?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!("Enrollment {enrollment_id} not found"))
                })?
                .into_domain()
        })
    }

    /// Counts the invoice line items held against an enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn invoice_line_item_count(
        &mut self,
        enrollment_id: i64,
    ) -> Result<i64, PersistenceError> {
        self.conn.transaction(|conn| {
            Ok(invoice_line_items::table
                .filter(invoice_line_items::enrollment_id.eq(enrollment_id))
                .count()
                .get_result(conn)?)
        })
    }
}
