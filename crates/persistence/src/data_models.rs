// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row and insert structs plus their domain conversions.
//!
//! Civil dates are stored as `YYYY-MM-DD` text (day keys order the same as
//! the dates they name), wall-clock times as `HH:MM` text, and lifecycle
//! statuses as their lowercase labels. Conversion failures surface as
//! [`PersistenceError::ReconstructionError`].

use std::str::FromStr;

use diesel::prelude::*;

use swim_sched_domain::{
    AttendanceRecord, AttendanceStatus, ClassOffering, ClassRatio, ClassSession, Enrollment,
    EnrollmentSkip, EnrollmentStatus, MakeUpBooking, MakeUpStatus, SessionStatus, Student, Term,
    TimeOfDay, TrialBooking, TrialStatus, Weekday, parse_civil_date,
};

use crate::diesel_schema::{
    attendance_records, class_offerings, class_sessions, enrollment_skips, enrollments,
    invoice_line_items, makeup_bookings, students, terms, trial_bookings,
};
use crate::error::PersistenceError;

fn corrupt(entity: &'static str, id: i64, err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::ReconstructionError(format!("{entity} {id}: {err}"))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = terms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermRow {
    pub term_id: i64,
    pub name: String,
    pub slug: String,
    pub start_date: String,
    pub end_date: String,
    pub created_by: i64,
}

impl TermRow {
    pub fn into_domain(self) -> Result<Term, PersistenceError> {
        Ok(Term {
            term_id: self.term_id,
            start_date: parse_civil_date(&self.start_date)
                .map_err(|e| corrupt("term", self.term_id, e))?,
            end_date: parse_civil_date(&self.end_date)
                .map_err(|e| corrupt("term", self.term_id, e))?,
            name: self.name,
            slug: self.slug,
            created_by: self.created_by,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = terms)]
pub struct NewTerm<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub start_date: String,
    pub end_date: String,
    pub created_by: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = class_offerings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OfferingRow {
    pub offering_id: i64,
    pub term_id: i64,
    pub title: String,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub capacity: i64,
    pub instructor_count: i64,
    pub notes: Option<String>,
}

impl OfferingRow {
    pub fn into_domain(self) -> Result<ClassOffering, PersistenceError> {
        Ok(ClassOffering {
            offering_id: self.offering_id,
            term_id: self.term_id,
            weekday: Weekday::new(i64::from(self.weekday))
                .map_err(|e| corrupt("offering", self.offering_id, e))?,
            start_time: TimeOfDay::parse(&self.start_time)
                .map_err(|e| corrupt("offering", self.offering_id, e))?,
            end_time: TimeOfDay::parse(&self.end_time)
                .map_err(|e| corrupt("offering", self.offering_id, e))?,
            title: self.title,
            duration_minutes: self.duration_minutes,
            capacity: self.capacity,
            instructor_count: self.instructor_count,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = class_offerings)]
pub struct NewOffering<'a> {
    pub term_id: i64,
    pub title: &'a str,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub capacity: i64,
    pub instructor_count: i64,
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = class_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionRow {
    pub session_id: i64,
    pub offering_id: i64,
    pub session_date: String,
    pub status: String,
    pub notes: Option<String>,
}

impl SessionRow {
    pub fn into_domain(self) -> Result<ClassSession, PersistenceError> {
        Ok(ClassSession {
            session_id: self.session_id,
            offering_id: self.offering_id,
            session_date: parse_civil_date(&self.session_date)
                .map_err(|e| corrupt("session", self.session_id, e))?,
            status: SessionStatus::from_str(&self.status)
                .map_err(|e| corrupt("session", self.session_id, e))?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = class_sessions)]
pub struct NewSession {
    pub offering_id: i64,
    pub session_date: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudentRow {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl StudentRow {
    pub fn into_domain(self) -> Student {
        Student {
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudent<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EnrollmentRow {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub offering_id: i64,
    pub status: String,
    pub enroll_date: String,
    pub end_date: Option<String>,
    pub class_ratio: String,
    pub transferred_from_id: Option<i64>,
    pub transferred_to_id: Option<i64>,
    pub transferred_at: Option<String>,
    pub notes: Option<String>,
}

impl EnrollmentRow {
    pub fn into_domain(self) -> Result<Enrollment, PersistenceError> {
        let end_date = match &self.end_date {
            Some(value) => Some(
                parse_civil_date(value)
                    .map_err(|e| corrupt("enrollment", self.enrollment_id, e))?,
            ),
            None => None,
        };
        Ok(Enrollment {
            enrollment_id: self.enrollment_id,
            student_id: self.student_id,
            offering_id: self.offering_id,
            status: EnrollmentStatus::from_str(&self.status)
                .map_err(|e| corrupt("enrollment", self.enrollment_id, e))?,
            enroll_date: parse_civil_date(&self.enroll_date)
                .map_err(|e| corrupt("enrollment", self.enrollment_id, e))?,
            end_date,
            class_ratio: ClassRatio::from_label(&self.class_ratio),
            transferred_from_id: self.transferred_from_id,
            transferred_to_id: self.transferred_to_id,
            transferred_at: self.transferred_at,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub offering_id: i64,
    pub status: String,
    pub enroll_date: String,
    pub class_ratio: String,
    pub transferred_from_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = enrollment_skips)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SkipRow {
    pub skip_id: i64,
    pub enrollment_id: i64,
    pub class_session_id: i64,
}

impl SkipRow {
    pub const fn into_domain(self) -> EnrollmentSkip {
        EnrollmentSkip {
            skip_id: self.skip_id,
            enrollment_id: self.enrollment_id,
            class_session_id: self.class_session_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = enrollment_skips)]
pub struct NewSkip {
    pub enrollment_id: i64,
    pub class_session_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attendance_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttendanceRow {
    pub attendance_id: i64,
    pub enrollment_id: i64,
    pub class_session_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

impl AttendanceRow {
    pub fn into_domain(self) -> Result<AttendanceRecord, PersistenceError> {
        Ok(AttendanceRecord {
            attendance_id: self.attendance_id,
            enrollment_id: self.enrollment_id,
            class_session_id: self.class_session_id,
            status: AttendanceStatus::from_str(&self.status)
                .map_err(|e| corrupt("attendance record", self.attendance_id, e))?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = attendance_records)]
pub struct NewAttendance {
    pub enrollment_id: i64,
    pub class_session_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = makeup_bookings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MakeUpRow {
    pub makeup_id: i64,
    pub student_id: i64,
    pub class_session_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

impl MakeUpRow {
    pub fn into_domain(self) -> Result<MakeUpBooking, PersistenceError> {
        Ok(MakeUpBooking {
            makeup_id: self.makeup_id,
            student_id: self.student_id,
            class_session_id: self.class_session_id,
            status: MakeUpStatus::from_str(&self.status)
                .map_err(|e| corrupt("make-up booking", self.makeup_id, e))?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = makeup_bookings)]
pub struct NewMakeUp {
    pub student_id: i64,
    pub class_session_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trial_bookings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrialRow {
    pub trial_id: i64,
    pub class_session_id: i64,
    pub child_name: String,
    pub child_age: Option<i64>,
    pub contact_phone: Option<String>,
    pub status: String,
    pub converted_student_id: Option<i64>,
}

impl TrialRow {
    pub fn into_domain(self) -> Result<TrialBooking, PersistenceError> {
        Ok(TrialBooking {
            trial_id: self.trial_id,
            class_session_id: self.class_session_id,
            status: TrialStatus::from_str(&self.status)
                .map_err(|e| corrupt("trial booking", self.trial_id, e))?,
            child_name: self.child_name,
            child_age: self.child_age,
            contact_phone: self.contact_phone,
            converted_student_id: self.converted_student_id,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = trial_bookings)]
pub struct NewTrial<'a> {
    pub class_session_id: i64,
    pub child_name: &'a str,
    pub child_age: Option<i64>,
    pub contact_phone: Option<&'a str>,
    pub status: String,
    pub converted_student_id: Option<i64>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = invoice_line_items)]
pub struct NewInvoiceLineItem<'a> {
    pub enrollment_id: i64,
    pub description: &'a str,
    pub amount_cents: i64,
}
