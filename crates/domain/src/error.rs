// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

use crate::types::EnrollmentStatus;

/// Errors that can occur during domain validation and rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Weekday index is outside 0 (Sunday) through 6 (Saturday).
    InvalidWeekday(i64),
    /// Time-of-day string does not match the strict `HH:MM` shape.
    InvalidTimeOfDay(String),
    /// Failed to parse a civil date from a `YYYY-MM-DD` string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A term's end date precedes its start date.
    InvalidDateRange {
        /// The range start.
        start: NaiveDate,
        /// The range end.
        end: NaiveDate,
    },
    /// Class duration must be a positive number of minutes.
    InvalidDuration {
        /// The invalid duration value.
        minutes: i64,
    },
    /// Base capacity cannot be negative.
    InvalidCapacity {
        /// The invalid capacity value.
        value: i64,
    },
    /// Week count must be positive.
    InvalidWeekCount {
        /// The invalid count value.
        count: i64,
    },
    /// A term schedule was requested with no class templates.
    EmptyTemplateList,
    /// A status string is not a member of its lifecycle.
    InvalidStatus {
        /// The lifecycle the value was parsed against.
        kind: &'static str,
        /// The unrecognized value.
        value: String,
    },
    /// The student already holds an enrollment in the target offering.
    DuplicateEnrollment {
        /// The student.
        student_id: i64,
        /// The offering.
        offering_id: i64,
    },
    /// The student already holds a make-up booking for the session.
    DuplicateMakeUpBooking {
        /// The student.
        student_id: i64,
        /// The session.
        session_id: i64,
    },
    /// The student already has a class obligation on the date.
    ScheduleConflict {
        /// The student.
        student_id: i64,
        /// The colliding date.
        date: NaiveDate,
    },
    /// No weighted seat remains open in the session.
    InsufficientSeats {
        /// The session that is full.
        session_id: i64,
    },
    /// Only active enrollments can be transferred.
    EnrollmentNotActive {
        /// The enrollment.
        enrollment_id: i64,
        /// Its current status.
        status: EnrollmentStatus,
    },
    /// Transfers must stay within one term.
    TermMismatch {
        /// The source offering.
        source_offering_id: i64,
        /// The target offering.
        target_offering_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeekday(value) => {
                write!(f, "Invalid weekday {value}: must be 0 (Sunday) through 6 (Saturday)")
            }
            Self::InvalidTimeOfDay(value) => {
                write!(f, "Invalid time '{value}': must match HH:MM")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: end {end} precedes start {start}")
            }
            Self::InvalidDuration { minutes } => {
                write!(f, "Invalid duration: {minutes} minutes. Must be greater than 0")
            }
            Self::InvalidCapacity { value } => {
                write!(f, "Invalid capacity: {value}. Must not be negative")
            }
            Self::InvalidWeekCount { count } => {
                write!(f, "Invalid week count: {count}. Must be greater than 0")
            }
            Self::EmptyTemplateList => {
                write!(f, "A term schedule requires at least one class template")
            }
            Self::InvalidStatus { kind, value } => {
                write!(f, "Invalid {kind} status: '{value}'")
            }
            Self::DuplicateEnrollment {
                student_id,
                offering_id,
            } => {
                write!(
                    f,
                    "Student {student_id} already has an enrollment in offering {offering_id}"
                )
            }
            Self::DuplicateMakeUpBooking {
                student_id,
                session_id,
            } => {
                write!(
                    f,
                    "Student {student_id} already has a make-up booking for session {session_id}"
                )
            }
            Self::ScheduleConflict { student_id, date } => {
                write!(
                    f,
                    "Student {student_id} already has a class obligation on {date}"
                )
            }
            Self::InsufficientSeats { session_id } => {
                write!(f, "No open seats remain in session {session_id}")
            }
            Self::EnrollmentNotActive {
                enrollment_id,
                status,
            } => {
                write!(
                    f,
                    "Enrollment {enrollment_id} is {status}, only active enrollments can be transferred"
                )
            }
            Self::TermMismatch {
                source_offering_id,
                target_offering_id,
            } => {
                write!(
                    f,
                    "Offering {target_offering_id} belongs to a different term than offering {source_offering_id}: transfers are same-term only"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
