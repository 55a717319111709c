// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seat-guarded make-up and trial bookings.
//!
//! The guard checks and the booking insert share one transaction. Two
//! concurrent requests for the last weighted seat serialize on the
//! `IMMEDIATE` transaction; the loser re-runs its checks against the winner's
//! committed row and is rejected cleanly. The `(student, session)` unique
//! constraint additionally turns an accidental double submission into a
//! conflict, never a double occupancy.

use chrono::NaiveDate;
use diesel::prelude::*;
use tracing::info;

use swim_sched_domain::{DomainError, MakeUpBooking, MakeUpStatus, TrialBooking, TrialStatus};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewMakeUp, NewTrial};
use crate::diesel_schema::{makeup_bookings, trial_bookings};
use crate::error::PersistenceError;
use crate::queries::{offerings, seat_guard, sessions};
use crate::Persistence;

impl Persistence {
    /// Books a make-up seat for a student in an offering's session on a date.
    ///
    /// Rejected with a rule violation when the student already holds a
    /// make-up for that session, already has a class obligation on that date,
    /// or the session's weighted fill has reached its effective capacity
    /// (two-instructor floor applied). Nothing is written on rejection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing offering or session, a rule
    /// violation for a guard rejection, or an error if a write fails.
    pub fn book_make_up(
        &mut self,
        student_id: i64,
        offering_id: i64,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<MakeUpBooking, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let offering = offerings::offering_by_id(conn, offering_id)?;
            let session = sessions::session_for_offering_date(conn, offering_id, date)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!(
                        "Offering {offering_id} has no session on {date}"
                    ))
                })?;

            if seat_guard::make_up_exists(conn, student_id, session.session_id)? {
                return Err(PersistenceError::RuleViolation(
                    DomainError::DuplicateMakeUpBooking {
                        student_id,
                        session_id: session.session_id,
                    },
                ));
            }
            if seat_guard::has_time_conflict(conn, student_id, date)? {
                return Err(PersistenceError::RuleViolation(
                    DomainError::ScheduleConflict { student_id, date },
                ));
            }

            let occupants = seat_guard::seat_occupants(conn, offering_id, session.session_id)?;
            let figures = swim_sched_domain::compute_capacity(
                &occupants,
                offering.instructor_count,
                offering.capacity,
            );
            if figures.is_full() {
                return Err(PersistenceError::RuleViolation(
                    DomainError::InsufficientSeats {
                        session_id: session.session_id,
                    },
                ));
            }

            diesel::insert_into(makeup_bookings::table)
                .values(&NewMakeUp {
                    student_id,
                    class_session_id: session.session_id,
                    status: MakeUpStatus::Scheduled.as_str().to_string(),
                    notes: notes.map(ToString::to_string),
                })
                .execute(conn)?;
            let makeup_id = get_last_insert_rowid(conn)?;

            info!(
                makeup_id,
                student_id,
                session_id = session.session_id,
                "Booked make-up seat"
            );

            Ok(MakeUpBooking {
                makeup_id,
                student_id,
                class_session_id: session.session_id,
                status: MakeUpStatus::Scheduled,
                notes: notes.map(ToString::to_string),
            })
        })
    }

    /// Books a trial seat for a prospective attendee in an offering's session
    /// on a date.
    ///
    /// Trials pass through the same weighted seat gate as make-ups; there is
    /// no same-day conflict check because the visitor is not an enrolled
    /// student.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing offering or session, a rule
    /// violation when no weighted seat remains, or an error if a write
    /// fails.
    pub fn book_trial(
        &mut self,
        offering_id: i64,
        date: NaiveDate,
        child_name: &str,
        child_age: Option<i64>,
        contact_phone: Option<&str>,
    ) -> Result<TrialBooking, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let offering = offerings::offering_by_id(conn, offering_id)?;
            let session = sessions::session_for_offering_date(conn, offering_id, date)?
                .ok_or_else(|| {
                    PersistenceError::NotFound(format!(
                        "Offering {offering_id} has no session on {date}"
                    ))
                })?;

            let occupants = seat_guard::seat_occupants(conn, offering_id, session.session_id)?;
            let figures = swim_sched_domain::compute_capacity(
                &occupants,
                offering.instructor_count,
                offering.capacity,
            );
            if figures.is_full() {
                return Err(PersistenceError::RuleViolation(
                    DomainError::InsufficientSeats {
                        session_id: session.session_id,
                    },
                ));
            }

            diesel::insert_into(trial_bookings::table)
                .values(&NewTrial {
                    class_session_id: session.session_id,
                    child_name,
                    child_age,
                    contact_phone,
                    status: TrialStatus::Scheduled.as_str().to_string(),
                    converted_student_id: None,
                })
                .execute(conn)?;
            let trial_id = get_last_insert_rowid(conn)?;

            info!(
                trial_id,
                session_id = session.session_id,
                "Booked trial seat"
            );

            Ok(TrialBooking {
                trial_id,
                class_session_id: session.session_id,
                child_name: child_name.to_string(),
                child_age,
                contact_phone: contact_phone.map(ToString::to_string),
                status: TrialStatus::Scheduled,
                converted_student_id: None,
            })
        })
    }

    /// Resolves the booking-gate occupancy of an offering's session on a
    /// date, without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing offering or session, or an error if
    /// a query fails.
    pub fn seat_usage(
        &mut self,
        offering_id: i64,
        date: NaiveDate,
    ) -> Result<seat_guard::SeatUsage, PersistenceError> {
        self.conn.transaction(|conn| {
            let offering = offerings::offering_by_id(conn, offering_id)?;
            seat_guard::seat_usage(conn, &offering, date)
        })
    }

    /// Whether a student already has a class obligation on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn has_time_conflict(
        &mut self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<bool, PersistenceError> {
        self.conn
            .transaction(|conn| seat_guard::has_time_conflict(conn, student_id, date))
    }
}
