// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batched roster loading for the slot and daily schedule views.
//!
//! One bundle load issues a bounded number of queries — enrollments,
//! attendance, skips, bookings, and four pre-aggregated count queries — each
//! keyed by the full session/enrollment id-set. The round-trip count never
//! grows with the number of weeks in a term; this is a correctness-adjacent
//! performance invariant, not a style preference.

use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;

use swim_sched_domain::{
    AttendanceRecord, AttendanceStatus, ClassOffering, ClassSession, Enrollment, EnrollmentSkip,
    EnrollmentStatus, MakeUpBooking, MakeUpStatus, Student, Term, TimeOfDay, TrialBooking,
    TrialStatus, Weekday,
};

use crate::data_models::{AttendanceRow, EnrollmentRow, MakeUpRow, SkipRow, StudentRow, TrialRow};
use crate::diesel_schema::{
    attendance_records, enrollment_skips, enrollments, makeup_bookings, students, trial_bookings,
};
use crate::error::PersistenceError;
use crate::Persistence;

/// Everything the roster views need for a set of offerings and sessions,
/// loaded in a constant number of round trips.
#[derive(Debug, Clone)]
pub struct RosterBundle {
    /// The offerings under view.
    pub offerings: Vec<ClassOffering>,
    /// Their sessions, date ascending.
    pub sessions: Vec<ClassSession>,
    /// Active enrollments of those offerings with student identity.
    pub enrollments: Vec<(Enrollment, Student)>,
    /// Attendance rows of the loaded enrollments against the loaded sessions.
    pub attendance: Vec<AttendanceRecord>,
    /// Skip rows of the loaded enrollments against the loaded sessions.
    pub skips: Vec<EnrollmentSkip>,
    /// Every make-up booking tied to the loaded sessions, any status.
    pub make_ups: Vec<MakeUpBooking>,
    /// Every trial booking tied to the loaded sessions, any status.
    pub trials: Vec<TrialBooking>,
    /// Pre-aggregated skip counts per session.
    pub skip_counts: HashMap<i64, i64>,
    /// Pre-aggregated excused-attendance counts per session.
    pub excused_counts: HashMap<i64, i64>,
    /// Pre-aggregated seat-occupying make-up counts per session.
    pub make_up_counts: HashMap<i64, i64>,
    /// Pre-aggregated seat-occupying trial counts per session.
    pub trial_counts: HashMap<i64, i64>,
}

/// Loads the roster bundle for already-resolved offerings and sessions.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be reconstructed.
pub fn load_roster_bundle(
    conn: &mut SqliteConnection,
    offerings: Vec<ClassOffering>,
    sessions: Vec<ClassSession>,
) -> Result<RosterBundle, PersistenceError> {
    let offering_ids: Vec<i64> = offerings.iter().map(|o| o.offering_id).collect();
    let session_ids: Vec<i64> = sessions.iter().map(|s| s.session_id).collect();

    let enrollments = active_enrollments_with_students(conn, &offering_ids)?;
    let enrollment_ids: Vec<i64> = enrollments.iter().map(|(e, _)| e.enrollment_id).collect();

    let attendance = attendance_for(conn, &session_ids, &enrollment_ids)?;
    let skips = skips_for(conn, &session_ids, &enrollment_ids)?;
    let make_ups = make_ups_for_sessions(conn, &session_ids)?;
    let trials = trials_for_sessions(conn, &session_ids)?;

    let skip_counts = skip_counts_by_session(conn, &session_ids)?;
    let excused_counts = excused_counts_by_session(conn, &session_ids)?;
    let make_up_counts = seat_make_up_counts_by_session(conn, &session_ids)?;
    let trial_counts = seat_trial_counts_by_session(conn, &session_ids)?;

    Ok(RosterBundle {
        offerings,
        sessions,
        enrollments,
        attendance,
        skips,
        make_ups,
        trials,
        skip_counts,
        excused_counts,
        make_up_counts,
        trial_counts,
    })
}

/// Active enrollments of a set of offerings, joined to student identity.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn active_enrollments_with_students(
    conn: &mut SqliteConnection,
    offering_ids: &[i64],
) -> Result<Vec<(Enrollment, Student)>, PersistenceError> {
    if offering_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(EnrollmentRow, StudentRow)> = enrollments::table
        .inner_join(students::table)
        .filter(enrollments::offering_id.eq_any(offering_ids.iter().copied()))
        .filter(enrollments::status.eq(EnrollmentStatus::Active.as_str()))
        .order(enrollments::enrollment_id.asc())
        .select((EnrollmentRow::as_select(), StudentRow::as_select()))
        .load(conn)?;

    rows.into_iter()
        .map(|(enrollment, student)| Ok((enrollment.into_domain()?, student.into_domain())))
        .collect()
}

fn attendance_for(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
    enrollment_ids: &[i64],
) -> Result<Vec<AttendanceRecord>, PersistenceError> {
    if session_ids.is_empty() || enrollment_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<AttendanceRow> = attendance_records::table
        .filter(attendance_records::class_session_id.eq_any(session_ids.iter().copied()))
        .filter(attendance_records::enrollment_id.eq_any(enrollment_ids.iter().copied()))
        .select(AttendanceRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AttendanceRow::into_domain).collect()
}

fn skips_for(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
    enrollment_ids: &[i64],
) -> Result<Vec<EnrollmentSkip>, PersistenceError> {
    if session_ids.is_empty() || enrollment_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<SkipRow> = enrollment_skips::table
        .filter(enrollment_skips::class_session_id.eq_any(session_ids.iter().copied()))
        .filter(enrollment_skips::enrollment_id.eq_any(enrollment_ids.iter().copied()))
        .select(SkipRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(SkipRow::into_domain).collect())
}

fn make_ups_for_sessions(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<Vec<MakeUpBooking>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<MakeUpRow> = makeup_bookings::table
        .filter(makeup_bookings::class_session_id.eq_any(session_ids.iter().copied()))
        .select(MakeUpRow::as_select())
        .load(conn)?;

    rows.into_iter().map(MakeUpRow::into_domain).collect()
}

fn trials_for_sessions(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<Vec<TrialBooking>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<TrialRow> = trial_bookings::table
        .filter(trial_bookings::class_session_id.eq_any(session_ids.iter().copied()))
        .select(TrialRow::as_select())
        .load(conn)?;

    rows.into_iter().map(TrialRow::into_domain).collect()
}

fn skip_counts_by_session(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<HashMap<i64, i64>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(i64, i64)> = enrollment_skips::table
        .filter(enrollment_skips::class_session_id.eq_any(session_ids.iter().copied()))
        .group_by(enrollment_skips::class_session_id)
        .select((enrollment_skips::class_session_id, count_star()))
        .load(conn)?;
    Ok(counts.into_iter().collect())
}

fn excused_counts_by_session(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<HashMap<i64, i64>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(i64, i64)> = attendance_records::table
        .filter(attendance_records::class_session_id.eq_any(session_ids.iter().copied()))
        .filter(attendance_records::status.eq(AttendanceStatus::Excused.as_str()))
        .group_by(attendance_records::class_session_id)
        .select((attendance_records::class_session_id, count_star()))
        .load(conn)?;
    Ok(counts.into_iter().collect())
}

fn seat_make_up_counts_by_session(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<HashMap<i64, i64>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let seat_statuses = [
        MakeUpStatus::Scheduled.as_str(),
        MakeUpStatus::Attended.as_str(),
    ];
    let counts: Vec<(i64, i64)> = makeup_bookings::table
        .filter(makeup_bookings::class_session_id.eq_any(session_ids.iter().copied()))
        .filter(makeup_bookings::status.eq_any(seat_statuses))
        .group_by(makeup_bookings::class_session_id)
        .select((makeup_bookings::class_session_id, count_star()))
        .load(conn)?;
    Ok(counts.into_iter().collect())
}

impl Persistence {
    /// Loads the slot view bundle: the term plus everything its offerings at
    /// one weekday/time slot need for roster display.
    ///
    /// A term with no offerings at the slot yields an empty bundle keyed by
    /// the term's metadata.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing term, or an error if a query fails.
    pub fn load_slot_bundle(
        &mut self,
        term_id: i64,
        weekday: Weekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<(Term, RosterBundle), PersistenceError> {
        self.conn.transaction(|conn| {
            let term = super::terms::term_by_id(conn, term_id)?;
            let offerings =
                super::offerings::offerings_for_slot(conn, term_id, weekday, start_time, end_time)?;
            let offering_ids: Vec<i64> = offerings.iter().map(|o| o.offering_id).collect();
            let sessions = super::sessions::sessions_for_offerings(conn, &offering_ids)?;
            let bundle = load_roster_bundle(conn, offerings, sessions)?;
            Ok((term, bundle))
        })
    }

    /// Loads the daily view bundle: every session on one calendar date
    /// across all offerings, with the same roster records as the slot view.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_day_bundle(&mut self, date: NaiveDate) -> Result<RosterBundle, PersistenceError> {
        self.conn.transaction(|conn| {
            let sessions = super::sessions::sessions_on_date(conn, date)?;
            let mut offering_ids: Vec<i64> = sessions.iter().map(|s| s.offering_id).collect();
            offering_ids.sort_unstable();
            offering_ids.dedup();
            let offerings = super::offerings::offerings_by_ids(conn, &offering_ids)?;
            load_roster_bundle(conn, offerings, sessions)
        })
    }

    /// Loads a term by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such term exists, or an error if the query
    /// fails.
    pub fn term_by_id(&mut self, term_id: i64) -> Result<Term, PersistenceError> {
        self.conn.transaction(|conn| super::terms::term_by_id(conn, term_id))
    }

    /// Loads an offering by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such offering exists, or an error if the
    /// query fails.
    pub fn offering_by_id(
        &mut self,
        offering_id: i64,
    ) -> Result<ClassOffering, PersistenceError> {
        self.conn
            .transaction(|conn| super::offerings::offering_by_id(conn, offering_id))
    }

    /// Loads one offering's sessions, date ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sessions_for_offering(
        &mut self,
        offering_id: i64,
    ) -> Result<Vec<ClassSession>, PersistenceError> {
        self.conn
            .transaction(|conn| super::sessions::sessions_for_offering_ordered(conn, offering_id))
    }
}

fn seat_trial_counts_by_session(
    conn: &mut SqliteConnection,
    session_ids: &[i64],
) -> Result<HashMap<i64, i64>, PersistenceError> {
    if session_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let seat_statuses = [
        TrialStatus::Scheduled.as_str(),
        TrialStatus::Attended.as_str(),
    ];
    let counts: Vec<(i64, i64)> = trial_bookings::table
        .filter(trial_bookings::class_session_id.eq_any(session_ids.iter().copied()))
        .filter(trial_bookings::status.eq_any(seat_statuses))
        .group_by(trial_bookings::class_session_id)
        .select((trial_bookings::class_session_id, count_star()))
        .load(conn)?;
    Ok(counts.into_iter().collect())
}
