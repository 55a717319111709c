// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seat-availability and same-day-conflict checks backing the booking gates.
//!
//! Unlike the roster display views, this path runs the weighted occupancy
//! model with the two-instructor capacity floor applied. The display views
//! intentionally measure against raw stored capacity; the two models can
//! disagree and that divergence is preserved (see DESIGN.md).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use diesel::prelude::*;

use swim_sched_domain::{
    AttendanceStatus, CapacityFigures, ClassOffering, ClassRatio, EnrollmentStatus, MakeUpStatus,
    SeatOccupant, day_key,
};

use crate::diesel_schema::{
    attendance_records, class_sessions, enrollment_skips, enrollments, makeup_bookings,
};
use crate::error::PersistenceError;

/// The weighted occupancy of one resolved session, as the booking gate sees
/// it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatUsage {
    /// The resolved session.
    pub session_id: i64,
    /// Weighted fill, floored effective capacity, and open seats.
    pub figures: CapacityFigures,
}

/// Whether the student already holds a make-up booking for the session.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn make_up_exists(
    conn: &mut SqliteConnection,
    student_id: i64,
    session_id: i64,
) -> Result<bool, PersistenceError> {
    let existing: Option<i64> = makeup_bookings::table
        .filter(makeup_bookings::student_id.eq(student_id))
        .filter(makeup_bookings::class_session_id.eq(session_id))
        .select(makeup_bookings::makeup_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(existing.is_some())
}

/// Whether the student has any class obligation on the date.
///
/// True when any of the student's active enrollments belongs to an offering
/// with a session on that exact calendar date and the enrollment has not
/// skipped that session. The collision is same-day, independent of the time
/// slot: a student cannot hold two obligations on one date.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn has_time_conflict(
    conn: &mut SqliteConnection,
    student_id: i64,
    date: NaiveDate,
) -> Result<bool, PersistenceError> {
    // Sessions on the date, keyed by offering.
    let sessions: Vec<(i64, i64)> = class_sessions::table
        .filter(class_sessions::session_date.eq(day_key(date)))
        .select((class_sessions::offering_id, class_sessions::session_id))
        .load(conn)?;
    if sessions.is_empty() {
        return Ok(false);
    }
    let session_by_offering: HashMap<i64, i64> = sessions.into_iter().collect();
    let offering_ids: Vec<i64> = session_by_offering.keys().copied().collect();

    // The student's active enrollments in those offerings.
    let active: Vec<(i64, i64)> = enrollments::table
        .filter(enrollments::student_id.eq(student_id))
        .filter(enrollments::status.eq(EnrollmentStatus::Active.as_str()))
        .filter(enrollments::offering_id.eq_any(offering_ids))
        .select((enrollments::enrollment_id, enrollments::offering_id))
        .load(conn)?;
    if active.is_empty() {
        return Ok(false);
    }

    // Obligation pairs the student would have to honor that day.
    let pairs: Vec<(i64, i64)> = active
        .iter()
        .filter_map(|(enrollment_id, offering_id)| {
            session_by_offering
                .get(offering_id)
                .map(|session_id| (*enrollment_id, *session_id))
        })
        .collect();

    let enrollment_ids: Vec<i64> = pairs.iter().map(|(e, _)| *e).collect();
    let session_ids: Vec<i64> = pairs.iter().map(|(_, s)| *s).collect();
    let skipped: HashSet<(i64, i64)> = enrollment_skips::table
        .filter(enrollment_skips::enrollment_id.eq_any(enrollment_ids))
        .filter(enrollment_skips::class_session_id.eq_any(session_ids))
        .select((
            enrollment_skips::enrollment_id,
            enrollment_skips::class_session_id,
        ))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    Ok(pairs.iter().any(|pair| !skipped.contains(pair)))
}

/// Loads the weighted seat occupants of one session: active enrollments that
/// are neither skipped nor excused for it, plus seat-occupying make-up
/// bookings, each weighted as a "3:1" seat.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn seat_occupants(
    conn: &mut SqliteConnection,
    offering_id: i64,
    session_id: i64,
) -> Result<Vec<SeatOccupant>, PersistenceError> {
    let active: Vec<(i64, String)> = enrollments::table
        .filter(enrollments::offering_id.eq(offering_id))
        .filter(enrollments::status.eq(EnrollmentStatus::Active.as_str()))
        .select((enrollments::enrollment_id, enrollments::class_ratio))
        .load(conn)?;

    let enrollment_ids: Vec<i64> = active.iter().map(|(id, _)| *id).collect();

    let mut freed: HashSet<i64> = HashSet::new();
    if !enrollment_ids.is_empty() {
        let skipped: Vec<i64> = enrollment_skips::table
            .filter(enrollment_skips::class_session_id.eq(session_id))
            .filter(enrollment_skips::enrollment_id.eq_any(enrollment_ids.iter().copied()))
            .select(enrollment_skips::enrollment_id)
            .load(conn)?;
        freed.extend(skipped);

        let excused: Vec<i64> = attendance_records::table
            .filter(attendance_records::class_session_id.eq(session_id))
            .filter(attendance_records::status.eq(AttendanceStatus::Excused.as_str()))
            .filter(attendance_records::enrollment_id.eq_any(enrollment_ids.iter().copied()))
            .select(attendance_records::enrollment_id)
            .load(conn)?;
        freed.extend(excused);
    }

    let mut occupants: Vec<SeatOccupant> = active
        .into_iter()
        .filter(|(enrollment_id, _)| !freed.contains(enrollment_id))
        .map(|(_, ratio)| SeatOccupant::with_ratio(ClassRatio::from_label(&ratio)))
        .collect();

    let seat_statuses = [
        MakeUpStatus::Scheduled.as_str(),
        MakeUpStatus::Attended.as_str(),
    ];
    let make_up_count: i64 = makeup_bookings::table
        .filter(makeup_bookings::class_session_id.eq(session_id))
        .filter(makeup_bookings::status.eq_any(seat_statuses))
        .count()
        .get_result(conn)?;
    occupants.extend(
        std::iter::repeat_with(|| SeatOccupant::with_ratio(ClassRatio::ThreeToOne))
            .take(usize::try_from(make_up_count).unwrap_or(0)),
    );

    Ok(occupants)
}

/// Computes the booking-gate occupancy figures for an offering's session on a
/// date, instructor floor applied.
///
/// # Errors
///
/// Returns `NotFound` if the offering has no session on the date, or an
/// error if a query fails.
pub fn seat_usage(
    conn: &mut SqliteConnection,
    offering: &ClassOffering,
    date: NaiveDate,
) -> Result<SeatUsage, PersistenceError> {
    let session = super::sessions::session_for_offering_date(conn, offering.offering_id, date)?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Offering {} has no session on {date}",
                offering.offering_id
            ))
        })?;

    let occupants = seat_occupants(conn, offering.offering_id, session.session_id)?;
    let figures = swim_sched_domain::compute_capacity(
        &occupants,
        offering.instructor_count,
        offering.capacity,
    );

    Ok(SeatUsage {
        session_id: session.session_id,
        figures,
    })
}
