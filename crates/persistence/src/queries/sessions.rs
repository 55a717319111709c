// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use diesel::prelude::*;

use swim_sched_domain::{ClassSession, day_key};

use crate::data_models::SessionRow;
use crate::diesel_schema::class_sessions;
use crate::error::PersistenceError;

/// Loads every session of a set of offerings, date ascending.
///
/// Day-key text ordering is chronological, so the database's string sort is
/// the schedule order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn sessions_for_offerings(
    conn: &mut SqliteConnection,
    offering_ids: &[i64],
) -> Result<Vec<ClassSession>, PersistenceError> {
    if offering_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<SessionRow> = class_sessions::table
        .filter(class_sessions::offering_id.eq_any(offering_ids.iter().copied()))
        .order((
            class_sessions::session_date.asc(),
            class_sessions::offering_id.asc(),
        ))
        .select(SessionRow::as_select())
        .load(conn)?;

    rows.into_iter().map(SessionRow::into_domain).collect()
}

/// Loads one offering's sessions, date ascending.
///
/// This is the ordering the transfer engine pairs sessions by.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn sessions_for_offering_ordered(
    conn: &mut SqliteConnection,
    offering_id: i64,
) -> Result<Vec<ClassSession>, PersistenceError> {
    let rows: Vec<SessionRow> = class_sessions::table
        .filter(class_sessions::offering_id.eq(offering_id))
        .order(class_sessions::session_date.asc())
        .select(SessionRow::as_select())
        .load(conn)?;

    rows.into_iter().map(SessionRow::into_domain).collect()
}

/// Resolves the session of an offering on a calendar date, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn session_for_offering_date(
    conn: &mut SqliteConnection,
    offering_id: i64,
    date: NaiveDate,
) -> Result<Option<ClassSession>, PersistenceError> {
    let row: Option<SessionRow> = class_sessions::table
        .filter(class_sessions::offering_id.eq(offering_id))
        .filter(class_sessions::session_date.eq(day_key(date)))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    row.map(SessionRow::into_domain).transpose()
}

/// Loads every session falling on a calendar date, across all offerings.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn sessions_on_date(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Vec<ClassSession>, PersistenceError> {
    let rows: Vec<SessionRow> = class_sessions::table
        .filter(class_sessions::session_date.eq(day_key(date)))
        .order(class_sessions::offering_id.asc())
        .select(SessionRow::as_select())
        .load(conn)?;

    rows.into_iter().map(SessionRow::into_domain).collect()
}
