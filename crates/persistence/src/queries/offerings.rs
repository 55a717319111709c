// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use swim_sched_domain::{ClassOffering, TimeOfDay, Weekday};

use crate::data_models::OfferingRow;
use crate::diesel_schema::class_offerings;
use crate::error::PersistenceError;

/// Loads an offering by id.
///
/// # Errors
///
/// Returns `NotFound` if no such offering exists, or an error if the query
/// fails.
pub fn offering_by_id(
    conn: &mut SqliteConnection,
    offering_id: i64,
) -> Result<ClassOffering, PersistenceError> {
    class_offerings::table
        .find(offering_id)
        .select(OfferingRow::as_select())
        .first::<OfferingRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Offering {offering_id} not found")))?
        .into_domain()
}

/// Loads every offering of a term matching one weekday/time slot.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn offerings_for_slot(
    conn: &mut SqliteConnection,
    term_id: i64,
    weekday: Weekday,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
) -> Result<Vec<ClassOffering>, PersistenceError> {
    let rows: Vec<OfferingRow> = class_offerings::table
        .filter(class_offerings::term_id.eq(term_id))
        .filter(class_offerings::weekday.eq(i32::from(weekday.index())))
        .filter(class_offerings::start_time.eq(start_time.to_string()))
        .filter(class_offerings::end_time.eq(end_time.to_string()))
        .order(class_offerings::offering_id.asc())
        .select(OfferingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(OfferingRow::into_domain).collect()
}

/// Loads a set of offerings by id, ordered by start time then id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn offerings_by_ids(
    conn: &mut SqliteConnection,
    offering_ids: &[i64],
) -> Result<Vec<ClassOffering>, PersistenceError> {
    if offering_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<OfferingRow> = class_offerings::table
        .filter(class_offerings::offering_id.eq_any(offering_ids.iter().copied()))
        .order((
            class_offerings::start_time.asc(),
            class_offerings::offering_id.asc(),
        ))
        .select(OfferingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(OfferingRow::into_domain).collect()
}
