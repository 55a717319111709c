// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use swim_sched_domain::Term;

use crate::data_models::TermRow;
use crate::diesel_schema::terms;
use crate::error::PersistenceError;

/// Loads a term by id.
///
/// # Errors
///
/// Returns `NotFound` if no such term exists, or an error if the query fails.
pub fn term_by_id(conn: &mut SqliteConnection, term_id: i64) -> Result<Term, PersistenceError> {
    terms::table
        .find(term_id)
        .select(TermRow::as_select())
        .first::<TermRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Term {term_id} not found")))?
        .into_domain()
}

/// Whether a slug is already taken by any term.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn slug_exists(conn: &mut SqliteConnection, slug: &str) -> Result<bool, PersistenceError> {
    let existing: Option<i64> = terms::table
        .filter(terms::slug.eq(slug))
        .select(terms::term_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(existing.is_some())
}
