// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Term and schedule generation.

use diesel::prelude::*;
use tracing::{debug, info};

use swim_sched_domain::{
    DomainError, SessionStatus, TermScheduleSpec, TimeOfDay, Weekday, WeeklyDates, day_key,
    slugify,
};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewOffering, NewSession, NewTerm};
use crate::diesel_schema::{class_offerings, class_sessions, terms};
use crate::error::PersistenceError;
use crate::queries::terms::slug_exists;
use crate::Persistence;

/// One offering created during term generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOffering {
    /// The new offering's id.
    pub offering_id: i64,
    /// The offering title.
    pub title: String,
    /// Day of the week the class meets.
    pub weekday: Weekday,
    /// Wall-clock start time.
    pub start_time: TimeOfDay,
    /// Derived wall-clock end time.
    pub end_time: TimeOfDay,
    /// How many sessions were generated for it.
    pub session_count: usize,
}

/// The result of a term-with-schedule creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTermSchedule {
    /// The new term's id.
    pub term_id: i64,
    /// The resolved unique slug.
    pub slug: String,
    /// The offerings created, in template order.
    pub offerings: Vec<CreatedOffering>,
}

impl Persistence {
    /// Creates a term, one offering per template, and the full set of dated
    /// sessions, atomically.
    ///
    /// The slug stem (supplied or slugified from the name) is disambiguated
    /// inside the transaction by appending `-2`, `-3`, … until unused; a
    /// collision is resolved automatically, never an error. Each offering
    /// gets one `scheduled` session per occurrence of its weekday within the
    /// term range, capped at the spec's week count.
    ///
    /// # Errors
    ///
    /// Returns a rule violation if the template list is empty (nothing is
    /// written), or an error if any write fails — in which case nothing
    /// persists.
    pub fn create_term_with_schedule(
        &mut self,
        spec: &TermScheduleSpec,
    ) -> Result<CreatedTermSchedule, PersistenceError> {
        if spec.templates.is_empty() {
            return Err(PersistenceError::RuleViolation(
                DomainError::EmptyTemplateList,
            ));
        }

        self.conn.immediate_transaction(|conn| {
            let stem = spec
                .slug
                .clone()
                .unwrap_or_else(|| slugify(&spec.name));
            let slug = resolve_unique_slug(conn, &stem)?;

            diesel::insert_into(terms::table)
                .values(&NewTerm {
                    name: &spec.name,
                    slug: &slug,
                    start_date: day_key(spec.start_date),
                    end_date: day_key(spec.end_date),
                    created_by: spec.created_by,
                })
                .execute(conn)?;
            let term_id = get_last_insert_rowid(conn)?;
            debug!(term_id, slug = %slug, "Inserted term");

            let mut offerings: Vec<CreatedOffering> = Vec::with_capacity(spec.templates.len());
            for template in &spec.templates {
                let end_time = template.end_time();
                diesel::insert_into(class_offerings::table)
                    .values(&NewOffering {
                        term_id,
                        title: &template.title,
                        weekday: i32::from(template.weekday.index()),
                        start_time: template.start_time.to_string(),
                        end_time: end_time.to_string(),
                        duration_minutes: template.duration_minutes,
                        capacity: template.capacity,
                        instructor_count: template.instructor_count,
                        notes: template.notes.as_deref(),
                    })
                    .execute(conn)?;
                let offering_id = get_last_insert_rowid(conn)?;

                let session_rows: Vec<NewSession> =
                    WeeklyDates::new(spec.start_date, spec.end_date, template.weekday)
                        .take(spec.week_count as usize)
                        .map(|date| NewSession {
                            offering_id,
                            session_date: day_key(date),
                            status: SessionStatus::Scheduled.as_str().to_string(),
                            notes: None,
                        })
                        .collect();
                if !session_rows.is_empty() {
                    diesel::insert_into(class_sessions::table)
                        .values(&session_rows)
                        .execute(conn)?;
                }
                debug!(
                    offering_id,
                    title = %template.title,
                    session_count = session_rows.len(),
                    "Inserted offering with sessions"
                );

                offerings.push(CreatedOffering {
                    offering_id,
                    title: template.title.clone(),
                    weekday: template.weekday,
                    start_time: template.start_time,
                    end_time,
                    session_count: session_rows.len(),
                });
            }

            info!(
                term_id,
                slug = %slug,
                offering_count = offerings.len(),
                "Created term with schedule"
            );

            Ok(CreatedTermSchedule {
                term_id,
                slug,
                offerings,
            })
        })
    }
}

/// Finds the first unused slug from a stem: the stem itself, then `stem-2`,
/// `stem-3`, and so on.
fn resolve_unique_slug(
    conn: &mut SqliteConnection,
    stem: &str,
) -> Result<String, PersistenceError> {
    if !slug_exists(conn, stem)? {
        return Ok(stem.to_string());
    }
    let mut suffix: u64 = 2;
    loop {
        let candidate = format!("{stem}-{suffix}");
        if !slug_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}
