// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the SwimSched scheduling engine.
//!
//! This crate provides the transactional `SQLite` store behind term/schedule
//! generation, roster aggregation, seat-guarded bookings, and enrollment
//! transfer. It is built on Diesel with embedded migrations.
//!
//! ## Transaction discipline
//!
//! Every multi-step mutation (term generation, make-up/trial booking,
//! enrollment transfer) runs inside a single `IMMEDIATE` transaction opened
//! by the composed operation itself. Seat-availability checks and the
//! subsequent booking write share that transaction, so two concurrent
//! requests for the last seat cannot both succeed. Readers outside a
//! transaction never observe partial state.
//!
//! Busy/serialization failures surface as [`PersistenceError::Busy`]; callers
//! should retry the whole operation from scratch.
//!
//! ## Read batching
//!
//! Roster reads load their secondary records (enrollments, attendance,
//! skips, bookings, per-session counts) by full id-set, keeping the number
//! of round trips constant regardless of how many weeks a term spans.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases named by an atomic
//! counter, which keeps them isolated and deterministic without time-based
//! collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::term_schedule::{CreatedOffering, CreatedTermSchedule};
pub use mutations::transfer::{TransferCommand, TransferOutcome};
pub use queries::rosters::RosterBundle;
pub use queries::seat_guard::SeatUsage;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the scheduling engine's store.
///
/// Owns a single `SQLite` connection; the composed operations defined in the
/// `queries` and `mutations` modules are exposed as methods on this type and
/// never leak transaction handles to callers.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_swimsched_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Better read concurrency for file databases
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }
}
