// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use swim_sched_domain::DomainError;
use swim_sched_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract:
///
/// - [`ApiError::InvalidInput`] — malformed input, rejected before any write
/// - [`ApiError::ResourceNotFound`] — missing entity, no partial mutation
/// - [`ApiError::Conflict`] — business-rule rejection with a human-readable
///   reason, no partial mutation
/// - [`ApiError::Contention`] — the store could not serialize the
///   transaction; retry the whole operation from scratch
/// - [`ApiError::Internal`] — anything else
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A business rule rejected the operation.
    Conflict {
        /// A human-readable reason for the rejection.
        reason: String,
    },
    /// The operation lost a race against concurrent writers.
    Contention {
        /// A description of the contention.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound { message } => write!(f, "Not found: {message}"),
            Self::Conflict { reason } => write!(f, "Conflict: {reason}"),
            Self::Contention { message } => {
                write!(f, "Contention: {message}; retry the operation")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into the API taxonomy.
///
/// Shape violations become [`ApiError::InvalidInput`] keyed by the field
/// they describe; business-rule violations become [`ApiError::Conflict`].
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field = match &err {
        DomainError::InvalidWeekday(_) => Some("weekday"),
        DomainError::InvalidTimeOfDay(_) => Some("time"),
        DomainError::DateParseError { .. } => Some("date"),
        DomainError::InvalidDateRange { .. } => Some("end_date"),
        DomainError::InvalidDuration { .. } => Some("duration_minutes"),
        DomainError::InvalidCapacity { .. } => Some("capacity"),
        DomainError::InvalidWeekCount { .. } => Some("week_count"),
        DomainError::EmptyTemplateList => Some("templates"),
        DomainError::InvalidStatus { .. } => Some("status"),
        DomainError::DuplicateEnrollment { .. }
        | DomainError::DuplicateMakeUpBooking { .. }
        | DomainError::ScheduleConflict { .. }
        | DomainError::InsufficientSeats { .. }
        | DomainError::EnrollmentNotActive { .. }
        | DomainError::TermMismatch { .. } => None,
    };

    match field {
        Some(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        },
        None => ApiError::Conflict {
            reason: err.to_string(),
        },
    }
}

/// Translates a persistence error into the API taxonomy.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound { message },
        PersistenceError::RuleViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::Busy(message) => ApiError::Contention { message },
        PersistenceError::UniqueViolation(message) => ApiError::Conflict { reason: message },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
