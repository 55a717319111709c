// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the SwimSched scheduling engine.
//!
//! Exposes the engine's operations as plain structured requests and
//! responses: term/schedule creation, the weekday/time-slot and single-day
//! roster views, the seat-availability check, make-up and trial booking, and
//! enrollment transfer. Input shape validation happens here, before any
//! write; store and domain errors are translated into the [`ApiError`]
//! taxonomy.
//!
//! Identity resolution is external. Callers hand every mutating operation an
//! already-resolved [`ResolvedStaff`]; successful mutations return a
//! [`ChangeDescription`] alongside the response for the external audit
//! collaborator to log. This crate does not define the audit schema.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use handlers::{
    book_make_up, book_trial, check_make_up_availability, create_term_with_schedule,
    get_daily_schedule, get_schedule_slot, transfer_enrollment,
};
pub use request_response::{
    BookMakeUpRequest, BookMakeUpResponse, BookTrialRequest, BookTrialResponse,
    ClassTemplateInput, CreateTermScheduleRequest, CreateTermScheduleResponse,
    CreatedOfferingInfo, DailyScheduleRequest, DailyScheduleResponse, DayRosterInfo,
    MakeUpAvailabilityRequest, MakeUpAvailabilityResponse, MakeUpInfo, RosterEntryInfo,
    ScheduleSlotRequest, ScheduleSlotResponse, SessionRosterInfo, TransferEnrollmentRequest,
    TransferEnrollmentResponse, TrialInfo,
};

/// Staff roles as resolved by the external identity collaborator.
///
/// Authorization decisions live outside this core; the role is carried for
/// attribution in change descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    /// Full operational authority.
    Admin,
    /// Teaches classes; records attendance and bookings.
    Instructor,
    /// Handles bookings and transfers at the desk.
    FrontDesk,
}

impl StaffRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::FrontDesk => "front-desk",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "instructor" => Ok(Self::Instructor),
            "front-desk" => Ok(Self::FrontDesk),
            other => Err(format!("Unknown staff role: '{other}'")),
        }
    }
}

/// An already-resolved staff identity.
///
/// The identity provider authenticates and resolves the caller before the
/// request reaches this core; operations receive this value and never a raw
/// credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStaff {
    /// The staff member's canonical id.
    pub staff_id: i64,
    /// The staff member's role.
    pub role: StaffRole,
}

impl ResolvedStaff {
    /// Creates a resolved staff identity.
    #[must_use]
    pub const fn new(staff_id: i64, role: StaffRole) -> Self {
        Self { staff_id, role }
    }
}

/// A structured description of a completed mutation, emitted for the
/// external audit collaborator to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDescription {
    /// The operation name, e.g. `create_term_with_schedule`.
    pub operation: String,
    /// The primary entity kind the operation acted on.
    pub entity: String,
    /// The primary entity's id.
    pub entity_id: i64,
    /// A human-readable summary of what changed.
    pub summary: String,
    /// The acting staff member's id.
    pub actor_staff_id: i64,
}

/// The result of a mutating API operation: the response plus the change
/// description destined for the audit collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOutcome<T> {
    /// The API response.
    pub response: T,
    /// The change description for audit logging.
    pub change: ChangeDescription,
}
