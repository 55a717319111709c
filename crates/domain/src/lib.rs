// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod calendar;
mod capacity;
mod error;
mod slug;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{WeeklyDates, civil_date_in_zone, day_key, parse_civil_date};
pub use capacity::{
    CapacityFigures, SeatOccupant, SessionFill, TWO_INSTRUCTOR_MINIMUM_SEATS, compute_capacity,
    effective_capacity, seat_weight,
};
pub use error::DomainError;
pub use slug::slugify;

// Re-export public types
pub use types::{
    AttendanceRecord, AttendanceStatus, ClassOffering, ClassRatio, ClassSession, ClassTemplate,
    Enrollment, EnrollmentSkip, EnrollmentStatus, MakeUpBooking, MakeUpStatus, SessionStatus,
    Student, Term, TermScheduleSpec, TimeOfDay, TrialBooking, TrialStatus, Weekday,
};
pub use validation::{
    validate_date_range, validate_duration, validate_time_of_day, validate_week_count,
    validate_weekday_index,
};
