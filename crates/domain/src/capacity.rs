// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weighted seat accounting for class sessions.
//!
//! Two distinct capacity models live here on purpose:
//!
//! - [`compute_capacity`] is the booking-gate model: ratio-weighted fill with
//!   the two-instructor minimum-capacity floor applied.
//! - [`SessionFill`] is the display model used by the roster views: plain
//!   integer counts against the offering's raw stored capacity, no floor.
//!
//! The two can disagree on how many seats are open. That divergence exists in
//! production behavior and is preserved pending product clarification; do not
//! unify them.

use crate::types::ClassRatio;

/// Weighted seats guaranteed whenever two or more instructors are staffed,
/// regardless of the nominally configured capacity.
pub const TWO_INSTRUCTOR_MINIMUM_SEATS: i64 = 5;

/// One seat-consuming party in a session, carrying its ratio label if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatOccupant {
    /// The staffing-ratio label, when the occupant has one.
    pub ratio: Option<ClassRatio>,
}

impl SeatOccupant {
    /// An occupant with an explicit ratio label.
    #[must_use]
    pub const fn with_ratio(ratio: ClassRatio) -> Self {
        Self { ratio: Some(ratio) }
    }

    /// An occupant with no label; weighted as a group seat.
    #[must_use]
    pub const fn unlabeled() -> Self {
        Self { ratio: None }
    }
}

/// The occupancy accounting triad for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityFigures {
    /// Sum of occupant seat weights; may be fractional.
    pub filled: f64,
    /// Base capacity with the two-instructor floor applied.
    pub effective_capacity: i64,
    /// Whole open seats remaining; never negative.
    pub open_seats: i64,
}

impl CapacityFigures {
    /// Whether the weighted fill has reached effective capacity.
    ///
    /// This is the booking-gate condition: a session with a fractional sliver
    /// of capacity left (zero whole open seats but `filled` still below the
    /// line) is not yet full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled >= self.effective_capacity as f64
    }
}

/// Seat weight for a ratio label. Unknown and absent labels weigh 1.
#[must_use]
pub fn seat_weight(ratio: Option<&ClassRatio>) -> f64 {
    match ratio {
        Some(ClassRatio::OneToOne) => 3.0,
        Some(ClassRatio::TwoToOne) => 1.5,
        Some(ClassRatio::ThreeToOne) | Some(ClassRatio::Other(_)) | None => 1.0,
    }
}

/// Effective capacity: the configured base, floored at
/// [`TWO_INSTRUCTOR_MINIMUM_SEATS`] when two or more instructors are staffed.
#[must_use]
pub const fn effective_capacity(base_capacity: i64, instructor_count: i64) -> i64 {
    let floor = if instructor_count >= 2 {
        TWO_INSTRUCTOR_MINIMUM_SEATS
    } else {
        0
    };
    if base_capacity >= floor {
        base_capacity
    } else {
        floor
    }
}

/// Computes weighted fill, effective capacity, and whole open seats.
///
/// Pure and deterministic; `open_seats` is `max(0, floor(effective - filled))`.
#[must_use]
pub fn compute_capacity(
    occupants: &[SeatOccupant],
    instructor_count: i64,
    base_capacity: i64,
) -> CapacityFigures {
    let filled: f64 = occupants
        .iter()
        .map(|o| seat_weight(o.ratio.as_ref()))
        .sum();
    let effective = effective_capacity(base_capacity, instructor_count);
    let open = (effective as f64 - filled).floor().max(0.0) as i64;

    CapacityFigures {
        filled,
        effective_capacity: effective,
        open_seats: open,
    }
}

/// Per-session integer counts feeding the roster display views.
///
/// Unlike [`compute_capacity`], this model weighs every party as one seat and
/// measures against the offering's raw stored capacity with no instructor
/// floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFill {
    /// Active enrollments in the session's offering.
    pub regulars: i64,
    /// Skip records against this session.
    pub skips: i64,
    /// Excused attendance records against this session.
    pub excused: i64,
    /// Seat-occupying make-up bookings for this session.
    pub make_ups: i64,
    /// Seat-occupying trial bookings for this session.
    pub trials: i64,
}

impl SessionFill {
    /// Seats counted as filled: regulars less skips and excused (floored at
    /// zero), plus make-ups and trials.
    #[must_use]
    pub const fn filled(&self) -> i64 {
        let regulars_present = self.regulars - self.skips - self.excused;
        let regulars_present = if regulars_present > 0 {
            regulars_present
        } else {
            0
        };
        regulars_present + self.make_ups + self.trials
    }

    /// Open seats against the raw stored capacity; never negative.
    #[must_use]
    pub const fn open_seats(&self, capacity: i64) -> i64 {
        let open = capacity - self.filled();
        if open > 0 { open } else { 0 }
    }
}
