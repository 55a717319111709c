// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These are distinct from domain types and represent the API contract.
//! Dates travel as `YYYY-MM-DD` strings, times as `HH:MM`, weekdays as
//! 0-based indices (0 = Sunday); validation happens in the handlers.

use serde::{Deserialize, Serialize};

/// One weekly class slot to generate when creating a term schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTemplateInput {
    /// Display title for the offering.
    pub title: String,
    /// Day of the week, 0 = Sunday through 6 = Saturday.
    pub weekday: i64,
    /// Wall-clock start time, strict `HH:MM`.
    pub start_time: String,
    /// Class length in minutes.
    pub duration_minutes: i64,
    /// Nominally configured seat capacity.
    pub capacity: i64,
    /// Instructors staffed on the offering; defaults to 1.
    pub instructor_count: Option<i64>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// API request to create a term and its full schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTermScheduleRequest {
    /// Display name for the term.
    pub name: String,
    /// Explicit slug; slugified from the name when absent.
    pub slug: Option<String>,
    /// First calendar date of the term, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last calendar date of the term, `YYYY-MM-DD`.
    pub end_date: String,
    /// Maximum sessions generated per offering; defaults to 8.
    pub week_count: Option<i64>,
    /// The weekly class slots to generate.
    pub templates: Vec<ClassTemplateInput>,
}

/// One offering created during term generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOfferingInfo {
    /// The new offering's id.
    pub offering_id: i64,
    /// The offering title.
    pub title: String,
    /// Day of the week, 0 = Sunday.
    pub weekday: i64,
    /// Wall-clock start time.
    pub start_time: String,
    /// Derived wall-clock end time.
    pub end_time: String,
    /// How many sessions were generated.
    pub session_count: i64,
}

/// API response for a successful term-with-schedule creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTermScheduleResponse {
    /// The new term's id.
    pub term_id: i64,
    /// The resolved unique slug.
    pub slug: String,
    /// The offerings created, in template order.
    pub offerings: Vec<CreatedOfferingInfo>,
    /// A success message.
    pub message: String,
}

/// API request for the weekday/time-slot roster view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlotRequest {
    /// The term under view.
    pub term_id: i64,
    /// Day of the week, 0 = Sunday through 6 = Saturday.
    pub weekday: i64,
    /// Slot start time, strict `HH:MM`.
    pub start_time: String,
    /// Slot end time, strict `HH:MM`.
    pub end_time: String,
}

/// One enrollment's row in a session roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntryInfo {
    /// The enrollment.
    pub enrollment_id: i64,
    /// The enrolled student.
    pub student_id: i64,
    /// The student's display name.
    pub student_name: String,
    /// The staffing-ratio label.
    pub class_ratio: String,
    /// Whether the enrollment skips this session.
    pub skipped: bool,
    /// The matched attendance status for this session, if recorded.
    pub attendance_status: Option<String>,
    /// Notes on the matched attendance record, if any.
    pub attendance_notes: Option<String>,
}

/// A make-up booking shown on a session roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeUpInfo {
    /// The booking.
    pub makeup_id: i64,
    /// The booking student.
    pub student_id: i64,
    /// The booking's lifecycle status.
    pub status: String,
}

/// A trial booking shown on a session roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialInfo {
    /// The booking.
    pub trial_id: i64,
    /// The visiting child's name.
    pub child_name: String,
    /// The booking's lifecycle status.
    pub status: String,
}

/// One session's roster with its computed capacity figures.
///
/// `filled` and `open_seats` here are the display model: integer counts
/// measured against the offering's raw stored capacity, with no
/// two-instructor floor. The booking gate computes its own weighted figures
/// and may disagree; see the availability operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRosterInfo {
    /// The session.
    pub session_id: i64,
    /// The owning offering.
    pub offering_id: i64,
    /// The owning offering's title.
    pub offering_title: String,
    /// The calendar date, `YYYY-MM-DD`.
    pub session_date: String,
    /// The session's lifecycle status.
    pub status: String,
    /// The offering's raw stored capacity.
    pub capacity: i64,
    /// Instructors staffed on the offering.
    pub instructor_count: i64,
    /// Active enrollments in the offering.
    pub regulars: i64,
    /// Skip records against this session.
    pub skip_count: i64,
    /// Excused attendance records against this session.
    pub excused_count: i64,
    /// Seat-occupying make-up bookings for this session.
    pub make_up_count: i64,
    /// Seat-occupying trial bookings for this session.
    pub trial_count: i64,
    /// Seats counted as filled by the display model.
    pub filled: i64,
    /// Open seats against raw capacity; never negative.
    pub open_seats: i64,
    /// Per-enrollment roster rows.
    pub enrollments: Vec<RosterEntryInfo>,
    /// Make-up bookings tied to this session, any status.
    pub make_ups: Vec<MakeUpInfo>,
    /// Trial bookings tied to this session, any status.
    pub trials: Vec<TrialInfo>,
}

/// One calendar date's sessions in the slot view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRosterInfo {
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// The sessions on that date, one per sibling offering.
    pub sessions: Vec<SessionRosterInfo>,
}

/// API response for the weekday/time-slot roster view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlotResponse {
    /// The term under view.
    pub term_id: i64,
    /// The term's display name.
    pub term_name: String,
    /// The term's slug.
    pub term_slug: String,
    /// Day of the week, 0 = Sunday.
    pub weekday: i64,
    /// Slot start time.
    pub start_time: String,
    /// Slot end time.
    pub end_time: String,
    /// Dates ascending, each with its per-session rosters.
    pub days: Vec<DayRosterInfo>,
}

/// API request for the single-day roster view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScheduleRequest {
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
}

/// API response for the single-day roster view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScheduleResponse {
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// The sessions on that date, ordered by offering start time.
    pub sessions: Vec<SessionRosterInfo>,
}

/// API request for the seat-availability and conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeUpAvailabilityRequest {
    /// The student seeking a make-up seat.
    pub student_id: i64,
    /// The offering to book into.
    pub offering_id: i64,
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
}

/// API response for the seat-availability and conflict check.
///
/// Figures come from the booking-gate model: ratio-weighted fill with the
/// two-instructor capacity floor applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeUpAvailabilityResponse {
    /// The resolved session.
    pub session_id: i64,
    /// Whether the student already has a class obligation on the date.
    pub has_time_conflict: bool,
    /// Weighted fill; may be fractional.
    pub filled: f64,
    /// Effective capacity with the floor applied.
    pub effective_capacity: i64,
    /// Whole open seats remaining.
    pub open_seats: i64,
    /// Whether a booking would currently be accepted.
    pub bookable: bool,
}

/// API request to book a make-up seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMakeUpRequest {
    /// The booking student.
    pub student_id: i64,
    /// The offering to book into.
    pub offering_id: i64,
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// API response for a successful make-up booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMakeUpResponse {
    /// The new booking's id.
    pub makeup_id: i64,
    /// The session booked into.
    pub session_id: i64,
    /// The booking's lifecycle status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to book a trial seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTrialRequest {
    /// The offering to book into.
    pub offering_id: i64,
    /// The calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// The visiting child's name.
    pub child_name: String,
    /// The visiting child's age, if known.
    pub child_age: Option<i64>,
    /// A contact phone number, if given.
    pub contact_phone: Option<String>,
}

/// API response for a successful trial booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTrialResponse {
    /// The new booking's id.
    pub trial_id: i64,
    /// The session booked into.
    pub session_id: i64,
    /// The booking's lifecycle status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to transfer an enrollment to another offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEnrollmentRequest {
    /// The enrollment to move.
    pub enrollment_id: i64,
    /// The offering to move it to; must belong to the same term.
    pub target_offering_id: i64,
    /// Target-offering sessions the student will not attend.
    pub skipped_session_ids: Vec<i64>,
    /// Notes recorded on the closed-out source enrollment.
    pub notes: Option<String>,
}

/// API response for a successful enrollment transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEnrollmentResponse {
    /// The closed-out source enrollment.
    pub old_enrollment_id: i64,
    /// The newly created enrollment.
    pub new_enrollment_id: i64,
    /// Attendance rows copied onto paired target sessions.
    pub attendance_copied: i64,
    /// Skip rows created from the requested skip set.
    pub skips_created: i64,
    /// A success message.
    pub message: String,
}
