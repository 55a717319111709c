// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A day of the week in the scheduling calendar, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weekday(u8);

impl Weekday {
    /// Creates a `Weekday` from a 0-based index (0 = Sunday).
    ///
    /// # Errors
    ///
    /// Returns an error if the index is outside 0..=6.
    pub fn new(index: i64) -> Result<Self, DomainError> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i <= 6)
            .map(Self)
            .ok_or(DomainError::InvalidWeekday(index))
    }

    /// Returns the 0-based index (0 = Sunday).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Converts from a `chrono` weekday.
    #[must_use]
    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        Self(weekday.num_days_from_sunday() as u8)
    }

    /// The number of days forward from `from` to the next occurrence of this
    /// weekday, modulo 7 (zero when they already match).
    #[must_use]
    pub fn days_from(self, from: chrono::Weekday) -> u8 {
        let from_index = from.num_days_from_sunday() as u8;
        (self.0 + 7 - from_index) % 7
    }

    /// Returns the weekday name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            _ => "Saturday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A wall-clock time of day with minute precision, stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parses a strict `HH:MM` string: exactly five characters, zero-padded,
    /// 00-23 hours and 00-59 minutes. Anything looser is rejected so session
    /// times stored as text stay byte-comparable.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match the shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let bytes = value.as_bytes();
        let invalid = || DomainError::InvalidTimeOfDay(value.to_string());

        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        for &b in [bytes[0], bytes[1], bytes[3], bytes[4]].iter() {
            if !b.is_ascii_digit() {
                return Err(invalid());
            }
        }

        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }

    /// Returns the hour (0-23).
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn as_minutes(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Adds a number of minutes, wrapping modulo 24 hours.
    #[must_use]
    pub const fn add_minutes(self, minutes: u32) -> Self {
        let total = (self.as_minutes() + minutes) % (24 * 60);
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A staffing-ratio label attached to an enrollment.
///
/// The label drives seat weighting: a private lesson consumes more of a
/// session's capacity than a group seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassRatio {
    /// Private lesson ("1:1").
    OneToOne,
    /// Semi-private lesson ("2:1").
    TwoToOne,
    /// Group lesson ("3:1").
    ThreeToOne,
    /// Any other label; treated as a group seat for weighting.
    Other(String),
}

impl ClassRatio {
    /// Parses a ratio label. Unknown labels are preserved, never rejected.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "1:1" => Self::OneToOne,
            "2:1" => Self::TwoToOne,
            "3:1" => Self::ThreeToOne,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the label as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OneToOne => "1:1",
            Self::TwoToOne => "2:1",
            Self::ThreeToOne => "3:1",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for ClassRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a generated class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    /// Generated and expected to run.
    #[default]
    Scheduled,
    /// Called off; keeps its calendar slot.
    Canceled,
    /// The session date has passed and attendance is recorded.
    Completed,
}

impl SessionStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "canceled" => Ok(Self::Canceled),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                kind: "session",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EnrollmentStatus {
    /// Occupies a seat in every session of its offering.
    #[default]
    Active,
    /// Ended; occupies nothing.
    Inactive,
    /// Superseded by a transfer to another offering.
    Transferred,
}

impl EnrollmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Transferred => "transferred",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "transferred" => Ok(Self::Transferred),
            _ => Err(DomainError::InvalidStatus {
                kind: "enrollment",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recorded attendance for one enrollment at one session.
///
/// An `Excused` record frees the student's seat for that session, exactly
/// like a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Attended.
    Present,
    /// Did not attend, seat still counted.
    Absent,
    /// Excused ahead of time; seat freed.
    Excused,
}

impl AttendanceStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Excused => "excused",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "excused" => Ok(Self::Excused),
            _ => Err(DomainError::InvalidStatus {
                kind: "attendance",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a make-up booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MakeUpStatus {
    /// Asked for, not yet granted a seat.
    Requested,
    /// Granted a seat.
    Scheduled,
    /// Seat used.
    Attended,
    /// Withdrawn.
    Cancelled,
    /// Seat granted but unused.
    Missed,
}

impl MakeUpStatus {
    /// Whether a booking in this status consumes a seat.
    #[must_use]
    pub const fn occupies_seat(self) -> bool {
        matches!(self, Self::Scheduled | Self::Attended)
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Scheduled => "scheduled",
            Self::Attended => "attended",
            Self::Cancelled => "cancelled",
            Self::Missed => "missed",
        }
    }
}

impl FromStr for MakeUpStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "scheduled" => Ok(Self::Scheduled),
            "attended" => Ok(Self::Attended),
            "cancelled" => Ok(Self::Cancelled),
            "missed" => Ok(Self::Missed),
            _ => Err(DomainError::InvalidStatus {
                kind: "make-up",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MakeUpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a trial booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrialStatus {
    /// Granted a seat.
    Scheduled,
    /// Seat used.
    Attended,
    /// Seat granted but unused.
    NoShow,
    /// Converted into a full student enrollment.
    Converted,
    /// Withdrawn.
    Cancelled,
}

impl TrialStatus {
    /// Whether a booking in this status consumes a seat.
    #[must_use]
    pub const fn occupies_seat(self) -> bool {
        matches!(self, Self::Scheduled | Self::Attended)
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Attended => "attended",
            Self::NoShow => "noshow",
            Self::Converted => "converted",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TrialStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "attended" => Ok(Self::Attended),
            "noshow" => Ok(Self::NoShow),
            "converted" => Ok(Self::Converted),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                kind: "trial",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduling horizon (e.g. a season) containing offerings and their
/// generated sessions. Immutable after creation in this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Canonical identifier assigned by the database.
    pub term_id: i64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe key.
    pub slug: String,
    /// First calendar date of the term.
    pub start_date: NaiveDate,
    /// Last calendar date of the term.
    pub end_date: NaiveDate,
    /// Resolved staff id of the creator.
    pub created_by: i64,
}

/// A recurring weekly class slot (weekday + time) within a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOffering {
    /// Canonical identifier assigned by the database.
    pub offering_id: i64,
    /// The owning term.
    pub term_id: i64,
    /// Display title.
    pub title: String,
    /// Day of the week the class meets.
    pub weekday: Weekday,
    /// Wall-clock start time.
    pub start_time: TimeOfDay,
    /// Wall-clock end time, derived from start time + duration.
    pub end_time: TimeOfDay,
    /// Class length in minutes.
    pub duration_minutes: i64,
    /// Nominally configured seat capacity.
    pub capacity: i64,
    /// Instructors staffed on the offering.
    pub instructor_count: i64,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// One concrete calendar occurrence of an offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Canonical identifier assigned by the database.
    pub session_id: i64,
    /// The owning offering.
    pub offering_id: i64,
    /// The calendar date; unique per offering.
    pub session_date: NaiveDate,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A student known to the school. Managed by external record services; read
/// here only for roster identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Canonical identifier assigned by the database.
    pub student_id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl Student {
    /// The roster display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student's standing registration in an offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Canonical identifier assigned by the database.
    pub enrollment_id: i64,
    /// The enrolled student.
    pub student_id: i64,
    /// The offering the student attends.
    pub offering_id: i64,
    /// Lifecycle status.
    pub status: EnrollmentStatus,
    /// The date the enrollment took effect.
    pub enroll_date: NaiveDate,
    /// The date the enrollment ended, if it has.
    pub end_date: Option<NaiveDate>,
    /// Staffing-ratio label driving seat weight.
    pub class_ratio: ClassRatio,
    /// The enrollment this one was transferred from, if any.
    pub transferred_from_id: Option<i64>,
    /// The enrollment this one was transferred to, if any.
    pub transferred_to_id: Option<i64>,
    /// RFC 3339 timestamp of the transfer, if any.
    pub transferred_at: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A per-session exception removing one enrollment's seat usage without
/// ending the enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentSkip {
    /// Canonical identifier assigned by the database.
    pub skip_id: i64,
    /// The skipping enrollment.
    pub enrollment_id: i64,
    /// The skipped session.
    pub class_session_id: i64,
}

/// Recorded attendance for one enrollment at one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Canonical identifier assigned by the database.
    pub attendance_id: i64,
    /// The attending enrollment.
    pub enrollment_id: i64,
    /// The session attended.
    pub class_session_id: i64,
    /// Attendance outcome.
    pub status: AttendanceStatus,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A one-off seat reservation for an enrolled student outside their regular
/// offering, tied to one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeUpBooking {
    /// Canonical identifier assigned by the database.
    pub makeup_id: i64,
    /// The booking student.
    pub student_id: i64,
    /// The session booked into.
    pub class_session_id: i64,
    /// Lifecycle status.
    pub status: MakeUpStatus,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A prospective (non-enrolled) attendee's one-off seat reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBooking {
    /// Canonical identifier assigned by the database.
    pub trial_id: i64,
    /// The session booked into.
    pub class_session_id: i64,
    /// The visiting child's name.
    pub child_name: String,
    /// The visiting child's age, if known.
    pub child_age: Option<i64>,
    /// A contact phone number, if given.
    pub contact_phone: Option<String>,
    /// Lifecycle status.
    pub status: TrialStatus,
    /// The student record created on conversion, if any.
    pub converted_student_id: Option<i64>,
}

/// One weekly class slot to generate when creating a term schedule.
///
/// Fields are already validated domain values; the api boundary builds these
/// from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTemplate {
    /// Display title for the offering.
    pub title: String,
    /// Day of the week the class meets.
    pub weekday: Weekday,
    /// Wall-clock start time.
    pub start_time: TimeOfDay,
    /// Class length in minutes.
    pub duration_minutes: i64,
    /// Nominally configured seat capacity.
    pub capacity: i64,
    /// Instructors staffed on the offering.
    pub instructor_count: i64,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl ClassTemplate {
    /// The derived wall-clock end time, wrapping modulo 24 hours.
    #[must_use]
    pub const fn end_time(&self) -> TimeOfDay {
        self.start_time.add_minutes(self.duration_minutes as u32)
    }
}

/// A validated request to create a term and its full schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermScheduleSpec {
    /// Display name for the term.
    pub name: String,
    /// Explicit slug; when absent the name is slugified.
    pub slug: Option<String>,
    /// First calendar date of the term.
    pub start_date: NaiveDate,
    /// Last calendar date of the term.
    pub end_date: NaiveDate,
    /// Maximum number of sessions generated per offering.
    pub week_count: u32,
    /// The weekly class slots to generate.
    pub templates: Vec<ClassTemplate>,
    /// Resolved staff id of the creator.
    pub created_by: i64,
}
