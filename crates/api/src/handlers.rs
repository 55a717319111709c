// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the scheduling engine's operations.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::info;

use swim_sched_domain::{
    AttendanceRecord, ClassOffering, ClassTemplate, DomainError, MakeUpBooking, SessionFill,
    TermScheduleSpec, TrialBooking, civil_date_in_zone, day_key, parse_civil_date,
    validate_date_range, validate_duration, validate_time_of_day, validate_week_count,
    validate_weekday_index,
};
use swim_sched_persistence::{Persistence, RosterBundle, TransferCommand};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    BookMakeUpRequest, BookMakeUpResponse, BookTrialRequest, BookTrialResponse,
    CreateTermScheduleRequest, CreateTermScheduleResponse, CreatedOfferingInfo,
    DailyScheduleRequest, DailyScheduleResponse, DayRosterInfo, MakeUpAvailabilityRequest,
    MakeUpAvailabilityResponse, MakeUpInfo, RosterEntryInfo, ScheduleSlotRequest,
    ScheduleSlotResponse, SessionRosterInfo, TransferEnrollmentRequest,
    TransferEnrollmentResponse, TrialInfo,
};
use crate::{ApiOutcome, ChangeDescription, ResolvedStaff};

/// Default number of sessions generated per offering.
const DEFAULT_WEEK_COUNT: i64 = 8;

fn invalid(field: &str, err: DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn parse_date_field(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    parse_civil_date(value).map_err(|e| invalid(field, e))
}

/// Creates a term, one offering per template, and the full set of dated
/// sessions.
///
/// Every shape check runs before any write; the creation itself is a single
/// transaction in the store.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed request (empty name or template
/// list, bad weekday/time/date/duration shapes), or a translated store
/// error.
pub fn create_term_with_schedule(
    persistence: &mut Persistence,
    request: &CreateTermScheduleRequest,
    actor: &ResolvedStaff,
) -> Result<ApiOutcome<CreateTermScheduleResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Term name cannot be empty"),
        });
    }
    if request.templates.is_empty() {
        return Err(invalid("templates", DomainError::EmptyTemplateList));
    }

    let start_date = parse_date_field("start_date", &request.start_date)?;
    let end_date = parse_date_field("end_date", &request.end_date)?;
    validate_date_range(start_date, end_date).map_err(|e| invalid("end_date", e))?;
    let week_count = validate_week_count(request.week_count.unwrap_or(DEFAULT_WEEK_COUNT))
        .map_err(|e| invalid("week_count", e))?;

    let mut templates: Vec<ClassTemplate> = Vec::with_capacity(request.templates.len());
    for input in &request.templates {
        let weekday = validate_weekday_index(input.weekday).map_err(|e| invalid("weekday", e))?;
        let start_time =
            validate_time_of_day(&input.start_time).map_err(|e| invalid("start_time", e))?;
        validate_duration(input.duration_minutes).map_err(|e| invalid("duration_minutes", e))?;
        if input.capacity < 0 {
            return Err(invalid(
                "capacity",
                DomainError::InvalidCapacity {
                    value: input.capacity,
                },
            ));
        }
        let instructor_count = input.instructor_count.unwrap_or(1);
        if instructor_count < 0 {
            return Err(ApiError::InvalidInput {
                field: String::from("instructor_count"),
                message: format!(
                    "Invalid instructor count: {instructor_count}. Must not be negative"
                ),
            });
        }

        templates.push(ClassTemplate {
            title: input.title.clone(),
            weekday,
            start_time,
            duration_minutes: input.duration_minutes,
            capacity: input.capacity,
            instructor_count,
            notes: input.notes.clone(),
        });
    }

    let spec = TermScheduleSpec {
        name: request.name.clone(),
        slug: request.slug.clone(),
        start_date,
        end_date,
        week_count,
        templates,
        created_by: actor.staff_id,
    };

    let created = persistence
        .create_term_with_schedule(&spec)
        .map_err(translate_persistence_error)?;

    info!(
        term_id = created.term_id,
        slug = %created.slug,
        offering_count = created.offerings.len(),
        "Term schedule created"
    );

    let offerings: Vec<CreatedOfferingInfo> = created
        .offerings
        .iter()
        .map(|offering| CreatedOfferingInfo {
            offering_id: offering.offering_id,
            title: offering.title.clone(),
            weekday: i64::from(offering.weekday.index()),
            start_time: offering.start_time.to_string(),
            end_time: offering.end_time.to_string(),
            session_count: offering.session_count as i64,
        })
        .collect();
    let session_total: i64 = offerings.iter().map(|o| o.session_count).sum();

    let change = ChangeDescription {
        operation: String::from("create_term_with_schedule"),
        entity: String::from("term"),
        entity_id: created.term_id,
        summary: format!(
            "Created term '{}' ({}) with {} offerings and {} sessions",
            request.name,
            created.slug,
            offerings.len(),
            session_total
        ),
        actor_staff_id: actor.staff_id,
    };

    Ok(ApiOutcome {
        response: CreateTermScheduleResponse {
            term_id: created.term_id,
            slug: created.slug,
            message: format!("Term '{}' created", request.name),
            offerings,
        },
        change,
    })
}

/// Returns the roster view for one weekday/time slot of a term: every
/// session of the matching offerings, grouped by date ascending.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed weekday or time shape,
/// `ResourceNotFound` for a missing term, or a translated store error.
pub fn get_schedule_slot(
    persistence: &mut Persistence,
    request: &ScheduleSlotRequest,
) -> Result<ScheduleSlotResponse, ApiError> {
    let weekday = validate_weekday_index(request.weekday).map_err(|e| invalid("weekday", e))?;
    let start_time =
        validate_time_of_day(&request.start_time).map_err(|e| invalid("start_time", e))?;
    let end_time = validate_time_of_day(&request.end_time).map_err(|e| invalid("end_time", e))?;

    let (term, bundle) = persistence
        .load_slot_bundle(request.term_id, weekday, start_time, end_time)
        .map_err(translate_persistence_error)?;

    let sessions = assemble_session_rosters(&bundle);

    // Sessions arrive date ascending; fold consecutive equal dates together.
    let mut days: Vec<DayRosterInfo> = Vec::new();
    for session in sessions {
        if let Some(day) = days.last_mut() {
            if day.date == session.session_date {
                day.sessions.push(session);
                continue;
            }
        }
        days.push(DayRosterInfo {
            date: session.session_date.clone(),
            sessions: vec![session],
        });
    }

    Ok(ScheduleSlotResponse {
        term_id: term.term_id,
        term_name: term.name,
        term_slug: term.slug,
        weekday: i64::from(weekday.index()),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        days,
    })
}

/// Returns the roster view for one calendar date across all offerings,
/// ordered by offering start time.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed date, or a translated store error.
pub fn get_daily_schedule(
    persistence: &mut Persistence,
    request: &DailyScheduleRequest,
) -> Result<DailyScheduleResponse, ApiError> {
    let date = parse_date_field("date", &request.date)?;

    let bundle = persistence
        .load_day_bundle(date)
        .map_err(translate_persistence_error)?;

    let start_times: HashMap<i64, String> = bundle
        .offerings
        .iter()
        .map(|o| (o.offering_id, o.start_time.to_string()))
        .collect();
    let mut sessions = assemble_session_rosters(&bundle);
    sessions.sort_by(|a, b| {
        let a_start = start_times.get(&a.offering_id);
        let b_start = start_times.get(&b.offering_id);
        a_start.cmp(&b_start).then(a.offering_id.cmp(&b.offering_id))
    });

    Ok(DailyScheduleResponse {
        date: day_key(date),
        sessions,
    })
}

/// Checks whether a make-up booking for a student would currently be
/// accepted: resolves the session, the same-day conflict, and the weighted
/// occupancy with the two-instructor floor applied.
///
/// The check is advisory; the booking operation re-runs it inside its own
/// transaction.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed date, `ResourceNotFound` when the
/// offering has no session on the date, or a translated store error.
pub fn check_make_up_availability(
    persistence: &mut Persistence,
    request: &MakeUpAvailabilityRequest,
) -> Result<MakeUpAvailabilityResponse, ApiError> {
    let date = parse_date_field("date", &request.date)?;

    let usage = persistence
        .seat_usage(request.offering_id, date)
        .map_err(translate_persistence_error)?;
    let has_time_conflict = persistence
        .has_time_conflict(request.student_id, date)
        .map_err(translate_persistence_error)?;

    Ok(MakeUpAvailabilityResponse {
        session_id: usage.session_id,
        has_time_conflict,
        filled: usage.figures.filled,
        effective_capacity: usage.figures.effective_capacity,
        open_seats: usage.figures.open_seats,
        bookable: !has_time_conflict && !usage.figures.is_full(),
    })
}

/// Books a make-up seat for a student, seat-guarded inside one store
/// transaction.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed date, `ResourceNotFound` for a
/// missing offering or session, `Conflict` when the student already holds a
/// make-up for the session, has an obligation that date, or no weighted seat
/// remains, or a translated store error.
pub fn book_make_up(
    persistence: &mut Persistence,
    request: &BookMakeUpRequest,
    actor: &ResolvedStaff,
) -> Result<ApiOutcome<BookMakeUpResponse>, ApiError> {
    let date = parse_date_field("date", &request.date)?;

    let booking = persistence
        .book_make_up(
            request.student_id,
            request.offering_id,
            date,
            request.notes.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    info!(
        makeup_id = booking.makeup_id,
        student_id = booking.student_id,
        session_id = booking.class_session_id,
        "Make-up booked"
    );

    let change = ChangeDescription {
        operation: String::from("book_make_up"),
        entity: String::from("makeup_booking"),
        entity_id: booking.makeup_id,
        summary: format!(
            "Booked make-up seat for student {} in session {} on {}",
            booking.student_id, booking.class_session_id, request.date
        ),
        actor_staff_id: actor.staff_id,
    };

    Ok(ApiOutcome {
        response: BookMakeUpResponse {
            makeup_id: booking.makeup_id,
            session_id: booking.class_session_id,
            status: booking.status.to_string(),
            message: String::from("Make-up booked"),
        },
        change,
    })
}

/// Books a trial seat for a prospective attendee, seat-guarded inside one
/// store transaction.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed date or empty child name,
/// `ResourceNotFound` for a missing offering or session, `Conflict` when no
/// weighted seat remains, or a translated store error.
pub fn book_trial(
    persistence: &mut Persistence,
    request: &BookTrialRequest,
    actor: &ResolvedStaff,
) -> Result<ApiOutcome<BookTrialResponse>, ApiError> {
    if request.child_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("child_name"),
            message: String::from("Child name cannot be empty"),
        });
    }
    let date = parse_date_field("date", &request.date)?;

    let booking = persistence
        .book_trial(
            request.offering_id,
            date,
            &request.child_name,
            request.child_age,
            request.contact_phone.as_deref(),
        )
        .map_err(translate_persistence_error)?;

    info!(
        trial_id = booking.trial_id,
        session_id = booking.class_session_id,
        "Trial booked"
    );

    let change = ChangeDescription {
        operation: String::from("book_trial"),
        entity: String::from("trial_booking"),
        entity_id: booking.trial_id,
        summary: format!(
            "Booked trial seat for '{}' in session {} on {}",
            booking.child_name, booking.class_session_id, request.date
        ),
        actor_staff_id: actor.staff_id,
    };

    Ok(ApiOutcome {
        response: BookTrialResponse {
            trial_id: booking.trial_id,
            session_id: booking.class_session_id,
            status: booking.status.to_string(),
            message: String::from("Trial booked"),
        },
        change,
    })
}

/// Moves an active enrollment to another offering of the same term,
/// remapping attendance and skip history session-by-session, atomically.
///
/// The transfer takes effect on the current civil date in `tz`, the
/// school's timezone.
///
/// # Errors
///
/// Returns `ResourceNotFound` for a missing enrollment or target offering,
/// `Conflict` when the enrollment is not active, the terms differ, or the
/// student already has an enrollment in the target offering, or a
/// translated store error.
pub fn transfer_enrollment(
    persistence: &mut Persistence,
    request: &TransferEnrollmentRequest,
    actor: &ResolvedStaff,
    tz: Tz,
) -> Result<ApiOutcome<TransferEnrollmentResponse>, ApiError> {
    let now = Utc::now();
    let command = TransferCommand {
        enrollment_id: request.enrollment_id,
        target_offering_id: request.target_offering_id,
        skipped_session_ids: request.skipped_session_ids.clone(),
        notes: request.notes.clone(),
        transfer_date: civil_date_in_zone(now, tz),
        transferred_at: now.to_rfc3339(),
    };

    let outcome = persistence
        .transfer_enrollment(&command)
        .map_err(translate_persistence_error)?;

    info!(
        old_enrollment_id = outcome.old_enrollment_id,
        new_enrollment_id = outcome.new_enrollment_id,
        "Enrollment transferred"
    );

    let change = ChangeDescription {
        operation: String::from("transfer_enrollment"),
        entity: String::from("enrollment"),
        entity_id: outcome.new_enrollment_id,
        summary: format!(
            "Transferred enrollment {} to offering {} as enrollment {} ({} attendance copied, {} skips)",
            outcome.old_enrollment_id,
            request.target_offering_id,
            outcome.new_enrollment_id,
            outcome.attendance_copied,
            outcome.skips_created
        ),
        actor_staff_id: actor.staff_id,
    };

    Ok(ApiOutcome {
        response: TransferEnrollmentResponse {
            old_enrollment_id: outcome.old_enrollment_id,
            new_enrollment_id: outcome.new_enrollment_id,
            attendance_copied: outcome.attendance_copied as i64,
            skips_created: outcome.skips_created as i64,
            message: String::from("Enrollment transferred"),
        },
        change,
    })
}

/// Builds the per-session roster rows for a loaded bundle, in the bundle's
/// session order (date ascending).
///
/// Fill figures follow the display model: integer counts from the bundle's
/// pre-aggregated per-session totals, measured against raw stored capacity.
fn assemble_session_rosters(bundle: &RosterBundle) -> Vec<SessionRosterInfo> {
    let offerings_by_id: HashMap<i64, &ClassOffering> = bundle
        .offerings
        .iter()
        .map(|offering| (offering.offering_id, offering))
        .collect();

    let mut regulars_by_offering: HashMap<i64, i64> = HashMap::new();
    for (enrollment, _) in &bundle.enrollments {
        *regulars_by_offering.entry(enrollment.offering_id).or_insert(0) += 1;
    }

    let skipped_pairs: HashSet<(i64, i64)> = bundle
        .skips
        .iter()
        .map(|skip| (skip.enrollment_id, skip.class_session_id))
        .collect();
    let attendance_by_pair: HashMap<(i64, i64), &AttendanceRecord> = bundle
        .attendance
        .iter()
        .map(|record| ((record.enrollment_id, record.class_session_id), record))
        .collect();

    let mut make_ups_by_session: HashMap<i64, Vec<&MakeUpBooking>> = HashMap::new();
    for booking in &bundle.make_ups {
        make_ups_by_session
            .entry(booking.class_session_id)
            .or_default()
            .push(booking);
    }
    let mut trials_by_session: HashMap<i64, Vec<&TrialBooking>> = HashMap::new();
    for booking in &bundle.trials {
        trials_by_session
            .entry(booking.class_session_id)
            .or_default()
            .push(booking);
    }

    let count_for = |map: &HashMap<i64, i64>, session_id: i64| -> i64 {
        map.get(&session_id).copied().unwrap_or(0)
    };

    let mut rosters: Vec<SessionRosterInfo> = Vec::with_capacity(bundle.sessions.len());
    for session in &bundle.sessions {
        let Some(offering) = offerings_by_id.get(&session.offering_id) else {
            continue;
        };

        let fill = SessionFill {
            regulars: count_for(&regulars_by_offering, session.offering_id),
            skips: count_for(&bundle.skip_counts, session.session_id),
            excused: count_for(&bundle.excused_counts, session.session_id),
            make_ups: count_for(&bundle.make_up_counts, session.session_id),
            trials: count_for(&bundle.trial_counts, session.session_id),
        };

        let enrollments: Vec<RosterEntryInfo> = bundle
            .enrollments
            .iter()
            .filter(|(enrollment, _)| enrollment.offering_id == session.offering_id)
            .map(|(enrollment, student)| {
                let pair = (enrollment.enrollment_id, session.session_id);
                let attendance = attendance_by_pair.get(&pair);
                RosterEntryInfo {
                    enrollment_id: enrollment.enrollment_id,
                    student_id: student.student_id,
                    student_name: student.display_name(),
                    class_ratio: enrollment.class_ratio.as_str().to_string(),
                    skipped: skipped_pairs.contains(&pair),
                    attendance_status: attendance.map(|record| record.status.to_string()),
                    attendance_notes: attendance.and_then(|record| record.notes.clone()),
                }
            })
            .collect();

        let make_ups: Vec<MakeUpInfo> = make_ups_by_session
            .get(&session.session_id)
            .map(|bookings| {
                bookings
                    .iter()
                    .map(|booking| MakeUpInfo {
                        makeup_id: booking.makeup_id,
                        student_id: booking.student_id,
                        status: booking.status.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let trials: Vec<TrialInfo> = trials_by_session
            .get(&session.session_id)
            .map(|bookings| {
                bookings
                    .iter()
                    .map(|booking| TrialInfo {
                        trial_id: booking.trial_id,
                        child_name: booking.child_name.clone(),
                        status: booking.status.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        rosters.push(SessionRosterInfo {
            session_id: session.session_id,
            offering_id: session.offering_id,
            offering_title: offering.title.clone(),
            session_date: day_key(session.session_date),
            status: session.status.to_string(),
            capacity: offering.capacity,
            instructor_count: offering.instructor_count,
            regulars: fill.regulars,
            skip_count: fill.skips,
            excused_count: fill.excused,
            make_up_count: fill.make_ups,
            trial_count: fill.trials,
            filled: fill.filled(),
            open_seats: fill.open_seats(offering.capacity),
            enrollments,
            make_ups,
            trials,
        });
    }

    rosters
}
