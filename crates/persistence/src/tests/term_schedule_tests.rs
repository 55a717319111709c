// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Term and schedule generation tests.

use chrono::Datelike;

use swim_sched_domain::{DomainError, SessionStatus, Weekday};

use crate::PersistenceError;
use crate::tests::helpers::{create_default_term, date, persistence, spec, template};

#[test]
fn generates_one_session_per_weekday_occurrence() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);

    assert_eq!(created.offerings.len(), 2);
    for offering in &created.offerings {
        assert_eq!(offering.session_count, 8);

        let sessions = persistence
            .sessions_for_offering(offering.offering_id)
            .unwrap();
        assert_eq!(sessions.len(), 8);
        for session in &sessions {
            assert_eq!(
                Weekday::from_chrono(session.session_date.weekday()),
                offering.weekday
            );
            assert_eq!(session.status, SessionStatus::Scheduled);
        }
        // Date ascending, one week apart.
        for pair in sessions.windows(2) {
            assert_eq!(pair[1].session_date - pair[0].session_date, chrono::Duration::days(7));
        }
    }
}

#[test]
fn week_count_caps_generated_sessions() {
    let mut persistence = persistence();
    let mut schedule_spec = spec("Short Block", vec![template("Mondays", 1, "09:00", 45, 4, 1)]);
    schedule_spec.week_count = 3;

    let created = persistence.create_term_with_schedule(&schedule_spec).unwrap();
    assert_eq!(created.offerings[0].session_count, 3);

    let sessions = persistence
        .sessions_for_offering(created.offerings[0].offering_id)
        .unwrap();
    let dates: Vec<_> = sessions.iter().map(|s| s.session_date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 1, 5), date(2026, 1, 12), date(2026, 1, 19)]
    );
}

#[test]
fn derives_end_time_from_duration() {
    let mut persistence = persistence();
    let created = persistence
        .create_term_with_schedule(&spec(
            "Evening",
            vec![template("Late Swim", 5, "23:30", 45, 4, 1)],
        ))
        .unwrap();

    let offering = persistence
        .offering_by_id(created.offerings[0].offering_id)
        .unwrap();
    assert_eq!(offering.start_time.to_string(), "23:30");
    assert_eq!(offering.end_time.to_string(), "00:15");
}

#[test]
fn slug_is_slugified_and_disambiguated() {
    let mut persistence = persistence();
    let first = persistence
        .create_term_with_schedule(&spec("Winter", vec![template("A", 1, "10:00", 30, 3, 1)]))
        .unwrap();
    let second = persistence
        .create_term_with_schedule(&spec("Winter", vec![template("B", 2, "10:00", 30, 3, 1)]))
        .unwrap();
    let third = persistence
        .create_term_with_schedule(&spec("Winter", vec![template("C", 3, "10:00", 30, 3, 1)]))
        .unwrap();

    assert_eq!(first.slug, "winter");
    assert_eq!(second.slug, "winter-2");
    assert_eq!(third.slug, "winter-3");
}

#[test]
fn explicit_slug_is_used_and_disambiguated() {
    let mut persistence = persistence();
    let mut with_slug = spec("Winter 2026", vec![template("A", 1, "10:00", 30, 3, 1)]);
    with_slug.slug = Some(String::from("winter-special"));

    let first = persistence.create_term_with_schedule(&with_slug).unwrap();
    let second = persistence.create_term_with_schedule(&with_slug).unwrap();

    assert_eq!(first.slug, "winter-special");
    assert_eq!(second.slug, "winter-special-2");
}

#[test]
fn empty_template_list_is_rejected_before_any_write() {
    let mut persistence = persistence();
    let empty = spec("Phantom", Vec::new());

    let err = persistence.create_term_with_schedule(&empty).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::RuleViolation(DomainError::EmptyTemplateList)
    );

    // Nothing persisted: the slug is still free for the next creation.
    let created = persistence
        .create_term_with_schedule(&spec("Phantom", vec![template("A", 1, "10:00", 30, 3, 1)]))
        .unwrap();
    assert_eq!(created.slug, "phantom");
}

#[test]
fn term_metadata_round_trips() {
    let mut persistence = persistence();
    let created = create_default_term(&mut persistence);

    let term = persistence.term_by_id(created.term_id).unwrap();
    assert_eq!(term.name, "Winter 2026");
    assert_eq!(term.slug, created.slug);
    assert_eq!(term.start_date, date(2026, 1, 5));
    assert_eq!(term.end_date, date(2026, 3, 1));
    assert_eq!(term.created_by, 1);
}

#[test]
fn missing_term_is_not_found() {
    let mut persistence = persistence();
    let err = persistence.term_by_id(4242).unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}
