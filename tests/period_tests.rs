// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use pocketstats::error::StatsError;
use pocketstats::stats::{PeriodSelection, resolve};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn week_starts_seven_days_before_now() {
    let now = at("2024-03-10 15:30:00");
    let range = resolve(&PeriodSelection::Week, now).unwrap().unwrap();
    assert_eq!(range.start, at("2024-03-03 15:30:00"));
    assert_eq!(range.end, now);
}

#[test]
fn month_starts_on_the_first_at_midnight() {
    let now = at("2024-03-10 15:30:00");
    let range = resolve(&PeriodSelection::Month, now).unwrap().unwrap();
    assert_eq!(range.start, at("2024-03-01 00:00:00"));
    assert_eq!(range.end, now);
}

#[test]
fn quarter_covers_current_and_two_previous_months() {
    let range = resolve(&PeriodSelection::Quarter, at("2024-05-31 09:00:00"))
        .unwrap()
        .unwrap();
    assert_eq!(range.start, at("2024-03-01 00:00:00"));

    let range = resolve(&PeriodSelection::Quarter, at("2024-01-15 12:00:00"))
        .unwrap()
        .unwrap();
    assert_eq!(range.start, at("2023-11-01 00:00:00"));
}

#[test]
fn year_starts_on_january_first() {
    let now = at("2024-07-04 08:00:00");
    let range = resolve(&PeriodSelection::Year, now).unwrap().unwrap();
    assert_eq!(range.start, at("2024-01-01 00:00:00"));
    assert_eq!(range.end, now);
}

#[test]
fn all_time_has_no_bounds() {
    assert_eq!(
        resolve(&PeriodSelection::All, at("2024-07-04 08:00:00")).unwrap(),
        None
    );
}

#[test]
fn custom_range_includes_the_whole_last_day() {
    let selection = PeriodSelection::Custom {
        start: Some(day("2024-03-01")),
        end: Some(day("2024-03-05")),
    };
    let range = resolve(&selection, at("2024-07-04 08:00:00"))
        .unwrap()
        .unwrap();
    assert!(range.contains(at("2024-03-01 00:00:00")));
    assert!(range.contains(at("2024-03-05 23:59:59")));
    assert!(!range.contains(at("2024-03-06 00:00:00")));
    assert!(!range.contains(at("2024-02-29 23:59:59")));
}

#[test]
fn inverted_custom_range_is_empty_not_an_error() {
    let selection = PeriodSelection::Custom {
        start: Some(day("2024-03-05")),
        end: Some(day("2024-03-01")),
    };
    let range = resolve(&selection, at("2024-07-04 08:00:00"))
        .unwrap()
        .unwrap();
    assert!(range.is_empty());
    assert!(!range.contains(at("2024-03-03 12:00:00")));
}

#[test]
fn custom_range_missing_a_bound_is_incomplete() {
    let now = at("2024-07-04 08:00:00");
    let missing_end = PeriodSelection::Custom {
        start: Some(day("2024-03-01")),
        end: None,
    };
    let missing_start = PeriodSelection::Custom {
        start: None,
        end: Some(day("2024-03-01")),
    };
    assert_eq!(resolve(&missing_end, now), Err(StatsError::RangeIncomplete));
    assert_eq!(resolve(&missing_start, now), Err(StatsError::RangeIncomplete));
}
