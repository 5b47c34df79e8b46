// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

use crate::error::StatsError;

/// The window of time a statistics view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "period")]
pub enum PeriodSelection {
    Week,
    Month,
    /// The current month and the two before it.
    Quarter,
    Year,
    All,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl PeriodSelection {
    pub fn name(&self) -> &'static str {
        match self {
            PeriodSelection::Week => "week",
            PeriodSelection::Month => "month",
            PeriodSelection::Quarter => "quarter",
            PeriodSelection::Year => "year",
            PeriodSelection::All => "all",
            PeriodSelection::Custom { .. } => "custom",
        }
    }
}

impl fmt::Display for PeriodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSelection::Custom {
                start: Some(s),
                end: Some(e),
            } => write!(f, "{} .. {}", s, e),
            other => f.write_str(other.name()),
        }
    }
}

/// Inclusive interval of local timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// An inverted range (start after end) contains nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::default())
}

/// Last representable instant of `d`.
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    start_of_day(d) + Duration::days(1) - Duration::nanoseconds(1)
}

pub fn month_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(i64::from(d.day0()))
}

/// First day of the month `delta` months away from `d`'s month.
pub fn shift_month(d: NaiveDate, delta: i32) -> Result<NaiveDate, StatsError> {
    let first = month_start(d);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.ok_or(StatsError::DateOutOfRange(d))
}

pub fn year_start(d: NaiveDate) -> Result<NaiveDate, StatsError> {
    NaiveDate::from_yo_opt(d.year(), 1).ok_or(StatsError::DateOutOfRange(d))
}

/// Turn a period selection into a concrete interval ending at `now`.
///
/// `Ok(None)` means "all time": every dated transaction passes. A custom
/// range whose start lies after its end resolves to an empty interval
/// rather than an error; one missing either bound is rejected with
/// [`StatsError::RangeIncomplete`].
pub fn resolve(
    selection: &PeriodSelection,
    now: NaiveDateTime,
) -> Result<Option<DateRange>, StatsError> {
    let today = now.date();
    let range = match selection {
        PeriodSelection::Week => DateRange {
            start: now - Duration::days(7),
            end: now,
        },
        PeriodSelection::Month => DateRange {
            start: start_of_day(month_start(today)),
            end: now,
        },
        PeriodSelection::Quarter => DateRange {
            start: start_of_day(shift_month(today, -2)?),
            end: now,
        },
        PeriodSelection::Year => DateRange {
            start: start_of_day(year_start(today)?),
            end: now,
        },
        PeriodSelection::All => return Ok(None),
        PeriodSelection::Custom { start, end } => match (start, end) {
            (Some(s), Some(e)) => DateRange {
                start: start_of_day(*s),
                end: end_of_day(*e),
            },
            _ => return Err(StatsError::RangeIncomplete),
        },
    };
    Ok(Some(range))
}
