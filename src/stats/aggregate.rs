// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::StatsError;
use crate::models::{Transaction, TransactionKind};
use crate::stats::period::{PeriodSelection, month_start, shift_month, year_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryTotal {
    pub amount: Decimal,
    pub count: usize,
}

/// `a + b`, or [`StatsError::AmountOverflow`] when the sum does not fit.
pub fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal, StatsError> {
    a.checked_add(b).ok_or(StatsError::AmountOverflow)
}

/// Sum and count the transactions of one kind per category id.
///
/// Grouping is by plain id equality; ids of deleted categories get their
/// own entry like any other.
pub fn aggregate_by_category<'a, I>(
    transactions: I,
    kind: TransactionKind,
) -> Result<BTreeMap<String, CategoryTotal>, StatsError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: BTreeMap<String, CategoryTotal> = BTreeMap::new();
    for t in transactions.into_iter().filter(|t| t.kind == kind) {
        let entry = out.entry(t.category_id.clone()).or_default();
        entry.amount = checked_sum(entry.amount, t.amount)?;
        entry.count += 1;
    }
    Ok(out)
}

/// How transactions are laid out on a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "strategy")]
pub enum BucketStrategy {
    /// One bucket per day from `end - 7 days` through `end`.
    DailyLastWeek { end: NaiveDate },
    /// One bucket per day from the first of `end`'s month through `end`.
    DailyInMonth { end: NaiveDate },
    /// Three monthly buckets ending with `end`'s month.
    MonthlyInQuarter { end: NaiveDate },
    /// One bucket per month from `first`'s month through `last`'s month.
    Monthly { first: NaiveDate, last: NaiveDate },
}

impl BucketStrategy {
    /// Pick the strategy matching a period selection.
    ///
    /// "All time" spans the months of the dated transactions in
    /// `filtered` up to `now`; with none of them there is no axis and
    /// `Ok(None)` is returned.
    pub fn for_period<'a, I>(
        selection: &PeriodSelection,
        now: NaiveDateTime,
        filtered: I,
    ) -> Result<Option<Self>, StatsError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let today = now.date();
        let strategy = match selection {
            PeriodSelection::Week => BucketStrategy::DailyLastWeek { end: today },
            PeriodSelection::Month => BucketStrategy::DailyInMonth { end: today },
            PeriodSelection::Quarter => BucketStrategy::MonthlyInQuarter { end: today },
            PeriodSelection::Year => BucketStrategy::Monthly {
                first: year_start(today)?,
                last: today,
            },
            PeriodSelection::Custom {
                start: Some(first),
                end: Some(last),
            } => BucketStrategy::Monthly {
                first: *first,
                last: *last,
            },
            PeriodSelection::Custom { .. } => return Err(StatsError::RangeIncomplete),
            PeriodSelection::All => {
                let mut dates = filtered
                    .into_iter()
                    .filter_map(|t| t.date.timestamp())
                    .map(|ts| ts.date());
                let Some(first) = dates.next() else {
                    return Ok(None);
                };
                let (lo, hi) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
                BucketStrategy::Monthly {
                    first: lo,
                    last: hi.max(today),
                }
            }
        };
        Ok(Some(strategy))
    }

    fn is_daily(&self) -> bool {
        matches!(
            self,
            BucketStrategy::DailyLastWeek { .. } | BucketStrategy::DailyInMonth { .. }
        )
    }

    /// Start date of every bucket, oldest first.
    fn slots(&self) -> Result<Vec<NaiveDate>, StatsError> {
        match *self {
            BucketStrategy::DailyLastWeek { end } => Ok(days_between(end - Duration::days(7), end)),
            BucketStrategy::DailyInMonth { end } => Ok(days_between(month_start(end), end)),
            BucketStrategy::MonthlyInQuarter { end } => {
                (-2..=0).map(|delta| shift_month(end, delta)).collect()
            }
            BucketStrategy::Monthly { first, last } => months_between(first, last),
        }
    }

    fn key_for(&self, d: NaiveDate) -> NaiveDate {
        if self.is_daily() { d } else { month_start(d) }
    }

    fn label_for(&self, slot: NaiveDate, spans_years: bool) -> String {
        match self {
            BucketStrategy::DailyLastWeek { .. } => slot.format("%b %-d").to_string(),
            BucketStrategy::DailyInMonth { .. } => slot.day().to_string(),
            _ if spans_years => slot.format("%b %Y").to_string(),
            _ => slot.format("%b").to_string(),
        }
    }
}

fn days_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    first.iter_days().take_while(|d| *d <= last).collect()
}

fn months_between(first: NaiveDate, last: NaiveDate) -> Result<Vec<NaiveDate>, StatsError> {
    let last = month_start(last);
    let mut cur = month_start(first);
    let mut out = Vec::new();
    while cur <= last {
        out.push(cur);
        cur = shift_month(cur, 1)?;
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

impl Bucket {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Income and expense per time bucket, oldest bucket first.
///
/// Every bucket of the strategy is present even when nothing happened in
/// it. Transactions falling outside the strategy's buckets are ignored.
pub fn aggregate_by_bucket<'a, I>(
    transactions: I,
    strategy: &BucketStrategy,
) -> Result<Vec<Bucket>, StatsError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let slots = strategy.slots()?;
    let spans_years = match (slots.first(), slots.last()) {
        (Some(a), Some(b)) => a.year() != b.year(),
        _ => false,
    };
    let mut buckets: BTreeMap<NaiveDate, Bucket> = slots
        .into_iter()
        .map(|start| {
            let bucket = Bucket {
                start,
                label: strategy.label_for(start, spans_years),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            };
            (start, bucket)
        })
        .collect();

    for t in transactions {
        let Some(ts) = t.date.timestamp() else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(&strategy.key_for(ts.date())) {
            let slot = match t.kind {
                TransactionKind::Income => &mut bucket.income,
                TransactionKind::Expense => &mut bucket.expense,
            };
            *slot = checked_sum(*slot, t.amount)?;
        }
    }
    Ok(buckets.into_values().collect())
}

/// Share of `amount` in `total`, in percent. Zero when `total` is not positive.
pub fn percentage(amount: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        amount / total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
