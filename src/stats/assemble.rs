// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;

use crate::error::StatsError;
use crate::models::{Category, Transaction, TransactionKind};
use crate::stats::aggregate::{
    Bucket, BucketStrategy, aggregate_by_bucket, aggregate_by_category, checked_sum,
    percentage,
};
use crate::stats::filter::filter;
use crate::stats::period::{DateRange, PeriodSelection, resolve};
use crate::stats::resolver::CategoryResolver;

/// One category's share of a kind's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub count: usize,
    /// Unrounded percent of the kind's total.
    pub percentage: Decimal,
    /// False when the id no longer matches a category.
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub period: PeriodSelection,
    pub range: Option<DateRange>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    pub income_by_category: Vec<CategoryBreakdown>,
    pub expense_by_category: Vec<CategoryBreakdown>,
    pub buckets: Vec<Bucket>,
}

impl Statistics {
    pub fn categories(&self, kind: TransactionKind) -> &[CategoryBreakdown] {
        match kind {
            TransactionKind::Income => &self.income_by_category,
            TransactionKind::Expense => &self.expense_by_category,
        }
    }

    pub fn total(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.total_income,
            TransactionKind::Expense => self.total_expense,
        }
    }

    /// The `n` largest categories of `kind` that still exist.
    pub fn top_categories(&self, kind: TransactionKind, n: usize) -> Vec<&CategoryBreakdown> {
        self.categories(kind)
            .iter()
            .filter(|row| row.resolved)
            .take(n)
            .collect()
    }
}

/// Compute every statistic for `selection` as of `now`.
///
/// Totals are the sums of the per-category rows, so for each kind the
/// category amounts always add up to the kind's total.
pub fn assemble(
    transactions: &[Transaction],
    categories: &[Category],
    selection: &PeriodSelection,
    now: NaiveDateTime,
) -> Result<Statistics, StatsError> {
    let range = resolve(selection, now)?;
    let filtered = filter(transactions, range.as_ref());
    let resolver = CategoryResolver::new(categories);

    let (total_income, income_by_category) =
        breakdown(&filtered, TransactionKind::Income, &resolver)?;
    let (total_expense, expense_by_category) =
        breakdown(&filtered, TransactionKind::Expense, &resolver)?;

    let balance = total_income
        .checked_sub(total_expense)
        .ok_or(StatsError::AmountOverflow)?;

    let buckets = match BucketStrategy::for_period(selection, now, filtered.iter().copied())? {
        Some(strategy) => aggregate_by_bucket(filtered.iter().copied(), &strategy)?,
        None => Vec::new(),
    };

    tracing::debug!(
        period = selection.name(),
        total = transactions.len(),
        matched = filtered.len(),
        buckets = buckets.len(),
        "assembled statistics"
    );

    Ok(Statistics {
        period: *selection,
        range,
        total_income,
        total_expense,
        balance,
        transaction_count: filtered.len(),
        income_by_category,
        expense_by_category,
        buckets,
    })
}

fn breakdown(
    filtered: &[&Transaction],
    kind: TransactionKind,
    resolver: &CategoryResolver<'_>,
) -> Result<(Decimal, Vec<CategoryBreakdown>), StatsError> {
    let totals = aggregate_by_category(filtered.iter().copied(), kind)?;
    let total = totals
        .values()
        .try_fold(Decimal::ZERO, |acc, t| checked_sum(acc, t.amount))?;
    let mut rows: Vec<CategoryBreakdown> = totals
        .into_iter()
        .map(|(id, t)| CategoryBreakdown {
            name: resolver.name_of(&id).to_string(),
            color: resolver.color_of(&id).to_string(),
            resolved: resolver.get(&id).is_some(),
            kind,
            amount: t.amount,
            count: t.count,
            percentage: percentage(t.amount, total),
            category_id: id,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    Ok((total, rows))
}

/// Transactions of the selected period, newest first, for list views.
pub fn filtered_transactions<'a>(
    transactions: &'a [Transaction],
    selection: &PeriodSelection,
    now: NaiveDateTime,
) -> Result<Vec<&'a Transaction>, StatsError> {
    let range = resolve(selection, now)?;
    let mut out = filter(transactions, range.as_ref());
    out.sort_by_key(|t| Reverse(t.date.timestamp()));
    Ok(out)
}
