// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::TransactionKind;
use crate::stats::{CategoryBreakdown, Statistics, assemble};
use crate::store::Store;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, now_from_args, period_from_args, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDateTime;

pub fn handle<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    settings: &Settings,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(&compute(ledger, sub, now)?, settings, sub)?,
        Some(("categories", sub)) => categories(&compute(ledger, sub, now)?, settings, sub)?,
        Some(("timeline", sub)) => timeline(&compute(ledger, sub, now)?, settings, sub)?,
        Some(("top", sub)) => top(&compute(ledger, sub, now)?, settings, sub)?,
        _ => {}
    }
    Ok(())
}

/// Statistics for the period arguments of `sub`.
pub fn compute<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Statistics> {
    let selection = period_from_args(sub)?;
    let now = now_from_args(sub, now)?;
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;
    Ok(assemble(&transactions, &categories, &selection, now)?)
}

fn range_text(stats: &Statistics) -> String {
    match stats.range {
        Some(r) if r.is_empty() => "(empty range)".to_string(),
        Some(r) => format!(
            "{} .. {}",
            r.start.format("%Y-%m-%d %H:%M"),
            r.end.format("%Y-%m-%d %H:%M")
        ),
        None => "all time".to_string(),
    }
}

fn summary(stats: &Statistics, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), stats)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = vec![vec![
        stats.period.to_string(),
        range_text(stats),
        fmt_money(&stats.total_income, ccy),
        fmt_money(&stats.total_expense, ccy),
        fmt_money(&stats.balance, ccy),
        stats.transaction_count.to_string(),
    ]];
    println!(
        "{}",
        pretty_table(
            &["Period", "Range", "Income", "Expense", "Balance", "Transactions"],
            rows
        )
    );
    Ok(())
}

fn breakdown_rows(rows: &[&CategoryBreakdown], ccy: &str) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.kind.to_string(),
                r.name.clone(),
                r.color.clone(),
                fmt_money(&r.amount, ccy),
                r.count.to_string(),
                fmt_percent(&r.percentage),
            ]
        })
        .collect()
}

const BREAKDOWN_HEADERS: [&str; 6] = ["Type", "Category", "Color", "Amount", "Count", "Share"];

fn categories(stats: &Statistics, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let kinds: Vec<TransactionKind> = match sub.get_one::<String>("type") {
        Some(k) => vec![k.parse()?],
        None => TransactionKind::ALL.to_vec(),
    };
    let data: Vec<&CategoryBreakdown> = kinds
        .iter()
        .flat_map(|k| stats.categories(*k))
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let mut rows = breakdown_rows(&data, &settings.currency);
    for kind in &kinds {
        rows.push(vec![
            kind.to_string(),
            "Total".to_string(),
            String::new(),
            fmt_money(&stats.total(*kind), &settings.currency),
            stats
                .categories(*kind)
                .iter()
                .map(|r| r.count)
                .sum::<usize>()
                .to_string(),
            String::new(),
        ]);
    }
    println!("{}", pretty_table(&BREAKDOWN_HEADERS, rows));
    Ok(())
}

fn timeline(stats: &Statistics, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats.buckets)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = stats
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.income, ccy),
                fmt_money(&b.expense, ccy),
                fmt_money(&b.net(), ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Bucket", "Income", "Expense", "Net"], rows)
    );
    Ok(())
}

fn top(stats: &Statistics, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&3);
    let data: Vec<&CategoryBreakdown> = TransactionKind::ALL
        .iter()
        .flat_map(|k| stats.top_categories(*k, limit))
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&BREAKDOWN_HEADERS, breakdown_rows(&data, &settings.currency))
        );
    }
    Ok(())
}
