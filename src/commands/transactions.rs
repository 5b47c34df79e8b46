// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{Category, NewTransaction, Transaction, TransactionKind};
use crate::stats::{CategoryResolver, filtered_transactions};
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, now_from_args, parse_decimal, parse_timestamp,
    period_from_args, pretty_table,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    settings: &Settings,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, settings, sub, now)?,
        Some(("list", sub)) => list(ledger, settings, sub, now)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let ids: Vec<String> = sub
                .get_many::<String>("id")
                .unwrap()
                .map(|s| s.trim().to_string())
                .collect();
            let removed = ledger.delete_transactions(&ids)?;
            println!("Removed {} transaction(s)", removed);
        }
        _ => {}
    }
    Ok(())
}

fn add<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let kind: TransactionKind = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let category = ledger.find_category(sub.get_one::<String>("category").unwrap(), Some(kind))?;
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_timestamp(raw.trim())?,
        None => now,
    };
    let description = sub.get_one::<String>("description").map(|s| s.trim().to_string());

    let tx = ledger.add_transaction(NewTransaction {
        amount,
        kind,
        category_id: category.id,
        description,
        date,
    })?;
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        tx.kind,
        fmt_money(&tx.amount, &settings.currency),
        tx.date,
        category.name,
        tx.id
    );
    Ok(())
}

fn edit<S: Store + ?Sized>(ledger: &Ledger<'_, S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut tx = ledger.transaction(id)?;
    if let Some(kind) = sub.get_one::<String>("type") {
        tx.kind = kind.parse()?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(amount.trim())?;
    }
    if let Some(key) = sub.get_one::<String>("category") {
        tx.category_id = ledger.find_category(key, Some(tx.kind))?.id;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        tx.date = parse_timestamp(date.trim())?.into();
    }
    if let Some(description) = sub.get_one::<String>("description") {
        let description = description.trim();
        tx.description = (!description.is_empty()).then(|| description.to_string());
    }
    ledger.update_transaction(&tx)?;
    println!("Updated transaction {}", tx.id);
    Ok(())
}

fn list<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    settings: &Settings,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub, now)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    fmt_money(&r.amount, &settings.currency),
                    r.category.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Description", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    /// Rounded to cents, always with two decimal places.
    pub amount: Decimal,
    pub category_id: String,
    pub category: String,
    pub color: String,
    pub description: String,
}

fn cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Display rows for transactions, with category names resolved.
pub fn transaction_rows(transactions: &[&Transaction], categories: &[Category]) -> Vec<TransactionRow> {
    let resolver = CategoryResolver::new(categories);
    transactions
        .iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: cents(t.amount),
            category_id: t.category_id.clone(),
            category: resolver.name_of(&t.category_id).to_string(),
            color: resolver.color_of(&t.category_id).to_string(),
            description: t.description.clone().unwrap_or_default(),
        })
        .collect()
}

/// Transactions of the selected period, newest first, narrowed by the
/// optional `--type`, `--category` and `--limit` arguments.
pub fn query_rows<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<TransactionRow>> {
    let selection = period_from_args(sub)?;
    let now = now_from_args(sub, now)?;
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;

    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()?;
    let category_id = match sub.get_one::<String>("category") {
        Some(key) => Some(ledger.find_category(key, kind)?.id),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let selected: Vec<&Transaction> = filtered_transactions(&transactions, &selection, now)?
        .into_iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category_id.as_ref().is_none_or(|c| &t.category_id == c))
        .take(limit)
        .collect();
    Ok(transaction_rows(&selected, &categories))
}
