// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::transaction_rows;
use crate::ledger::Ledger;
use crate::stats::{filter, resolve};
use crate::store::Store;
use crate::utils::{now_from_args, period_from_args};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;

pub fn handle<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub, now),
        _ => Ok(()),
    }
}

/// Write the selected period's transactions to `--out`, oldest first.
pub fn export_transactions<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let selection = period_from_args(sub)?;
    let now = now_from_args(sub, now)?;

    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;
    let range = resolve(&selection, now)?;
    let mut selected = filter(&transactions, range.as_ref());
    // stable, so same-instant transactions keep their stored order
    selected.sort_by_key(|t| t.date.timestamp());
    let rows = transaction_rows(&selected, &categories);

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id", "date", "type", "amount", "category_id", "category", "description",
            ])?;
            for r in &rows {
                wtr.write_record([
                    &r.id,
                    &r.date,
                    &r.kind,
                    &r.amount.to_string(),
                    &r.category_id,
                    &r.category,
                    &r.description,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    tracing::info!(count = rows.len(), path = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
