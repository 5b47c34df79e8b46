// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::models::TransactionDate;
use crate::stats::PeriodSelection;
use crate::stats::period::end_of_day;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// A date, or a date with a time of day.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    TransactionDate::parse(s)
        .timestamp()
        .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD[THH:MM[:SS]]", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_percent(p: &Decimal) -> String {
    format!("{:.1}%", p.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Period selection from `--period`, `--from` and `--to`.
pub fn period_from_args(sub: &clap::ArgMatches) -> Result<PeriodSelection> {
    let name = sub
        .get_one::<String>("period")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "month".to_string());
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    let selection = match name.as_str() {
        "week" => PeriodSelection::Week,
        "month" => PeriodSelection::Month,
        "quarter" => PeriodSelection::Quarter,
        "year" => PeriodSelection::Year,
        "all" => PeriodSelection::All,
        "custom" => PeriodSelection::Custom {
            start: from,
            end: to,
        },
        other => {
            return Err(anyhow!(
                "Unknown period '{}' (use week|month|quarter|year|all|custom)",
                other
            ));
        }
    };
    Ok(selection)
}

/// `now`, unless `--as-of` moves it to the end of another day.
pub fn now_from_args(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<NaiveDateTime> {
    match sub.get_one::<String>("as_of") {
        Some(s) => Ok(end_of_day(parse_date(s.trim())?)),
        None => Ok(now),
    }
}
