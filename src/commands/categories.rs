// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{Category, TransactionKind};
use crate::stats::categories_of_kind;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<S: Store + ?Sized>(ledger: &Ledger<'_, S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: TransactionKind = sub.get_one::<String>("type").unwrap().parse()?;
            let color = sub.get_one::<String>("color").map(|s| s.as_str());
            let category = ledger.add_category(name, kind, color)?;
            println!(
                "Added {} category '{}' ({}) id {}",
                category.kind, category.name, category.color, category.id
            );
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("color", sub)) => {
            let key = sub.get_one::<String>("id").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let target = ledger.find_category(key, None)?;
            let category = ledger.set_category_color(&target.id, color)?;
            println!("Category '{}' is now {}", category.name, category.color);
        }
        Some(("rm", sub)) => {
            let key = sub.get_one::<String>("id").unwrap();
            let target = ledger.find_category(key, None)?;
            let removed = ledger.delete_category(&target.id)?;
            println!(
                "Removed category '{}'; its transactions now show as uncategorized",
                removed.name
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn query_categories<S: Store + ?Sized>(
    ledger: &Ledger<'_, S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<Category>> {
    let categories = ledger.categories()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()?;
    let mut out: Vec<Category> = match kind {
        Some(k) => categories_of_kind(&categories, k).cloned().collect(),
        None => categories,
    };
    out.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
    Ok(out)
}

fn list<S: Store + ?Sized>(ledger: &Ledger<'_, S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_categories(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|c| vec![c.id, c.name, c.kind.to_string(), c.color])
            .collect();
        println!("{}", pretty_table(&["ID", "Name", "Type", "Color"], rows));
    }
    Ok(())
}
