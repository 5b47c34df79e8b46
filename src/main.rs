// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use pocketstats::config::Settings;
use pocketstats::ledger::Ledger;
use pocketstats::store::SqliteStore;
use pocketstats::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn, matches.get_one::<String>("user").map(|s| s.as_str()))?;
    let store = SqliteStore::new(&conn);
    let ledger = Ledger::new(&store, settings.user.clone());
    // Read the clock once; every command works off this instant.
    let now = Local::now().naive_local();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::settings::handle(&conn, &settings, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&ledger, &settings, sub, now)?,
        Some(("stats", sub)) => commands::stats::handle(&ledger, &settings, sub, now)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub, now)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
