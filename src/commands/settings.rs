// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, set_currency, set_current_user};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["user".to_string(), settings.user.clone()],
                vec!["currency".to_string(), settings.currency.clone()],
                vec![
                    "database".to_string(),
                    crate::db::db_path()?.display().to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-user", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            set_current_user(conn, id)?;
            println!("Now using data of user '{}'", id.trim());
        }
        Some(("set-currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            set_currency(conn, code)?;
            println!("Currency set to {}", code.trim().to_uppercase());
        }
        _ => {}
    }
    Ok(())
}
