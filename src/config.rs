// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

pub const DEFAULT_USER: &str = "guest";
pub const DEFAULT_CURRENCY: &str = "USD";

const USER_KEY: &str = "current_user";
const CURRENCY_KEY: &str = "currency";

/// Effective settings of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub user: String,
    pub currency: String,
}

impl Settings {
    /// Stored settings, with `user_override` (the `--user` flag) taking precedence.
    pub fn load(conn: &Connection, user_override: Option<&str>) -> Result<Settings> {
        let user = match user_override.map(str::trim).filter(|u| !u.is_empty()) {
            Some(u) => u.to_string(),
            None => current_user(conn)?,
        };
        Ok(Settings {
            user,
            currency: currency(conn)?,
        })
    }
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn current_user(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, USER_KEY)?.unwrap_or_else(|| DEFAULT_USER.to_string()))
}

pub fn set_current_user(conn: &Connection, user: &str) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        return Err(anyhow!("User id must not be empty"));
    }
    set_setting(conn, USER_KEY, user)
}

pub fn currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, CURRENCY_KEY)?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, code: &str) -> Result<()> {
    let code = code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow!("Invalid currency code '{}', expected e.g. USD", code));
    }
    set_setting(conn, CURRENCY_KEY, &code)
}
