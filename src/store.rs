// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw key-value storage of per-user collections.

use rusqlite::{Connection, OptionalExtension, params};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Categories,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Categories => "categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized collections keyed by user and collection name.
///
/// `get` returns `None` when the collection was never written for that
/// user, which is different from an empty collection.
pub trait Store {
    fn get(&self, user: &str, collection: Collection) -> Result<Option<String>, StoreError>;
    fn set(&self, user: &str, collection: Collection, data: &str) -> Result<(), StoreError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl Store for SqliteStore<'_> {
    fn get(&self, user: &str, collection: Collection) -> Result<Option<String>, StoreError> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM collections WHERE user_id=?1 AND name=?2",
                params![user, collection.as_str()],
                |r| r.get(0),
            )
            .optional()?;
        Ok(data)
    }

    fn set(&self, user: &str, collection: Collection, data: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO collections(user_id, name, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, name) DO UPDATE SET data=excluded.data, updated_at=datetime('now')",
            params![user, collection.as_str(), data],
        )?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<HashMap<(String, Collection), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, user: &str, collection: Collection) -> Result<Option<String>, StoreError> {
        Ok(self
            .data
            .borrow()
            .get(&(user.to_string(), collection))
            .cloned())
    }

    fn set(&self, user: &str, collection: Collection, data: &str) -> Result<(), StoreError> {
        self.data
            .borrow_mut()
            .insert((user.to_string(), collection), data.to_string());
        Ok(())
    }
}
