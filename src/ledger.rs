// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Category, NewTransaction, Transaction, TransactionDate, TransactionKind};
use crate::store::{Collection, Store};

/// Colors handed out to new categories when none is chosen.
pub const PALETTE: [&str; 15] = [
    "#4CAF50", "#2196F3", "#9C27B0", "#FF9800", "#F44336", "#795548", "#607D8B", "#00BCD4",
    "#FFEB3B", "#8BC34A", "#673AB7", "#FF5722", "#E91E63", "#009688", "#3F51B5",
];

/// Largest amount a single transaction may carry: 1,000,000,000,000.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is valid"));

/// Categories every new user starts with.
pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Groceries", TransactionKind::Expense, "#4CAF50"),
        ("2", "Transport", TransactionKind::Expense, "#2196F3"),
        ("3", "Entertainment", TransactionKind::Expense, "#9C27B0"),
        ("4", "Restaurants", TransactionKind::Expense, "#FF9800"),
        ("5", "Health", TransactionKind::Expense, "#F44336"),
        ("6", "Housing", TransactionKind::Expense, "#795548"),
        ("7", "Salary", TransactionKind::Income, "#4CAF50"),
        ("8", "Freelance", TransactionKind::Income, "#2196F3"),
        ("9", "Gifts", TransactionKind::Income, "#9C27B0"),
        ("10", "Investments", TransactionKind::Income, "#FF9800"),
    ]
    .into_iter()
    .map(|(id, name, kind, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        color: color.to_string(),
    })
    .collect()
}

pub fn normalize_color(raw: &str) -> Result<String, StoreError> {
    let color = raw.trim();
    if !COLOR_RE.is_match(color) {
        return Err(StoreError::Validation(format!(
            "Invalid color '{}', expected #RRGGBB",
            color
        )));
    }
    Ok(color.to_uppercase())
}

/// One user's transactions and categories on top of a [`Store`].
///
/// Records are checked and normalized here, on their way in and out of
/// storage, so the statistics code can take them at face value.
pub struct Ledger<'s, S: Store + ?Sized> {
    store: &'s S,
    user: String,
}

impl<'s, S: Store + ?Sized> Ledger<'s, S> {
    pub fn new(store: &'s S, user: impl Into<String>) -> Self {
        Self {
            store,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<Vec<T>>, StoreError> {
        let Some(raw) = self.store.get(&self.user, collection)? else {
            return Ok(None);
        };
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let mut out = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(item) => out.push(item),
                Err(err) => warn!(
                    user = %self.user,
                    %collection,
                    index,
                    %err,
                    "skipping unreadable record"
                ),
            }
        }
        Ok(Some(out))
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.user, collection, &raw)?;
        debug!(user = %self.user, %collection, count = items.len(), "saved collection");
        Ok(())
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let mut txs: Vec<Transaction> = self.load(Collection::Transactions)?.unwrap_or_default();
        for t in &mut txs {
            if t.amount < Decimal::ZERO {
                warn!(id = %t.id, amount = %t.amount, "negative stored amount, using its magnitude");
                t.amount = t.amount.abs();
            }
            if let TransactionDate::Unparsed(raw) = &t.date {
                warn!(id = %t.id, date = %raw, "unreadable transaction date");
            }
        }
        txs.retain(|t| match check_amount(t.amount) {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %t.id, %err, "skipping stored transaction");
                false
            }
        });
        Ok(txs)
    }

    pub fn transaction(&self, id: &str) -> Result<Transaction, StoreError> {
        self.transactions()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Transaction",
                id: id.to_string(),
            })
    }

    /// The user's categories; a user without any gets the defaults.
    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        match self.load(Collection::Categories)? {
            Some(categories) => Ok(categories),
            None => {
                let defaults = default_categories();
                self.save(Collection::Categories, &defaults)?;
                info!(user = %self.user, "seeded default categories");
                Ok(defaults)
            }
        }
    }

    /// Find a category by id, or else by name (case-insensitive).
    pub fn find_category(
        &self,
        key: &str,
        kind: Option<TransactionKind>,
    ) -> Result<Category, StoreError> {
        let key = key.trim();
        let categories = self.categories()?;
        let by_id = categories.iter().find(|c| c.id == key);
        let found = by_id.or_else(|| {
            categories
                .iter()
                .filter(|c| kind.is_none_or(|k| c.kind == k))
                .find(|c| c.name.eq_ignore_ascii_case(key))
        });
        found.cloned().ok_or_else(|| StoreError::NotFound {
            kind: "Category",
            id: key.to_string(),
        })
    }

    pub fn add_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        let categories = self.categories()?;
        check_amount(new.amount)?;
        check_category(&new.category_id, new.kind, &categories)?;

        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            amount: new.amount,
            kind: new.kind,
            category_id: new.category_id,
            description: new.description.filter(|d| !d.trim().is_empty()),
            date: new.date.into(),
        };
        let mut txs = self.transactions()?;
        txs.push(tx.clone());
        self.save(Collection::Transactions, &txs)?;
        info!(id = %tx.id, kind = %tx.kind, amount = %tx.amount, "recorded transaction");
        Ok(tx)
    }

    /// Replace a stored transaction with `tx`, matched by id.
    ///
    /// The category must exist and match the type, unless it is the
    /// category the stored record already had.
    pub fn update_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        check_amount(tx.amount)?;
        let mut txs = self.transactions()?;
        let slot = txs
            .iter_mut()
            .find(|t| t.id == tx.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Transaction",
                id: tx.id.clone(),
            })?;
        if slot.category_id != tx.category_id || slot.kind != tx.kind {
            check_category(&tx.category_id, tx.kind, &self.categories()?)?;
        }
        *slot = tx.clone();
        self.save(Collection::Transactions, &txs)?;
        info!(id = %tx.id, "updated transaction");
        Ok(())
    }

    /// Delete all of `ids`. Nothing is deleted if any of them is unknown.
    pub fn delete_transactions(&self, ids: &[String]) -> Result<usize, StoreError> {
        let mut txs = self.transactions()?;
        if let Some(missing) = ids.iter().find(|id| !txs.iter().any(|t| &t.id == *id)) {
            return Err(StoreError::NotFound {
                kind: "Transaction",
                id: missing.clone(),
            });
        }
        let before = txs.len();
        txs.retain(|t| !ids.contains(&t.id));
        let removed = before - txs.len();
        self.save(Collection::Transactions, &txs)?;
        info!(removed, "deleted transactions");
        Ok(removed)
    }

    pub fn add_category(
        &self,
        name: &str,
        kind: TransactionKind,
        color: Option<&str>,
    ) -> Result<Category, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Category name must not be empty".into()));
        }
        let mut categories = self.categories()?;
        if categories
            .iter()
            .any(|c| c.kind == kind && c.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::Validation(format!(
                "An {} category named '{}' already exists",
                kind, name
            )));
        }
        let color = match color {
            Some(c) => normalize_color(c)?,
            None => PALETTE[categories.len() % PALETTE.len()].to_string(),
        };
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind,
            color,
        };
        categories.push(category.clone());
        self.save(Collection::Categories, &categories)?;
        info!(id = %category.id, name = %category.name, "added category");
        Ok(category)
    }

    pub fn set_category_color(&self, id: &str, color: &str) -> Result<Category, StoreError> {
        let color = normalize_color(color)?;
        let mut categories = self.categories()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Category",
                id: id.to_string(),
            })?;
        category.color = color;
        let updated = category.clone();
        self.save(Collection::Categories, &categories)?;
        Ok(updated)
    }

    /// Remove a category. Its transactions keep the now dangling id.
    pub fn delete_category(&self, id: &str) -> Result<Category, StoreError> {
        let mut categories = self.categories()?;
        let pos = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Category",
                id: id.to_string(),
            })?;
        let removed = categories.remove(pos);
        self.save(Collection::Categories, &categories)?;
        info!(id = %removed.id, name = %removed.name, "deleted category");
        Ok(removed)
    }
}

fn check_amount(amount: Decimal) -> Result<(), StoreError> {
    if amount < Decimal::ZERO {
        return Err(StoreError::Validation(format!(
            "Amount {} must not be negative; use the transaction type for direction",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(StoreError::Validation(format!(
            "Amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    Ok(())
}

fn check_category(
    category_id: &str,
    kind: TransactionKind,
    categories: &[Category],
) -> Result<(), StoreError> {
    match categories.iter().find(|c| c.id == category_id) {
        None => Err(StoreError::NotFound {
            kind: "Category",
            id: category_id.to_string(),
        }),
        Some(c) if c.kind != kind => Err(StoreError::Validation(format!(
            "Category '{}' is for {} transactions, not {}",
            c.name, c.kind, kind
        ))),
        Some(_) => Ok(()),
    }
}
