// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Expense, TransactionKind::Income];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(StoreError::Validation(format!(
                "Unknown transaction type '{}', expected expense|income",
                other
            ))),
        }
    }
}

/// When a transaction happened.
///
/// Stored dates that cannot be understood are kept verbatim so that they
/// survive a load/save cycle; they never fall inside any period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionDate {
    At(NaiveDateTime),
    Unparsed(String),
}

impl TransactionDate {
    pub fn parse(raw: &str) -> Self {
        match parse_timestamp(raw) {
            Some(ts) => TransactionDate::At(ts),
            None => TransactionDate::Unparsed(raw.to_string()),
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            TransactionDate::At(ts) => Some(*ts),
            TransactionDate::Unparsed(_) => None,
        }
    }
}

impl From<NaiveDateTime> for TransactionDate {
    fn from(ts: NaiveDateTime) -> Self {
        TransactionDate::At(ts)
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(d: NaiveDate) -> Self {
        TransactionDate::At(d.and_time(NaiveTime::default()))
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionDate::At(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S%.f")),
            TransactionDate::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TransactionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => TransactionDate::parse(&s),
            other => TransactionDate::Unparsed(other.to_string()),
        })
    }
}

/// RFC 3339 stamps keep the wall-clock time of their own offset.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::default()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: TransactionDate,
}

/// Fields supplied by the user when recording a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub color: String,
}
