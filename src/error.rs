// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the statistics pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A custom period was selected but its start or end date is missing.
    #[error("Custom range is incomplete: both --from and --to are required")]
    RangeIncomplete,

    #[error("Date {0} is outside the supported calendar range")]
    DateOutOfRange(NaiveDate),

    #[error("Sum of amounts is too large to represent")]
    AmountOverflow,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Malformed stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),
}
