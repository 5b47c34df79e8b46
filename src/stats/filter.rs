// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::stats::period::DateRange;

/// Transactions dated inside `range`, in their original order.
///
/// `None` is the all-time range. Transactions whose stored date could not
/// be parsed are never returned.
pub fn filter<'a>(transactions: &'a [Transaction], range: Option<&DateRange>) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| match (t.date.timestamp(), range) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(ts), Some(r)) => r.contains(ts),
        })
        .collect()
}
