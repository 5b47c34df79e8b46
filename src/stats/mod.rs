// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period statistics over a snapshot of transactions and categories.
//!
//! Everything here is a pure function of its arguments; the caller
//! captures `now` once and passes it down.

pub mod aggregate;
pub mod assemble;
pub mod filter;
pub mod period;
pub mod resolver;

pub use aggregate::{
    Bucket, BucketStrategy, CategoryTotal, aggregate_by_bucket, aggregate_by_category,
    checked_sum, percentage,
};
pub use assemble::{CategoryBreakdown, Statistics, assemble, filtered_transactions};
pub use filter::filter;
pub use period::{DateRange, PeriodSelection, resolve};
pub use resolver::{
    CategoryResolver, UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME, categories_of_kind, color_of,
    name_of,
};
