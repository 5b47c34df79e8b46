// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::models::{Category, TransactionKind};

pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
pub const UNCATEGORIZED_COLOR: &str = "#CBD5E0";

/// Looks up display attributes of categories by id.
///
/// Ids that match no category (for instance after the category was
/// deleted) resolve to [`UNCATEGORIZED_NAME`] and [`UNCATEGORIZED_COLOR`].
pub struct CategoryResolver<'a> {
    by_id: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let by_id = categories.iter().map(|c| (c.id.as_str(), c)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    pub fn name_of(&self, id: &str) -> &'a str {
        self.get(id).map_or(UNCATEGORIZED_NAME, |c| c.name.as_str())
    }

    pub fn color_of(&self, id: &str) -> &'a str {
        self.get(id).map_or(UNCATEGORIZED_COLOR, |c| c.color.as_str())
    }
}

pub fn name_of<'a>(id: &str, categories: &'a [Category]) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(UNCATEGORIZED_NAME, |c| c.name.as_str())
}

pub fn color_of<'a>(id: &str, categories: &'a [Category]) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(UNCATEGORIZED_COLOR, |c| c.color.as_str())
}

/// Categories a transaction of `kind` may be filed under.
pub fn categories_of_kind(
    categories: &[Category],
    kind: TransactionKind,
) -> impl Iterator<Item = &Category> {
    categories.iter().filter(move |c| c.kind == kind)
}
