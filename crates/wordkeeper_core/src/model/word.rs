//! Word domain model.
//!
//! # Invariants
//! - `id` uniquely identifies a word within one store.
//! - `category` is denormalized category name text; it is not checked
//!   against existing categories and does not follow category renames.

use serde::{Deserialize, Serialize};

/// Identifier for stored words. Backed by the SQLite rowid.
pub type WordId = i64;

/// One vocabulary entry and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// Word as written in the language being learned.
    pub name: String,
    pub translation: String,
    /// Display name of the category this word is filed under.
    pub category: String,
}

impl Word {
    pub fn new(
        id: WordId,
        name: impl Into<String>,
        translation: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            translation: translation.into(),
            category: category.into(),
        }
    }

    /// Returns whether this word is filed under `category_name`.
    ///
    /// Comparison is exact, matching the store's `get_by_category` filter.
    pub fn belongs_to(&self, category_name: &str) -> bool {
        self.category == category_name
    }
}
