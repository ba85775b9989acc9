//! Category domain model.
//!
//! # Responsibility
//! - Define the user-defined grouping record for words.
//! - Materialize categories from the legacy forward-only cursor.
//!
//! # Invariants
//! - `id` uniquely identifies a category within one store.
//! - Words reference categories by `name`; renaming a category does not
//!   rewrite those references on its own.

use crate::model::cursor::{CursorResult, RowCursor, LEGACY_ID_COLUMN, LEGACY_NAME_COLUMN};
use serde::{Deserialize, Serialize};

/// Identifier for stored categories. Backed by the SQLite rowid.
pub type CategoryId = i64;

/// User-defined grouping for words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name, also the text words store in `Word::category`.
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Reads every remaining row of `cursor` into categories.
    ///
    /// Expects the cursor to be positioned on its first row (or already
    /// after-last when empty). Each row contributes one category built from
    /// the `_id` and `name` columns; output order is cursor row order.
    ///
    /// # Errors
    /// - Returns `CursorError` when a column is missing or has the wrong type.
    pub fn categories_from_cursor<C>(cursor: &mut C) -> CursorResult<Vec<Category>>
    where
        C: RowCursor + ?Sized,
    {
        let mut categories = Vec::with_capacity(cursor.count());
        while !cursor.is_after_last() {
            let id = cursor.get_i64(LEGACY_ID_COLUMN)?;
            let name = cursor.get_string(LEGACY_NAME_COLUMN)?;
            categories.push(Category::new(id, name));
            cursor.move_to_next();
        }
        Ok(categories)
    }
}
