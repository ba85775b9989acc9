//! Category use-case service.
//!
//! # Responsibility
//! - Act as the category repository facade for domain callers.
//! - Make word reconciliation on rename/delete an explicit caller choice.
//!
//! # Invariants
//! - `remove` and `rename` leave word rows untouched (orphan policy).
//! - `find_by_id` reports a missing category as `RepoError::NotFound`.

use crate::model::category::{Category, CategoryId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::error::{RepoError, RepoResult};
use log::info;

/// Use-case service wrapper for category operations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a category with a store-assigned id.
    pub fn add(&self, name: impl AsRef<str>) -> RepoResult<Category> {
        self.repo.insert_new_category(name.as_ref())
    }

    /// Creates a category under a caller-provided id.
    ///
    /// Fails with `ConstraintViolation` when the id is taken.
    pub fn add_with_id(&self, category: &Category) -> RepoResult<CategoryId> {
        self.repo.insert_category(category)
    }

    /// Deletes a category; words filed under it keep their category text.
    pub fn remove(&self, id: CategoryId) -> RepoResult<()> {
        self.repo.delete_category(id)
    }

    /// Deletes a category and every word filed under its name.
    pub fn remove_with_words(&self, id: CategoryId) -> RepoResult<usize> {
        let deleted = self.repo.delete_category_with_words(id)?;
        info!(
            "event=category_delete module=service status=ok cascade=true category_id={} words_deleted={}",
            id, deleted
        );
        Ok(deleted)
    }

    /// Lists all categories sorted by name.
    pub fn list(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Lists all categories through the legacy cursor path, in id order.
    pub fn list_from_cursor(&self) -> RepoResult<Vec<Category>> {
        let mut cursor = self.repo.open_cursor()?;
        Ok(Category::categories_from_cursor(&mut cursor)?)
    }

    pub fn find_by_id(&self, id: CategoryId) -> RepoResult<Category> {
        self.repo
            .get_category(id)?
            .ok_or_else(|| RepoError::category_not_found(id))
    }

    /// Renames a category without touching words that reference the old name.
    pub fn rename(&self, id: CategoryId, new_name: impl Into<String>) -> RepoResult<()> {
        self.repo.update_category(&Category::new(id, new_name))
    }

    /// Renames a category and rewrites matching word references.
    ///
    /// Returns the number of words moved to the new name.
    pub fn rename_and_propagate(&self, id: CategoryId, new_name: &str) -> RepoResult<usize> {
        let rewritten = self.repo.rename_category_propagating(id, new_name)?;
        info!(
            "event=category_rename module=service status=ok propagate=true category_id={} words_rewritten={}",
            id, rewritten
        );
        Ok(rewritten)
    }
}
