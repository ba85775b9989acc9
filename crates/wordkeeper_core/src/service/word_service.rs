//! Word use-case service.
//!
//! # Responsibility
//! - Provide word list entry points: add, edit, delete, list, filter, search.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::word::{Word, WordId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::word_repo::{WordRepository, WordSortMode};
use log::info;

/// Use-case service wrapper for word operations.
pub struct WordService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a word with a store-assigned id and returns the stored value.
    pub fn add(&self, name: &str, translation: &str, category: &str) -> RepoResult<Word> {
        self.repo.insert_new_word(name, translation, category)
    }

    /// Creates a word under its own id.
    ///
    /// Fails with `ConstraintViolation` when the id is taken.
    pub fn add_with_id(&self, word: &Word) -> RepoResult<WordId> {
        self.repo.insert_word(word)
    }

    /// Replaces an existing word by id.
    pub fn edit(&self, word: &Word) -> RepoResult<()> {
        self.repo.update_word(word)
    }

    pub fn remove(&self, id: WordId) -> RepoResult<()> {
        self.repo.delete_word(id)
    }

    /// Deletes a selection of words in one transaction.
    pub fn remove_many(&self, ids: &[WordId]) -> RepoResult<usize> {
        let deleted = self.repo.delete_words(ids)?;
        info!(
            "event=words_delete module=service status=ok count={}",
            deleted
        );
        Ok(deleted)
    }

    /// Gets one word by id.
    pub fn get(&self, id: WordId) -> RepoResult<Option<Word>> {
        self.repo.get_word(id)
    }

    /// Gets one word by id, reporting absence as `RepoError::NotFound`.
    pub fn find_by_id(&self, id: WordId) -> RepoResult<Word> {
        self.repo
            .get_word(id)?
            .ok_or_else(|| RepoError::word_not_found(id))
    }

    pub fn list(&self, sort: WordSortMode) -> RepoResult<Vec<Word>> {
        self.repo.list_words(sort)
    }

    pub fn list_by_category(&self, category: &str) -> RepoResult<Vec<Word>> {
        self.repo.list_words_by_category(category)
    }

    /// Searches words by name. Blank text yields no results.
    pub fn search(&self, text: &str, limit: Option<usize>) -> RepoResult<Vec<Word>> {
        self.repo.search_words_by_name(text, limit)
    }

    /// Refiles a selection of words under `category`.
    pub fn move_to_category(&self, ids: &[WordId], category: &str) -> RepoResult<usize> {
        let moved = self.repo.move_words_to_category(ids, category)?;
        info!(
            "event=words_move module=service status=ok count={}",
            moved
        );
        Ok(moved)
    }
}
