//! Word store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD over the `WordDbModel` table.
//! - Provide list/filter/search reads used by the word list screens.
//!
//! # Invariants
//! - `insert_word` never overwrites: a taken id is a `ConstraintViolation`.
//! - `update_word`/`delete_word` on a missing id return `NotFound`.
//! - Category filtering compares the stored text exactly.
//! - Name search and name ordering fold case with full Unicode rules.
//! - Batch writes are all-or-nothing.

use crate::db::functions::fold_case;
use crate::db::WORDS_TABLE;
use crate::model::word::{Word, WordId};
use crate::repo::ensure_connection_ready;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;

const WORD_SELECT_SQL: &str = "SELECT
    id,
    name,
    translation,
    category
FROM WordDbModel";

/// Ordering applied by [`WordRepository::list_words`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordSortMode {
    /// Case-insensitive by name, ties broken by id.
    #[default]
    ByName,
    /// Most recently added first (highest id first).
    ByNewest,
}

impl WordSortMode {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::ByName => "ORDER BY fold_case(name) ASC, id ASC",
            Self::ByNewest => "ORDER BY id DESC",
        }
    }
}

/// Repository interface for word storage.
pub trait WordRepository {
    /// Stores a word under its own id.
    fn insert_word(&self, word: &Word) -> RepoResult<WordId>;
    /// Stores a word under the next free id and returns the stored value.
    fn insert_new_word(&self, name: &str, translation: &str, category: &str) -> RepoResult<Word>;
    /// Replaces every field of the word with the same id.
    fn update_word(&self, word: &Word) -> RepoResult<()>;
    fn delete_word(&self, id: WordId) -> RepoResult<()>;
    /// Deletes all listed words, or none when any id is missing.
    ///
    /// Repeated ids count once; returns the number of distinct words deleted.
    fn delete_words(&self, ids: &[WordId]) -> RepoResult<usize>;
    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>>;
    fn list_words(&self, sort: WordSortMode) -> RepoResult<Vec<Word>>;
    /// Words whose `category` equals `category`, sorted by name.
    fn list_words_by_category(&self, category: &str) -> RepoResult<Vec<Word>>;
    /// Case-insensitive substring search over word names, sorted by name.
    ///
    /// `limit` caps the number of returned words; `None` returns all matches.
    fn search_words_by_name(&self, text: &str, limit: Option<usize>) -> RepoResult<Vec<Word>>;
    /// Refiles all listed words under `category`, or none when any id is missing.
    fn move_words_to_category(&self, ids: &[WordId], category: &str) -> RepoResult<usize>;
}

/// SQLite-backed word repository.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[WORDS_TABLE])?;
        Ok(Self { conn })
    }

    fn query_words(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Word>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut words = Vec::new();
        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }
        Ok(words)
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn insert_word(&self, word: &Word) -> RepoResult<WordId> {
        self.conn.execute(
            "INSERT INTO WordDbModel (id, name, translation, category)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                word.id,
                word.name.as_str(),
                word.translation.as_str(),
                word.category.as_str(),
            ],
        )?;
        Ok(word.id)
    }

    fn insert_new_word(&self, name: &str, translation: &str, category: &str) -> RepoResult<Word> {
        self.conn.execute(
            "INSERT INTO WordDbModel (name, translation, category)
             VALUES (?1, ?2, ?3);",
            params![name, translation, category],
        )?;
        Ok(Word::new(
            self.conn.last_insert_rowid(),
            name,
            translation,
            category,
        ))
    }

    fn update_word(&self, word: &Word) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE WordDbModel
             SET
                name = ?2,
                translation = ?3,
                category = ?4
             WHERE id = ?1;",
            params![
                word.id,
                word.name.as_str(),
                word.translation.as_str(),
                word.category.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::word_not_found(word.id));
        }

        Ok(())
    }

    fn delete_word(&self, id: WordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM WordDbModel WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::word_not_found(id));
        }

        Ok(())
    }

    fn delete_words(&self, ids: &[WordId]) -> RepoResult<usize> {
        let ids = distinct_ids(ids);
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for id in &ids {
            let changed = tx.execute("DELETE FROM WordDbModel WHERE id = ?1;", [id])?;
            if changed == 0 {
                // Dropping `tx` rolls back the rows already deleted.
                return Err(RepoError::word_not_found(*id));
            }
        }
        tx.commit()?;
        Ok(ids.len())
    }

    fn get_word(&self, id: WordId) -> RepoResult<Option<Word>> {
        let word = self
            .conn
            .query_row(
                &format!("{WORD_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_word_row(row)),
            )
            .optional()?;
        word.transpose()
    }

    fn list_words(&self, sort: WordSortMode) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!("{WORD_SELECT_SQL} {};", sort.order_by_sql()),
            [],
        )
    }

    fn list_words_by_category(&self, category: &str) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!(
                "{WORD_SELECT_SQL}
                 WHERE category = ?1
                 {};",
                WordSortMode::ByName.order_by_sql()
            ),
            [category],
        )
    }

    fn search_words_by_name(&self, text: &str, limit: Option<usize>) -> RepoResult<Vec<Word>> {
        let needle = text.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        self.query_words(
            &format!(
                "{WORD_SELECT_SQL}
                 WHERE instr(fold_case(name), ?1) > 0
                 {}
                 LIMIT ?2;",
                WordSortMode::ByName.order_by_sql()
            ),
            params![fold_case(needle), search_limit_param(limit)],
        )
    }

    fn move_words_to_category(&self, ids: &[WordId], category: &str) -> RepoResult<usize> {
        let ids = distinct_ids(ids);
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for id in &ids {
            let changed = tx.execute(
                "UPDATE WordDbModel SET category = ?2 WHERE id = ?1;",
                params![id, category],
            )?;
            if changed == 0 {
                return Err(RepoError::word_not_found(*id));
            }
        }
        tx.commit()?;
        Ok(ids.len())
    }
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    Ok(Word {
        id: row.get("id")?,
        name: row.get("name")?,
        translation: row.get("translation")?,
        category: row.get("category")?,
    })
}

/// A selection may repeat ids; each word is written once.
fn distinct_ids(ids: &[WordId]) -> BTreeSet<WordId> {
    ids.iter().copied().collect()
}

fn search_limit_param(limit: Option<usize>) -> i64 {
    // SQLite treats a negative LIMIT as unbounded.
    limit.map_or(-1, |value| i64::try_from(value).unwrap_or(i64::MAX))
}
