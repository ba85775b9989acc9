//! Category store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD over the `categories` table.
//! - Serve the legacy cursor read path (`_id`, `name` columns).
//! - Own the explicit category-to-word reconciliation writes.
//!
//! # Invariants
//! - Plain `update_category`/`delete_category` never touch word rows.
//! - Rename propagation and cascade delete run in one transaction each.
//! - Category listing is deterministic: `fold_case(name) ASC, id ASC`.

use crate::db::{CATEGORIES_TABLE, WORDS_TABLE};
use crate::model::category::{Category, CategoryId};
use crate::model::cursor::MaterializedCursor;
use crate::repo::ensure_connection_ready;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name FROM categories";

/// Repository interface for category storage.
pub trait CategoryRepository {
    /// Stores a category under its own id.
    fn insert_category(&self, category: &Category) -> RepoResult<CategoryId>;
    /// Stores a category under the next free id and returns the stored value.
    fn insert_new_category(&self, name: &str) -> RepoResult<Category>;
    /// Replaces the name of the category with the same id. Words keep their text.
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    /// Deletes one category. Words filed under it are left as they are.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Opens a legacy cursor over all categories in id order.
    fn open_cursor(&self) -> RepoResult<MaterializedCursor>;
    /// Renames a category and rewrites matching word references.
    ///
    /// Returns the number of words rewritten.
    fn rename_category_propagating(&self, id: CategoryId, new_name: &str) -> RepoResult<usize>;
    /// Deletes a category together with the words filed under its name.
    ///
    /// Returns the number of words deleted.
    fn delete_category_with_words(&self, id: CategoryId) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[CATEGORIES_TABLE, WORDS_TABLE])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn insert_category(&self, category: &Category) -> RepoResult<CategoryId> {
        self.conn.execute(
            "INSERT INTO categories (id, name) VALUES (?1, ?2);",
            params![category.id, category.name.as_str()],
        )?;
        Ok(category.id)
    }

    fn insert_new_category(&self, name: &str) -> RepoResult<Category> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1);", [name])?;
        Ok(Category::new(self.conn.last_insert_rowid(), name))
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?2 WHERE id = ?1;",
            params![category.id, category.name.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::category_not_found(category.id));
        }

        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::category_not_found(id));
        }

        Ok(())
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(parse_category_row(row)),
            )
            .optional()?;
        category.transpose()
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} ORDER BY fold_case(name) ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn open_cursor(&self) -> RepoResult<MaterializedCursor> {
        let cursor = MaterializedCursor::query(
            self.conn,
            "SELECT id AS _id, name FROM categories ORDER BY id ASC;",
            [],
        )?;
        Ok(cursor)
    }

    fn rename_category_propagating(&self, id: CategoryId, new_name: &str) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let old_name = load_required_name(&tx, id)?;

        tx.execute(
            "UPDATE categories SET name = ?2 WHERE id = ?1;",
            params![id, new_name],
        )?;
        let rewritten = tx.execute(
            "UPDATE WordDbModel SET category = ?2 WHERE category = ?1;",
            params![old_name.as_str(), new_name],
        )?;

        tx.commit()?;
        Ok(rewritten)
    }

    fn delete_category_with_words(&self, id: CategoryId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let name = load_required_name(&tx, id)?;

        let deleted = tx.execute(
            "DELETE FROM WordDbModel WHERE category = ?1;",
            [name.as_str()],
        )?;
        tx.execute("DELETE FROM categories WHERE id = ?1;", [id])?;

        tx.commit()?;
        Ok(deleted)
    }
}

fn load_required_name(conn: &Connection, id: CategoryId) -> RepoResult<String> {
    conn.query_row(
        "SELECT name FROM categories WHERE id = ?1;",
        [id],
        |row| row.get::<_, String>(0),
    )
    .optional()?
    .ok_or_else(|| RepoError::category_not_found(id))
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
