//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define keyed CRUD contracts for words and categories.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ConstraintViolation`, `StorageUnavailable`) in addition to DB
//!   transport errors.
//! - Repositories only accept connections migrated to the latest schema.
//! - Multi-row writes run in one `IMMEDIATE` transaction.

pub mod category_repo;
pub mod error;
pub mod word_repo;

use crate::db::functions::register_functions;
use crate::db::migrations::{current_user_version, latest_version};
use error::{RepoError, RepoResult};
use rusqlite::Connection;

/// Verifies `conn` is migrated and carries every table in `tables`.
///
/// Also registers the application SQL functions, so connections opened
/// outside [`crate::db::open_db`] can run repository queries.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    register_functions(conn)?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
