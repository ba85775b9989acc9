//! Repository error taxonomy.
//!
//! SQLite failures are classified once here so stores and services can match
//! on semantic variants instead of raw result codes.

use crate::db::DbError;
use crate::model::cursor::CursorError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Word,
    Category,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Category => "category",
        }
    }
}

/// Error for word/category persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Operation targets an id with no stored record.
    NotFound { kind: RecordKind, id: i64 },
    /// Write rejected by a table constraint, e.g. a duplicate primary key.
    ConstraintViolation(String),
    /// Underlying store cannot be opened, is locked, or failed at the I/O level.
    StorageUnavailable(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid domain value.
    InvalidData(String),
    Db(DbError),
}

impl RepoError {
    pub fn word_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: RecordKind::Word,
            id,
        }
    }

    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: RecordKind::Category,
            id,
        }
    }

    /// Short machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::InvalidData(_) => "invalid_data",
            Self::Db(_) => "db_error",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.label()),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::StorageUnavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => classify_sqlite_error(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        classify_sqlite_error(value)
    }
}

impl From<CursorError> for RepoError {
    fn from(value: CursorError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

fn classify_sqlite_error(err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        match failure.code {
            ErrorCode::ConstraintViolation => {
                return RepoError::ConstraintViolation(
                    message.clone().unwrap_or_else(|| failure.to_string()),
                );
            }
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
            | ErrorCode::DiskFull
            | ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::NotADatabase => {
                return RepoError::StorageUnavailable(err.to_string());
            }
            _ => {}
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

#[cfg(test)]
mod tests {
    use super::{RecordKind, RepoError};
    use crate::db::DbError;
    use rusqlite::ffi;

    fn sqlite_failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), Some("detail".to_string()))
    }

    #[test]
    fn constraint_failures_map_to_constraint_violation() {
        let err = RepoError::from(sqlite_failure(ffi::SQLITE_CONSTRAINT_PRIMARYKEY));
        assert!(matches!(err, RepoError::ConstraintViolation(ref message) if message == "detail"));
        assert_eq!(err.code(), "constraint_violation");
    }

    #[test]
    fn busy_and_open_failures_map_to_storage_unavailable() {
        for code in [ffi::SQLITE_BUSY, ffi::SQLITE_CANTOPEN, ffi::SQLITE_IOERR] {
            let err = RepoError::from(DbError::Sqlite(sqlite_failure(code)));
            assert!(matches!(err, RepoError::StorageUnavailable(_)), "{err}");
        }
    }

    #[test]
    fn other_failures_stay_db_errors() {
        let err = RepoError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, RepoError::Db(_)));
    }

    #[test]
    fn not_found_message_names_record_kind() {
        let err = RepoError::NotFound {
            kind: RecordKind::Category,
            id: 42,
        };
        assert_eq!(err.to_string(), "category not found: 42");
    }
}
