//! Core storage logic for WordKeeper.
//! Words, their translations and user-defined categories, persisted in SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::cursor::{CursorError, MaterializedCursor, RowCursor};
pub use model::word::{Word, WordId};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::error::{RecordKind, RepoError, RepoResult};
pub use repo::word_repo::{SqliteWordRepository, WordRepository, WordSortMode};
pub use service::category_service::CategoryService;
pub use service::word_service::WordService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
