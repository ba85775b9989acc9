//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose word and category use-cases to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own migrated connection; writes are serialized by
//!   SQLite locking with a busy timeout.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use wordkeeper_core::db::open_db;
use wordkeeper_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    init_logging_from_config, ping as ping_inner, Category, CategoryService, CoreConfig, RepoError,
    SqliteCategoryRepository, SqliteWordRepository, Word, WordService, WordSortMode,
};

const SEARCH_DEFAULT_LIMIT: u32 = 20;
const SEARCH_LIMIT_MAX: u32 = 100;
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Applies `WORDKEEPER_*` environment settings: pins the database path and
/// starts logging when `WORDKEEPER_LOG_DIR` is set.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_from_env() -> String {
    match apply_config(&CoreConfig::from_env()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by all later calls.
///
/// Must run before the first data call; afterwards only the same path is
/// accepted. Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    match pin_db_path(PathBuf::from(trimmed)) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Word row returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordItem {
    pub id: i64,
    pub name: String,
    pub translation: String,
    pub category: String,
}

/// Category row returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
}

/// Result envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the created or targeted record, when there is one.
    pub id: Option<i64>,
    /// Rows affected beyond the target record (moved/rewritten/deleted words).
    pub affected: u32,
    /// Stable error code (`not_found`, `constraint_violation`, ...) on failure.
    pub error_code: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>, affected: usize) -> Self {
        Self {
            ok: true,
            id,
            affected: u32::try_from(affected).unwrap_or(u32::MAX),
            error_code: None,
            message: message.into(),
        }
    }

    fn failure(operation: &str, err: CallError) -> Self {
        Self {
            ok: false,
            id: None,
            affected: 0,
            error_code: Some(err.code.to_string()),
            message: format!("{operation} failed: {}", err.message),
        }
    }
}

/// Result envelope for word list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordListResponse {
    pub ok: bool,
    pub items: Vec<WordItem>,
    /// Same codes as [`ActionResponse::error_code`].
    pub error_code: Option<String>,
    pub message: String,
}

/// Result envelope for category list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub ok: bool,
    pub items: Vec<CategoryItem>,
    pub error_code: Option<String>,
    pub message: String,
}

/// Adds a word with a store-assigned id.
#[flutter_rust_bridge::frb(sync)]
pub fn word_add(name: String, translation: String, category: String) -> ActionResponse {
    let result = with_word_service(|service| {
        service.add(name.trim(), translation.trim(), category.trim())
    });
    match result {
        Ok(word) => ActionResponse::success("Word added.", Some(word.id), 0),
        Err(err) => ActionResponse::failure("word_add", err),
    }
}

/// Replaces name, translation and category of an existing word.
#[flutter_rust_bridge::frb(sync)]
pub fn word_edit(id: i64, name: String, translation: String, category: String) -> ActionResponse {
    let word = Word::new(id, name.trim(), translation.trim(), category.trim());
    match with_word_service(|service| service.edit(&word)) {
        Ok(()) => ActionResponse::success("Word updated.", Some(id), 0),
        Err(err) => ActionResponse::failure("word_edit", err),
    }
}

/// Deletes the selected words; nothing is deleted if any id is missing.
#[flutter_rust_bridge::frb(sync)]
pub fn word_delete(ids: Vec<i64>) -> ActionResponse {
    match with_word_service(|service| service.remove_many(&ids)) {
        Ok(deleted) => ActionResponse::success("Words deleted.", None, deleted),
        Err(err) => ActionResponse::failure("word_delete", err),
    }
}

/// Lists all words using `name` (default) or `newest` ordering.
#[flutter_rust_bridge::frb(sync)]
pub fn words_list(sort: Option<String>) -> WordListResponse {
    let sort = parse_sort_mode(sort.as_deref());
    word_list_response("words_list", with_word_service(|service| service.list(sort)))
}

/// Lists the words filed under an exact category name.
#[flutter_rust_bridge::frb(sync)]
pub fn words_by_category(category: String) -> WordListResponse {
    word_list_response(
        "words_by_category",
        with_word_service(|service| service.list_by_category(category.as_str())),
    )
}

/// Searches words by name, returning at most the normalized limit.
#[flutter_rust_bridge::frb(sync)]
pub fn words_search(text: String, limit: Option<u32>) -> WordListResponse {
    let limit = normalize_search_limit(limit) as usize;
    word_list_response(
        "words_search",
        with_word_service(|service| service.search(&text, Some(limit))),
    )
}

/// Moves the selected words to another category name.
#[flutter_rust_bridge::frb(sync)]
pub fn words_move(ids: Vec<i64>, category: String) -> ActionResponse {
    match with_word_service(|service| service.move_to_category(&ids, category.trim())) {
        Ok(moved) => ActionResponse::success("Words moved.", None, moved),
        Err(err) => ActionResponse::failure("words_move", err),
    }
}

/// Adds a category with a store-assigned id.
#[flutter_rust_bridge::frb(sync)]
pub fn category_add(name: String) -> ActionResponse {
    match with_category_service(|service| service.add(name.trim())) {
        Ok(category) => ActionResponse::success("Category added.", Some(category.id), 0),
        Err(err) => ActionResponse::failure("category_add", err),
    }
}

/// Renames a category; `propagate` also rewrites words filed under the old name.
#[flutter_rust_bridge::frb(sync)]
pub fn category_rename(id: i64, name: String, propagate: bool) -> ActionResponse {
    let name = name.trim();
    let result = with_category_service(|service| {
        if propagate {
            service.rename_and_propagate(id, name)
        } else {
            service.rename(id, name).map(|()| 0)
        }
    });
    match result {
        Ok(rewritten) => ActionResponse::success("Category renamed.", Some(id), rewritten),
        Err(err) => ActionResponse::failure("category_rename", err),
    }
}

/// Deletes a category; `with_words` also deletes words filed under it.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(id: i64, with_words: bool) -> ActionResponse {
    let result = with_category_service(|service| {
        if with_words {
            service.remove_with_words(id)
        } else {
            service.remove(id).map(|()| 0)
        }
    });
    match result {
        Ok(deleted) => ActionResponse::success("Category deleted.", Some(id), deleted),
        Err(err) => ActionResponse::failure("category_delete", err),
    }
}

/// Lists all categories sorted by name.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_list() -> CategoryListResponse {
    match with_category_service(|service| service.list()) {
        Ok(categories) => CategoryListResponse {
            ok: true,
            message: format!("Found {} categor(ies).", categories.len()),
            items: categories.into_iter().map(to_category_item).collect(),
            error_code: None,
        },
        Err(err) => CategoryListResponse {
            ok: false,
            items: Vec::new(),
            error_code: Some(err.code.to_string()),
            message: format!("categories_list failed: {}", err.message),
        },
    }
}

/// Failure carried from core into an envelope.
#[derive(Debug)]
struct CallError {
    code: &'static str,
    message: String,
}

impl From<RepoError> for CallError {
    fn from(value: RepoError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

fn pin_db_path(requested: PathBuf) -> Result<(), String> {
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        Ok(())
    } else {
        Err(format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        ))
    }
}

fn apply_config(config: &CoreConfig) -> Result<(), String> {
    pin_db_path(config.db_path.clone())?;
    init_logging_from_config(config)?;
    Ok(())
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| CoreConfig::from_env().db_path)
        .clone()
}

fn with_word_service<T>(
    f: impl FnOnce(&WordService<SqliteWordRepository<'_>>) -> Result<T, RepoError>,
) -> Result<T, CallError> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error_code=db_open_failed");
        CallError::from(RepoError::from(err))
    })?;
    let repo = SqliteWordRepository::try_new(&conn)?;
    let service = WordService::new(repo);
    Ok(f(&service)?)
}

fn with_category_service<T>(
    f: impl FnOnce(&CategoryService<SqliteCategoryRepository<'_>>) -> Result<T, RepoError>,
) -> Result<T, CallError> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error_code=db_open_failed");
        CallError::from(RepoError::from(err))
    })?;
    let repo = SqliteCategoryRepository::try_new(&conn)?;
    let service = CategoryService::new(repo);
    Ok(f(&service)?)
}

fn word_list_response(operation: &str, result: Result<Vec<Word>, CallError>) -> WordListResponse {
    match result {
        Ok(words) => {
            let message = if words.is_empty() {
                "No words.".to_string()
            } else {
                format!("Found {} word(s).", words.len())
            };
            WordListResponse {
                ok: true,
                items: words.into_iter().map(to_word_item).collect(),
                error_code: None,
                message,
            }
        }
        Err(err) => WordListResponse {
            ok: false,
            items: Vec::new(),
            error_code: Some(err.code.to_string()),
            message: format!("{operation} failed: {}", err.message),
        },
    }
}

fn parse_sort_mode(value: Option<&str>) -> WordSortMode {
    match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("newest") => WordSortMode::ByNewest,
        _ => WordSortMode::ByName,
    }
}

fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => SEARCH_DEFAULT_LIMIT,
        Some(value) => value.min(SEARCH_LIMIT_MAX),
    }
}

fn to_word_item(word: Word) -> WordItem {
    WordItem {
        id: word.id,
        name: word.name,
        translation: word.translation,
        category: word.category,
    }
}

fn to_category_item(category: Category) -> CategoryItem {
    CategoryItem {
        id: category.id,
        name: category.name,
    }
}
