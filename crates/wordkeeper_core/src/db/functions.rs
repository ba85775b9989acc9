//! Application-defined SQL functions.
//!
//! # Invariants
//! - `fold_case(text)` lowercases with full Unicode rules; SQLite's own
//!   `LIKE` and `NOCASE` only fold ASCII letters.
//! - `fold_case(NULL)` is `NULL`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

const FOLD_CASE_FN: &str = "fold_case";

/// Registers every application function on `conn`.
///
/// Safe to call more than once; a later registration replaces the earlier one.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.as_deref().map(fold_case))
        },
    )
}

/// Case-folds `value` the same way the `fold_case` SQL function does.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::register_functions;
    use rusqlite::Connection;

    #[test]
    fn fold_case_lowercases_non_ascii_text() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT fold_case('ДОМ Über');", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "дом über");

        let null: Option<String> = conn
            .query_row("SELECT fold_case(NULL);", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn registering_twice_is_allowed() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();
        register_functions(&conn).unwrap();
    }
}
