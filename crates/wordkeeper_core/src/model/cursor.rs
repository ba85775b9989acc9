//! Legacy forward-only cursor contract.
//!
//! # Responsibility
//! - Describe the row-at-a-time result set the legacy category read path
//!   consumes (`count`, after-last sentinel, by-name column lookup, advance).
//! - Provide a materialized implementation over SQLite query results.
//!
//! # Invariants
//! - A cursor only moves forward; once after-last it stays after-last.
//! - Column lookup is by name; positional access is not part of the contract.

use rusqlite::types::Value;
use rusqlite::{Connection, Params};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier column name used by the legacy category access path.
pub const LEGACY_ID_COLUMN: &str = "_id";
/// Name column used by the legacy category access path.
pub const LEGACY_NAME_COLUMN: &str = "name";

pub type CursorResult<T> = Result<T, CursorError>;

/// Errors raised while reading values from a cursor row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// The result set has no column with this name.
    MissingColumn(String),
    /// The column exists but holds a value of another storage class.
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
    /// A value was read while the cursor was positioned after the last row.
    AfterLast,
}

impl Display for CursorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(column) => write!(f, "cursor has no column `{column}`"),
            Self::TypeMismatch { column, expected } => {
                write!(f, "cursor column `{column}` is not {expected}")
            }
            Self::AfterLast => write!(f, "cursor is positioned after the last row"),
        }
    }
}

impl Error for CursorError {}

/// Forward-only, row-counted result set.
pub trait RowCursor {
    /// Total number of rows in the result set.
    fn count(&self) -> usize;
    /// Whether the cursor has moved past the last row.
    fn is_after_last(&self) -> bool;
    fn get_i64(&self, column: &str) -> CursorResult<i64>;
    fn get_string(&self, column: &str) -> CursorResult<String>;
    /// Advances one row. Returns `true` when the new position is a valid row.
    fn move_to_next(&mut self) -> bool;
}

/// Cursor over rows fully read into memory.
///
/// Starts positioned on the first row; an empty cursor starts after-last.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedCursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: usize,
}

impl MaterializedCursor {
    /// Builds a cursor from column names and row values.
    ///
    /// Rows shorter than `columns` report their trailing columns as missing.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
        }
    }

    /// Runs `sql` and reads all result rows into a new cursor.
    pub fn query(conn: &Connection, sql: &str, params: impl Params) -> rusqlite::Result<Self> {
        let mut stmt = conn.prepare(sql)?;
        let columns = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let column_count = columns.len();

        let mut rows = stmt.query(params)?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(column_count);
            for index in 0..column_count {
                record.push(row.get::<_, Value>(index)?);
            }
            values.push(record);
        }

        Ok(Self::new(columns, values))
    }

    fn value(&self, column: &str) -> CursorResult<&Value> {
        let index = self
            .columns
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| CursorError::MissingColumn(column.to_string()))?;
        let row = self.rows.get(self.position).ok_or(CursorError::AfterLast)?;
        row.get(index)
            .ok_or_else(|| CursorError::MissingColumn(column.to_string()))
    }
}

impl RowCursor for MaterializedCursor {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn is_after_last(&self) -> bool {
        self.position >= self.rows.len()
    }

    fn get_i64(&self, column: &str) -> CursorResult<i64> {
        match self.value(column)? {
            Value::Integer(value) => Ok(*value),
            _ => Err(CursorError::TypeMismatch {
                column: column.to_string(),
                expected: "an integer",
            }),
        }
    }

    fn get_string(&self, column: &str) -> CursorResult<String> {
        match self.value(column)? {
            Value::Text(value) => Ok(value.clone()),
            _ => Err(CursorError::TypeMismatch {
                column: column.to_string(),
                expected: "text",
            }),
        }
    }

    fn move_to_next(&mut self) -> bool {
        if self.position < self.rows.len() {
            self.position += 1;
        }
        !self.is_after_last()
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorError, MaterializedCursor, RowCursor};
    use crate::model::category::Category;
    use rusqlite::types::Value;

    fn category_cursor(rows: &[(i64, &str)]) -> MaterializedCursor {
        MaterializedCursor::new(
            vec!["_id".to_string(), "name".to_string()],
            rows.iter()
                .map(|(id, name)| vec![Value::Integer(*id), Value::Text((*name).to_string())])
                .collect(),
        )
    }

    #[test]
    fn categories_from_cursor_keeps_row_order() {
        let mut cursor = category_cursor(&[(1, "Animals"), (2, "Colors"), (3, "Food")]);

        let categories = Category::categories_from_cursor(&mut cursor).unwrap();

        assert_eq!(
            categories,
            vec![
                Category::new(1, "Animals"),
                Category::new(2, "Colors"),
                Category::new(3, "Food"),
            ]
        );
        assert!(cursor.is_after_last());
    }

    #[test]
    fn empty_cursor_yields_empty_list() {
        let mut cursor = category_cursor(&[]);
        assert!(cursor.is_after_last());
        assert!(Category::categories_from_cursor(&mut cursor)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn move_to_next_stops_at_after_last() {
        let mut cursor = category_cursor(&[(7, "Only")]);
        assert_eq!(cursor.count(), 1);
        assert!(!cursor.move_to_next());
        assert!(!cursor.move_to_next());
        assert_eq!(cursor.get_i64("_id"), Err(CursorError::AfterLast));
    }

    #[test]
    fn missing_column_and_type_mismatch_are_reported() {
        let mut missing = MaterializedCursor::new(
            vec!["_id".to_string()],
            vec![vec![Value::Integer(1)]],
        );
        let err = Category::categories_from_cursor(&mut missing).unwrap_err();
        assert_eq!(err, CursorError::MissingColumn("name".to_string()));

        let mut mismatched = MaterializedCursor::new(
            vec!["_id".to_string(), "name".to_string()],
            vec![vec![Value::Text("1".to_string()), Value::Text("Food".to_string())]],
        );
        let err = Category::categories_from_cursor(&mut mismatched).unwrap_err();
        assert!(matches!(err, CursorError::TypeMismatch { column, .. } if column == "_id"));
    }
}
