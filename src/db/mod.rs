//! # Dual-Backend Database Layer
//!
//! The content store runs against either a local embedded SQLite file
//! (development) or a remote SQLite-compatible service (Turso, production).
//! Both are hidden behind the [`Database`] trait: `query`/`execute` over
//! neutral parameter and row types, so the typed store functions in
//! [`crate::store`] are written once and never branch on the backend.
//!
//! The backend is chosen once at startup from configuration and injected
//! through application state; see [`crate::config::Config`].

mod local;
pub mod migrations;
mod remote;

pub use local::LocalDb;
pub use remote::TursoDb;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by either database backend.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error")]
    Sqlite(#[from] sqlx::Error),

    #[error("database I/O error")]
    Io(#[from] std::io::Error),

    #[error("remote database request failed")]
    Http(#[from] reqwest::Error),

    #[error("remote database error: {0}")]
    Remote(String),

    #[error("row decode error: {0}")]
    Decode(String),
}

/// SQL parameter / cell value, neutral across backends.
///
/// Only the storage classes the schema actually uses are modeled; there are
/// no blob columns in this application.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// Convenience constructor for nullable text parameters.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) => SqlValue::Text(s.to_string()),
            None => SqlValue::Null,
        }
    }
}

/// A single result row with by-name column access.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    fn value(&self, column: &str) -> Result<&SqlValue, DbError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
            .ok_or_else(|| DbError::Decode(format!("missing column `{column}`")))
    }

    pub fn i64(&self, column: &str) -> Result<i64, DbError> {
        match self.value(column)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(DbError::Decode(format!(
                "column `{column}`: expected integer, got {other:?}"
            ))),
        }
    }

    pub fn text(&self, column: &str) -> Result<String, DbError> {
        match self.value(column)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(DbError::Decode(format!(
                "column `{column}`: expected text, got {other:?}"
            ))),
        }
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DbError> {
        match self.value(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            other => Err(DbError::Decode(format!(
                "column `{column}`: expected text or null, got {other:?}"
            ))),
        }
    }
}

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: i64,
}

/// The seam between the typed content store and its two concrete backends.
#[async_trait]
pub trait Database: Send + Sync {
    /// Runs a parameterized query and returns all result rows.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError>;

    /// Runs a parameterized write statement.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::new(
            vec!["id".into(), "name".into(), "friendName".into()],
            vec![
                SqlValue::Integer(7),
                SqlValue::Text("Old Fashioned".into()),
                SqlValue::Null,
            ],
        )
    }

    #[test]
    fn row_reads_typed_columns() {
        let row = sample_row();
        assert_eq!(row.i64("id").unwrap(), 7);
        assert_eq!(row.text("name").unwrap(), "Old Fashioned");
        assert_eq!(row.opt_text("friendName").unwrap(), None);
    }

    #[test]
    fn row_rejects_missing_and_mistyped_columns() {
        let row = sample_row();
        assert!(row.i64("nope").is_err());
        assert!(row.text("id").is_err());
    }
}
