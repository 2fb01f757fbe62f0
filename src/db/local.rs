//! Local embedded SQLite backend.
//!
//! Wraps a sqlx connection pool; the database file (and its parent
//! directory) are created on first connect, with WAL journaling to keep
//! concurrent request handling from serializing on the writer.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePool,
    SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::{debug, info};

use super::{Database, DbError, ExecResult, Row, SqlValue};

pub struct LocalDb {
    pool: SqlitePool,
}

impl LocalDb {
    /// Opens (creating if missing) the database file at `path`.
    pub async fn connect(path: &Path) -> Result<Self, DbError> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "Connected to local database");
        Ok(Self { pool })
    }

    /// Wraps an existing pool; used by tests, which get their pool from
    /// `#[sqlx::test]`.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(Option::<i64>::None),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

fn neutral_row(row: &SqliteRow) -> Result<Row, DbError> {
    let mut columns = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());

    for (i, column) in row.columns().iter().enumerate() {
        columns.push(column.name().to_string());

        let raw = row.try_get_raw(i).map_err(DbError::Sqlite)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get(i)?),
                "REAL" => SqlValue::Real(row.try_get(i)?),
                _ => SqlValue::Text(row.try_get(i)?),
            }
        };
        values.push(value);
    }

    Ok(Row::new(columns, values))
}

#[async_trait]
impl Database for LocalDb {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        debug!(sql, "Executing local query");
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(neutral_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DbError> {
        debug!(sql, "Executing local statement");
        let result = bind_params(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;
        Ok(ExecResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }
}
