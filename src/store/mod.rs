//! # Typed Content Store
//!
//! Per-entity create/read/update/delete/reorder functions over the
//! [`crate::db::Database`] seam. All SQL is parameterized; writes echo the
//! persisted row back so handlers can return current state to the client.
//!
//! Shared semantics:
//! - lists order by `sortOrder` ascending, ties broken by `id` ascending
//!   (submissions order by `createdAt` descending instead);
//! - updates are partial merges: an omitted patch field keeps the stored
//!   value, and for nullable fields an explicit clear is distinguished from
//!   "omitted" with `Option<Option<_>>`;
//! - reorder rewrites each row's `sortOrder` to its position in the given
//!   id list; ids not belonging to the entity type affect no rows.

pub mod cocktails;
pub mod homies;
pub mod memorabilia;
pub mod submissions;
pub mod whats_new;

use crate::db::{Database, DbError, SqlValue};

/// Rewrites `sortOrder` by list position for one entity table.
async fn reorder_table(db: &dyn Database, table: &str, ids: &[i64]) -> Result<(), DbError> {
    let sql = format!("UPDATE {table} SET sortOrder = ? WHERE id = ?");
    for (position, id) in ids.iter().enumerate() {
        db.execute(
            &sql,
            &[SqlValue::Integer(position as i64), SqlValue::Integer(*id)],
        )
        .await?;
    }
    Ok(())
}
