//! # Versioned Schema Migrations
//!
//! The schema is evolved by an explicit, ordered migration list recorded in
//! a `schema_migrations` table, so replay behavior is auditable. Individual
//! steps stay additive and self-guarding (`CREATE TABLE IF NOT EXISTS`,
//! add-column-if-missing probes): the same runner converges a fresh
//! database, a database from a previous deploy, and a legacy database whose
//! tables predate the migration ledger and already contain some of the
//! later columns. Running it repeatedly is a no-op.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{Database, DbError, SqlValue};

enum Step {
    Sql(&'static str),
    AddColumn {
        table: &'static str,
        column: &'static str,
        decl: &'static str,
    },
}

struct Migration {
    version: i64,
    name: &'static str,
    steps: &'static [Step],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "core content tables",
        steps: &[
            Step::Sql(
                "CREATE TABLE IF NOT EXISTS cocktails (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL,
                    imagePath TEXT NOT NULL,
                    sortOrder INTEGER NOT NULL DEFAULT 0,
                    createdAt TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            ),
            Step::Sql(
                "CREATE TABLE IF NOT EXISTS memorabilia (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    imagePath TEXT NOT NULL,
                    sortOrder INTEGER NOT NULL DEFAULT 0,
                    createdAt TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            ),
            Step::Sql(
                "CREATE TABLE IF NOT EXISTS homies (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    imagePath TEXT,
                    sortOrder INTEGER NOT NULL DEFAULT 0,
                    createdAt TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            ),
            Step::Sql(
                "CREATE TABLE IF NOT EXISTS submissions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    imagePath TEXT NOT NULL,
                    createdAt TEXT NOT NULL DEFAULT (datetime('now'))
                )",
            ),
        ],
    },
    Migration {
        version: 2,
        name: "submission guest fields and moderation status",
        steps: &[
            Step::AddColumn {
                table: "submissions",
                column: "guestName",
                decl: "TEXT",
            },
            Step::AddColumn {
                table: "submissions",
                column: "comment",
                decl: "TEXT",
            },
            Step::AddColumn {
                table: "submissions",
                column: "status",
                decl: "TEXT NOT NULL DEFAULT 'pending'",
            },
            // Legacy databases added status without the NOT NULL constraint.
            Step::Sql("UPDATE submissions SET status = 'pending' WHERE status IS NULL"),
        ],
    },
    Migration {
        version: 3,
        name: "cocktail friend attribution and ingredients",
        steps: &[
            Step::AddColumn {
                table: "cocktails",
                column: "friendName",
                decl: "TEXT",
            },
            Step::AddColumn {
                table: "cocktails",
                column: "ingredients",
                decl: "TEXT",
            },
        ],
    },
    Migration {
        version: 4,
        name: "multi-item whats_new table",
        steps: &[Step::Sql(
            "CREATE TABLE IF NOT EXISTS whats_new (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                imagePath TEXT NOT NULL,
                sortOrder INTEGER NOT NULL DEFAULT 0,
                createdAt TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )],
    },
    Migration {
        version: 5,
        name: "display rotation on all content tables",
        steps: &[
            Step::AddColumn {
                table: "cocktails",
                column: "imageRotation",
                decl: "INTEGER NOT NULL DEFAULT 0",
            },
            Step::AddColumn {
                table: "memorabilia",
                column: "imageRotation",
                decl: "INTEGER NOT NULL DEFAULT 0",
            },
            Step::AddColumn {
                table: "homies",
                column: "imageRotation",
                decl: "INTEGER NOT NULL DEFAULT 0",
            },
            Step::AddColumn {
                table: "submissions",
                column: "imageRotation",
                decl: "INTEGER NOT NULL DEFAULT 0",
            },
            Step::AddColumn {
                table: "whats_new",
                column: "imageRotation",
                decl: "INTEGER NOT NULL DEFAULT 0",
            },
        ],
    },
];

/// Applies all pending migrations in order. Idempotent.
pub async fn run(db: &dyn Database) -> Result<(), DbError> {
    db.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            appliedAt TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        &[],
    )
    .await?;

    let applied: HashSet<i64> = db
        .query("SELECT version FROM schema_migrations", &[])
        .await?
        .iter()
        .map(|row| row.i64("version"))
        .collect::<Result<_, _>>()?;

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        for step in migration.steps {
            match step {
                Step::Sql(sql) => {
                    db.execute(sql, &[]).await?;
                }
                Step::AddColumn {
                    table,
                    column,
                    decl,
                } => {
                    if column_exists(db, table, column).await? {
                        debug!(table, column, "Column already present, skipping");
                        continue;
                    }
                    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
                    db.execute(&sql, &[]).await?;
                }
            }
        }

        db.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?, ?)",
            &[
                SqlValue::Integer(migration.version),
                SqlValue::Text(migration.name.to_string()),
            ],
        )
        .await?;
    }

    Ok(())
}

async fn column_exists(db: &dyn Database, table: &str, column: &str) -> Result<bool, DbError> {
    let rows = db
        .query(
            "SELECT name FROM pragma_table_info(?)",
            &[SqlValue::Text(table.to_string())],
        )
        .await?;

    for row in rows {
        if row.text("name")? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;

    use super::*;
    use crate::db::LocalDb;

    #[sqlx::test]
    async fn migrations_are_idempotent(pool: SqlitePool) {
        let db = LocalDb::from_pool(pool);
        run(&db).await.expect("first run");
        run(&db).await.expect("second run");

        let versions = db
            .query("SELECT version FROM schema_migrations ORDER BY version", &[])
            .await
            .unwrap();
        assert_eq!(versions.len(), MIGRATIONS.len());
    }

    #[sqlx::test]
    async fn upgrades_legacy_schema_without_data_loss(pool: SqlitePool) {
        let db = LocalDb::from_pool(pool);

        // A database created by an early deploy: no ledger, no later columns.
        db.execute(
            "CREATE TABLE cocktails (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                imagePath TEXT NOT NULL,
                sortOrder INTEGER NOT NULL DEFAULT 0,
                createdAt TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            &[],
        )
        .await
        .unwrap();
        db.execute(
            "INSERT INTO cocktails (name, description, imagePath) VALUES (?, ?, ?)",
            &[
                SqlValue::Text("Negroni".into()),
                SqlValue::Text("Bitter.".into()),
                SqlValue::Text("/uploads/cocktails/a.jpg".into()),
            ],
        )
        .await
        .unwrap();

        run(&db).await.expect("migrate legacy schema");

        let rows = db
            .query(
                "SELECT name, friendName, imageRotation FROM cocktails",
                &[],
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("name").unwrap(), "Negroni");
        assert_eq!(rows[0].opt_text("friendName").unwrap(), None);
        assert_eq!(rows[0].i64("imageRotation").unwrap(), 0);
    }
}
