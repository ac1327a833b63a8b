//! Database initialization: connection pragmas plus the game/ledger schema.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::{info, warn};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Pragmas applied to every pooled connection, in order.
const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA synchronous = NORMAL",
];

/// Open (creating if needed) the SQLite database at `db_path` and apply the schema.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Could not create database directory");
            }
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { prepare_connection(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    let applied = apply_schema(&pool).await?;
    info!(statements = applied, "Database ready at {}", db_path);
    Ok(pool)
}

/// Execute every statement in the embedded schema. All statements are
/// `IF NOT EXISTS`, so re-running against a populated database is a no-op.
async fn apply_schema(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let mut applied = 0;
    for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
        applied += 1;
    }
    Ok(applied)
}

async fn prepare_connection(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for pragma in CONNECTION_PRAGMAS {
        sqlx::query(pragma).execute(&mut *conn).await?;
    }

    // journal_mode reports the mode actually in effect.
    let mode: String = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?
        .get(0);
    if mode != "wal" {
        warn!(journal_mode = %mode, "SQLite did not switch to WAL");
    }
    Ok(())
}
