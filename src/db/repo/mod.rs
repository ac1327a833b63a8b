//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `games.rs` - Game records, rosters and hydration of full games
//! - `ledger.rs` - Stored stat line updates and ledger appends

mod games;
mod ledger;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;

use crate::domain::{GameStatus, PeriodType, ShotAttempt, StatEvent, StatLine};

/// Partial update of a game's mutable header fields. `None` leaves a field as is.
///
/// `completed_at` is doubly optional: `Some(None)` clears the stamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePatch {
    pub our_score: Option<u32>,
    pub opponent_score: Option<u32>,
    pub current_period: Option<i32>,
    pub status: Option<GameStatus>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Period format and live period of the game a stat line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodContext {
    pub period_type: PeriodType,
    pub current_period: i32,
}

/// Ledger entries to append alongside a stat line update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerAppend {
    pub shots: Vec<ShotAttempt>,
    pub events: Vec<StatEvent>,
}

/// Result of a committed stat line update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLineUpdate {
    pub stats: StatLine,
    pub our_score: u32,
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

fn decode_msg(msg: String) -> sqlx::Error {
    sqlx::Error::Decode(msg.into())
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(decode_err)
}
