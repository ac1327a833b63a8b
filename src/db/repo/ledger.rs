//! Stored stat line updates and ledger appends.
//!
//! Every write to a player's line goes through [`Repository::update_player_line`],
//! which holds SQLite's write lock for the whole read-modify-write and keeps
//! `games.our_score` equal to the sum of the roster's stored points.

use sqlx::sqlite::SqliteConnection;
use sqlx::Row;

use crate::domain::{GameId, PlayerId, ShotAttempt, StatEvent, StatLine};

use super::games::stat_line_from_row;
use super::{decode_msg, to_u32, LedgerAppend, PeriodContext, PlayerLineUpdate, Repository};

impl Repository {
    /// Read a player's stored line, let `f` compute the replacement, and write it back
    /// together with any ledger entries `f` produced.
    ///
    /// Returns `Ok(None)` when the game or the player is unknown; nothing is written.
    ///
    /// # Errors
    /// Returns the closure's error or a database error; either way nothing is written.
    pub async fn update_player_line<F, E>(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        f: F,
    ) -> Result<Option<PlayerLineUpdate>, E>
    where
        F: FnOnce(PeriodContext, &StatLine) -> Result<(StatLine, LedgerAppend), E>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;

        // A write as the first statement takes SQLite's write lock before
        // anything is read, so concurrent read-modify-writes queue up.
        let claimed = sqlx::query("UPDATE games SET our_score = our_score WHERE id = ?")
            .bind(game_id.as_str())
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let update = Self::update_player_line_in(&mut *tx, game_id, player_id, f).await?;
        if update.is_some() {
            tx.commit().await?;
        }
        Ok(update)
    }

    async fn update_player_line_in<F, E>(
        conn: &mut SqliteConnection,
        game_id: &GameId,
        player_id: &PlayerId,
        f: F,
    ) -> Result<Option<PlayerLineUpdate>, E>
    where
        F: FnOnce(PeriodContext, &StatLine) -> Result<(StatLine, LedgerAppend), E>,
        E: From<sqlx::Error>,
    {
        let game_row = sqlx::query("SELECT period_type, current_period FROM games WHERE id = ?")
            .bind(game_id.as_str())
            .fetch_optional(&mut *conn)
            .await?;
        let Some(game_row) = game_row else {
            return Ok(None);
        };
        let context = PeriodContext {
            period_type: game_row
                .get::<String, _>("period_type")
                .parse()
                .map_err(decode_msg)?,
            current_period: game_row.get("current_period"),
        };

        let line_row = sqlx::query(
            "SELECT * FROM player_game_stats WHERE game_id = ? AND player_id = ?",
        )
        .bind(game_id.as_str())
        .bind(player_id.as_str())
        .fetch_optional(&mut *conn)
        .await?;
        let Some(line_row) = line_row else {
            return Ok(None);
        };
        let current = stat_line_from_row(&line_row);

        let (next, append) = f(context, &current)?;

        Self::write_stat_line(&mut *conn, game_id, player_id, &next).await?;

        if !append.shots.is_empty() {
            let base = Self::next_seq(&mut *conn, "shots", game_id, player_id).await?;
            for (offset, shot) in append.shots.iter().enumerate() {
                Self::insert_shot(&mut *conn, game_id, player_id, base + offset as i64, shot)
                    .await?;
            }
        }
        if !append.events.is_empty() {
            let base = Self::next_seq(&mut *conn, "stat_events", game_id, player_id).await?;
            for (offset, event) in append.events.iter().enumerate() {
                Self::insert_event(&mut *conn, game_id, player_id, base + offset as i64, event)
                    .await?;
            }
        }

        sqlx::query(
            r#"
            UPDATE games SET our_score = (
                SELECT COALESCE(SUM(points), 0) FROM player_game_stats WHERE game_id = ?
            )
            WHERE id = ?
            "#,
        )
        .bind(game_id.as_str())
        .bind(game_id.as_str())
        .execute(&mut *conn)
        .await?;

        let our_score: i64 = sqlx::query("SELECT our_score FROM games WHERE id = ?")
            .bind(game_id.as_str())
            .fetch_one(&mut *conn)
            .await?
            .get("our_score");

        Ok(Some(PlayerLineUpdate {
            stats: next,
            our_score: to_u32(our_score),
        }))
    }

    async fn write_stat_line(
        conn: &mut SqliteConnection,
        game_id: &GameId,
        player_id: &PlayerId,
        s: &StatLine,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE player_game_stats SET
                points = ?, rebounds = ?, offensive_rebounds = ?, defensive_rebounds = ?,
                assists = ?, steals = ?, blocks = ?, turnovers = ?, fouls = ?,
                fg_made = ?, fg_attempted = ?, three_pt_made = ?, three_pt_attempted = ?,
                ft_made = ?, ft_attempted = ?, plus_minus = ?, minutes_played = ?
            WHERE game_id = ? AND player_id = ?
            "#,
        )
        .bind(i64::from(s.points))
        .bind(i64::from(s.rebounds))
        .bind(i64::from(s.offensive_rebounds))
        .bind(i64::from(s.defensive_rebounds))
        .bind(i64::from(s.assists))
        .bind(i64::from(s.steals))
        .bind(i64::from(s.blocks))
        .bind(i64::from(s.turnovers))
        .bind(i64::from(s.fouls))
        .bind(i64::from(s.fg_made))
        .bind(i64::from(s.fg_attempted))
        .bind(i64::from(s.three_pt_made))
        .bind(i64::from(s.three_pt_attempted))
        .bind(i64::from(s.ft_made))
        .bind(i64::from(s.ft_attempted))
        .bind(i64::from(s.plus_minus))
        .bind(i64::from(s.minutes_played))
        .bind(game_id.as_str())
        .bind(player_id.as_str())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn next_seq(
        conn: &mut SqliteConnection,
        table: &str,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COALESCE(MAX(seq), 0) + 1 AS next FROM {} WHERE game_id = ? AND player_id = ?",
            table
        );
        let row = sqlx::query(&sql)
            .bind(game_id.as_str())
            .bind(player_id.as_str())
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.get("next"))
    }

    pub(super) async fn insert_shot(
        conn: &mut SqliteConnection,
        game_id: &GameId,
        player_id: &PlayerId,
        seq: i64,
        shot: &ShotAttempt,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO shots (game_id, player_id, seq, x, y, shot_type, made, period)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(game_id.as_str())
        .bind(player_id.as_str())
        .bind(seq)
        .bind(shot.x)
        .bind(shot.y)
        .bind(shot.shot_type.as_str())
        .bind(shot.made)
        .bind(shot.period)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub(super) async fn insert_event(
        conn: &mut SqliteConnection,
        game_id: &GameId,
        player_id: &PlayerId,
        seq: i64,
        event: &StatEvent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO stat_events (game_id, player_id, seq, stat_type, value, period)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(game_id.as_str())
        .bind(player_id.as_str())
        .bind(seq)
        .bind(&event.stat_type)
        .bind(event.value)
        .bind(event.period)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
