//! Game, roster and hydration operations for the repository.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::Row;
use std::collections::HashMap;

use crate::domain::{
    Game, GameId, GameStatus, PeriodType, PlayerGameStats, PlayerId, ShotAttempt, ShotType,
    StatEvent, StatLine,
};

use super::{decode_msg, parse_time, to_u32, GamePatch, PeriodContext, Repository};

const GAME_COLUMNS: &str = r#"
    id, team_name, opponent_name, game_date, location, game_type, period_type,
    current_period, status, our_score, opponent_score, created_at, completed_at
"#;

impl Repository {
    /// Insert a game with its roster and any ledger entries it already carries.
    ///
    /// # Errors
    /// Returns an error if the transaction fails (including a duplicate id).
    pub async fn insert_game(&self, game: &Game) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO games (
                id, team_name, opponent_name, game_date, location, game_type, period_type,
                current_period, status, our_score, opponent_score, created_at, completed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(game.id.as_str())
        .bind(&game.team_name)
        .bind(&game.opponent_name)
        .bind(game.game_date.to_rfc3339())
        .bind(game.location.as_deref())
        .bind(game.game_type.as_deref())
        .bind(game.period_type.as_str())
        .bind(game.current_period)
        .bind(game.status.as_str())
        .bind(i64::from(game.our_score))
        .bind(i64::from(game.opponent_score))
        .bind(game.created_at.to_rfc3339())
        .bind(game.completed_at.map(|t| t.to_rfc3339()))
        .execute(&mut *tx)
        .await?;

        for (order, player) in game.player_stats.iter().enumerate() {
            let s = &player.stats;
            sqlx::query(
                r#"
                INSERT INTO player_game_stats (
                    game_id, player_id, player_name, number, position, roster_order,
                    points, rebounds, offensive_rebounds, defensive_rebounds, assists, steals,
                    blocks, turnovers, fouls, fg_made, fg_attempted, three_pt_made,
                    three_pt_attempted, ft_made, ft_attempted, plus_minus, minutes_played
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(game.id.as_str())
            .bind(player.player_id.as_str())
            .bind(&player.player_name)
            .bind(player.number.map(i64::from))
            .bind(player.position.as_deref())
            .bind(order as i64)
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
            .execute(&mut *tx)
            .await?;

            for (idx, shot) in player.shots.iter().enumerate() {
                Self::insert_shot(&mut *tx, &game.id, &player.player_id, idx as i64 + 1, shot)
                    .await?;
            }
            for (idx, event) in player.stat_events.iter().enumerate() {
                Self::insert_event(&mut *tx, &game.id, &player.player_id, idx as i64 + 1, event)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fetch a full game: header, roster, stored lines and ledger.
    ///
    /// All queries run in one read transaction, so a concurrent stat write is
    /// seen either entirely or not at all.
    pub async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM games WHERE id = ?", GAME_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(game_id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let game = match row {
            Some(row) => {
                let mut game = game_from_row(&row)?;
                Self::hydrate(&mut *tx, &mut game).await?;
                Some(game)
            }
            None => None,
        };
        tx.commit().await?;
        Ok(game)
    }

    /// All games, optionally filtered by status, ordered by game date.
    pub async fn list_games(&self, status: Option<GameStatus>) -> Result<Vec<Game>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM games WHERE status = ? ORDER BY game_date ASC, id ASC",
                    GAME_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .fetch_all(&mut *tx)
                    .await?
            }
            None => {
                let sql = format!("SELECT {} FROM games ORDER BY game_date ASC, id ASC", GAME_COLUMNS);
                sqlx::query(&sql).fetch_all(&mut *tx).await?
            }
        };

        let mut games = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut game = game_from_row(row)?;
            Self::hydrate(&mut *tx, &mut game).await?;
            games.push(game);
        }
        tx.commit().await?;
        Ok(games)
    }

    /// Every game whose roster includes `player_id`, in any status.
    pub async fn list_games_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {} FROM games
            WHERE id IN (SELECT game_id FROM player_game_stats WHERE player_id = ?)
            ORDER BY game_date ASC, id ASC
            "#,
            GAME_COLUMNS
        );
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(&sql)
            .bind(player_id.as_str())
            .fetch_all(&mut *tx)
            .await?;

        let mut games = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut game = game_from_row(row)?;
            Self::hydrate(&mut *tx, &mut game).await?;
            games.push(game);
        }
        tx.commit().await?;
        Ok(games)
    }

    /// Period format and live period for a game, without loading the ledger.
    pub async fn get_period_context(
        &self,
        game_id: &GameId,
    ) -> Result<Option<PeriodContext>, sqlx::Error> {
        let row = sqlx::query("SELECT period_type, current_period FROM games WHERE id = ?")
            .bind(game_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(PeriodContext {
            period_type: parse_period_type(&row.get::<String, _>("period_type"))?,
            current_period: row.get::<i32, _>("current_period"),
        }))
    }

    /// Apply a header patch. Returns false when the game does not exist.
    pub async fn update_game(&self, game_id: &GameId, patch: &GamePatch) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE games SET
                our_score = COALESCE(?, our_score),
                opponent_score = COALESCE(?, opponent_score),
                current_period = COALESCE(?, current_period),
                status = COALESCE(?, status),
                completed_at = CASE WHEN ? THEN ? ELSE completed_at END
            WHERE id = ?
            "#,
        )
        .bind(patch.our_score.map(i64::from))
        .bind(patch.opponent_score.map(i64::from))
        .bind(patch.current_period)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.completed_at.is_some())
        .bind(patch.completed_at.flatten().map(|t| t.to_rfc3339()))
        .bind(game_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn hydrate(conn: &mut SqliteConnection, game: &mut Game) -> Result<(), sqlx::Error> {
        let player_rows = sqlx::query(
            r#"
            SELECT * FROM player_game_stats
            WHERE game_id = ?
            ORDER BY roster_order ASC
            "#,
        )
        .bind(game.id.as_str())
        .fetch_all(&mut *conn)
        .await?;

        let shot_rows = sqlx::query(
            r#"
            SELECT player_id, x, y, shot_type, made, period FROM shots
            WHERE game_id = ?
            ORDER BY player_id ASC, seq ASC
            "#,
        )
        .bind(game.id.as_str())
        .fetch_all(&mut *conn)
        .await?;

        let event_rows = sqlx::query(
            r#"
            SELECT player_id, stat_type, value, period FROM stat_events
            WHERE game_id = ?
            ORDER BY player_id ASC, seq ASC
            "#,
        )
        .bind(game.id.as_str())
        .fetch_all(&mut *conn)
        .await?;

        let mut shots: HashMap<String, Vec<ShotAttempt>> = HashMap::new();
        for row in &shot_rows {
            let shot_type = row
                .get::<String, _>("shot_type")
                .parse::<ShotType>()
                .map_err(decode_msg)?;
            shots
                .entry(row.get::<String, _>("player_id"))
                .or_default()
                .push(ShotAttempt {
                    x: row.get::<f64, _>("x"),
                    y: row.get::<f64, _>("y"),
                    shot_type,
                    made: row.get::<i64, _>("made") != 0,
                    period: row.get::<i32, _>("period"),
                });
        }

        let mut events: HashMap<String, Vec<StatEvent>> = HashMap::new();
        for row in &event_rows {
            events
                .entry(row.get::<String, _>("player_id"))
                .or_default()
                .push(StatEvent {
                    stat_type: row.get::<String, _>("stat_type"),
                    value: row.get::<Option<i64>, _>("value"),
                    period: row.get::<i32, _>("period"),
                });
        }

        game.player_stats = player_rows
            .iter()
            .map(|row| {
                let player_id: String = row.get("player_id");
                PlayerGameStats {
                    player_name: row.get("player_name"),
                    number: row.get::<Option<i64>, _>("number").map(to_u32),
                    position: row.get("position"),
                    stats: stat_line_from_row(row),
                    shots: shots.remove(&player_id).unwrap_or_default(),
                    stat_events: events.remove(&player_id).unwrap_or_default(),
                    player_id: PlayerId::new(player_id),
                }
            })
            .collect();
        Ok(())
    }
}

fn parse_period_type(raw: &str) -> Result<PeriodType, sqlx::Error> {
    raw.parse::<PeriodType>().map_err(decode_msg)
}

fn game_from_row(row: &SqliteRow) -> Result<Game, sqlx::Error> {
    Ok(Game {
        id: GameId::new(row.get("id")),
        team_name: row.get("team_name"),
        opponent_name: row.get("opponent_name"),
        game_date: parse_time(&row.get::<String, _>("game_date"))?,
        location: row.get("location"),
        game_type: row.get("game_type"),
        period_type: parse_period_type(&row.get::<String, _>("period_type"))?,
        current_period: row.get("current_period"),
        status: row
            .get::<String, _>("status")
            .parse::<GameStatus>()
            .map_err(decode_msg)?,
        our_score: to_u32(row.get("our_score")),
        opponent_score: to_u32(row.get("opponent_score")),
        player_stats: Vec::new(),
        created_at: parse_time(&row.get::<String, _>("created_at"))?,
        completed_at: row
            .get::<Option<String>, _>("completed_at")
            .as_deref()
            .map(parse_time)
            .transpose()?,
    })
}

pub(super) fn stat_line_from_row(row: &SqliteRow) -> StatLine {
    StatLine {
        points: to_u32(row.get("points")),
        rebounds: to_u32(row.get("rebounds")),
        offensive_rebounds: to_u32(row.get("offensive_rebounds")),
        defensive_rebounds: to_u32(row.get("defensive_rebounds")),
        assists: to_u32(row.get("assists")),
        steals: to_u32(row.get("steals")),
        blocks: to_u32(row.get("blocks")),
        turnovers: to_u32(row.get("turnovers")),
        fouls: to_u32(row.get("fouls")),
        fg_made: to_u32(row.get("fg_made")),
        fg_attempted: to_u32(row.get("fg_attempted")),
        three_pt_made: to_u32(row.get("three_pt_made")),
        three_pt_attempted: to_u32(row.get("three_pt_attempted")),
        ft_made: to_u32(row.get("ft_made")),
        ft_attempted: to_u32(row.get("ft_attempted")),
        plus_minus: i32::try_from(row.get::<i64, _>("plus_minus")).unwrap_or_default(),
        minutes_played: to_u32(row.get("minutes_played")),
    }
}
