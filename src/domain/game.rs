//! Game record and per-player game stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GameId, PeriodType, PlayerId, ShotAttempt, StatEvent, StatLine};

/// Lifecycle of a game record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(GameStatus::InProgress),
            "completed" => Ok(GameStatus::Completed),
            other => Err(format!("must be in_progress or completed, got {}", other)),
        }
    }
}

/// One player's participation in one game: stored totals plus the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameStats {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub stats: StatLine,
    #[serde(default)]
    pub shots: Vec<ShotAttempt>,
    #[serde(default)]
    pub stat_events: Vec<StatEvent>,
}

impl PlayerGameStats {
    /// Create a zeroed entry with an empty ledger.
    pub fn new(player_id: PlayerId, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            number: None,
            position: None,
            stats: StatLine::zeroed(),
            shots: Vec::new(),
            stat_events: Vec::new(),
        }
    }
}

/// A contest tracked by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub team_name: String,
    pub opponent_name: String,
    pub game_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    pub period_type: PeriodType,
    pub current_period: i32,
    pub status: GameStatus,
    pub our_score: u32,
    pub opponent_score: u32,
    pub player_stats: Vec<PlayerGameStats>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Game {
    /// A fresh in-progress game in period 1 with no roster.
    pub fn new(
        id: GameId,
        team_name: String,
        opponent_name: String,
        game_date: DateTime<Utc>,
        period_type: PeriodType,
    ) -> Self {
        Self {
            id,
            team_name,
            opponent_name,
            game_date,
            location: None,
            game_type: None,
            period_type,
            current_period: 1,
            status: GameStatus::InProgress,
            our_score: 0,
            opponent_score: 0,
            player_stats: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerGameStats> {
        self.player_stats.iter().find(|p| &p.player_id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &PlayerId) -> Option<&mut PlayerGameStats> {
        self.player_stats
            .iter_mut()
            .find(|p| &p.player_id == player_id)
    }

    /// Sum of every player's stored points.
    pub fn total_player_points(&self) -> u32 {
        self.player_stats
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.stats.points))
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}
