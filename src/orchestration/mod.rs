//! Stateful coordination around the pure engine: persistence, the
//! per-(game, player) adjustment gate and the box-score cache.

pub mod adjuster;
pub mod cache;
pub mod games;

use thiserror::Error;

use crate::db::Repository;
use crate::domain::{GameId, PlayerId};
use crate::engine::{AdjustError, RecordError};

pub use adjuster::Adjuster;
pub use cache::BoxScoreCache;
pub use games::{
    GameService, GameUpdate, NewGame, NewPlayer, RecordRequest, RecordResult, ShotChart, ShotMarker,
};

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {player_id} is not in game {game_id}")]
    PlayerNotInGame { game_id: GameId, player_id: PlayerId },
    #[error("adjustment already in flight for player {player_id} in game {game_id}")]
    AdjustmentInFlight { game_id: GameId, player_id: PlayerId },
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Adjust(#[from] AdjustError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Tell apart an unknown game from a player missing from its roster after a
/// write found nothing to update.
pub(crate) async fn missing_target(
    repo: &Repository,
    game_id: &GameId,
    player_id: &PlayerId,
) -> OrchestrationError {
    match repo.get_period_context(game_id).await {
        Ok(Some(_)) => OrchestrationError::PlayerNotInGame {
            game_id: game_id.clone(),
            player_id: player_id.clone(),
        },
        Ok(None) => OrchestrationError::GameNotFound(game_id.clone()),
        Err(e) => e.into(),
    }
}
