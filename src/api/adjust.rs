use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{GameId, PlayerId, StatLine};
use crate::engine::AdjustableStat;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub stat_type: String,
    pub delta: i32,
}

#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub stat_type: String,
    pub stats: StatLine,
    pub our_score: u32,
}

/// Manual +/-1 correction to a player's stored line.
///
/// Returns 409 while another adjustment for the same player and game is in
/// flight. Clients should re-fetch the game after success.
pub async fn adjust_player_stat(
    Path((id, player_id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(body): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, AppError> {
    let stat: AdjustableStat = body.stat_type.trim().parse()?;
    let game_id = GameId::new(id);
    let player_id = PlayerId::new(player_id);

    let update = state
        .adjuster
        .adjust(&game_id, &player_id, stat, body.delta)
        .await?;

    Ok(Json(AdjustResponse {
        game_id,
        player_id,
        stat_type: stat.as_str().to_string(),
        stats: update.stats,
        our_score: update.our_score,
    }))
}
