use axum::extract::{Path, State};
use axum::Json;

use crate::api::AppState;
use crate::domain::PlayerId;
use crate::engine::CareerStats;
use crate::error::AppError;

pub async fn get_player_stats(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CareerStats>, AppError> {
    let player_id = PlayerId::new(id);
    state
        .games
        .player_stats(&player_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("player {}", player_id)))
}
