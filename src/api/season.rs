use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::engine::SeasonStats;
use crate::error::AppError;

pub async fn get_season_stats(State(state): State<AppState>) -> Result<Json<SeasonStats>, AppError> {
    let season = state.games.season().await?;
    Ok(Json(season))
}
