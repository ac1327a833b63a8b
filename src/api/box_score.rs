use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{parse_selector, AppState};
use crate::domain::GameId;
use crate::engine::BoxScore;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct BoxScoreQuery {
    pub period: Option<String>,
}

/// Per-player and team lines for one period. A selector that does not exist
/// in the game's format (`q1` in a halves game) yields zeros, not an error.
pub async fn get_box_score(
    Path(id): Path<String>,
    Query(params): Query<BoxScoreQuery>,
    State(state): State<AppState>,
) -> Result<Json<BoxScore>, AppError> {
    let selector = parse_selector(params.period.as_deref())?;
    let box_score = state.games.box_score(&GameId::new(id), selector).await?;
    Ok(Json(box_score.as_ref().clone()))
}
