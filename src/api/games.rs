use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::AppState;
use crate::domain::{Game, GameId};
use crate::error::AppError;
use crate::orchestration::{GameUpdate, NewGame, RecordRequest, RecordResult};

pub async fn create_game(
    State(state): State<AppState>,
    Json(body): Json<NewGame>,
) -> Result<(StatusCode, Json<Game>), AppError> {
    let game = state.games.create_game(body).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn get_game(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Game>, AppError> {
    let game = state.games.get_game(&GameId::new(id)).await?;
    Ok(Json(game))
}

pub async fn update_game(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<GameUpdate>,
) -> Result<Json<Game>, AppError> {
    let game = state.games.update_game(&GameId::new(id), body).await?;
    Ok(Json(game))
}

pub async fn record_stat(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<RecordRequest>,
) -> Result<Json<RecordResult>, AppError> {
    let result = state.games.record(&GameId::new(id), body).await?;
    Ok(Json(result))
}
