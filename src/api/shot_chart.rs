use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{parse_selector, AppState};
use crate::config::ViewBox;
use crate::domain::{GameId, PlayerId};
use crate::error::AppError;
use crate::orchestration::ShotChart;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotChartQuery {
    pub period: Option<String>,
    pub player_id: Option<String>,
    pub view_box_width: Option<f64>,
    pub view_box_height: Option<f64>,
}

fn parse_extent(name: &str, value: Option<f64>) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(AppError::BadRequest(format!(
            "{} must be a positive number",
            name
        ))),
        other => Ok(other),
    }
}

pub async fn get_shot_chart(
    Path(id): Path<String>,
    Query(params): Query<ShotChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<ShotChart>, AppError> {
    let selector = parse_selector(params.period.as_deref())?;
    let player_id = params
        .player_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| PlayerId::new(s.to_string()));

    let width = parse_extent("viewBoxWidth", params.view_box_width)?;
    let height = parse_extent("viewBoxHeight", params.view_box_height)?;
    let view_box = match (width, height) {
        (None, None) => None,
        (w, h) => {
            let default = state.config.shot_chart_view_box;
            Some(ViewBox {
                width: w.unwrap_or(default.width),
                height: h.unwrap_or(default.height),
            })
        }
    };

    let chart = state
        .games
        .shot_chart(&GameId::new(id), selector, player_id.as_ref(), view_box)
        .await?;
    Ok(Json(chart))
}
