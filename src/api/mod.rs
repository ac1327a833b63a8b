pub mod adjust;
pub mod box_score;
pub mod games;
pub mod health;
pub mod players;
pub mod season;
pub mod shot_chart;

use crate::config::Config;
use crate::db::Repository;
use crate::domain::PeriodSelector;
use crate::error::AppError;
use crate::orchestration::{Adjuster, BoxScoreCache, GameService};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub games: Arc<GameService>,
    pub adjuster: Arc<Adjuster>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        let cache = Arc::new(BoxScoreCache::new(config.box_score_cache_capacity));
        let games = Arc::new(GameService::new(
            repo.clone(),
            cache.clone(),
            config.default_period_type,
            config.shot_chart_view_box,
        ));
        let adjuster = Arc::new(Adjuster::new(repo.clone(), cache));
        Self {
            repo,
            config,
            games,
            adjuster,
        }
    }
}

/// Parse an optional `period` query value; absent or blank means `all`.
pub(crate) fn parse_selector(raw: Option<&str>) -> Result<PeriodSelector, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(PeriodSelector::All),
        Some(s) => s
            .parse()
            .map_err(|e: String| AppError::BadRequest(format!("Invalid period: {}", e))),
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/games", post(games::create_game))
        .route(
            "/api/games/:id",
            get(games::get_game).patch(games::update_game),
        )
        .route("/api/games/:id/stats", post(games::record_stat))
        .route(
            "/api/games/:id/players/:player_id/stats/adjust",
            post(adjust::adjust_player_stat),
        )
        .route("/api/games/:id/box-score", get(box_score::get_box_score))
        .route("/api/games/:id/shot-chart", get(shot_chart::get_shot_chart))
        .route("/api/players/:id/stats", get(players::get_player_stats))
        .route("/api/season-stats", get(season::get_season_stats))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!(parse_selector(None).unwrap(), PeriodSelector::All);
        assert_eq!(parse_selector(Some("  ")).unwrap(), PeriodSelector::All);
        assert_eq!(parse_selector(Some("Q3")).unwrap(), PeriodSelector::Q3);
        assert!(matches!(
            parse_selector(Some("q5")),
            Err(AppError::BadRequest(_))
        ));
    }
}
