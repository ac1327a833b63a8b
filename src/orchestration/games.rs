//! Game lifecycle, live recording and read models built on the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::ViewBox;
use crate::db::{GamePatch, LedgerAppend, Repository};
use crate::domain::{
    Game, GameId, GameStatus, LiveAction, PeriodSelector, PeriodType, PlayerGameStats, PlayerId,
    ShotAttempt, ShotType, StatEvent, StatLine,
};
use crate::engine::{
    compose_box_score, filter_by_selector, normalized_to_render_space, player_career_stats,
    record_action, season_stats, BoxScore, CareerStats, CourtHalf, SeasonStats, ShotLocation,
};
use crate::orchestration::{missing_target, BoxScoreCache, OrchestrationError};

/// Roster entry supplied when a game is created.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub team_name: String,
    pub opponent_name: String,
    #[serde(default)]
    pub game_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub period_type: Option<PeriodType>,
    #[serde(default)]
    pub players: Vec<NewPlayer>,
}

/// Header fields a client may change on a live game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameUpdate {
    #[serde(default)]
    pub our_score: Option<u32>,
    #[serde(default)]
    pub opponent_score: Option<u32>,
    #[serde(default)]
    pub current_period: Option<i32>,
    #[serde(default)]
    pub status: Option<GameStatus>,
}

/// One live action for one player, recorded in the game's current period.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    pub player_id: PlayerId,
    pub action: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub location: Option<ShotLocation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordResult {
    pub player_id: PlayerId,
    pub period: i32,
    pub stats: StatLine,
    pub our_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotAttempt>,
    pub events: Vec<StatEvent>,
}

/// A recorded shot placed in render space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotMarker {
    pub player_id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub svg_x: f64,
    pub svg_y: f64,
    pub shot_type: ShotType,
    pub made: bool,
    pub period: i32,
    pub half: CourtHalf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotChart {
    pub game_id: GameId,
    pub period: PeriodSelector,
    pub view_box_width: f64,
    pub view_box_height: f64,
    pub markers: Vec<ShotMarker>,
}

pub struct GameService {
    repo: Arc<Repository>,
    cache: Arc<BoxScoreCache>,
    default_period_type: PeriodType,
    default_view_box: ViewBox,
}

impl GameService {
    pub fn new(
        repo: Arc<Repository>,
        cache: Arc<BoxScoreCache>,
        default_period_type: PeriodType,
        default_view_box: ViewBox,
    ) -> Self {
        Self {
            repo,
            cache,
            default_period_type,
            default_view_box,
        }
    }

    pub async fn create_game(&self, new_game: NewGame) -> Result<Game, OrchestrationError> {
        if new_game.team_name.trim().is_empty() || new_game.opponent_name.trim().is_empty() {
            return Err(OrchestrationError::InvalidRequest(
                "team_name and opponent_name are required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for player in &new_game.players {
            if !seen.insert(player.player_id.clone()) {
                return Err(OrchestrationError::InvalidRequest(format!(
                    "player {} appears twice on the roster",
                    player.player_id
                )));
            }
        }

        let mut game = Game::new(
            GameId::generate(),
            new_game.team_name,
            new_game.opponent_name,
            new_game.game_date.unwrap_or_else(Utc::now),
            new_game.period_type.unwrap_or(self.default_period_type),
        );
        game.location = new_game.location;
        game.game_type = new_game.game_type;
        game.player_stats = new_game
            .players
            .into_iter()
            .map(|p| {
                let mut entry = PlayerGameStats::new(p.player_id, p.player_name);
                entry.number = p.number;
                entry.position = p.position;
                entry
            })
            .collect();

        self.repo.insert_game(&game).await?;
        tracing::info!(
            game_id = %game.id,
            period_type = game.period_type.as_str(),
            players = game.player_stats.len(),
            "Created game"
        );
        Ok(game)
    }

    pub async fn get_game(&self, game_id: &GameId) -> Result<Game, OrchestrationError> {
        self.repo
            .get_game(game_id)
            .await?
            .ok_or_else(|| OrchestrationError::GameNotFound(game_id.clone()))
    }

    /// Apply a header update. Completing a game stamps `completed_at`;
    /// reopening it clears the stamp.
    pub async fn update_game(
        &self,
        game_id: &GameId,
        update: GameUpdate,
    ) -> Result<Game, OrchestrationError> {
        let current = self.get_game(game_id).await?;

        if let Some(period) = update.current_period {
            if !current.period_type.is_valid_period(period) {
                return Err(OrchestrationError::InvalidRequest(format!(
                    "period {} is not valid for a {} game",
                    period, current.period_type
                )));
            }
        }

        let completing = update.status == Some(GameStatus::Completed) && !current.is_completed();
        let reopening = update.status == Some(GameStatus::InProgress) && current.is_completed();
        let completed_at = if completing {
            Some(Some(Utc::now()))
        } else if reopening {
            Some(None)
        } else {
            None
        };
        let patch = GamePatch {
            our_score: update.our_score,
            opponent_score: update.opponent_score,
            current_period: update.current_period,
            status: update.status,
            completed_at,
        };
        if !self.repo.update_game(game_id, &patch).await? {
            return Err(OrchestrationError::GameNotFound(game_id.clone()));
        }
        self.cache.invalidate_game(game_id);
        if completing {
            tracing::info!(game_id = %game_id, "Game completed");
        } else if reopening {
            tracing::info!(game_id = %game_id, "Game reopened");
        }
        self.get_game(game_id).await
    }

    /// Record a live action in the game's current period, updating the stored
    /// line and appending the matching ledger entries in one transaction.
    pub async fn record(
        &self,
        game_id: &GameId,
        request: RecordRequest,
    ) -> Result<RecordResult, OrchestrationError> {
        let action = LiveAction::parse(&request.action, request.value)
            .map_err(OrchestrationError::InvalidRequest)?;
        let player_id = request.player_id;
        let location = request.location;
        let mut recorded = None;

        let update = self
            .repo
            .update_player_line(game_id, &player_id, |ctx, line| {
                let mut scratch = PlayerGameStats::new(player_id.clone(), String::new());
                scratch.stats = *line;
                let outcome = record_action(
                    &mut scratch,
                    ctx.period_type,
                    ctx.current_period,
                    action,
                    location.as_ref(),
                )?;
                recorded = Some((ctx.current_period, outcome.clone()));
                let append = LedgerAppend {
                    shots: outcome.shot.into_iter().collect(),
                    events: outcome.events,
                };
                Ok::<_, OrchestrationError>((scratch.stats, append))
            })
            .await?;

        let (Some(update), Some((period, outcome))) = (update, recorded) else {
            return Err(missing_target(&self.repo, game_id, &player_id).await);
        };
        self.cache.invalidate_game(game_id);

        Ok(RecordResult {
            player_id,
            period,
            stats: update.stats,
            our_score: update.our_score,
            shot: outcome.shot,
            events: outcome.events,
        })
    }

    /// Box score for `selector`, served from the cache until the game changes.
    pub async fn box_score(
        &self,
        game_id: &GameId,
        selector: PeriodSelector,
    ) -> Result<Arc<BoxScore>, OrchestrationError> {
        if let Some(hit) = self.cache.get(game_id, selector) {
            return Ok(hit);
        }
        let generation = self.cache.generation(game_id);
        let game = self.get_game(game_id).await?;
        let box_score = Arc::new(compose_box_score(&game, selector));
        self.cache.insert(game_id, selector, generation, box_score.clone());
        Ok(box_score)
    }

    /// Shot markers for `selector`, optionally for one player, scaled into
    /// `view_box` (or the configured default).
    pub async fn shot_chart(
        &self,
        game_id: &GameId,
        selector: PeriodSelector,
        player_id: Option<&PlayerId>,
        view_box: Option<ViewBox>,
    ) -> Result<ShotChart, OrchestrationError> {
        let game = self.get_game(game_id).await?;
        let view_box = view_box.unwrap_or(self.default_view_box);

        let players: Vec<&PlayerGameStats> = match player_id {
            Some(id) => vec![game.player(id).ok_or_else(|| {
                OrchestrationError::PlayerNotInGame {
                    game_id: game_id.clone(),
                    player_id: id.clone(),
                }
            })?],
            None => game.player_stats.iter().collect(),
        };

        let markers = players
            .into_iter()
            .flat_map(|player| {
                filter_by_selector(&player.shots, game.period_type, selector)
                    .into_iter()
                    .map(move |shot| {
                        let render =
                            normalized_to_render_space(shot.x, shot.y, view_box.width, view_box.height);
                        ShotMarker {
                            player_id: player.player_id.clone(),
                            x: shot.x,
                            y: shot.y,
                            svg_x: render.svg_x,
                            svg_y: render.svg_y,
                            shot_type: shot.shot_type,
                            made: shot.made,
                            period: shot.period,
                            half: CourtHalf::of(shot.y),
                        }
                    })
            })
            .collect();

        Ok(ShotChart {
            game_id: game.id.clone(),
            period: selector,
            view_box_width: view_box.width,
            view_box_height: view_box.height,
            markers,
        })
    }

    /// Career roll-up over the player's completed games.
    pub async fn player_stats(
        &self,
        player_id: &PlayerId,
    ) -> Result<Option<CareerStats>, OrchestrationError> {
        let games = self.repo.list_games_for_player(player_id).await?;
        Ok(player_career_stats(&games, player_id))
    }

    /// Season roll-up over every completed game.
    pub async fn season(&self) -> Result<SeasonStats, OrchestrationError> {
        let games = self.repo.list_games(Some(GameStatus::Completed)).await?;
        Ok(season_stats(&games))
    }
}
