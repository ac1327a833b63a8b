//! Multi-game roll-ups over stored stat lines: one player's career and the
//! whole season.
//!
//! Only completed games count.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{Game, GameId, PlayerId, StatLine};
use crate::engine::compose::{shooting_pct, PeriodStats, TeamPeriodStats};

/// Per-game averages and season shooting splits, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Averages {
    #[serde(with = "rust_decimal::serde::float")]
    pub ppg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rpg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub apg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub spg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bpg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fg_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub three_pt_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ft_pct: Decimal,
}

fn one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn ratio(numerator: u32, denominator: u32) -> Decimal {
    Decimal::from(numerator) / Decimal::from(denominator.max(1))
}

impl Averages {
    pub fn from_totals(totals: &StatLine, games_played: u32) -> Self {
        let hundred = Decimal::ONE_HUNDRED;
        Averages {
            ppg: one_decimal(ratio(totals.points, games_played)),
            rpg: one_decimal(ratio(totals.rebounds, games_played)),
            apg: one_decimal(ratio(totals.assists, games_played)),
            spg: one_decimal(ratio(totals.steals, games_played)),
            bpg: one_decimal(ratio(totals.blocks, games_played)),
            fg_pct: one_decimal(ratio(totals.fg_made, totals.fg_attempted) * hundred),
            three_pt_pct: one_decimal(
                ratio(totals.three_pt_made, totals.three_pt_attempted) * hundred,
            ),
            ft_pct: one_decimal(ratio(totals.ft_made, totals.ft_attempted) * hundred),
        }
    }
}

/// One completed game in a player's log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameLogEntry {
    pub game_id: GameId,
    pub date: DateTime<Utc>,
    pub opponent: String,
    pub stats: StatLine,
}

/// Career totals for `GET /api/players/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStats {
    pub player_id: PlayerId,
    pub player_name: String,
    pub games_played: u32,
    pub total_points: u32,
    pub total_rebounds: u32,
    pub total_assists: u32,
    pub total_steals: u32,
    pub total_blocks: u32,
    pub total_turnovers: u32,
    pub total_fouls: u32,
    pub total_fg_made: u32,
    pub total_fg_attempted: u32,
    #[serde(rename = "total_3pt_made")]
    pub total_three_pt_made: u32,
    #[serde(rename = "total_3pt_attempted")]
    pub total_three_pt_attempted: u32,
    pub total_ft_made: u32,
    pub total_ft_attempted: u32,
    pub total_minutes: u32,
    pub averages: Averages,
    pub game_history: Vec<GameLogEntry>,
}

fn completed_in_date_order(games: &[Game]) -> Vec<&Game> {
    let mut completed: Vec<&Game> = games.iter().filter(|g| g.is_completed()).collect();
    completed.sort_by(|a, b| {
        a.game_date
            .cmp(&b.game_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    completed
}

/// Roll up one player's completed games.
///
/// Returns `None` when the player is on no game's roster at all.
pub fn player_career_stats(games: &[Game], player_id: &PlayerId) -> Option<CareerStats> {
    let player_name = games
        .iter()
        .find_map(|g| g.player(player_id))
        .map(|p| p.player_name.clone())?;

    let mut totals = StatLine::zeroed();
    let mut game_history = Vec::new();
    for game in completed_in_date_order(games) {
        if let Some(player) = game.player(player_id) {
            totals = totals.combine(&player.stats);
            game_history.push(GameLogEntry {
                game_id: game.id.clone(),
                date: game.game_date,
                opponent: game.opponent_name.clone(),
                stats: player.stats,
            });
        }
    }

    let games_played = u32::try_from(game_history.len()).unwrap_or(u32::MAX);
    Some(CareerStats {
        player_id: player_id.clone(),
        player_name,
        games_played,
        total_points: totals.points,
        total_rebounds: totals.rebounds,
        total_assists: totals.assists,
        total_steals: totals.steals,
        total_blocks: totals.blocks,
        total_turnovers: totals.turnovers,
        total_fouls: totals.fouls,
        total_fg_made: totals.fg_made,
        total_fg_attempted: totals.fg_attempted,
        total_three_pt_made: totals.three_pt_made,
        total_three_pt_attempted: totals.three_pt_attempted,
        total_ft_made: totals.ft_made,
        total_ft_attempted: totals.ft_attempted,
        total_minutes: totals.minutes_played,
        averages: Averages::from_totals(&totals, games_played),
        game_history,
    })
}

/// One point on a player's season trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub game_id: GameId,
    pub date: DateTime<Utc>,
    pub opponent: String,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub fg_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonStats {
    pub player_id: PlayerId,
    pub player_name: String,
    pub games_played: u32,
    pub totals: StatLine,
    pub averages: Averages,
    pub trend_data: Vec<TrendPoint>,
}

/// Season roll-up for `GET /api/season-stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub team_totals: TeamPeriodStats,
    pub player_season_stats: Vec<PlayerSeasonStats>,
}

/// Roll up every completed game. Players are ordered by total points, then name.
pub fn season_stats(games: &[Game]) -> SeasonStats {
    let completed = completed_in_date_order(games);

    let mut season = SeasonStats {
        games_played: 0,
        wins: 0,
        losses: 0,
        ties: 0,
        points_for: 0,
        points_against: 0,
        team_totals: PeriodStats::default(),
        player_season_stats: Vec::new(),
    };
    let mut by_player: HashMap<PlayerId, PlayerSeasonStats> = HashMap::new();

    for game in completed {
        season.games_played += 1;
        season.points_for = season.points_for.saturating_add(game.our_score);
        season.points_against = season.points_against.saturating_add(game.opponent_score);
        match game.our_score.cmp(&game.opponent_score) {
            std::cmp::Ordering::Greater => season.wins += 1,
            std::cmp::Ordering::Less => season.losses += 1,
            std::cmp::Ordering::Equal => season.ties += 1,
        }

        for player in &game.player_stats {
            season.team_totals = season
                .team_totals
                .combine(&PeriodStats::from_stat_line(&player.stats));

            let entry = by_player
                .entry(player.player_id.clone())
                .or_insert_with(|| PlayerSeasonStats {
                    player_id: player.player_id.clone(),
                    player_name: player.player_name.clone(),
                    games_played: 0,
                    totals: StatLine::zeroed(),
                    averages: Averages::default(),
                    trend_data: Vec::new(),
                });
            entry.games_played += 1;
            entry.totals = entry.totals.combine(&player.stats);
            entry.trend_data.push(TrendPoint {
                game_id: game.id.clone(),
                date: game.game_date,
                opponent: game.opponent_name.clone(),
                points: player.stats.points,
                rebounds: player.stats.rebounds,
                assists: player.stats.assists,
                fg_pct: shooting_pct(player.stats.fg_made, player.stats.fg_attempted),
            });
        }
    }

    let mut players: Vec<PlayerSeasonStats> = by_player
        .into_values()
        .map(|mut p| {
            p.averages = Averages::from_totals(&p.totals, p.games_played);
            p
        })
        .collect();
    players.sort_by(|a, b| {
        b.totals
            .points
            .cmp(&a.totals.points)
            .then_with(|| a.player_name.cmp(&b.player_name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    season.player_season_stats = players;
    season
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameStatus, PeriodType, PlayerGameStats};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(points: u32, fg_made: u32, fg_attempted: u32) -> StatLine {
        StatLine {
            points,
            fg_made,
            fg_attempted,
            rebounds: 3,
            ..StatLine::default()
        }
    }

    fn game(
        id: &str,
        day: u32,
        status: GameStatus,
        score: (u32, u32),
        players: Vec<(&str, StatLine)>,
    ) -> Game {
        let date = Utc.with_ymd_and_hms(2026, 1, day, 18, 0, 0).unwrap();
        let mut game = Game::new(
            GameId::new(id.to_string()),
            "Falcons".to_string(),
            format!("Opp {}", id),
            date,
            PeriodType::Quarters,
        );
        game.current_period = 4;
        game.status = status;
        game.our_score = score.0;
        game.opponent_score = score.1;
        game.player_stats = players
            .into_iter()
            .map(|(pid, stats)| {
                let mut p = PlayerGameStats::new(PlayerId::new(pid.to_string()), pid.to_uppercase());
                p.stats = stats;
                p
            })
            .collect();
        game
    }

    #[test]
    fn test_career_counts_only_completed_games_in_date_order() {
        let games = vec![
            game("g2", 9, GameStatus::Completed, (50, 40), vec![("a", line(10, 4, 9))]),
            game("g1", 2, GameStatus::Completed, (30, 45), vec![("a", line(5, 2, 6))]),
            game("g3", 12, GameStatus::InProgress, (8, 2), vec![("a", line(8, 4, 4))]),
        ];
        let career = player_career_stats(&games, &PlayerId::new("a".to_string())).unwrap();

        assert_eq!(career.games_played, 2);
        assert_eq!(career.total_points, 15);
        assert_eq!(career.game_history.len(), 2);
        assert_eq!(career.game_history[0].game_id.as_str(), "g1");
        assert_eq!(career.averages.ppg, d("7.5"));
        assert_eq!(career.averages.rpg, d("3.0"));
        assert_eq!(career.averages.fg_pct, d("40.0"));
        assert_eq!(career.averages.ft_pct, Decimal::ZERO);
    }

    #[test]
    fn test_career_rounds_to_one_decimal() {
        let games = vec![
            game("g1", 1, GameStatus::Completed, (1, 0), vec![("a", line(1, 1, 3))]),
            game("g2", 2, GameStatus::Completed, (1, 0), vec![("a", line(0, 0, 0))]),
            game("g3", 3, GameStatus::Completed, (1, 0), vec![("a", line(0, 0, 0))]),
        ];
        let career = player_career_stats(&games, &PlayerId::new("a".to_string())).unwrap();
        assert_eq!(career.averages.ppg, d("0.3"));
        assert_eq!(career.averages.fg_pct, d("33.3"));
    }

    #[test]
    fn test_career_unknown_player_is_none() {
        let games = vec![game("g1", 1, GameStatus::Completed, (1, 0), vec![("a", line(1, 1, 1))])];
        assert!(player_career_stats(&games, &PlayerId::new("zz".to_string())).is_none());
    }

    #[test]
    fn test_career_player_with_only_live_games_has_zero_played() {
        let games = vec![game("g1", 1, GameStatus::InProgress, (1, 0), vec![("a", line(6, 3, 3))])];
        let career = player_career_stats(&games, &PlayerId::new("a".to_string())).unwrap();
        assert_eq!(career.games_played, 0);
        assert_eq!(career.averages.ppg, Decimal::ZERO);
    }

    #[test]
    fn test_season_record_and_team_totals() {
        let games = vec![
            game("g1", 1, GameStatus::Completed, (60, 50), vec![("a", line(20, 8, 15)), ("b", line(10, 5, 10))]),
            game("g2", 2, GameStatus::Completed, (40, 55), vec![("a", line(12, 6, 10))]),
            game("g3", 3, GameStatus::Completed, (44, 44), vec![("b", line(4, 2, 5))]),
            game("g4", 4, GameStatus::InProgress, (90, 0), vec![("b", line(90, 45, 45))]),
        ];
        let season = season_stats(&games);

        assert_eq!(season.games_played, 3);
        assert_eq!((season.wins, season.losses, season.ties), (1, 1, 1));
        assert_eq!(season.points_for, 144);
        assert_eq!(season.points_against, 149);
        assert_eq!(season.team_totals.points, 46);
        assert_eq!(season.team_totals.fg_made, 21);
        assert_eq!(season.team_totals.fg_attempted, 40);
        assert_eq!(season.team_totals.fg_pct, 53);

        assert_eq!(season.player_season_stats.len(), 2);
        let top = &season.player_season_stats[0];
        assert_eq!(top.player_id.as_str(), "a");
        assert_eq!(top.games_played, 2);
        assert_eq!(top.trend_data.len(), 2);
        assert_eq!(top.trend_data[1].points, 12);
        assert_eq!(top.trend_data[1].fg_pct, 60);
        assert_eq!(top.averages.ppg, d("16.0"));
    }

    #[test]
    fn test_empty_season() {
        let season = season_stats(&[]);
        assert_eq!(season.games_played, 0);
        assert!(season.player_season_stats.is_empty());
        assert_eq!(season.team_totals, PeriodStats::default());
    }

    #[test]
    fn test_season_sums_saturate_instead_of_wrapping() {
        let huge = StatLine {
            points: u32::MAX,
            minutes_played: u32::MAX,
            ..StatLine::default()
        };
        let games = vec![
            game("g1", 1, GameStatus::Completed, (u32::MAX, 1), vec![("a", huge)]),
            game("g2", 2, GameStatus::Completed, (u32::MAX, 1), vec![("a", huge)]),
        ];

        let season = season_stats(&games);
        assert_eq!(season.points_for, u32::MAX);
        assert_eq!(season.points_against, 2);
        assert_eq!(season.team_totals.points, u32::MAX);
        assert_eq!(season.player_season_stats[0].totals.minutes_played, u32::MAX);

        let career = player_career_stats(&games, &PlayerId::new("a".to_string())).unwrap();
        assert_eq!(career.total_points, u32::MAX);
        assert_eq!(career.total_minutes, u32::MAX);
    }
}
