//! Player and team box-score composition for a period selector.

use serde::{Deserialize, Serialize};

use crate::domain::ledger::stat_types;
use crate::domain::{Game, GameId, PeriodSelector, PeriodType, PlayerGameStats, PlayerId, StatLine};
use crate::engine::aggregate::{aggregate_events, aggregate_shots, EventStatsResult, ShotStatsResult};
use crate::engine::period::filter_by_selector;

/// Box-score line for one period scope.
///
/// Percentages are always derived from the made/attempted pairs held in the
/// same value; they are never summed or averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodStats {
    pub points: u32,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_pt_made: u32,
    pub three_pt_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub fg_pct: u32,
    pub three_pt_pct: u32,
    pub ft_pct: u32,
}

pub type PlayerPeriodStats = PeriodStats;
pub type TeamPeriodStats = PeriodStats;

impl PeriodStats {
    /// Stored whole-game totals, unchanged apart from derived percentages.
    pub fn from_stat_line(line: &StatLine) -> Self {
        PeriodStats {
            points: line.points,
            rebounds: line.rebounds,
            offensive_rebounds: line.offensive_rebounds,
            defensive_rebounds: line.defensive_rebounds,
            assists: line.assists,
            steals: line.steals,
            blocks: line.blocks,
            turnovers: line.turnovers,
            fouls: line.fouls,
            fg_made: line.fg_made,
            fg_attempted: line.fg_attempted,
            three_pt_made: line.three_pt_made,
            three_pt_attempted: line.three_pt_attempted,
            ft_made: line.ft_made,
            ft_attempted: line.ft_attempted,
            ..PeriodStats::default()
        }
        .with_percentages()
    }

    /// Merge shot-derived and event-derived totals into one line.
    ///
    /// Free throws are not shots, so their points come from the event log.
    pub fn from_aggregates(shots: &ShotStatsResult, events: &EventStatsResult) -> Self {
        let ft_made = events.count(stat_types::FT_MADE);
        let offensive_rebounds = events.count(stat_types::OFFENSIVE_REBOUNDS);
        let defensive_rebounds = events.count(stat_types::DEFENSIVE_REBOUNDS);
        PeriodStats {
            points: shots.points.saturating_add(ft_made),
            rebounds: offensive_rebounds.saturating_add(defensive_rebounds),
            offensive_rebounds,
            defensive_rebounds,
            assists: events.count(stat_types::ASSISTS),
            steals: events.count(stat_types::STEALS),
            blocks: events.count(stat_types::BLOCKS),
            turnovers: events.count(stat_types::TURNOVERS),
            fouls: events.count(stat_types::FOULS),
            fg_made: shots.fg_made,
            fg_attempted: shots.fg_attempted,
            three_pt_made: shots.three_pt_made,
            three_pt_attempted: shots.three_pt_attempted,
            ft_made,
            ft_attempted: events.count(stat_types::FT_ATTEMPTED),
            ..PeriodStats::default()
        }
        .with_percentages()
    }

    /// Sum counting fields and re-derive percentages from the summed pairs.
    pub fn combine(&self, other: &PeriodStats) -> PeriodStats {
        PeriodStats {
            points: self.points.saturating_add(other.points),
            rebounds: self.rebounds.saturating_add(other.rebounds),
            offensive_rebounds: self.offensive_rebounds.saturating_add(other.offensive_rebounds),
            defensive_rebounds: self.defensive_rebounds.saturating_add(other.defensive_rebounds),
            assists: self.assists.saturating_add(other.assists),
            steals: self.steals.saturating_add(other.steals),
            blocks: self.blocks.saturating_add(other.blocks),
            turnovers: self.turnovers.saturating_add(other.turnovers),
            fouls: self.fouls.saturating_add(other.fouls),
            fg_made: self.fg_made.saturating_add(other.fg_made),
            fg_attempted: self.fg_attempted.saturating_add(other.fg_attempted),
            three_pt_made: self.three_pt_made.saturating_add(other.three_pt_made),
            three_pt_attempted: self.three_pt_attempted.saturating_add(other.three_pt_attempted),
            ft_made: self.ft_made.saturating_add(other.ft_made),
            ft_attempted: self.ft_attempted.saturating_add(other.ft_attempted),
            ..PeriodStats::default()
        }
        .with_percentages()
    }

    fn with_percentages(mut self) -> Self {
        self.fg_pct = shooting_pct(self.fg_made, self.fg_attempted);
        self.three_pt_pct = shooting_pct(self.three_pt_made, self.three_pt_attempted);
        self.ft_pct = shooting_pct(self.ft_made, self.ft_attempted);
        self
    }
}

/// `made / attempted * 100` rounded half-up to an integer; 0 when nothing
/// was attempted.
pub fn shooting_pct(made: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        return 0;
    }
    let made = u64::from(made);
    let attempted = u64::from(attempted);
    let pct = (made * 200 + attempted) / (attempted * 2);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

/// One player's line for `selector`.
///
/// `all` returns the stored cumulative totals (fast path); every other
/// selector is recomputed from the ledger.
pub fn compose_player_period_stats(
    player: &PlayerGameStats,
    period_type: PeriodType,
    selector: PeriodSelector,
) -> PlayerPeriodStats {
    if selector == PeriodSelector::All {
        return PeriodStats::from_stat_line(&player.stats);
    }
    compose_player_period_stats_from_ledger(player, period_type, selector)
}

/// One player's line for `selector`, always recomputed from the ledger.
pub fn compose_player_period_stats_from_ledger(
    player: &PlayerGameStats,
    period_type: PeriodType,
    selector: PeriodSelector,
) -> PlayerPeriodStats {
    let shots = aggregate_shots(filter_by_selector(&player.shots, period_type, selector));
    let events = aggregate_events(filter_by_selector(
        &player.stat_events,
        period_type,
        selector,
    ));
    PeriodStats::from_aggregates(&shots, &events)
}

/// Team totals for `selector`: every player's composed line, summed.
pub fn compose_team_period_stats(
    players: &[PlayerGameStats],
    period_type: PeriodType,
    selector: PeriodSelector,
) -> TeamPeriodStats {
    players
        .iter()
        .map(|player| compose_player_period_stats(player, period_type, selector))
        .fold(PeriodStats::default(), |acc, line| acc.combine(&line))
}

/// One roster row of a box score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBoxLine {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub stats: PlayerPeriodStats,
}

/// Every player's line plus the team totals for one selector of one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxScore {
    pub game_id: GameId,
    pub period: PeriodSelector,
    pub period_type: PeriodType,
    pub players: Vec<PlayerBoxLine>,
    pub team: TeamPeriodStats,
}

/// Compose the full box score of `game` for `selector`, roster order preserved.
pub fn compose_box_score(game: &Game, selector: PeriodSelector) -> BoxScore {
    let players = game
        .player_stats
        .iter()
        .map(|player| PlayerBoxLine {
            player_id: player.player_id.clone(),
            player_name: player.player_name.clone(),
            number: player.number,
            stats: compose_player_period_stats(player, game.period_type, selector),
        })
        .collect::<Vec<_>>();
    let team = players
        .iter()
        .fold(PeriodStats::default(), |acc, line| acc.combine(&line.stats));

    BoxScore {
        game_id: game.id.clone(),
        period: selector,
        period_type: game.period_type,
        players,
        team,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerId, ShotAttempt, ShotType, StatEvent};

    fn player(id: &str) -> PlayerGameStats {
        PlayerGameStats::new(PlayerId::new(id.to_string()), id.to_uppercase())
    }

    fn shooter(id: &str, made: u32, attempted: u32) -> PlayerGameStats {
        let mut p = player(id);
        for i in 0..attempted {
            p.shots
                .push(ShotAttempt::new(0.5, 0.1, ShotType::TwoPoint, i < made, 1));
        }
        p
    }

    #[test]
    fn test_shooting_pct() {
        assert_eq!(shooting_pct(7, 10), 70);
        assert_eq!(shooting_pct(0, 0), 0);
        assert_eq!(shooting_pct(5, 0), 0);
        assert_eq!(shooting_pct(1, 3), 33);
        assert_eq!(shooting_pct(2, 3), 67);
        assert_eq!(shooting_pct(1, 8), 13);
        assert_eq!(shooting_pct(4, 4), 100);
    }

    #[test]
    fn test_all_selector_returns_stored_totals() {
        let mut p = shooter("a", 1, 2);
        p.stats.points = 21;
        p.stats.fg_made = 8;
        p.stats.fg_attempted = 16;

        let line = compose_player_period_stats(&p, PeriodType::Quarters, PeriodSelector::All);
        assert_eq!(line.points, 21);
        assert_eq!(line.fg_made, 8);
        assert_eq!(line.fg_pct, 50);

        let ledger =
            compose_player_period_stats_from_ledger(&p, PeriodType::Quarters, PeriodSelector::All);
        assert_eq!(ledger.points, 2);
        assert_eq!(ledger.fg_attempted, 2);
    }

    #[test]
    fn test_free_throws_and_rebounds_come_from_events() {
        let mut p = player("a");
        p.shots
            .push(ShotAttempt::new(0.5, 0.9, ShotType::TwoPoint, true, 2));
        p.stat_events.push(StatEvent::new(stat_types::FT_MADE, 2));
        p.stat_events.push(StatEvent::new(stat_types::FT_ATTEMPTED, 2));
        p.stat_events.push(StatEvent::new(stat_types::FT_ATTEMPTED, 2));
        p.stat_events
            .push(StatEvent::new(stat_types::OFFENSIVE_REBOUNDS, 2));
        p.stat_events
            .push(StatEvent::with_value(stat_types::DEFENSIVE_REBOUNDS, 2, 1));

        let line = compose_player_period_stats(&p, PeriodType::Quarters, PeriodSelector::H1);
        assert_eq!(line.points, 3);
        assert_eq!(line.ft_made, 1);
        assert_eq!(line.ft_attempted, 2);
        assert_eq!(line.ft_pct, 50);
        assert_eq!(line.rebounds, 3);
        assert_eq!(line.offensive_rebounds, 1);
        assert_eq!(line.defensive_rebounds, 2);
        assert_eq!(line.assists, 0);
    }

    #[test]
    fn test_invalid_selector_for_format_yields_zeros() {
        let p = shooter("a", 3, 4);
        let line = compose_player_period_stats(&p, PeriodType::Halves, PeriodSelector::Q1);
        assert_eq!(line, PeriodStats::default());
    }

    #[test]
    fn test_team_pct_uses_summed_attempts() {
        let players = vec![shooter("a", 3, 5), shooter("b", 4, 10)];
        let team = compose_team_period_stats(&players, PeriodType::Quarters, PeriodSelector::Q1);
        assert_eq!(team.fg_made, 7);
        assert_eq!(team.fg_attempted, 15);
        assert_eq!(team.fg_pct, 47);
        assert_ne!(team.fg_pct, 50);
    }

    #[test]
    fn test_team_rebounds_not_double_counted() {
        let mut a = player("a");
        a.stat_events
            .push(StatEvent::new(stat_types::OFFENSIVE_REBOUNDS, 1));
        let mut b = player("b");
        b.stat_events
            .push(StatEvent::new(stat_types::DEFENSIVE_REBOUNDS, 1));
        b.stat_events
            .push(StatEvent::new(stat_types::DEFENSIVE_REBOUNDS, 1));

        let team =
            compose_team_period_stats(&[a, b], PeriodType::Halves, PeriodSelector::H1);
        assert_eq!(team.rebounds, 3);
        assert_eq!(team.offensive_rebounds, 1);
        assert_eq!(team.defensive_rebounds, 2);
    }

    #[test]
    fn test_team_of_nobody_is_zero() {
        let team = compose_team_period_stats(&[], PeriodType::Quarters, PeriodSelector::All);
        assert_eq!(team, PeriodStats::default());
    }

    #[test]
    fn test_box_score_team_matches_team_composer() {
        let mut game = Game::new(
            GameId::new("g".to_string()),
            "Us".to_string(),
            "Them".to_string(),
            chrono::Utc::now(),
            PeriodType::Quarters,
        );
        let mut a = shooter("a", 2, 3);
        a.number = Some(4);
        game.player_stats = vec![a, shooter("b", 1, 4)];

        let box_score = compose_box_score(&game, PeriodSelector::Q1);
        assert_eq!(box_score.players.len(), 2);
        assert_eq!(box_score.players[0].number, Some(4));
        assert_eq!(box_score.players[1].stats.fg_made, 1);
        assert_eq!(
            box_score.team,
            compose_team_period_stats(&game.player_stats, PeriodType::Quarters, PeriodSelector::Q1)
        );
        assert_eq!(box_score.team.fg_pct, 43);
    }
}
