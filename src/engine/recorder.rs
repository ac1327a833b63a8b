//! Live action recording: one bench action becomes stored-total increments
//! plus the matching ledger entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ledger::stat_types;
use crate::domain::{
    LiveAction, PeriodType, PlayerGameStats, ShotAttempt, ShotType, StatEvent, StatLine,
};
use crate::engine::court::{CourtRect, NormalizedPoint, PointerSample};

/// Where a field goal was taken, either already normalized or as a raw
/// pointer sample against the rendered court.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShotLocation {
    Normalized(NormalizedPoint),
    Pointer {
        pointer: PointerSample,
        court: CourtRect,
    },
}

impl ShotLocation {
    pub fn resolve(&self) -> NormalizedPoint {
        match self {
            ShotLocation::Normalized(point) => NormalizedPoint::clamped(point.x, point.y),
            ShotLocation::Pointer { pointer, court } => pointer.normalize(court),
        }
    }
}

/// Ledger entries appended by one recorded action.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordOutcome {
    pub shot: Option<ShotAttempt>,
    pub events: Vec<StatEvent>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Period {period} is not valid for a {period_type} game")]
    InvalidPeriod { period: i32, period_type: PeriodType },
    #[error("Field goal actions require a shot location")]
    MissingShotLocation,
    #[error("Recording this action would overflow {stat}")]
    StatOverflow { stat: &'static str },
}

/// Apply `action` to `player` during `period`.
///
/// Field goals append a `ShotAttempt`; free throws, rebounds and the other
/// counting stats append `StatEvent`s, one per ledger key carrying the
/// recorded count. Minutes and plus/minus only touch the stored line.
/// Nothing is mutated when an error is returned.
pub fn record_action(
    player: &mut PlayerGameStats,
    period_type: PeriodType,
    period: i32,
    action: LiveAction,
    location: Option<&ShotLocation>,
) -> Result<RecordOutcome, RecordError> {
    if !period_type.is_valid_period(period) {
        return Err(RecordError::InvalidPeriod {
            period,
            period_type,
        });
    }

    let mut next = player.stats;
    let mut outcome = RecordOutcome::default();
    if let Some((shot_type, made)) = action.field_goal() {
        let point = location.ok_or(RecordError::MissingShotLocation)?.resolve();
        let shot = ShotAttempt::new(point.x, point.y, shot_type, made, period);
        apply_shot(&mut next, &shot)?;
        player.stats = next;
        player.shots.push(shot);
        outcome.shot = Some(shot);
        return Ok(outcome);
    }

    let (keys, count) = apply_counting_action(&mut next, action)?;
    player.stats = next;
    for key in keys {
        let event = if count == 1 {
            StatEvent::new(*key, period)
        } else {
            StatEvent::with_value(*key, i64::from(count), period)
        };
        player.stat_events.push(event.clone());
        outcome.events.push(event);
    }
    Ok(outcome)
}

fn bump(field: &mut u32, by: u32, stat: &'static str) -> Result<(), RecordError> {
    *field = field
        .checked_add(by)
        .ok_or(RecordError::StatOverflow { stat })?;
    Ok(())
}

fn apply_shot(stats: &mut StatLine, shot: &ShotAttempt) -> Result<(), RecordError> {
    let is_three = shot.shot_type == ShotType::ThreePoint;
    bump(&mut stats.fg_attempted, 1, "fg_attempted")?;
    if is_three {
        bump(&mut stats.three_pt_attempted, 1, "three_pt_attempted")?;
    }
    if shot.made {
        bump(&mut stats.fg_made, 1, "fg_made")?;
        bump(&mut stats.points, shot.shot_type.points(), "points")?;
        if is_three {
            bump(&mut stats.three_pt_made, 1, "three_pt_made")?;
        }
    }
    Ok(())
}

type LedgerKeys = &'static [&'static str];

/// Bump the stored line for a non-shot action. Returns the ledger keys it
/// produces and the count each event carries.
fn apply_counting_action(
    stats: &mut StatLine,
    action: LiveAction,
) -> Result<(LedgerKeys, u32), RecordError> {
    let produced: (LedgerKeys, u32) = match action {
        LiveAction::FtMade => {
            bump(&mut stats.points, 1, "points")?;
            bump(&mut stats.ft_made, 1, "ft_made")?;
            bump(&mut stats.ft_attempted, 1, "ft_attempted")?;
            (&[stat_types::FT_MADE, stat_types::FT_ATTEMPTED], 1)
        }
        LiveAction::FtMissed => {
            bump(&mut stats.ft_attempted, 1, "ft_attempted")?;
            (&[stat_types::FT_ATTEMPTED], 1)
        }
        LiveAction::OffensiveRebound(n) => {
            bump(&mut stats.rebounds, n, "rebounds")?;
            bump(&mut stats.offensive_rebounds, n, "offensive_rebounds")?;
            (&[stat_types::OFFENSIVE_REBOUNDS], n)
        }
        LiveAction::DefensiveRebound(n) => {
            bump(&mut stats.rebounds, n, "rebounds")?;
            bump(&mut stats.defensive_rebounds, n, "defensive_rebounds")?;
            (&[stat_types::DEFENSIVE_REBOUNDS], n)
        }
        LiveAction::Assist(n) => {
            bump(&mut stats.assists, n, "assists")?;
            (&[stat_types::ASSISTS], n)
        }
        LiveAction::Steal(n) => {
            bump(&mut stats.steals, n, "steals")?;
            (&[stat_types::STEALS], n)
        }
        LiveAction::Block(n) => {
            bump(&mut stats.blocks, n, "blocks")?;
            (&[stat_types::BLOCKS], n)
        }
        LiveAction::Turnover(n) => {
            bump(&mut stats.turnovers, n, "turnovers")?;
            (&[stat_types::TURNOVERS], n)
        }
        LiveAction::Foul(n) => {
            bump(&mut stats.fouls, n, "fouls")?;
            (&[stat_types::FOULS], n)
        }
        LiveAction::Minutes(minutes) => {
            bump(&mut stats.minutes_played, minutes, "minutes_played")?;
            (&[], 0)
        }
        LiveAction::PlusMinus(delta) => {
            stats.plus_minus = stats
                .plus_minus
                .checked_add(delta)
                .ok_or(RecordError::StatOverflow { stat: "plus_minus" })?;
            (&[], 0)
        }
        // Field goals are recorded as shots by the caller.
        LiveAction::Made2 | LiveAction::Made3 | LiveAction::Miss2 | LiveAction::Miss3 => (&[], 0),
    };
    Ok(produced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeriodSelector, PlayerId};
    use crate::engine::compose::{
        compose_player_period_stats, compose_player_period_stats_from_ledger, PeriodStats,
    };

    fn player() -> PlayerGameStats {
        PlayerGameStats::new(PlayerId::new("p1".to_string()), "Dee".to_string())
    }

    fn at(x: f64, y: f64) -> ShotLocation {
        ShotLocation::Normalized(NormalizedPoint { x, y })
    }

    #[test]
    fn test_made_three_updates_line_and_ledger() {
        let mut p = player();
        let outcome = record_action(
            &mut p,
            PeriodType::Quarters,
            2,
            LiveAction::Made3,
            Some(&at(0.1, 0.2)),
        )
        .unwrap();

        let shot = outcome.shot.unwrap();
        assert_eq!(shot.shot_type, ShotType::ThreePoint);
        assert!(shot.made);
        assert_eq!(shot.period, 2);
        assert_eq!(p.shots.len(), 1);
        assert_eq!(p.stats.points, 3);
        assert_eq!(p.stats.fg_made, 1);
        assert_eq!(p.stats.three_pt_attempted, 1);
    }

    #[test]
    fn test_field_goal_requires_location() {
        let mut p = player();
        let err = record_action(&mut p, PeriodType::Halves, 1, LiveAction::Miss2, None);
        assert_eq!(err, Err(RecordError::MissingShotLocation));
        assert_eq!(p.stats, StatLine::zeroed());
        assert!(p.shots.is_empty());
    }

    #[test]
    fn test_invalid_period_rejected_without_mutation() {
        let mut p = player();
        let err = record_action(&mut p, PeriodType::Halves, 3, LiveAction::Assist(1), None);
        assert!(matches!(err, Err(RecordError::InvalidPeriod { period: 3, .. })));
        assert!(p.stat_events.is_empty());
    }

    #[test]
    fn test_pointer_location_is_normalized() {
        let mut p = player();
        let location = ShotLocation::Pointer {
            pointer: PointerSample::local(-10.0, 150.0),
            court: CourtRect {
                width: 300.0,
                height: 600.0,
                ..CourtRect::default()
            },
        };
        record_action(&mut p, PeriodType::Quarters, 1, LiveAction::Made2, Some(&location)).unwrap();
        assert_eq!(p.shots[0].x, 0.0);
        assert_eq!(p.shots[0].y, 0.25);
    }

    #[test]
    fn test_free_throw_make_emits_two_events() {
        let mut p = player();
        let outcome =
            record_action(&mut p, PeriodType::Quarters, 4, LiveAction::FtMade, None).unwrap();
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(p.stats.points, 1);
        assert_eq!(p.stats.ft_attempted, 1);
    }

    #[test]
    fn test_minutes_touch_only_stored_line() {
        let mut p = player();
        let outcome =
            record_action(&mut p, PeriodType::Quarters, 1, LiveAction::Minutes(8), None).unwrap();
        assert!(outcome.events.is_empty());
        assert_eq!(p.stats.minutes_played, 8);
        assert!(p.stat_events.is_empty());
    }

    #[test]
    fn test_recorded_ledger_matches_stored_totals() {
        let mut p = player();
        let q = PeriodType::Quarters;
        let loc = at(0.5, 0.9);
        record_action(&mut p, q, 1, LiveAction::Made2, Some(&loc)).unwrap();
        record_action(&mut p, q, 1, LiveAction::Miss3, Some(&loc)).unwrap();
        record_action(&mut p, q, 2, LiveAction::FtMade, None).unwrap();
        record_action(&mut p, q, 2, LiveAction::FtMissed, None).unwrap();
        record_action(&mut p, q, 3, LiveAction::OffensiveRebound(1), None).unwrap();
        record_action(&mut p, q, 3, LiveAction::DefensiveRebound(1), None).unwrap();
        record_action(&mut p, q, 4, LiveAction::Assist(1), None).unwrap();
        record_action(&mut p, q, 4, LiveAction::Steal(1), None).unwrap();
        record_action(&mut p, q, 4, LiveAction::Block(1), None).unwrap();
        record_action(&mut p, q, 4, LiveAction::Turnover(1), None).unwrap();
        record_action(&mut p, q, 4, LiveAction::Foul(1), None).unwrap();

        let stored = compose_player_period_stats(&p, q, PeriodSelector::All);
        let ledger = compose_player_period_stats_from_ledger(&p, q, PeriodSelector::All);
        assert_eq!(stored, ledger);
        assert_eq!(stored.points, 3);
        assert_eq!(stored.rebounds, 2);

        let partition = q
            .partition()
            .iter()
            .map(|s| compose_player_period_stats(&p, q, *s))
            .fold(PeriodStats::default(), |acc, line| acc.combine(&line));
        assert_eq!(partition, ledger);
    }

    #[test]
    fn test_counting_value_lands_in_line_and_ledger() {
        let mut p = player();
        let q = PeriodType::Quarters;
        let outcome = record_action(&mut p, q, 2, LiveAction::Assist(3), None).unwrap();
        assert_eq!(outcome.events, vec![StatEvent::with_value("assists", 3, 2)]);
        record_action(&mut p, q, 3, LiveAction::DefensiveRebound(2), None).unwrap();

        assert_eq!(p.stats.assists, 3);
        assert_eq!(p.stats.rebounds, 2);
        assert_eq!(p.stats.defensive_rebounds, 2);
        let stored = compose_player_period_stats(&p, q, PeriodSelector::All);
        let ledger = compose_player_period_stats_from_ledger(&p, q, PeriodSelector::All);
        assert_eq!(stored, ledger);
        assert_eq!(compose_player_period_stats(&p, q, PeriodSelector::Q2).assists, 3);
    }

    #[test]
    fn test_overflowing_value_is_rejected_without_mutation() {
        let mut p = player();
        let q = PeriodType::Quarters;
        record_action(&mut p, q, 1, LiveAction::Minutes(u32::MAX), None).unwrap();
        let err = record_action(&mut p, q, 1, LiveAction::Minutes(u32::MAX), None);
        assert_eq!(
            err,
            Err(RecordError::StatOverflow {
                stat: "minutes_played"
            })
        );
        assert_eq!(p.stats.minutes_played, u32::MAX);

        record_action(&mut p, q, 1, LiveAction::PlusMinus(i32::MIN), None).unwrap();
        let err = record_action(&mut p, q, 1, LiveAction::PlusMinus(-1), None);
        assert!(matches!(err, Err(RecordError::StatOverflow { stat: "plus_minus" })));
        assert_eq!(p.stats.plus_minus, i32::MIN);

        p.stats.assists = u32::MAX - 1;
        let err = record_action(&mut p, q, 1, LiveAction::Assist(2), None);
        assert!(err.is_err());
        assert_eq!(p.stats.assists, u32::MAX - 1);
        assert!(p.stat_events.is_empty());
    }
}
