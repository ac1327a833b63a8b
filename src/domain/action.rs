//! Live actions recorded from the bench during a game.
//!
//! This is the closed set of things a tracker can record. Each action is
//! turned into ledger entries by the recorder; the ledger itself keeps open
//! string keys.

use crate::domain::ShotType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveAction {
    Made2,
    Made3,
    Miss2,
    Miss3,
    FtMade,
    FtMissed,
    OffensiveRebound(u32),
    DefensiveRebound(u32),
    Assist(u32),
    Steal(u32),
    Block(u32),
    Turnover(u32),
    Foul(u32),
    Minutes(u32),
    PlusMinus(i32),
}

impl LiveAction {
    /// Parse a wire action name.
    ///
    /// Counting actions (rebounds, assists, steals, blocks, turnovers, fouls)
    /// read `value` as how many to record, defaulting to 1. `minutes` and
    /// `plus_minus` require a value. Shots and free throws are one attempt
    /// each and accept no value other than 1.
    pub fn parse(name: &str, value: Option<i64>) -> Result<Self, String> {
        let action = match name {
            "made_2" => single(name, value, LiveAction::Made2)?,
            "made_3" => single(name, value, LiveAction::Made3)?,
            "miss_2" => single(name, value, LiveAction::Miss2)?,
            "miss_3" => single(name, value, LiveAction::Miss3)?,
            "ft_made" => single(name, value, LiveAction::FtMade)?,
            "ft_missed" => single(name, value, LiveAction::FtMissed)?,
            "offensive_rebound" => LiveAction::OffensiveRebound(count(name, value)?),
            "defensive_rebound" => LiveAction::DefensiveRebound(count(name, value)?),
            "assist" => LiveAction::Assist(count(name, value)?),
            "steal" => LiveAction::Steal(count(name, value)?),
            "block" => LiveAction::Block(count(name, value)?),
            "turnover" => LiveAction::Turnover(count(name, value)?),
            "foul" => LiveAction::Foul(count(name, value)?),
            "minutes" => {
                let minutes = value.ok_or("minutes requires a value")?;
                let minutes = u32::try_from(minutes)
                    .map_err(|_| format!("minutes must be non-negative, got {}", minutes))?;
                LiveAction::Minutes(minutes)
            }
            "plus_minus" => {
                let delta = value.ok_or("plus_minus requires a value")?;
                let delta = i32::try_from(delta)
                    .map_err(|_| format!("plus_minus out of range: {}", delta))?;
                LiveAction::PlusMinus(delta)
            }
            other => return Err(format!("unknown action {}", other)),
        };
        Ok(action)
    }

    /// Shot type and outcome for field goal actions.
    pub fn field_goal(&self) -> Option<(ShotType, bool)> {
        match self {
            LiveAction::Made2 => Some((ShotType::TwoPoint, true)),
            LiveAction::Made3 => Some((ShotType::ThreePoint, true)),
            LiveAction::Miss2 => Some((ShotType::TwoPoint, false)),
            LiveAction::Miss3 => Some((ShotType::ThreePoint, false)),
            _ => None,
        }
    }
}

fn single(name: &str, value: Option<i64>, action: LiveAction) -> Result<LiveAction, String> {
    match value {
        None | Some(1) => Ok(action),
        Some(other) => Err(format!("{} records one attempt, got value {}", name, other)),
    }
}

fn count(name: &str, value: Option<i64>) -> Result<u32, String> {
    let Some(value) = value else {
        return Ok(1);
    };
    match u32::try_from(value) {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("{} value must be a positive count, got {}", name, value)),
    }
}
