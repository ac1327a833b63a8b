//! Manual box-score corrections applied directly to the stored stat line.
//!
//! Adjustments bypass the ledger, so they only show up at `all` scope and
//! can never be attributed to a period.

use thiserror::Error;

use crate::domain::StatLine;

/// Stored fields a manual correction may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustableStat {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Fouls,
    /// Two-point make: made, attempted and 2 points move together.
    FgMade,
    /// Three-point make: 3pt and fg made/attempted and 3 points move together.
    ThreePtMade,
    /// Free throw make: made, attempted and 1 point move together.
    FtMade,
}

impl AdjustableStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustableStat::Points => "points",
            AdjustableStat::Rebounds => "rebounds",
            AdjustableStat::Assists => "assists",
            AdjustableStat::Steals => "steals",
            AdjustableStat::Blocks => "blocks",
            AdjustableStat::Turnovers => "turnovers",
            AdjustableStat::Fouls => "fouls",
            AdjustableStat::FgMade => "fg_made",
            AdjustableStat::ThreePtMade => "three_pt_made",
            AdjustableStat::FtMade => "ft_made",
        }
    }
}

impl std::str::FromStr for AdjustableStat {
    type Err = AdjustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(AdjustableStat::Points),
            "rebounds" => Ok(AdjustableStat::Rebounds),
            "assists" => Ok(AdjustableStat::Assists),
            "steals" => Ok(AdjustableStat::Steals),
            "blocks" => Ok(AdjustableStat::Blocks),
            "turnovers" => Ok(AdjustableStat::Turnovers),
            "fouls" => Ok(AdjustableStat::Fouls),
            "fg_made" => Ok(AdjustableStat::FgMade),
            "three_pt_made" => Ok(AdjustableStat::ThreePtMade),
            "ft_made" => Ok(AdjustableStat::FtMade),
            other => Err(AdjustError::UnknownStat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustError {
    #[error("Unknown adjustable stat: {0}")]
    UnknownStat(String),
    #[error("Adjustment delta must be +1 or -1, got {0}")]
    InvalidDelta(i32),
}

fn floor_add(value: u32, delta: i32) -> u32 {
    value.saturating_add_signed(delta)
}

/// Apply `delta` to one stored stat, flooring every touched field at zero.
///
/// `+1` then `-1` restores the prior line unless the floor was hit.
pub fn adjust_stat(line: &StatLine, stat: AdjustableStat, delta: i32) -> Result<StatLine, AdjustError> {
    if delta != 1 && delta != -1 {
        return Err(AdjustError::InvalidDelta(delta));
    }

    let mut next = *line;
    match stat {
        AdjustableStat::Points => next.points = floor_add(next.points, delta),
        AdjustableStat::Rebounds => next.rebounds = floor_add(next.rebounds, delta),
        AdjustableStat::Assists => next.assists = floor_add(next.assists, delta),
        AdjustableStat::Steals => next.steals = floor_add(next.steals, delta),
        AdjustableStat::Blocks => next.blocks = floor_add(next.blocks, delta),
        AdjustableStat::Turnovers => next.turnovers = floor_add(next.turnovers, delta),
        AdjustableStat::Fouls => next.fouls = floor_add(next.fouls, delta),
        AdjustableStat::FgMade => {
            next.fg_made = floor_add(next.fg_made, delta);
            next.fg_attempted = floor_add(next.fg_attempted, delta);
            next.points = floor_add(next.points, 2 * delta);
        }
        AdjustableStat::ThreePtMade => {
            next.three_pt_made = floor_add(next.three_pt_made, delta);
            next.three_pt_attempted = floor_add(next.three_pt_attempted, delta);
            next.fg_made = floor_add(next.fg_made, delta);
            next.fg_attempted = floor_add(next.fg_attempted, delta);
            next.points = floor_add(next.points, 3 * delta);
        }
        AdjustableStat::FtMade => {
            next.ft_made = floor_add(next.ft_made, delta);
            next.ft_attempted = floor_add(next.ft_attempted, delta);
            next.points = floor_add(next.points, delta);
        }
    }
    Ok(next)
}
