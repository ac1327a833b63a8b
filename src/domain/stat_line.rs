//! Stored cumulative stat line for one player in one game.

use serde::{Deserialize, Serialize};

/// Whole-game totals as persisted.
///
/// Authoritative at `all` scope. Mutated by the live recorder and by manual
/// adjustments, never by the aggregation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
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
    pub plus_minus: i32,
    pub minutes_played: u32,
}

impl StatLine {
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Sum two lines field by field, saturating at each field's bounds.
    pub fn combine(&self, other: &StatLine) -> StatLine {
        StatLine {
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
            plus_minus: self.plus_minus.saturating_add(other.plus_minus),
            minutes_played: self.minutes_played.saturating_add(other.minutes_played),
        }
    }
}
