//! Reducers over the ledger: shot attempts and generic stat events.
//!
//! Both reducers are plain sums, so partial results over disjoint slices of a
//! log can be merged with `combine` in any order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{ShotAttempt, ShotType, StatEvent};

/// Field goal totals over a set of shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotStatsResult {
    pub points: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_pt_made: u32,
    pub three_pt_attempted: u32,
}

impl ShotStatsResult {
    pub fn combine(&self, other: &ShotStatsResult) -> ShotStatsResult {
        ShotStatsResult {
            points: self.points.saturating_add(other.points),
            fg_made: self.fg_made.saturating_add(other.fg_made),
            fg_attempted: self.fg_attempted.saturating_add(other.fg_attempted),
            three_pt_made: self.three_pt_made.saturating_add(other.three_pt_made),
            three_pt_attempted: self.three_pt_attempted.saturating_add(other.three_pt_attempted),
        }
    }
}

/// Per-`stat_type` totals over a set of events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStatsResult(pub BTreeMap<String, i64>);

impl EventStatsResult {
    /// Raw total for a key (0 if absent).
    pub fn get(&self, stat_type: &str) -> i64 {
        self.0.get(stat_type).copied().unwrap_or(0)
    }

    /// Total for a key as a box-score count. Negative totals read as 0.
    pub fn count(&self, stat_type: &str) -> u32 {
        u32::try_from(self.get(stat_type).max(0)).unwrap_or(u32::MAX)
    }

    pub fn combine(&self, other: &EventStatsResult) -> EventStatsResult {
        let mut totals = self.0.clone();
        for (stat_type, value) in &other.0 {
            let total = totals.entry(stat_type.clone()).or_insert(0);
            *total = total.saturating_add(*value);
        }
        EventStatsResult(totals)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sum made/attempted counts and points over `shots`.
pub fn aggregate_shots<'a, I>(shots: I) -> ShotStatsResult
where
    I: IntoIterator<Item = &'a ShotAttempt>,
{
    let mut result = ShotStatsResult::default();
    for shot in shots {
        result.fg_attempted = result.fg_attempted.saturating_add(1);
        let is_three = shot.shot_type == ShotType::ThreePoint;
        if is_three {
            result.three_pt_attempted = result.three_pt_attempted.saturating_add(1);
        }
        if shot.made {
            result.fg_made = result.fg_made.saturating_add(1);
            result.points = result.points.saturating_add(shot.shot_type.points());
            if is_three {
                result.three_pt_made = result.three_pt_made.saturating_add(1);
            }
        }
    }
    result
}

/// Sum event values per `stat_type`. Unknown keys are kept as-is.
pub fn aggregate_events<'a, I>(events: I) -> EventStatsResult
where
    I: IntoIterator<Item = &'a StatEvent>,
{
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for event in events {
        let total = totals.entry(event.stat_type.clone()).or_insert(0);
        *total = total.saturating_add(event.value());
    }
    EventStatsResult(totals)
}
