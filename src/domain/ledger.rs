//! Append-only ledger entries: shot attempts and generic stat events.

use serde::{Deserialize, Serialize};

/// Well-known `StatEvent::stat_type` keys.
pub mod stat_types {
    pub const OFFENSIVE_REBOUNDS: &str = "offensive_rebounds";
    pub const DEFENSIVE_REBOUNDS: &str = "defensive_rebounds";
    pub const ASSISTS: &str = "assists";
    pub const STEALS: &str = "steals";
    pub const BLOCKS: &str = "blocks";
    pub const TURNOVERS: &str = "turnovers";
    pub const FOULS: &str = "fouls";
    pub const FT_MADE: &str = "ft_made";
    pub const FT_ATTEMPTED: &str = "ft_attempted";
}

/// Field goal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "2pt")]
    TwoPoint,
    #[serde(rename = "3pt")]
    ThreePoint,
}

impl ShotType {
    /// Points awarded when a shot of this type is made.
    pub fn points(&self) -> u32 {
        match self {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::TwoPoint => "2pt",
            ShotType::ThreePoint => "3pt",
        }
    }
}

impl std::str::FromStr for ShotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2pt" => Ok(ShotType::TwoPoint),
            "3pt" => Ok(ShotType::ThreePoint),
            other => Err(format!("unknown shot type {}", other)),
        }
    }
}

/// A single field goal attempt.
///
/// `x`/`y` are normalized court-relative coordinates in `[0, 1]`, with `y`
/// increasing toward the far basket (`y = 0.5` is the half-court line).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotAttempt {
    pub x: f64,
    pub y: f64,
    pub shot_type: ShotType,
    pub made: bool,
    /// Raw period number (1..=4 for quarters, 1..=2 for halves).
    pub period: i32,
}

impl ShotAttempt {
    pub fn new(x: f64, y: f64, shot_type: ShotType, made: bool, period: i32) -> Self {
        Self {
            x,
            y,
            shot_type,
            made,
            period,
        }
    }
}

/// A non-shot stat occurrence (rebound, assist, free throw...).
///
/// `stat_type` is an open string key; the aggregator does not restrict it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEvent {
    pub stat_type: String,
    /// Units represented by this event; absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    pub period: i32,
}

impl StatEvent {
    /// Create a single-unit event.
    pub fn new(stat_type: impl Into<String>, period: i32) -> Self {
        Self {
            stat_type: stat_type.into(),
            value: None,
            period,
        }
    }

    /// Create an event carrying an explicit value.
    pub fn with_value(stat_type: impl Into<String>, value: i64, period: i32) -> Self {
        Self {
            stat_type: stat_type.into(),
            value: Some(value),
            period,
        }
    }

    /// Effective value of the event (defaults to 1).
    pub fn value(&self) -> i64 {
        self.value.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_type_wire_names() {
        assert_eq!(serde_json::to_string(&ShotType::ThreePoint).unwrap(), "\"3pt\"");
        let shot: ShotAttempt = serde_json::from_str(
            r#"{"x":0.25,"y":0.1,"shot_type":"2pt","made":true,"period":3}"#,
        )
        .unwrap();
        assert_eq!(shot.shot_type, ShotType::TwoPoint);
        assert_eq!(shot.period, 3);
    }

    #[test]
    fn test_event_value_defaults_to_one() {
        let event: StatEvent =
            serde_json::from_str(r#"{"stat_type":"assists","period":1}"#).unwrap();
        assert_eq!(event.value, None);
        assert_eq!(event.value(), 1);

        let event = StatEvent::with_value("fouls", 2, 2);
        assert_eq!(event.value(), 2);
    }

    #[test]
    fn test_event_without_value_omits_field() {
        let json = serde_json::to_string(&StatEvent::new("steals", 4)).unwrap();
        assert!(!json.contains("value"));
    }
}
