//! Period formats (quarters vs halves) and the selectors used to scope stats.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a game is divided into periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Four periods numbered 1..=4.
    #[default]
    Quarters,
    /// Two periods numbered 1..=2.
    Halves,
}

impl PeriodType {
    /// Number of periods in a regulation game of this format.
    pub fn period_count(&self) -> i32 {
        match self {
            PeriodType::Quarters => 4,
            PeriodType::Halves => 2,
        }
    }

    /// True if `period` is a legal raw period number for this format.
    pub fn is_valid_period(&self, period: i32) -> bool {
        (1..=self.period_count()).contains(&period)
    }

    /// Selectors a stats screen offers for this format, `all` first.
    pub fn selectors(&self) -> &'static [PeriodSelector] {
        match self {
            PeriodType::Quarters => &[
                PeriodSelector::All,
                PeriodSelector::H1,
                PeriodSelector::H2,
                PeriodSelector::Q1,
                PeriodSelector::Q2,
                PeriodSelector::Q3,
                PeriodSelector::Q4,
            ],
            PeriodType::Halves => &[PeriodSelector::All, PeriodSelector::H1, PeriodSelector::H2],
        }
    }

    /// The selectors that partition `all` for this format.
    pub fn partition(&self) -> &'static [PeriodSelector] {
        match self {
            PeriodType::Quarters => &[
                PeriodSelector::Q1,
                PeriodSelector::Q2,
                PeriodSelector::Q3,
                PeriodSelector::Q4,
            ],
            PeriodType::Halves => &[PeriodSelector::H1, PeriodSelector::H2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Quarters => "quarters",
            PeriodType::Halves => "halves",
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarters" => Ok(PeriodType::Quarters),
            "halves" => Ok(PeriodType::Halves),
            other => Err(format!("must be quarters or halves, got {}", other)),
        }
    }
}

/// Logical bucket used to scope a box score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSelector {
    #[default]
    All,
    H1,
    H2,
    Q1,
    Q2,
    Q3,
    Q4,
}

impl PeriodSelector {
    /// Quarter selectors only make sense for quarter-format games.
    pub fn is_valid_for(&self, period_type: PeriodType) -> bool {
        match self {
            PeriodSelector::All | PeriodSelector::H1 | PeriodSelector::H2 => true,
            PeriodSelector::Q1 | PeriodSelector::Q2 | PeriodSelector::Q3 | PeriodSelector::Q4 => {
                period_type == PeriodType::Quarters
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodSelector::All => "all",
            PeriodSelector::H1 => "h1",
            PeriodSelector::H2 => "h2",
            PeriodSelector::Q1 => "q1",
            PeriodSelector::Q2 => "q2",
            PeriodSelector::Q3 => "q3",
            PeriodSelector::Q4 => "q4",
        }
    }
}

impl std::fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PeriodSelector::All),
            "h1" => Ok(PeriodSelector::H1),
            "h2" => Ok(PeriodSelector::H2),
            "q1" => Ok(PeriodSelector::Q1),
            "q2" => Ok(PeriodSelector::Q2),
            "q3" => Ok(PeriodSelector::Q3),
            "q4" => Ok(PeriodSelector::Q4),
            other => Err(format!("unknown period selector {}", other)),
        }
    }
}
