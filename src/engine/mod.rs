//! Pure computation engine(s) for period-scoped box scores.
//!
//! Everything here reads an immutable snapshot of a game and returns derived
//! values. The only mutating entry points (`adjust_stat`, `record_action`)
//! operate on a caller-owned value; persistence and serialization of those
//! calls live in `orchestration`.

pub mod adjust;
pub mod aggregate;
pub mod career;
pub mod compose;
pub mod court;
pub mod period;
pub mod recorder;

pub use adjust::{adjust_stat, AdjustError, AdjustableStat};
pub use aggregate::{aggregate_events, aggregate_shots, EventStatsResult, ShotStatsResult};
pub use career::{player_career_stats, season_stats, CareerStats, SeasonStats};
pub use compose::{
    compose_box_score, compose_player_period_stats, compose_player_period_stats_from_ledger,
    compose_team_period_stats, shooting_pct, BoxScore, PeriodStats, PlayerBoxLine,
    PlayerPeriodStats, TeamPeriodStats,
};
pub use court::{
    hit_test_markers, normalized_to_render_space, pointer_to_normalized, CourtHalf, CourtRect,
    NormalizedPoint, PointerSample, RenderPoint,
};
pub use period::{classify_period, filter_by_selector, resolve_period_membership, Periodic};
pub use recorder::{record_action, RecordError, RecordOutcome, ShotLocation};
