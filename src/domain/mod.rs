//! Canonical data types for the game-tracking ledger.
//!
//! This module provides:
//! - Identity primitives: GameId, PlayerId
//! - Period formats and selectors
//! - The append-only ledger entries: ShotAttempt, StatEvent
//! - The stored cumulative stat line and the game record that owns it
//! - The live actions that produce ledger entries

pub mod action;
pub mod game;
pub mod ledger;
pub mod period;
pub mod primitives;
pub mod stat_line;

pub use action::LiveAction;
pub use game::{Game, GameStatus, PlayerGameStats};
pub use ledger::{ShotAttempt, ShotType, StatEvent};
pub use period::{PeriodSelector, PeriodType};
pub use primitives::{GameId, PlayerId};
pub use stat_line::StatLine;
