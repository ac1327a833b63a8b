//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - SQLite pragma configuration
//! - Repository layer for games, stored stat lines and the ledger

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::{GamePatch, LedgerAppend, PeriodContext, PlayerLineUpdate, Repository};
