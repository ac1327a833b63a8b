pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Game, GameId, GameStatus, LiveAction, PeriodSelector, PeriodType, PlayerGameStats, PlayerId,
    ShotAttempt, ShotType, StatEvent, StatLine,
};
pub use error::AppError;
