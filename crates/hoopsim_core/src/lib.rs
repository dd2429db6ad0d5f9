//! # hoopsim_core - Deterministic Basketball Game Simulation Engine
//!
//! This library provides a tick-driven spatial basketball simulation:
//! ten players and a ball on a scaled NBA court, advanced at 60 ticks per
//! simulated second by a host loop. From a seed and two rosters with
//! selected tactics it produces a complete four-quarter game with
//! per-player box scores and a play-by-play log.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same game)
//! - Fixed-timestep possession state machine with a scripted playbook,
//!   rule-driven defense, and a read-and-react decision engine
//! - JSON API for easy integration with front ends

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{simulate_game_json, GameRequest, GameResponse};
pub use error::{Result, SimError};

// Re-export the engine surface most callers need
pub use engine::{init_game_state, run_game, tick, GameResult, GameState, Team};

// Re-export roster and tactic types
pub use models::{
    DefenseTactic, GameLogEntry, LogEventKind, OffenseTactic, Player, PlayerBoxScore, Position,
    TeamRoster, TeamTotals,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
