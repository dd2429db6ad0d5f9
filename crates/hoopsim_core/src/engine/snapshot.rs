//! Checkpoint/restore for `GameState`.
//!
//! The whole aggregate serializes, including the RNG stream position, so a
//! restored state replays the remaining ticks byte-identically. Useful for
//! save/resume and for the round-trip determinism tests.

use super::state::GameState;
use crate::error::Result;

/// Serialize the full game state to JSON.
pub fn to_json(state: &GameState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Restore a game state previously produced by [`to_json`].
pub fn from_json(json: &str) -> Result<GameState> {
    Ok(serde_json::from_str(json)?)
}
