//! Play-by-play log writer. Every scoring or possession event appends one
//! entry stamped with the quarter, game clock, and running score.

use super::state::GameState;
use crate::models::{GameLogEntry, LogEventKind};

/// Game clock as "MM:SS" remaining in the quarter.
pub fn time_string(clock_seconds: f32) -> String {
    let total = clock_seconds.max(0.0).ceil() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn push(state: &mut GameState, kind: LogEventKind, text: String) {
    state.last_event = text.clone();
    state.log.push(GameLogEntry {
        quarter: state.quarter,
        time: time_string(state.clock_seconds),
        kind,
        text,
        score_home: state.score[0],
        score_away: state.score[1],
    });
}
