//! Possession state machine.
//!
//! Phases advance a possession from the opening jump ball through inbound,
//! backcourt advance, half-court setup, the main action loop, shot flight,
//! rebounding, and free throws. The orchestrator dispatches to the current
//! phase handler once per tick; handlers set player targets and may launch
//! the ball or transition the phase.
//!
//! | Phase     | Handler       | Leaves via |
//! |-----------|---------------|------------|
//! | JumpBall  | `jumpball`    | tip win -> Advance |
//! | Inbound   | `inbound`     | inbound pass -> Advance |
//! | Advance   | `advance`     | half-court cross -> Setup / Action (fast break) |
//! | Setup     | `setup`       | slots reached -> Action |
//! | Action    | `action`      | shot -> Shooting, turnover -> Inbound |
//! | Shooting  | ball flight   | make -> Inbound, miss -> Rebound, foul -> FreeThrow |
//! | Rebound   | `rebound`     | board -> Advance (def) / Setup (off) |
//! | FreeThrow | `freethrow`   | last FT -> Inbound / Rebound |

pub mod action;
pub mod advance;
pub mod freethrow;
pub mod inbound;
pub mod jumpball;
pub mod rebound;
pub mod setup;

use serde::{Deserialize, Serialize};

use super::state::GameState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    JumpBall,
    Inbound,
    Advance,
    Setup,
    Action,
    Shooting,
    Rebound,
    FreeThrow,
}

impl Phase {
    /// Phases where the offense runs its scheme and the defense matches up.
    pub fn is_halfcourt(self) -> bool {
        matches!(self, Phase::Setup | Phase::Action)
    }
}

/// Urgency band derived from the shot clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PossessionStage {
    #[default]
    Early,
    Mid,
    Late,
    Desperation,
}

impl PossessionStage {
    pub fn from_shot_clock(shot_clock: f32) -> PossessionStage {
        if shot_clock > 18.0 {
            PossessionStage::Early
        } else if shot_clock > 10.0 {
            PossessionStage::Mid
        } else if shot_clock > 4.0 {
            PossessionStage::Late
        } else {
            PossessionStage::Desperation
        }
    }
}

/// Run the current phase handler for this tick.
pub fn dispatch(state: &mut GameState) {
    match state.phase {
        Phase::JumpBall => jumpball::run(state),
        Phase::Inbound => inbound::run(state),
        Phase::Advance => advance::run(state),
        Phase::Setup => setup::run(state),
        Phase::Action => action::run(state),
        // Shot flight is advanced by the orchestrator before dispatch; the
        // phase itself has no per-tick work beyond player movement.
        Phase::Shooting => {}
        Phase::Rebound => rebound::run(state),
        Phase::FreeThrow => freethrow::run(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possession_stage_bands() {
        assert_eq!(PossessionStage::from_shot_clock(24.0), PossessionStage::Early);
        assert_eq!(PossessionStage::from_shot_clock(18.0), PossessionStage::Mid);
        assert_eq!(PossessionStage::from_shot_clock(10.0), PossessionStage::Late);
        assert_eq!(PossessionStage::from_shot_clock(4.0), PossessionStage::Desperation);
        assert_eq!(PossessionStage::from_shot_clock(0.0), PossessionStage::Desperation);
    }

    #[test]
    fn test_halfcourt_phases() {
        assert!(Phase::Setup.is_halfcourt());
        assert!(Phase::Action.is_halfcourt());
        assert!(!Phase::JumpBall.is_halfcourt());
        assert!(!Phase::Rebound.is_halfcourt());
    }
}
