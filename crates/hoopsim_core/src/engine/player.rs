//! On-court player entity: static roster data plus all per-tick dynamic
//! state (position, velocity, fatigue, transient action flags).

use serde::{Deserialize, Serialize};

use super::court::Slot;
use super::geometry::Vec2;
use crate::models::{Player, Team};

/// Stable identity of an on-court player: team plus roster index (0-4).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerId {
    pub team: Team,
    pub index: u8,
}

impl PlayerId {
    pub fn new(team: Team, index: u8) -> PlayerId {
        PlayerId { team, index }
    }

    /// Global index 0-9 (home 0-4, away 5-9).
    pub fn global(self) -> usize {
        self.team.index() * 5 + self.index as usize
    }

    pub fn from_global(global: usize) -> PlayerId {
        PlayerId { team: Team::from_index(global / 5), index: (global % 5) as u8 }
    }
}

/// Offensive role assigned per possession.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OffenseRole {
    BallHandler,
    Screener,
    Cutter,
    Spacer,
    PostUp,
}

/// One active on-court player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimPlayer {
    pub id: PlayerId,
    /// Static roster data; owned by value, created once at game start.
    pub player: Player,

    pub pos: Vec2,
    pub vel: Vec2,
    pub target_pos: Vec2,
    pub has_ball: bool,
    /// Accumulated fatigue in [0, 1]; scales max speed down by up to 30%.
    pub fatigue: f32,
    pub current_slot: Option<Slot>,
    pub current_role: Option<OffenseRole>,

    // Transient state flags, set by handlers each tick and cleared by the
    // orchestrator after movement.
    pub is_cutting: bool,
    pub is_screening: bool,
    pub is_defensive_sliding: bool,
    pub is_dribbling: bool,

    /// Seconds until the player can act after receiving a pass.
    pub catch_timer: f32,
    /// Continuous sprint seconds; gates sprint fatigue.
    pub sprint_timer: f32,
}

impl SimPlayer {
    pub fn new(id: PlayerId, player: Player, pos: Vec2) -> SimPlayer {
        SimPlayer {
            id,
            player,
            pos,
            vel: Vec2::ZERO,
            target_pos: pos,
            has_ball: false,
            fatigue: 0.0,
            current_slot: None,
            current_role: None,
            is_cutting: false,
            is_screening: false,
            is_defensive_sliding: false,
            is_dribbling: false,
            catch_timer: 0.0,
            sprint_timer: 0.0,
        }
    }

    /// Ready to act with the ball (catch animation finished).
    pub fn can_act(&self) -> bool {
        self.catch_timer <= 0.0
    }

    pub fn clear_transient_flags(&mut self) {
        self.is_cutting = false;
        self.is_screening = false;
        self.is_defensive_sliding = false;
        self.is_dribbling = false;
    }

    /// Reset per-possession assignment state.
    pub fn clear_possession_state(&mut self) {
        self.current_slot = None;
        self.current_role = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamRoster;

    #[test]
    fn test_global_index_roundtrip() {
        for global in 0..10 {
            let id = PlayerId::from_global(global);
            assert_eq!(id.global(), global);
        }
        assert_eq!(PlayerId::new(Team::Home, 0).global(), 0);
        assert_eq!(PlayerId::new(Team::Away, 0).global(), 5);
        assert_eq!(PlayerId::new(Team::Away, 4).global(), 9);
    }

    #[test]
    fn test_new_player_starts_inert() {
        let roster = TeamRoster::default_for(Team::Home);
        let p = SimPlayer::new(
            PlayerId::new(Team::Home, 0),
            roster.players[0].clone(),
            Vec2::new(10.0, 25.0),
        );
        assert!(!p.has_ball);
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.target_pos, p.pos);
        assert!(p.can_act());
    }
}
