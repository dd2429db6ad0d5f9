//! `GameState`: the aggregate root owning players, ball, clocks, tactics,
//! the seeded RNG, and all possession-scoped tables.
//!
//! All mutation flows through one `&mut GameState`; the engine has no
//! global state. `init_game_state` is the only constructor surface.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::court::{self, Slot, SLOT_COUNT};
use super::geometry::Vec2;
use super::phase::{Phase, PossessionStage};
use super::playbook::PlayId;
use super::player::{OffenseRole, PlayerId, SimPlayer};
use super::rng::SimRng;
use crate::models::{GameLogEntry, PlayerBoxScore, Team, TeamRoster, TeamTactics};

pub const QUARTER_SECONDS: f32 = 720.0;
pub const QUARTERS: u8 = 4;
pub const SHOT_CLOCK_FULL: f32 = 24.0;
pub const SHOT_CLOCK_OFFENSIVE_RESET: f32 = 14.0;
/// Backcourt advance limit in seconds.
pub const ADVANCE_LIMIT: f32 = 8.0;

/// Pending free-throw sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreeThrowState {
    pub shooter: PlayerId,
    pub total: u8,
    pub taken: u8,
    pub last_made: bool,
    /// Seconds until the next attempt.
    pub timer: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// Ten players: home 0-4, away 5-9 (global index = `PlayerId::global`).
    pub players: Vec<SimPlayer>,
    pub ball: Ball,
    pub score: [u32; 2],
    pub quarter: u8,
    /// Seconds remaining in the quarter.
    pub clock_seconds: f32,
    pub shot_clock: f32,
    pub possession: Team,
    pub phase: Phase,
    pub phase_ticks: u32,
    /// Seconds of game time simulated since the opening tick.
    pub game_time: f32,
    pub game_started: bool,
    pub game_over: bool,
    pub tactics: [TeamTactics; 2],
    pub team_names: [String; 2],
    pub rng: SimRng,
    pub last_event: String,

    // ===== Possession-scoped state =====
    pub slots: [Option<PlayerId>; SLOT_COUNT],
    pub roles: [Option<OffenseRole>; 10],
    /// Man assignments: defending-team roster index -> offensive roster index.
    pub def_assignments: [Option<u8>; 5],
    pub current_play: Option<PlayId>,
    pub current_step: usize,
    pub step_timer: f32,
    /// Per-player lateral jitter in [-1, 1], redrawn at each play-step
    /// entry so screen/roll/drive offsets stay fixed within a step.
    pub step_jitters: [f32; 10],
    pub last_pass_from: Option<PlayerId>,
    /// Game time when the last pass completed.
    pub last_pass_time: f32,
    /// Seconds the current handler has held/dribbled the ball.
    pub dribble_time: f32,
    pub crossed_half_court: bool,
    pub advance_clock: f32,
    pub possession_stage: PossessionStage,
    pub free_throws: Option<FreeThrowState>,
    /// A player currently calling for the ball gets extra pass weight.
    pub call_for_ball: Option<PlayerId>,

    // ===== Accumulated output =====
    pub box_scores: Vec<PlayerBoxScore>,
    pub log: Vec<GameLogEntry>,
}

/// Construct the starting state: starters arranged around the center
/// circle, ball at center, phase `JumpBall`, default tactics (motion/man).
pub fn init_game_state(seed: u32) -> GameState {
    init_game_state_with(
        seed,
        TeamRoster::default_for(Team::Home),
        TeamRoster::default_for(Team::Away),
        TeamTactics::default(),
        TeamTactics::default(),
    )
}

/// Full-control constructor used by the JSON API and tests. Rosters must
/// already be validated.
pub fn init_game_state_with(
    seed: u32,
    home: TeamRoster,
    away: TeamRoster,
    home_tactics: TeamTactics,
    away_tactics: TeamTactics,
) -> GameState {
    let center = court::center_court();
    // Jump-ball ring offsets by roster index (center fronts the circle).
    let ring: [(f32, f32); 5] =
        [(-12.0, 0.0), (-8.5, -8.5), (-8.5, 8.5), (-4.0, -11.3), (-1.5, 0.0)];

    let mut players = Vec::with_capacity(10);
    let mut box_scores = Vec::with_capacity(10);
    for (team, roster) in [(Team::Home, &home), (Team::Away, &away)] {
        let dir = court::attack_dir(team);
        for (index, player) in roster.players.iter().enumerate() {
            let (dx, dy) = ring[index];
            // Each side lines up on its own half, mirrored through center.
            let pos = Vec2::new(center.x + dx * dir, center.y + dy * dir);
            let id = PlayerId::new(team, index as u8);
            players.push(SimPlayer::new(id, player.clone(), pos));
            box_scores.push(PlayerBoxScore {
                name: player.name.clone(),
                team: Some(team),
                ..PlayerBoxScore::default()
            });
        }
    }

    let mut state = GameState {
        players,
        ball: Ball::at(center),
        score: [0, 0],
        quarter: 1,
        clock_seconds: QUARTER_SECONDS,
        shot_clock: SHOT_CLOCK_FULL,
        possession: Team::Home,
        phase: Phase::JumpBall,
        phase_ticks: 0,
        game_time: 0.0,
        game_started: false,
        game_over: false,
        tactics: [home_tactics, away_tactics],
        team_names: [home.name, away.name],
        rng: SimRng::new(seed),
        last_event: String::new(),
        slots: [None; SLOT_COUNT],
        roles: [None; 10],
        def_assignments: [None; 5],
        current_play: None,
        current_step: 0,
        step_timer: 0.0,
        step_jitters: [0.0; 10],
        last_pass_from: None,
        last_pass_time: -10.0,
        dribble_time: 0.0,
        crossed_half_court: false,
        advance_clock: 0.0,
        possession_stage: PossessionStage::Early,
        free_throws: None,
        call_for_ball: None,
        box_scores,
        log: Vec::new(),
    };
    super::log::push(&mut state, crate::models::LogEventKind::PeriodStart, "Start of Q1".to_string());
    state
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> &SimPlayer {
        &self.players[id.global()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut SimPlayer {
        &mut self.players[id.global()]
    }

    pub fn team_players(&self, team: Team) -> impl Iterator<Item = &SimPlayer> {
        self.players.iter().filter(move |p| p.id.team == team)
    }

    pub fn carrier_id(&self) -> Option<PlayerId> {
        self.ball.carrier
    }

    pub fn tactics_of(&self, team: Team) -> TeamTactics {
        self.tactics[team.index()]
    }

    /// Offensive tactic of the team with possession.
    pub fn offense_tactic(&self) -> crate::models::OffenseTactic {
        self.tactics_of(self.possession).offense
    }

    /// Defensive tactic of the team without possession.
    pub fn defense_tactic(&self) -> crate::models::DefenseTactic {
        self.tactics_of(self.possession.opponent()).defense
    }

    /// The basket the possession team attacks.
    pub fn attacked_basket(&self) -> Vec2 {
        court::basket_of(self.possession)
    }

    pub fn attack_dir_now(&self) -> f32 {
        court::attack_dir(self.possession)
    }

    pub fn phase_time(&self) -> f32 {
        self.phase_ticks as f32 * super::TICK_DT
    }

    /// Nearest player of `team` to `pos`, excluding `exclude`.
    pub fn nearest_of_team(
        &self,
        team: Team,
        pos: Vec2,
        exclude: Option<PlayerId>,
    ) -> Option<(PlayerId, f32)> {
        self.team_players(team)
            .filter(|p| Some(p.id) != exclude)
            .map(|p| (p.id, p.pos.distance_to(pos)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Nearest defender (opponent of the possession team) to `pos`.
    pub fn nearest_defender(&self, pos: Vec2) -> Option<(PlayerId, f32)> {
        self.nearest_of_team(self.possession.opponent(), pos, None)
    }

    /// Distance from the nearest defender to `pos` (large when the floor
    /// is somehow empty; callers treat it as wide open).
    pub fn nearest_defender_dist(&self, pos: Vec2) -> f32 {
        self.nearest_defender(pos).map(|(_, d)| d).unwrap_or(f32::MAX)
    }

    pub fn set_target(&mut self, id: PlayerId, target: Vec2) {
        self.player_mut(id).target_pos = target;
    }

    /// Hand the ball to `id`, clearing every other `has_ball` flag.
    pub fn give_ball_to(&mut self, id: PlayerId) {
        for p in self.players.iter_mut() {
            p.has_ball = p.id == id;
        }
        self.ball.give_to(id);
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_ticks = 0;
    }

    /// Reset every possession-scoped table (slots, roles, assignments,
    /// play, pass history, advance bookkeeping).
    pub fn clear_possession_state(&mut self) {
        self.slots = [None; SLOT_COUNT];
        self.roles = [None; 10];
        self.def_assignments = [None; 5];
        self.current_play = None;
        self.current_step = 0;
        self.step_timer = 0.0;
        self.step_jitters = [0.0; 10];
        self.last_pass_from = None;
        self.dribble_time = 0.0;
        self.crossed_half_court = false;
        self.advance_clock = 0.0;
        self.possession_stage = PossessionStage::Early;
        self.free_throws = None;
        self.call_for_ball = None;
        for p in self.players.iter_mut() {
            p.clear_possession_state();
        }
    }

    /// Flip possession to `team` and enter `next_phase` with a fresh
    /// 24-second shot clock. The ball goes dead; the next phase hands it
    /// out again.
    pub fn change_possession(&mut self, team: Team, next_phase: Phase) {
        self.possession = team;
        self.shot_clock = SHOT_CLOCK_FULL;
        self.clear_possession_state();
        if !self.ball.is_in_flight() && !self.ball.is_bouncing() {
            self.ball.carrier = None;
        }
        for p in self.players.iter_mut() {
            p.has_ball = false;
        }
        self.set_phase(next_phase);
    }

    /// Slot occupancy helpers. The table is authoritative; a player's
    /// `current_slot` mirrors it.
    pub fn slot_holder(&self, slot: Slot) -> Option<PlayerId> {
        self.slots[slot.index()]
    }

    pub fn release_slot_of(&mut self, id: PlayerId) {
        if let Some(slot) = self.player(id).current_slot {
            if self.slots[slot.index()] == Some(id) {
                self.slots[slot.index()] = None;
            }
        }
        self.player_mut(id).current_slot = None;
    }

    /// Claim `slot` for `id`, releasing any slot the player held. Returns
    /// false when the slot is taken by someone else.
    pub fn claim_slot(&mut self, id: PlayerId, slot: Slot) -> bool {
        match self.slots[slot.index()] {
            Some(holder) if holder != id => false,
            _ => {
                self.release_slot_of(id);
                self.slots[slot.index()] = Some(id);
                self.player_mut(id).current_slot = Some(slot);
                true
            }
        }
    }

    /// World coordinates of a slot for the current possession.
    pub fn slot_coords(&self, slot: Slot) -> Vec2 {
        slot.coords(self.attacked_basket(), self.attack_dir_now())
    }

    /// The free slot whose coordinates are closest to `near`.
    pub fn nearest_free_slot(&self, near: Vec2) -> Option<Slot> {
        Slot::ALL
            .iter()
            .copied()
            .filter(|s| self.slots[s.index()].is_none())
            .min_by(|a, b| {
                self.slot_coords(*a)
                    .distance_to(near)
                    .total_cmp(&self.slot_coords(*b).distance_to(near))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_produces_ten_players_at_center_circle() {
        let state = init_game_state(42);
        assert_eq!(state.players.len(), 10);
        let center = court::center_court();
        for p in &state.players {
            assert!(p.pos.distance_to(center) <= 13.0, "player outside jump circle");
        }
        assert_eq!(state.phase, Phase::JumpBall);
        assert_eq!(state.score, [0, 0]);
        assert!(!state.game_started);
        assert_eq!(state.box_scores.len(), 10);
    }

    #[test]
    fn test_centers_front_the_circle() {
        let state = init_game_state(1);
        let home_c = state.player(PlayerId::new(Team::Home, 4));
        let away_c = state.player(PlayerId::new(Team::Away, 4));
        let center = court::center_court();
        assert!(home_c.pos.distance_to(center) < 2.0);
        assert!(away_c.pos.distance_to(center) < 2.0);
        assert!(home_c.pos.x < center.x);
        assert!(away_c.pos.x > center.x);
    }

    #[test]
    fn test_give_ball_sets_unique_flag() {
        let mut state = init_game_state(7);
        let a = PlayerId::new(Team::Home, 0);
        let b = PlayerId::new(Team::Away, 3);
        state.give_ball_to(a);
        state.give_ball_to(b);
        let holders: Vec<_> = state.players.iter().filter(|p| p.has_ball).collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].id, b);
        assert_eq!(state.carrier_id(), Some(b));
    }

    #[test]
    fn test_change_possession_resets_possession_state() {
        let mut state = init_game_state(9);
        state.shot_clock = 3.0;
        state.crossed_half_court = true;
        state.dribble_time = 2.5;
        state.claim_slot(PlayerId::new(Team::Home, 0), Slot::TopKey);

        state.change_possession(Team::Away, Phase::Inbound);
        assert_eq!(state.possession, Team::Away);
        assert_eq!(state.shot_clock, SHOT_CLOCK_FULL);
        assert!(!state.crossed_half_court);
        assert_eq!(state.dribble_time, 0.0);
        assert!(state.slots.iter().all(|s| s.is_none()));
        assert_eq!(state.phase, Phase::Inbound);
        assert_eq!(state.phase_ticks, 0);
    }

    #[test]
    fn test_slot_claim_and_conflict() {
        let mut state = init_game_state(3);
        let a = PlayerId::new(Team::Home, 0);
        let b = PlayerId::new(Team::Home, 1);
        assert!(state.claim_slot(a, Slot::TopKey));
        assert!(!state.claim_slot(b, Slot::TopKey), "occupied slot must be refused");
        // Re-claiming your own slot is fine, moving releases the old one
        assert!(state.claim_slot(a, Slot::LeftWing));
        assert_eq!(state.slot_holder(Slot::TopKey), None);
        assert_eq!(state.slot_holder(Slot::LeftWing), Some(a));
        assert!(state.claim_slot(b, Slot::TopKey));
    }

    #[test]
    fn test_nearest_free_slot_skips_taken() {
        let mut state = init_game_state(3);
        let near = state.slot_coords(Slot::TopKey);
        assert_eq!(state.nearest_free_slot(near), Some(Slot::TopKey));
        state.claim_slot(PlayerId::new(Team::Home, 0), Slot::TopKey);
        let next = state.nearest_free_slot(near).unwrap();
        assert_ne!(next, Slot::TopKey);
    }

    #[test]
    fn test_serde_roundtrip_preserves_state() {
        let state = init_game_state(1234);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
