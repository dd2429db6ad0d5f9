//! Pass execution: lane evaluation, pass-type classification, interception,
//! flight launch, and completion handling.
//!
//! Lanes with a defender inside 2.5 ft of the passing segment are blocked
//! and never thrown. Defenders in the 2.5-4 ft band make a pass "guarded":
//! the type choice shifts to bounce/lob/overhead and an interception roll
//! is taken against the guard's steal skill, scaled by how well the chosen
//! trajectory clears their reach.

use tracing::debug;

use super::ball::{pass_duration, Flight, FlightKind, PassType, PASS_END_Z};
use super::geometry::{distance_to_segment, Vec2};
use super::phase::Phase;
use super::player::PlayerId;
use super::state::GameState;
use super::{log, stats};
use crate::models::LogEventKind;

/// Defender distance to the lane below which a pass is never attempted.
pub const LANE_BLOCK_DIST: f32 = 2.5;
/// Defender distance to the lane below which a pass is contested.
pub const LANE_GUARD_DIST: f32 = 4.0;

/// True when any defender sits within the no-throw window of the segment.
pub fn lane_blocked(state: &GameState, from: Vec2, to: Vec2) -> bool {
    state
        .team_players(state.possession.opponent())
        .any(|d| distance_to_segment(d.pos, from, to) < LANE_BLOCK_DIST)
}

/// Nearest defender contesting the lane (inside the guard window).
fn lane_guard(state: &GameState, from: Vec2, to: Vec2) -> Option<(PlayerId, f32)> {
    state
        .team_players(state.possession.opponent())
        .map(|d| (d.id, distance_to_segment(d.pos, from, to)))
        .filter(|(_, dist)| *dist < LANE_GUARD_DIST)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// How high a defender can reach for an interception, in feet.
fn defender_reach(height_cm: u16) -> f32 {
    8.0 + 1.5 * (height_cm as f32 / 200.0)
}

/// (from_z, peak_z) for a pass type over distance `d`.
fn arc_for(pass_type: PassType, d: f32) -> (f32, f32) {
    match pass_type {
        PassType::Chest => (5.0, 5.5 + 0.02 * d),
        PassType::Bounce => (4.0, 2.0),
        PassType::Lob => (7.0, 12.0 + 0.1 * d),
        PassType::Overhead => (8.0, 9.0 + 0.05 * d),
    }
}

fn classify(state: &mut GameState, guarded: bool, d: f32) -> PassType {
    if !guarded {
        if d < 8.0 {
            PassType::Chest
        } else if d > 20.0 {
            PassType::Overhead
        } else if state.rng.chance(0.7) {
            PassType::Chest
        } else {
            PassType::Overhead
        }
    } else {
        let roll = state.rng.next_f32();
        if roll < 0.5 {
            PassType::Bounce
        } else if roll < 0.9 {
            PassType::Lob
        } else {
            PassType::Overhead
        }
    }
}

/// Interception probability scale for a trajectory against the guard.
fn interception_scale(pass_type: PassType, peak_z: f32, reach: f32) -> f32 {
    match pass_type {
        PassType::Chest => 1.0,
        PassType::Bounce => 0.5,
        PassType::Lob => {
            if peak_z > reach {
                0.1
            } else {
                1.0
            }
        }
        PassType::Overhead => {
            if peak_z > reach - 1.0 {
                0.3
            } else {
                1.0
            }
        }
    }
}

/// Throw a pass from `from` to `to`. Returns false when the lane is
/// blocked or the passer does not hold the ball. On an interception the
/// flight is redirected to the guard, resolving as a steal.
pub fn execute_pass(state: &mut GameState, from: PlayerId, to: PlayerId) -> bool {
    if state.carrier_id() != Some(from) || from == to {
        return false;
    }
    let from_pos = state.player(from).pos;
    let to_pos = state.player(to).pos;
    if lane_blocked(state, from_pos, to_pos) {
        return false;
    }

    let guard = lane_guard(state, from_pos, to_pos);
    let d = from_pos.distance_to(to_pos);
    let pass_type = classify(state, guard.is_some(), d);
    let (from_z, peak_z) = arc_for(pass_type, d);

    let mut receiver = to;
    let mut target = to_pos;
    if let Some((guard_id, _)) = guard {
        let reach = defender_reach(state.player(guard_id).player.height);
        let steal = state.player(guard_id).player.defense.steal as f32 / 100.0;
        let p_intercept =
            (0.12 + steal * 0.15) * interception_scale(pass_type, peak_z, reach);
        if state.rng.chance(p_intercept) {
            receiver = guard_id;
            target = state.player(guard_id).pos;
            debug!(?pass_type, "pass intercepted in the lane");
        }
    }

    let flight_d = from_pos.distance_to(target);
    state.player_mut(from).has_ball = false;
    state.player_mut(from).is_dribbling = false;
    state.ball.launch(Flight {
        from: from_pos,
        to: target,
        from_z,
        peak_z,
        end_z: PASS_END_Z,
        progress: 0.0,
        duration: pass_duration(flight_d),
        kind: FlightKind::Pass { pass_type, receiver, from_player: from },
    });
    true
}

/// Resolve a pass flight at its landing point.
pub fn complete_pass(state: &mut GameState, receiver: PlayerId, from_player: PlayerId) {
    if receiver.team != state.possession {
        // Lane defender came up with it: steal and live-ball turnover.
        stats::record_steal(state, receiver, from_player);
        let text = format!(
            "{} intercepts the pass from {}",
            state.player(receiver).player.name.clone(),
            state.player(from_player).player.name.clone()
        );
        log::push(state, LogEventKind::Steal, text);
        state.change_possession(receiver.team, Phase::Advance);
        state.give_ball_to(receiver);
        return;
    }

    // Whoever is actually closest to the landing point gathers it; the
    // intended receiver may have kept moving during the flight.
    let receiver = state
        .nearest_of_team(state.possession, state.ball.pos, Some(from_player))
        .map(|(id, _)| id)
        .unwrap_or(receiver);
    state.give_ball_to(receiver);
    let handling = state.player(receiver).player.playmaking.ball_handling as f32 / 100.0;
    state.player_mut(receiver).catch_timer = 0.6 - 0.3 * handling;
    state.last_pass_from = Some(from_player);
    state.last_pass_time = state.game_time;
    state.dribble_time = 0.0;
    if state.call_for_ball == Some(receiver) {
        state.call_for_ball = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::init_game_state;
    use crate::models::Team;

    fn setup() -> GameState {
        let mut state = init_game_state(42);
        state.game_started = true;
        state.set_phase(Phase::Action);
        // Clear the floor: move everyone away from the passing lane
        for p in state.players.iter_mut() {
            p.pos = Vec2::new(10.0, 45.0);
        }
        state
    }

    #[test]
    fn test_clean_pass_reaches_receiver() {
        let mut state = setup();
        let passer = PlayerId::new(Team::Home, 0);
        let target = PlayerId::new(Team::Home, 1);
        state.player_mut(passer).pos = Vec2::new(60.0, 25.0);
        state.player_mut(target).pos = Vec2::new(70.0, 15.0);
        state.give_ball_to(passer);

        assert!(execute_pass(&mut state, passer, target));
        assert!(state.ball.is_in_flight());
        assert!(!state.player(passer).has_ball);

        // Fly it home
        let mut resolved = None;
        while resolved.is_none() {
            resolved = state.ball.advance_flight(crate::engine::TICK_DT);
        }
        match resolved.unwrap() {
            FlightKind::Pass { receiver, from_player, .. } => {
                complete_pass(&mut state, receiver, from_player);
            }
            _ => panic!("expected pass"),
        }
        assert_eq!(state.carrier_id(), Some(target));
        assert!(state.player(target).catch_timer > 0.0);
        assert_eq!(state.last_pass_from, Some(passer));
    }

    #[test]
    fn test_blocked_lane_refuses_pass() {
        let mut state = setup();
        let passer = PlayerId::new(Team::Home, 0);
        let target = PlayerId::new(Team::Home, 1);
        state.player_mut(passer).pos = Vec2::new(60.0, 25.0);
        state.player_mut(target).pos = Vec2::new(70.0, 25.0);
        // Defender squarely in the lane
        state.player_mut(PlayerId::new(Team::Away, 0)).pos = Vec2::new(65.0, 25.5);
        state.give_ball_to(passer);

        assert!(!execute_pass(&mut state, passer, target));
        assert!(!state.ball.is_in_flight());
        assert_eq!(state.carrier_id(), Some(passer));
    }

    #[test]
    fn test_short_open_pass_is_chest() {
        let mut state = setup();
        assert_eq!(classify(&mut state, false, 6.0), PassType::Chest);
    }

    #[test]
    fn test_long_open_pass_is_overhead() {
        let mut state = setup();
        assert_eq!(classify(&mut state, false, 30.0), PassType::Overhead);
    }

    #[test]
    fn test_guarded_pass_avoids_chest() {
        let mut state = setup();
        for _ in 0..50 {
            let t = classify(&mut state, true, 12.0);
            assert_ne!(t, PassType::Chest, "guarded passes never go chest-high");
        }
    }

    #[test]
    fn test_interception_scales() {
        // High lob clears the reach
        assert!((interception_scale(PassType::Lob, 14.0, 9.5) - 0.1).abs() < 1e-6);
        // Low lob does not
        assert!((interception_scale(PassType::Lob, 9.0, 9.5) - 1.0).abs() < 1e-6);
        assert!((interception_scale(PassType::Bounce, 2.0, 9.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_interception_resolves_as_steal() {
        let mut state = setup();
        let passer = PlayerId::new(Team::Home, 0);
        let defender = PlayerId::new(Team::Away, 2);
        state.give_ball_to(passer);
        complete_pass(&mut state, defender, passer);

        assert_eq!(state.possession, Team::Away);
        assert_eq!(state.carrier_id(), Some(defender));
        assert_eq!(state.phase, Phase::Advance);
        assert_eq!(state.box_scores[defender.global()].steals, 1);
        assert_eq!(state.box_scores[passer.global()].turnovers, 1);
        assert_eq!(state.log.last().unwrap().kind, LogEventKind::Steal);
    }

    #[test]
    fn test_arc_heights_by_type() {
        let (from_z, peak_z) = arc_for(PassType::Chest, 10.0);
        assert_eq!(from_z, 5.0);
        assert!((peak_z - 5.7).abs() < 1e-6);
        let (from_z, peak_z) = arc_for(PassType::Bounce, 10.0);
        assert_eq!((from_z, peak_z), (4.0, 2.0));
        let (_, lob_peak) = arc_for(PassType::Lob, 10.0);
        assert!((lob_peak - 13.0).abs() < 1e-6);
    }
}
