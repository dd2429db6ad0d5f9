//! The per-tick orchestrator. Fixed order, per tick:
//!
//! 1. advance phase ticks and game time
//! 2. advance clocks, fire violations and quarter transitions
//! 3. run down catch timers, accrue minutes
//! 4. if the ball is in flight: advance it, resolve on landing, move
//!    players, and return early
//! 5. dispatch the phase handler
//! 6. in half-court phases: roles, spacing, slot fill, defense, screens,
//!    help
//! 7. in action: off-ball movement
//! 8. integrate player motion, clear transient flags, sync a carried ball

use super::ball::{FlightKind, CARRY_HEIGHT};
use super::phase::{self, Phase};
use super::state::GameState;
use super::{clock, defense, kinematics, passing, roles, shooting, stats, TICK_DT};

/// Advance the simulation by exactly one 1/60 s interval.
pub fn tick(state: &mut GameState) {
    if state.game_over {
        return;
    }
    state.phase_ticks += 1;
    state.game_time += TICK_DT;

    clock::advance(state, TICK_DT);
    if state.game_over {
        return;
    }

    for p in state.players.iter_mut() {
        if p.catch_timer > 0.0 {
            p.catch_timer = (p.catch_timer - TICK_DT).max(0.0);
        }
    }
    stats::accrue_minutes(state, TICK_DT);

    if state.ball.is_in_flight() {
        if let Some(kind) = state.ball.advance_flight(TICK_DT) {
            match kind {
                FlightKind::Pass { receiver, from_player, .. } => {
                    passing::complete_pass(state, receiver, from_player);
                }
                FlightKind::Shot(desc) => shooting::resolve_shot(state, desc),
            }
        }
        kinematics::move_players(&mut state.players, TICK_DT);
        sync_carried_ball(state);
        return;
    }

    phase::dispatch(state);

    if state.phase.is_halfcourt() {
        roles::update_roles(state);
        roles::enforce_floor_spacing(state);
        roles::fill_empty_slots(state);
        defense::update(state);
        defense::handle_screens(state);
        defense::help_rotate(state);
    }
    if state.phase == Phase::Action {
        roles::off_ball_movement(state);
    }

    kinematics::move_players(&mut state.players, TICK_DT);
    for p in state.players.iter_mut() {
        p.clear_transient_flags();
    }
    sync_carried_ball(state);
}

fn sync_carried_ball(state: &mut GameState) {
    if state.ball.is_in_flight() || state.ball.is_bouncing() {
        return;
    }
    if let Some(carrier) = state.ball.carrier {
        state.ball.pos = state.player(carrier).pos;
        state.ball.z = CARRY_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::init_game_state;

    #[test]
    fn test_tick_advances_time() {
        let mut state = init_game_state(42);
        tick(&mut state);
        assert_eq!(state.phase_ticks, 1);
        assert!((state.game_time - TICK_DT).abs() < 1e-6);
    }

    #[test]
    fn test_tip_happens_and_game_starts() {
        let mut state = init_game_state(42);
        for _ in 0..240 {
            tick(&mut state);
        }
        assert!(state.game_started);
        assert_ne!(state.phase, Phase::JumpBall);
        // Exactly one player has the ball or it is in flight
        let holders = state.players.iter().filter(|p| p.has_ball).count();
        if state.ball.is_carried() {
            assert_eq!(holders, 1);
            assert_eq!(state.carrier_id().unwrap().team, state.possession);
        }
    }

    #[test]
    fn test_carried_ball_tracks_carrier() {
        let mut state = init_game_state(42);
        for _ in 0..600 {
            tick(&mut state);
            if let Some(carrier) = state.carrier_id() {
                if !state.ball.is_in_flight() && !state.ball.is_bouncing() {
                    let d = state.ball.pos.distance_to(state.player(carrier).pos);
                    assert!(d < 1e-4, "carried ball should track the carrier");
                    assert!((state.ball.z - CARRY_HEIGHT).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_ball_mode_is_exclusive_every_tick() {
        let mut state = init_game_state(7);
        for _ in 0..3600 {
            tick(&mut state);
            let modes = [
                state.ball.is_carried(),
                state.ball.is_in_flight(),
                state.ball.is_bouncing(),
            ];
            let active = modes.iter().filter(|m| **m).count();
            assert!(active <= 1, "ball in more than one mode: {:?}", modes);
        }
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = init_game_state(42);
        state.game_over = true;
        let before_time = state.game_time;
        tick(&mut state);
        assert_eq!(state.game_time, before_time);
    }
}
