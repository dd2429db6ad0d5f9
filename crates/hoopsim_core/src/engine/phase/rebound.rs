//! Rebound scramble: a box-out window while the ball caroms, then a
//! weighted resolution among everyone crashing the landing spot.

use tracing::debug;

use super::Phase;
use crate::engine::geometry::Vec2;
use crate::engine::player::PlayerId;
use crate::engine::court::SLOT_COUNT;
use crate::engine::state::{GameState, SHOT_CLOCK_OFFENSIVE_RESET};
use crate::engine::{court, log, passing, stats};
use crate::models::{player::skill_modifier, LogEventKind, Position};

/// Box-out window before the board is decided.
const BOX_OUT_WINDOW: f32 = 1.5;
/// Players beyond this range of the landing spot are not in the scramble.
const SCRAMBLE_RADIUS: f32 = 15.0;
/// Degenerate-distance guard on the outlet: skip only a zero-length pass.
const OUTLET_MIN_SEPARATION: f32 = 1.0;

pub fn run(state: &mut GameState) {
    state.ball.advance_bounce();
    let landing = state
        .ball
        .bounce
        .as_ref()
        .map(|b| b.target)
        .unwrap_or(state.ball.pos);

    if state.phase_time() < BOX_OUT_WINDOW {
        // Redraw crash jitter once at phase entry.
        if state.phase_ticks <= 1 {
            for i in 0..state.step_jitters.len() {
                state.step_jitters[i] = state.rng.jitter(1.0);
            }
        }
        position_for_board(state, landing);
        return;
    }

    resolve_board(state, landing);
}

/// Defenders wall off their man; offensive bigs crash; offensive guards
/// get back for safety.
fn position_for_board(state: &mut GameState, landing: Vec2) {
    let offense = state.possession;
    let dir = state.attack_dir_now();

    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in ids {
        if id.team == offense {
            let player = state.player(id);
            if player.player.position.is_big() {
                let jitter = state.step_jitters[id.global()] * 3.0;
                state.set_target(id, landing + Vec2::new(jitter, -jitter * 0.5));
            } else {
                let y = state.player(id).pos.y;
                state.set_target(id, Vec2::new(court::HALF_COURT_X - dir * 5.0, y));
            }
        } else {
            // Box out: between the matched man and the landing point.
            let man = state.def_assignments[id.index as usize]
                .map(|i| PlayerId::new(offense, i))
                .or_else(|| {
                    state.nearest_of_team(offense, state.player(id).pos, None).map(|(m, _)| m)
                });
            if let Some(man) = man {
                let man_pos = state.player(man).pos;
                state.set_target(id, man_pos.lerp(landing, 0.6));
            }
        }
    }
}

/// Weighted rebound among candidates near the spot; falls back to the
/// three closest players when nobody crashed.
fn resolve_board(state: &mut GameState, landing: Vec2) {
    let mut candidates: Vec<(PlayerId, f32)> = state
        .players
        .iter()
        .map(|p| (p.id, p.pos.distance_to(landing)))
        .filter(|(_, d)| *d < SCRAMBLE_RADIUS)
        .collect();
    if candidates.is_empty() {
        let mut all: Vec<(PlayerId, f32)> =
            state.players.iter().map(|p| (p.id, p.pos.distance_to(landing))).collect();
        all.sort_by(|a, b| a.1.total_cmp(&b.1));
        all.truncate(3);
        candidates = all;
        debug!("no crash on the glass, widening to nearest three");
    }

    let offense = state.possession;
    let mut best: Option<(PlayerId, f32)> = None;
    for (id, dist) in candidates {
        let (rebounding, height, vertical, position) = {
            let p = &state.player(id).player;
            (p.defense.rebounding, p.height, p.athletics.vertical, p.position)
        };
        let box_out_bonus = if id.team == offense { 1.0 } else { 1.8 };
        let pos_bonus = match position {
            Position::C => 1.3,
            Position::PF => 1.15,
            _ => 1.0,
        };
        let value = skill_modifier(rebounding)
            * (height as f32 / 180.0)
            * (vertical as f32 / 70.0)
            * (15.0 - dist).max(0.1)
            * box_out_bonus
            * pos_bonus
            * (0.5 + 0.5 * state.rng.next_f32());
        if best.map(|(_, b)| value > b).unwrap_or(true) {
            best = Some((id, value));
        }
    }
    let Some((winner, _)) = best else {
        return;
    };

    let offensive = winner.team == offense;
    stats::record_rebound(state, winner, offensive);
    let name = state.player(winner).player.name.clone();
    if offensive {
        log::push(state, LogEventKind::OffensiveRebound, format!("{} grabs the offensive rebound", name));
        offensive_board(state, winner);
    } else {
        log::push(state, LogEventKind::DefensiveRebound, format!("{} secures the defensive rebound", name));
        defensive_board(state, winner);
    }
}

/// Keep possession, reset to 14, back to a fresh setup.
fn offensive_board(state: &mut GameState, winner: PlayerId) {
    state.give_ball_to(winner);
    state.shot_clock = SHOT_CLOCK_OFFENSIVE_RESET;
    state.current_play = None;
    state.current_step = 0;
    state.step_timer = 0.0;
    state.slots = [None; SLOT_COUNT];
    state.roles = [None; 10];
    state.dribble_time = 0.0;
    for p in state.players.iter_mut() {
        p.clear_possession_state();
    }
    state.set_phase(Phase::Setup);
}

/// Fresh possession the other way, with an outlet to the point guard
/// whenever someone else comes up with the board.
fn defensive_board(state: &mut GameState, winner: PlayerId) {
    state.change_possession(winner.team, Phase::Advance);
    state.give_ball_to(winner);

    let pg = PlayerId::new(winner.team, 0);
    if winner != pg {
        let separation = state.player(pg).pos.distance_to(state.player(winner).pos);
        if separation > OUTLET_MIN_SEPARATION {
            passing::execute_pass(state, winner, pg);
        }
    }
}
