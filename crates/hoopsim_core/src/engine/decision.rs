//! Ball-handler read-and-react.
//!
//! An ordered rule chain, first match wins. Layup-range and superstar
//! signature reactions may fire on any tick; everything else only on a
//! decision tick (twice per second) so the handler does not thrash.

use tracing::trace;

use super::geometry::{distance_to_segment, Vec2};
use super::passing;
use super::player::PlayerId;
use super::shooting;
use super::state::GameState;

/// Decisions are evaluated twice per second.
const DECISION_INTERVAL_TICKS: u32 = 30;
/// A defender farther than this leaves a player "open".
pub const OPEN_DIST: f32 = 6.0;
/// ... and "wide open".
pub const WIDE_OPEN_DIST: f32 = 8.0;
/// Previous passer may not get the ball back within this window.
const RETURN_PASS_GUARD: f32 = 1.5;

/// Nearest-defender distance to a player.
pub fn openness(state: &GameState, id: PlayerId) -> f32 {
    state.nearest_defender_dist(state.player(id).pos)
}

fn is_decision_tick(state: &GameState) -> bool {
    state.phase_ticks % DECISION_INTERVAL_TICKS == 0
}

/// Run the handler's read. Assumes the player holds the ball and is past
/// the catch window.
pub fn read_and_react(state: &mut GameState, handler: PlayerId) {
    let pos = state.player(handler).pos;
    let basket = state.attacked_basket();
    let d = pos.distance_to(basket);
    let contest = state.nearest_defender_dist(pos);
    state.player_mut(handler).is_dribbling = true;

    // --- Immediate reactions, any tick ---

    // 1. Layup range
    if d < 5.0 {
        shooting::attempt_shot(state, handler);
        return;
    }

    // 2. Superstar signatures
    let (is_superstar, star_three, star_dunk) = {
        let p = &state.player(handler).player;
        (p.is_superstar, p.shooting.three_point, p.finishing.dunk)
    };
    if is_superstar {
        if star_three >= 90 && d > 22.0 && d < 30.0 && contest > OPEN_DIST {
            shooting::attempt_shot(state, handler);
            return;
        }
        if star_dunk >= 90 && d < 20.0 && rim_run_clear(state, pos, basket) {
            state.set_target(handler, basket);
            state.player_mut(handler).is_cutting = true;
            return;
        }
    }

    if !is_decision_tick(state) {
        return;
    }

    let aggressive = state.dribble_time > 1.5 || state.shot_clock < 6.0;
    let must_attack = state.dribble_time > 3.0 || state.shot_clock < 6.0;
    let open = contest > OPEN_DIST;
    trace!(?handler, d, contest, aggressive, must_attack, "decision tick");

    // 3. Wide-open catch-and-shoot
    if contest > WIDE_OPEN_DIST && state.dribble_time < 0.5 && d > 22.0 && d < 27.0 {
        let three = state.player(handler).player.shooting.three_point;
        if three >= 70 || state.rng.chance(0.7) {
            shooting::attempt_shot(state, handler);
            return;
        }
    }

    // 4. Drive the open lane. Pressure on the handler alone does not close
    // the lane; a defender has to actually sit between him and the rim.
    let lane_open = !defender_between(state, pos, basket);
    if lane_open && d > 5.0 && d < 28.0 {
        let jitter = Vec2::new(state.rng.jitter(1.0), state.rng.jitter(1.0));
        state.set_target(handler, basket + jitter);
        state.player_mut(handler).is_cutting = true;
        return;
    }

    // 5. Aggressive mid-range
    if aggressive && open && d > 5.0 && d < 22.0 {
        shooting::attempt_shot(state, handler);
        return;
    }

    // 6. Open three
    if open && d > 22.0 && d < 27.0 {
        let three = state.player(handler).player.shooting.three_point;
        if three >= 65 || aggressive {
            shooting::attempt_shot(state, handler);
            return;
        }
    }

    // 7. Create a better shot with a pass
    if !must_attack && try_create_pass(state, handler, aggressive) {
        return;
    }

    // 8. Must score
    if d < 25.0 {
        shooting::attempt_shot(state, handler);
        return;
    }

    // 9. Put the ball on the floor toward the rim
    let jitter = Vec2::new(state.rng.jitter(4.0), state.rng.jitter(4.0));
    state.set_target(handler, basket + jitter);
    state.player_mut(handler).is_cutting = true;
}

/// No defender sits within 3 ft of the straight line to the rim.
fn rim_run_clear(state: &GameState, from: Vec2, basket: Vec2) -> bool {
    state
        .team_players(state.possession.opponent())
        .all(|def| distance_to_segment(def.pos, from, basket) > 3.0)
}

/// Is any defender positioned between the handler and the basket?
fn defender_between(state: &GameState, from: Vec2, basket: Vec2) -> bool {
    state
        .team_players(state.possession.opponent())
        .any(|def| distance_to_segment(def.pos, from, basket) < 4.0)
}

/// The recent passer is ineligible to receive for a beat, and blocked
/// lanes are never thrown into.
fn pass_eligible(state: &GameState, from: PlayerId, to: PlayerId) -> bool {
    if state.last_pass_from == Some(to)
        && state.game_time - state.last_pass_time < RETURN_PASS_GUARD
    {
        return false;
    }
    !passing::lane_blocked(state, state.player(from).pos, state.player(to).pos)
}

/// Rule 7: roller first, then a spot-up shooter, then (when patient) a
/// swing pass to the closest open teammate.
fn try_create_pass(state: &mut GameState, handler: PlayerId, aggressive: bool) -> bool {
    let basket = state.attacked_basket();

    // Roller diving inside 12 ft
    let roller = state
        .team_players(state.possession)
        .filter(|p| p.id != handler && p.pos.distance_to(basket) < 12.0)
        .filter(|p| state.nearest_defender_dist(p.pos) > OPEN_DIST)
        .map(|p| p.id)
        .find(|id| pass_eligible(state, handler, *id));
    if let Some(target) = roller {
        return passing::execute_pass(state, handler, target);
    }

    // Spot-up shooter on the arc
    let shooter = state
        .team_players(state.possession)
        .filter(|p| p.id != handler)
        .filter(|p| {
            let d = p.pos.distance_to(basket);
            d > 22.0 && d < 27.0 && p.player.shooting.three_point >= 70
        })
        .filter(|p| state.nearest_defender_dist(p.pos) > OPEN_DIST)
        .map(|p| p.id)
        .find(|id| pass_eligible(state, handler, *id));
    if let Some(target) = shooter {
        return passing::execute_pass(state, handler, target);
    }

    if aggressive {
        return false;
    }

    // Scored look: rim proximity, openness, shooter gravity, and anyone
    // calling for the ball.
    let top = best_pass_targets(state, handler).into_iter().next();
    if let Some((target, _)) = top {
        if openness(state, target) > OPEN_DIST && passing::execute_pass(state, handler, target) {
            return true;
        }
    }

    // Patient swing to the closest open teammate
    let handler_pos = state.player(handler).pos;
    let swing = state
        .team_players(state.possession)
        .filter(|p| p.id != handler)
        .filter(|p| state.nearest_defender_dist(p.pos) > OPEN_DIST)
        .map(|p| (p.id, p.pos.distance_to(handler_pos)))
        .filter(|(id, _)| pass_eligible(state, handler, *id))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);
    if let Some(target) = swing {
        return passing::execute_pass(state, handler, target);
    }
    false
}

/// Scored pass candidates for late-clock "find the best scorer" reads:
/// openness, rim proximity, shooting skill at distance, superstar pull,
/// and a proximity term for low-vision passers. Top three, best first.
pub fn best_pass_targets(state: &GameState, passer: PlayerId) -> Vec<(PlayerId, f32)> {
    let basket = state.attacked_basket();
    let passer_pos = state.player(passer).pos;
    let low_vision = state.player(passer).player.playmaking.court_vision < 30;

    let mut scored: Vec<(PlayerId, f32)> = state
        .team_players(state.possession)
        .filter(|p| p.id != passer)
        .map(|p| {
            let open = state.nearest_defender_dist(p.pos).min(20.0);
            let d_basket = p.pos.distance_to(basket);
            let mut score = open * 2.0 + (30.0 - d_basket) * 1.5;
            if d_basket > 15.0 {
                // Shooting skill dominates for spot-up looks: an elite
                // shooter outranks positional terms outright.
                score += p.player.shooting.three_point as f32 * 3.0;
            }
            if p.player.is_superstar {
                score += 5.0;
            }
            if low_vision {
                score += (30.0 - p.pos.distance_to(passer_pos)).max(0.0);
            }
            if state.call_for_ball == Some(p.id) {
                score += 15.0;
            }
            (p.id, score)
        })
        .filter(|(id, _)| pass_eligible(state, passer, *id))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(3);
    scored
}
