//! Backcourt advance: the handler pushes to the frontcourt, wings run
//! wide lanes, bigs trail, the defense drops. Crossing half court decides
//! between a fast-break action and a half-court setup.

use tracing::debug;

use super::Phase;
use crate::engine::geometry::Vec2;
use crate::engine::playbook::{self, PlayId};
use crate::engine::player::PlayerId;
use crate::engine::state::GameState;
use crate::engine::{court, defense, roles};

/// How far past half court the handler must be before the break/setup read.
const DECISION_DEPTH: f32 = 8.0;
/// A break is on when at most this many defenders have matched the push.
const MAX_DEFENDERS_BACK: usize = 2;

pub fn run(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        // Ball still in the air from the outlet; players keep running.
        return;
    };
    if carrier.team != state.possession {
        return;
    }
    let offense = state.possession;
    let basket = state.attacked_basket();
    let dir = state.attack_dir_now();

    // Handler pushes up the middle to 22 ft from the rim.
    let handler_target = Vec2::new(basket.x - dir * 22.0, court::COURT_WIDTH / 2.0);
    state.set_target(carrier, handler_target);
    state.player_mut(carrier).is_dribbling = true;

    // Wings sprint the sidelines, bigs trail the ball.
    let handler_x = state.player(carrier).pos.x;
    for p_index in 0..5u8 {
        let id = PlayerId::new(offense, p_index);
        if id == carrier {
            continue;
        }
        let player = state.player(id);
        if player.player.position.is_big() {
            let trail = Vec2::new(handler_x - dir * 8.0, player.pos.y);
            state.set_target(id, trail);
        } else {
            let lane_y = if p_index % 2 == 0 {
                court::COURT_WIDTH / 2.0 - 16.0
            } else {
                court::COURT_WIDTH / 2.0 + 16.0
            };
            state.set_target(id, Vec2::new(basket.x - dir * 20.0, lane_y));
            state.player_mut(id).is_cutting = true;
        }
    }

    defense::retreat(state);

    // Latch the half-court crossing.
    let x = state.player(carrier).pos.x;
    if !state.crossed_half_court && !court::in_backcourt(offense, x) {
        state.crossed_half_court = true;
    }
    if !state.crossed_half_court {
        return;
    }

    // Read the floor once the ball is eight feet deep.
    let depth = (x - court::HALF_COURT_X) * dir;
    if depth < DECISION_DEPTH {
        return;
    }
    let defenders_back = state
        .team_players(offense.opponent())
        .filter(|d| !court::in_backcourt(offense, d.pos.x))
        .count();

    roles::update_roles(state);
    if defenders_back <= MAX_DEFENDERS_BACK {
        debug!(defenders_back, "numbers advantage, running");
        playbook::start_play(state, PlayId::FastBreak);
        state.set_phase(Phase::Action);
    } else {
        state.set_phase(Phase::Setup);
    }
}
