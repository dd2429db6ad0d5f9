//! Baseline inbound: the center takes the ball behind his own baseline,
//! four receivers spread the backcourt, the point guard offers a cut, and
//! the pass goes to the closest receiver.

use tracing::debug;

use super::Phase;
use crate::engine::geometry::Vec2;
use crate::engine::player::PlayerId;
use crate::engine::state::GameState;
use crate::engine::{court, defense, passing};

/// Phase schedule in seconds.
const SPREAD_UNTIL: f32 = 2.5;
const CUT_UNTIL: f32 = 4.0;

fn inbound_spot(state: &GameState) -> Vec2 {
    let dir = state.attack_dir_now();
    let x = if dir > 0.0 {
        court::BOUNDS_MARGIN
    } else {
        court::COURT_LENGTH - court::BOUNDS_MARGIN
    };
    Vec2::new(x, court::COURT_WIDTH / 2.0)
}

pub fn run(state: &mut GameState) {
    let offense = state.possession;
    let inbounder = PlayerId::new(offense, 4);
    let spot = inbound_spot(state);
    let dir = state.attack_dir_now();
    let t = state.phase_time();

    // The inbounder owns the ball for the whole sequence.
    if state.carrier_id() != Some(inbounder) && !state.ball.is_in_flight() {
        state.give_ball_to(inbounder);
    }
    state.set_target(inbounder, spot);

    // Receivers fan out across the backcourt.
    let lanes = [10.0, 40.0, 18.0, 32.0];
    for (lane_idx, index) in [0u8, 1, 2, 3].iter().enumerate() {
        let receiver = PlayerId::new(offense, *index);
        let depth = 12.0 + 5.0 * lane_idx as f32;
        let target = Vec2::new(spot.x + dir * depth, lanes[lane_idx]);
        state.set_target(receiver, target);
    }

    if t >= SPREAD_UNTIL && t < CUT_UNTIL {
        // The point guard breaks toward the ball.
        let pg = PlayerId::new(offense, 0);
        let target = spot + Vec2::new(dir * 6.0, 0.0);
        state.set_target(pg, target);
        state.player_mut(pg).is_cutting = true;
    }

    if t >= CUT_UNTIL && state.carrier_id() == Some(inbounder) {
        // Throw it in to whoever is closest.
        let inbounder_pos = state.player(inbounder).pos;
        let mut receivers: Vec<(PlayerId, f32)> = state
            .team_players(offense)
            .filter(|p| p.id != inbounder)
            .map(|p| (p.id, p.pos.distance_to(inbounder_pos)))
            .collect();
        receivers.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (receiver, _) in receivers {
            if passing::execute_pass(state, inbounder, receiver) {
                state.set_phase(Phase::Advance);
                return;
            }
        }
        debug!("inbound pass has no open lane, holding");
    }

    defense::retreat(state);
}
