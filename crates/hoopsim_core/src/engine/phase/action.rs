//! Main half-court action. The shot-clock stage gates what the offense
//! does: run the play early, read-and-react in the middle, hunt the best
//! shot late, and get anything up in desperation.

use tracing::debug;

use super::PossessionStage;
use crate::engine::player::PlayerId;
use crate::engine::state::GameState;
use crate::engine::{decision, defense, playbook, shooting, TICK_DT};

/// Steal checks run every 300 ticks of action.
const STEAL_CHECK_INTERVAL: u32 = 300;
/// Late-clock reads happen on decision ticks.
const DECISION_INTERVAL_TICKS: u32 = 30;

pub fn run(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        // Defensive tolerance: the phase requires a carrier. Skip the tick.
        debug!("action phase without a ball carrier");
        return;
    };
    if carrier.team != state.possession {
        return;
    }

    state.possession_stage = PossessionStage::from_shot_clock(state.shot_clock);
    if state.player(carrier).can_act() {
        state.dribble_time += TICK_DT;
    }

    if state.phase_ticks % STEAL_CHECK_INTERVAL == 0 {
        defense::steal_check(state);
        if state.carrier_id() != Some(carrier) {
            return;
        }
    }

    if state.possession_stage == PossessionStage::Desperation {
        if state.player(carrier).can_act() {
            shooting::attempt_shot(state, carrier);
        }
        return;
    }

    // An active play keeps running through its steps in any stage.
    if state.current_play.is_some() {
        playbook::run_current_play(state, TICK_DT);
        return;
    }

    match state.possession_stage {
        PossessionStage::Early => {
            playbook::select_play(state);
            playbook::run_current_play(state, TICK_DT);
        }
        PossessionStage::Mid => {
            if state.player(carrier).can_act() {
                decision::read_and_react(state, carrier);
            }
        }
        PossessionStage::Late => late_clock(state, carrier),
        PossessionStage::Desperation => unreachable!("handled above"),
    }
}

/// A rough scoring-gravity rating used for the late-clock "find our guy"
/// read.
fn scorer_rating(state: &GameState, id: PlayerId) -> i32 {
    let p = &state.player(id).player;
    let mut rating = p.shooting.three_point.max(p.shooting.mid_range) as i32
        + p.finishing.layup as i32 / 2;
    if p.is_superstar {
        rating += 15;
    }
    rating
}

/// Late clock: get the ball to the best scorer if he is open, otherwise
/// take what is there.
fn late_clock(state: &mut GameState, handler: PlayerId) {
    if !state.player(handler).can_act() {
        return;
    }
    state.player_mut(handler).is_dribbling = true;
    if state.phase_ticks % DECISION_INTERVAL_TICKS != 0 {
        return;
    }

    let best = state
        .team_players(state.possession)
        .map(|p| p.id)
        .max_by_key(|id| scorer_rating(state, *id))
        .unwrap_or(handler);

    if best != handler && decision::openness(state, best) > decision::OPEN_DIST {
        if passing_allowed(state, handler, best) && crate::engine::passing::execute_pass(state, handler, best)
        {
            return;
        }
    }

    let d = state.player(handler).pos.distance_to(state.attacked_basket());
    if d < 25.0 {
        shooting::attempt_shot(state, handler);
    } else {
        decision::read_and_react(state, handler);
    }
}

fn passing_allowed(state: &GameState, from: PlayerId, to: PlayerId) -> bool {
    !crate::engine::passing::lane_blocked(state, state.player(from).pos, state.player(to).pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::phase::Phase;
    use crate::engine::state::init_game_state;
    use crate::models::Team;

    fn action_state() -> GameState {
        let mut state = init_game_state(42);
        state.game_started = true;
        state.change_possession(Team::Home, Phase::Action);
        state.crossed_half_court = true;
        let basket = crate::engine::court::basket_of(Team::Home);
        // Spread offense in the frontcourt, defense far away so reads are open
        for i in 0..5u8 {
            state.player_mut(PlayerId::new(Team::Home, i)).pos =
                basket + crate::engine::geometry::Vec2::new(-20.0, -10.0 + 5.0 * i as f32);
            state.player_mut(PlayerId::new(Team::Away, i)).pos =
                crate::engine::geometry::Vec2::new(20.0, 5.0 + 9.0 * i as f32);
        }
        state.give_ball_to(PlayerId::new(Team::Home, 0));
        state
    }

    #[test]
    fn test_missing_carrier_is_tolerated() {
        let mut state = action_state();
        state.ball.carrier = None;
        for p in state.players.iter_mut() {
            p.has_ball = false;
        }
        run(&mut state); // must not panic
        assert_eq!(state.phase, Phase::Action);
    }

    #[test]
    fn test_early_stage_selects_play() {
        let mut state = action_state();
        state.shot_clock = 22.0;
        state.phase_ticks = 1;
        run(&mut state);
        assert_eq!(state.possession_stage, PossessionStage::Early);
        assert!(state.current_play.is_some(), "early offense runs a play");
    }

    #[test]
    fn test_desperation_forces_shot() {
        let mut state = action_state();
        state.shot_clock = 1.0;
        state.phase_ticks = 3;
        run(&mut state);
        assert_eq!(state.phase, Phase::Shooting, "desperation launches immediately");
    }

    #[test]
    fn test_dribble_time_accrues() {
        let mut state = action_state();
        state.shot_clock = 15.0; // mid stage
        state.phase_ticks = 1;
        let before = state.dribble_time;
        run(&mut state);
        assert!(state.dribble_time > before);
    }
}
