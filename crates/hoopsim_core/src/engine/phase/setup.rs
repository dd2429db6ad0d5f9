//! Half-court setup: claim initial slots, walk into spacing for a couple
//! of seconds, then call a play and go to work.

use super::Phase;
use crate::engine::state::GameState;
use crate::engine::{playbook, roles};

/// Seconds of spacing before the play call.
const SETUP_TIME: f32 = 2.0;

pub fn run(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        return;
    };
    if carrier.team != state.possession {
        return;
    }

    // First pass through: fresh roles and initial spacing.
    if state.slots.iter().all(|s| s.is_none()) {
        roles::update_roles(state);
        roles::assign_initial_slots(state);
    }
    state.player_mut(carrier).is_dribbling = true;

    if state.phase_time() >= SETUP_TIME {
        playbook::select_play(state);
        state.set_phase(Phase::Action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::court::Slot;
    use crate::engine::player::{OffenseRole, PlayerId};
    use crate::engine::state::init_game_state;
    use crate::models::Team;

    fn setup_state() -> GameState {
        let mut state = init_game_state(42);
        state.game_started = true;
        state.change_possession(Team::Home, Phase::Setup);
        state.crossed_half_court = true;
        state.give_ball_to(PlayerId::new(Team::Home, 0));
        state
    }

    #[test]
    fn test_first_tick_assigns_roles_and_slots() {
        let mut state = setup_state();
        state.phase_ticks = 1;
        run(&mut state);
        assert_eq!(
            state.roles[PlayerId::new(Team::Home, 0).global()],
            Some(OffenseRole::BallHandler)
        );
        assert_eq!(state.slot_holder(Slot::TopKey), Some(PlayerId::new(Team::Home, 0)));
        // All five offensive players hold distinct slots
        let held: Vec<_> = state.slots.iter().flatten().collect();
        assert_eq!(held.len(), 5);
    }

    #[test]
    fn test_play_called_after_setup_time() {
        let mut state = setup_state();
        state.phase_ticks = 1;
        run(&mut state);
        assert_eq!(state.phase, Phase::Setup);

        state.phase_ticks = (SETUP_TIME * 60.0) as u32 + 1;
        run(&mut state);
        assert_eq!(state.phase, Phase::Action);
        assert!(state.current_play.is_some());
    }
}
