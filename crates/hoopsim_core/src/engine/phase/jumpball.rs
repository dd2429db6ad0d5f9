//! Opening jump ball: both centers hold the circle for the toss, the tip
//! winner's team takes first possession.

use super::Phase;
use crate::engine::player::PlayerId;
use crate::engine::state::GameState;
use crate::engine::{log, TICK_DT};
use crate::models::{LogEventKind, Team};

/// Seconds of pre-tip positioning.
const TIP_TIME: f32 = 3.0;

pub fn run(state: &mut GameState) {
    if (state.phase_ticks as f32) * TICK_DT < TIP_TIME {
        // Everyone freezes on their opening spot until the toss.
        for i in 0..state.players.len() {
            let pos = state.players[i].pos;
            state.players[i].target_pos = pos;
        }
        return;
    }

    let home_center = PlayerId::new(Team::Home, 4);
    let away_center = PlayerId::new(Team::Away, 4);

    // The tip slightly favors the springier center.
    let home_vert = state.player(home_center).player.athletics.vertical as f32;
    let away_vert = state.player(away_center).player.athletics.vertical as f32;
    let p_home = (0.5 + (home_vert - away_vert) * 0.002).clamp(0.2, 0.8);
    let winner = if state.rng.chance(p_home) { home_center } else { away_center };

    state.possession = winner.team;
    state.give_ball_to(winner);
    state.game_started = true;
    let text = format!(
        "{} controls the tip for {}",
        state.player(winner).player.name.clone(),
        state.team_names[winner.team.index()].clone()
    );
    log::push(state, LogEventKind::JumpBall, text);
    state.set_phase(Phase::Advance);
}
