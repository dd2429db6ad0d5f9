//! Game clock, shot clock, and backcourt-advance clock, plus the
//! violations they trigger and quarter rollover with the alternating
//! possession arrow.

use tracing::debug;

use super::court;
use super::phase::Phase;
use super::state::{GameState, ADVANCE_LIMIT, QUARTERS, QUARTER_SECONDS};
use super::{log, stats};
use crate::models::{LogEventKind, Team};

/// Advance all clocks by one tick and fire any violation or quarter
/// transition they produce. Runs before phase dispatch.
pub fn advance(state: &mut GameState, dt: f32) {
    if !state.game_started || state.game_over || state.phase == Phase::JumpBall {
        return;
    }

    state.clock_seconds -= dt;

    let offense_live = matches!(
        state.phase,
        Phase::Inbound | Phase::Advance | Phase::Setup | Phase::Action | Phase::Shooting
    );
    if offense_live {
        state.shot_clock -= dt;
    }

    let carrier_on_offense =
        state.carrier_id().map(|id| id.team == state.possession).unwrap_or(false);
    if carrier_on_offense
        && !state.crossed_half_court
        && matches!(state.phase, Phase::Inbound | Phase::Advance | Phase::Setup | Phase::Action)
    {
        state.advance_clock += dt;
    }

    check_violations(state, carrier_on_offense);
    check_quarter_end(state);
}

fn check_violations(state: &mut GameState, carrier_on_offense: bool) {
    let ball_held = matches!(
        state.phase,
        Phase::Inbound | Phase::Advance | Phase::Setup | Phase::Action
    ) && carrier_on_offense;

    if !ball_held {
        // A shot in the air beats the shot clock; the violation only
        // exists while the offense still holds the ball.
        return;
    }

    if state.shot_clock <= 0.0 {
        violation(state, "Shot clock violation");
        return;
    }

    if state.advance_clock > ADVANCE_LIMIT && !state.crossed_half_court {
        violation(state, "8-second violation");
        return;
    }

    if state.crossed_half_court {
        if let Some(carrier) = state.carrier_id() {
            let x = state.player(carrier).pos.x;
            if court::in_backcourt(state.possession, x) {
                violation(state, "Backcourt violation");
            }
        }
    }
}

fn violation(state: &mut GameState, label: &str) {
    debug!(quarter = state.quarter, label, "possession violation");
    if let Some(carrier) = state.carrier_id() {
        stats::record_turnover(state, carrier);
    }
    let offense = state.possession;
    let text = format!("{} on {}", label, state.team_names[offense.index()]);
    log::push(state, LogEventKind::Violation, text);
    state.change_possession(offense.opponent(), Phase::Inbound);
}

fn check_quarter_end(state: &mut GameState) {
    if state.clock_seconds > 0.0 {
        return;
    }
    // Let a buzzer-beater flight or a started free-throw sequence finish.
    if state.ball.is_in_flight() || state.free_throws.is_some() {
        return;
    }
    state.clock_seconds = 0.0;
    log::push(state, LogEventKind::PeriodEnd, format!("End of Q{}", state.quarter));

    if state.quarter >= QUARTERS {
        state.game_over = true;
        log::push(state, LogEventKind::FinalBuzzer, "Final".to_string());
        return;
    }

    state.quarter += 1;
    state.clock_seconds = QUARTER_SECONDS;
    // Possession arrow alternates by quarter: Q2/Q4 away, Q3 home.
    let team = if state.quarter % 2 == 0 { Team::Away } else { Team::Home };
    state.change_possession(team, Phase::Inbound);
    log::push(state, LogEventKind::PeriodStart, format!("Start of Q{}", state.quarter));
}
