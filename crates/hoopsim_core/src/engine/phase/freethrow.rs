//! Free throws: the shooter toes the line, lane spots fill, one attempt
//! every 1.5 seconds. A made final throw hands the ball over; a miss goes
//! live off the rim.

use tracing::debug;

use super::Phase;
use crate::engine::geometry::Vec2;
use crate::engine::player::PlayerId;
use crate::engine::state::GameState;
use crate::engine::{court, log, stats, TICK_DT};
use crate::models::LogEventKind;

/// Seconds between attempts.
const ATTEMPT_INTERVAL: f32 = 1.5;

pub fn run(state: &mut GameState) {
    let Some(ft) = state.free_throws.clone() else {
        // Defensive tolerance: phase requires a pending sequence.
        debug!("free-throw phase without a pending sequence");
        return;
    };
    let shooter = ft.shooter;
    let basket = court::basket_of(shooter.team);
    let dir = court::attack_dir(shooter.team);
    let line = basket + Vec2::new(-dir * court::FREE_THROW_DIST, 0.0);

    if state.carrier_id() != Some(shooter) {
        state.give_ball_to(shooter);
    }
    state.set_target(shooter, line);
    position_lane(state, shooter, basket, dir);

    let mut ft = ft;
    ft.timer -= TICK_DT;
    if ft.timer > 0.0 {
        state.free_throws = Some(ft);
        return;
    }

    // Release one attempt.
    let skill = state.player(shooter).player.shooting.free_throw as f32 / 100.0;
    let made = state.rng.chance(0.5 + 0.35 * skill);
    stats::record_ft(state, shooter, made);
    ft.taken += 1;
    ft.last_made = made;
    let name = state.player(shooter).player.name.clone();
    let kind = if made { LogEventKind::FreeThrowMade } else { LogEventKind::FreeThrowMissed };
    let verb = if made { "makes" } else { "misses" };
    log::push(
        state,
        kind,
        format!("{} {} free throw {} of {}", name, verb, ft.taken, ft.total),
    );

    if ft.taken < ft.total {
        ft.timer = ATTEMPT_INTERVAL;
        state.free_throws = Some(ft);
        return;
    }

    // Sequence complete.
    state.free_throws = None;
    if made {
        state.change_possession(shooter.team.opponent(), Phase::Inbound);
    } else {
        // Live miss: short carom off the rim into a scramble.
        for p in state.players.iter_mut() {
            p.has_ball = false;
        }
        let along = state.rng.range_f32(2.0, 7.0);
        let lateral = state.rng.jitter(4.0);
        let target = basket + Vec2::new(-dir * along, lateral);
        state.ball.start_bounce(basket, target);
        state.set_phase(Phase::Rebound);
    }
}

/// Rebounders alternate along the lane, shooter's team on the high spots.
fn position_lane(state: &mut GameState, shooter: PlayerId, basket: Vec2, dir: f32) {
    let lane_spots = [
        Vec2::new(-7.0, -8.0),
        Vec2::new(-7.0, 8.0),
        Vec2::new(-11.0, -8.0),
        Vec2::new(-11.0, 8.0),
    ];
    let mut defense_spot = 0;
    let mut offense_spot = 2;
    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in ids {
        if id == shooter {
            continue;
        }
        if id.team == shooter.team {
            if offense_spot < lane_spots.len() {
                let s = lane_spots[offense_spot];
                state.set_target(id, basket + Vec2::new(s.x * dir, s.y));
                offense_spot += 1;
            } else {
                // Everyone else behind the arc
                state.set_target(id, basket + Vec2::new(-dir * 26.0, state.player(id).pos.y - 25.0));
            }
        } else if defense_spot < 2 {
            let s = lane_spots[defense_spot];
            state.set_target(id, basket + Vec2::new(s.x * dir, s.y));
            defense_spot += 1;
        } else {
            let y = state.player(id).pos.y;
            state.set_target(id, basket + Vec2::new(-dir * 20.0, y - 25.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::{init_game_state, FreeThrowState};
    use crate::models::Team;

    fn ft_state(total: u8) -> GameState {
        let mut state = init_game_state(42);
        state.game_started = true;
        state.possession = Team::Home;
        let shooter = PlayerId::new(Team::Home, 1);
        state.free_throws = Some(FreeThrowState {
            shooter,
            total,
            taken: 0,
            last_made: false,
            timer: 0.01,
        });
        state.set_phase(Phase::FreeThrow);
        state
    }

    #[test]
    fn test_attempts_are_spaced() {
        let mut state = ft_state(2);
        run(&mut state); // first attempt fires (timer was nearly zero)
        let ft = state.free_throws.as_ref().unwrap();
        assert_eq!(ft.taken, 1);
        assert!(ft.timer > 1.0, "next attempt waits");
        let attempts = state.box_scores[PlayerId::new(Team::Home, 1).global()].ft_attempted;
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_sequence_completes_in_two_attempts() {
        let mut state = ft_state(2);
        let mut guard = 0;
        while state.free_throws.is_some() && guard < 1000 {
            run(&mut state);
            guard += 1;
        }
        let line = &state.box_scores[PlayerId::new(Team::Home, 1).global()];
        assert_eq!(line.ft_attempted, 2);
        // Either the defense inbounds or the miss went to the glass
        assert!(matches!(state.phase, Phase::Inbound | Phase::Rebound));
        if state.phase == Phase::Inbound {
            assert_eq!(state.possession, Team::Away);
        } else {
            assert!(state.ball.is_bouncing());
        }
    }

    #[test]
    fn test_make_rate_tracks_skill() {
        // With free_throw=86 the make probability is ~0.80
        let mut makes = 0;
        let mut total = 0;
        for seed in 0..40 {
            let mut state = ft_state(2);
            state.rng = crate::engine::rng::SimRng::new(seed);
            let mut guard = 0;
            while state.free_throws.is_some() && guard < 1000 {
                run(&mut state);
                guard += 1;
            }
            let line = &state.box_scores[PlayerId::new(Team::Home, 1).global()];
            makes += line.ft_made;
            total += line.ft_attempted;
        }
        let rate = makes as f32 / total as f32;
        assert!((0.6..=0.95).contains(&rate), "FT rate {} out of plausible band", rate);
    }
}
