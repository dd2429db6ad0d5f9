//! Shot attempts and resolution: probability model, shooting fouls,
//! blocks, miss-type selection, and the rebound bounce that follows a
//! miss.
//!
//! The outcome is decided at release (one draw against the composed
//! probability) and carried inside the flight descriptor; resolution at
//! landing only applies the pre-decided result.

use tracing::debug;

use super::ball::{
    shot_duration, shot_peak_z, Flight, FlightKind, MissType, ShotDescriptor, SHOT_END_Z,
    SHOT_RELEASE_Z,
};
use super::court::{self, THREE_POINT_LINE};
use super::geometry::Vec2;
use super::phase::Phase;
use super::player::PlayerId;
use super::state::{FreeThrowState, GameState};
use super::{log, playbook, stats};
use crate::models::{player::skill_modifier, tactic_advantage, LogEventKind};

/// Seconds after a catch during which a make credits the passer.
const ASSIST_WINDOW: f32 = 2.0;

/// Composed make probability for a shot from `d` feet with the nearest
/// defender `contest` feet away.
pub fn shot_probability(state: &GameState, shooter: PlayerId, d: f32, contest: f32) -> f32 {
    let player = &state.player(shooter).player;
    let (base, skill) = if d > THREE_POINT_LINE {
        (0.35, player.shooting.three_point)
    } else if d >= 5.0 {
        (0.45, player.shooting.mid_range)
    } else {
        (0.60, player.finishing.layup)
    };

    let mut contest_mod: f32 = if contest < 3.0 {
        0.6
    } else if contest < 5.0 {
        0.8
    } else {
        1.0
    };
    if player.is_superstar {
        contest_mod = contest_mod.max(0.8);
    }
    if state.shot_clock < 3.0 {
        contest_mod *= 0.85;
    }

    let adv = tactic_advantage(state.offense_tactic(), state.defense_tactic());
    (base * skill_modifier(skill) * contest_mod * (1.0 + adv)).clamp(0.02, 0.95)
}

/// Shooting-foul probability by range and contest distance.
fn foul_probability(d: f32, contest: f32) -> f32 {
    if contest > 6.0 {
        return 0.0;
    }
    let base = if d < 5.0 {
        0.15
    } else if d < 10.0 {
        0.08
    } else if d < THREE_POINT_LINE {
        0.03
    } else {
        0.04
    };
    if contest < 3.0 {
        base * 1.5
    } else {
        base
    }
}

/// Put the ball up. Decides the outcome, launches the flight, logs the
/// attempt, and sends everyone to their crash/box-out spots.
pub fn attempt_shot(state: &mut GameState, shooter: PlayerId) {
    if state.carrier_id() != Some(shooter) {
        return;
    }
    let pos = state.player(shooter).pos;
    let basket = state.attacked_basket();
    let d = pos.distance_to(basket);
    let (contest_defender, contest) = state
        .nearest_defender(pos)
        .map(|(id, dist)| (Some(id), dist))
        .unwrap_or((None, f32::MAX));

    let p = shot_probability(state, shooter, d, contest);
    let will_score = state.rng.chance(p);
    let points: u8 = if d > THREE_POINT_LINE { 3 } else { 2 };

    let mut fouled = state.rng.chance(foul_probability(d, contest));
    let mut miss_type = None;
    if !will_score {
        miss_type = Some(pick_miss_type(state, contest_defender, contest, d));
        if miss_type == Some(MissType::Blocked) {
            // A clean block supersedes the foul roll.
            fouled = false;
        }
    }

    let assist_from = if will_score {
        state
            .last_pass_from
            .filter(|from| from.team == shooter.team && *from != shooter)
            .filter(|_| state.game_time - state.last_pass_time < ASSIST_WINDOW)
    } else {
        None
    };

    stats::record_fga(state, shooter, points == 3);
    let contest_tag = if contest < 5.0 { " (contested)" } else { "" };
    let name = state.player(shooter).player.name.clone();
    log::push(
        state,
        LogEventKind::ShotAttempt,
        format!("{} shoots from {:.0} ft{}", name, d, contest_tag),
    );
    debug!(player = %name, d, p, will_score, "shot attempt");

    playbook::clear_play(state);
    state.player_mut(shooter).has_ball = false;
    state.player_mut(shooter).is_dribbling = false;
    state.ball.launch(Flight {
        from: pos,
        to: basket,
        from_z: SHOT_RELEASE_Z,
        peak_z: shot_peak_z(d),
        end_z: SHOT_END_Z,
        progress: 0.0,
        duration: shot_duration(d),
        kind: FlightKind::Shot(ShotDescriptor {
            shooter,
            points,
            will_score,
            miss_type,
            fouled,
            fouled_by: if fouled { contest_defender } else { None },
            assist_from,
            release_dist: d,
        }),
    });
    state.set_phase(Phase::Shooting);
    set_flight_positioning(state, shooter);
}

/// Miss flavor; a tight contest can turn into a block, credited at release.
fn pick_miss_type(
    state: &mut GameState,
    contest_defender: Option<PlayerId>,
    contest: f32,
    d: f32,
) -> MissType {
    if let Some(blocker) = contest_defender {
        if contest < 3.0 {
            let block_skill = state.player(blocker).player.defense.block as f32 / 100.0;
            if state.rng.chance(0.04 + block_skill * 0.10) {
                stats::record_block(state, blocker);
                let text = format!("{} blocks the shot", state.player(blocker).player.name);
                log::push(state, LogEventKind::Block, text);
                return MissType::Blocked;
            }
        }
    }
    // Long misses spray further; short misses stay around the rim.
    let roll = state.rng.next_f32();
    if d > 15.0 {
        if roll < 0.40 {
            MissType::RimOut
        } else if roll < 0.65 {
            MissType::BackIron
        } else if roll < 0.85 {
            MissType::FrontRim
        } else {
            MissType::Airball
        }
    } else if roll < 0.45 {
        MissType::RimOut
    } else if roll < 0.60 {
        MissType::BackIron
    } else if roll < 0.90 {
        MissType::FrontRim
    } else {
        MissType::Airball
    }
}

/// While the ball is up: offensive bigs crash the glass, guards get back,
/// defenders step between their man and the rim.
fn set_flight_positioning(state: &mut GameState, shooter: PlayerId) {
    let basket = state.attacked_basket();
    let dir = state.attack_dir_now();
    let offense = state.possession;

    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in ids {
        if id == shooter {
            continue;
        }
        if id.team == offense {
            let position = state.player(id).player.position;
            if position.is_big() {
                let jitter = Vec2::new(state.rng.jitter(3.0), state.rng.jitter(3.0));
                state.set_target(id, basket + Vec2::new(-dir * 5.0, 0.0) + jitter);
            } else {
                // Guards drift back toward half court for floor balance.
                let y = state.player(id).pos.y;
                state.set_target(id, Vec2::new(basket.x - dir * 30.0, y));
            }
        } else {
            // Box out: get between the matched opponent and the rim.
            let man = assigned_opponent(state, id);
            let man_pos = state.player(man).pos;
            state.set_target(id, man_pos + (basket - man_pos) * 0.3);
        }
    }
}

/// The defender's man (falling back to the nearest opponent when no
/// assignment exists, e.g. zone).
fn assigned_opponent(state: &GameState, defender: PlayerId) -> PlayerId {
    if let Some(off_index) = state.def_assignments[defender.index as usize] {
        return PlayerId::new(state.possession, off_index);
    }
    state
        .nearest_of_team(state.possession, state.player(defender).pos, None)
        .map(|(id, _)| id)
        .unwrap_or(defender)
}

/// Apply a resolved shot flight: score it, queue free throws, or start the
/// rebound bounce.
pub fn resolve_shot(state: &mut GameState, desc: ShotDescriptor) {
    let shooter = desc.shooter;
    let name = state.player(shooter).player.name.clone();

    if desc.will_score {
        stats::record_fg_make(state, shooter, desc.points, desc.assist_from);
        let label = if desc.points == 3 {
            format!("{} makes the 3-pointer", name)
        } else if desc.release_dist < 5.0 {
            format!("{} makes the layup", name)
        } else {
            format!("{} makes the 2-pointer", name)
        };
        log::push(state, LogEventKind::ShotMade, label);

        if desc.fouled {
            award_free_throws(state, &desc, 1, true);
        } else {
            state.change_possession(shooter.team.opponent(), Phase::Inbound);
        }
        return;
    }

    let miss_type = desc.miss_type.unwrap_or(MissType::RimOut);
    let label = match miss_type {
        MissType::Airball => format!("{} misses badly - airball", name),
        MissType::RimOut => format!("{} misses, rims out", name),
        MissType::BackIron => format!("{} misses off the back iron", name),
        MissType::FrontRim => format!("{} misses short off the front rim", name),
        MissType::Blocked => format!("{} has the shot blocked", name),
    };
    log::push(state, LogEventKind::ShotMissed, label);

    if desc.fouled {
        award_free_throws(state, &desc, desc.points, false);
        return;
    }

    start_rebound(state, &desc, miss_type);
}

fn award_free_throws(state: &mut GameState, desc: &ShotDescriptor, count: u8, and_one: bool) {
    if let Some(fouler) = desc.fouled_by {
        stats::record_foul(state, fouler);
    }
    let name = state.player(desc.shooter).player.name.clone();
    let text = if and_one {
        format!("Shooting foul - AND-ONE for {}", name)
    } else {
        format!("Shooting foul - {} free throws for {}", count, name)
    };
    log::push(state, LogEventKind::ShootingFoul, text);

    state.free_throws = Some(FreeThrowState {
        shooter: desc.shooter,
        total: count,
        taken: 0,
        last_made: false,
        timer: 1.5,
    });
    playbook::clear_play(state);
    state.set_phase(Phase::FreeThrow);
}

/// Kick off the rebound phase with a bounce target drawn from the miss
/// type, measured back along the attack axis from the rim.
fn start_rebound(state: &mut GameState, desc: &ShotDescriptor, miss_type: MissType) {
    let basket = state.attacked_basket();
    let dir = state.attack_dir_now();

    let (origin, target) = match miss_type {
        MissType::Blocked => {
            // Deflected near the shooter, a live scramble ball.
            let shooter_pos = state.player(desc.shooter).pos;
            let off = Vec2::new(state.rng.jitter(6.0), state.rng.jitter(6.0));
            (shooter_pos, clamp_to_court(shooter_pos + off))
        }
        _ => {
            let along = match miss_type {
                MissType::BackIron => state.rng.range_f32(10.0, 16.0),
                MissType::RimOut => state.rng.range_f32(4.0, 10.0),
                MissType::FrontRim => state.rng.range_f32(2.0, 6.0),
                _ => state.rng.range_f32(3.0, 8.0),
            };
            let lateral = match miss_type {
                MissType::BackIron => state.rng.jitter(4.0),
                MissType::RimOut => state.rng.jitter(6.0),
                MissType::FrontRim => state.rng.jitter(3.0),
                _ => state.rng.jitter(5.0),
            };
            let target = basket + Vec2::new(-dir * along, lateral);
            (basket, clamp_to_court(target))
        }
    };

    state.ball.start_bounce(origin, target);
    state.set_phase(Phase::Rebound);
}

fn clamp_to_court(v: Vec2) -> Vec2 {
    Vec2::new(
        v.x.clamp(court::BOUNDS_MARGIN, court::COURT_LENGTH - court::BOUNDS_MARGIN),
        v.y.clamp(court::BOUNDS_MARGIN, court::COURT_WIDTH - court::BOUNDS_MARGIN),
    )
}
