//! Per-tick player motion: acceleration-limited steering toward
//! `target_pos` with state-dependent speed modifiers, pairwise collision
//! repulsion, boundary clamping, and fatigue accrual.

use super::court::{BOUNDS_MARGIN, COURT_LENGTH, COURT_WIDTH};
use super::geometry::Vec2;
use super::player::SimPlayer;

/// Players closer than this to their target damp to a stop.
const ARRIVAL_THRESHOLD: f32 = 0.3;
/// Distance at which the arrival slowdown zone begins.
const ARRIVAL_ZONE: f32 = 5.0;
/// Distance past which a move counts as a transition sprint.
const SPRINT_DISTANCE: f32 = 25.0;
/// Continuous sprint seconds before the sprint-fatigue penalty applies.
const SPRINT_FATIGUE_AFTER: f32 = 4.0;
/// Minimum separation enforced by the repulsion pass.
const SEPARATION: f32 = 2.5;

/// Move every player one tick. Handlers have already set `target_pos` and
/// the transient state flags for this tick.
pub fn move_players(players: &mut [SimPlayer], dt: f32) {
    for p in players.iter_mut() {
        step_player(p, dt);
    }
    apply_separation(players, dt);
    for p in players.iter_mut() {
        p.pos.x = p.pos.x.clamp(BOUNDS_MARGIN, COURT_LENGTH - BOUNDS_MARGIN);
        p.pos.y = p.pos.y.clamp(BOUNDS_MARGIN, COURT_WIDTH - BOUNDS_MARGIN);
        accrue_fatigue(p, dt);
    }
}

fn step_player(p: &mut SimPlayer, dt: f32) {
    let to_target = p.target_pos - p.pos;
    let d = to_target.length();

    if d < ARRIVAL_THRESHOLD {
        p.vel = p.vel * 0.8;
        p.sprint_timer = (p.sprint_timer - dt).max(0.0);
        p.pos += p.vel * dt;
        return;
    }

    let speed = desired_speed(p, d);
    let desired_vel = to_target.normalized() * speed;

    // Ease velocity toward the desired vector, limited by acceleration
    let accel = 5.0 + (p.player.athletics.acceleration as f32 / 100.0) * 15.0;
    let blend = (accel * dt * 0.4).min(1.0);
    p.vel = p.vel + (desired_vel - p.vel) * blend;
    p.pos += p.vel * dt;

    if d > SPRINT_DISTANCE {
        p.sprint_timer += dt;
    } else if d < ARRIVAL_ZONE {
        p.sprint_timer = (p.sprint_timer - dt).max(0.0);
    }
}

/// Base speed from the speed rating, degraded by fatigue, then scaled by
/// every active state modifier.
fn desired_speed(p: &SimPlayer, dist_to_target: f32) -> f32 {
    let base = 4.0 + (p.player.athletics.speed as f32 / 100.0) * 18.0;
    let mut speed = base * (1.0 - 0.3 * p.fatigue);

    if p.is_defensive_sliding {
        speed *= 0.6 + 0.2 * (p.player.defense.perimeter as f32 / 100.0);
    }
    if p.is_cutting {
        speed *= 1.2;
    }
    if p.is_dribbling {
        speed *= 0.8;
    }
    if p.catch_timer > 0.0 {
        speed *= 0.3;
    }
    if dist_to_target > SPRINT_DISTANCE {
        speed *= 1.15;
    }
    if dist_to_target < ARRIVAL_ZONE {
        speed *= 0.7;
    }
    if p.sprint_timer > SPRINT_FATIGUE_AFTER {
        speed *= 0.85;
    }
    speed
}

/// Pairwise positional repulsion. No momentum transfer: velocities are
/// untouched, only positions are nudged apart.
fn apply_separation(players: &mut [SimPlayer], dt: f32) {
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let delta = players[j].pos - players[i].pos;
            let d = delta.length();
            if d >= SEPARATION || d < 1e-6 {
                continue;
            }
            let push = (SEPARATION - d) * 0.3 * dt;
            let dir = delta.normalized();
            players[i].pos += dir * -(push * 0.5);
            players[j].pos += dir * (push * 0.5);
        }
    }
}

fn accrue_fatigue(p: &mut SimPlayer, dt: f32) {
    let stamina = p.player.athletics.stamina as f32 / 100.0;
    p.fatigue = (p.fatigue + dt * 0.001 * (1.0 - stamina)).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::player::PlayerId;
    use crate::models::{Team, TeamRoster};

    const DT: f32 = 1.0 / 60.0;

    fn make_player(index: u8, pos: Vec2) -> SimPlayer {
        let roster = TeamRoster::default_for(Team::Home);
        let mut p = SimPlayer::new(
            PlayerId::new(Team::Home, index),
            roster.players[index as usize].clone(),
            pos,
        );
        p.target_pos = pos;
        p
    }

    #[test]
    fn test_player_moves_toward_target() {
        let mut players = vec![make_player(0, Vec2::new(20.0, 25.0))];
        players[0].target_pos = Vec2::new(40.0, 25.0);
        for _ in 0..60 {
            move_players(&mut players, DT);
        }
        assert!(players[0].pos.x > 25.0, "should cover ground in one second");
        assert!(players[0].pos.x < 40.0, "should not teleport");
    }

    #[test]
    fn test_arrival_damps_velocity() {
        let mut players = vec![make_player(0, Vec2::new(20.0, 25.0))];
        players[0].target_pos = Vec2::new(20.1, 25.0);
        players[0].vel = Vec2::new(8.0, 0.0);
        move_players(&mut players, DT);
        assert!(players[0].vel.length() < 8.0);
    }

    #[test]
    fn test_dribbling_is_slower_than_running(){
        let mut runner = vec![make_player(0, Vec2::new(20.0, 20.0))];
        runner[0].target_pos = Vec2::new(40.0, 20.0);
        let mut dribbler = vec![make_player(0, Vec2::new(20.0, 20.0))];
        dribbler[0].target_pos = Vec2::new(40.0, 20.0);
        for _ in 0..60 {
            dribbler[0].is_dribbling = true;
            move_players(&mut runner, DT);
            move_players(&mut dribbler, DT);
        }
        assert!(runner[0].pos.x > dribbler[0].pos.x);
    }

    #[test]
    fn test_separation_pushes_overlapping_players_apart() {
        let mut players =
            vec![make_player(0, Vec2::new(30.0, 25.0)), make_player(1, Vec2::new(30.5, 25.0))];
        let before = players[0].pos.distance_to(players[1].pos);
        for _ in 0..120 {
            move_players(&mut players, DT);
        }
        let after = players[0].pos.distance_to(players[1].pos);
        assert!(after > before, "repulsion should separate {} -> {}", before, after);
    }

    #[test]
    fn test_positions_stay_clamped() {
        let mut players = vec![make_player(0, Vec2::new(2.0, 2.0))];
        players[0].target_pos = Vec2::new(-20.0, -20.0);
        for _ in 0..240 {
            move_players(&mut players, DT);
        }
        assert!(players[0].pos.x >= BOUNDS_MARGIN);
        assert!(players[0].pos.y >= BOUNDS_MARGIN);
    }

    #[test]
    fn test_fatigue_accrues_and_saturates() {
        let mut players = vec![make_player(0, Vec2::new(20.0, 25.0))];
        players[0].player.athletics.stamina = 0;
        for _ in 0..600 {
            move_players(&mut players, DT);
        }
        let f = players[0].fatigue;
        assert!(f > 0.0 && f <= 1.0);
        // 10 seconds at stamina 0 accrues ~0.01
        assert!((f - 0.01).abs() < 0.002, "fatigue {}", f);
    }

    #[test]
    fn test_sprint_timer_tracks_long_moves() {
        let mut players = vec![make_player(0, Vec2::new(5.0, 25.0))];
        players[0].target_pos = Vec2::new(90.0, 25.0);
        for _ in 0..60 {
            move_players(&mut players, DT);
        }
        assert!(players[0].sprint_timer > 0.5);
    }
}
