//! Defensive schemes: man assignments with gap control, 2-3 zone spots,
//! press pickup, screen navigation, and help-and-rotate.
//!
//! Positioning runs only in the half-court phases; during inbound and
//! advance the phase handlers call `retreat` instead (press excepted, it
//! picks up full court).

use super::court;
use super::geometry::Vec2;
use super::player::PlayerId;
use super::state::GameState;
use crate::models::{DefenseTactic, Team};

/// Ball handlers inside this range of the rim trigger help rotation.
const HELP_TRIGGER_DIST: f32 = 15.0;
/// Screen navigation reacts to screeners within this range of a defender.
const SCREEN_RANGE: f32 = 4.0;
/// Screen checks happen on decision ticks to bound the switch draws.
const SCREEN_CHECK_INTERVAL: u32 = 30;

/// 2-3 zone spots as offsets from the defended basket (attack-relative x).
const ZONE_SPOTS: [(f32, f32); 5] = [
    (-17.0, -7.0),
    (-17.0, 7.0),
    (-7.0, -10.0),
    (-7.0, 10.0),
    (-5.0, 0.0),
];

fn defending_team(state: &GameState) -> Team {
    state.possession.opponent()
}

/// Per-tick defensive positioning for the half-court phases.
pub fn update(state: &mut GameState) {
    match state.defense_tactic() {
        DefenseTactic::Man | DefenseTactic::Press | DefenseTactic::Gamble => {
            ensure_man_assignments(state);
            position_man(state);
        }
        DefenseTactic::Zone | DefenseTactic::Fortress => {
            // Zone carries no per-player assignments.
            state.def_assignments = [None; 5];
            position_zone(state);
        }
    }
}

/// Assign by roster index: defender i checks offensive player i.
pub fn ensure_man_assignments(state: &mut GameState) {
    if state.def_assignments.iter().all(|a| a.is_some()) {
        return;
    }
    for i in 0..5 {
        state.def_assignments[i] = Some(i as u8);
    }
}

fn position_man(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        return;
    };
    let defense = defending_team(state);
    let basket = state.attacked_basket();
    let handler_pos = state.player(carrier).pos;
    let deny_fraction =
        if state.defense_tactic() == DefenseTactic::Gamble { 0.6 } else { 0.4 };

    for def_index in 0..5u8 {
        let defender = PlayerId::new(defense, def_index);
        let Some(off_index) = state.def_assignments[def_index as usize] else {
            continue;
        };
        let man = PlayerId::new(state.possession, off_index);
        let man_pos = state.player(man).pos;

        if man == carrier {
            // On-ball: sit goal-side at a skill-scaled gap.
            let perimeter = state.player(defender).player.defense.perimeter as f32 / 100.0;
            let gap = 4.0 - 1.5 * perimeter;
            let target = handler_pos + (basket - handler_pos).normalized() * gap;
            state.set_target(defender, target);
            state.player_mut(defender).is_defensive_sliding = true;
        } else if man_pos.distance_to(handler_pos) < 15.0 {
            // One pass away: deny up the line.
            let target = man_pos + (handler_pos - man_pos) * deny_fraction;
            state.set_target(defender, target);
        } else {
            // Two passes away: sag toward the rim, deeper on the weak side.
            let fraction = if man_pos.distance_to(handler_pos) > 20.0 { 0.4 } else { 0.3 };
            let target = man_pos + (basket - man_pos) * fraction;
            state.set_target(defender, target);
        }
    }
}

fn position_zone(state: &mut GameState) {
    let defense = defending_team(state);
    let basket = state.attacked_basket();
    let dir = state.attack_dir_now();
    let fortress = state.defense_tactic() == DefenseTactic::Fortress;
    let paint_center = basket + Vec2::new(-dir * 8.0, 0.0);

    // Spots shade two feet toward the ball side.
    let ball_shift = if state.ball.pos.y > court::COURT_WIDTH / 2.0 { 2.0 } else { -2.0 };

    for def_index in 0..5u8 {
        let defender = PlayerId::new(defense, def_index);
        let (dx, dy) = ZONE_SPOTS[def_index as usize];
        let mut spot = Vec2::new(basket.x + dx * dir, basket.y + dy + ball_shift);
        if fortress {
            // Collapse each spot three feet toward the paint.
            let pull = (paint_center - spot).normalized() * 3.0;
            spot = spot + pull;
        }
        state.set_target(defender, spot);
    }
}

/// Switch or fight through active screens (man schemes only, checked on
/// decision ticks).
pub fn handle_screens(state: &mut GameState) {
    if !state.defense_tactic().is_man_scheme() {
        return;
    }
    if state.phase_ticks % SCREEN_CHECK_INTERVAL != 0 {
        return;
    }
    let defense = defending_team(state);

    let screeners: Vec<PlayerId> = state
        .team_players(state.possession)
        .filter(|p| p.is_screening)
        .map(|p| p.id)
        .collect();

    for screener in screeners {
        let screener_pos = state.player(screener).pos;
        // Defender being screened: close to the screener but not guarding him.
        let screened = (0..5u8)
            .map(|i| PlayerId::new(defense, i))
            .filter(|d| state.def_assignments[d.index as usize] != Some(screener.index))
            .map(|d| (d, state.player(d).pos.distance_to(screener_pos)))
            .filter(|(_, dist)| *dist < SCREEN_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(d, _)| d);
        let Some(screened_def) = screened else {
            continue;
        };
        let screener_def = (0..5u8)
            .map(|i| PlayerId::new(defense, i))
            .find(|d| state.def_assignments[d.index as usize] == Some(screener.index));

        if let Some(screener_def) = screener_def {
            if state.rng.chance(0.5) {
                // Switch: trade the two assignments.
                state
                    .def_assignments
                    .swap(screened_def.index as usize, screener_def.index as usize);
                continue;
            }
        }
        // Fight through: chase the man on a path past the screen.
        if let Some(off_index) = state.def_assignments[screened_def.index as usize] {
            let man = PlayerId::new(state.possession, off_index);
            let man_pos = state.player(man).pos;
            let away_from_screen = (man_pos - screener_pos).normalized();
            state.set_target(screened_def, man_pos + away_from_screen * 3.0);
        }
    }
}

/// Help-and-rotate when the ball gets to the rim (man schemes).
pub fn help_rotate(state: &mut GameState) {
    if !state.defense_tactic().is_man_scheme() {
        return;
    }
    let Some(carrier) = state.carrier_id() else {
        return;
    };
    let basket = state.attacked_basket();
    let handler_pos = state.player(carrier).pos;
    if handler_pos.distance_to(basket) > HELP_TRIGGER_DIST {
        return;
    }
    let defense = defending_team(state);
    let ball_defender = (0..5u8)
        .map(|i| PlayerId::new(defense, i))
        .find(|d| state.def_assignments[d.index as usize] == Some(carrier.index));

    // Rank off-ball defenders by distance to the rim.
    let mut helpers: Vec<(PlayerId, f32)> = (0..5u8)
        .map(|i| PlayerId::new(defense, i))
        .filter(|d| Some(*d) != ball_defender)
        .map(|d| (d, state.player(d).pos.distance_to(basket)))
        .collect();
    helpers.sort_by(|a, b| a.1.total_cmp(&b.1));

    let Some(&(helper, _)) = helpers.first() else {
        return;
    };
    state.set_target(helper, handler_pos.lerp(basket, 0.5));

    // First rotator splits toward the helper's abandoned man.
    let abandoned = state.def_assignments[helper.index as usize]
        .map(|i| PlayerId::new(state.possession, i));
    if let (Some(&(rotator, _)), Some(abandoned)) = (helpers.get(1), abandoned) {
        let man_pos = state.player(abandoned).pos;
        state.set_target(rotator, man_pos + (basket - man_pos) * 0.3);

        // Second rotator covers the first rotator's man.
        let second_abandoned = state.def_assignments[rotator.index as usize]
            .map(|i| PlayerId::new(state.possession, i));
        if let (Some(&(third, _)), Some(second_abandoned)) = (helpers.get(2), second_abandoned) {
            let man_pos = state.player(second_abandoned).pos;
            state.set_target(third, man_pos + (basket - man_pos) * 0.4);
        }
    }
}

/// Transition defense for inbound/advance. Press picks up full court;
/// every other scheme drops back in front of the defended rim.
pub fn retreat(state: &mut GameState) {
    let defense = defending_team(state);
    let basket = state.attacked_basket();
    let dir = state.attack_dir_now();

    if state.tactics_of(defense).defense == DefenseTactic::Press {
        ensure_man_assignments(state);
        for def_index in 0..5u8 {
            let defender = PlayerId::new(defense, def_index);
            if let Some(off_index) = state.def_assignments[def_index as usize] {
                let man = PlayerId::new(state.possession, off_index);
                let man_pos = state.player(man).pos;
                // Full-court pickup: body up goal-side of the man.
                let target = man_pos + (basket - man_pos).normalized() * 2.5;
                state.set_target(defender, target);
                state.player_mut(defender).is_defensive_sliding = true;
            }
        }
        return;
    }

    const RETREAT_SPOTS: [(f32, f32); 5] =
        [(-18.0, 0.0), (-14.0, -8.0), (-14.0, 8.0), (-8.0, -4.0), (-6.0, 4.0)];
    for def_index in 0..5u8 {
        let defender = PlayerId::new(defense, def_index);
        let (dx, dy) = RETREAT_SPOTS[def_index as usize];
        state.set_target(defender, Vec2::new(basket.x + dx * dir, basket.y + dy));
        state.player_mut(defender).is_defensive_sliding = false;
    }
}

/// Nearest defender hounding the carrier takes a steal check every five
/// seconds of action (doubled odds for the gambling scheme).
pub fn steal_check(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        return;
    };
    let carrier_pos = state.player(carrier).pos;
    let Some((defender, dist)) = state.nearest_defender(carrier_pos) else {
        return;
    };
    if dist > 2.5 {
        return;
    }
    let steal_skill = state.player(defender).player.defense.steal as f32 / 100.0;
    let mut p = 0.001 + steal_skill * 0.012;
    if state.defense_tactic() == DefenseTactic::Gamble {
        p *= 2.0;
    }
    if state.rng.chance(p) {
        super::stats::record_steal(state, defender, carrier);
        let text = format!(
            "{} strips {}",
            state.player(defender).player.name.clone(),
            state.player(carrier).player.name.clone()
        );
        super::log::push(state, crate::models::LogEventKind::Steal, text);
        state.change_possession(defender.team, super::phase::Phase::Advance);
        state.give_ball_to(defender);
    }
}
