//! Offensive role assignment and slot housekeeping.
//!
//! Roles are reassigned from scratch whenever no play is active; while a
//! play runs they stay stable except that `BallHandler` follows the ball
//! (the previous handler inherits the new handler's former role).

use super::player::{OffenseRole, PlayerId};
use super::state::GameState;
use crate::models::{OffenseTactic, Position};

/// Players closer than this are considered cramped by the spacing pass.
const SPACING_MIN: f32 = 10.0;

/// First offensive player currently holding `role`.
pub fn player_with_role(state: &GameState, role: OffenseRole) -> Option<PlayerId> {
    state
        .team_players(state.possession)
        .find(|p| state.roles[p.id.global()] == Some(role))
        .map(|p| p.id)
}

fn set_role(state: &mut GameState, id: PlayerId, role: OffenseRole) {
    state.roles[id.global()] = Some(role);
    state.player_mut(id).current_role = Some(role);
}

/// Keep the role table consistent with the ball. Full reassignment when no
/// play is active; handler-swap only while one runs.
pub fn update_roles(state: &mut GameState) {
    let Some(carrier) = state.carrier_id() else {
        return;
    };
    if carrier.team != state.possession {
        return;
    }

    if state.current_play.is_some() {
        follow_ball(state, carrier);
    } else {
        assign_roles(state, carrier);
    }
}

/// The ballHandler role tracks the carrier; the old handler takes over
/// whatever role the new carrier held.
fn follow_ball(state: &mut GameState, carrier: PlayerId) {
    if state.roles[carrier.global()] == Some(OffenseRole::BallHandler) {
        return;
    }
    let previous = player_with_role(state, OffenseRole::BallHandler);
    let vacated = state.roles[carrier.global()].unwrap_or(OffenseRole::Spacer);
    if let Some(prev) = previous {
        set_role(state, prev, vacated);
    }
    set_role(state, carrier, OffenseRole::BallHandler);
}

/// Fresh assignment from positions and tactic.
fn assign_roles(state: &mut GameState, carrier: PlayerId) {
    for idx in 0..state.players.len() {
        if PlayerId::from_global(idx).team == state.possession {
            state.roles[idx] = None;
            state.players[idx].current_role = None;
        }
    }
    set_role(state, carrier, OffenseRole::BallHandler);

    let iso_superstar = state.offense_tactic() == OffenseTactic::Iso
        && state.player(carrier).player.is_superstar;

    let mut remaining: Vec<PlayerId> = state
        .team_players(state.possession)
        .filter(|p| p.id != carrier)
        .map(|p| p.id)
        .collect();

    if iso_superstar {
        for id in remaining {
            set_role(state, id, OffenseRole::Spacer);
        }
        return;
    }

    // Screener: the center if present, else the power forward.
    let screener = remaining
        .iter()
        .copied()
        .find(|id| state.player(*id).player.position == Position::C)
        .or_else(|| {
            remaining
                .iter()
                .copied()
                .find(|id| state.player(*id).player.position == Position::PF)
        });
    if let Some(id) = screener {
        set_role(state, id, OffenseRole::Screener);
        remaining.retain(|r| *r != id);
    }

    // Post-up: the second big, skipped when there is none.
    let post = remaining
        .iter()
        .copied()
        .find(|id| state.player(*id).player.position.is_big());
    if let Some(id) = post {
        set_role(state, id, OffenseRole::PostUp);
        remaining.retain(|r| *r != id);
    }

    // Cutter: fastest of whoever is left.
    let cutter = remaining
        .iter()
        .copied()
        .max_by_key(|id| state.player(*id).player.athletics.speed);
    if let Some(id) = cutter {
        set_role(state, id, OffenseRole::Cutter);
        remaining.retain(|r| *r != id);
    }

    for id in remaining {
        set_role(state, id, OffenseRole::Spacer);
    }
}

/// Starting spacing for the setup phase: handler on top, bigs inside,
/// wings filled nearest-first.
pub fn assign_initial_slots(state: &mut GameState) {
    use super::court::Slot;

    let order: Vec<(PlayerId, Option<OffenseRole>)> = state
        .team_players(state.possession)
        .map(|p| (p.id, state.roles[p.id.global()]))
        .collect();

    for (id, role) in &order {
        let preferred = match role {
            Some(OffenseRole::BallHandler) => Slot::TopKey,
            Some(OffenseRole::Screener) => Slot::RightElbow,
            Some(OffenseRole::PostUp) => Slot::LowPostL,
            Some(OffenseRole::Cutter) => Slot::LeftCorner,
            _ => Slot::LeftWing,
        };
        let slot = if state.slot_holder(preferred).is_none() {
            Some(preferred)
        } else {
            state.nearest_free_slot(state.slot_coords(preferred))
        };
        if let Some(slot) = slot {
            state.claim_slot(*id, slot);
            let coords = state.slot_coords(slot);
            state.set_target(*id, coords);
        }
    }
}

/// Give every slotless off-ball player the nearest free slot. Also repairs
/// any table desynchronization lazily.
pub fn fill_empty_slots(state: &mut GameState) {
    // Drop table entries whose player no longer points back at the slot.
    for slot in super::court::Slot::ALL {
        if let Some(holder) = state.slots[slot.index()] {
            if state.player(holder).current_slot != Some(slot) {
                state.slots[slot.index()] = None;
            }
        }
    }

    let carrier = state.carrier_id();
    let ids: Vec<PlayerId> = state
        .team_players(state.possession)
        .filter(|p| Some(p.id) != carrier && p.current_slot.is_none())
        .filter(|p| !p.is_cutting && !p.is_screening)
        .map(|p| p.id)
        .collect();
    for id in ids {
        let pos = state.player(id).pos;
        if let Some(slot) = state.nearest_free_slot(pos) {
            state.claim_slot(id, slot);
            let coords = state.slot_coords(slot);
            state.set_target(id, coords);
        }
    }
}

/// Relocate the more fatigued of any two cramped off-ball teammates.
/// Players mid-cut or mid-screen are supposed to be tight; leave them be.
pub fn enforce_floor_spacing(state: &mut GameState) {
    let carrier = state.carrier_id();
    let ids: Vec<PlayerId> = state
        .team_players(state.possession)
        .filter(|p| Some(p.id) != carrier)
        .filter(|p| !p.is_cutting && !p.is_screening)
        .map(|p| p.id)
        .collect();

    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            let (a, b) = (ids[i], ids[j]);
            let d = state.player(a).pos.distance_to(state.player(b).pos);
            if d >= SPACING_MIN {
                continue;
            }
            let mover =
                if state.player(a).fatigue >= state.player(b).fatigue { a } else { b };
            let pos = state.player(mover).pos;
            if let Some(slot) = state.nearest_free_slot(pos) {
                state.claim_slot(mover, slot);
                let coords = state.slot_coords(slot);
                state.set_target(mover, coords);
            }
        }
    }
}

/// Off-ball players sit down in their slots while the handler works.
pub fn off_ball_movement(state: &mut GameState) {
    let carrier = state.carrier_id();
    let ids: Vec<PlayerId> = state
        .team_players(state.possession)
        .filter(|p| Some(p.id) != carrier)
        .map(|p| p.id)
        .collect();
    for id in ids {
        if let Some(slot) = state.player(id).current_slot {
            // Only nudge players that are not mid-action this tick.
            let p = state.player(id);
            if !p.is_cutting && !p.is_screening {
                let coords = state.slot_coords(slot);
                state.set_target(id, coords);
            }
        }
    }
}
