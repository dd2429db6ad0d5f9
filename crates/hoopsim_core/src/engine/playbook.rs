//! The offensive playbook: a static library of named multi-step plays,
//! selection keyed off the offensive tactic, and per-tick execution of the
//! role-to-action bindings of the current step.
//!
//! Plays are data; `GameState` only references them by `PlayId`. Step
//! jitters (screen offsets, roll angles, drive lanes) are drawn from the
//! seeded stream once per step entry so re-applying an action every tick
//! stays stable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::court::Slot;
use super::geometry::Vec2;
use super::player::{OffenseRole, PlayerId};
use super::roles;
use super::state::GameState;
use super::{court, decision, passing, shooting};
use crate::models::OffenseTactic;

/// No step may run longer than this, whatever its trigger says.
pub const STEP_CAP: f32 = 5.0;
/// A pass counts as "just completed" for this long (pass triggers).
const PASS_TRIGGER_WINDOW: f32 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayId {
    HornsPnr,
    Flex,
    UclaCut,
    SpainPnr,
    Floppy,
    SidePnr,
    PostUp,
    IsoClear,
    FastBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDirection {
    Left,
    Right,
    Baseline,
}

/// Action bound to a role for the duration of a play step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoleAction {
    MoveTo(Slot),
    Screen(OffenseRole),
    Cut { from: Slot, to: Slot },
    Drive(DriveDirection),
    Hold,
    PostUp,
    Pop(Slot),
    Roll,
    Relocate,
    PassTo(OffenseRole),
    EntryPass(OffenseRole),
    ShootIfOpen,
    ReadAndReact,
    CallForBall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPredicate {
    /// The ball handler has brought the ball across half court.
    HandlerInFrontcourt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTrigger {
    /// Advance when the step timer reaches the step duration.
    Time,
    /// Advance when a pass completed within the last half second.
    Pass,
    /// Advance when the predicate holds, falling back to the timer.
    Position(StepPredicate),
}

#[derive(Debug, Clone)]
pub struct PlayStep {
    pub duration: f32,
    pub trigger: StepTrigger,
    pub actions: Vec<(OffenseRole, RoleAction)>,
}

#[derive(Debug, Clone)]
pub struct Play {
    pub id: PlayId,
    pub name: &'static str,
    pub steps: Vec<PlayStep>,
}

fn step(duration: f32, trigger: StepTrigger, actions: Vec<(OffenseRole, RoleAction)>) -> PlayStep {
    PlayStep { duration, trigger, actions }
}

static PLAYBOOK: Lazy<Vec<Play>> = Lazy::new(|| {
    use DriveDirection as Dir;
    use OffenseRole::*;
    use RoleAction::*;
    use StepTrigger::*;

    vec![
        Play {
            id: PlayId::HornsPnr,
            name: "Horns PnR",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (Screener, MoveTo(Slot::RightElbow)),
                        (OffenseRole::PostUp, MoveTo(Slot::LeftElbow)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (Spacer, MoveTo(Slot::RightCorner)),
                    ],
                ),
                step(
                    2.5,
                    Time,
                    vec![
                        (Screener, Screen(BallHandler)),
                        (BallHandler, Hold),
                        (OffenseRole::PostUp, Pop(Slot::LeftWing)),
                        (Cutter, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    3.0,
                    Time,
                    vec![
                        (Screener, Roll),
                        (BallHandler, ReadAndReact),
                        (OffenseRole::PostUp, Hold),
                        (Cutter, Relocate),
                        (Spacer, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::Flex,
            name: "Flex",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (Screener, MoveTo(Slot::LowPostL)),
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostR)),
                        (Spacer, MoveTo(Slot::RightWing)),
                    ],
                ),
                step(
                    2.5,
                    Time,
                    vec![
                        (OffenseRole::PostUp, Pop(Slot::RightElbow)),
                        (Screener, Screen(Cutter)),
                        (Cutter, Cut { from: Slot::LeftCorner, to: Slot::LowPostR }),
                        (BallHandler, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    2.5,
                    Time,
                    vec![
                        (BallHandler, ReadAndReact),
                        (Cutter, CallForBall),
                        (Screener, Pop(Slot::LeftWing)),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::UclaCut,
            name: "UCLA Cut",
            steps: vec![
                step(
                    1.5,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (Spacer, MoveTo(Slot::RightWing)),
                        (Screener, MoveTo(Slot::RightElbow)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostL)),
                    ],
                ),
                step(
                    2.0,
                    Pass,
                    vec![
                        (BallHandler, PassTo(Spacer)),
                        (Screener, Hold),
                        (Cutter, Hold),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, CallForBall),
                    ],
                ),
                // After the wing entry the former handler holds the Spacer
                // role and cuts off the elbow back screen.
                step(
                    2.5,
                    Time,
                    vec![
                        (Spacer, Cut { from: Slot::TopKey, to: Slot::LowPostR }),
                        (Screener, Screen(Spacer)),
                        (BallHandler, ReadAndReact),
                        (Cutter, Hold),
                        (OffenseRole::PostUp, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::SpainPnr,
            name: "Spain PnR",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (Screener, MoveTo(Slot::RightElbow)),
                        (Cutter, MoveTo(Slot::RightCorner)),
                        (OffenseRole::PostUp, MoveTo(Slot::LeftCorner)),
                        (Spacer, MoveTo(Slot::LeftWing)),
                    ],
                ),
                step(
                    2.0,
                    Time,
                    vec![
                        (Screener, Screen(BallHandler)),
                        (Cutter, MoveTo(Slot::RightElbow)),
                        (BallHandler, Hold),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    2.0,
                    Time,
                    vec![
                        (Screener, Roll),
                        (Cutter, Screen(Screener)),
                        (BallHandler, ReadAndReact),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    2.0,
                    Time,
                    vec![
                        (Cutter, Pop(Slot::TopKey)),
                        (BallHandler, ReadAndReact),
                        (Screener, Roll),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::Floppy,
            name: "Floppy",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostL)),
                        (Screener, MoveTo(Slot::LeftElbow)),
                        (Cutter, MoveTo(Slot::LowPostR)),
                        (Spacer, MoveTo(Slot::RightCorner)),
                    ],
                ),
                step(
                    2.5,
                    Time,
                    vec![
                        (Cutter, Cut { from: Slot::LowPostR, to: Slot::LeftWing }),
                        (Screener, Screen(Cutter)),
                        (OffenseRole::PostUp, Screen(Cutter)),
                        (BallHandler, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    2.0,
                    Pass,
                    vec![
                        (BallHandler, PassTo(Cutter)),
                        (Cutter, CallForBall),
                        (Screener, Hold),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
                // The shooter now carries the BallHandler role.
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, ShootIfOpen),
                        (Cutter, Relocate),
                        (Screener, Hold),
                        (OffenseRole::PostUp, Hold),
                        (Spacer, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::SidePnr,
            name: "Side PnR",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::RightWing)),
                        (Screener, MoveTo(Slot::RightElbow)),
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostL)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (Spacer, MoveTo(Slot::TopKey)),
                    ],
                ),
                step(
                    2.5,
                    Time,
                    vec![
                        (Screener, Screen(BallHandler)),
                        (BallHandler, Hold),
                        (OffenseRole::PostUp, Hold),
                        (Cutter, Hold),
                        (Spacer, Hold),
                    ],
                ),
                step(
                    3.0,
                    Time,
                    vec![
                        (Screener, Roll),
                        (BallHandler, ReadAndReact),
                        (Spacer, CallForBall),
                        (Cutter, Hold),
                        (OffenseRole::PostUp, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::PostUp,
            name: "Post Up",
            steps: vec![
                step(
                    2.0,
                    Time,
                    vec![
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostR)),
                        (BallHandler, MoveTo(Slot::RightWing)),
                        (Screener, MoveTo(Slot::LeftElbow)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (Spacer, MoveTo(Slot::TopKey)),
                    ],
                ),
                step(
                    2.0,
                    Pass,
                    vec![
                        (BallHandler, EntryPass(OffenseRole::PostUp)),
                        (OffenseRole::PostUp, RoleAction::PostUp),
                        (Screener, Hold),
                        (Cutter, Hold),
                        (Spacer, Hold),
                    ],
                ),
                // The big now holds the BallHandler role and goes to work.
                step(
                    3.0,
                    Time,
                    vec![
                        (BallHandler, ReadAndReact),
                        (OffenseRole::PostUp, Relocate),
                        (Screener, Hold),
                        (Cutter, Hold),
                        (Spacer, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::IsoClear,
            name: "ISO Clear",
            steps: vec![
                step(
                    1.5,
                    Time,
                    vec![
                        (BallHandler, MoveTo(Slot::TopKey)),
                        (Spacer, Relocate),
                        (Screener, MoveTo(Slot::LeftCorner)),
                        (Cutter, MoveTo(Slot::RightCorner)),
                        (OffenseRole::PostUp, MoveTo(Slot::LowPostL)),
                    ],
                ),
                step(
                    4.0,
                    Time,
                    vec![
                        (BallHandler, ReadAndReact),
                        (Spacer, Hold),
                        (Screener, Hold),
                        (Cutter, Hold),
                        (OffenseRole::PostUp, Hold),
                    ],
                ),
            ],
        },
        Play {
            id: PlayId::FastBreak,
            name: "Fast Break",
            steps: vec![
                step(
                    3.0,
                    Position(StepPredicate::HandlerInFrontcourt),
                    vec![
                        (BallHandler, Drive(Dir::Right)),
                        (Cutter, MoveTo(Slot::LeftCorner)),
                        (Spacer, MoveTo(Slot::RightCorner)),
                        (Screener, MoveTo(Slot::TopKey)),
                        (OffenseRole::PostUp, MoveTo(Slot::RightElbow)),
                    ],
                ),
                step(
                    2.0,
                    Time,
                    vec![
                        (BallHandler, ReadAndReact),
                        (Cutter, ShootIfOpen),
                        (Spacer, ShootIfOpen),
                        (Screener, Hold),
                        (OffenseRole::PostUp, Hold),
                    ],
                ),
            ],
        },
    ]
});

pub fn play(id: PlayId) -> &'static Play {
    PLAYBOOK
        .iter()
        .find(|p| p.id == id)
        .expect("playbook contains every PlayId")
}

/// Candidate plays for an offensive tactic.
pub fn candidates(tactic: OffenseTactic) -> &'static [PlayId] {
    match tactic {
        OffenseTactic::FastBreak => &[PlayId::FastBreak],
        OffenseTactic::Iso => &[PlayId::IsoClear],
        OffenseTactic::Inside => &[PlayId::PostUp, PlayId::HornsPnr],
        OffenseTactic::Shoot => {
            &[PlayId::Floppy, PlayId::HornsPnr, PlayId::Flex, PlayId::SpainPnr]
        }
        OffenseTactic::Motion => &[
            PlayId::HornsPnr,
            PlayId::SidePnr,
            PlayId::UclaCut,
            PlayId::Flex,
            PlayId::SpainPnr,
            PlayId::Floppy,
        ],
    }
}

/// Pick a play uniformly from the tactic's candidate set and start it.
pub fn select_play(state: &mut GameState) {
    let options = candidates(state.offense_tactic());
    let idx = state.rng.pick_index(options.len());
    start_play(state, options[idx]);
}

pub fn start_play(state: &mut GameState, id: PlayId) {
    state.current_play = Some(id);
    state.current_step = 0;
    state.step_timer = 0.0;
    redraw_step_jitters(state);
}

pub fn clear_play(state: &mut GameState) {
    state.current_play = None;
    state.current_step = 0;
    state.step_timer = 0.0;
}

fn redraw_step_jitters(state: &mut GameState) {
    for i in 0..state.step_jitters.len() {
        state.step_jitters[i] = state.rng.jitter(1.0);
    }
}

/// Execute one tick of the current play: apply the active step's actions
/// and evaluate its advancement trigger. Returns true while a play runs.
pub fn run_current_play(state: &mut GameState, dt: f32) -> bool {
    let Some(play_id) = state.current_play else {
        return false;
    };
    let play = play(play_id);
    if state.current_step >= play.steps.len() {
        clear_play(state);
        return false;
    }

    state.step_timer += dt;
    let step = &play.steps[state.current_step];
    let actions = step.actions.clone();
    for (role, action) in actions {
        let holders: Vec<PlayerId> = state
            .team_players(state.possession)
            .filter(|p| state.roles[p.id.global()] == Some(role))
            .map(|p| p.id)
            .collect();
        for id in holders {
            apply_action(state, id, action);
        }
    }
    // A shot or turnover inside an action ends the play immediately.
    if state.current_play.is_none() {
        return false;
    }

    let advance = step_should_advance(state, step);
    if advance {
        state.current_step += 1;
        state.step_timer = 0.0;
        if state.current_step >= play.steps.len() {
            clear_play(state);
            return false;
        }
        redraw_step_jitters(state);
    }
    true
}

fn step_should_advance(state: &GameState, step: &PlayStep) -> bool {
    if state.step_timer >= STEP_CAP {
        return true;
    }
    match step.trigger {
        StepTrigger::Time => state.step_timer >= step.duration,
        StepTrigger::Pass => {
            state.game_time - state.last_pass_time <= PASS_TRIGGER_WINDOW
                && state.last_pass_time > 0.0
        }
        StepTrigger::Position(pred) => {
            eval_predicate(state, pred) || state.step_timer >= step.duration
        }
    }
}

fn eval_predicate(state: &GameState, pred: StepPredicate) -> bool {
    match pred {
        StepPredicate::HandlerInFrontcourt => state
            .carrier_id()
            .map(|id| !court::in_backcourt(state.possession, state.player(id).pos.x))
            .unwrap_or(false),
    }
}

/// Apply one role action to one player for this tick.
pub fn apply_action(state: &mut GameState, id: PlayerId, action: RoleAction) {
    match action {
        RoleAction::MoveTo(slot) => {
            if state.slot_holder(slot).map(|h| h == id).unwrap_or(true) {
                state.claim_slot(id, slot);
                let coords = state.slot_coords(slot);
                state.set_target(id, coords);
            }
        }
        RoleAction::Pop(slot) => {
            if state.slot_holder(slot).map(|h| h == id).unwrap_or(true) {
                state.claim_slot(id, slot);
                let coords = state.slot_coords(slot);
                state.set_target(id, coords);
            }
        }
        RoleAction::Screen(target_role) => {
            if let Some(target) = roles::player_with_role(state, target_role) {
                if target != id {
                    let basket = state.attacked_basket();
                    let target_pos = state.player(target).pos;
                    let to_basket = (basket - target_pos).normalized();
                    let lateral = Vec2::new(-to_basket.y, to_basket.x);
                    let jitter = state.step_jitters[id.global()] * 3.0;
                    let spot = target_pos + to_basket * 3.0 + lateral * jitter;
                    state.set_target(id, spot);
                    state.player_mut(id).is_screening = true;
                }
            }
        }
        RoleAction::Cut { from, to } => {
            if state.player(id).current_slot == Some(from) {
                state.release_slot_of(id);
            }
            if state.slot_holder(to).map(|h| h == id).unwrap_or(true) {
                state.claim_slot(id, to);
            }
            let coords = state.slot_coords(to);
            state.set_target(id, coords);
            state.player_mut(id).is_cutting = true;
        }
        RoleAction::Drive(dir) => {
            let basket = state.attacked_basket();
            let attack = state.attack_dir_now();
            let dy = match dir {
                DriveDirection::Left => -6.0 * attack,
                DriveDirection::Right => 6.0 * attack,
                DriveDirection::Baseline => 0.0,
            };
            state.set_target(id, Vec2::new(basket.x, basket.y + dy));
            let has_ball = state.carrier_id() == Some(id);
            if has_ball {
                state.player_mut(id).is_dribbling = true;
                let close = state.player(id).pos.distance_to(basket) < 5.0;
                if close && state.player(id).can_act() {
                    shooting::attempt_shot(state, id);
                }
            } else {
                state.player_mut(id).is_cutting = true;
            }
        }
        RoleAction::Roll => {
            // Dive to eight feet in front of the rim; the slot is abandoned
            // so the spacing passes do not drag the roller back out.
            let basket = state.attacked_basket();
            let dir = state.attack_dir_now();
            let jitter = state.step_jitters[id.global()] * 3.0;
            state.release_slot_of(id);
            state.set_target(id, Vec2::new(basket.x - dir * 8.0, basket.y + jitter));
            state.player_mut(id).is_cutting = true;
        }
        RoleAction::Hold => {
            let pos = state.player(id).pos;
            state.set_target(id, pos);
        }
        RoleAction::PostUp => {
            let slot = match state.player(id).current_slot {
                Some(s) => Some(s),
                None => {
                    let pos = state.player(id).pos;
                    state.nearest_free_slot(pos)
                }
            };
            if let Some(slot) = slot {
                state.claim_slot(id, slot);
                let coords = state.slot_coords(slot);
                state.set_target(id, coords);
            }
        }
        RoleAction::Relocate => {
            let pos = state.player(id).pos;
            if state.player(id).current_slot.is_none() {
                if let Some(slot) = state.nearest_free_slot(pos) {
                    state.claim_slot(id, slot);
                    let coords = state.slot_coords(slot);
                    state.set_target(id, coords);
                }
            }
        }
        RoleAction::PassTo(target_role) => {
            if state.carrier_id() == Some(id) && state.player(id).can_act() {
                if let Some(target) = roles::player_with_role(state, target_role) {
                    if target != id {
                        passing::execute_pass(state, id, target);
                    }
                }
            }
        }
        RoleAction::EntryPass(target_role) => {
            if state.carrier_id() == Some(id) && state.player(id).can_act() {
                if let Some(target) = roles::player_with_role(state, target_role) {
                    let from = state.player(id).pos;
                    let to = state.player(target).pos;
                    if target != id && !passing::lane_blocked(state, from, to) {
                        passing::execute_pass(state, id, target);
                    }
                }
            }
        }
        RoleAction::ShootIfOpen => {
            if state.carrier_id() == Some(id) && state.player(id).can_act() {
                let pos = state.player(id).pos;
                if state.nearest_defender_dist(pos) > 6.0 {
                    shooting::attempt_shot(state, id);
                }
            }
        }
        RoleAction::ReadAndReact => {
            if state.carrier_id() == Some(id) && state.player(id).can_act() {
                decision::read_and_react(state, id);
            }
        }
        RoleAction::CallForBall => {
            if state.carrier_id() != Some(id) {
                state.call_for_ball = Some(id);
            }
        }
    }
}
