//! The tick-driven spatial simulation core.
//!
//! A host loop calls [`tick`] on a [`GameState`] built by
//! [`init_game_state`] at a fixed cadence (60 ticks per simulated second).
//! Everything else in this module is internal machinery invoked from the
//! tick in a fixed order; see `tick.rs` for the ordering contract.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `geometry` | 2D vector math, point-to-segment distance |
//! | `rng` | Seeded ChaCha8 stream, the only randomness channel |
//! | `court` | Court constants, baskets, named slots |
//! | `player` | On-court player entity and identities |
//! | `kinematics` | Per-tick motion with modifiers and repulsion |
//! | `ball` | Ball entity, flight arcs, rebound bounce |
//! | `roles` | Offensive roles, slot occupancy, spacing |
//! | `playbook` | Named plays, role actions, step triggers |
//! | `defense` | Man/zone/press schemes, screens, help |
//! | `passing` | Lane evaluation, pass types, interception |
//! | `decision` | Ball-handler read-and-react |
//! | `shooting` | Shot probability, fouls, miss physics |
//! | `phase` | Possession state machine |
//! | `clock` | Game/shot/advance clocks and violations |
//! | `stats` | Box-score accumulation |
//! | `log` | Play-by-play writer |
//! | `state` | `GameState` aggregate root |
//! | `snapshot` | Checkpoint/restore |
//! | `tick` | The orchestrator |
//! | `game` | Full-game driver |

pub mod ball;
pub mod clock;
pub mod court;
pub mod decision;
pub mod defense;
pub mod game;
pub mod geometry;
pub mod kinematics;
pub mod log;
pub mod passing;
pub mod phase;
pub mod playbook;
pub mod player;
pub mod rng;
pub mod roles;
pub mod shooting;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod tick;

/// Fixed timestep: 60 ticks per simulated second.
pub const TICK_DT: f32 = 1.0 / 60.0;

pub use ball::{Ball, MissType, PassType};
pub use court::Slot;
pub use game::{run_game, run_game_with, GameResult};
pub use geometry::Vec2;
pub use phase::{Phase, PossessionStage};
pub use playbook::{Play, PlayId, RoleAction};
pub use player::{OffenseRole, PlayerId, SimPlayer};
pub use rng::SimRng;
pub use state::{init_game_state, init_game_state_with, GameState};
pub use tick::tick;

// Team lives with the static models but is part of the engine surface.
pub use crate::models::Team;
