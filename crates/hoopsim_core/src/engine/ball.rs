//! Ball entity and flight physics.
//!
//! In-flight motion is a linear XY interpolation with a quadratic Bezier
//! vertical arc; post-miss rebounds use a damped cosine bounce. At any
//! moment the ball is in exactly one of three modes: carried, in flight,
//! or bouncing.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;
use super::player::PlayerId;

/// Ball height while being dribbled.
pub const CARRY_HEIGHT: f32 = 4.0;
/// Vertical arc endpoint for passes.
pub const PASS_END_Z: f32 = 5.0;
/// Vertical arc endpoint for shots (rim height).
pub const SHOT_END_Z: f32 = 10.0;
/// Release height for shots.
pub const SHOT_RELEASE_Z: f32 = 6.5;
/// Bounce progress advanced per tick during a rebound.
pub const BOUNCE_STEP: f32 = 0.013;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PassType {
    Chest,
    Bounce,
    Lob,
    Overhead,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MissType {
    RimOut,
    BackIron,
    Airball,
    FrontRim,
    Blocked,
}

/// Outcome decided at release and revealed when the flight resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotDescriptor {
    pub shooter: PlayerId,
    pub points: u8,
    pub will_score: bool,
    /// Set when the shot will miss.
    pub miss_type: Option<MissType>,
    pub fouled: bool,
    pub fouled_by: Option<PlayerId>,
    /// Credited on a make when the catch-to-shoot window was short enough.
    pub assist_from: Option<PlayerId>,
    /// Distance from basket at release; decides 2 vs 3.
    pub release_dist: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FlightKind {
    Pass {
        pass_type: PassType,
        /// Landing-point receiver. May belong to the defense when the
        /// pass was intercepted.
        receiver: PlayerId,
        from_player: PlayerId,
    },
    Shot(ShotDescriptor),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub from: Vec2,
    pub to: Vec2,
    pub from_z: f32,
    pub peak_z: f32,
    pub end_z: f32,
    /// Progress in [0, 1].
    pub progress: f32,
    /// Total flight time in seconds.
    pub duration: f32,
    pub kind: FlightKind,
}

/// Damped bounce after a missed shot. The landing target is known up
/// front so rebounders can position against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bounce {
    pub origin: Vec2,
    pub target: Vec2,
    pub t: f32,
}

impl Bounce {
    /// z = 10 * e^(-3t) * |cos(6 pi t)|
    pub fn height(&self) -> f32 {
        10.0 * (-3.0 * self.t).exp() * (6.0 * std::f32::consts::PI * self.t).cos().abs()
    }

    pub fn settled(&self) -> bool {
        self.t >= 1.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Height in feet (0 = floor, 10 = rim).
    pub z: f32,
    pub carrier: Option<PlayerId>,
    pub flight: Option<Flight>,
    pub bounce: Option<Bounce>,
}

impl Ball {
    pub fn at(pos: Vec2) -> Ball {
        Ball { pos, z: CARRY_HEIGHT, carrier: None, flight: None, bounce: None }
    }

    pub fn is_carried(&self) -> bool {
        self.carrier.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight.is_some()
    }

    pub fn is_bouncing(&self) -> bool {
        self.bounce.is_some()
    }

    /// Give the ball to a carrier, ending any flight or bounce.
    pub fn give_to(&mut self, id: PlayerId) {
        self.carrier = Some(id);
        self.flight = None;
        self.bounce = None;
        self.z = CARRY_HEIGHT;
    }

    /// Release into flight; the carrier reference is dropped.
    pub fn launch(&mut self, flight: Flight) {
        self.pos = flight.from;
        self.z = flight.from_z;
        self.carrier = None;
        self.bounce = None;
        self.flight = Some(flight);
    }

    pub fn start_bounce(&mut self, origin: Vec2, target: Vec2) {
        self.carrier = None;
        self.flight = None;
        self.pos = origin;
        self.bounce = Some(Bounce { origin, target, t: 0.0 });
    }

    /// Advance an active flight by `dt`. Returns the flight kind when the
    /// ball arrives, leaving the ball free at the landing point.
    pub fn advance_flight(&mut self, dt: f32) -> Option<FlightKind> {
        let flight = self.flight.as_mut()?;
        flight.progress = (flight.progress + dt / flight.duration).min(1.0);
        let t = flight.progress;
        self.pos = flight.from.lerp(flight.to, t);
        // Quadratic Bezier vertical arc
        let one_minus = 1.0 - t;
        self.z = one_minus * one_minus * flight.from_z
            + 2.0 * one_minus * t * flight.peak_z
            + t * t * flight.end_z;

        if flight.progress >= 1.0 {
            let kind = flight.kind.clone();
            self.flight = None;
            Some(kind)
        } else {
            None
        }
    }

    /// Advance an active bounce by one tick. Returns true while still live.
    pub fn advance_bounce(&mut self) -> bool {
        let Some(bounce) = self.bounce.as_mut() else {
            return false;
        };
        bounce.t = (bounce.t + BOUNCE_STEP).min(1.0);
        let pos = bounce.origin.lerp(bounce.target, bounce.t);
        let z = bounce.height();
        self.pos = pos;
        self.z = z;
        !bounce.settled()
    }
}

/// Flight time for a pass over distance `d`.
pub fn pass_duration(d: f32) -> f32 {
    0.15 + 0.012 * d
}

/// Flight time for a shot over distance `d`.
pub fn shot_duration(d: f32) -> f32 {
    0.6 + 0.02 * d
}

/// Shot apex height over distance `d`.
pub fn shot_peak_z(d: f32) -> f32 {
    10.0 + 0.3 * d
}
