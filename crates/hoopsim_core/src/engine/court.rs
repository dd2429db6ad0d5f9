//! Court geometry: fixed dimensions, basket lookup, and the named
//! half-court slots that organize offensive spacing.
//!
//! The court is 94 x 50 feet. Home attacks the right basket, away attacks
//! the left; sides do not switch between quarters.

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;
use crate::models::Team;

pub const COURT_LENGTH: f32 = 94.0;
pub const COURT_WIDTH: f32 = 50.0;
pub const HALF_COURT_X: f32 = COURT_LENGTH / 2.0;

/// Players are clamped inside this margin each tick.
pub const BOUNDS_MARGIN: f32 = 1.0;

pub const THREE_POINT_RADIUS: f32 = 23.75;
/// Shots released beyond this distance score three.
pub const THREE_POINT_LINE: f32 = 22.0;
pub const RIM_HEIGHT: f32 = 10.0;
pub const FREE_THROW_DIST: f32 = 15.0;
pub const PAINT_WIDTH: f32 = 16.0;
pub const PAINT_LENGTH: f32 = 19.0;
pub const FREE_THROW_CIRCLE_RADIUS: f32 = 6.0;

const LEFT_BASKET: Vec2 = Vec2 { x: 5.25, y: 25.0 };
const RIGHT_BASKET: Vec2 = Vec2 { x: 88.75, y: 25.0 };

/// The basket `team` attacks.
pub fn basket_of(team: Team) -> Vec2 {
    match team {
        Team::Home => RIGHT_BASKET,
        Team::Away => LEFT_BASKET,
    }
}

/// The basket `team` defends.
pub fn own_basket_of(team: Team) -> Vec2 {
    basket_of(team.opponent())
}

/// +1 when `team` attacks in +x, -1 otherwise. All slot offsets and drive
/// directions are expressed in attack-relative x.
pub fn attack_dir(team: Team) -> f32 {
    match team {
        Team::Home => 1.0,
        Team::Away => -1.0,
    }
}

/// True when `x` is on `team`'s backcourt side (the half they defend).
pub fn in_backcourt(team: Team, x: f32) -> bool {
    match team {
        Team::Home => x < HALF_COURT_X,
        Team::Away => x > HALF_COURT_X,
    }
}

pub fn center_court() -> Vec2 {
    Vec2::new(HALF_COURT_X, COURT_WIDTH / 2.0)
}

/// Named half-court slot. "Left" and "right" are from the attacking
/// team's point of view facing the basket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    TopKey,
    LeftWing,
    RightWing,
    LeftElbow,
    RightElbow,
    LeftCorner,
    RightCorner,
    LowPostL,
    LowPostR,
}

pub const SLOT_COUNT: usize = 9;

impl Slot {
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::TopKey,
        Slot::LeftWing,
        Slot::RightWing,
        Slot::LeftElbow,
        Slot::RightElbow,
        Slot::LeftCorner,
        Slot::RightCorner,
        Slot::LowPostL,
        Slot::LowPostR,
    ];

    pub fn index(self) -> usize {
        match self {
            Slot::TopKey => 0,
            Slot::LeftWing => 1,
            Slot::RightWing => 2,
            Slot::LeftElbow => 3,
            Slot::RightElbow => 4,
            Slot::LeftCorner => 5,
            Slot::RightCorner => 6,
            Slot::LowPostL => 7,
            Slot::LowPostR => 8,
        }
    }

    /// Offset from the attacked basket: (dx along attack axis, dy).
    fn offset(self) -> (f32, f32) {
        match self {
            Slot::TopKey => (-26.0, 0.0),
            Slot::LeftWing => (-22.0, -12.0),
            Slot::RightWing => (-22.0, 12.0),
            Slot::LeftElbow => (-15.0, -7.0),
            Slot::RightElbow => (-15.0, 7.0),
            Slot::LeftCorner => (-22.0, -22.0),
            Slot::RightCorner => (-22.0, 22.0),
            Slot::LowPostL => (-7.0, -5.0),
            Slot::LowPostR => (-7.0, 5.0),
        }
    }

    /// World coordinates of this slot for the team attacking `basket`
    /// with direction `dir`.
    pub fn coords(self, basket: Vec2, dir: f32) -> Vec2 {
        let (dx, dy) = self.offset();
        Vec2::new(basket.x + dx * dir, basket.y + dy)
    }

    /// Distance from the slot to the basket it is anchored on.
    pub fn distance_to_basket(self) -> f32 {
        let (dx, dy) = self.offset();
        (dx * dx + dy * dy).sqrt()
    }

    /// Slots beyond the three-point line (catch-and-shoot spots).
    pub fn is_perimeter(self) -> bool {
        self.distance_to_basket() > THREE_POINT_LINE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::dist;

    #[test]
    fn test_baskets_are_mirrored() {
        let home = basket_of(Team::Home);
        let away = basket_of(Team::Away);
        assert!((home.x + away.x - COURT_LENGTH).abs() < 1e-6);
        assert_eq!(home.y, away.y);
        assert_eq!(own_basket_of(Team::Home), basket_of(Team::Away));
    }

    #[test]
    fn test_attack_dir_signs() {
        assert_eq!(attack_dir(Team::Home), 1.0);
        assert_eq!(attack_dir(Team::Away), -1.0);
    }

    #[test]
    fn test_slot_coords_stay_in_bounds() {
        for team in [Team::Home, Team::Away] {
            let basket = basket_of(team);
            let dir = attack_dir(team);
            for slot in Slot::ALL {
                let pos = slot.coords(basket, dir);
                assert!(pos.x >= BOUNDS_MARGIN && pos.x <= COURT_LENGTH - BOUNDS_MARGIN);
                assert!(pos.y >= BOUNDS_MARGIN && pos.y <= COURT_WIDTH - BOUNDS_MARGIN);
            }
        }
    }

    #[test]
    fn test_slot_indices_are_dense() {
        for (i, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_top_key_is_26_feet_out() {
        let basket = basket_of(Team::Home);
        let pos = Slot::TopKey.coords(basket, 1.0);
        assert!((dist(pos, basket) - 26.0).abs() < 1e-5);
        assert!(Slot::TopKey.is_perimeter());
        assert!(!Slot::LowPostL.is_perimeter());
    }

    #[test]
    fn test_backcourt_sides() {
        assert!(in_backcourt(Team::Home, 10.0));
        assert!(!in_backcourt(Team::Home, 80.0));
        assert!(in_backcourt(Team::Away, 80.0));
        assert!(!in_backcourt(Team::Away, 10.0));
    }
}
