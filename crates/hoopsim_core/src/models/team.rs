use serde::{Deserialize, Serialize};

use super::player::{
    AthleticSkills, DefenseSkills, FinishingSkills, Player, PlaymakingSkills, Position,
    ShootingSkills,
};
use crate::error::{Result, SimError};

/// Team identifier. Home players occupy global indices 0-4, away 5-9.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn index(self) -> usize {
        match self {
            Team::Home => 0,
            Team::Away => 1,
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn from_index(index: usize) -> Team {
        if index == 0 {
            Team::Home
        } else {
            Team::Away
        }
    }
}

/// Five starters plus a display name. No bench: the core tracks minutes
/// but does not substitute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRoster {
    pub name: String,
    pub players: Vec<Player>,
}

impl TeamRoster {
    pub const STARTERS: usize = 5;

    pub fn validate(&self) -> Result<()> {
        if self.players.len() != Self::STARTERS {
            return Err(SimError::InvalidRosterSize {
                expected: Self::STARTERS,
                found: self.players.len(),
            });
        }
        Ok(())
    }

    /// A balanced default lineup, used when the caller supplies no roster.
    /// Both sides get the same ratings so tactic and seed are the only
    /// sources of asymmetry.
    pub fn default_for(team: Team) -> TeamRoster {
        let prefix = match team {
            Team::Home => "Home",
            Team::Away => "Away",
        };
        TeamRoster {
            name: format!("{} Team", prefix),
            players: vec![
                default_pg(&format!("{} PG", prefix)),
                default_sg(&format!("{} SG", prefix)),
                default_sf(&format!("{} SF", prefix)),
                default_pf(&format!("{} PF", prefix)),
                default_center(&format!("{} C", prefix)),
            ],
        }
    }
}

fn default_pg(name: &str) -> Player {
    Player {
        name: name.to_string(),
        position: Position::PG,
        height: 188,
        shooting: ShootingSkills { three_point: 78, mid_range: 76, free_throw: 86 },
        finishing: FinishingSkills { layup: 82, dunk: 40, post_control: 30 },
        playmaking: PlaymakingSkills { ball_handling: 90, passing: 88, court_vision: 87 },
        defense: DefenseSkills { perimeter: 76, interior: 35, steal: 72, block: 22, rebounding: 40 },
        athletics: AthleticSkills {
            speed: 88,
            acceleration: 90,
            vertical: 72,
            strength: 55,
            stamina: 86,
        },
        is_superstar: false,
    }
}

fn default_sg(name: &str) -> Player {
    Player {
        name: name.to_string(),
        position: Position::SG,
        height: 196,
        shooting: ShootingSkills { three_point: 84, mid_range: 80, free_throw: 84 },
        finishing: FinishingSkills { layup: 80, dunk: 62, post_control: 35 },
        playmaking: PlaymakingSkills { ball_handling: 78, passing: 72, court_vision: 68 },
        defense: DefenseSkills { perimeter: 72, interior: 40, steal: 65, block: 30, rebounding: 45 },
        athletics: AthleticSkills {
            speed: 84,
            acceleration: 84,
            vertical: 78,
            strength: 62,
            stamina: 84,
        },
        is_superstar: false,
    }
}

fn default_sf(name: &str) -> Player {
    Player {
        name: name.to_string(),
        position: Position::SF,
        height: 203,
        shooting: ShootingSkills { three_point: 80, mid_range: 81, free_throw: 80 },
        finishing: FinishingSkills { layup: 86, dunk: 88, post_control: 55 },
        playmaking: PlaymakingSkills { ball_handling: 80, passing: 76, court_vision: 74 },
        defense: DefenseSkills { perimeter: 74, interior: 60, steal: 60, block: 48, rebounding: 62 },
        athletics: AthleticSkills {
            speed: 82,
            acceleration: 80,
            vertical: 84,
            strength: 75,
            stamina: 85,
        },
        is_superstar: true,
    }
}

fn default_pf(name: &str) -> Player {
    Player {
        name: name.to_string(),
        position: Position::PF,
        height: 208,
        shooting: ShootingSkills { three_point: 55, mid_range: 70, free_throw: 72 },
        finishing: FinishingSkills { layup: 82, dunk: 84, post_control: 74 },
        playmaking: PlaymakingSkills { ball_handling: 52, passing: 58, court_vision: 55 },
        defense: DefenseSkills { perimeter: 55, interior: 78, steal: 45, block: 62, rebounding: 82 },
        athletics: AthleticSkills {
            speed: 68,
            acceleration: 64,
            vertical: 74,
            strength: 85,
            stamina: 80,
        },
        is_superstar: false,
    }
}

fn default_center(name: &str) -> Player {
    Player {
        name: name.to_string(),
        position: Position::C,
        height: 213,
        shooting: ShootingSkills { three_point: 30, mid_range: 58, free_throw: 65 },
        finishing: FinishingSkills { layup: 84, dunk: 88, post_control: 86 },
        playmaking: PlaymakingSkills { ball_handling: 40, passing: 55, court_vision: 50 },
        defense: DefenseSkills { perimeter: 40, interior: 86, steal: 38, block: 80, rebounding: 90 },
        athletics: AthleticSkills {
            speed: 58,
            acceleration: 54,
            vertical: 70,
            strength: 92,
            stamina: 78,
        },
        is_superstar: false,
    }
}
