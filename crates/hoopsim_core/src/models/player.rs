use serde::{Deserialize, Serialize};

/// Static roster data for one player.
///
/// All skill values are 0-100. Height is in centimeters. This struct never
/// changes during a game; the mutable on-court entity wrapping it is
/// [`crate::engine::SimPlayer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: Position,
    /// Height in centimeters (rebounding and pass-interception reach).
    pub height: u16,
    pub shooting: ShootingSkills,
    pub finishing: FinishingSkills,
    pub playmaking: PlaymakingSkills,
    pub defense: DefenseSkills,
    pub athletics: AthleticSkills,
    /// Superstars get signature shot logic and a contest-penalty floor.
    #[serde(default)]
    pub is_superstar: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// Decode from compact numeric codes (0=PG ... 4=C).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Position::PG),
            1 => Some(Position::SG),
            2 => Some(Position::SF),
            3 => Some(Position::PF),
            4 => Some(Position::C),
            _ => None,
        }
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Position::PF | Position::C)
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ShootingSkills {
    pub three_point: u8,
    pub mid_range: u8,
    pub free_throw: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FinishingSkills {
    pub layup: u8,
    pub dunk: u8,
    pub post_control: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PlaymakingSkills {
    pub ball_handling: u8,
    pub passing: u8,
    pub court_vision: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DefenseSkills {
    /// On-ball perimeter defense (slide speed, gap control).
    pub perimeter: u8,
    /// Interior / post defense.
    pub interior: u8,
    pub steal: u8,
    pub block: u8,
    pub rebounding: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AthleticSkills {
    pub speed: u8,
    pub acceleration: u8,
    pub vertical: u8,
    pub strength: u8,
    pub stamina: u8,
}

/// Map a 0-100 skill onto a multiplicative modifier around 1.0.
///
/// 0 -> 0.6, 50 -> 1.0, 100 -> 1.4. Used by shot resolution and the
/// rebound-value formula.
pub fn skill_modifier(skill: u8) -> f32 {
    0.6 + (skill.min(100) as f32 / 100.0) * 0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_codes_roundtrip() {
        for code in 0..5u8 {
            let pos = Position::from_code(code).unwrap();
            assert_eq!(Position::from_code(code), Some(pos));
        }
        assert_eq!(Position::from_code(5), None);
    }

    #[test]
    fn test_position_groups() {
        assert!(Position::PG.is_guard());
        assert!(Position::SG.is_guard());
        assert!(!Position::SF.is_guard());
        assert!(Position::PF.is_big());
        assert!(Position::C.is_big());
        assert!(!Position::SF.is_big());
    }

    #[test]
    fn test_skill_modifier_range() {
        assert!((skill_modifier(0) - 0.6).abs() < 1e-6);
        assert!((skill_modifier(50) - 1.0).abs() < 1e-6);
        assert!((skill_modifier(100) - 1.4).abs() < 1e-6);
        // Out-of-range input saturates
        assert!((skill_modifier(255) - 1.4).abs() < 1e-6);
    }
}
