use serde::{Deserialize, Serialize};

/// Offensive scheme selected per team. Changeable between ticks; observed at
/// the next possession boundary for play selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OffenseTactic {
    FastBreak,
    #[default]
    Motion,
    Shoot,
    Inside,
    Iso,
}

/// Defensive scheme selected per team. Takes effect immediately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefenseTactic {
    #[default]
    Man,
    Zone,
    Press,
    Gamble,
    Fortress,
}

impl DefenseTactic {
    /// Man-style schemes keep per-player assignments; zone-style schemes
    /// defend spots.
    pub fn is_man_scheme(self) -> bool {
        matches!(self, DefenseTactic::Man | DefenseTactic::Press | DefenseTactic::Gamble)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamTactics {
    pub offense: OffenseTactic,
    pub defense: DefenseTactic,
}

/// Fractional shot-probability delta for an offense-vs-defense matchup.
///
/// Row = offensive tactic, column = defensive tactic. Values are small
/// (|delta| <= 0.06) and feed `(1 + delta)` in shot resolution.
const ADVANTAGE: [[f32; 5]; 5] = [
    // vs:      man    zone   press  gamble fortress
    /* fast_break */ [0.00, 0.02, 0.06, 0.03, -0.02],
    /* motion     */ [0.02, 0.03, -0.02, 0.00, 0.02],
    /* shoot      */ [0.00, 0.05, -0.03, -0.02, 0.06],
    /* inside     */ [0.03, -0.04, 0.02, 0.00, -0.06],
    /* iso        */ [0.02, -0.02, 0.04, -0.03, 0.00],
];

pub fn tactic_advantage(offense: OffenseTactic, defense: DefenseTactic) -> f32 {
    let row = match offense {
        OffenseTactic::FastBreak => 0,
        OffenseTactic::Motion => 1,
        OffenseTactic::Shoot => 2,
        OffenseTactic::Inside => 3,
        OffenseTactic::Iso => 4,
    };
    let col = match defense {
        DefenseTactic::Man => 0,
        DefenseTactic::Zone => 1,
        DefenseTactic::Press => 2,
        DefenseTactic::Gamble => 3,
        DefenseTactic::Fortress => 4,
    };
    ADVANTAGE[row][col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advantage_is_small_fraction() {
        for &off in &[
            OffenseTactic::FastBreak,
            OffenseTactic::Motion,
            OffenseTactic::Shoot,
            OffenseTactic::Inside,
            OffenseTactic::Iso,
        ] {
            for &def in &[
                DefenseTactic::Man,
                DefenseTactic::Zone,
                DefenseTactic::Press,
                DefenseTactic::Gamble,
                DefenseTactic::Fortress,
            ] {
                let adv = tactic_advantage(off, def);
                assert!(adv.abs() <= 0.06, "advantage {} out of range", adv);
            }
        }
    }

    #[test]
    fn test_defaults_are_motion_man() {
        let tactics = TeamTactics::default();
        assert_eq!(tactics.offense, OffenseTactic::Motion);
        assert_eq!(tactics.defense, DefenseTactic::Man);
    }

    #[test]
    fn test_serde_snake_case_names() {
        let json = serde_json::to_string(&OffenseTactic::FastBreak).unwrap();
        assert_eq!(json, "\"fast_break\"");
        let parsed: DefenseTactic = serde_json::from_str("\"fortress\"").unwrap();
        assert_eq!(parsed, DefenseTactic::Fortress);
    }
}
