use serde::{Deserialize, Serialize};

use super::team::Team;

/// Accumulated box-score line for one player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlayerBoxScore {
    pub name: String,
    pub team: Option<Team>,
    /// Playing time in minutes (no substitutions, so this tracks game time).
    pub minutes: f32,
    pub points: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub off_rebounds: u32,
    pub def_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub plus_minus: i32,
}

impl PlayerBoxScore {
    pub fn rebounds(&self) -> u32 {
        self.off_rebounds + self.def_rebounds
    }

    pub fn fg_pct(&self) -> f32 {
        if self.fg_attempted == 0 {
            0.0
        } else {
            self.fg_made as f32 / self.fg_attempted as f32
        }
    }
}

/// Summed team line. Produced by the stats finalize pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamTotals {
    pub points: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub off_rebounds: u32,
    pub def_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
}

impl TeamTotals {
    pub fn from_players<'a>(players: impl Iterator<Item = &'a PlayerBoxScore>) -> TeamTotals {
        let mut totals = TeamTotals::default();
        for p in players {
            totals.points += p.points;
            totals.fg_made += p.fg_made;
            totals.fg_attempted += p.fg_attempted;
            totals.three_made += p.three_made;
            totals.three_attempted += p.three_attempted;
            totals.ft_made += p.ft_made;
            totals.ft_attempted += p.ft_attempted;
            totals.off_rebounds += p.off_rebounds;
            totals.def_rebounds += p.def_rebounds;
            totals.assists += p.assists;
            totals.steals += p.steals;
            totals.blocks += p.blocks;
            totals.turnovers += p.turnovers;
            totals.fouls += p.fouls;
        }
        totals
    }

    pub fn fg_pct(&self) -> f32 {
        if self.fg_attempted == 0 {
            0.0
        } else {
            self.fg_made as f32 / self.fg_attempted as f32
        }
    }
}
