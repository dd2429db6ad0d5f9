//! Batch calibration: run many independent seeds in parallel and collect
//! aggregate distribution statistics. Each game is still single-threaded;
//! rayon only fans out across seeds.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::{run_game, GameResult};
use crate::models::TeamTactics;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BatchStats {
    pub games: usize,
    pub mean_points_per_team: f32,
    pub mean_pace: f32,
    pub mean_fg_pct: f32,
    pub mean_three_rate: f32,
    /// Share of all rebounds that were defensive.
    pub defensive_rebound_rate: f32,
}

/// Simulate one game per seed and fold the results into batch stats.
pub fn simulate_batch(
    seeds: &[u32],
    home_tactics: TeamTactics,
    away_tactics: TeamTactics,
) -> BatchStats {
    let results: Vec<GameResult> = seeds
        .par_iter()
        .map(|seed| run_game(*seed, home_tactics, away_tactics))
        .collect();
    aggregate(&results)
}

fn aggregate(results: &[GameResult]) -> BatchStats {
    if results.is_empty() {
        return BatchStats::default();
    }
    let games = results.len() as f32;
    let mut points = 0.0;
    let mut pace = 0.0;
    let mut fg_made = 0u32;
    let mut fg_attempted = 0u32;
    let mut threes = 0u32;
    let mut def_boards = 0u32;
    let mut all_boards = 0u32;

    for r in results {
        points += (r.score_home + r.score_away) as f32 / 2.0;
        pace += (r.possessions_home + r.possessions_away) as f32 / 2.0;
        for totals in [&r.totals_home, &r.totals_away] {
            fg_made += totals.fg_made;
            fg_attempted += totals.fg_attempted;
            threes += totals.three_attempted;
            def_boards += totals.def_rebounds;
            all_boards += totals.def_rebounds + totals.off_rebounds;
        }
    }

    BatchStats {
        games: results.len(),
        mean_points_per_team: points / games,
        mean_pace: pace / games,
        mean_fg_pct: if fg_attempted > 0 { fg_made as f32 / fg_attempted as f32 } else { 0.0 },
        mean_three_rate: if fg_attempted > 0 { threes as f32 / fg_attempted as f32 } else { 0.0 },
        defensive_rebound_rate: if all_boards > 0 {
            def_boards as f32 / all_boards as f32
        } else {
            0.0
        },
    }
}
