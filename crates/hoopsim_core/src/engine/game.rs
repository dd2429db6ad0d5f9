//! Full-game driver: loop the tick until regulation ends, then finalize
//! the box score into a result.

use serde::{Deserialize, Serialize};

use super::state::{init_game_state_with, GameState};
use super::tick::tick;
use crate::models::{GameLogEntry, PlayerBoxScore, Team, TeamRoster, TeamTactics, TeamTotals};

/// Hard cap on simulated ticks, far above any regulation game
/// (4 x 12 min x 60 ticks/s plus dead-ball overhead).
const MAX_TICKS: u64 = 60 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResult {
    pub score_home: u32,
    pub score_away: u32,
    pub box_scores: Vec<PlayerBoxScore>,
    pub totals_home: TeamTotals,
    pub totals_away: TeamTotals,
    pub log: Vec<GameLogEntry>,
    /// Possessions per team, the pace of the game.
    pub possessions_home: u32,
    pub possessions_away: u32,
}

/// Simulate a full regulation game from a seed with default rosters.
pub fn run_game(seed: u32, home_tactics: TeamTactics, away_tactics: TeamTactics) -> GameResult {
    run_game_with(
        seed,
        TeamRoster::default_for(Team::Home),
        TeamRoster::default_for(Team::Away),
        home_tactics,
        away_tactics,
    )
}

pub fn run_game_with(
    seed: u32,
    home: TeamRoster,
    away: TeamRoster,
    home_tactics: TeamTactics,
    away_tactics: TeamTactics,
) -> GameResult {
    let mut state = init_game_state_with(seed, home, away, home_tactics, away_tactics);
    let mut ticks: u64 = 0;
    let mut possessions = [0u32; 2];
    let mut last_possession = state.possession;
    let mut counted_first = false;

    while !state.game_over && ticks < MAX_TICKS {
        tick(&mut state);
        ticks += 1;
        if state.game_started && !counted_first {
            possessions[state.possession.index()] += 1;
            last_possession = state.possession;
            counted_first = true;
        }
        if counted_first && state.possession != last_possession {
            possessions[state.possession.index()] += 1;
            last_possession = state.possession;
        }
    }

    finalize(state, possessions)
}

fn finalize(state: GameState, possessions: [u32; 2]) -> GameResult {
    let totals_home = super::stats::team_totals(&state, Team::Home);
    let totals_away = super::stats::team_totals(&state, Team::Away);
    GameResult {
        score_home: state.score[0],
        score_away: state.score[1],
        box_scores: state.box_scores,
        totals_home,
        totals_away,
        log: state.log,
        possessions_home: possessions[0],
        possessions_away: possessions[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_game_terminates_with_consistent_score() {
        let result = run_game(42, TeamTactics::default(), TeamTactics::default());
        assert_eq!(result.score_home, result.totals_home.points);
        assert_eq!(result.score_away, result.totals_away.points);
        assert!(result.score_home + result.score_away > 0, "somebody should score");
        assert_eq!(result.box_scores.len(), 10);
    }

    #[test]
    fn test_log_brackets_the_game() {
        let result = run_game(9, TeamTactics::default(), TeamTactics::default());
        use crate::models::LogEventKind;
        assert_eq!(result.log.first().unwrap().kind, LogEventKind::PeriodStart);
        assert_eq!(result.log.last().unwrap().kind, LogEventKind::FinalBuzzer);
        let periods = result
            .log
            .iter()
            .filter(|e| e.kind == LogEventKind::PeriodStart)
            .count();
        assert_eq!(periods, 4, "four period markers");
    }

    #[test]
    fn test_minutes_sum_to_game_length() {
        let result = run_game(5, TeamTactics::default(), TeamTactics::default());
        // Each of ten players plays all 48 minutes
        for line in &result.box_scores {
            assert!((line.minutes - 48.0).abs() < 1.0, "minutes {}", line.minutes);
        }
    }
}
