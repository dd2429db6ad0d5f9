//! Box-score accumulation. Handlers call these at the moment an event
//! resolves; percentages and totals are derived at finalize time.

use super::player::PlayerId;
use super::state::GameState;
use crate::models::{Team, TeamTotals};

/// Minutes accrue for all ten starters while the game runs.
pub fn accrue_minutes(state: &mut GameState, dt: f32) {
    if !state.game_started || state.game_over {
        return;
    }
    for line in state.box_scores.iter_mut() {
        line.minutes += dt / 60.0;
    }
}

pub fn record_fga(state: &mut GameState, shooter: PlayerId, is_three: bool) {
    let line = &mut state.box_scores[shooter.global()];
    line.fg_attempted += 1;
    if is_three {
        line.three_attempted += 1;
    }
}

/// A made field goal: points, shooter splits, optional assist, and
/// plus-minus for everyone on the floor.
pub fn record_fg_make(
    state: &mut GameState,
    shooter: PlayerId,
    points: u8,
    assist: Option<PlayerId>,
) {
    let line = &mut state.box_scores[shooter.global()];
    line.fg_made += 1;
    line.points += points as u32;
    if points == 3 {
        line.three_made += 1;
    }
    if let Some(passer) = assist {
        state.box_scores[passer.global()].assists += 1;
    }
    state.score[shooter.team.index()] += points as u32;
    apply_plus_minus(state, shooter.team, points as i32);
}

pub fn record_ft(state: &mut GameState, shooter: PlayerId, made: bool) {
    let line = &mut state.box_scores[shooter.global()];
    line.ft_attempted += 1;
    if made {
        line.ft_made += 1;
        line.points += 1;
        state.score[shooter.team.index()] += 1;
        apply_plus_minus(state, shooter.team, 1);
    }
}

pub fn record_rebound(state: &mut GameState, rebounder: PlayerId, offensive: bool) {
    let line = &mut state.box_scores[rebounder.global()];
    if offensive {
        line.off_rebounds += 1;
    } else {
        line.def_rebounds += 1;
    }
}

pub fn record_steal(state: &mut GameState, stealer: PlayerId, victim: PlayerId) {
    state.box_scores[stealer.global()].steals += 1;
    state.box_scores[victim.global()].turnovers += 1;
}

pub fn record_turnover(state: &mut GameState, player: PlayerId) {
    state.box_scores[player.global()].turnovers += 1;
}

pub fn record_block(state: &mut GameState, blocker: PlayerId) {
    state.box_scores[blocker.global()].blocks += 1;
}

pub fn record_foul(state: &mut GameState, player: PlayerId) {
    state.box_scores[player.global()].fouls += 1;
}

fn apply_plus_minus(state: &mut GameState, scoring_team: Team, points: i32) {
    for line in state.box_scores.iter_mut() {
        match line.team {
            Some(team) if team == scoring_team => line.plus_minus += points,
            Some(_) => line.plus_minus -= points,
            None => {}
        }
    }
}

pub fn team_totals(state: &GameState, team: Team) -> TeamTotals {
    TeamTotals::from_players(
        state.box_scores.iter().filter(|line| line.team == Some(team)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::init_game_state;

    #[test]
    fn test_fg_make_updates_score_and_plus_minus() {
        let mut state = init_game_state(1);
        let shooter = PlayerId::new(Team::Home, 2);
        let passer = PlayerId::new(Team::Home, 0);
        record_fga(&mut state, shooter, true);
        record_fg_make(&mut state, shooter, 3, Some(passer));

        assert_eq!(state.score, [3, 0]);
        let line = &state.box_scores[shooter.global()];
        assert_eq!(line.points, 3);
        assert_eq!(line.three_made, 1);
        assert_eq!(line.fg_made, 1);
        assert_eq!(state.box_scores[passer.global()].assists, 1);

        // Every home player +3, every away player -3
        for line in &state.box_scores {
            match line.team {
                Some(Team::Home) => assert_eq!(line.plus_minus, 3),
                Some(Team::Away) => assert_eq!(line.plus_minus, -3),
                None => {}
            }
        }
        let sum: i32 = state.box_scores.iter().map(|l| l.plus_minus).sum();
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_ft_only_scores_on_make() {
        let mut state = init_game_state(2);
        let shooter = PlayerId::new(Team::Away, 1);
        record_ft(&mut state, shooter, false);
        assert_eq!(state.score, [0, 0]);
        record_ft(&mut state, shooter, true);
        assert_eq!(state.score, [0, 1]);
        let line = &state.box_scores[shooter.global()];
        assert_eq!(line.ft_attempted, 2);
        assert_eq!(line.ft_made, 1);
    }

    #[test]
    fn test_minutes_accrue_only_while_running() {
        let mut state = init_game_state(3);
        accrue_minutes(&mut state, 1.0);
        assert_eq!(state.box_scores[0].minutes, 0.0, "pre-tip time does not count");
        state.game_started = true;
        accrue_minutes(&mut state, 60.0);
        assert!((state.box_scores[0].minutes - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_team_totals_split_by_team() {
        let mut state = init_game_state(4);
        record_fga(&mut state, PlayerId::new(Team::Home, 0), false);
        record_fg_make(&mut state, PlayerId::new(Team::Home, 0), 2, None);
        record_steal(&mut state, PlayerId::new(Team::Away, 2), PlayerId::new(Team::Home, 0));

        let home = team_totals(&state, Team::Home);
        let away = team_totals(&state, Team::Away);
        assert_eq!(home.points, 2);
        assert_eq!(home.turnovers, 1);
        assert_eq!(away.steals, 1);
        assert_eq!(away.points, 0);
    }
}
