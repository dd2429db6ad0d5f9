//! Full regulation games across seeds and tactics: sane box scores,
//! balanced bookkeeping, reproducible results.

use hoopsim_core::engine::run_game;
use hoopsim_core::models::{DefenseTactic, OffenseTactic, TeamTactics};

#[test]
fn full_games_are_reproducible() {
    let a = run_game(888, TeamTactics::default(), TeamTactics::default());
    let b = run_game(888, TeamTactics::default(), TeamTactics::default());
    assert_eq!(a, b);
}

#[test]
fn box_scores_stay_internally_consistent() {
    for seed in [3u32, 1444, 90210] {
        let result = run_game(seed, TeamTactics::default(), TeamTactics::default());
        for line in &result.box_scores {
            assert!(line.fg_made <= line.fg_attempted, "{}: FGM > FGA", line.name);
            assert!(line.three_made <= line.three_attempted);
            assert!(line.three_attempted <= line.fg_attempted);
            assert!(line.ft_made <= line.ft_attempted);
            let min_points = line.fg_made * 2 + line.ft_made;
            let max_points = line.fg_made * 3 + line.ft_made;
            assert!(
                (min_points..=max_points).contains(&line.points),
                "{}: points {} outside [{}, {}]",
                line.name,
                line.points,
                min_points,
                max_points
            );
        }
        assert_eq!(result.score_home, result.totals_home.points);
        assert_eq!(result.score_away, result.totals_away.points);

        // Every steal pairs with a turnover somewhere.
        let steals = result.totals_home.steals + result.totals_away.steals;
        let turnovers = result.totals_home.turnovers + result.totals_away.turnovers;
        assert!(steals <= turnovers, "steals {} exceed turnovers {}", steals, turnovers);
    }
}

#[test]
fn scoring_lands_in_a_plausible_range() {
    let mut total_points = 0u32;
    let games = 8u32;
    for seed in 0..games {
        let result = run_game(seed, TeamTactics::default(), TeamTactics::default());
        total_points += result.score_home + result.score_away;
    }
    let per_team_avg = total_points as f32 / (games * 2) as f32;
    assert!(
        (60.0..=160.0).contains(&per_team_avg),
        "average team score {:.1} is not basketball",
        per_team_avg
    );
}

#[test]
fn every_tactic_combination_completes() {
    let offenses = [
        OffenseTactic::FastBreak,
        OffenseTactic::Motion,
        OffenseTactic::Shoot,
        OffenseTactic::Inside,
        OffenseTactic::Iso,
    ];
    let defenses = [
        DefenseTactic::Man,
        DefenseTactic::Zone,
        DefenseTactic::Press,
        DefenseTactic::Gamble,
        DefenseTactic::Fortress,
    ];
    for (i, offense) in offenses.iter().enumerate() {
        let defense = defenses[i];
        let result = run_game(
            1000 + i as u32,
            TeamTactics { offense: *offense, defense: DefenseTactic::Man },
            TeamTactics { offense: OffenseTactic::Motion, defense },
        );
        assert!(result.score_home + result.score_away > 0, "{:?} vs {:?} scored nothing", offense, defense);
        assert_eq!(result.box_scores.len(), 10);
    }
}

#[test]
fn batch_calibration_summarizes_distribution() {
    use hoopsim_core::calibration::simulate_batch;

    let seeds: Vec<u32> = (0..6).collect();
    let stats = simulate_batch(&seeds, TeamTactics::default(), TeamTactics::default());
    assert_eq!(stats.games, 6);
    assert!((0.30..=0.60).contains(&stats.mean_fg_pct), "FG% {:.3}", stats.mean_fg_pct);
    assert!((60.0..=130.0).contains(&stats.mean_pace), "pace {:.1}", stats.mean_pace);
    assert!((0.0..=1.0).contains(&stats.defensive_rebound_rate));
}
