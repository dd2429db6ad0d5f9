//! Quantified invariants checked over randomized seeds and tactic
//! combinations.

use proptest::prelude::*;

use hoopsim_core::engine::{init_game_state_with, tick, Team};
use hoopsim_core::models::{DefenseTactic, OffenseTactic, TeamRoster, TeamTactics};

fn offense_strategy() -> impl Strategy<Value = OffenseTactic> {
    prop_oneof![
        Just(OffenseTactic::FastBreak),
        Just(OffenseTactic::Motion),
        Just(OffenseTactic::Shoot),
        Just(OffenseTactic::Inside),
        Just(OffenseTactic::Iso),
    ]
}

fn defense_strategy() -> impl Strategy<Value = DefenseTactic> {
    prop_oneof![
        Just(DefenseTactic::Man),
        Just(DefenseTactic::Zone),
        Just(DefenseTactic::Press),
        Just(DefenseTactic::Gamble),
        Just(DefenseTactic::Fortress),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]

    #[test]
    fn simulation_invariants_hold(
        seed in any::<u32>(),
        home_off in offense_strategy(),
        home_def in defense_strategy(),
        away_off in offense_strategy(),
        away_def in defense_strategy(),
    ) {
        let mut state = init_game_state_with(
            seed,
            TeamRoster::default_for(Team::Home),
            TeamRoster::default_for(Team::Away),
            TeamTactics { offense: home_off, defense: home_def },
            TeamTactics { offense: away_off, defense: away_def },
        );

        let mut prev_score = state.score;
        let mut prev_clock = state.clock_seconds;
        let mut prev_quarter = state.quarter;
        let mut prev_shot_clock = state.shot_clock;

        for i in 0..2400u32 {
            tick(&mut state);

            // Ball is in at most one mode, with at most one holder.
            let modes = [state.ball.is_carried(), state.ball.is_in_flight(), state.ball.is_bouncing()];
            prop_assert!(modes.iter().filter(|m| **m).count() <= 1, "tick {}: ball modes {:?}", i, modes);
            let holders = state.players.iter().filter(|p| p.has_ball).count();
            prop_assert!(holders <= 1, "tick {}: {} ball holders", i, holders);
            if state.ball.is_carried() {
                prop_assert_eq!(holders, 1);
            }

            // Geometry bounds.
            for p in &state.players {
                prop_assert!((1.0..=93.0).contains(&p.pos.x), "x {}", p.pos.x);
                prop_assert!((1.0..=49.0).contains(&p.pos.y), "y {}", p.pos.y);
            }

            // Hard collision bound: never coincident.
            for a in 0..state.players.len() {
                for b in (a + 1)..state.players.len() {
                    let d = state.players[a].pos.distance_to(state.players[b].pos);
                    prop_assert!(d > 0.0, "players {} and {} coincide", a, b);
                }
            }

            // Scores never decrease.
            prop_assert!(state.score[0] >= prev_score[0]);
            prop_assert!(state.score[1] >= prev_score[1]);
            prev_score = state.score;

            // Game clock only decreases within a quarter.
            if state.quarter == prev_quarter {
                prop_assert!(state.clock_seconds <= prev_clock + 1e-4,
                    "clock went up within Q{}: {} -> {}", state.quarter, prev_clock, state.clock_seconds);
            }
            prev_clock = state.clock_seconds;
            prev_quarter = state.quarter;

            // Shot clock decreases except at the documented resets.
            let went_up = state.shot_clock > prev_shot_clock + 1e-4;
            if went_up {
                let reset_24 = (state.shot_clock - 24.0).abs() < 1e-3;
                let reset_14 = (state.shot_clock - 14.0).abs() < 1e-3;
                prop_assert!(reset_24 || reset_14, "shot clock rose to {}", state.shot_clock);
            }
            prev_shot_clock = state.shot_clock;

            // Slot table is one-to-one in the half-court phases.
            let mut seen = std::collections::BTreeSet::new();
            for holder in state.slots.iter().flatten() {
                prop_assert!(seen.insert(holder.global()), "slot table duplicates {:?}", holder);
            }
        }
    }

    #[test]
    fn fatigue_stays_normalized(seed in any::<u32>()) {
        let mut state = hoopsim_core::init_game_state(seed);
        for _ in 0..3600 {
            tick(&mut state);
        }
        for p in &state.players {
            prop_assert!((0.0..=1.0).contains(&p.fatigue));
            prop_assert!(p.catch_timer >= 0.0);
        }
    }
}

#[test]
fn average_spacing_stays_loose() {
    // Soft bound: across a stretch of play the mean pairwise distance of
    // the closest pairs stays workable (no permanent pile-ups).
    let mut state = hoopsim_core::init_game_state(77);
    let mut min_dist_sum = 0.0;
    let mut samples = 0u32;
    for i in 0..7200 {
        tick(&mut state);
        if i % 30 != 0 {
            continue;
        }
        let mut min_d = f32::MAX;
        for a in 0..state.players.len() {
            for b in (a + 1)..state.players.len() {
                min_d = min_d.min(state.players[a].pos.distance_to(state.players[b].pos));
            }
        }
        min_dist_sum += min_d;
        samples += 1;
    }
    let avg_min = min_dist_sum / samples as f32;
    // Screens and box-outs legitimately bring pairs close; the bound only
    // rules out persistent overlap.
    assert!(avg_min > 0.25, "players average closest distance {} is a pile-up", avg_min);
}
