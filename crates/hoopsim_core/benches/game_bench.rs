use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hoopsim_core::engine::{init_game_state, run_game, tick};
use hoopsim_core::models::TeamTactics;

fn bench_single_tick(c: &mut Criterion) {
    c.bench_function("tick_1s_of_action", |b| {
        b.iter_batched(
            || {
                let mut state = init_game_state(42);
                // Get past the jump ball into live play
                for _ in 0..300 {
                    tick(&mut state);
                }
                state
            },
            |mut state| {
                for _ in 0..60 {
                    tick(&mut state);
                }
                black_box(state)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");
    group.sample_size(10);
    group.bench_function("regulation_48min", |b| {
        b.iter(|| {
            let result = run_game(
                black_box(12345),
                TeamTactics::default(),
                TeamTactics::default(),
            );
            black_box(result)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_single_tick, bench_full_game);
criterion_main!(benches);
