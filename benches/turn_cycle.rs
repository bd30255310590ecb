//! Turn cycle benchmarks
//!
//! Measures a full greedy-vs-greedy round (play, attack, tick the queue,
//! end turn) and the cost of capturing a snapshot mid-game.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cafe_wars::ai::TurnPolicy;
use cafe_wars::persist::snapshot;
use cafe_wars::{Board, BoardConfig, GreedyPolicy, PlayerId};

fn play_rounds(seed: u64, rounds: usize) -> Board {
    let mut board = Board::new(BoardConfig::default().with_seed(seed).with_ai());
    for _ in 0..rounds {
        if board.is_game_over() {
            break;
        }
        GreedyPolicy.take_turn(&mut board, PlayerId::FIRST);
        while !board.queue().is_idle() {
            board.update(0.5);
        }
        if board.end_turn().is_err() {
            break;
        }
        while !board.queue().is_idle() {
            board.update(0.5);
        }
        board.update(0.5);
    }
    board
}

fn bench_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_rounds");
    for rounds in [1usize, 5, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(rounds), &rounds, |b, &rounds| {
            b.iter(|| play_rounds(black_box(7), rounds))
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let board = play_rounds(7, 5);
    c.bench_function("snapshot_encode", |b| {
        b.iter(|| snapshot::encode(black_box(board.state()), board.rng()))
    });
}

criterion_group!(benches, bench_rounds, bench_snapshot);
criterion_main!(benches);
