use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_swap::core::{
    count_inversions, generate, shuffle_pieces, Board, GameConfig, GameState, SimpleRng,
};
use tile_swap::types::{ImageRef, SolvabilityPolicy};

fn bench_shuffle_12x12(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut pieces = generate(12, ImageRef(1)).unwrap();

    c.bench_function("shuffle_12x12_slide", |b| {
        b.iter(|| {
            black_box(shuffle_pieces(
                &mut pieces,
                &mut rng,
                SolvabilityPolicy::SlideConstrained,
            ));
        })
    });
}

fn bench_count_inversions(c: &mut Criterion) {
    let mut rng = SimpleRng::new(7);
    let mut pieces = generate(12, ImageRef(1)).unwrap();
    shuffle_pieces(&mut pieces, &mut rng, SolvabilityPolicy::FreeSwap);

    c.bench_function("count_inversions_144", |b| {
        b.iter(|| count_inversions(black_box(&pieces[..])))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let mut rng = SimpleRng::new(99);
    let mut board =
        Board::shuffled(12, ImageRef(1), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
    let mut target = 0u16;

    c.bench_function("board_apply_move", |b| {
        b.iter(|| {
            target = (target + 37) % 144;
            board.apply_move(black_box(5), target);
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default().with_grid_size(8)).unwrap();
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if !state.run().status.is_active() {
                state.restart();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_shuffle_12x12,
    bench_count_inversions,
    bench_apply_move,
    bench_tick
);
criterion_main!(benches);
