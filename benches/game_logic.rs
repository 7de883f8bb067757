use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falling_blocks::core::{GameSnapshot, GameState, Grid, Piece};
use falling_blocks::term::{FrameBuffer, GameView, Viewport};
use falling_blocks::types::{GameAction, ShapeKind, GRID_WIDTH, PALETTE};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state.restart();
            }
            state.tick(black_box(16), false);
            state.take_sound_events();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            // Fill bottom 4 rows
            for y in 20..24 {
                for x in 0..GRID_WIDTH as i16 {
                    grid.set(x, y, PALETTE[0]);
                }
            }
            let rows = grid.full_rows();
            grid.clear_rows(black_box(&rows));
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("move_right", |b| {
        b.iter(|| {
            state.apply_action(black_box(GameAction::MoveRight));
            state.take_sound_events();
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let grid = Grid::new();
    let mut piece = Piece::new(ShapeKind::T, PALETTE[0]).at(5, 10);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(piece.rotate(&grid));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 30);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 30), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_try_move,
    bench_try_rotate,
    bench_render
);
criterion_main!(benches);
