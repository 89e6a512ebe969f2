use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use common::games::SessionRng;
use common::games::tictactoe::{BotInput, LineSet, Mark, TicTacToeGameState, calculate_move};

fn play_full_game(grid_size: usize, rng: &mut SessionRng) {
    let mut game = TicTacToeGameState::new(0, grid_size, Mark::X).unwrap();
    while !game.status.is_over() {
        if game.is_human_turn() {
            let cell = game.current_board().empty_cells()[0];
            game.human_play(cell).unwrap();
        } else {
            game.opponent_play(rng).unwrap();
        }
    }
}

fn bench_single_move_mid_game() {
    let mut game = TicTacToeGameState::new(0, 5, Mark::X).unwrap();
    let mut rng = SessionRng::new(42);
    for cell in [0, 6, 18, 3] {
        if game.human_play(cell).is_ok() {
            game.opponent_play(&mut rng).unwrap();
        }
    }

    let input = BotInput::from_game_state(&game);
    let lines = LineSet::new(5);
    black_box(calculate_move(&input, &lines, &mut rng));
}

fn move_selector_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_selector");

    for grid_size in 3..=5 {
        group.bench_function(format!("full_game_{}x{}", grid_size, grid_size), |b| {
            let mut rng = SessionRng::new(7);
            b.iter(|| play_full_game(grid_size, &mut rng))
        });
    }

    group.bench_function("single_move_mid_game_5x5", |b| {
        b.iter(bench_single_move_mid_game)
    });

    group.finish();
}

criterion_group!(benches, move_selector_bench);
criterion_main!(benches);
