use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_sim::food;
use snake_sim::game::{DeathReason, GameState, GameStatus, Outcome, step};
use snake_sim::grid::{GridSize, Position};
use snake_sim::input::{Direction, propose};
use snake_sim::snake::Snake;
use snake_sim::speed::{tick_interval_ms, ticks_per_second};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Builds a self-avoiding snake by walking from the grid centre.
fn walked_snake(grid: GridSize, moves: &[Direction]) -> Snake {
    let mut segments = vec![grid.start_cell()];
    for &direction in moves {
        let last = segments[segments.len() - 1];
        let next = last.stepped(direction);
        if grid.in_bounds(next) && !segments.contains(&next) {
            segments.push(next);
        }
    }
    Snake::from_segments(segments).expect("walk starts with one segment")
}

proptest! {
    #[test]
    fn running_states_stay_in_bounds_and_distinct(
        seed in any::<u64>(),
        side in 2u16..16,
        requests in prop::collection::vec(prop::option::of(direction()), 1..120),
    ) {
        let grid = GridSize::new(side);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::start(grid, &mut rng);

        for requested in requests {
            let length_before = state.snake.len();
            let score_before = state.score;
            let (next, outcome) = step(state, requested, &mut rng);
            state = next;

            match outcome {
                Outcome::Grew => {
                    prop_assert_eq!(state.snake.len(), length_before + 1);
                    prop_assert_eq!(state.score, score_before + 1);
                }
                Outcome::Continue => {
                    prop_assert_eq!(state.snake.len(), length_before);
                    prop_assert_eq!(state.score, score_before);
                }
                Outcome::GameOver(DeathReason::BoardFull) => {
                    prop_assert_eq!(state.snake.len(), grid.total_cells());
                    prop_assert_eq!(state.score, score_before + 1);
                    break;
                }
                Outcome::GameOver(_) => {
                    prop_assert_eq!(state.status, GameStatus::GameOver);
                    prop_assert_eq!(state.snake.len(), length_before);
                    prop_assert_eq!(state.score, score_before);
                    break;
                }
            }

            let segments = state.snake.to_vec();
            prop_assert!(segments.iter().all(|segment| grid.in_bounds(*segment)));
            let distinct: HashSet<Position> = segments.iter().copied().collect();
            prop_assert_eq!(distinct.len(), segments.len());
            prop_assert!(segments.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
            if let Some(food) = state.food {
                prop_assert!(!state.snake.occupies(food));
            }
        }
    }

    #[test]
    fn reversal_is_always_rejected(current in direction()) {
        prop_assert_eq!(propose(Some(current), current.opposite()), current);
    }

    #[test]
    fn non_reversal_is_always_accepted(current in direction(), requested in direction()) {
        prop_assume!(requested != current.opposite());
        prop_assert_eq!(propose(Some(current), requested), requested);
    }

    #[test]
    fn speed_never_rises_and_respects_floor(length in 0usize..10_000) {
        prop_assert!(ticks_per_second(length + 1) <= ticks_per_second(length));
        prop_assert!(ticks_per_second(length) >= 3);
        prop_assert!(tick_interval_ms(length + 1) >= tick_interval_ms(length));
        prop_assert!(tick_interval_ms(length) <= 333);
    }

    #[test]
    fn spawned_food_is_disjoint_from_snake(
        seed in any::<u64>(),
        side in 3u16..12,
        moves in prop::collection::vec(direction(), 0..60),
    ) {
        let grid = GridSize::new(side);
        let snake = walked_snake(grid, &moves);
        prop_assume!(snake.len() < grid.total_cells());
        let mut rng = StdRng::seed_from_u64(seed);

        let food = food::spawn(&snake, grid, &mut rng);

        prop_assert!(grid.in_bounds(food));
        prop_assert!(!snake.occupies(food));
    }
}
