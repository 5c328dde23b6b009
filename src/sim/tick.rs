//! Fixed timestep simulation tick
//!
//! One call advances the snake by one cell. The host drives the cadence
//! (see [`crate::platform::ticker`]); this function never looks at the clock.

use super::food::place_food;
use super::state::{GamePhase, GameState};

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the board
    Wall,
    /// Head ran into the body (tail included)
    Body,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Moved one cell without growing
    Moved,
    /// Ate the food and grew by one
    Ate { score: u32 },
    /// Fatal collision, session is over
    Died {
        cause: Collision,
        new_high_score: Option<u32>,
    },
    /// The snake covers the whole board, session is over
    BoardFilled { new_high_score: Option<u32> },
}

impl TickOutcome {
    /// Best score to write through, if the session just ended with one
    pub fn new_high_score(&self) -> Option<u32> {
        match self {
            TickOutcome::Died { new_high_score, .. }
            | TickOutcome::BoardFilled { new_high_score } => *new_high_score,
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickOutcome::Died { .. } | TickOutcome::BoardFilled { .. }
        )
    }
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }

    if let Some(dir) = state.pending_direction.take() {
        state.direction = dir;
    }
    state.time_ticks += 1;

    let new_head = state.head().step(state.direction);

    // Tail has not moved yet this step, so it still counts as body
    let cause = if !new_head.in_bounds() {
        Some(Collision::Wall)
    } else if state.occupies(new_head) {
        Some(Collision::Body)
    } else {
        None
    };

    if let Some(cause) = cause {
        state.phase = GamePhase::GameOver;
        let new_high_score = state.finalize_score();
        log::info!(
            "Game over ({:?}) at tick {} with score {}",
            cause,
            state.time_ticks,
            state.score
        );
        return TickOutcome::Died {
            cause,
            new_high_score,
        };
    }

    state.snake.push_front(new_head);

    if state.food == Some(new_head) {
        state.score += 1;
        state.food = place_food(&state.snake, &mut state.rng);
        if state.food.is_none() {
            state.phase = GamePhase::GameOver;
            let new_high_score = state.finalize_score();
            log::info!("Board filled with score {}", state.score);
            return TickOutcome::BoardFilled { new_high_score };
        }
        log::debug!("Ate food, score {} length {}", state.score, state.snake.len());
        TickOutcome::Ate { score: state.score }
    } else {
        state.snake.pop_back();
        TickOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BOARD_SIZE;
    use crate::sim::state::{Cell, Direction};
    use std::collections::{HashSet, VecDeque};

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0, true);
        state.phase = GamePhase::Running;
        state
    }

    fn body(state: &GameState) -> Vec<Cell> {
        state.snake.iter().copied().collect()
    }

    #[test]
    fn test_tick_idle_unless_running() {
        let mut state = GameState::new(1, 0, true);
        let before = body(&state);
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        state.phase = GamePhase::Paused;
        assert_eq!(tick(&mut state), TickOutcome::Idle);
        assert_eq!(body(&state), before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_tick_eats_food() {
        let mut state = running(5);
        state.food = Some(Cell::new(11, 10));

        assert_eq!(tick(&mut state), TickOutcome::Ate { score: 1 });
        assert_eq!(
            body(&state),
            vec![
                Cell::new(11, 10),
                Cell::new(10, 10),
                Cell::new(9, 10),
                Cell::new(8, 10)
            ]
        );
        assert_eq!(state.score, 1);
        let food = state.food.unwrap();
        assert!(!state.occupies(food));
    }

    #[test]
    fn test_tick_moves_without_growing() {
        let mut state = running(5);
        state.food = Some(Cell::new(0, 0));

        assert_eq!(tick(&mut state), TickOutcome::Moved);
        assert_eq!(
            body(&state),
            vec![Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_wall_collision_records_high_score() {
        let mut state = running(8);
        state.snake = VecDeque::from([Cell::new(19, 5), Cell::new(18, 5), Cell::new(17, 5)]);
        state.food = Some(Cell::new(0, 0));
        state.score = 4;
        state.high_score = 2;

        let outcome = tick(&mut state);
        assert_eq!(
            outcome,
            TickOutcome::Died {
                cause: Collision::Wall,
                new_high_score: Some(4)
            }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 4);
        // Body left where it was
        assert_eq!(state.head(), Cell::new(19, 5));
    }

    #[test]
    fn test_wall_collision_without_record() {
        let mut state = running(8);
        state.snake = VecDeque::from([Cell::new(0, 3), Cell::new(1, 3), Cell::new(2, 3)]);
        state.direction = Direction::Left;
        state.score = 1;
        state.high_score = 9;

        let outcome = tick(&mut state);
        assert_eq!(outcome.new_high_score(), None);
        assert!(outcome.is_terminal());
        assert_eq!(state.high_score, 9);
    }

    #[test]
    fn test_body_collision_counts_tail() {
        // A 2x2 loop: head moving into the cell the tail is about to vacate
        let mut state = running(2);
        state.snake = VecDeque::from([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
        ]);
        state.direction = Direction::Right;
        state.food = Some(Cell::new(0, 0));

        assert_eq!(
            tick(&mut state),
            TickOutcome::Died {
                cause: Collision::Body,
                new_high_score: None
            }
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_pending_direction_is_committed() {
        let mut state = running(4);
        state.food = Some(Cell::new(0, 0));
        state.pending_direction = Some(Direction::Down);

        tick(&mut state);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.head(), Cell::new(10, 11));
    }

    #[test]
    fn test_filling_board_ends_session() {
        let mut state = running(6);
        // Fill every cell except (19, 19), head at (18, 19) moving right
        let mut cells: VecDeque<Cell> = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|c| !(c.y == BOARD_SIZE - 1 && c.x >= BOARD_SIZE - 2))
            .collect();
        cells.push_front(Cell::new(18, 19));
        state.snake = cells;
        state.food = Some(Cell::new(19, 19));
        state.score = 397;

        let outcome = tick(&mut state);
        assert_eq!(
            outcome,
            TickOutcome::BoardFilled {
                new_high_score: Some(398)
            }
        );
        assert_eq!(state.food, None);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake.len(), 400);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        let turns = [None, Some(Direction::Down), None, Some(Direction::Left), None];
        for turn in turns {
            a.pending_direction = turn;
            b.pending_direction = turn;
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(body(&a), body(&b));
        assert_eq!(a.food, b.food);
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    #[test]
    fn test_snake_stays_unique_while_alive() {
        let mut state = running(21);
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ];
        for step in 0..60 {
            state.pending_direction = Some(turns[(step / 4) % turns.len()]);
            if tick(&mut state).is_terminal() {
                break;
            }
            let unique: HashSet<_> = state.snake.iter().collect();
            assert_eq!(unique.len(), state.snake.len());
        }
    }
}
