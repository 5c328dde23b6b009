//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives in [`GameState`].

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for the start command
    NotStarted,
    /// Ticking
    Running,
    /// Ticking suspended
    Paused,
    /// Session ended (collision or full board)
    GameOver,
}

/// A board cell. Signed so an off-board candidate head can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the cell lies on the board
    #[inline]
    pub fn in_bounds(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Neighbouring cell one step along `dir`
    #[inline]
    pub fn step(&self, dir: Direction) -> Cell {
        let (dx, dy) = dir.vector();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Starting body, head first
pub const INITIAL_SNAKE: [Cell; 3] = [Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)];

/// Starting direction
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    /// Food placement RNG
    pub rng: Pcg32,
    /// Snake body, head at index 0
    pub snake: VecDeque<Cell>,
    /// Direction the last tick moved along
    pub direction: Direction,
    /// Accepted turn waiting for the next tick
    pub pending_direction: Option<Direction>,
    /// Current food cell (None only once the board is full)
    pub food: Option<Cell>,
    /// Score for this session
    pub score: u32,
    /// Cached best score, compared against on game over
    pub high_score: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Whether GameOver permits a restart
    pub retryable: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session with the given seed and previously stored best score
    pub fn new(seed: u64, high_score: u32, retryable: bool) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::from(INITIAL_SNAKE),
            direction: INITIAL_DIRECTION,
            pending_direction: None,
            food: None,
            score: 0,
            high_score,
            phase: GamePhase::NotStarted,
            retryable,
            time_ticks: 0,
        };
        state.food = place_food(&state.snake, &mut state.rng);
        state
    }

    /// Reset snake, direction, food, and score; keeps the RNG stream and the cached best score
    pub fn reset(&mut self) {
        self.snake = VecDeque::from(INITIAL_SNAKE);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = None;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::NotStarted;
        self.food = place_food(&self.snake, &mut self.rng);
        log::debug!(
            "Board reset (seed {}, high score {})",
            self.seed,
            self.high_score
        );
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// True if `cell` is occupied by any snake segment
    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Record `score` as finalized; returns the new best if it improved
    pub(crate) fn finalize_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.score)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_canonical() {
        let state = GameState::new(7, 3, true);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.snake.iter().copied().collect::<Vec<_>>(), INITIAL_SNAKE);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 3);
        let food = state.food.expect("fresh board has room for food");
        assert!(food.in_bounds());
        assert!(!state.occupies(food));
    }

    #[test]
    fn test_reset_keeps_seed_and_stream() {
        let mut state = GameState::new(99, 4, true);
        state.score = 2;
        state.time_ticks = 17;
        state.phase = GamePhase::GameOver;
        state.reset();

        assert_eq!(state.seed, 99);
        assert_eq!(state.high_score, 4);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::NotStarted);

        // Same seed, same number of placements
        let mut twin = GameState::new(99, 0, true);
        twin.reset();
        assert_eq!(state.food, twin.food);
    }

    #[test]
    fn test_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = dir.vector();
            let (ox, oy) = dir.opposite().vector();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(19, 19).in_bounds());
        assert!(!Cell::new(20, 5).in_bounds());
        assert!(!Cell::new(-1, 5).in_bounds());
        assert!(!Cell::new(5, 20).in_bounds());
    }

    #[test]
    fn test_finalize_only_on_improvement() {
        let mut state = GameState::new(1, 5, false);
        state.score = 4;
        assert_eq!(state.finalize_score(), None);
        assert_eq!(state.high_score, 5);
        state.score = 6;
        assert_eq!(state.finalize_score(), Some(6));
        assert_eq!(state.high_score, 6);
    }
}
