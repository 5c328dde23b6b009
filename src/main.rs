//! Snake Overlay entry point
//!
//! The web build is a library (`open_snake` in `platform::web`). Natively this
//! runs a headless autoplay session through the same engine and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snake_overlay::consts::TICK_INTERVAL_MS;
    use snake_overlay::highscores::HighScoreStore;
    use snake_overlay::persistence::MemoryStorage;
    use snake_overlay::sim::{Command, GamePhase};
    use snake_overlay::{Session, Settings};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Snake Overlay (native) starting, autoplay seed {}", seed);

    let settings = Settings::default();
    let mut session = Session::new(
        &settings,
        HighScoreStore::new(MemoryStorage::new()),
        seed,
        false,
    );
    session.command(Command::Start);

    // Cap the run so a bot stuck in a loop still terminates
    let mut frames = 0u32;
    while session.phase() == GamePhase::Running && frames < 20_000 {
        if let Some(dir) = autopilot::choose(session.state()) {
            session.command(Command::Turn(dir));
        }
        session.advance(f64::from(TICK_INTERVAL_MS));
        frames += 1;
    }

    let state = session.state();
    println!(
        "seed {}: score {} (length {}, {} ticks, phase {:?})",
        seed,
        state.score,
        state.snake.len(),
        state.time_ticks,
        state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

/// Greedy demo bot: step toward the food, never into a wall or the body
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use snake_overlay::sim::{Cell, Direction, GameState};

    const DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn distance(a: Cell, b: Cell) -> i32 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    /// True if moving into `cell` next tick is survivable (the tail still blocks)
    fn is_safe(state: &GameState, cell: Cell) -> bool {
        cell.in_bounds() && !state.occupies(cell)
    }

    pub fn choose(state: &GameState) -> Option<Direction> {
        let head = state.head();
        let target = state.food?;
        DIRECTIONS
            .into_iter()
            .filter(|dir| *dir != state.direction.opposite())
            .filter(|dir| is_safe(state, head.step(*dir)))
            .min_by_key(|dir| distance(head.step(*dir), target))
    }
}
