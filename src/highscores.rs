//! Best score persistence
//!
//! A single decimal integer string under one key. Anything missing or
//! unparsable reads as 0.

use crate::persistence::KeyValueStore;

/// Default storage key
pub const STORAGE_KEY: &str = "snake_high";

/// Read/write capability the session persists the best score through
pub trait ScoreStore {
    /// Stored best score (0 if absent or malformed)
    fn read(&self) -> u32;
    /// Overwrite the stored best score
    fn write(&mut self, score: u32);
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn write(&mut self, score: u32) {
        (**self).write(score)
    }
}

/// [`ScoreStore`] over any string key-value backend
#[derive(Debug, Clone)]
pub struct HighScoreStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueStore> HighScoreStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Parse a stored value; negative, fractional, or non-numeric input is 0
pub fn parse_score(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

impl<B: KeyValueStore> ScoreStore for HighScoreStore<B> {
    fn read(&self) -> u32 {
        match self.backend.get(&self.key) {
            Some(raw) => {
                let score = parse_score(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn write(&mut self, score: u32) {
        match self.backend.set(&self.key, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
    }
}
