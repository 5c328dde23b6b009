//! Fixed-interval step scheduler
//!
//! Frame time goes in, whole simulation steps come out. Capped per frame to
//! prevent a spiral of death after a long stall (tab in background, etc.).

/// Accumulates elapsed time into fixed steps
#[derive(Debug, Clone)]
pub struct Ticker {
    interval_ms: f64,
    max_substeps: u32,
    accumulator_ms: f64,
    cancelled: bool,
}

impl Ticker {
    pub fn new(interval_ms: u32, max_substeps: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms.max(1)),
            max_substeps: max_substeps.max(1),
            accumulator_ms: 0.0,
            cancelled: false,
        }
    }

    /// Add `elapsed_ms` and return the number of steps due.
    ///
    /// When `active` is false the pending time is discarded, so the next
    /// active period starts a fresh interval.
    pub fn advance(&mut self, elapsed_ms: f64, active: bool) -> u32 {
        if self.cancelled || !active {
            self.accumulator_ms = 0.0;
            return 0;
        }
        self.accumulator_ms += elapsed_ms.max(0.0);

        let mut steps = 0;
        while self.accumulator_ms >= self.interval_ms && steps < self.max_substeps {
            self.accumulator_ms -= self.interval_ms;
            steps += 1;
        }
        if steps == self.max_substeps {
            // Drop backlog we refuse to catch up on
            self.accumulator_ms = self.accumulator_ms.min(self.interval_ms);
        }
        steps
    }

    /// Stop for good; every later `advance` returns 0
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accumulator_ms = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
