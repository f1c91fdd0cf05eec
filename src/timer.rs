//! One-second run clock
//!
//! Hosts with a single frame loop feed the elapsed wall time in; the timer
//! reports how many whole seconds have passed since the last call.

use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Accumulates frame time into 1 Hz firings
#[derive(Debug, Clone, Default)]
pub struct SecondTimer {
    accumulated: Duration,
    running: bool,
}

impl SecondTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running = true;
    }

    /// Stop and discard any partial second
    pub fn stop(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running = false;
    }

    /// Add frame time; returns the number of whole seconds that elapsed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= ONE_SECOND {
            self.accumulated -= ONE_SECOND;
            fired += 1;
        }
        fired
    }
}
