use std::time::{Duration, Instant};

/// Frame clock: seconds since the previous tick.
pub struct Timer {
    last_update: Instant,
    /// Time between the last two ticks.
    pub delta: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
        }
    }

    /// Starts a new frame and returns its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.last_update = now;
        self.delta.as_secs_f32()
    }
}
