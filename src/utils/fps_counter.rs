use std::time::{Duration, Instant};

/// Frames-per-second over one-second windows, for the on-screen counter.
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    pub current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            window_start: start,
            frames: 0,
            current_fps: 0.0,
        }
    }

    /// Counts a frame. Returns the new rate whenever a window closes.
    pub fn update(&mut self) -> Option<f32> {
        self.frame_at(Instant::now())
    }

    pub fn frame_at(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Self::WINDOW {
            return None;
        }

        self.current_fps = self.frames as f32 / elapsed.as_secs_f32();
        self.window_start = now;
        self.frames = 0;
        Some(self.current_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let start = Instant::now();
        let mut fps = FpsCounter::starting_at(start);
        for i in 1..60 {
            assert_eq!(fps.frame_at(start + Duration::from_millis(i * 16)), None);
        }
        let rate = fps.frame_at(start + Duration::from_secs(1)).unwrap();
        assert!((rate - 60.0).abs() < 1e-3);
    }
}
