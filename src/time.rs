use std::time::{Duration, Instant};

/// Measures wall-clock time between consecutive frames.
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Milliseconds since the previous call (or since creation).
    pub fn frame(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        Self::to_millis(elapsed)
    }

    fn to_millis(duration: Duration) -> f32 {
        duration.as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_non_negative_and_advances() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.frame();
        assert!(first >= 4.9);
        let second = clock.frame();
        assert!(second >= 0.0 && second < first);
    }

    #[test]
    fn test_to_millis() {
        assert!((FrameClock::to_millis(Duration::from_millis(16)) - 16.0).abs() < 1e-4);
    }
}
