//=========================================================================
// Frame Limiter
//=========================================================================
//
// Measures the delta between ticks and sleeps away the rest of the frame
// budget (1 / target TPS). With no target the loop runs unthrottled.
//
//=========================================================================

use std::thread;
use std::time::{Duration, Instant};

//=== FrameLimiter ========================================================

#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_duration: Option<Duration>,
    frame_start: Instant,
}

impl FrameLimiter {
    /// # Panics
    ///
    /// Panics if `target_tps` is set and not positive.
    pub fn new(target_tps: Option<f64>) -> Self {
        let frame_duration = target_tps.map(|tps| {
            assert!(tps > 0.0, "TPS must be positive, got {}", tps);
            Duration::from_secs_f64(1.0 / tps)
        });

        Self {
            frame_duration,
            frame_start: Instant::now(),
        }
    }

    /// Starts a new frame, returning seconds elapsed since the previous one.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.frame_start);
        self.frame_start = now;
        delta.as_secs_f32()
    }

    /// Restarts the current frame now, discarding the time since the
    /// last `begin_frame` (or since construction).
    pub fn restart(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the current frame budget.
    pub fn remaining(&self) -> Duration {
        match self.frame_duration {
            Some(budget) => budget.saturating_sub(self.frame_start.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleeps until the current frame budget is spent.
    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame_duration
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_from_tps() {
        let limiter = FrameLimiter::new(Some(50.0));
        assert_eq!(limiter.frame_duration(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn unlimited_never_waits() {
        let limiter = FrameLimiter::new(None);
        assert_eq!(limiter.remaining(), Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn zero_tps_panics() {
        FrameLimiter::new(Some(0.0));
    }

    #[test]
    fn wait_fills_frame_budget() {
        let mut limiter = FrameLimiter::new(Some(100.0));
        limiter.begin_frame();
        limiter.wait();

        let delta = limiter.begin_frame();
        assert!(delta >= 0.009, "delta was {delta}");
    }

    #[test]
    fn restart_discards_setup_time() {
        let mut limiter = FrameLimiter::new(Some(60.0));
        thread::sleep(Duration::from_millis(50));

        limiter.restart();
        let delta = limiter.begin_frame();
        assert!(delta < 0.05, "delta was {delta}");
    }
}
