//! Frame timing for the Dough runtime
//!
//! The game loop calls [`FramePacer::frame_start`] before input dispatch and
//! [`FramePacer::frame_end`] after rendering. Delta time is the real elapsed
//! time between frame starts, so systems must cope with variable steps,
//! including a zero step on the very first frame.

use std::thread;
use std::time::{Duration, Instant};

/// Source of monotonic time and sleeping for the frame pacer.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;

    /// Block for the given duration.
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`thread::sleep`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Deterministic clock that only moves when told to.
///
/// Sleeping advances the clock by exactly the requested amount, which makes
/// it suitable for tests and for reproducible headless runs.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    slept: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate work taking `duration`.
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn total_slept(&self) -> Duration {
        self.slept
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.slept += duration;
    }
}

/// Fixed-FPS frame pacer.
#[derive(Debug, Clone)]
pub struct FramePacer<C: Clock = SystemClock> {
    clock: C,
    target: Duration,
    frame_start: Option<Duration>,
    delta_time: f64,
    frame_count: u64,
}

impl FramePacer<SystemClock> {
    /// Create a pacer targeting `fps` frames per second on the wall clock.
    pub fn new(fps: u32) -> Self {
        Self::with_clock(fps, SystemClock::new())
    }
}

impl<C: Clock> FramePacer<C> {
    /// Create a pacer with a custom clock. An `fps` of zero disables pacing.
    pub fn with_clock(fps: u32, clock: C) -> Self {
        let target = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            clock,
            target,
            frame_start: None,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Target duration of one frame (`1 / fps`).
    pub fn target_frame_duration(&self) -> Duration {
        self.target
    }

    /// Mark the start of a frame and return the delta time in seconds since
    /// the previous frame start. The first frame reports zero.
    pub fn frame_start(&mut self) -> f64 {
        let now = self.clock.now();
        self.delta_time = match self.frame_start {
            Some(previous) => now.saturating_sub(previous).as_secs_f64(),
            None => 0.0,
        };
        self.frame_start = Some(now);
        self.delta_time
    }

    /// Mark the end of a frame, sleeping out whatever remains of the target
    /// frame duration. Returns the time slept; zero if the frame overran.
    pub fn frame_end(&mut self) -> Duration {
        self.frame_count += 1;
        let Some(start) = self.frame_start else {
            return Duration::ZERO;
        };

        let elapsed = self.clock.now().saturating_sub(start);
        if elapsed >= self.target {
            return Duration::ZERO;
        }

        let remaining = self.target - elapsed;
        self.clock.sleep(remaining);
        remaining
    }

    /// Delta time reported by the last [`frame_start`](Self::frame_start).
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Duration = Duration::from_millis(20);

    #[test]
    fn first_frame_has_zero_delta() {
        let mut pacer = FramePacer::with_clock(50, ManualClock::new());
        pacer.clock_mut().advance(Duration::from_secs(3));
        assert_eq!(pacer.frame_start(), 0.0);
    }

    #[test]
    fn short_frame_is_padded_to_target() {
        let mut pacer = FramePacer::with_clock(50, ManualClock::new());
        assert_eq!(pacer.target_frame_duration(), TARGET);

        let start = pacer.clock().now();
        pacer.frame_start();
        pacer.clock_mut().advance(Duration::from_millis(5));
        let slept = pacer.frame_end();

        assert_eq!(slept, Duration::from_millis(15));
        assert_eq!(pacer.clock().now() - start, TARGET);

        let dt = pacer.frame_start();
        assert!((dt - 0.020).abs() < 1e-9);
    }

    #[test]
    fn long_frame_is_not_padded() {
        let mut pacer = FramePacer::with_clock(50, ManualClock::new());
        pacer.frame_start();
        pacer.clock_mut().advance(Duration::from_millis(35));
        assert_eq!(pacer.frame_end(), Duration::ZERO);
        assert_eq!(pacer.clock().total_slept(), Duration::ZERO);

        let dt = pacer.frame_start();
        assert!((dt - 0.035).abs() < 1e-9);
        assert_eq!(pacer.delta_time(), dt);
        assert_eq!(pacer.frame_count(), 1);
    }

    #[test]
    fn wall_clock_pacer_targets_fps() {
        let pacer = FramePacer::new(50);
        assert_eq!(pacer.target_frame_duration(), TARGET);
        assert_eq!(pacer.delta_time(), 0.0);
        assert_eq!(pacer.frame_count(), 0);
    }

    #[test]
    fn zero_fps_disables_pacing() {
        let mut pacer = FramePacer::with_clock(0, ManualClock::new());
        pacer.frame_start();
        pacer.clock_mut().advance(Duration::from_millis(1));
        assert_eq!(pacer.frame_end(), Duration::ZERO);
    }
}
