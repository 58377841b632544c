//! Frame timing: monotonic clocks and the clamped per-frame delta.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

/// Monotonic time source.
///
/// `now` is measured from an arbitrary origin fixed when the clock is
/// created. `sleep` blocks (or, for test clocks, advances time).
pub trait Clock {
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
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
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Deterministic clock for tests and replays.
///
/// Clones share the same time, so a test can keep a handle and advance the
/// clock owned by a game loop.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Total time handed to [`Clock::sleep`] so far.
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.slept.set(self.slept.get() + duration);
        self.advance(duration);
    }
}

/// Clamp a raw step into `[0, max_delta]`.
///
/// Negative and non-finite steps become `0.0`.
pub fn clamp_delta(raw: f32, max_delta: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        0.0
    } else {
        raw.min(max_delta.max(0.0))
    }
}

/// Produces the per-frame delta, in seconds.
///
/// The first tick yields `0.0`. Later ticks yield the time since the
/// previous tick, clamped into `[0, max_delta]`. A clamp means the frame
/// stalled (debugger, window drag, terminal suspend); it is counted but the
/// simulation just proceeds at the capped step.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    max_delta: f32,
    last: Option<Duration>,
    frames: u64,
    stalled_frames: u64,
    simulated_secs: f64,
}

impl FrameTimer {
    /// Create a timer. A non-finite or negative clamp is treated as zero.
    pub fn new(max_delta_secs: f32) -> Self {
        let max_delta = if max_delta_secs.is_finite() {
            max_delta_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            max_delta,
            last: None,
            frames: 0,
            stalled_frames: 0,
            simulated_secs: 0.0,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Advance to `now` and return the clamped delta.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let raw = match self.last {
            // A clock that went backwards contributes nothing.
            Some(last) => now.saturating_sub(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        self.frames += 1;

        let delta = clamp_delta(raw, self.max_delta);
        if raw > self.max_delta {
            self.stalled_frames += 1;
            debug!(raw, clamped = self.max_delta, "stalled frame clamped");
        }
        self.simulated_secs += f64::from(delta);
        delta
    }

    /// Forget the previous tick so the next delta is zero again.
    ///
    /// Useful after a deliberate suspension, e.g. when the process was stopped.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stalled_frames(&self) -> u64 {
        self.stalled_frames
    }

    /// Sum of every delta handed out so far.
    pub fn simulated_secs(&self) -> f64 {
        self.simulated_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_delta_bounds_every_step() {
        assert_eq!(clamp_delta(2.0, 0.05), 0.05);
        assert_eq!(clamp_delta(-1.0, 0.05), 0.0);
        assert_eq!(clamp_delta(f32::NAN, 0.05), 0.0);
        assert_eq!(clamp_delta(f32::INFINITY, 0.05), 0.0);
        assert_eq!(clamp_delta(0.016, 0.05), 0.016);
    }

    #[test]
    fn first_tick_is_zero() {
        let mut t = FrameTimer::new(0.05);
        assert_eq!(t.tick(Duration::from_secs(10)), 0.0);
        assert_eq!(t.frames(), 1);
    }

    #[test]
    fn delta_is_elapsed_seconds() {
        let mut t = FrameTimer::new(0.05);
        t.tick(Duration::from_millis(100));
        let dt = t.tick(Duration::from_millis(116));
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(t.stalled_frames(), 0);
    }

    #[test]
    fn long_frame_is_clamped_and_counted() {
        let mut t = FrameTimer::new(0.05);
        t.tick(Duration::ZERO);
        assert_eq!(t.tick(Duration::from_secs(2)), 0.05);
        assert_eq!(t.stalled_frames(), 1);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let mut t = FrameTimer::new(0.05);
        t.tick(Duration::from_secs(5));
        assert_eq!(t.tick(Duration::from_secs(4)), 0.0);
    }

    #[test]
    fn reset_restarts_from_zero_delta() {
        let mut t = FrameTimer::new(0.05);
        t.tick(Duration::ZERO);
        t.reset();
        assert_eq!(t.tick(Duration::from_millis(30)), 0.0);
    }

    #[test]
    fn manual_clock_sleep_advances_shared_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        clock.sleep(Duration::from_millis(7));
        handle.advance(Duration::from_millis(3));
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(handle.total_slept(), Duration::from_millis(7));
    }

    #[test]
    fn negative_clamp_is_zero() {
        let t = FrameTimer::new(-1.0);
        assert_eq!(t.max_delta(), 0.0);
    }
}
