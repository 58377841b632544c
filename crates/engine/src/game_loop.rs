//! The per-frame driver.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::{LoopConfig, Pacing};
use crate::core::{Clock, FrameTimer, StateManager};
use crate::platform::{Platform, Poll};
use crate::replay::Recorder;

/// Whether the loop should keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoopStats {
    pub frames: u64,
    /// Frames whose delta had to be clamped.
    pub stalled_frames: u64,
    pub simulated_secs: f64,
    /// Screen transitions that failed (unknown screen name).
    pub failed_transitions: u64,
}

/// Drives input, simulation, rendering and pacing.
///
/// The loop is the only place that ends a session: it stops when the
/// platform reports [`Poll::Quit`] or when a screen asks to quit.
pub struct GameLoop<C: Clock> {
    config: LoopConfig,
    clock: C,
    timer: FrameTimer,
    recorder: Option<Recorder>,
    failed_transitions: u64,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(config: LoopConfig, clock: C) -> Self {
        Self {
            timer: FrameTimer::new(config.max_delta_secs),
            config,
            clock,
            recorder: None,
            failed_transitions: 0,
        }
    }

    /// Record every frame's `(delta, input)` for later replay.
    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run a single frame.
    ///
    /// Order: poll input, compute delta, update, (stop if a screen asked
    /// to quit), render, present, pace. A failed screen transition is logged
    /// and the frame continues; backend errors are returned.
    pub fn step<P: Platform + ?Sized>(
        &mut self,
        states: &mut StateManager,
        platform: &mut P,
    ) -> Result<Flow> {
        let frame_start = self.clock.now();

        let input = match platform.poll()? {
            Poll::Quit => {
                info!("quit signal from platform");
                return Ok(Flow::Quit);
            }
            Poll::Input(input) => input,
        };

        let delta = self.timer.tick(self.clock.now());
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(delta, &input)?;
        }

        if let Err(err) = states.update(delta, &input) {
            self.failed_transitions += 1;
            warn!(%err, "screen transition failed");
        }
        if states.quit_requested() {
            return Ok(Flow::Quit);
        }

        states.render(platform.surface());
        platform.present()?;

        self.pace(frame_start);
        Ok(Flow::Continue)
    }

    /// Step until quit, then flush any recorder and return the counters.
    pub fn run<P: Platform + ?Sized>(
        &mut self,
        states: &mut StateManager,
        platform: &mut P,
    ) -> Result<LoopStats> {
        info!(
            target_fps = self.config.target_fps,
            max_delta = self.config.max_delta_secs,
            pacing = ?self.config.pacing,
            "game loop started"
        );

        while self.step(states, platform)? == Flow::Continue {}

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.flush()?;
        }

        let stats = self.stats();
        info!(
            frames = stats.frames,
            stalled_frames = stats.stalled_frames,
            simulated_secs = stats.simulated_secs,
            failed_transitions = stats.failed_transitions,
            "game loop stopped"
        );
        Ok(stats)
    }

    pub fn stats(&self) -> LoopStats {
        LoopStats {
            frames: self.timer.frames(),
            stalled_frames: self.timer.stalled_frames(),
            simulated_secs: self.timer.simulated_secs(),
            failed_transitions: self.failed_transitions,
        }
    }

    fn pace(&self, frame_start: std::time::Duration) {
        if self.config.pacing != Pacing::Sleep {
            return;
        }
        let budget = self.config.frame_budget();
        let spent = self.clock.now().saturating_sub(frame_start);
        if let Some(rest) = budget.checked_sub(spent) {
            debug!(?rest, "pacing sleep");
            self.clock.sleep(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, RecordingSurface, Screen, Services, Surface, Transition};
    use crate::types::{InputSnapshot, Vec2};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    struct Idle(RecordingSurface, u32);

    impl Platform for Idle {
        fn poll(&mut self) -> Result<Poll> {
            Ok(Poll::Input(InputSnapshot::IDLE))
        }

        fn surface(&mut self) -> &mut dyn Surface {
            &mut self.0
        }

        fn present(&mut self) -> Result<()> {
            self.1 += 1;
            Ok(())
        }
    }

    struct Deltas(Rc<RefCell<Vec<f32>>>);

    impl Screen for Deltas {
        fn update(&mut self, delta: f32, _input: &InputSnapshot, _s: &mut Services) -> Transition {
            self.0.borrow_mut().push(delta);
            Transition::Stay
        }

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn setup() -> (StateManager, Rc<RefCell<Vec<f32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut states = StateManager::new();
        states.add_state("play", Deltas(seen.clone())).unwrap();
        states.change_state("play").unwrap();
        (states, seen)
    }

    #[test]
    fn sleep_pacing_fills_the_frame_budget() {
        let (mut states, _) = setup();
        let clock = ManualClock::new();
        let cfg = LoopConfig {
            target_fps: 50,
            ..LoopConfig::default()
        };
        let mut game = GameLoop::new(cfg, clock.clone());
        let mut platform = Idle(RecordingSurface::new(Vec2::new(1.0, 1.0)), 0);

        game.step(&mut states, &mut platform).unwrap();
        assert_eq!(clock.total_slept(), Duration::from_millis(20));
        assert_eq!(platform.1, 1);
    }

    #[test]
    fn backend_pacing_never_sleeps() {
        let (mut states, _) = setup();
        let clock = ManualClock::new();
        let cfg = LoopConfig {
            pacing: Pacing::Backend,
            ..LoopConfig::default()
        };
        let mut game = GameLoop::new(cfg, clock.clone());
        let mut platform = Idle(RecordingSurface::new(Vec2::new(1.0, 1.0)), 0);

        game.step(&mut states, &mut platform).unwrap();
        assert_eq!(clock.total_slept(), Duration::ZERO);
    }

    #[test]
    fn failed_transition_does_not_stop_the_loop() {
        struct Broken;
        impl Screen for Broken {
            fn update(&mut self, _d: f32, _i: &InputSnapshot, _s: &mut Services) -> Transition {
                Transition::to("nowhere")
            }
            fn render(&self, _surface: &mut dyn Surface) {}
        }

        let mut states = StateManager::new();
        states.add_state("broken", Broken).unwrap();
        states.change_state("broken").unwrap();

        let mut game = GameLoop::new(LoopConfig::default(), ManualClock::new());
        let mut platform = Idle(RecordingSurface::new(Vec2::new(1.0, 1.0)), 0);

        assert_eq!(game.step(&mut states, &mut platform).unwrap(), Flow::Continue);
        assert_eq!(states.current_name(), None);
        assert_eq!(game.stats().failed_transitions, 1);
    }
}
