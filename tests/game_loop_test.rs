//! Frame loop timing, pacing and shutdown, on a manual clock.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use arcade::core::{
    ManualClock, RecordingSurface, Screen, Services, StateManager, Surface, Transition,
};
use arcade::engine::{Flow, GameLoop, LoopConfig, Pacing, Platform, Poll};
use arcade::types::{InputSnapshot, Rgb, Vec2};

/// Platform fed from a script; each poll can also move the clock.
struct Scripted {
    clock: ManualClock,
    script: VecDeque<(Duration, Poll)>,
    surface: RecordingSurface,
    presented: u32,
}

impl Scripted {
    fn new(clock: &ManualClock, script: impl IntoIterator<Item = (Duration, Poll)>) -> Self {
        Self {
            clock: clock.clone(),
            script: script.into_iter().collect(),
            surface: RecordingSurface::new(Vec2::new(320.0, 200.0)),
            presented: 0,
        }
    }
}

impl Platform for Scripted {
    fn poll(&mut self) -> Result<Poll> {
        match self.script.pop_front() {
            Some((gap, poll)) => {
                self.clock.advance(gap);
                Ok(poll)
            }
            None => Ok(Poll::Quit),
        }
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

struct Deltas(Rc<RefCell<Vec<f32>>>);

impl Screen for Deltas {
    fn update(&mut self, delta: f32, _input: &InputSnapshot, _services: &mut Services) -> Transition {
        self.0.borrow_mut().push(delta);
        Transition::Stay
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Rgb::BLACK);
    }
}

fn recording_states() -> (StateManager, Rc<RefCell<Vec<f32>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut states = StateManager::new();
    states.add_state("play", Deltas(seen.clone())).unwrap();
    states.change_state("play").unwrap();
    (states, seen)
}

fn backend_paced(max_delta_secs: f32) -> LoopConfig {
    LoopConfig {
        max_delta_secs,
        pacing: Pacing::Backend,
        ..LoopConfig::default()
    }
}

fn idle(gap_ms: u64) -> (Duration, Poll) {
    (Duration::from_millis(gap_ms), Poll::Input(InputSnapshot::IDLE))
}

#[test]
fn two_second_stall_is_clamped_to_exactly_the_max_delta() {
    let (mut states, seen) = recording_states();
    let clock = ManualClock::new();
    let mut platform = Scripted::new(&clock, [idle(0), idle(2000)]);
    let mut game = GameLoop::new(backend_paced(0.05), clock.clone());

    let stats = game.run(&mut states, &mut platform).unwrap();

    assert_eq!(*seen.borrow(), [0.0, 0.05]);
    assert_eq!(stats.frames, 2);
    assert_eq!(stats.stalled_frames, 1);
}

#[test]
fn deltas_stay_within_zero_and_the_clamp() {
    let (mut states, seen) = recording_states();
    let clock = ManualClock::new();
    let gaps = [0, 16, 17, 3, 250, 0, 49, 51, 1000, 5, 33];
    let mut platform = Scripted::new(&clock, gaps.iter().map(|&ms| idle(ms)));
    let mut game = GameLoop::new(backend_paced(0.05), clock.clone());

    game.run(&mut states, &mut platform).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), gaps.len());
    for &d in seen.iter() {
        assert!((0.0..=0.05).contains(&d), "delta {d} out of range");
    }
}

#[test]
fn clock_going_backwards_yields_zero_delta() {
    let (mut states, seen) = recording_states();
    let clock = ManualClock::new();
    clock.set(Duration::from_secs(10));
    let mut game = GameLoop::new(backend_paced(0.05), clock.clone());
    let mut platform = Scripted::new(&clock, [idle(0)]);
    game.step(&mut states, &mut platform).unwrap();

    clock.set(Duration::from_secs(5));
    let mut platform = Scripted::new(&clock, [idle(0)]);
    game.step(&mut states, &mut platform).unwrap();

    assert_eq!(*seen.borrow(), [0.0, 0.0]);
}

#[test]
fn sleep_pacing_sleeps_only_the_rest_of_the_budget() {
    let (mut states, _) = recording_states();
    let clock = ManualClock::new();
    let cfg = LoopConfig {
        target_fps: 50,
        ..LoopConfig::default()
    };
    let mut game = GameLoop::new(cfg, clock.clone());

    // Poll itself takes 5ms of the 20ms budget.
    let mut platform = Scripted::new(&clock, [idle(5)]);
    assert_eq!(game.step(&mut states, &mut platform).unwrap(), Flow::Continue);
    assert_eq!(clock.total_slept(), Duration::from_millis(15));

    // Over budget: no sleep at all.
    let mut platform = Scripted::new(&clock, [idle(30)]);
    game.step(&mut states, &mut platform).unwrap();
    assert_eq!(clock.total_slept(), Duration::from_millis(15));
}

#[test]
fn platform_quit_stops_before_update_and_present() {
    let (mut states, seen) = recording_states();
    let clock = ManualClock::new();
    let mut platform = Scripted::new(&clock, [idle(0), idle(16), (Duration::ZERO, Poll::Quit), idle(16)]);
    let mut game = GameLoop::new(backend_paced(0.05), clock.clone());

    let stats = game.run(&mut states, &mut platform).unwrap();

    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(platform.presented, 2);
    assert_eq!(stats.frames, 2);
    assert_eq!(platform.script.len(), 1, "nothing polled after quit");
}

#[test]
fn screen_quit_stops_without_rendering_that_frame() {
    struct QuitAfter(u32);
    impl Screen for QuitAfter {
        fn update(&mut self, _d: f32, _i: &InputSnapshot, _s: &mut Services) -> Transition {
            self.0 = self.0.saturating_sub(1);
            if self.0 == 0 {
                Transition::Quit
            } else {
                Transition::Stay
            }
        }
        fn render(&self, surface: &mut dyn Surface) {
            surface.clear(Rgb::BLACK);
        }
    }

    let mut states = StateManager::new();
    states.add_state("play", QuitAfter(3)).unwrap();
    states.change_state("play").unwrap();
    let clock = ManualClock::new();
    let mut platform = Scripted::new(&clock, (0..10).map(|_| idle(16)));
    let mut game = GameLoop::new(backend_paced(0.05), clock.clone());

    game.run(&mut states, &mut platform).unwrap();

    assert_eq!(platform.presented, 2);
    assert_eq!(platform.surface.commands().len(), 2);
}

#[test]
fn config_from_env_lookup_overrides_defaults() {
    let cfg = LoopConfig::from_lookup(|key| match key {
        "ARCADE_TARGET_FPS" => Some("30".into()),
        "ARCADE_MAX_DELTA_MS" => Some("100".into()),
        "ARCADE_PACING" => Some("backend".into()),
        _ => None,
    });
    assert_eq!(cfg.target_fps, 30);
    assert!((cfg.max_delta_secs - 0.1).abs() < f32::EPSILON);
    assert_eq!(cfg.pacing, Pacing::Backend);

    let fallback = LoopConfig::from_lookup(|_| Some("nonsense".into()));
    assert_eq!(fallback, LoopConfig::default());
}
