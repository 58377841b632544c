//! Recording a live session and replaying it reproduces every frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use arcade::core::{
    ManualClock, RecordingSurface, Screen, Services, StateManager, Surface, Transition,
};
use arcade::demo::{self, WORLD};
use arcade::engine::{load_trace, replay, GameLoop, LoopConfig, Pacing, Platform, Poll, Recorder};
use arcade::types::{Action, ActionSet, InputSnapshot, Rgb, Vec2};

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Scripted {
    clock: ManualClock,
    inputs: VecDeque<InputSnapshot>,
    surface: RecordingSurface,
}

impl Platform for Scripted {
    fn poll(&mut self) -> Result<Poll> {
        self.clock.advance(Duration::from_micros(16_667));
        Ok(self.inputs.pop_front().map_or(Poll::Quit, Poll::Input))
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

fn session_inputs() -> Vec<InputSnapshot> {
    let confirm = InputSnapshot::new(Vec2::ZERO, ActionSet::EMPTY.with(Action::Confirm));
    let fire_left = InputSnapshot::new(Vec2::new(-1.0, 0.0), ActionSet::EMPTY.with(Action::Fire));
    let fire_right = InputSnapshot::new(Vec2::new(1.0, 0.0), ActionSet::EMPTY.with(Action::Fire));

    let mut inputs = vec![InputSnapshot::IDLE, confirm, InputSnapshot::IDLE];
    inputs.extend(std::iter::repeat(fire_left).take(40));
    inputs.extend(std::iter::repeat(fire_right).take(80));
    inputs.extend(std::iter::repeat(InputSnapshot::IDLE).take(30));
    inputs
}

#[test]
fn replayed_trace_renders_the_same_frames() {
    let inputs = session_inputs();
    let buf = SharedBuf::default();

    let (mut live_states, live_session) = demo::new_game(Services::default()).unwrap();
    let clock = ManualClock::new();
    let mut platform = Scripted {
        clock: clock.clone(),
        inputs: inputs.iter().copied().collect(),
        surface: RecordingSurface::new(WORLD),
    };
    let cfg = LoopConfig {
        pacing: Pacing::Backend,
        ..LoopConfig::default()
    };
    let mut game = GameLoop::new(cfg, clock).with_recorder(Recorder::new(buf.clone()));
    let stats = game.run(&mut live_states, &mut platform).unwrap();
    assert_eq!(stats.frames, inputs.len() as u64);
    assert_eq!(live_states.current_name(), Some(demo::PLAY));

    let recorded = buf.0.borrow().clone();
    let first: serde_json::Value =
        serde_json::from_slice(recorded.split(|&b| b == b'\n').next().unwrap()).unwrap();
    assert_eq!(first["delta"], 0.0);
    assert_eq!(first["actions"], 0);

    let trace = load_trace(Cursor::new(recorded)).unwrap();
    assert_eq!(trace.len(), inputs.len());
    assert_eq!(trace[0].delta, 0.0);

    let (mut replay_states, replay_session) = demo::new_game(Services::default()).unwrap();
    let mut surface = RecordingSurface::new(WORLD);
    let summary = replay(&mut replay_states, &mut surface, &trace, cfg.max_delta_secs);

    assert_eq!(summary.frames_run, trace.len());
    assert!(!summary.quit);
    assert_eq!(replay_states.current_name(), live_states.current_name());
    assert_eq!(replay_session.score(), live_session.score());
    assert_eq!(surface.commands(), platform.surface.commands());
}

/// One idle JSON line per delta.
fn idle_trace(deltas: &[f32]) -> String {
    deltas
        .iter()
        .map(|&delta| {
            serde_json::json!({ "delta": delta, "axis_x": 0.0, "axis_y": 0.0, "actions": 0 })
                .to_string()
                + "\n"
        })
        .collect()
}

#[test]
fn malformed_line_reports_its_number() {
    let text = idle_trace(&[0.016]) + "\nnot json\n";
    let err = load_trace(Cursor::new(text)).unwrap_err();
    assert!(format!("{err:#}").contains("line 3"), "{err:#}");
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

#[test]
fn replayed_deltas_are_clamped_like_live_frames() {
    // Recorded under a looser clamp: 2.0s would never reach a screen live.
    let text = idle_trace(&[2.0, 0.016]);
    let trace = load_trace(Cursor::new(text)).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut states = StateManager::new();
    states.add_state("play", Deltas(seen.clone())).unwrap();
    states.change_state("play").unwrap();
    let mut surface = RecordingSurface::new(WORLD);

    replay(&mut states, &mut surface, &trace, LoopConfig::default().max_delta_secs);

    assert_eq!(*seen.borrow(), [0.05, 0.016]);
}

#[test]
fn negative_recorded_delta_is_rejected() {
    let text = idle_trace(&[0.016, -1.0]);
    let err = load_trace(Cursor::new(text)).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"), "{err:#}");
}
