//! Game loop driver.
//!
//! The loop owns frame timing and nothing else: it polls a [`Platform`] for
//! input, turns wall-clock time into a clamped delta, forwards both to the
//! [`StateManager`](arcade_core::StateManager), renders, presents and paces
//! to the target frame rate.
//!
//! # Module Structure
//!
//! - [`config`]: `LoopConfig`, read from environment variables
//! - [`platform`]: the `Platform` trait a backend implements
//! - [`game_loop`]: `GameLoop::step` / `GameLoop::run`
//! - [`replay`]: record `(delta, input)` traces and drive them back through a
//!   state manager
//!
//! # Environment Variables
//!
//! - `ARCADE_TARGET_FPS`: frame-rate cap (default: 60, `0` = uncapped)
//! - `ARCADE_MAX_DELTA_MS`: largest delta one update may see (default: 50)
//! - `ARCADE_PACING`: `sleep` (default) or `backend` (the renderer paces)
//!
//! # Example
//!
//! ```
//! use arcade_core::{ManualClock, RecordingSurface, Screen, Services, StateManager, Surface, Transition};
//! use arcade_core::types::{InputSnapshot, Vec2};
//! use arcade_engine::{Flow, GameLoop, LoopConfig, Platform, Poll};
//!
//! struct Title;
//! impl Screen for Title {
//!     fn update(&mut self, _dt: f32, _input: &InputSnapshot, _s: &mut Services) -> Transition {
//!         Transition::Quit
//!     }
//!     fn render(&self, _surface: &mut dyn Surface) {}
//! }
//!
//! struct Headless(RecordingSurface);
//! impl Platform for Headless {
//!     fn poll(&mut self) -> anyhow::Result<Poll> { Ok(Poll::Input(InputSnapshot::IDLE)) }
//!     fn surface(&mut self) -> &mut dyn Surface { &mut self.0 }
//!     fn present(&mut self) -> anyhow::Result<()> { Ok(()) }
//! }
//!
//! let mut states = StateManager::new();
//! states.add_state("title", Title).unwrap();
//! states.change_state("title").unwrap();
//!
//! let mut platform = Headless(RecordingSurface::new(Vec2::new(80.0, 24.0)));
//! let mut game = GameLoop::new(LoopConfig::default(), ManualClock::new());
//! assert_eq!(game.step(&mut states, &mut platform).unwrap(), Flow::Quit);
//! ```

pub mod config;
pub mod game_loop;
pub mod platform;
pub mod replay;

pub use arcade_core as core;
pub use arcade_types as types;

pub use config::{LoopConfig, Pacing};
pub use game_loop::{Flow, GameLoop, LoopStats};
pub use platform::{Platform, Poll};
pub use replay::{load_trace, replay, FrameRecord, Recorder, ReplaySummary};
