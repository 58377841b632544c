//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the same
//! types flow through the simulation core, the game loop, the terminal
//! backend and the replay recorder.
//!
//! # Coordinates
//!
//! World space is a 2D plane measured in abstract "pixels" with `+x` to the
//! right and `+y` downwards. Velocities are in pixels per second and every
//! delta handed to the simulation is in seconds.
//!
//! # Frame Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Default frame-rate cap |
//! | `DEFAULT_MAX_DELTA_SECS` | 0.05 | Largest delta a single update may see (1/20 s) |
//! | `KEY_RELEASE_TIMEOUT_MS` | 500 | Auto-release for terminals without key-up events |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{Action, ActionSet, InputSnapshot, Rect, Vec2};
//!
//! let a = Rect::new(0.0, 0.0, 10.0, 10.0);
//! let b = Rect::new(5.0, 5.0, 10.0, 10.0);
//! assert!(a.intersects(&b));
//!
//! let input = InputSnapshot::new(Vec2::new(2.0, 0.0), ActionSet::EMPTY.with(Action::Fire));
//! assert_eq!(input.axis.x, 1.0);
//! assert!(input.held(Action::Fire));
//! ```

pub mod geom;
pub mod input;

pub use geom::{Rect, Rgb, Vec2};
pub use input::{Action, ActionSet, InputSnapshot};

/// Default frame-rate cap (frames per second).
pub const TARGET_FPS: u32 = 60;

/// Default upper bound for a single frame's delta, in seconds (1/20 s).
///
/// Anything longer (debugger pause, window drag, terminal suspend) is clamped
/// so the simulation never takes one huge step.
pub const DEFAULT_MAX_DELTA_SECS: f32 = 0.05;

/// How long a key stays "held" without being re-reported, in milliseconds.
///
/// Most terminals only emit press and auto-repeat events, never releases.
/// The timeout has to bridge the usual delay before auto-repeat kicks in.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 500;
