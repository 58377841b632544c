//! Terminal input module (engine-facing).
//!
//! Turns raw `crossterm` key events into the per-frame
//! [`InputSnapshot`](crate::types::InputSnapshot) the simulation consumes.
//! The mapping is split in two:
//!
//! - [`map`]: which key means which [`Intent`] (and which keys quit)
//! - [`tracker`]: which intents are *held right now*, including for
//!   terminals that never report key releases

pub mod map;
pub mod tracker;

pub use arcade_types as types;

pub use map::{key_intent, should_quit, Intent};
pub use tracker::KeyTracker;
