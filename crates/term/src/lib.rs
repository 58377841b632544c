//! Terminal backend.
//!
//! A small, game-oriented rendering layer: screens draw in world coordinates
//! onto a [`Canvas`], which rasterises into a character [`FrameBuffer`];
//! [`TerminalRenderer`] flushes only the cells that changed since the last
//! frame. [`TermPlatform`] ties canvas, renderer and keyboard input together
//! behind the engine's `Platform` trait.
//!
//! Goals:
//! - Keep `core` free of I/O and testable
//! - Keep the world aspect ratio (terminal cells are about twice as tall as wide)
//! - Minimal terminal traffic per frame (diffed runs, style changes only when needed)

pub mod canvas;
pub mod fb;
pub mod glyphs;
pub mod platform;
pub mod renderer;

pub use arcade_core as core;
pub use arcade_types as types;

pub use canvas::{Canvas, Layout};
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use glyphs::{Glyph, GlyphAssets, GlyphSheet};
pub use platform::TermPlatform;
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
