//! Collaborator interfaces: rendering target, asset lookup and audio.
//!
//! The core never sees pixels, decoded images or sample buffers. It draws
//! through [`Surface`], asks an [`AssetLoader`] for opaque [`SpriteHandle`]s
//! and fires sound cues at an [`AudioSink`] by name.

use tracing::debug;

use crate::types::{Rect, Rgb, Vec2};

/// Opaque handle to a sprite owned by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(u32);

impl SpriteHandle {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Draw target for one frame, in world coordinates.
pub trait Surface {
    /// Size of the visible world area.
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect);
    /// Draw a single line of text with its top-left corner at `pos`.
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Rgb);
}

/// Supplies decoded assets by logical name.
pub trait AssetLoader {
    /// Look up a sprite. `None` when the backend has nothing by that name.
    fn sprite(&mut self, name: &str) -> Option<SpriteHandle>;
}

/// Fire-and-forget sound playback.
pub trait AudioSink {
    fn play(&mut self, name: &str);
}

/// Asset loader that knows no assets.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAssets;

impl AssetLoader for NullAssets {
    fn sprite(&mut self, _name: &str) -> Option<SpriteHandle> {
        None
    }
}

/// Audio sink that only logs the requested cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, name: &str) {
        debug!(sound = name, "play sound");
    }
}

/// Collaborators lent to screens on enter / update / exit.
pub struct Services {
    pub assets: Box<dyn AssetLoader>,
    pub audio: Box<dyn AudioSink>,
}

impl Services {
    pub fn new(assets: impl AssetLoader + 'static, audio: impl AudioSink + 'static) -> Self {
        Self {
            assets: Box::new(assets),
            audio: Box::new(audio),
        }
    }

    pub fn sprite(&mut self, name: &str) -> Option<SpriteHandle> {
        self.assets.sprite(name)
    }

    pub fn play(&mut self, name: &str) {
        self.audio.play(name);
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(NullAssets, SilentAudio)
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect(Rect, Rgb),
    Sprite(SpriteHandle, Rect),
    Text(Vec2, String, Rgb),
}

/// Headless surface that records draw calls in order.
///
/// Used for tests and for replaying traces without a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// All text drawn so far, one entry per call.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(_, s, _) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect) {
        self.commands.push(DrawCommand::Sprite(sprite, rect));
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Rgb) {
        self.commands
            .push(DrawCommand::Text(pos, text.to_string(), color));
    }
}
