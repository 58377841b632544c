//! Sprites for the terminal: a sprite is one styled character.

use std::rc::Rc;

use crate::core::{AssetLoader, SpriteHandle};
use crate::types::Rgb;

/// What a sprite looks like in a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bold: bool,
}

impl Glyph {
    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self { ch, fg, bold: false }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Name → glyph table. Handles are indices into the table.
#[derive(Debug, Clone, Default)]
pub struct GlyphSheet {
    entries: Vec<(String, Glyph)>,
}

impl GlyphSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a glyph and return its handle.
    pub fn insert(&mut self, name: impl Into<String>, glyph: Glyph) -> SpriteHandle {
        let name = name.into();
        if let Some(i) = self.entries.iter().position(|(n, _)| *n == name) {
            self.entries[i].1 = glyph;
            return SpriteHandle::from_raw(i as u32);
        }
        self.entries.push((name, glyph));
        SpriteHandle::from_raw((self.entries.len() - 1) as u32)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, glyph: Glyph) -> Self {
        self.insert(name, glyph);
        self
    }

    pub fn handle(&self, name: &str) -> Option<SpriteHandle> {
        self.entries
            .iter()
            .position(|(n, _)| n == name)
            .map(|i| SpriteHandle::from_raw(i as u32))
    }

    pub fn get(&self, handle: SpriteHandle) -> Option<Glyph> {
        self.entries.get(handle.raw() as usize).map(|(_, g)| *g)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// [`AssetLoader`] that resolves sprite names against a shared [`GlyphSheet`].
#[derive(Debug, Clone)]
pub struct GlyphAssets {
    sheet: Rc<GlyphSheet>,
}

impl GlyphAssets {
    pub fn new(sheet: Rc<GlyphSheet>) -> Self {
        Self { sheet }
    }
}

impl AssetLoader for GlyphAssets {
    fn sprite(&mut self, name: &str) -> Option<SpriteHandle> {
        self.sheet.handle(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_resolve_by_name() {
        let sheet = GlyphSheet::new()
            .with("ship", Glyph::new('A', Rgb::WHITE))
            .with("bolt", Glyph::new('|', Rgb::new(255, 255, 0)));
        let mut assets = GlyphAssets::new(Rc::new(sheet.clone()));

        let bolt = assets.sprite("bolt").unwrap();
        assert_eq!(sheet.get(bolt).unwrap().ch, '|');
        assert_eq!(assets.sprite("missing"), None);
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut sheet = GlyphSheet::new();
        let a = sheet.insert("ship", Glyph::new('A', Rgb::WHITE));
        let b = sheet.insert("ship", Glyph::new('V', Rgb::WHITE));
        assert_eq!(a, b);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(a).unwrap().ch, 'V');
    }
}
