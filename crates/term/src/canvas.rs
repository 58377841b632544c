//! World-space drawing onto a terminal framebuffer.
//!
//! The world (for example 320x200 units) is scaled uniformly into the
//! terminal and centered inside a one-cell border. A terminal cell is treated
//! as twice as tall as it is wide, so one row covers twice the world units
//! of one column and shapes keep their proportions.

use std::rc::Rc;

use crate::core::{SpriteHandle, Surface};
use crate::fb::{CellStyle, FrameBuffer};
use crate::glyphs::GlyphSheet;
use crate::types::{Rect, Rgb, Vec2};

const BORDER: Rgb = Rgb::new(150, 150, 160);
const OUTSIDE: Rgb = Rgb::BLACK;

/// Where the world lands in the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Top-left cell of the play area (inside the border).
    pub origin_x: u16,
    pub origin_y: u16,
    /// Play area size in cells.
    pub cols: u16,
    pub rows: u16,
    /// World units per column; a row spans twice as many.
    pub units_per_col: f32,
}

impl Layout {
    /// Fit `world` into a `term_w` x `term_h` terminal.
    pub fn fit(world: Vec2, term_w: u16, term_h: u16) -> Self {
        let avail_cols = term_w.saturating_sub(2).max(1) as f32;
        let avail_rows = term_h.saturating_sub(2).max(1) as f32;
        let units_per_col = (world.x / avail_cols)
            .max(world.y / (2.0 * avail_rows))
            .max(f32::EPSILON);

        let cols = ((world.x / units_per_col).round() as u16).clamp(1, avail_cols as u16);
        let rows = ((world.y / (2.0 * units_per_col)).round() as u16).clamp(1, avail_rows as u16);

        Self {
            origin_x: 1 + (avail_cols as u16 - cols) / 2,
            origin_y: 1 + (avail_rows as u16 - rows) / 2,
            cols,
            rows,
            units_per_col,
        }
    }

    pub fn units_per_row(&self) -> f32 {
        self.units_per_col * 2.0
    }

    /// Cell column for world x, relative to the play area (may be negative).
    fn col(&self, x: f32) -> i32 {
        (x / self.units_per_col).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.units_per_row()).floor() as i32
    }

    /// Play-area cells covered by `rect`, clipped: `(x0, y0, x1, y1)` with
    /// exclusive ends, in absolute terminal cells. `None` when nothing is visible.
    ///
    /// Anything with positive area covers at least one cell.
    pub fn cells_for(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return None;
        }
        let x0 = self.col(rect.left()).max(0);
        let y0 = self.row(rect.top()).max(0);
        let x1 = ((rect.right() / self.units_per_col).ceil() as i32).min(self.cols as i32);
        let y1 = ((rect.bottom() / self.units_per_row()).ceil() as i32).min(self.rows as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((
            self.origin_x + x0 as u16,
            self.origin_y + y0 as u16,
            self.origin_x + x1 as u16,
            self.origin_y + y1 as u16,
        ))
    }

    /// Absolute cell for a world point, if it lies in the play area.
    pub fn cell_at(&self, pos: Vec2) -> Option<(u16, u16)> {
        let (c, r) = (self.col(pos.x), self.row(pos.y));
        if c < 0 || r < 0 || c >= self.cols as i32 || r >= self.rows as i32 {
            return None;
        }
        Some((self.origin_x + c as u16, self.origin_y + r as u16))
    }
}

/// A [`Surface`] over a terminal framebuffer.
pub struct Canvas {
    world: Vec2,
    sheet: Rc<GlyphSheet>,
    layout: Layout,
    fb: FrameBuffer,
}

impl Canvas {
    pub fn new(world: Vec2, sheet: Rc<GlyphSheet>, term_w: u16, term_h: u16) -> Self {
        Self {
            world,
            sheet,
            layout: Layout::fit(world, term_w, term_h),
            fb: FrameBuffer::new(term_w, term_h),
        }
    }

    /// Refit the world after a terminal resize.
    pub fn resize(&mut self, term_w: u16, term_h: u16) {
        self.layout = Layout::fit(self.world, term_w, term_h);
        self.fb.resize(term_w, term_h);
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    fn draw_border(&mut self) {
        let l = self.layout;
        let style = CellStyle::new(BORDER, OUTSIDE);
        let (left, top) = (l.origin_x - 1, l.origin_y - 1);
        let (right, bottom) = (l.origin_x + l.cols, l.origin_y + l.rows);

        for x in l.origin_x..right {
            self.fb.set(x, top, style.into_cell('─'));
            self.fb.set(x, bottom, style.into_cell('─'));
        }
        for y in l.origin_y..bottom {
            self.fb.set(left, y, style.into_cell('│'));
            self.fb.set(right, y, style.into_cell('│'));
        }
        self.fb.set(left, top, style.into_cell('┌'));
        self.fb.set(right, top, style.into_cell('┐'));
        self.fb.set(left, bottom, style.into_cell('└'));
        self.fb.set(right, bottom, style.into_cell('┘'));
    }
}

impl Surface for Canvas {
    fn size(&self) -> Vec2 {
        self.world
    }

    /// Clears the whole terminal and repaints the play-area border.
    fn clear(&mut self, color: Rgb) {
        self.fb.clear(CellStyle::new(Rgb::WHITE, OUTSIDE).into_cell(' '));
        let l = self.layout;
        self.fb.fill(
            l.origin_x,
            l.origin_y,
            l.origin_x + l.cols,
            l.origin_y + l.rows,
            CellStyle::new(Rgb::WHITE, color).into_cell(' '),
        );
        self.draw_border();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if let Some((x0, y0, x1, y1)) = self.layout.cells_for(rect) {
            self.fb
                .fill(x0, y0, x1, y1, CellStyle::new(color, color).into_cell(' '));
        }
    }

    fn draw_sprite(&mut self, sprite: SpriteHandle, rect: Rect) {
        let glyph = self.sheet.get(sprite);
        let Some((x0, y0, x1, y1)) = self.layout.cells_for(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let Some(mut cell) = self.fb.get(x, y) else {
                    continue;
                };
                match glyph {
                    Some(g) => {
                        cell.ch = g.ch;
                        cell.style.fg = g.fg;
                        cell.style.bold = g.bold;
                    }
                    None => {
                        cell.ch = '?';
                        cell.style.fg = Rgb::new(255, 0, 255);
                    }
                }
                self.fb.set(x, y, cell);
            }
        }
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Rgb) {
        if let Some((x, y)) = self.layout.cell_at(pos) {
            let max_x = self.layout.origin_x + self.layout.cols;
            self.fb.put_str_clipped(x, y, max_x, text, color);
        }
    }
}
