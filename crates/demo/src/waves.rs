//! Wave formations.

use arcade_types::Vec2;

use crate::actors::{RaiderPattern, RAIDER_SIZE};

/// One wave: a grid of raiders sharing a movement pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub rows: usize,
    pub cols: usize,
    pub amplitude: f32,
    pub frequency: f32,
    pub descent: f32,
    pub fire_interval: f32,
}

pub static WAVES: [Wave; 3] = [
    Wave {
        rows: 2,
        cols: 6,
        amplitude: 24.0,
        frequency: 1.2,
        descent: 3.0,
        fire_interval: 4.0,
    },
    Wave {
        rows: 3,
        cols: 6,
        amplitude: 32.0,
        frequency: 1.6,
        descent: 4.0,
        fire_interval: 3.0,
    },
    Wave {
        rows: 3,
        cols: 8,
        amplitude: 18.0,
        frequency: 2.4,
        descent: 5.5,
        fire_interval: 2.2,
    },
];

const TOP_MARGIN: f32 = 16.0;
const GAP: Vec2 = Vec2::new(10.0, 8.0);

impl Wave {
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anchor and pattern for each raider, row by row.
    pub fn formation(&self, world: Vec2) -> impl Iterator<Item = (Vec2, RaiderPattern)> + '_ {
        let pitch = RAIDER_SIZE + GAP;
        let width = self.cols as f32 * pitch.x - GAP.x;
        let left = (world.x - width) * 0.5;
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                let anchor = Vec2::new(
                    left + col as f32 * pitch.x,
                    TOP_MARGIN + row as f32 * pitch.y,
                );
                // Alternate rows sweep in opposite directions.
                let phase = if row % 2 == 0 { 0.0 } else { std::f32::consts::PI };
                let pattern = RaiderPattern {
                    amplitude: self.amplitude,
                    frequency: self.frequency,
                    phase: phase + col as f32 * 0.37,
                    descent: self.descent,
                    fire_interval: self.fire_interval,
                };
                (anchor, pattern)
            })
        })
    }
}
