//! Deterministic replay traces.
//!
//! A frame's outcome depends only on the current screen, entity state, the
//! delta and the input. Recording `(delta, input)` per frame is therefore
//! enough to reproduce a session without a clock or a terminal.
//!
//! Traces are JSON lines, one [`FrameRecord`] per frame:
//!
//! ```text
//! {"delta":0.016,"axis_x":-1.0,"axis_y":0.0,"actions":1}
//! ```

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{clamp_delta, StateManager, Surface};
use crate::types::{ActionSet, InputSnapshot, Vec2};

/// One frame of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub delta: f32,
    pub axis_x: f32,
    pub axis_y: f32,
    /// Raw [`ActionSet`] bits.
    pub actions: u8,
}

impl FrameRecord {
    pub fn new(delta: f32, input: &InputSnapshot) -> Self {
        Self {
            delta,
            axis_x: input.axis.x,
            axis_y: input.axis.y,
            actions: input.actions.bits(),
        }
    }

    pub fn input(&self) -> InputSnapshot {
        InputSnapshot::new(
            Vec2::new(self.axis_x, self.axis_y),
            ActionSet::from_bits(self.actions),
        )
    }
}

/// Appends frames to a trace.
pub struct Recorder {
    out: Box<dyn Write>,
    frames: u64,
}

impl Recorder {
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            frames: 0,
        }
    }

    /// Record into a new file at `path` (truncating any existing one).
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating replay trace {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn record(&mut self, delta: f32, input: &InputSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, &FrameRecord::new(delta, input))?;
        self.out.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Parse a JSON-lines trace. Blank lines are skipped.
///
/// A record whose delta is negative or non-finite is rejected with its line
/// number; such a frame cannot come from the loop.
pub fn load_trace(reader: impl BufRead) -> Result<Vec<FrameRecord>> {
    let mut frames = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("replay trace line {}", i + 1))?;
        if !frame.delta.is_finite() || frame.delta < 0.0 {
            bail!("replay trace line {}: invalid delta {}", i + 1, frame.delta);
        }
        frames.push(frame);
    }
    Ok(frames)
}

/// Outcome of [`replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames_run: usize,
    /// A screen asked to quit before the trace ran out.
    pub quit: bool,
}

/// Drive `states` through `trace`, rendering each frame into `surface`.
///
/// Mirrors the loop's frame order without polling or pacing. Every recorded
/// delta is clamped into `[0, max_delta_secs]` exactly as the loop clamps
/// live frames, so a trace recorded under a looser clamp cannot hand a
/// screen a larger step.
pub fn replay(
    states: &mut StateManager,
    surface: &mut dyn Surface,
    trace: &[FrameRecord],
    max_delta_secs: f32,
) -> ReplaySummary {
    for (n, frame) in trace.iter().enumerate() {
        let delta = clamp_delta(frame.delta, max_delta_secs);
        if delta != frame.delta {
            debug!(frame = n, recorded = frame.delta, delta, "replayed delta clamped");
        }
        if let Err(err) = states.update(delta, &frame.input()) {
            warn!(frame = n, %err, "screen transition failed during replay");
        }
        if states.quit_requested() {
            return ReplaySummary {
                frames_run: n + 1,
                quit: true,
            };
        }
        states.render(surface);
    }
    ReplaySummary {
        frames_run: trace.len(),
        quit: false,
    }
}
