//! Backend seam: input source plus rendering target plus presentation.

use anyhow::Result;

use crate::core::Surface;
use crate::types::InputSnapshot;

/// Result of polling the backend at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    Input(InputSnapshot),
    /// Window closed, quit key, signal: the loop stops before simulating.
    Quit,
}

/// Everything the loop needs from a rendering / input backend.
///
/// Called once each per frame, in order: `poll`, `surface` (for the render
/// pass), `present`.
pub trait Platform {
    /// Drain pending input events without blocking.
    fn poll(&mut self) -> Result<Poll>;

    /// Draw target for this frame's render pass.
    fn surface(&mut self) -> &mut dyn Surface;

    /// Show the frame that was just rendered.
    fn present(&mut self) -> Result<()>;
}
