//! Terminal implementation of the engine's `Platform`.

use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use arcade_engine::{Platform, Poll};
use arcade_input::{should_quit, KeyTracker};

use crate::canvas::Canvas;
use crate::core::{EngineError, Surface};
use crate::glyphs::GlyphSheet;
use crate::renderer::TerminalRenderer;
use crate::types::Vec2;

/// Crossterm input + [`Canvas`] rendering + diffed output.
pub struct TermPlatform {
    renderer: TerminalRenderer,
    tracker: KeyTracker,
    canvas: Canvas,
    entered: bool,
}

impl TermPlatform {
    /// Build the platform; the terminal is left untouched until [`enter`](Self::enter).
    pub fn new(world: Vec2, sheet: Rc<GlyphSheet>) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            tracker: KeyTracker::new(),
            canvas: Canvas::new(world, sheet, 80, 24),
            entered: false,
        }
    }

    /// Take over the terminal.
    ///
    /// Failing here means no frame can ever be shown, so it is reported as
    /// [`EngineError::FatalInit`].
    pub fn enter(&mut self) -> Result<(), EngineError> {
        let fatal = |e: anyhow::Error| EngineError::FatalInit {
            collaborator: "terminal",
            reason: format!("{e:#}"),
        };

        let (w, h) = crossterm::terminal::size()
            .map_err(|e| fatal(e.into()))?;
        self.renderer.enter().map_err(fatal)?;
        self.entered = true;

        // Without release events keys are auto-released by timeout instead.
        if self.renderer.enable_key_release_events().unwrap_or(false) {
            self.tracker = KeyTracker::new().with_release_timeout(None);
            debug!("terminal reports key releases");
        }

        self.canvas.resize(w, h);
        info!(cols = w, rows = h, "terminal ready");
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.renderer.exit()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl Platform for TermPlatform {
    fn poll(&mut self) -> Result<Poll> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(Poll::Quit);
                        }
                        self.tracker.press(key.code, Instant::now());
                    }
                    KeyEventKind::Release => self.tracker.release(key.code),
                },
                Event::Resize(w, h) => {
                    debug!(cols = w, rows = h, "terminal resized");
                    self.canvas.resize(w, h);
                    self.renderer.invalidate();
                }
                Event::FocusLost => self.tracker.reset(),
                _ => {}
            }
        }
        Ok(Poll::Input(self.tracker.snapshot(Instant::now())))
    }

    fn surface(&mut self) -> &mut dyn Surface {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<()> {
        self.renderer.present(self.canvas.framebuffer_mut())
    }
}

impl Drop for TermPlatform {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
