//! Star Sweep in the terminal (default binary).
//!
//! Environment:
//! - `ARCADE_TARGET_FPS`, `ARCADE_MAX_DELTA_MS`, `ARCADE_PACING`: loop tuning.
//! - `ARCADE_LOG_PATH`: write logs to this file (`RUST_LOG` filters).
//! - `ARCADE_REPLAY_PATH`: record every frame's delta and input as JSON lines.

use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{error, info};

use arcade::core::{Services, SilentAudio, SystemClock};
use arcade::demo::{self, SPRITES, WORLD};
use arcade::engine::{GameLoop, LoopConfig, Recorder};
use arcade::term::{Glyph, GlyphAssets, GlyphSheet, TermPlatform};

const REPLAY_PATH_ENV: &str = "ARCADE_REPLAY_PATH";

fn main() -> Result<()> {
    arcade::logging::init_from_env()?;
    install_panic_hook();

    let sheet = Rc::new(glyph_sheet());
    let mut platform = TermPlatform::new(WORLD, sheet.clone());
    platform.enter().context("start terminal")?;

    let result = run(&mut platform, sheet);

    // Always try to restore terminal state.
    let _ = platform.exit();
    if let Err(err) = &result {
        error!("game stopped with an error: {err:#}");
    }
    result
}

fn run(platform: &mut TermPlatform, sheet: Rc<GlyphSheet>) -> Result<()> {
    let services = Services::new(GlyphAssets::new(sheet), SilentAudio);
    let (mut states, session) = demo::new_game(services)?;

    let mut game_loop = GameLoop::new(LoopConfig::from_env(), SystemClock::new());
    if let Some(path) = std::env::var_os(REPLAY_PATH_ENV).filter(|p| !p.is_empty()) {
        let recorder = Recorder::create(&path)
            .with_context(|| format!("create replay trace {}", path.to_string_lossy()))?;
        game_loop = game_loop.with_recorder(recorder);
        info!(path = %path.to_string_lossy(), "recording replay trace");
    }

    game_loop.run(&mut states, platform)?;
    info!(best = session.best(), "session over");
    Ok(())
}

fn glyph_sheet() -> GlyphSheet {
    SPRITES
        .iter()
        .fold(GlyphSheet::new(), |sheet, &(name, ch, color)| {
            sheet.with(name, Glyph::new(ch, color).bold())
        })
}

/// Leave raw mode and the alternate screen before the panic message is
/// printed, so it lands on a usable terminal.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        error!(%info, "panic");
        default_hook(info);
    }));
}
