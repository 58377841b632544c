//! Log setup shared by the binaries.
//!
//! The terminal is in raw mode on the alternate screen while a game runs, so
//! logs never go to stdout or stderr. They go to the file named by
//! `ARCADE_LOG_PATH`; without it no subscriber is installed and every
//! `tracing` call is a no-op.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_ENV: &str = "ARCADE_LOG_PATH";

/// Install a file subscriber if `ARCADE_LOG_PATH` is set.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Returns whether
/// a subscriber was installed.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV).filter(|p| !p.is_empty()) else {
        return Ok(false);
    };
    let file = File::create(&path)
        .with_context(|| format!("create log file {}", path.to_string_lossy()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;
    Ok(true)
}
