//! Star Sweep screens.

mod cards;
mod play;

pub use cards::{EndScreen, MenuScreen, PauseScreen};
pub use play::PlayScreen;
