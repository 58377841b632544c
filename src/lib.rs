//! Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can write `arcade::core::StateManager`,
//! `arcade::engine::GameLoop` and so on.

pub use arcade_core as core;
pub use arcade_demo as demo;
pub use arcade_engine as engine;
pub use arcade_input as input;
pub use arcade_term as term;
pub use arcade_types as types;

pub mod logging;
