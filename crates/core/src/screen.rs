//! Screens: named modes of play (menu, gameplay, paused, game over, ...).

use crate::surface::{Services, Surface};
use crate::types::InputSnapshot;

/// What a screen wants to happen after its update.
///
/// Screens never call back into the [`crate::StateManager`]; they return a
/// transition and the manager applies it once the update has finished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Stay,
    /// Switch to the screen registered under this name.
    Switch(String),
    /// Ask the game loop to shut down after this frame.
    Quit,
}

impl Transition {
    pub fn to(name: impl Into<String>) -> Self {
        Transition::Switch(name.into())
    }
}

/// A named mode of play with its own entities and lifecycle.
///
/// `enter` and `exit` are paired: each activation gets exactly one `enter`
/// and each deactivation exactly one `exit`. A screen may be entered again
/// later, so it decides in `enter` whether to reset or resume.
pub trait Screen {
    fn enter(&mut self, _services: &mut Services) {}

    fn update(
        &mut self,
        delta: f32,
        input: &InputSnapshot,
        services: &mut Services,
    ) -> Transition;

    fn render(&self, surface: &mut dyn Surface);

    fn exit(&mut self, _services: &mut Services) {}
}
