//! Screen registry and transition protocol.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::screen::{Screen, Transition};
use crate::surface::{Services, Surface};
use crate::types::InputSnapshot;

/// Owns every registered [`Screen`] and the one that is current.
///
/// There is no current screen until the game calls
/// [`change_state`](Self::change_state) for the first time. `current` is
/// always either `None` or a registered name.
pub struct StateManager {
    screens: HashMap<String, Box<dyn Screen>>,
    current: Option<String>,
    services: Services,
    quit_requested: bool,
}

impl StateManager {
    /// Manager with no-op collaborators ([`Services::default`]).
    pub fn new() -> Self {
        Self::with_services(Services::default())
    }

    pub fn with_services(services: Services) -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            services,
            quit_requested: false,
        }
    }

    /// Register `screen` under `name`.
    ///
    /// Names are unique: a second registration fails with
    /// [`EngineError::DuplicateName`] and the first mapping stays untouched.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        screen: impl Screen + 'static,
    ) -> EngineResult<()> {
        self.add_boxed(name, Box::new(screen))
    }

    pub fn add_boxed(&mut self, name: impl Into<String>, screen: Box<dyn Screen>) -> EngineResult<()> {
        let name = name.into();
        if self.screens.contains_key(&name) {
            warn!(screen = %name, "duplicate screen registration rejected");
            return Err(EngineError::DuplicateName(name));
        }
        debug!(screen = %name, "screen registered");
        self.screens.insert(name, screen);
        Ok(())
    }

    /// Make `name` the current screen.
    ///
    /// The previous screen (if any) gets exactly one `exit`. If `name` is
    /// registered it becomes current and gets exactly one `enter`; otherwise
    /// nothing is current afterwards and [`EngineError::NotFound`] is
    /// returned. Changing to the screen that is already current exits and
    /// re-enters it.
    pub fn change_state(&mut self, name: &str) -> EngineResult<()> {
        if let Some(prev) = self.current.take() {
            if let Some(screen) = self.screens.get_mut(&prev) {
                screen.exit(&mut self.services);
            }
            debug!(screen = %prev, "screen exited");
        }

        match self.screens.get_mut(name) {
            Some(screen) => {
                self.current = Some(name.to_string());
                screen.enter(&mut self.services);
                info!(screen = name, "screen entered");
                Ok(())
            }
            None => {
                warn!(screen = name, "transition to unknown screen; no screen is current");
                Err(EngineError::NotFound(name.to_string()))
            }
        }
    }

    /// Update the current screen and apply the transition it returns.
    ///
    /// No-op when nothing is current. A failed transition is returned to the
    /// caller; the frame itself is already complete.
    pub fn update(&mut self, delta: f32, input: &InputSnapshot) -> EngineResult<()> {
        let transition = match self.current.as_deref() {
            Some(name) => match self.screens.get_mut(name) {
                Some(screen) => screen.update(delta, input, &mut self.services),
                None => Transition::Stay,
            },
            None => return Ok(()),
        };

        match transition {
            Transition::Stay => Ok(()),
            Transition::Switch(next) => self.change_state(&next),
            Transition::Quit => {
                info!(screen = ?self.current, "quit requested");
                self.quit_requested = true;
                Ok(())
            }
        }
    }

    /// Render the current screen; no-op when nothing is current.
    pub fn render(&self, surface: &mut dyn Surface) {
        if let Some(screen) = self.current.as_deref().and_then(|n| self.screens.get(n)) {
            screen.render(surface);
        }
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Set once a screen returned [`Transition::Quit`] (or via [`request_quit`](Self::request_quit)).
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
