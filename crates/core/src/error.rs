//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the state manager and by collaborator start-up.
///
/// A frame that runs long is *not* an error: [`crate::FrameTimer`] clamps it
/// silently and only counts it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A screen with this name is already registered; the existing mapping is kept.
    #[error("screen already registered: {0}")]
    DuplicateName(String),

    /// No screen is registered under this name; the manager now has no current screen.
    #[error("no screen registered as {0:?}")]
    NotFound(String),

    /// A collaborator (renderer, asset loader, input source) could not start.
    #[error("failed to initialize {collaborator}: {reason}")]
    FatalInit {
        collaborator: &'static str,
        reason: String,
    },
}

impl EngineError {
    /// Only init failures should take the process down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::FatalInit { .. })
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_screen() {
        assert_eq!(
            EngineError::DuplicateName("menu".into()).to_string(),
            "screen already registered: menu"
        );
        assert_eq!(
            EngineError::NotFound("missing".into()).to_string(),
            "no screen registered as \"missing\""
        );
    }

    #[test]
    fn only_init_failures_are_fatal() {
        assert!(!EngineError::NotFound("x".into()).is_fatal());
        assert!(EngineError::FatalInit {
            collaborator: "renderer",
            reason: "no tty".into()
        }
        .is_fatal());
    }
}
