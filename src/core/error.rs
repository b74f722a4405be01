//! Errors surfaced by the tracking layer.
//!
//! All of these are terminal for the operation that raised them: nothing in
//! this layer retries. Callers branch on the variant, never on message
//! text.

use std::fmt;

use crate::engine::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// A command bound to the current screen was dispatched while no
    /// current component id is tracked. Raised before the engine is called.
    MissingComponentId,
    /// A dismissal tried to restore from an empty suspended-screen stack.
    /// The tracked state has desynchronized from the engine; this is an
    /// integration error, not a recoverable condition.
    EmptyStack,
    /// The engine's command future failed. `updating` has been cleared;
    /// the command tag is left as dispatched.
    Engine(EngineError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::MissingComponentId => write!(f, "missing component id"),
            NavigationError::EmptyStack => write!(f, "there is no previous stack"),
            NavigationError::Engine(e) => write!(f, "engine command failed: {e}"),
        }
    }
}

impl std::error::Error for NavigationError {}

impl From<EngineError> for NavigationError {
    fn from(e: EngineError) -> Self {
        NavigationError::Engine(e)
    }
}
