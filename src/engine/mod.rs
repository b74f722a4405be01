//! # Engine Boundary
//!
//! The external navigation engine is a collaborator, not part of this
//! layer: it owns the real screen hierarchy, performs transitions, and
//! emits lifecycle events. Everything the tracking core needs from it is
//! behind [`NavigationEngine`], so the core can be driven by the in-process
//! [`TerminalEngine`] in the playground and by scripted doubles in tests.

pub mod event;
pub mod layout;
pub mod terminal;

pub use event::{ElementKind, EventStream, NavigationEvent};
pub use layout::{ComponentId, Layout, ScreenComponent, ScreenName, ScreenOptions};
pub use terminal::{Hierarchy, ScreenInstance, TerminalEngine};

use std::fmt;

use async_trait::async_trait;

/// Failure of an engine command future.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The target component id is not currently presented.
    UnknownComponent(String),
    /// The engine refused or failed the transition.
    Rejected(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownComponent(id) => write!(f, "unknown component: {id}"),
            EngineError::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// The command and subscription surface of a navigation engine.
///
/// Commands are asynchronous and resolve when the engine has *accepted* the
/// transition; the matching lifecycle event arrives separately on the
/// subscription channel, usually later.
#[async_trait]
pub trait NavigationEngine: Send + Sync {
    /// Replace the entire presented hierarchy with `layout`.
    async fn set_root(&self, layout: Layout) -> Result<(), EngineError>;

    /// Replace the contents of the stack containing `on_id` with `layout`.
    async fn set_stack_root(&self, on_id: &ComponentId, layout: Layout)
    -> Result<(), EngineError>;

    /// Present `layout` on top of the stack containing `on_id`.
    async fn push(&self, on_id: &ComponentId, layout: Layout) -> Result<(), EngineError>;

    /// Remove the top screen of the stack containing `on_id`.
    async fn pop(&self, on_id: &ComponentId, options: Option<ScreenOptions>)
    -> Result<(), EngineError>;

    /// Pop until `to_id` is the top of its stack.
    async fn pop_to(&self, to_id: &ComponentId, options: Option<ScreenOptions>)
    -> Result<(), EngineError>;

    /// Pop the stack containing `on_id` down to its first screen.
    async fn pop_to_root(
        &self,
        on_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), EngineError>;

    /// Present `layout` as a new modal layer.
    async fn show_modal(&self, layout: Layout) -> Result<(), EngineError>;

    /// Remove the modal layer containing `on_id`.
    async fn dismiss_modal(
        &self,
        on_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), EngineError>;

    /// Remove every modal layer.
    async fn dismiss_all_modals(&self, options: Option<ScreenOptions>)
    -> Result<(), EngineError>;

    /// Present `layout` as an overlay above everything else.
    async fn show_overlay(&self, layout: Layout) -> Result<(), EngineError>;

    /// Remove the overlay containing `on_id`.
    async fn dismiss_overlay(&self, on_id: &ComponentId) -> Result<(), EngineError>;

    /// Subscribe to lifecycle events. Dropping the returned stream
    /// unsubscribes.
    fn subscribe(&self) -> EventStream;
}
