//! # Lifecycle Events
//!
//! The signals an engine emits as transitions complete. These arrive on a
//! channel that is independent of the command futures: a command resolving
//! says nothing about whether its lifecycle event has been delivered yet.
//!
//! Events are delivered in emission order and must not be reordered or
//! coalesced by consumers.

use tokio::sync::mpsc;

use super::layout::ComponentId;

/// Classification of the element an appear/disappear event refers to.
///
/// Status tracking only ever acts on [`ElementKind::Screen`]; events from
/// native chrome (top bars, buttons, backgrounds) must never move the
/// tracked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Screen,
    Chrome,
}

/// A lifecycle signal from the navigation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// An element became visible.
    ComponentDidAppear {
        component_id: ComponentId,
        element_kind: ElementKind,
    },
    /// An element became invisible.
    ComponentDidDisappear {
        component_id: ComponentId,
        element_kind: ElementKind,
    },
    /// A modal layer was removed. Also fires for system-initiated
    /// dismissals (hardware back) that never went through a dispatcher.
    ModalDismissed { component_id: ComponentId },
    /// A chrome button belonging to a screen was pressed.
    NavigationButtonPressed {
        component_id: ComponentId,
        button_id: String,
    },
}

impl NavigationEvent {
    /// The screen instance this event is about.
    pub fn component_id(&self) -> &ComponentId {
        match self {
            Self::ComponentDidAppear { component_id, .. }
            | Self::ComponentDidDisappear { component_id, .. }
            | Self::ModalDismissed { component_id }
            | Self::NavigationButtonPressed { component_id, .. } => component_id,
        }
    }
}

/// A live lifecycle subscription. Dropping the stream unsubscribes.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<NavigationEvent>,
}

impl EventStream {
    pub fn new(rx: mpsc::UnboundedReceiver<NavigationEvent>) -> Self {
        Self { rx }
    }

    /// The next event, or `None` once the engine side has gone away.
    pub async fn next(&mut self) -> Option<NavigationEvent> {
        self.rx.recv().await
    }
}
