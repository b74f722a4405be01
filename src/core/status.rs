//! # Navigation Status
//!
//! The observable snapshot of where navigation stands. A single status is
//! authoritative per store; it is replaced wholesale on every update and
//! never mutated in place, so readers can hold a snapshot across awaits
//! without seeing torn state.
//!
//! ```text
//! dispatch ──▶ { updating: true, command_type: PUSH }
//!                      │
//!                      ▼  (engine animates, then confirms)
//! lifecycle ──▶ { updating: false, current: <new>, previous: <old> }
//! ```

use std::fmt;

use crate::engine::ComponentId;

/// Tag of the most recently dispatched command.
///
/// A single slot, not a queue: overlapping commands overwrite each other's
/// tag (last writer wins). The `Manual*` variants mark dismissals that were
/// reconciled synchronously at dispatch time; their trailing lifecycle
/// events must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommandType {
    SetRoot,
    SetNewStackRoot,
    Push,
    Pop,
    PopTo,
    PopToRoot,
    ShowModal,
    DismissModal,
    ManualDismissModal,
    DismissAllModals,
    ManualDismissAllModals,
    ShowOverlay,
    DismissOverlay,
}

impl NavigationCommandType {
    /// Dismiss variants whose bookkeeping already happened at dispatch.
    pub(crate) fn is_manual_dismiss(self) -> bool {
        matches!(self, Self::ManualDismissModal | Self::ManualDismissAllModals)
    }
}

impl fmt::Display for NavigationCommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::SetRoot => "SET_ROOT",
            Self::SetNewStackRoot => "SET_NEW_STACK_ROOT",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::PopTo => "POP_TO",
            Self::PopToRoot => "POP_TO_ROOT",
            Self::ShowModal => "SHOW_MODAL",
            Self::DismissModal => "DISMISS_MODAL",
            Self::ManualDismissModal => "MANUAL_DISMISS_MODAL",
            Self::DismissAllModals => "DISMISS_ALL_MODALS",
            Self::ManualDismissAllModals => "MANUAL_DISMISS_ALL_MODALS",
            Self::ShowOverlay => "SHOW_OVERLAY",
            Self::DismissOverlay => "DISMISS_OVERLAY",
        };
        write!(f, "{tag}")
    }
}

/// Snapshot of tracked navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStatus {
    /// True from the moment a command is dispatched until the matching
    /// lifecycle confirmation arrives. The tracked component id may lag
    /// the engine's view while this is set.
    pub updating: bool,
    /// Screen currently visible to the user, as tracked by this layer.
    pub current_component_id: Option<ComponentId>,
    /// Screen that was visible immediately before the current one.
    pub previous_component_id: Option<ComponentId>,
    /// Screens suspended beneath currently-shown modal/overlay layers,
    /// oldest first. One entry per layer still shown.
    pub previous_stack_component_ids: Vec<ComponentId>,
    /// Most recently dispatched command, consulted by lifecycle
    /// reconciliation to pick the applicable rule.
    pub command_type: Option<NavigationCommandType>,
}

/// A partial status update, merged over the previous snapshot by
/// [`NavigationStore::publish`](crate::core::store::NavigationStore::publish).
///
/// Unset fields keep their previous value; set fields replace it, including
/// explicit `None` for the optional ids and tag.
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    updating: Option<bool>,
    current_component_id: Option<Option<ComponentId>>,
    previous_component_id: Option<Option<ComponentId>>,
    previous_stack_component_ids: Option<Vec<ComponentId>>,
    command_type: Option<Option<NavigationCommandType>>,
}

impl StatusPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updating(mut self, updating: bool) -> Self {
        self.updating = Some(updating);
        self
    }

    pub fn current_component_id(mut self, id: Option<ComponentId>) -> Self {
        self.current_component_id = Some(id);
        self
    }

    pub fn previous_component_id(mut self, id: Option<ComponentId>) -> Self {
        self.previous_component_id = Some(id);
        self
    }

    pub fn previous_stack_component_ids(mut self, ids: Vec<ComponentId>) -> Self {
        self.previous_stack_component_ids = Some(ids);
        self
    }

    pub fn command_type(mut self, command_type: Option<NavigationCommandType>) -> Self {
        self.command_type = Some(command_type);
        self
    }

    /// Produce the next snapshot by merging this patch over `base`.
    pub fn apply(self, base: &NavigationStatus) -> NavigationStatus {
        NavigationStatus {
            updating: self.updating.unwrap_or(base.updating),
            current_component_id: self
                .current_component_id
                .unwrap_or_else(|| base.current_component_id.clone()),
            previous_component_id: self
                .previous_component_id
                .unwrap_or_else(|| base.previous_component_id.clone()),
            previous_stack_component_ids: self
                .previous_stack_component_ids
                .unwrap_or_else(|| base.previous_stack_component_ids.clone()),
            command_type: self.command_type.unwrap_or(base.command_type),
        }
    }
}
