//! # Lifecycle Synchronization
//!
//! Commands resolve on one channel, lifecycle confirmations arrive on
//! another, and only the latter moves the tracked state. This module owns
//! that second half:
//!
//! - [`reconcile`] is the pure state machine: current status + lifecycle
//!   event in, status patch (or "ignore") out. No I/O, fully testable.
//! - [`ScreenTracker`] is the I/O shell: one per mounted screen, it
//!   subscribes to the engine's events, filters them down to its own
//!   component id, runs `reconcile`, and publishes the result.
//!
//! The command tag drives which rule applies. Manual dismiss variants were
//! already reconciled at dispatch, so every trailing event they produce is
//! ignored here; an overlay dismissal is the one case where a *disappear*
//! event is the restore signal, because overlays never fire an appear for
//! the screen they reveal.

use log::{debug, error};
use tokio::task::JoinHandle;

use crate::core::error::NavigationError;
use crate::core::stack;
use crate::core::status::{NavigationCommandType, NavigationStatus, StatusPatch};
use crate::core::store::NavigationStore;
use crate::engine::{ComponentId, ElementKind, NavigationEvent};

/// Decide how a lifecycle event moves the tracked status.
///
/// Returns `Ok(None)` when the event must be ignored. `EmptyStack` here
/// means the tracked stack has desynchronized from the engine.
pub fn reconcile(
    status: &NavigationStatus,
    event: &NavigationEvent,
) -> Result<Option<StatusPatch>, NavigationError> {
    match event {
        NavigationEvent::ComponentDidAppear {
            component_id,
            element_kind,
        } => {
            if *element_kind != ElementKind::Screen {
                return Ok(None);
            }
            match status.command_type {
                // Reconciled elsewhere; the dismissal's trailing appear
                // must not rotate the state.
                Some(tag) if tag.is_manual_dismiss() => Ok(None),
                Some(NavigationCommandType::DismissOverlay) => Ok(None),
                Some(NavigationCommandType::ShowModal | NavigationCommandType::ShowOverlay) => {
                    let mut suspended = status.previous_stack_component_ids.clone();
                    // A layer shown over nothing has nothing to suspend.
                    if let Some(current) = &status.current_component_id {
                        suspended.push(current.clone());
                    }
                    Ok(Some(
                        StatusPatch::new()
                            .current_component_id(Some(component_id.clone()))
                            .previous_component_id(status.current_component_id.clone())
                            .previous_stack_component_ids(suspended)
                            .updating(false)
                            .command_type(None),
                    ))
                }
                _ => Ok(Some(
                    StatusPatch::new()
                        .current_component_id(Some(component_id.clone()))
                        .previous_component_id(status.current_component_id.clone())
                        .updating(false)
                        .command_type(None),
                )),
            }
        }
        NavigationEvent::ComponentDidDisappear { element_kind, .. } => {
            if *element_kind != ElementKind::Screen {
                return Ok(None);
            }
            if status.command_type != Some(NavigationCommandType::DismissOverlay) {
                return Ok(None);
            }
            let (restored, remaining) = stack::pop_top(&status.previous_stack_component_ids)?;
            Ok(Some(
                StatusPatch::new()
                    .current_component_id(Some(restored))
                    .previous_stack_component_ids(remaining)
                    .previous_component_id(None)
                    .updating(false)
                    .command_type(None),
            ))
        }
        NavigationEvent::ModalDismissed { .. } => match status.command_type {
            // Already reconciled at dispatch time.
            Some(tag) if tag.is_manual_dismiss() => Ok(None),
            Some(NavigationCommandType::DismissAllModals) => {
                let restored = stack::pop_bottom(&status.previous_stack_component_ids)?;
                Ok(Some(
                    StatusPatch::new()
                        .current_component_id(Some(restored))
                        .previous_stack_component_ids(Vec::new())
                        .previous_component_id(None)
                        .updating(false)
                        .command_type(None),
                ))
            }
            // Covers a dispatched single dismissal and system-initiated
            // dismissals (hardware back) that carry no tag at all.
            _ => {
                let (restored, remaining) = stack::pop_top(&status.previous_stack_component_ids)?;
                Ok(Some(
                    StatusPatch::new()
                        .current_component_id(Some(restored))
                        .previous_stack_component_ids(remaining)
                        .previous_component_id(None)
                        .updating(false)
                        .command_type(None),
                ))
            }
        },
        // Chrome button presses never move the tracked state.
        NavigationEvent::NavigationButtonPressed { .. } => Ok(None),
    }
}

/// Live lifecycle tracking for one mounted screen.
///
/// Created through [`NavigationStore::track`]. Holds the engine
/// subscription for its screen; dropping the tracker aborts the task and
/// releases the subscription, so a destroyed screen can neither write stale
/// state nor reconcile an event twice.
pub struct ScreenTracker {
    component_id: ComponentId,
    handle: JoinHandle<()>,
}

impl ScreenTracker {
    pub(crate) fn attach(store: NavigationStore, component_id: ComponentId) -> Self {
        let mut events = store.engine().subscribe();
        let id = component_id.clone();
        let handle = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.component_id() != &id {
                    continue;
                }
                match reconcile(&store.status(), &event) {
                    Ok(Some(patch)) => {
                        debug!("[{id}] reconciled {event:?}");
                        store.publish(patch);
                    }
                    Ok(None) => {}
                    Err(err) => {
                        // Desynchronization from the engine; nothing this
                        // layer can repair. Surface it loudly.
                        error!("[{id}] failed to reconcile {event:?}: {err}");
                    }
                }
            }
        });
        Self {
            component_id,
            handle,
        }
    }

    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    /// Explicit detach; dropping the tracker does the same.
    pub fn detach(self) {}
}

impl Drop for ScreenTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appear(id: &str) -> NavigationEvent {
        NavigationEvent::ComponentDidAppear {
            component_id: id.into(),
            element_kind: ElementKind::Screen,
        }
    }

    fn disappear(id: &str) -> NavigationEvent {
        NavigationEvent::ComponentDidDisappear {
            component_id: id.into(),
            element_kind: ElementKind::Screen,
        }
    }

    fn modal_dismissed(id: &str) -> NavigationEvent {
        NavigationEvent::ModalDismissed {
            component_id: id.into(),
        }
    }

    fn status_with(
        current: Option<&str>,
        stack: &[&str],
        command_type: Option<NavigationCommandType>,
    ) -> NavigationStatus {
        NavigationStatus {
            updating: command_type.is_some(),
            current_component_id: current.map(Into::into),
            previous_component_id: None,
            previous_stack_component_ids: stack.iter().map(|s| (*s).into()).collect(),
            command_type,
        }
    }

    #[test]
    fn appear_rotates_current_and_previous() {
        let status = status_with(Some("a"), &[], Some(NavigationCommandType::Push));
        let patch = reconcile(&status, &appear("b")).unwrap().unwrap();
        let next = patch.apply(&status);

        assert_eq!(next.current_component_id, Some("b".into()));
        assert_eq!(next.previous_component_id, Some("a".into()));
        assert!(next.previous_stack_component_ids.is_empty());
        assert!(!next.updating);
        assert!(next.command_type.is_none());
    }

    #[test]
    fn appear_after_show_modal_suspends_the_current_screen() {
        let status = status_with(Some("a"), &[], Some(NavigationCommandType::ShowModal));
        let next = reconcile(&status, &appear("m"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("m".into()));
        assert_eq!(next.previous_component_id, Some("a".into()));
        assert_eq!(next.previous_stack_component_ids, vec!["a".into()]);
    }

    #[test]
    fn appear_after_show_overlay_suspends_the_current_screen() {
        let status = status_with(Some("a"), &[], Some(NavigationCommandType::ShowOverlay));
        let next = reconcile(&status, &appear("x"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("x".into()));
        assert_eq!(next.previous_stack_component_ids, vec!["a".into()]);
    }

    #[test]
    fn appear_with_no_current_screen_suspends_nothing() {
        let status = status_with(None, &[], Some(NavigationCommandType::ShowModal));
        let next = reconcile(&status, &appear("m"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("m".into()));
        assert!(next.previous_stack_component_ids.is_empty());
        assert!(next.previous_component_id.is_none());
    }

    #[test]
    fn appear_is_ignored_for_manual_dismissals_and_overlay_dismissal() {
        for tag in [
            NavigationCommandType::ManualDismissModal,
            NavigationCommandType::ManualDismissAllModals,
            NavigationCommandType::DismissOverlay,
        ] {
            let status = status_with(Some("a"), &["a"], Some(tag));
            assert!(reconcile(&status, &appear("a")).unwrap().is_none());
        }
    }

    #[test]
    fn chrome_events_are_ignored() {
        let status = status_with(Some("a"), &[], Some(NavigationCommandType::Push));
        let event = NavigationEvent::ComponentDidAppear {
            component_id: "top-bar".into(),
            element_kind: ElementKind::Chrome,
        };
        assert!(reconcile(&status, &event).unwrap().is_none());

        let event = NavigationEvent::ComponentDidDisappear {
            component_id: "top-bar".into(),
            element_kind: ElementKind::Chrome,
        };
        assert!(reconcile(&status, &event).unwrap().is_none());
    }

    #[test]
    fn disappear_only_acts_on_overlay_dismissal() {
        let status = status_with(Some("x"), &["a"], Some(NavigationCommandType::Pop));
        assert!(reconcile(&status, &disappear("x")).unwrap().is_none());

        let status = status_with(Some("x"), &["a"], Some(NavigationCommandType::DismissOverlay));
        let next = reconcile(&status, &disappear("x"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("a".into()));
        assert!(next.previous_stack_component_ids.is_empty());
        assert!(next.previous_component_id.is_none());
        assert!(!next.updating);
        assert!(next.command_type.is_none());
    }

    #[test]
    fn modal_dismissed_without_command_pops_the_top() {
        // Hardware back: no command was dispatched, so no tag is set.
        let status = status_with(Some("m2"), &["a", "m1"], None);
        let next = reconcile(&status, &modal_dismissed("m2"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("m1".into()));
        assert_eq!(next.previous_stack_component_ids, vec!["a".into()]);
    }

    #[test]
    fn modal_dismissed_for_dismiss_all_resolves_to_the_bottom() {
        let status = status_with(
            Some("m2"),
            &["a", "m1"],
            Some(NavigationCommandType::DismissAllModals),
        );
        let next = reconcile(&status, &modal_dismissed("m2"))
            .unwrap()
            .unwrap()
            .apply(&status);

        assert_eq!(next.current_component_id, Some("a".into()));
        assert!(next.previous_stack_component_ids.is_empty());
    }

    #[test]
    fn modal_dismissed_is_ignored_after_manual_reconciliation() {
        for tag in [
            NavigationCommandType::ManualDismissModal,
            NavigationCommandType::ManualDismissAllModals,
        ] {
            let status = status_with(Some("a"), &[], Some(tag));
            assert!(reconcile(&status, &modal_dismissed("m")).unwrap().is_none());
        }
    }

    #[test]
    fn empty_stack_desynchronization_is_an_error() {
        let status = status_with(Some("x"), &[], Some(NavigationCommandType::DismissOverlay));
        assert_eq!(
            reconcile(&status, &disappear("x")).unwrap_err(),
            NavigationError::EmptyStack
        );

        let status = status_with(Some("m"), &[], None);
        assert_eq!(
            reconcile(&status, &modal_dismissed("m")).unwrap_err(),
            NavigationError::EmptyStack
        );
    }

    #[test]
    fn button_presses_are_ignored() {
        let status = status_with(Some("m"), &["a"], None);
        let event = NavigationEvent::NavigationButtonPressed {
            component_id: "m".into(),
            button_id: "close".into(),
        };
        assert!(reconcile(&status, &event).unwrap().is_none());
    }
}
