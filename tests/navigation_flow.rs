//! End-to-end walkthroughs: command dispatch plus lifecycle confirmation
//! against a scripted engine, reconciled through live screen trackers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use waypoint::core::status::{NavigationCommandType, NavigationStatus};
use waypoint::core::store::{NavigationStore, StatusStream};
use waypoint::engine::{
    ComponentId, ElementKind, EngineError, EventStream, Layout, NavigationEngine, NavigationEvent,
    ScreenComponent, ScreenOptions,
};

// ============================================================================
// Helper: a scripted engine
// ============================================================================

/// Accepts every command; the test emits lifecycle events by hand, playing
/// the role of the engine's transition machinery.
struct ScriptedEngine {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<NavigationEvent>>>,
}

impl ScriptedEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(Vec::new()),
        })
    }

    fn emit(&self, event: NavigationEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn appear(&self, id: &str) {
        self.emit(NavigationEvent::ComponentDidAppear {
            component_id: id.into(),
            element_kind: ElementKind::Screen,
        });
    }

    fn disappear(&self, id: &str) {
        self.emit(NavigationEvent::ComponentDidDisappear {
            component_id: id.into(),
            element_kind: ElementKind::Screen,
        });
    }

    fn modal_dismissed(&self, id: &str) {
        self.emit(NavigationEvent::ModalDismissed {
            component_id: id.into(),
        });
    }
}

#[async_trait]
impl NavigationEngine for ScriptedEngine {
    async fn set_root(&self, _layout: Layout) -> Result<(), EngineError> {
        Ok(())
    }

    async fn set_stack_root(
        &self,
        _on_id: &ComponentId,
        _layout: Layout,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn push(&self, _on_id: &ComponentId, _layout: Layout) -> Result<(), EngineError> {
        Ok(())
    }

    async fn pop(
        &self,
        _on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn pop_to(
        &self,
        _to_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn pop_to_root(
        &self,
        _on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn show_modal(&self, _layout: Layout) -> Result<(), EngineError> {
        Ok(())
    }

    async fn dismiss_modal(
        &self,
        _on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn dismiss_all_modals(
        &self,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    async fn show_overlay(&self, _layout: Layout) -> Result<(), EngineError> {
        Ok(())
    }

    async fn dismiss_overlay(&self, _on_id: &ComponentId) -> Result<(), EngineError> {
        Ok(())
    }

    fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        EventStream::new(rx)
    }
}

fn scripted_store() -> (NavigationStore, Arc<ScriptedEngine>) {
    let engine = ScriptedEngine::new();
    let store = NavigationStore::new(engine.clone());
    (store, engine)
}

async fn next_status(updates: &mut StatusStream) -> Arc<NavigationStatus> {
    tokio::time::timeout(Duration::from_secs(1), updates.next())
        .await
        .expect("timed out waiting for a status update")
        .expect("store went away")
}

/// Assert that no further status is published (the events were ignored).
async fn assert_quiet(updates: &mut StatusStream) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(updates.try_next().is_none(), "expected no status update");
}

fn screen(name: &str) -> ScreenComponent {
    ScreenComponent::new(name)
}

// ============================================================================
// Scenario walkthroughs
// ============================================================================

#[tokio::test]
async fn set_root_settles_once_the_shown_event_arrives() {
    let (store, engine) = scripted_store();
    let _tracker = store.track("A".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    let optimistic = next_status(&mut updates).await;
    assert!(optimistic.updating);
    assert_eq!(optimistic.command_type, Some(NavigationCommandType::SetRoot));
    assert!(optimistic.current_component_id.is_none());

    engine.appear("A");
    let settled = next_status(&mut updates).await;
    assert_eq!(settled.current_component_id, Some("A".into()));
    assert!(settled.previous_component_id.is_none());
    assert!(!settled.updating);
    assert!(settled.command_type.is_none());
}

#[tokio::test]
async fn shown_modal_suspends_the_previous_screen() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let _modal = store.track("B".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;

    store.show_modal(screen("single-modal")).await.unwrap();
    let optimistic = next_status(&mut updates).await;
    assert_eq!(
        optimistic.command_type,
        Some(NavigationCommandType::ShowModal)
    );

    engine.appear("B");
    let settled = next_status(&mut updates).await;
    assert_eq!(settled.current_component_id, Some("B".into()));
    assert_eq!(settled.previous_component_id, Some("A".into()));
    assert_eq!(settled.previous_stack_component_ids, vec!["A".into()]);
    assert!(!settled.updating);
    assert!(settled.command_type.is_none());
}

#[tokio::test]
async fn manual_dismiss_restores_synchronously_and_ignores_trailing_events() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let _modal = store.track("B".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;
    store.show_modal(screen("single-modal")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("B");
    next_status(&mut updates).await;

    store.dismiss_modal(None).await.unwrap();
    let manual = next_status(&mut updates).await;
    assert_eq!(manual.current_component_id, Some("A".into()));
    assert!(manual.previous_component_id.is_none());
    assert!(manual.previous_stack_component_ids.is_empty());
    assert!(manual.updating);
    assert_eq!(
        manual.command_type,
        Some(NavigationCommandType::ManualDismissModal)
    );

    // The dismissal's own lifecycle tail is blacklisted by the manual tag.
    engine.disappear("B");
    engine.modal_dismissed("B");
    engine.appear("A");
    assert_quiet(&mut updates).await;
}

#[tokio::test]
async fn dismiss_all_modals_restores_the_first_suspended_screen() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let _first = store.track("B".into());
    let _second = store.track("C".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;

    store.show_modal(screen("single-modal")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("B");
    next_status(&mut updates).await;

    store.show_modal(screen("single-modal")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("C");
    let nested = next_status(&mut updates).await;
    assert_eq!(nested.current_component_id, Some("C".into()));
    // One suspended entry per nested modal layer.
    assert_eq!(
        nested.previous_stack_component_ids,
        vec!["A".into(), "B".into()]
    );

    store.dismiss_all_modals(None).await.unwrap();
    let manual = next_status(&mut updates).await;
    assert_eq!(manual.current_component_id, Some("A".into()));
    assert!(manual.previous_stack_component_ids.is_empty());
    assert_eq!(
        manual.command_type,
        Some(NavigationCommandType::ManualDismissAllModals)
    );
}

#[tokio::test]
async fn overlay_restore_rides_on_the_disappear_event() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let _overlay = store.track("X".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;

    store.show_overlay(screen("single-overlay")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("X");
    let shown = next_status(&mut updates).await;
    assert_eq!(shown.current_component_id, Some("X".into()));
    assert_eq!(shown.previous_stack_component_ids, vec!["A".into()]);

    store.dismiss_overlay().await.unwrap();
    let optimistic = next_status(&mut updates).await;
    assert!(optimistic.updating);
    assert_eq!(
        optimistic.command_type,
        Some(NavigationCommandType::DismissOverlay)
    );

    // No appear fires for the revealed screen; the overlay's disappear is
    // the restore signal.
    engine.disappear("X");
    let settled = next_status(&mut updates).await;
    assert_eq!(settled.current_component_id, Some("A".into()));
    assert!(settled.previous_stack_component_ids.is_empty());
    assert!(settled.previous_component_id.is_none());
    assert!(!settled.updating);
    assert!(settled.command_type.is_none());
}

// ============================================================================
// Cross-cutting properties
// ============================================================================

#[tokio::test]
async fn system_back_reconciles_without_a_dispatched_command() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let _modal = store.track("B".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;
    store.show_modal(screen("single-modal")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("B");
    let settled = next_status(&mut updates).await;
    assert!(settled.command_type.is_none());

    // Hardware back: the engine dismisses the modal on its own.
    engine.modal_dismissed("B");
    let restored = next_status(&mut updates).await;
    assert_eq!(restored.current_component_id, Some("A".into()));
    assert!(restored.previous_stack_component_ids.is_empty());
    assert!(!restored.updating);
}

#[tokio::test]
async fn chrome_events_never_move_the_tracked_state() {
    let (store, engine) = scripted_store();
    let _root = store.track("A".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;
    engine.appear("A");
    next_status(&mut updates).await;

    engine.emit(NavigationEvent::ComponentDidAppear {
        component_id: "A".into(),
        element_kind: ElementKind::Chrome,
    });
    engine.emit(NavigationEvent::NavigationButtonPressed {
        component_id: "A".into(),
        button_id: "close".into(),
    });
    assert_quiet(&mut updates).await;
}

#[tokio::test]
async fn detached_trackers_stop_reconciling() {
    let (store, engine) = scripted_store();
    let tracker = store.track("A".into());
    let mut updates = store.subscribe();

    store.set_root(screen("home")).await.unwrap();
    next_status(&mut updates).await;

    tracker.detach();
    // Give the aborted task a moment to wind down.
    tokio::time::sleep(Duration::from_millis(20)).await;

    engine.appear("A");
    assert_quiet(&mut updates).await;
}
