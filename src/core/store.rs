//! # Navigation Store
//!
//! The dispatch half of the tracking layer plus the versioned status
//! container. Every command follows the same shape:
//!
//! ```text
//! caller ──▶ publish { updating: true, command_type } ──▶ engine command
//!                                                              │
//!            publish reconciled status ◀── ScreenTracker ◀── lifecycle event
//! ```
//!
//! The optimistic pre-publish happens before the engine is called, so UI
//! observing `updating` reacts immediately. The command future resolving
//! does *not* mean the status is reconciled; only the matching lifecycle
//! event (or, for the manual dismiss variants, the dispatch itself) does.
//!
//! `NavigationStore` is a cheap `Clone` handle over shared state. Construct
//! one explicitly and hand it to whatever owns the screen tree root; there
//! is deliberately no process-wide instance.
//!
//! Known limitation: the command tag is a single slot. Dispatching while a
//! previous command is still `updating` overwrites the tag (last writer
//! wins); overlapping commands are not safely serializable.

use std::sync::{Arc, Mutex};

use log::debug;
use tokio::sync::mpsc;

use crate::core::error::NavigationError;
use crate::core::stack;
use crate::core::status::{NavigationCommandType, NavigationStatus, StatusPatch};
use crate::core::sync::ScreenTracker;
use crate::engine::{ComponentId, EngineError, Layout, NavigationEngine, ScreenComponent, ScreenOptions};

/// Stream of published status snapshots, in publication order.
///
/// A new subscriber sees updates from the point of subscription on; the
/// snapshot current at that moment is available via
/// [`NavigationStore::status`].
pub struct StatusStream {
    rx: mpsc::UnboundedReceiver<Arc<NavigationStatus>>,
}

impl StatusStream {
    /// The next published snapshot.
    pub async fn next(&mut self) -> Option<Arc<NavigationStatus>> {
        self.rx.recv().await
    }

    /// The next snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<Arc<NavigationStatus>> {
        self.rx.try_recv().ok()
    }
}

#[derive(Clone)]
pub struct NavigationStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    engine: Arc<dyn NavigationEngine>,
    status: Mutex<Arc<NavigationStatus>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Arc<NavigationStatus>>>>,
}

impl NavigationStore {
    pub fn new(engine: Arc<dyn NavigationEngine>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                engine,
                status: Mutex::new(Arc::new(NavigationStatus::default())),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn engine(&self) -> &Arc<dyn NavigationEngine> {
        &self.inner.engine
    }

    /// The latest published snapshot.
    pub fn status(&self) -> Arc<NavigationStatus> {
        self.inner.status.lock().unwrap().clone()
    }

    /// Subscribe to future status publications.
    pub fn subscribe(&self) -> StatusStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.lock().unwrap().push(tx);
        StatusStream { rx }
    }

    /// Merge `patch` over the current snapshot, swap it in, and notify
    /// subscribers. No validation happens here; callers maintain the
    /// invariants.
    pub fn publish(&self, patch: StatusPatch) {
        let next = {
            let mut status = self.inner.status.lock().unwrap();
            let next = Arc::new(patch.apply(status.as_ref()));
            *status = next.clone();
            next
        };
        debug!(
            "status: updating={} current={:?} tag={:?}",
            next.updating,
            next.current_component_id.as_ref().map(|id| id.as_str()),
            next.command_type,
        );
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(next.clone()).is_ok());
    }

    /// Attach lifecycle tracking for a mounted screen. Drop the returned
    /// tracker (or call `detach`) when the screen unmounts.
    pub fn track(&self, component_id: ComponentId) -> ScreenTracker {
        ScreenTracker::attach(self.clone(), component_id)
    }

    fn begin(&self, command_type: NavigationCommandType) {
        debug!("dispatch: {command_type}");
        self.publish(
            StatusPatch::new()
                .updating(true)
                .command_type(Some(command_type)),
        );
    }

    /// Resolve an engine command result: on failure clear `updating` and
    /// surface the error. The command tag is left as dispatched.
    fn settle(&self, result: Result<(), EngineError>) -> Result<(), NavigationError> {
        result.map_err(|e| {
            self.publish(StatusPatch::new().updating(false));
            NavigationError::Engine(e)
        })
    }

    fn current_component_id(&self) -> Result<ComponentId, NavigationError> {
        self.status()
            .current_component_id
            .clone()
            .ok_or(NavigationError::MissingComponentId)
    }

    /// Replace the entire presented hierarchy.
    pub async fn set_root(&self, layout: impl Into<Layout>) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::SetRoot);
        let result = self.inner.engine.set_root(layout.into()).await;
        self.settle(result)
    }

    /// Replace the contents of the stack containing `to_id`.
    pub async fn set_stack_root(
        &self,
        to_id: &ComponentId,
        layout: impl Into<Layout>,
    ) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::SetNewStackRoot);
        let result = self.inner.engine.set_stack_root(to_id, layout.into()).await;
        self.settle(result)
    }

    /// Push onto the stack containing the current screen.
    pub async fn push(&self, layout: impl Into<Layout>) -> Result<(), NavigationError> {
        let on_id = self.current_component_id()?;
        self.begin(NavigationCommandType::Push);
        let result = self.inner.engine.push(&on_id, layout.into()).await;
        self.settle(result)
    }

    /// Pop the current screen off its stack.
    pub async fn pop(&self, options: Option<ScreenOptions>) -> Result<(), NavigationError> {
        let on_id = self.current_component_id()?;
        self.begin(NavigationCommandType::Pop);
        let result = self.inner.engine.pop(&on_id, options).await;
        self.settle(result)
    }

    /// Pop until `to_id` is on top of its stack.
    pub async fn pop_to(
        &self,
        to_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::PopTo);
        let result = self.inner.engine.pop_to(to_id, options).await;
        self.settle(result)
    }

    /// Pop the stack containing `on_id` down to its first screen.
    pub async fn pop_to_root(
        &self,
        on_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::PopToRoot);
        let result = self.inner.engine.pop_to_root(on_id, options).await;
        self.settle(result)
    }

    /// Present a modal. Accepts a single [`ScreenComponent`] or a
    /// `Vec<ScreenComponent>`, which normalizes to a stacked layout.
    pub async fn show_modal(&self, layout: impl Into<Layout>) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::ShowModal);
        let result = self.inner.engine.show_modal(layout.into()).await;
        self.settle(result)
    }

    /// Dismiss the modal containing the current screen.
    ///
    /// This is the manual variant: the suspended-screen stack is consulted
    /// and the status reconciled synchronously at dispatch time. The
    /// dismissal's trailing lifecycle events are ignored by the
    /// synchronizer because the `MANUAL_DISMISS_MODAL` tag blacklists them.
    pub async fn dismiss_modal(
        &self,
        options: Option<ScreenOptions>,
    ) -> Result<(), NavigationError> {
        let on_id = self.current_component_id()?;
        let status = self.status();
        let (restored, remaining) = stack::pop_top(&status.previous_stack_component_ids)?;
        self.publish(
            StatusPatch::new()
                .updating(true)
                .command_type(Some(NavigationCommandType::ManualDismissModal))
                .current_component_id(Some(restored))
                .previous_component_id(None)
                .previous_stack_component_ids(remaining),
        );
        let result = self.inner.engine.dismiss_modal(&on_id, options).await;
        self.settle(result)
    }

    /// Dismiss every modal layer, restoring the screen beneath the first
    /// one. Manual variant, reconciled synchronously like
    /// [`dismiss_modal`](Self::dismiss_modal).
    pub async fn dismiss_all_modals(
        &self,
        options: Option<ScreenOptions>,
    ) -> Result<(), NavigationError> {
        let status = self.status();
        let restored = stack::pop_bottom(&status.previous_stack_component_ids)?;
        self.publish(
            StatusPatch::new()
                .updating(true)
                .command_type(Some(NavigationCommandType::ManualDismissAllModals))
                .current_component_id(Some(restored))
                .previous_component_id(None)
                .previous_stack_component_ids(Vec::new()),
        );
        let result = self.inner.engine.dismiss_all_modals(options).await;
        self.settle(result)
    }

    /// Present a single screen as an overlay.
    pub async fn show_overlay(&self, component: ScreenComponent) -> Result<(), NavigationError> {
        self.begin(NavigationCommandType::ShowOverlay);
        let result = self.inner.engine.show_overlay(Layout::from(component)).await;
        self.settle(result)
    }

    /// Dismiss the overlay containing the current screen.
    ///
    /// Unlike the modal variants this is *not* reconciled at dispatch:
    /// overlays fire no appear event for the screen they reveal, so the
    /// overlay's own disappear event is the restore signal.
    pub async fn dismiss_overlay(&self) -> Result<(), NavigationError> {
        let on_id = self.current_component_id()?;
        self.begin(NavigationCommandType::DismissOverlay);
        let result = self.inner.engine.dismiss_overlay(&on_id).await;
        self.settle(result)
    }
}
