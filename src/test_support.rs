//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::core::store::NavigationStore;
use crate::engine::{
    ComponentId, EngineError, EventStream, Layout, NavigationEngine, NavigationEvent,
    ScreenOptions,
};

/// An engine double that records commands, can fail the next one on
/// request, and lets tests emit lifecycle events by hand.
pub struct MockEngine {
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<EngineError>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<NavigationEvent>>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Fail the next command with `err` instead of recording it.
    pub fn fail_next(&self, err: EngineError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Commands seen so far, in dispatch order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Deliver a lifecycle event to every subscriber.
    pub fn emit(&self, event: NavigationEvent) {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn record(&self, call: String) -> Result<(), EngineError> {
        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl NavigationEngine for MockEngine {
    async fn set_root(&self, _layout: Layout) -> Result<(), EngineError> {
        self.record("set_root".into())
    }

    async fn set_stack_root(
        &self,
        on_id: &ComponentId,
        _layout: Layout,
    ) -> Result<(), EngineError> {
        self.record(format!("set_stack_root {on_id}"))
    }

    async fn push(&self, on_id: &ComponentId, _layout: Layout) -> Result<(), EngineError> {
        self.record(format!("push {on_id}"))
    }

    async fn pop(
        &self,
        on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        self.record(format!("pop {on_id}"))
    }

    async fn pop_to(
        &self,
        to_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        self.record(format!("pop_to {to_id}"))
    }

    async fn pop_to_root(
        &self,
        on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        self.record(format!("pop_to_root {on_id}"))
    }

    async fn show_modal(&self, _layout: Layout) -> Result<(), EngineError> {
        self.record("show_modal".into())
    }

    async fn dismiss_modal(
        &self,
        on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        self.record(format!("dismiss_modal {on_id}"))
    }

    async fn dismiss_all_modals(
        &self,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        self.record("dismiss_all_modals".into())
    }

    async fn show_overlay(&self, _layout: Layout) -> Result<(), EngineError> {
        self.record("show_overlay".into())
    }

    async fn dismiss_overlay(&self, on_id: &ComponentId) -> Result<(), EngineError> {
        self.record(format!("dismiss_overlay {on_id}"))
    }

    fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        EventStream::new(rx)
    }
}

/// Creates a store wired to a fresh `MockEngine`.
pub fn test_store() -> (NavigationStore, Arc<MockEngine>) {
    let engine = MockEngine::new();
    let store = NavigationStore::new(engine.clone());
    (store, engine)
}
