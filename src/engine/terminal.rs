//! # Terminal Engine
//!
//! An in-process [`NavigationEngine`] for the playground. It owns the
//! presented hierarchy (root stack, nested modal layers, overlays), mutates
//! it synchronously when a command is accepted, and emits the matching
//! lifecycle events after a configurable transition delay - the same
//! decoupling a real engine has between a command future resolving and the
//! transition actually completing on screen.
//!
//! Component ids are minted per presented instance, so presenting the same
//! screen twice yields two distinct ids.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::event::{ElementKind, EventStream, NavigationEvent};
use super::layout::{ComponentId, Layout, ScreenComponent, ScreenName, ScreenOptions};
use super::{EngineError, NavigationEngine};

/// One presented screen instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenInstance {
    pub id: ComponentId,
    pub name: ScreenName,
    pub options: ScreenOptions,
    /// Free-form props the layout carried for this screen.
    pub props: Option<serde_json::Value>,
}

/// Snapshot of the presented hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    /// The base stack, first screen at the bottom.
    pub root: Vec<ScreenInstance>,
    /// Modal layers in presentation order; each layer is its own stack.
    pub modals: Vec<Vec<ScreenInstance>>,
    /// Overlays in presentation order, above everything else.
    pub overlays: Vec<ScreenInstance>,
    /// Bumped on every mutation; cheap change detection for render loops.
    pub revision: u64,
}

impl Hierarchy {
    /// Every presented instance id, bottom-most first.
    pub fn instance_ids(&self) -> Vec<ComponentId> {
        self.root
            .iter()
            .chain(self.modals.iter().flatten())
            .chain(self.overlays.iter())
            .map(|instance| instance.id.clone())
            .collect()
    }

    /// The topmost screen: top overlay, else top modal screen, else the top
    /// of the root stack.
    pub fn top(&self) -> Option<&ScreenInstance> {
        self.overlays
            .last()
            .or_else(|| self.modals.last().and_then(|layer| layer.last()))
            .or_else(|| self.root.last())
    }

    /// Top screen of the topmost modal layer, if any modal is shown.
    pub fn top_modal(&self) -> Option<&ScreenInstance> {
        self.modals.last().and_then(|layer| layer.last())
    }

    /// Find a presented instance by id.
    pub fn find(&self, id: &ComponentId) -> Option<&ScreenInstance> {
        self.root
            .iter()
            .chain(self.modals.iter().flatten())
            .chain(self.overlays.iter())
            .find(|instance| &instance.id == id)
    }

    fn stack_containing_mut(&mut self, id: &ComponentId) -> Option<&mut Vec<ScreenInstance>> {
        if self.root.iter().any(|instance| &instance.id == id) {
            return Some(&mut self.root);
        }
        self.modals
            .iter_mut()
            .find(|layer| layer.iter().any(|instance| &instance.id == id))
    }
}

pub struct TerminalEngine {
    state: Mutex<Hierarchy>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<NavigationEvent>>>>,
    default_options: ScreenOptions,
    transition: Duration,
}

impl TerminalEngine {
    pub fn new(transition: Duration) -> Self {
        Self {
            state: Mutex::new(Hierarchy::default()),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            default_options: ScreenOptions::default(),
            transition,
        }
    }

    /// Options applied to every presented screen unless the layout
    /// overrides them.
    pub fn with_default_options(mut self, options: ScreenOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Snapshot of the presented hierarchy.
    pub fn hierarchy(&self) -> Hierarchy {
        self.state.lock().unwrap().clone()
    }

    /// System-initiated dismissal of the topmost modal layer (hardware
    /// back): no command is dispatched, only lifecycle events fire.
    /// Returns false when no modal is shown.
    pub fn system_back(&self) -> bool {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(layer) = state.modals.pop() else {
                return false;
            };
            if let Some(top) = layer.last() {
                events.push(NavigationEvent::ComponentDidDisappear {
                    component_id: top.id.clone(),
                    element_kind: ElementKind::Screen,
                });
                events.push(NavigationEvent::ModalDismissed {
                    component_id: top.id.clone(),
                });
            }
            state.revision += 1;
        }
        self.emit(events);
        true
    }

    /// Simulate pressing a chrome button on a presented screen. Returns
    /// false when the id is not presented.
    pub fn press_button(&self, component_id: &ComponentId, button_id: &str) -> bool {
        if self.state.lock().unwrap().find(component_id).is_none() {
            return false;
        }
        self.emit(vec![NavigationEvent::NavigationButtonPressed {
            component_id: component_id.clone(),
            button_id: button_id.to_string(),
        }]);
        true
    }

    fn instantiate(&self, component: &ScreenComponent) -> ScreenInstance {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = ComponentId::new(format!("{}-{}", component.name, &suffix[..8]));
        let options = match &component.options {
            Some(options) => self.default_options.merge(options),
            None => self.default_options.clone(),
        };
        ScreenInstance {
            id,
            name: component.name.clone(),
            options,
            props: component.pass_props.clone(),
        }
    }

    fn instantiate_all(&self, layout: &Layout) -> Result<Vec<ScreenInstance>, EngineError> {
        let instances: Vec<ScreenInstance> = layout
            .children()
            .into_iter()
            .map(|component| self.instantiate(component))
            .collect();
        if instances.is_empty() {
            return Err(EngineError::Rejected("empty layout".into()));
        }
        Ok(instances)
    }

    fn emit(&self, events: Vec<NavigationEvent>) {
        if events.is_empty() {
            return;
        }
        if self.transition.is_zero() {
            Self::deliver(&self.subscribers, events);
            return;
        }
        let subscribers = self.subscribers.clone();
        let transition = self.transition;
        tokio::spawn(async move {
            tokio::time::sleep(transition).await;
            Self::deliver(&subscribers, events);
        });
    }

    fn deliver(
        subscribers: &Mutex<Vec<mpsc::UnboundedSender<NavigationEvent>>>,
        events: Vec<NavigationEvent>,
    ) {
        let mut subscribers = subscribers.lock().unwrap();
        for event in events {
            debug!("engine event: {event:?}");
            subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

fn appear(instance: &ScreenInstance) -> NavigationEvent {
    NavigationEvent::ComponentDidAppear {
        component_id: instance.id.clone(),
        element_kind: ElementKind::Screen,
    }
}

fn disappear(instance: &ScreenInstance) -> NavigationEvent {
    NavigationEvent::ComponentDidDisappear {
        component_id: instance.id.clone(),
        element_kind: ElementKind::Screen,
    }
}

#[async_trait]
impl NavigationEngine for TerminalEngine {
    async fn set_root(&self, layout: Layout) -> Result<(), EngineError> {
        let instances = self.instantiate_all(&layout)?;
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            if let Some(old_top) = state.top() {
                events.push(disappear(old_top));
            }
            state.root = instances;
            state.modals.clear();
            state.overlays.clear();
            events.push(appear(state.root.last().expect("layout is non-empty")));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn set_stack_root(
        &self,
        on_id: &ComponentId,
        layout: Layout,
    ) -> Result<(), EngineError> {
        let instances = self.instantiate_all(&layout)?;
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(stack) = state.stack_containing_mut(on_id) else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            if let Some(old_top) = stack.last() {
                events.push(disappear(old_top));
            }
            *stack = instances;
            events.push(appear(stack.last().expect("layout is non-empty")));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn push(&self, on_id: &ComponentId, layout: Layout) -> Result<(), EngineError> {
        let instances = self.instantiate_all(&layout)?;
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(stack) = state.stack_containing_mut(on_id) else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            if let Some(old_top) = stack.last() {
                events.push(disappear(old_top));
            }
            stack.extend(instances);
            events.push(appear(stack.last().expect("layout is non-empty")));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn pop(
        &self,
        on_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(stack) = state.stack_containing_mut(on_id) else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            if stack.len() < 2 {
                return Err(EngineError::Rejected("nothing to pop".into()));
            }
            let popped = stack.pop().expect("stack has at least two screens");
            events.push(disappear(&popped));
            let revealed = stack.last_mut().expect("stack is non-empty");
            if let Some(options) = options {
                revealed.options = revealed.options.merge(&options);
            }
            events.push(appear(revealed));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn pop_to(
        &self,
        to_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(stack) = state.stack_containing_mut(to_id) else {
                return Err(EngineError::UnknownComponent(to_id.to_string()));
            };
            let index = stack
                .iter()
                .position(|instance| &instance.id == to_id)
                .expect("stack contains to_id");
            if index + 1 == stack.len() {
                // Already on top; nothing to animate.
                return Ok(());
            }
            events.push(disappear(stack.last().expect("stack is non-empty")));
            stack.truncate(index + 1);
            let revealed = stack.last_mut().expect("stack is non-empty");
            if let Some(options) = options {
                revealed.options = revealed.options.merge(&options);
            }
            events.push(appear(revealed));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn pop_to_root(
        &self,
        on_id: &ComponentId,
        options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(stack) = state.stack_containing_mut(on_id) else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            if stack.len() < 2 {
                return Ok(());
            }
            events.push(disappear(stack.last().expect("stack is non-empty")));
            stack.truncate(1);
            let revealed = stack.last_mut().expect("stack is non-empty");
            if let Some(options) = options {
                revealed.options = revealed.options.merge(&options);
            }
            events.push(appear(revealed));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn show_modal(&self, layout: Layout) -> Result<(), EngineError> {
        let instances = self.instantiate_all(&layout)?;
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            if let Some(old_top) = state.top() {
                events.push(disappear(old_top));
            }
            state.modals.push(instances);
            let layer = state.modals.last().expect("layer was just pushed");
            events.push(appear(layer.last().expect("layout is non-empty")));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn dismiss_modal(
        &self,
        on_id: &ComponentId,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(index) = state
                .modals
                .iter()
                .position(|layer| layer.iter().any(|instance| &instance.id == on_id))
            else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            let layer = state.modals.remove(index);
            if let Some(top) = layer.last() {
                events.push(disappear(top));
                events.push(NavigationEvent::ModalDismissed {
                    component_id: top.id.clone(),
                });
            }
            if let Some(revealed) = state.top() {
                events.push(appear(revealed));
            }
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn dismiss_all_modals(
        &self,
        _options: Option<ScreenOptions>,
    ) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            if state.modals.is_empty() {
                return Ok(());
            }
            if let Some(top) = state.top_modal() {
                events.push(disappear(top));
            }
            // Topmost layer first, the order the engine tears them down.
            for layer in state.modals.drain(..).rev() {
                if let Some(top) = layer.last() {
                    events.push(NavigationEvent::ModalDismissed {
                        component_id: top.id.clone(),
                    });
                }
            }
            if let Some(revealed) = state.top() {
                events.push(appear(revealed));
            }
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn show_overlay(&self, layout: Layout) -> Result<(), EngineError> {
        let overlay = match &layout {
            Layout::Component(component) => self.instantiate(component),
            Layout::Stack { .. } => {
                return Err(EngineError::Rejected(
                    "overlay layouts are single screens".into(),
                ));
            }
        };
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            // Overlays do not hide the screen beneath, so no disappear.
            events.push(appear(&overlay));
            state.overlays.push(overlay);
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    async fn dismiss_overlay(&self, on_id: &ComponentId) -> Result<(), EngineError> {
        let mut events = Vec::new();
        {
            let mut state = self.state.lock().unwrap();
            let Some(index) = state
                .overlays
                .iter()
                .position(|instance| &instance.id == on_id)
            else {
                return Err(EngineError::UnknownComponent(on_id.to_string()));
            };
            let overlay = state.overlays.remove(index);
            // No appear for the revealed screen: overlays never covered it.
            events.push(disappear(&overlay));
            state.revision += 1;
        }
        self.emit(events);
        Ok(())
    }

    fn subscribe(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        EventStream::new(rx)
    }
}
