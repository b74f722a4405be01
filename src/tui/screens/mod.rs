//! # Example Screens
//!
//! The playground's route table. Screens are registered by name; the
//! engine presents *instances* of them (fresh component id per
//! presentation), and the playground asks the registry to build a renderer
//! for each presented instance.

mod detail;
mod home;
mod single_modal;
mod single_overlay;
mod stack_modal;

use std::collections::HashMap;

use crate::engine::{ScreenInstance, ScreenName};
use crate::tui::component::Component;

/// Builds a renderer for one presented instance of a screen.
pub type ScreenFactory = fn(ScreenInstance) -> Box<dyn Component>;

/// Route table: registered name → renderer factory.
#[derive(Default)]
pub struct ScreenRegistry {
    screens: HashMap<ScreenName, ScreenFactory>,
}

impl ScreenRegistry {
    pub fn register(&mut self, name: impl Into<ScreenName>, factory: ScreenFactory) {
        self.screens.insert(name.into(), factory);
    }

    pub fn build(&self, instance: &ScreenInstance) -> Option<Box<dyn Component>> {
        self.screens
            .get(&instance.name)
            .map(|factory| factory(instance.clone()))
    }

    pub fn contains(&self, name: &ScreenName) -> bool {
        self.screens.contains_key(name)
    }
}

/// Registered screen names.
pub mod names {
    pub const HOME: &str = "home";
    pub const DETAIL: &str = "detail";
    pub const SINGLE_MODAL: &str = "single-modal";
    pub const STACK_MODAL: &str = "stack-modal";
    pub const SINGLE_OVERLAY: &str = "single-overlay";
}

/// Register the playground routes.
pub fn register_screens() -> ScreenRegistry {
    let mut registry = ScreenRegistry::default();
    registry.register(names::HOME, |instance| {
        Box::new(home::HomeScreen::new(instance))
    });
    registry.register(names::DETAIL, |instance| {
        Box::new(detail::DetailScreen::new(instance))
    });
    registry.register(names::SINGLE_MODAL, |instance| {
        Box::new(single_modal::SingleModalScreen::new(instance))
    });
    registry.register(names::STACK_MODAL, |instance| {
        Box::new(stack_modal::StackModalScreen::new(instance))
    });
    registry.register(names::SINGLE_OVERLAY, |instance| {
        Box::new(single_overlay::SingleOverlayScreen::new(instance))
    });
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ComponentId, ScreenOptions};

    fn instance(name: &str) -> ScreenInstance {
        ScreenInstance {
            id: ComponentId::from("test-1"),
            name: name.into(),
            options: ScreenOptions::default(),
            props: None,
        }
    }

    #[test]
    fn every_playground_route_is_registered() {
        let registry = register_screens();
        for name in [
            names::HOME,
            names::DETAIL,
            names::SINGLE_MODAL,
            names::STACK_MODAL,
            names::SINGLE_OVERLAY,
        ] {
            assert!(registry.contains(&name.into()), "missing route: {name}");
            assert!(registry.build(&instance(name)).is_some());
        }
    }

    #[test]
    fn unregistered_names_build_nothing() {
        let registry = register_screens();
        assert!(registry.build(&instance("missing")).is_none());
    }
}
