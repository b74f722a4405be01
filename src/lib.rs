//! Navigation state tracking over a pluggable screen-navigation engine.
//!
//! The engine (anything implementing [`engine::NavigationEngine`]) performs
//! stack/modal/overlay transitions asynchronously and emits lifecycle
//! events; [`core::NavigationStore`] mirrors those events into an
//! observable [`core::NavigationStatus`] snapshot, with bookkeeping for the
//! screens suspended beneath modal and overlay layers. The `tui` module is
//! a terminal playground exercising the whole thing.

pub mod core;
pub mod engine;
pub mod tui;

#[cfg(test)]
pub mod test_support;
