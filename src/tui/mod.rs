//! # Playground TUI
//!
//! The presentation glue that exercises the tracking layer end to end.
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop shape
//!
//! The loop itself is synchronous; navigation commands are spawned onto
//! the tokio runtime and report back over a std channel drained with
//! `try_recv`, so a slow transition never blocks input handling. Every
//! iteration re-reads the engine hierarchy and keeps one
//! [`ScreenTracker`] attached per presented screen instance - the
//! mount/unmount registration hook a screen framework would call from its
//! own lifecycle.

mod component;
mod event;
mod screens;
mod ui;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::error::NavigationError;
use crate::core::store::NavigationStore;
use crate::core::sync::ScreenTracker;
use crate::engine::{
    ComponentId, EventStream, NavigationEngine, NavigationEvent, ScreenComponent, ScreenOptions,
    TerminalEngine,
};
use crate::tui::event::{TuiEvent, poll_event};
use crate::tui::screens::{names, register_screens};

/// Result of a dispatched command, reported back to the event loop.
struct DispatchOutcome {
    command: &'static str,
    result: Result<(), NavigationError>,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Trackers attach between loop iterations, and an iteration can sit in
    // the input poll for up to 100ms. Keep the transition above that so no
    // lifecycle event can fire before its screen had a chance to attach.
    let transition = config.transition.max(Duration::from_millis(150));
    let engine = Arc::new(
        TerminalEngine::new(transition).with_default_options(ScreenOptions::titled("Waypoint")),
    );
    let store = NavigationStore::new(engine.clone());
    let registry = register_screens();

    let (tx, rx) = mpsc::channel::<DispatchOutcome>();

    // A modal's chrome close button dismisses it, the way a screen would
    // wire up its own top-bar button.
    spawn_close_button_handler(engine.subscribe(), store.clone(), tx.clone());

    // Launch-time bootstrap: present the initial root.
    info!("presenting initial root '{}'", config.root_screen);
    let root = ScreenComponent::new(config.root_screen.as_str());
    dispatch(tx.clone(), "set_root", {
        let store = store.clone();
        async move { store.set_root(root).await }
    });

    let mut terminal = ratatui::init();
    let mut status_updates = store.subscribe();
    let mut trackers: HashMap<ComponentId, ScreenTracker> = HashMap::new();
    let mut last_revision = 0u64;
    let mut message = String::from("waypoint playground");
    let mut needs_redraw = true;

    loop {
        let hierarchy = engine.hierarchy();
        sync_trackers(&store, &hierarchy.instance_ids(), &mut trackers);
        if hierarchy.revision != last_revision {
            last_revision = hierarchy.revision;
            needs_redraw = true;
        }
        while status_updates.try_next().is_some() {
            needs_redraw = true;
        }
        while let Ok(outcome) = rx.try_recv() {
            message = match outcome.result {
                Ok(()) => format!("{}: dispatched", outcome.command),
                Err(err) => {
                    warn!("{} failed: {err}", outcome.command);
                    format!("{}: {err}", outcome.command)
                }
            };
            needs_redraw = true;
        }

        if needs_redraw {
            let status = store.status();
            terminal.draw(|frame| ui::draw(frame, &hierarchy, &registry, &status, &message))?;
            needs_redraw = false;
        }

        let Some(event) = poll_event(Duration::from_millis(100)) else {
            continue;
        };
        needs_redraw = true;
        match event {
            TuiEvent::Quit => break,
            TuiEvent::Resize => {}
            TuiEvent::SystemBack => {
                if !engine.system_back() {
                    message = "system back: no modal shown".to_string();
                }
            }
            TuiEvent::PressCloseButton => match engine.hierarchy().top_modal() {
                Some(modal) => {
                    engine.press_button(&modal.id, "close");
                }
                None => message = "close button: no modal shown".to_string(),
            },
            action => handle_action(action, &store, &engine, &tx),
        }
    }

    ratatui::restore();
    Ok(())
}

/// Spawn a command onto the runtime and report its outcome to the loop.
fn dispatch<F>(tx: mpsc::Sender<DispatchOutcome>, command: &'static str, fut: F)
where
    F: Future<Output = Result<(), NavigationError>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = fut.await;
        let _ = tx.send(DispatchOutcome { command, result });
    });
}

fn handle_action(
    action: TuiEvent,
    store: &NavigationStore,
    engine: &Arc<TerminalEngine>,
    tx: &mpsc::Sender<DispatchOutcome>,
) {
    let store = store.clone();
    match action {
        TuiEvent::PushHome => dispatch(tx.clone(), "push", async move {
            store
                .push(
                    ScreenComponent::new(names::HOME)
                        .with_options(ScreenOptions::titled("Home (pushed)")),
                )
                .await
        }),
        TuiEvent::PushDetail => {
            let pushed_from = store
                .status()
                .current_component_id
                .as_ref()
                .map(|id| id.to_string());
            dispatch(tx.clone(), "push", async move {
                store
                    .push(
                        ScreenComponent::new(names::DETAIL)
                            .with_options(ScreenOptions::titled("Detail"))
                            .with_props(serde_json::json!({ "pushed_from": pushed_from })),
                    )
                    .await
            })
        }
        TuiEvent::Pop => dispatch(tx.clone(), "pop", async move { store.pop(None).await }),
        TuiEvent::PopToFirst => {
            // pop_to wants an explicit target: the first screen of the
            // stack holding the current screen.
            match first_of_current_stack(engine, &store) {
                Some(target) => dispatch(tx.clone(), "pop_to", async move {
                    store.pop_to(&target, None).await
                }),
                None => report(tx, "pop_to", Err(NavigationError::MissingComponentId)),
            }
        }
        TuiEvent::PopToRoot => match store.status().current_component_id.clone() {
            Some(on_id) => dispatch(tx.clone(), "pop_to_root", async move {
                store.pop_to_root(&on_id, None).await
            }),
            None => report(tx, "pop_to_root", Err(NavigationError::MissingComponentId)),
        },
        TuiEvent::SetRoot => dispatch(tx.clone(), "set_root", async move {
            store.set_root(ScreenComponent::new(names::HOME)).await
        }),
        TuiEvent::SetStackRoot => match store.status().current_component_id.clone() {
            Some(to_id) => dispatch(tx.clone(), "set_stack_root", async move {
                store
                    .set_stack_root(
                        &to_id,
                        ScreenComponent::new(names::DETAIL)
                            .with_options(ScreenOptions::titled("Detail (stack root)")),
                    )
                    .await
            }),
            None => report(tx, "set_stack_root", Err(NavigationError::MissingComponentId)),
        },
        TuiEvent::ShowModal => dispatch(tx.clone(), "show_modal", async move {
            store
                .show_modal(
                    ScreenComponent::new(names::SINGLE_MODAL)
                        .with_options(ScreenOptions::titled("Modal")),
                )
                .await
        }),
        TuiEvent::ShowStackModal => dispatch(tx.clone(), "show_modal", async move {
            // A sequence of screens normalizes to a stacked layout.
            store
                .show_modal(vec![
                    ScreenComponent::new(names::DETAIL)
                        .with_options(ScreenOptions::titled("Modal root")),
                    ScreenComponent::new(names::STACK_MODAL)
                        .with_options(ScreenOptions::titled("Stack modal")),
                ])
                .await
        }),
        TuiEvent::ShowOverlay => dispatch(tx.clone(), "show_overlay", async move {
            store
                .show_overlay(ScreenComponent::new(names::SINGLE_OVERLAY).with_options(
                    ScreenOptions {
                        title: Some("Overlay".to_string()),
                        pass_through: Some(true),
                    },
                ))
                .await
        }),
        TuiEvent::DismissModal => dispatch(tx.clone(), "dismiss_modal", async move {
            store.dismiss_modal(None).await
        }),
        TuiEvent::DismissAllModals => dispatch(tx.clone(), "dismiss_all_modals", async move {
            store.dismiss_all_modals(None).await
        }),
        TuiEvent::DismissOverlay => dispatch(tx.clone(), "dismiss_overlay", async move {
            store.dismiss_overlay().await
        }),
        // Handled by the loop directly.
        TuiEvent::Quit
        | TuiEvent::Resize
        | TuiEvent::SystemBack
        | TuiEvent::PressCloseButton => {}
    }
}

fn report(
    tx: &mpsc::Sender<DispatchOutcome>,
    command: &'static str,
    result: Result<(), NavigationError>,
) {
    let _ = tx.send(DispatchOutcome { command, result });
}

/// First screen of the stack containing the currently tracked screen.
fn first_of_current_stack(
    engine: &TerminalEngine,
    store: &NavigationStore,
) -> Option<ComponentId> {
    let current = store.status().current_component_id.clone()?;
    let hierarchy = engine.hierarchy();
    if hierarchy.root.iter().any(|s| s.id == current) {
        return hierarchy.root.first().map(|s| s.id.clone());
    }
    hierarchy
        .modals
        .iter()
        .find(|layer| layer.iter().any(|s| s.id == current))
        .and_then(|layer| layer.first())
        .map(|s| s.id.clone())
}

/// Keep exactly one tracker per presented instance: attach for newly
/// presented screens, detach (drop) for removed ones.
fn sync_trackers(
    store: &NavigationStore,
    presented: &[ComponentId],
    trackers: &mut HashMap<ComponentId, ScreenTracker>,
) {
    trackers.retain(|id, _| presented.contains(id));
    for id in presented {
        trackers
            .entry(id.clone())
            .or_insert_with(|| store.track(id.clone()));
    }
}

/// Dismiss the current modal when its chrome close button is pressed.
fn spawn_close_button_handler(
    mut events: EventStream,
    store: NavigationStore,
    tx: mpsc::Sender<DispatchOutcome>,
) {
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if let NavigationEvent::NavigationButtonPressed { button_id, .. } = event
                && button_id == "close"
            {
                let result = store.dismiss_modal(None).await;
                let _ = tx.send(DispatchOutcome {
                    command: "dismiss_modal",
                    result,
                });
            }
        }
    });
}
