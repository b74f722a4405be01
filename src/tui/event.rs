use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// Playground input events, one per navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    PushHome,
    PushDetail,
    Pop,
    PopToFirst,
    PopToRoot,
    SetRoot,
    SetStackRoot,
    ShowModal,
    ShowStackModal,
    ShowOverlay,
    DismissModal,
    DismissAllModals,
    DismissOverlay,
    SystemBack,
    PressCloseButton,
    Resize,
    Quit,
}

/// Poll for an event (blocks up to `timeout`).
pub fn poll_event(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap() {
        return None;
    }
    match event::read().unwrap() {
        Event::Key(key) => match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
            (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
            (_, KeyCode::Char('1')) => Some(TuiEvent::PushHome),
            (_, KeyCode::Char('2') | KeyCode::Char('p')) => Some(TuiEvent::PushDetail),
            (_, KeyCode::Char('b')) => Some(TuiEvent::Pop),
            (_, KeyCode::Char('g')) => Some(TuiEvent::PopToFirst),
            (_, KeyCode::Char('t')) => Some(TuiEvent::PopToRoot),
            (_, KeyCode::Char('r')) => Some(TuiEvent::SetRoot),
            (_, KeyCode::Char('R')) => Some(TuiEvent::SetStackRoot),
            (_, KeyCode::Char('m')) => Some(TuiEvent::ShowModal),
            (_, KeyCode::Char('s')) => Some(TuiEvent::ShowStackModal),
            (_, KeyCode::Char('o')) => Some(TuiEvent::ShowOverlay),
            (_, KeyCode::Char('d')) => Some(TuiEvent::DismissModal),
            (_, KeyCode::Char('D')) => Some(TuiEvent::DismissAllModals),
            (_, KeyCode::Char('x')) => Some(TuiEvent::DismissOverlay),
            (_, KeyCode::Char('c')) => Some(TuiEvent::PressCloseButton),
            (_, KeyCode::Esc) => Some(TuiEvent::SystemBack),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
