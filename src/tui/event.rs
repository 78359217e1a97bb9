use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::controls::{NamedKey, Trigger};

/// Terminal input, already translated for the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Key(Trigger),
    Resize,
}

/// Wait up to `timeout` for the next event the explorer cares about.
pub fn poll_event(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            map_key(key).map(TuiEvent::Key)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}

/// Translate a crossterm key press into a `Trigger`. Releases, repeats and
/// keys the explorer never binds map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Trigger> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Trigger::Key(NamedKey::CtrlC)),
            _ => None,
        };
    }
    let named = match key.code {
        KeyCode::Char(c) => return Some(Trigger::Char(c)),
        KeyCode::Up => NamedKey::Up,
        KeyCode::Down => NamedKey::Down,
        KeyCode::PageUp => NamedKey::PageUp,
        KeyCode::PageDown => NamedKey::PageDown,
        KeyCode::Enter => NamedKey::Enter,
        KeyCode::Esc => NamedKey::Esc,
        KeyCode::Backspace => NamedKey::Backspace,
        KeyCode::Tab => NamedKey::Tab,
        _ => return None,
    };
    Some(Trigger::Key(named))
}
