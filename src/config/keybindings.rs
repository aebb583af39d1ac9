//! Keyboard bindings configuration.

use crate::model::key_action::{ChatKey, KeyAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions while the input line is unfocused.
///
/// Provides default bindings; the focused input line bypasses this table
/// and uses [`input_key`] instead.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Overlay
        bindings.insert(
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE),
            KeyAction::ToggleChat,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE),
            KeyAction::ToggleChat,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::FocusInput,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE),
            KeyAction::FocusInput,
        );

        // Line scrolling
        bindings.insert(
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            KeyAction::StepOlder,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::StepOlder,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            KeyAction::StepNewer,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::StepNewer,
        );

        // Page navigation
        bindings.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            KeyAction::PageOlder,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            KeyAction::PageOlder,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            KeyAction::PageNewer,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            KeyAction::PageNewer,
        );

        // Application controls
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}

/// Translate a key event for the focused input line.
///
/// Printable characters (with or without Shift) become [`ChatKey::Char`];
/// chords with Control or Alt are not input and return `None`.
pub fn input_key(key: KeyEvent) -> Option<ChatKey> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        KeyCode::Char(ch) => Some(ChatKey::Char(ch)),
        KeyCode::Backspace => Some(ChatKey::Backspace),
        KeyCode::Enter => Some(ChatKey::Enter),
        KeyCode::Up => Some(ChatKey::HistoryPrev),
        KeyCode::Down => Some(ChatKey::HistoryNext),
        KeyCode::Esc => Some(ChatKey::Escape),
        _ => None,
    }
}
