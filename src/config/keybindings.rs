//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Defaults follow pager conventions (`less`, `more`) with vim-style extras.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Terminals disagree about reporting SHIFT with uppercase letters, so a
    /// shifted character falls back to its unshifted binding.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let key = KeyEvent::new(key.code, key.modifiers);
        self.bindings.get(&key).copied().or_else(|| {
            key.modifiers
                .contains(KeyModifiers::SHIFT)
                .then(|| KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT))
                .and_then(|k| self.bindings.get(&k).copied())
        })
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Rows
        keys.bind(KeyCode::Char('j'), none, KeyAction::LineDown);
        keys.bind(KeyCode::Down, none, KeyAction::LineDown);
        keys.bind(KeyCode::Enter, none, KeyAction::LineDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::LineUp);
        keys.bind(KeyCode::Up, none, KeyAction::LineUp);

        // Pages
        keys.bind(KeyCode::Char(' '), none, KeyAction::PageDown);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::Char('d'), ctrl, KeyAction::PageDown);
        keys.bind(KeyCode::Char('b'), none, KeyAction::PageUp);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::Char('u'), ctrl, KeyAction::PageUp);

        // Ends
        keys.bind(KeyCode::Char('g'), none, KeyAction::Top);
        keys.bind(KeyCode::Home, none, KeyAction::Top);
        keys.bind(KeyCode::Char('G'), none, KeyAction::Bottom);
        keys.bind(KeyCode::End, none, KeyAction::Bottom);

        // Chapters
        keys.bind(KeyCode::Char(']'), none, KeyAction::NextChapter);
        keys.bind(KeyCode::Char('['), none, KeyAction::PrevChapter);

        // Commands
        keys.bind(KeyCode::Char('u'), none, KeyAction::CycleUnderline);
        keys.bind(KeyCode::Char('f'), none, KeyAction::Format);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Esc, none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);

        keys
    }
}
