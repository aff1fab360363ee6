use crate::internal::ui::app::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Where a binding applies. `Global` bindings are the fallback for every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyBindingContext {
    Global,
    List,
    Detail,
}

/// Maps key events to actions
#[derive(Debug, Clone, Default)]
pub struct KeyBindingMap {
    bindings: HashMap<KeyBindingContext, HashMap<KeyEvent, Action>>,
}

impl KeyBindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context-specific binding first, then the global one.
    pub fn get_action(&self, key: &KeyEvent, context: KeyBindingContext) -> Option<Action> {
        let key = normalize(*key);
        self.bindings
            .get(&context)
            .and_then(|m| m.get(&key))
            .or_else(|| {
                self.bindings
                    .get(&KeyBindingContext::Global)
                    .and_then(|m| m.get(&key))
            })
            .cloned()
    }

    pub fn add_binding(&mut self, context: KeyBindingContext, key: KeyEvent, action: Action) {
        self.bindings
            .entry(context)
            .or_default()
            .insert(normalize(key), action);
    }

    /// Merge custom keybindings from configuration
    pub fn merge_config(&mut self, config: &crate::config::KeyBindingConfig) {
        let mut merge = |ctx: KeyBindingContext, bindings: &HashMap<String, Action>| {
            for (key_str, action) in bindings {
                match parse_key_str(key_str) {
                    Some(key_event) => self.add_binding(ctx, key_event, action.clone()),
                    None => tracing::warn!("Invalid key string in config: {}", key_str),
                }
            }
        };

        merge(KeyBindingContext::Global, &config.global);
        merge(KeyBindingContext::List, &config.list);
        merge(KeyBindingContext::Detail, &config.detail);
    }
}

/// Terminals disagree on reporting `Shift` for chars it already produced (`J`, `?`);
/// drop it so those bindings match either way. Lower-case letters keep it.
/// Event kind/state are not part of a binding.
fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        KeyCode::Char(c) if !c.is_lowercase() => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    };
    KeyEvent::new(key.code, modifiers)
}

/// Parse a key string into a KeyEvent
/// Supported formats:
/// - Single char: "j", "k", "1"
/// - Special keys: "Enter", "Tab", "Esc", "Up", "Down", "Left", "Right"
/// - With modifiers: "Ctrl+r", "Alt+Enter"
pub fn parse_key_str(key_str: &str) -> Option<KeyEvent> {
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, key)) if !key.is_empty() => (Some(mods), key),
        _ => (None, key_str),
    };

    let mut modifiers = KeyModifiers::empty();
    for modifier in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        match modifier.to_lowercase().as_str() {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part {
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "Esc" => KeyCode::Esc,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Backspace" => KeyCode::Backspace,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}
