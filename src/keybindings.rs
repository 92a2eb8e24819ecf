//! Customizable keybindings for the localizer.
//!
//! Maps key presses to controller actions. Shift is reserved for arc mode
//! and is never bound to an action.

use serde::{Deserialize, Serialize};

use crate::input::{Action, Key, Modifiers};

/// A key plus whether the command modifier (Ctrl/Cmd) must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    #[serde(default)]
    pub command: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            command: false,
        }
    }

    pub fn with_command(key: Key) -> Self {
        Self { key, command: true }
    }

    /// Whether a press of `key` with `modifiers` triggers this chord.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key.matches(key) && self.command == modifiers.command()
    }
}

/// Keybinding configuration for the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub next_slice: KeyChord,
    pub previous_slice: KeyChord,
    pub next_channel: KeyChord,
    pub previous_channel: KeyChord,
    pub undo: KeyChord,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // Arrows walk slices left/right and channels up/down
            next_slice: KeyChord::plain(Key::Right),
            previous_slice: KeyChord::plain(Key::Left),
            next_channel: KeyChord::plain(Key::Up),
            previous_channel: KeyChord::plain(Key::Down),
            undo: KeyChord::with_command(Key::Char('z')),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, key: Key, modifiers: Modifiers) -> Option<Action> {
        Action::all()
            .iter()
            .copied()
            .find(|action| self.chord_for(*action).matches(key, modifiers))
    }

    /// Get the chord bound to an action.
    pub fn chord_for(&self, action: Action) -> KeyChord {
        match action {
            Action::NextSlice => self.next_slice,
            Action::PreviousSlice => self.previous_slice,
            Action::NextChannel => self.next_channel,
            Action::PreviousChannel => self.previous_channel,
            Action::Undo => self.undo,
        }
    }

    /// Rebind an action. Shift cannot be bound.
    pub fn set_chord(&mut self, action: Action, chord: KeyChord) -> bool {
        if chord.key == Key::Shift {
            log::warn!("Shift is reserved for arc mode, not binding {}", action.name());
            return false;
        }
        match action {
            Action::NextSlice => self.next_slice = chord,
            Action::PreviousSlice => self.previous_slice = chord,
            Action::NextChannel => self.next_channel = chord,
            Action::PreviousChannel => self.previous_channel = chord,
            Action::Undo => self.undo = chord,
        }
        true
    }

    /// Check if a chord is already used by another action.
    /// Returns the conflicting action, if any.
    pub fn key_conflict(&self, chord: KeyChord, exclude: Option<Action>) -> Option<Action> {
        Action::all().iter().copied().find(|action| {
            Some(*action) != exclude && {
                let bound = self.chord_for(*action);
                bound.key.matches(chord.key) && bound.command == chord.command
            }
        })
    }
}

/// Convert a Key to a display string.
pub fn key_to_string(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_ascii_uppercase().to_string(),
        Key::Shift => "Shift".to_string(),
        Key::Enter => "Enter".to_string(),
        Key::Escape => "Esc".to_string(),
        Key::Backspace => "Backspace".to_string(),
        Key::Delete => "Delete".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Space => "Space".to_string(),
        Key::Up => "↑".to_string(),
        Key::Down => "↓".to_string(),
        Key::Left => "←".to_string(),
        Key::Right => "→".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        Key::PageUp => "PgUp".to_string(),
        Key::PageDown => "PgDn".to_string(),
    }
}

/// Display string for a chord, e.g. `Ctrl+Z`.
pub fn chord_to_string(chord: KeyChord) -> String {
    if chord.command {
        format!("Ctrl+{}", key_to_string(chord.key))
    } else {
        key_to_string(chord.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions() {
        let bindings = KeyBindings::new();
        let none = Modifiers::default();
        assert_eq!(bindings.action_for(Key::Right, none), Some(Action::NextSlice));
        assert_eq!(bindings.action_for(Key::Left, none), Some(Action::PreviousSlice));
        assert_eq!(bindings.action_for(Key::Up, none), Some(Action::NextChannel));
        assert_eq!(bindings.action_for(Key::Down, none), Some(Action::PreviousChannel));
        assert_eq!(bindings.action_for(Key::Char('Z'), Modifiers::CTRL), Some(Action::Undo));
    }

    #[test]
    fn test_undo_needs_command() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action_for(Key::Char('z'), Modifiers::default()), None);
        assert_eq!(bindings.action_for(Key::Right, Modifiers::CTRL), None);
    }

    #[test]
    fn test_shift_cannot_be_bound() {
        let mut bindings = KeyBindings::new();
        assert!(!bindings.set_chord(Action::Undo, KeyChord::plain(Key::Shift)));
        assert_eq!(bindings.undo, KeyChord::with_command(Key::Char('z')));
    }

    #[test]
    fn test_rebind_and_conflict() {
        let mut bindings = KeyBindings::new();
        assert!(bindings.set_chord(Action::NextSlice, KeyChord::plain(Key::PageDown)));
        assert_eq!(
            bindings.action_for(Key::PageDown, Modifiers::default()),
            Some(Action::NextSlice)
        );

        let conflict = bindings.key_conflict(KeyChord::plain(Key::Up), None);
        assert_eq!(conflict, Some(Action::NextChannel));
        assert_eq!(
            bindings.key_conflict(KeyChord::plain(Key::Up), Some(Action::NextChannel)),
            None
        );
    }

    #[test]
    fn test_chord_strings() {
        assert_eq!(chord_to_string(KeyChord::with_command(Key::Char('z'))), "Ctrl+Z");
        assert_eq!(chord_to_string(KeyChord::plain(Key::PageUp)), "PgUp");
    }
}
