//! Input events delivered by the UI shell.
//!
//! Events are plain data and deserialize from JSON, so a recorded session
//! can be replayed headless.

use serde::{Deserialize, Serialize};

use crate::model::ImagePoint;

/// Raw input delivered by the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer click on the image, in image coordinates.
    Click {
        position: ImagePoint,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Keyboard key pressed.
    KeyPressed {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Keyboard key released.
    KeyReleased {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Plain click at `(x, y)`.
    pub fn click(x: f64, y: f64) -> Self {
        Self::Click {
            position: ImagePoint::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    /// Click at `(x, y)` with shift held.
    pub fn shift_click(x: f64, y: f64) -> Self {
        Self::Click {
            position: ImagePoint::new(x, y),
            modifiers: Modifiers::SHIFT,
        }
    }

    /// Key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyPressed {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Shift,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Letters compare case-insensitively.
    pub fn matches(self, other: Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows or Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a bound key asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NextSlice,
    PreviousSlice,
    NextChannel,
    PreviousChannel,
    Undo,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::NextSlice => "Next slice",
            Action::PreviousSlice => "Previous slice",
            Action::NextChannel => "Next channel",
            Action::PreviousChannel => "Previous channel",
            Action::Undo => "Undo",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Action::NextSlice,
            Action::PreviousSlice,
            Action::NextChannel,
            Action::PreviousChannel,
            Action::Undo,
        ]
    }
}
