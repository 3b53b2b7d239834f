//! Keyboard events delivered to listener handlers.

use crate::keycode::Key;
use crate::modifier::Modifier;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One observed key transition.
///
/// Built by the listener bridge from the values the native monitor reports and
/// handed to the [`KeyHandler`](crate::KeyHandler) by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyEvent {
    /// Unicode codepoint produced by the event, `0` if none.
    pub codepoint: u32,
    /// The logical key, [`Key::UNKNOWN`] if the library could not map it.
    pub key: Key,
    /// Modifier state when the event occurred.
    pub modifiers: Modifier,
    /// `true` for a press, `false` for a release.
    pub pressed: bool,
}

impl KeyEvent {
    pub fn new(codepoint: u32, key: Key, modifiers: Modifier, pressed: bool) -> Self {
        Self {
            codepoint,
            key,
            modifiers,
            pressed,
        }
    }

    /// Check if this is a key press.
    #[inline]
    pub fn is_press(&self) -> bool {
        self.pressed
    }

    /// Check if this is a key release.
    #[inline]
    pub fn is_release(&self) -> bool {
        !self.pressed
    }

    /// The produced character, if any.
    ///
    /// `None` when the codepoint is `0` or not a Unicode scalar value.
    pub fn char(&self) -> Option<char> {
        match self.codepoint {
            0 => None,
            cp => char::from_u32(cp),
        }
    }

    /// Canonical name of the key from the linked library.
    #[cfg(feature = "native")]
    pub fn key_name(&self) -> String {
        self.key.name()
    }
}
