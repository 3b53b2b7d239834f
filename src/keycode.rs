//! Logical key identifiers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A logical key as numbered by the native library.
///
/// Codes are defined by the library's key table; `0` means unknown. Use
/// [`Key::from_name`] (or [`NativeApi::parse_key`](crate::NativeApi::parse_key))
/// to obtain one from a name such as `"A"`, `"Enter"` or `"F5"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    /// The unknown key.
    pub const UNKNOWN: Key = Key(0);

    /// The raw native code.
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Check if this is the unknown key.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }

    /// Parses a key name with the linked library's table.
    ///
    /// Never fails: unrecognized names give [`Key::UNKNOWN`].
    ///
    /// Common names:
    /// - Letters `"A"`-`"Z"`, digits `"0"`-`"9"`, function keys `"F1"`-`"F24"`
    /// - Navigation: `"Up"`, `"Down"`, `"Left"`, `"Right"`, `"Home"`, `"End"`,
    ///   `"PageUp"`, `"PageDown"`
    /// - Editing: `"Backspace"`, `"Delete"`, `"Insert"`, `"Tab"`, `"Enter"`, `"Space"`
    /// - Modifiers: `"Shift"`, `"Control"`, `"Alt"`, `"Super"`, `"CapsLock"`, `"NumLock"`
    /// - Special: `"Escape"`, `"PrintScreen"`, `"ScrollLock"`, `"Pause"`
    #[cfg(feature = "native")]
    pub fn from_name(name: &str) -> Key {
        crate::NativeApi::linked().parse_key(name)
    }

    /// Canonical name from the linked library, empty if it has none.
    #[cfg(feature = "native")]
    pub fn name(self) -> String {
        crate::NativeApi::linked().key_name(self)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

#[cfg(feature = "native")]
impl std::str::FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::from_name(s))
    }
}
