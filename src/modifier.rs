//! Modifier key bitmask.
//!
//! Bit values match the native library's `AXIDEV_IO_MOD_*` constants.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of modifier keys, combinable with `|`.
///
/// ```
/// use axidev_io::Modifier;
///
/// let mods = Modifier::CTRL | Modifier::SHIFT;
/// assert!(mods.has_ctrl() && mods.has_shift());
/// assert!(!mods.has_alt());
/// assert_eq!(mods.to_string(), "Ctrl+Shift");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Modifier(u8);

impl Modifier {
    /// No modifiers.
    pub const NONE: Modifier = Modifier(0);
    /// Shift key.
    pub const SHIFT: Modifier = Modifier(1 << 0);
    /// Control key.
    pub const CTRL: Modifier = Modifier(1 << 1);
    /// Alt/Option key.
    pub const ALT: Modifier = Modifier(1 << 2);
    /// Super/Command/Windows key.
    pub const SUPER: Modifier = Modifier(1 << 3);
    /// Caps Lock state.
    pub const CAPS_LOCK: Modifier = Modifier(1 << 4);
    /// Num Lock state.
    pub const NUM_LOCK: Modifier = Modifier(1 << 5);

    /// All known modifiers combined.
    pub const ALL: Modifier = Modifier(
        Self::SHIFT.0
            | Self::CTRL.0
            | Self::ALT.0
            | Self::SUPER.0
            | Self::CAPS_LOCK.0
            | Self::NUM_LOCK.0,
    );

    const LABELS: [(Modifier, &'static str); 6] = [
        (Self::CTRL, "Ctrl"),
        (Self::ALT, "Alt"),
        (Self::SHIFT, "Shift"),
        (Self::SUPER, "Super"),
        (Self::CAPS_LOCK, "CapsLock"),
        (Self::NUM_LOCK, "NumLock"),
    ];

    /// Wraps a raw mask. Bits the crate does not know are kept.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Modifier(bits)
    }

    /// The raw mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Modifier) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Modifier) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Modifier) {
        self.0 &= !other.0;
    }

    /// Check if Shift is set.
    #[inline]
    pub const fn has_shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    /// Check if Control is set.
    #[inline]
    pub const fn has_ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    /// Check if Alt/Option is set.
    #[inline]
    pub const fn has_alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    /// Check if Super/Command/Windows is set.
    #[inline]
    pub const fn has_super(self) -> bool {
        self.0 & Self::SUPER.0 != 0
    }

    /// Check if Caps Lock is active.
    #[inline]
    pub const fn has_caps_lock(self) -> bool {
        self.0 & Self::CAPS_LOCK.0 != 0
    }

    /// Check if Num Lock is active.
    #[inline]
    pub const fn has_num_lock(self) -> bool {
        self.0 & Self::NUM_LOCK.0 != 0
    }
}

impl BitOr for Modifier {
    type Output = Modifier;

    fn bitor(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifier {
    fn bitor_assign(&mut self, rhs: Modifier) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Modifier {
    type Output = Modifier;

    fn bitand(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 & rhs.0)
    }
}

impl BitAndAssign for Modifier {
    fn bitand_assign(&mut self, rhs: Modifier) {
        self.0 &= rhs.0;
    }
}

impl From<u8> for Modifier {
    fn from(bits: u8) -> Self {
        Modifier(bits)
    }
}

impl From<Modifier> for u8 {
    fn from(mods: Modifier) -> Self {
        mods.0
    }
}

/// Renders `Ctrl+Alt+Shift+Super+CapsLock+NumLock` order; empty for none.
impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, label) in Self::LABELS {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(label)?;
                first = false;
            }
        }
        Ok(())
    }
}
