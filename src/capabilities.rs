//! Backend feature description.

use crate::native::RawCapabilities;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Features supported by the active injection backend.
///
/// Queried fresh from the library on each [`Sender::capabilities`](crate::Sender::capabilities)
/// call; a closed sender reports all `false`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capabilities {
    /// The backend can send physical key events.
    pub can_inject_keys: bool,
    /// The backend can inject arbitrary Unicode text.
    pub can_inject_text: bool,
    /// The backend simulates low-level HID events (e.g. uinput).
    pub can_simulate_hid: bool,
    /// Key repeat is supported.
    pub supports_key_repeat: bool,
    /// Accessibility permission is required (macOS).
    pub needs_accessibility_perm: bool,
    /// Input monitoring permission is required (macOS).
    pub needs_input_monitoring_perm: bool,
    /// Access to uinput or a similar device is required (Linux).
    pub needs_uinput_access: bool,
}

impl Capabilities {
    /// Check if a runtime permission prompt may be needed.
    pub fn needs_permissions(&self) -> bool {
        self.needs_accessibility_perm || self.needs_input_monitoring_perm
    }
}

impl From<RawCapabilities> for Capabilities {
    fn from(raw: RawCapabilities) -> Self {
        Self {
            can_inject_keys: raw.can_inject_keys,
            can_inject_text: raw.can_inject_text,
            can_simulate_hid: raw.can_simulate_hid,
            supports_key_repeat: raw.supports_key_repeat,
            needs_accessibility_perm: raw.needs_accessibility_perm,
            needs_input_monitoring_perm: raw.needs_input_monitoring_perm,
            needs_uinput_access: raw.needs_uinput_access,
        }
    }
}
