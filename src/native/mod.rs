//! The C-ABI boundary of the axidev-io library.
//!
//! Every native entry point the bindings use is collected in [`NativeApi`], a
//! table of `extern "C"` function pointers. [`Sender`](crate::Sender) and
//! [`Listener`](crate::Listener) only ever call through such a table, which
//! keeps the unsafe surface in one place and lets a table be supplied from
//! somewhere other than the linker.
//!
//! ## Feature Flags
//!
//! - `native`: link against `libaxidev_io` and expose [`NativeApi::linked`]
//!   together with the crate-level convenience functions.
//!
//! ## Process-wide state
//!
//! The library keeps one last-error string and one log level for the whole
//! process. Any failing call on any thread overwrites the error, so it must be
//! read immediately after the call that failed. The bindings do this for you
//! and carry the text inside [`Error::OperationFailed`].

#[cfg(feature = "native")]
mod linked;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::Error;
use crate::keycode::Key;
use crate::logging::{self, LogLevel};
use crate::marshal::{self, NativeString};
use std::ffi::{c_char, c_void};
use std::marker::{PhantomData, PhantomPinned};

/// Opaque native keyboard injector.
#[repr(C)]
pub struct RawSender {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Opaque native keyboard monitor.
#[repr(C)]
pub struct RawListener {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Capabilities record filled in place by `sender_get_capabilities`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawCapabilities {
    pub can_inject_keys: bool,
    pub can_inject_text: bool,
    pub can_simulate_hid: bool,
    pub supports_key_repeat: bool,
    pub needs_accessibility_perm: bool,
    pub needs_input_monitoring_perm: bool,
    pub needs_uinput_access: bool,
}

/// Listener callback: `(codepoint, key, modifiers, pressed, user_data)`.
///
/// Invoked by the library on its own monitoring thread.
pub type RawKeyCallback = unsafe extern "C" fn(u32, u16, u8, bool, *mut c_void);

/// Function table for the axidev-io C API.
///
/// Each field mirrors the C function of the same name with the
/// `axidev_io_keyboard_` (or `axidev_io_`) prefix removed.
#[derive(Debug, Clone, Copy)]
pub struct NativeApi {
    pub sender_create: unsafe extern "C" fn() -> *mut RawSender,
    pub sender_destroy: unsafe extern "C" fn(*mut RawSender),
    pub sender_is_ready: unsafe extern "C" fn(*mut RawSender) -> bool,
    pub sender_type: unsafe extern "C" fn(*mut RawSender) -> u8,
    pub sender_get_capabilities: unsafe extern "C" fn(*mut RawSender, *mut RawCapabilities),
    pub sender_request_permissions: unsafe extern "C" fn(*mut RawSender) -> bool,
    pub sender_key_down: unsafe extern "C" fn(*mut RawSender, u16) -> bool,
    pub sender_key_up: unsafe extern "C" fn(*mut RawSender, u16) -> bool,
    pub sender_tap: unsafe extern "C" fn(*mut RawSender, u16) -> bool,
    pub sender_active_modifiers: unsafe extern "C" fn(*mut RawSender) -> u8,
    pub sender_hold_modifier: unsafe extern "C" fn(*mut RawSender, u8) -> bool,
    pub sender_release_modifier: unsafe extern "C" fn(*mut RawSender, u8) -> bool,
    pub sender_release_all_modifiers: unsafe extern "C" fn(*mut RawSender) -> bool,
    pub sender_combo: unsafe extern "C" fn(*mut RawSender, u8, u16) -> bool,
    pub sender_type_text_utf8: unsafe extern "C" fn(*mut RawSender, *const c_char) -> bool,
    pub sender_type_character: unsafe extern "C" fn(*mut RawSender, u32) -> bool,
    pub sender_flush: unsafe extern "C" fn(*mut RawSender) -> bool,
    pub sender_set_key_delay: unsafe extern "C" fn(*mut RawSender, u32) -> bool,

    pub listener_create: unsafe extern "C" fn() -> *mut RawListener,
    pub listener_destroy: unsafe extern "C" fn(*mut RawListener),
    pub listener_start:
        unsafe extern "C" fn(*mut RawListener, Option<RawKeyCallback>, *mut c_void) -> bool,
    pub listener_stop: unsafe extern "C" fn(*mut RawListener) -> bool,
    pub listener_is_listening: unsafe extern "C" fn(*mut RawListener) -> bool,

    pub key_to_string: unsafe extern "C" fn(u16) -> *mut c_char,
    pub string_to_key: unsafe extern "C" fn(*const c_char) -> u16,

    pub free_string: unsafe extern "C" fn(*mut c_char),
    pub get_last_error: unsafe extern "C" fn() -> *mut c_char,
    pub clear_last_error: unsafe extern "C" fn(),
    pub library_version: unsafe extern "C" fn() -> *const c_char,

    pub log_set_level: unsafe extern "C" fn(u8),
    pub log_get_level: unsafe extern "C" fn() -> u8,
    pub log_is_enabled: unsafe extern "C" fn(u8) -> bool,
}

impl NativeApi {
    /// The table of the library this crate was linked against.
    #[cfg(feature = "native")]
    pub fn linked() -> &'static NativeApi {
        &linked::LINKED
    }

    /// Version string of the native library.
    pub fn library_version(&self) -> String {
        // SAFETY: the library returns a static NUL-terminated string or null.
        unsafe { marshal::borrowed_string((self.library_version)()) }
    }

    /// The process-wide last error, if one is set.
    pub fn last_error(&self) -> Option<String> {
        // SAFETY: ownership of the returned buffer passes to us and is released
        // through `free_string` when the guard drops.
        let message = unsafe { NativeString::from_raw(self, (self.get_last_error)()) }?;
        let message = message.to_string_lossy();
        (!message.is_empty()).then_some(message)
    }

    /// Clears the process-wide last error.
    pub fn clear_last_error(&self) {
        unsafe { (self.clear_last_error)() }
    }

    /// Builds an [`Error::OperationFailed`] for a native call that just
    /// returned `false`, reading the last-error channel exactly once.
    pub(crate) fn operation_failed(&self, operation: &'static str, fallback: &str) -> Error {
        let message = self.last_error().unwrap_or_else(|| fallback.to_owned());
        log::debug!("{operation} failed: {message}");
        Error::OperationFailed { operation, message }
    }

    /// Canonical name of `key`, or an empty string when the library has none.
    pub fn key_name(&self, key: Key) -> String {
        // SAFETY: the returned buffer is owned by us and freed by the guard.
        unsafe { NativeString::from_raw(self, (self.key_to_string)(key.code())) }
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    /// Parses a key name. Unrecognized names give [`Key::UNKNOWN`].
    ///
    /// Case folding and aliases (`"esc"`, `"return"`, ...) are handled by the
    /// library.
    pub fn parse_key(&self, name: &str) -> Key {
        match marshal::to_c_string(name) {
            Ok(name) => Key(unsafe { (self.string_to_key)(name.as_ptr()) }),
            Err(_) => Key::UNKNOWN,
        }
    }

    /// Current native log level.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_raw(unsafe { (self.log_get_level)() }).unwrap_or_default()
    }

    /// Sets the native log level. Messages below `level` are suppressed.
    pub fn set_log_level(&self, level: LogLevel) {
        unsafe { (self.log_set_level)(level.as_raw()) }
    }

    /// Whether native messages at `level` are currently emitted.
    pub fn is_log_enabled(&self, level: LogLevel) -> bool {
        unsafe { (self.log_is_enabled)(level.as_raw()) }
    }

    /// Applies `AXIDEV_IO_LOG` to the native library, returning the level set.
    pub fn apply_env_log_level(&self) -> Option<LogLevel> {
        let level = logging::level_from_env()?;
        self.set_log_level(level);
        Some(level)
    }
}

/// Version string of the linked library.
#[cfg(feature = "native")]
pub fn library_version() -> String {
    NativeApi::linked().library_version()
}

/// The process-wide last error of the linked library.
#[cfg(feature = "native")]
pub fn last_error() -> Option<String> {
    NativeApi::linked().last_error()
}

/// Clears the process-wide last error of the linked library.
#[cfg(feature = "native")]
pub fn clear_last_error() {
    NativeApi::linked().clear_last_error()
}

/// Current log level of the linked library.
#[cfg(feature = "native")]
pub fn log_level() -> LogLevel {
    NativeApi::linked().log_level()
}

/// Sets the log level of the linked library.
#[cfg(feature = "native")]
pub fn set_log_level(level: LogLevel) {
    NativeApi::linked().set_log_level(level)
}

/// Whether the linked library emits messages at `level`.
#[cfg(feature = "native")]
pub fn is_log_enabled(level: LogLevel) -> bool {
    NativeApi::linked().is_log_enabled(level)
}
