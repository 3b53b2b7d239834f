//! Symbols of the linked `libaxidev_io`.
//!
//! Link directives are emitted by `build.rs`.

use super::{NativeApi, RawCapabilities, RawKeyCallback, RawListener, RawSender};
use std::ffi::{c_char, c_void};

unsafe extern "C" {
    fn axidev_io_keyboard_sender_create() -> *mut RawSender;
    fn axidev_io_keyboard_sender_destroy(sender: *mut RawSender);
    fn axidev_io_keyboard_sender_is_ready(sender: *mut RawSender) -> bool;
    fn axidev_io_keyboard_sender_type(sender: *mut RawSender) -> u8;
    fn axidev_io_keyboard_sender_get_capabilities(
        sender: *mut RawSender,
        out_caps: *mut RawCapabilities,
    );
    fn axidev_io_keyboard_sender_request_permissions(sender: *mut RawSender) -> bool;
    fn axidev_io_keyboard_sender_key_down(sender: *mut RawSender, key: u16) -> bool;
    fn axidev_io_keyboard_sender_key_up(sender: *mut RawSender, key: u16) -> bool;
    fn axidev_io_keyboard_sender_tap(sender: *mut RawSender, key: u16) -> bool;
    fn axidev_io_keyboard_sender_active_modifiers(sender: *mut RawSender) -> u8;
    fn axidev_io_keyboard_sender_hold_modifier(sender: *mut RawSender, mods: u8) -> bool;
    fn axidev_io_keyboard_sender_release_modifier(sender: *mut RawSender, mods: u8) -> bool;
    fn axidev_io_keyboard_sender_release_all_modifiers(sender: *mut RawSender) -> bool;
    fn axidev_io_keyboard_sender_combo(sender: *mut RawSender, mods: u8, key: u16) -> bool;
    fn axidev_io_keyboard_sender_type_text_utf8(
        sender: *mut RawSender,
        utf8_text: *const c_char,
    ) -> bool;
    fn axidev_io_keyboard_sender_type_character(sender: *mut RawSender, codepoint: u32)
    -> bool;
    fn axidev_io_keyboard_sender_flush(sender: *mut RawSender) -> bool;
    fn axidev_io_keyboard_sender_set_key_delay(sender: *mut RawSender, delay_us: u32) -> bool;

    fn axidev_io_keyboard_listener_create() -> *mut RawListener;
    fn axidev_io_keyboard_listener_destroy(listener: *mut RawListener);
    fn axidev_io_keyboard_listener_start(
        listener: *mut RawListener,
        callback: Option<RawKeyCallback>,
        user_data: *mut c_void,
    ) -> bool;
    fn axidev_io_keyboard_listener_stop(listener: *mut RawListener) -> bool;
    fn axidev_io_keyboard_listener_is_listening(listener: *mut RawListener) -> bool;

    fn axidev_io_keyboard_key_to_string(key: u16) -> *mut c_char;
    fn axidev_io_keyboard_string_to_key(name: *const c_char) -> u16;

    fn axidev_io_free_string(s: *mut c_char);
    fn axidev_io_get_last_error() -> *mut c_char;
    fn axidev_io_clear_last_error();
    fn axidev_io_library_version() -> *const c_char;

    fn axidev_io_log_set_level(level: u8);
    fn axidev_io_log_get_level() -> u8;
    fn axidev_io_log_is_enabled(level: u8) -> bool;
}

pub(super) static LINKED: NativeApi = NativeApi {
    sender_create: axidev_io_keyboard_sender_create,
    sender_destroy: axidev_io_keyboard_sender_destroy,
    sender_is_ready: axidev_io_keyboard_sender_is_ready,
    sender_type: axidev_io_keyboard_sender_type,
    sender_get_capabilities: axidev_io_keyboard_sender_get_capabilities,
    sender_request_permissions: axidev_io_keyboard_sender_request_permissions,
    sender_key_down: axidev_io_keyboard_sender_key_down,
    sender_key_up: axidev_io_keyboard_sender_key_up,
    sender_tap: axidev_io_keyboard_sender_tap,
    sender_active_modifiers: axidev_io_keyboard_sender_active_modifiers,
    sender_hold_modifier: axidev_io_keyboard_sender_hold_modifier,
    sender_release_modifier: axidev_io_keyboard_sender_release_modifier,
    sender_release_all_modifiers: axidev_io_keyboard_sender_release_all_modifiers,
    sender_combo: axidev_io_keyboard_sender_combo,
    sender_type_text_utf8: axidev_io_keyboard_sender_type_text_utf8,
    sender_type_character: axidev_io_keyboard_sender_type_character,
    sender_flush: axidev_io_keyboard_sender_flush,
    sender_set_key_delay: axidev_io_keyboard_sender_set_key_delay,

    listener_create: axidev_io_keyboard_listener_create,
    listener_destroy: axidev_io_keyboard_listener_destroy,
    listener_start: axidev_io_keyboard_listener_start,
    listener_stop: axidev_io_keyboard_listener_stop,
    listener_is_listening: axidev_io_keyboard_listener_is_listening,

    key_to_string: axidev_io_keyboard_key_to_string,
    string_to_key: axidev_io_keyboard_string_to_key,

    free_string: axidev_io_free_string,
    get_last_error: axidev_io_get_last_error,
    clear_last_error: axidev_io_clear_last_error,
    library_version: axidev_io_library_version,

    log_set_level: axidev_io_log_set_level,
    log_get_level: axidev_io_log_get_level,
    log_is_enabled: axidev_io_log_is_enabled,
};
