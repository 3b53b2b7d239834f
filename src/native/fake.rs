//! In-process stand-in for `libaxidev_io`, used by the unit tests.
//!
//! Every entry point is a real `extern "C"` function so the bindings exercise
//! the same pointer and callback paths as with the linked library. State a test
//! inspects (last error, injected events, failure injection, the most recent
//! listener session) is thread-local, which keeps parallel tests apart; the
//! bindings call the library synchronously on the caller's thread, so a test
//! sees exactly its own calls.
//!
//! Handles are never freed: `destroy` only counts, so tests can check that a
//! handle was destroyed exactly once after the owner let go of it.

use super::{NativeApi, RawCapabilities, RawKeyCallback, RawListener, RawSender};
use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString, c_char, c_void};
use std::ptr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

pub(crate) const VERSION: &str = "0.0.0-test";
pub(crate) const BACKEND_TYPE: u8 = 2;

const VERSION_C: &CStr = c"0.0.0-test";

/// Named keys besides letters (1-26) and digits (27-36). The first name for a
/// code is canonical.
const KEY_NAMES: &[(&str, u16)] = &[
    ("Enter", 37),
    ("Return", 37),
    ("Space", 38),
    ("Escape", 39),
    ("Esc", 39),
    ("Tab", 40),
    ("Shift", 41),
    ("Control", 42),
    ("Ctrl", 42),
    ("Alt", 43),
    ("Super", 44),
    ("Meta", 44),
    ("Backspace", 45),
];

const FIRST_FUNCTION_KEY: u16 = 50;

/// One call that reached the fake injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Injected {
    KeyDown(u16),
    KeyUp(u16),
    Tap(u16),
    Hold(u8),
    Release(u8),
    ReleaseAll,
    Combo(u8, u16),
    Text(String),
    Character(u32),
    Flush,
    KeyDelay(u32),
}

/// A listener start as seen by the library: the callback and its user-data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Session {
    callback: RawKeyCallback,
    user_data: usize,
}

impl Session {
    pub(crate) fn user_data(&self) -> *mut c_void {
        ptr::without_provenance_mut(self.user_data)
    }

    /// Fires the callback the way the monitoring thread would.
    pub(crate) fn emit(&self, codepoint: u32, key: u16, mods: u8, pressed: bool) {
        unsafe { (self.callback)(codepoint, key, mods, pressed, self.user_data()) }
    }
}

#[derive(Default)]
struct FakeSender {
    mods: AtomicU8,
    destroyed: AtomicUsize,
}

#[derive(Default)]
struct FakeListener {
    session: Mutex<Option<Session>>,
    destroyed: AtomicUsize,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
    static FAIL_NEXT: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
    static FAIL_CREATE: Cell<bool> = const { Cell::new(false) };
    static INJECTED: RefCell<Vec<Injected>> = const { RefCell::new(Vec::new()) };
    static SESSION: Cell<Option<Session>> = const { Cell::new(None) };
    static OUTSTANDING: Cell<isize> = const { Cell::new(0) };
    static LOG_LEVEL: Cell<u8> = const { Cell::new(1) };
}

/// Calls made on a handle after it was destroyed, across all threads.
static USE_AFTER_DESTROY: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn api() -> &'static NativeApi {
    &FAKE
}

/// Sets the last-error slot of the current thread.
pub(crate) fn set_last_error(message: &str) {
    let message = CString::new(message).ok();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

/// Makes the next fallible call on this thread return `false`.
///
/// `Some(message)` also sets the last error; `None` leaves it untouched.
pub(crate) fn fail_next(message: Option<&str>) {
    FAIL_NEXT.with(|slot| *slot.borrow_mut() = Some(message.map(str::to_owned)));
}

/// Makes the next create call on this thread return null.
pub(crate) fn fail_next_create() {
    FAIL_CREATE.with(|flag| flag.set(true));
}

/// Drains the injected calls recorded on this thread.
pub(crate) fn take_injected() -> Vec<Injected> {
    INJECTED.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

/// The most recent listener start attempted on this thread.
pub(crate) fn take_session() -> Option<Session> {
    SESSION.with(Cell::take)
}

/// Native strings handed out on this thread and not yet freed.
pub(crate) fn outstanding_strings() -> isize {
    OUTSTANDING.with(Cell::get)
}

/// Allocates a string the way the library does for its return values.
pub(crate) fn alloc_string(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(s) => {
            OUTSTANDING.with(|n| n.set(n.get() + 1));
            s.into_raw()
        }
        Err(_) => ptr::null_mut(),
    }
}

pub(crate) fn sender_destroy_count(raw: *mut RawSender) -> usize {
    unsafe { &*raw.cast::<FakeSender>() }.destroyed.load(Ordering::SeqCst)
}

pub(crate) fn listener_destroy_count(raw: *mut RawListener) -> usize {
    unsafe { &*raw.cast::<FakeListener>() }.destroyed.load(Ordering::SeqCst)
}

pub(crate) fn use_after_destroy() -> usize {
    USE_AFTER_DESTROY.load(Ordering::SeqCst)
}

fn take_failure() -> bool {
    match FAIL_NEXT.with(|slot| slot.borrow_mut().take()) {
        Some(message) => {
            if let Some(message) = message {
                set_last_error(&message);
            }
            true
        }
        None => false,
    }
}

fn take_create_failure() -> bool {
    FAIL_CREATE.with(|flag| flag.replace(false))
}

fn record(call: Injected) {
    INJECTED.with(|log| log.borrow_mut().push(call));
}

fn sender<'a>(raw: *mut RawSender) -> &'a FakeSender {
    let sender = unsafe { &*raw.cast::<FakeSender>() };
    if sender.destroyed.load(Ordering::SeqCst) > 0 {
        USE_AFTER_DESTROY.fetch_add(1, Ordering::SeqCst);
    }
    sender
}

fn listener<'a>(raw: *mut RawListener) -> &'a FakeListener {
    let listener = unsafe { &*raw.cast::<FakeListener>() };
    if listener.destroyed.load(Ordering::SeqCst) > 0 {
        USE_AFTER_DESTROY.fetch_add(1, Ordering::SeqCst);
    }
    listener
}

/// Records `call` unless a failure was requested.
fn inject(raw: *mut RawSender, call: Injected) -> bool {
    sender(raw);
    if take_failure() {
        return false;
    }
    record(call);
    true
}

fn key_code(name: &str) -> u16 {
    match name.as_bytes() {
        [c @ b'a'..=b'z'] => u16::from(c - b'a') + 1,
        [c @ b'A'..=b'Z'] => u16::from(c - b'A') + 1,
        [c @ b'0'..=b'9'] => u16::from(c - b'0') + 27,
        [b'F' | b'f', digits @ ..] if !digits.is_empty() => {
            match std::str::from_utf8(digits).ok().and_then(|d| d.parse::<u16>().ok()) {
                Some(n @ 1..=24) => FIRST_FUNCTION_KEY + n - 1,
                _ => 0,
            }
        }
        _ => KEY_NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map_or(0, |&(_, code)| code),
    }
}

fn key_label(code: u16) -> Option<String> {
    match code {
        1..=26 => Some(char::from(b'A' + (code - 1) as u8).to_string()),
        27..=36 => Some(char::from(b'0' + (code - 27) as u8).to_string()),
        c if (FIRST_FUNCTION_KEY..FIRST_FUNCTION_KEY + 24).contains(&c) => {
            Some(format!("F{}", c - FIRST_FUNCTION_KEY + 1))
        }
        _ => KEY_NAMES
            .iter()
            .find(|&&(_, known)| known == code)
            .map(|(name, _)| (*name).to_owned()),
    }
}

unsafe extern "C" fn sender_create() -> *mut RawSender {
    if take_create_failure() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::<FakeSender>::default()).cast()
}

unsafe extern "C" fn sender_destroy(raw: *mut RawSender) {
    sender(raw).destroyed.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn sender_is_ready(raw: *mut RawSender) -> bool {
    sender(raw);
    true
}

unsafe extern "C" fn sender_type(raw: *mut RawSender) -> u8 {
    sender(raw);
    BACKEND_TYPE
}

unsafe extern "C" fn sender_get_capabilities(raw: *mut RawSender, out: *mut RawCapabilities) {
    sender(raw);
    let caps = RawCapabilities {
        can_inject_keys: true,
        can_inject_text: true,
        can_simulate_hid: true,
        supports_key_repeat: false,
        needs_accessibility_perm: false,
        needs_input_monitoring_perm: false,
        needs_uinput_access: true,
    };
    unsafe { out.write(caps) };
}

unsafe extern "C" fn sender_request_permissions(raw: *mut RawSender) -> bool {
    sender(raw);
    true
}

unsafe extern "C" fn sender_key_down(raw: *mut RawSender, key: u16) -> bool {
    inject(raw, Injected::KeyDown(key))
}

unsafe extern "C" fn sender_key_up(raw: *mut RawSender, key: u16) -> bool {
    inject(raw, Injected::KeyUp(key))
}

unsafe extern "C" fn sender_tap(raw: *mut RawSender, key: u16) -> bool {
    inject(raw, Injected::Tap(key))
}

unsafe extern "C" fn sender_active_modifiers(raw: *mut RawSender) -> u8 {
    sender(raw).mods.load(Ordering::SeqCst)
}

unsafe extern "C" fn sender_hold_modifier(raw: *mut RawSender, mods: u8) -> bool {
    let ok = inject(raw, Injected::Hold(mods));
    if ok {
        sender(raw).mods.fetch_or(mods, Ordering::SeqCst);
    }
    ok
}

unsafe extern "C" fn sender_release_modifier(raw: *mut RawSender, mods: u8) -> bool {
    let ok = inject(raw, Injected::Release(mods));
    if ok {
        sender(raw).mods.fetch_and(!mods, Ordering::SeqCst);
    }
    ok
}

unsafe extern "C" fn sender_release_all_modifiers(raw: *mut RawSender) -> bool {
    let ok = inject(raw, Injected::ReleaseAll);
    if ok {
        sender(raw).mods.store(0, Ordering::SeqCst);
    }
    ok
}

unsafe extern "C" fn sender_combo(raw: *mut RawSender, mods: u8, key: u16) -> bool {
    inject(raw, Injected::Combo(mods, key))
}

unsafe extern "C" fn sender_type_text_utf8(raw: *mut RawSender, text: *const c_char) -> bool {
    if text.is_null() {
        set_last_error("text is null");
        return false;
    }
    let text = unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned();
    inject(raw, Injected::Text(text))
}

unsafe extern "C" fn sender_type_character(raw: *mut RawSender, codepoint: u32) -> bool {
    inject(raw, Injected::Character(codepoint))
}

unsafe extern "C" fn sender_flush(raw: *mut RawSender) -> bool {
    inject(raw, Injected::Flush)
}

unsafe extern "C" fn sender_set_key_delay(raw: *mut RawSender, delay_us: u32) -> bool {
    inject(raw, Injected::KeyDelay(delay_us))
}

unsafe extern "C" fn listener_create() -> *mut RawListener {
    if take_create_failure() {
        return ptr::null_mut();
    }
    Box::into_raw(Box::<FakeListener>::default()).cast()
}

unsafe extern "C" fn listener_destroy(raw: *mut RawListener) {
    let listener = listener(raw);
    *listener.session.lock().unwrap() = None;
    listener.destroyed.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn listener_start(
    raw: *mut RawListener,
    callback: Option<RawKeyCallback>,
    user_data: *mut c_void,
) -> bool {
    let listener = listener(raw);
    let Some(callback) = callback else {
        set_last_error("callback is null");
        return false;
    };
    let session = Session {
        callback,
        user_data: user_data.addr(),
    };
    SESSION.with(|slot| slot.set(Some(session)));
    if take_failure() {
        return false;
    }
    *listener.session.lock().unwrap() = Some(session);
    true
}

unsafe extern "C" fn listener_stop(raw: *mut RawListener) -> bool {
    listener(raw).session.lock().unwrap().take().is_some()
}

unsafe extern "C" fn listener_is_listening(raw: *mut RawListener) -> bool {
    listener(raw).session.lock().unwrap().is_some()
}

unsafe extern "C" fn key_to_string(key: u16) -> *mut c_char {
    match key_label(key) {
        Some(name) => alloc_string(&name),
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn string_to_key(name: *const c_char) -> u16 {
    if name.is_null() {
        return 0;
    }
    match unsafe { CStr::from_ptr(name) }.to_str() {
        Ok(name) => key_code(name),
        Err(_) => 0,
    }
}

unsafe extern "C" fn free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    OUTSTANDING.with(|n| n.set(n.get() - 1));
    drop(unsafe { CString::from_raw(s) });
}

unsafe extern "C" fn get_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| match &*slot.borrow() {
        Some(message) => {
            OUTSTANDING.with(|n| n.set(n.get() + 1));
            message.clone().into_raw()
        }
        None => ptr::null_mut(),
    })
}

unsafe extern "C" fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

unsafe extern "C" fn library_version() -> *const c_char {
    VERSION_C.as_ptr()
}

unsafe extern "C" fn log_set_level(level: u8) {
    LOG_LEVEL.with(|l| l.set(level));
}

unsafe extern "C" fn log_get_level() -> u8 {
    LOG_LEVEL.with(Cell::get)
}

unsafe extern "C" fn log_is_enabled(level: u8) -> bool {
    level >= LOG_LEVEL.with(Cell::get)
}

static FAKE: NativeApi = NativeApi {
    sender_create,
    sender_destroy,
    sender_is_ready,
    sender_type,
    sender_get_capabilities,
    sender_request_permissions,
    sender_key_down,
    sender_key_up,
    sender_tap,
    sender_active_modifiers,
    sender_hold_modifier,
    sender_release_modifier,
    sender_release_all_modifiers,
    sender_combo,
    sender_type_text_utf8,
    sender_type_character,
    sender_flush,
    sender_set_key_delay,
    listener_create,
    listener_destroy,
    listener_start,
    listener_stop,
    listener_is_listening,
    key_to_string,
    string_to_key,
    free_string,
    get_last_error,
    clear_last_error,
    library_version,
    log_set_level,
    log_get_level,
    log_is_enabled,
};
