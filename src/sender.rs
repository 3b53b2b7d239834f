//! Keyboard input injection.

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::keycode::Key;
use crate::marshal;
use crate::modifier::Modifier;
use crate::native::{NativeApi, RawCapabilities, RawSender};
use std::ptr::NonNull;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct SenderHandle(NonNull<RawSender>);

// SAFETY: the injector handle may be used from any thread; every use goes
// through the owning `Sender`'s mutex.
unsafe impl Send for SenderHandle {}

/// Owner of one native keyboard injector.
///
/// All methods take `&self` and serialize on an internal lock held for the
/// whole native call. Mutating methods fail with [`Error::Closed`] after
/// [`close`](Self::close); queries return their default instead.
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "native")]
/// # fn main() -> axidev_io::Result<()> {
/// use axidev_io::{Key, Modifier, Sender};
///
/// let sender = Sender::new()?;
/// sender.type_text("Hello, World!")?;
/// sender.combo(Modifier::CTRL, Key::from_name("S"))?;
/// sender.tap(Key::from_name("Enter"))?;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "native"))]
/// # fn main() {}
/// ```
pub struct Sender {
    api: &'static NativeApi,
    handle: Mutex<Option<SenderHandle>>,
}

impl Sender {
    /// Creates a sender on the linked library.
    #[cfg(feature = "native")]
    pub fn new() -> Result<Self> {
        Self::with_api(NativeApi::linked())
    }

    /// Creates a sender through `api`.
    pub fn with_api(api: &'static NativeApi) -> Result<Self> {
        let raw = unsafe { (api.sender_create)() };
        let handle = NonNull::new(raw).ok_or(Error::Allocation("keyboard sender"))?;
        log::debug!("created keyboard sender {raw:p}");
        Ok(Self {
            api,
            handle: Mutex::new(Some(SenderHandle(handle))),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<SenderHandle>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a side-effect-free native call, or returns `default` when closed.
    fn query<T>(&self, default: T, f: impl FnOnce(*mut RawSender) -> T) -> T {
        match &*self.lock() {
            Some(handle) => f(handle.0.as_ptr()),
            None => default,
        }
    }

    /// Runs a fallible native call and translates a `false` result.
    fn invoke(
        &self,
        operation: &'static str,
        f: impl FnOnce(*mut RawSender) -> bool,
    ) -> Result<()> {
        let guard = self.lock();
        let handle = guard.as_ref().ok_or(Error::Closed("sender"))?;
        self.check(operation, f(handle.0.as_ptr()))
    }

    fn check(&self, operation: &'static str, ok: bool) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(self
                .api
                .operation_failed(operation, &format!("{operation} failed")))
        }
    }

    /// Destroys the native injector. Idempotent.
    pub fn close(&self) {
        if let Some(handle) = self.lock().take() {
            let raw = handle.0.as_ptr();
            unsafe { (self.api.sender_destroy)(raw) };
            log::debug!("destroyed keyboard sender {raw:p}");
        }
    }

    /// Check if [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    /// Check if the backend is ready to inject events.
    pub fn is_ready(&self) -> bool {
        self.query(false, |raw| unsafe { (self.api.sender_is_ready)(raw) })
    }

    /// The active backend as reported by the library, `0` when closed.
    pub fn backend_type(&self) -> u8 {
        self.query(0, |raw| unsafe { (self.api.sender_type)(raw) })
    }

    /// The backend's capabilities, read fresh on every call.
    pub fn capabilities(&self) -> Capabilities {
        self.query(Capabilities::default(), |raw| {
            let mut caps = RawCapabilities::default();
            unsafe { (self.api.sender_get_capabilities)(raw, &mut caps) };
            caps.into()
        })
    }

    /// Triggers the platform permission prompt if needed.
    ///
    /// Returns whether the backend is ready afterwards.
    pub fn request_permissions(&self) -> bool {
        self.query(false, |raw| unsafe {
            (self.api.sender_request_permissions)(raw)
        })
    }

    /// Presses `key`.
    pub fn key_down(&self, key: Key) -> Result<()> {
        self.invoke("key down", |raw| unsafe {
            (self.api.sender_key_down)(raw, key.code())
        })
    }

    /// Releases `key`.
    pub fn key_up(&self, key: Key) -> Result<()> {
        self.invoke("key up", |raw| unsafe {
            (self.api.sender_key_up)(raw, key.code())
        })
    }

    /// Presses then releases `key`, honoring the key delay.
    pub fn tap(&self, key: Key) -> Result<()> {
        self.invoke("tap", |raw| unsafe { (self.api.sender_tap)(raw, key.code()) })
    }

    /// Modifiers the backend currently holds down, empty when closed.
    pub fn active_modifiers(&self) -> Modifier {
        self.query(Modifier::NONE, |raw| {
            Modifier::from_bits(unsafe { (self.api.sender_active_modifiers)(raw) })
        })
    }

    /// Presses the modifier keys in `mods`.
    pub fn hold_modifier(&self, mods: Modifier) -> Result<()> {
        self.invoke("hold modifier", |raw| unsafe {
            (self.api.sender_hold_modifier)(raw, mods.bits())
        })
    }

    /// Releases the modifier keys in `mods`.
    pub fn release_modifier(&self, mods: Modifier) -> Result<()> {
        self.invoke("release modifier", |raw| unsafe {
            (self.api.sender_release_modifier)(raw, mods.bits())
        })
    }

    /// Releases every held modifier.
    pub fn release_all_modifiers(&self) -> Result<()> {
        self.invoke("release all modifiers", |raw| unsafe {
            (self.api.sender_release_all_modifiers)(raw)
        })
    }

    /// Holds `mods`, taps `key`, then releases `mods`, as one native call.
    pub fn combo(&self, mods: Modifier, key: Key) -> Result<()> {
        self.invoke("combo", |raw| unsafe {
            (self.api.sender_combo)(raw, mods.bits(), key.code())
        })
    }

    /// Injects `text` independently of the keyboard layout where the backend
    /// supports it.
    ///
    /// Text containing a NUL byte is rejected with [`Error::InvalidArgument`].
    pub fn type_text(&self, text: &str) -> Result<()> {
        let guard = self.lock();
        let handle = guard.as_ref().ok_or(Error::Closed("sender"))?;
        // Closed wins over a bad argument
        let text = marshal::to_c_string(text)?;
        let ok = unsafe { (self.api.sender_type_text_utf8)(handle.0.as_ptr(), text.as_ptr()) };
        self.check("type text", ok)
    }

    /// Injects a single character.
    pub fn type_character(&self, ch: char) -> Result<()> {
        self.invoke("type character", |raw| unsafe {
            (self.api.sender_type_character)(raw, u32::from(ch))
        })
    }

    /// Forces delivery of queued events. No-op when closed.
    pub fn flush(&self) {
        self.query((), |raw| {
            if !unsafe { (self.api.sender_flush)(raw) } {
                log::debug!("keyboard sender flush reported failure");
            }
        })
    }

    /// Sets the delay between the press and release of tap and combo.
    /// No-op when closed.
    pub fn set_key_delay(&self, delay_us: u32) {
        self.query((), |raw| {
            if !unsafe { (self.api.sender_set_key_delay)(raw, delay_us) } {
                log::debug!("keyboard sender rejected key delay {delay_us}us");
            }
        })
    }
}

impl Drop for Sender {
    fn drop(&mut self) {
        self.close();
    }
}
