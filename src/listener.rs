//! Global keyboard monitoring.

use crate::error::{Error, Result};
use crate::event::KeyEvent;
use crate::native::{NativeApi, RawKeyCallback, RawListener};
use crate::registry::{self, Registration};
use std::ptr::NonNull;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Trait for receiving keyboard events from a [`Listener`].
///
/// Handlers run on the native library's monitoring thread, never on the
/// thread that called [`Listener::start`]. Keep them short: the next event is
/// not delivered until the handler returns.
pub trait KeyHandler: Send + Sync {
    /// Called for every key press and release.
    fn handle_key(&self, event: KeyEvent);
}

/// Implement KeyHandler for closures.
impl<F> KeyHandler for F
where
    F: Fn(KeyEvent) + Send + Sync,
{
    fn handle_key(&self, event: KeyEvent) {
        self(event);
    }
}

struct ListenerHandle(NonNull<RawListener>);

// SAFETY: the monitor handle may be used from any thread; every use goes
// through the owning `Listener`'s mutex.
unsafe impl Send for ListenerHandle {}

struct ListenerState {
    handle: Option<ListenerHandle>,
    session: Option<Registration>,
}

/// Owner of one native keyboard monitor.
///
/// States: created → listening ⇄ stopped → closed. Every method serializes on
/// an internal lock, so a `Listener` can be shared across threads (wrap it in
/// an [`Arc`] to stop it from inside its own handler).
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "native")]
/// # fn main() -> axidev_io::Result<()> {
/// use axidev_io::{KeyEvent, Listener};
///
/// let listener = Listener::new()?;
/// listener.start(|event: KeyEvent| {
///     if event.is_press() {
///         println!("pressed {}", event.key_name());
///     }
/// })?;
/// // ...
/// listener.close();
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "native"))]
/// # fn main() {}
/// ```
pub struct Listener {
    api: &'static NativeApi,
    state: Mutex<ListenerState>,
}

impl Listener {
    /// Creates a listener on the linked library.
    #[cfg(feature = "native")]
    pub fn new() -> Result<Self> {
        Self::with_api(NativeApi::linked())
    }

    /// Creates a listener through `api`.
    pub fn with_api(api: &'static NativeApi) -> Result<Self> {
        let raw = unsafe { (api.listener_create)() };
        let handle = NonNull::new(raw).ok_or(Error::Allocation("keyboard listener"))?;
        log::debug!("created keyboard listener {raw:p}");
        Ok(Self {
            api,
            state: Mutex::new(ListenerState {
                handle: Some(ListenerHandle(handle)),
                session: None,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ListenerState> {
        // The state is two Options; a panic cannot leave it half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts delivering events to `handler`.
    ///
    /// Returns immediately; events arrive on the library's thread.
    pub fn start<H: KeyHandler + 'static>(&self, handler: H) -> Result<()> {
        self.start_handler(Some(Arc::new(handler)))
    }

    /// Like [`start`](Self::start) for a handler chosen at runtime.
    ///
    /// `None` is rejected with [`Error::InvalidArgument`] and leaves the
    /// listener as it was.
    pub fn start_handler(&self, handler: Option<Arc<dyn KeyHandler>>) -> Result<()> {
        let mut state = self.lock();
        let raw = match &state.handle {
            Some(handle) => handle.0.as_ptr(),
            None => return Err(Error::Closed("listener")),
        };
        let handler =
            handler.ok_or_else(|| Error::InvalidArgument("handler cannot be empty".into()))?;

        // Registered before the native start: the first event may arrive
        // before the start call returns.
        let registration = registry::register(handler);
        let callback: RawKeyCallback = registry::trampoline;
        let started =
            unsafe { (self.api.listener_start)(raw, Some(callback), registration.user_data()) };

        if !started {
            // `registration` drops here, revoking the token
            return Err(self
                .api
                .operation_failed("start listener", "failed to start listener"));
        }

        // Replacing a previous session revokes its token
        state.session = Some(registration);
        log::debug!("keyboard listener {raw:p} started");
        Ok(())
    }

    /// Stops listening. No-op if not listening or closed.
    ///
    /// May be called from inside the handler. A handler invocation that is
    /// already running can finish after this returns.
    pub fn stop(&self) {
        let mut state = self.lock();
        if let Some(handle) = &state.handle {
            unsafe { (self.api.listener_stop)(handle.0.as_ptr()) };
            if state.session.is_some() {
                log::debug!("keyboard listener {:p} stopped", handle.0);
            }
        }
        state.session = None;
    }

    /// Check if the native monitor is currently active.
    ///
    /// `false` once closed.
    pub fn is_listening(&self) -> bool {
        match &self.lock().handle {
            Some(handle) => unsafe { (self.api.listener_is_listening)(handle.0.as_ptr()) },
            None => false,
        }
    }

    /// Stops listening and destroys the native monitor. Idempotent.
    pub fn close(&self) {
        let mut state = self.lock();
        if let Some(handle) = state.handle.take() {
            let raw = handle.0.as_ptr();
            unsafe {
                (self.api.listener_stop)(raw);
                (self.api.listener_destroy)(raw);
            }
            log::debug!("destroyed keyboard listener {raw:p}");
        }
        state.session = None;
    }

    /// Check if [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().handle.is_none()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.close();
    }
}
