//! Token table that bridges native listener callbacks to Rust handlers.
//!
//! The native monitor only carries an opaque `void*` back to us. Instead of
//! handing it a pointer into a Rust object, each listen session registers its
//! handler under a fresh integer token and passes the token as the user-data.
//! [`trampoline`] turns the token back into the handler. Tokens are never
//! reused, so a callback that races a `stop` finds nothing and returns instead
//! of touching freed memory.

use crate::event::KeyEvent;
use crate::keycode::Key;
use crate::listener::KeyHandler;
use crate::modifier::Modifier;
use std::collections::HashMap;
use std::ffi::c_void;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

type Table = HashMap<NonZeroUsize, Arc<dyn KeyHandler>>;

static HANDLERS: LazyLock<Mutex<Table>> = LazyLock::new(|| Mutex::new(HashMap::new()));

static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(1);

fn handlers() -> MutexGuard<'static, Table> {
    HANDLERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A registered handler. Dropping it revokes the token.
pub(crate) struct Registration {
    token: NonZeroUsize,
}

impl Registration {
    /// The value passed to the native start call as user-data.
    pub(crate) fn user_data(&self) -> *mut c_void {
        ptr::without_provenance_mut(self.token.get())
    }

    #[cfg(test)]
    pub(crate) fn token(&self) -> NonZeroUsize {
        self.token
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        handlers().remove(&self.token);
        log::trace!("revoked listener token {}", self.token);
    }
}

/// Draws the next token from `counter` that is non-zero and not live in `table`.
///
/// Only matters once the counter wraps (after 2^32 sessions on 32-bit
/// targets): zero is skipped and a token still in use is never handed out twice.
fn next_token(counter: &AtomicUsize, table: &Table) -> NonZeroUsize {
    loop {
        let raw = counter.fetch_add(1, Ordering::Relaxed);
        if let Some(token) = NonZeroUsize::new(raw).filter(|t| !table.contains_key(t)) {
            return token;
        }
    }
}

/// Registers `handler` under a new token.
pub(crate) fn register(handler: Arc<dyn KeyHandler>) -> Registration {
    let mut table = handlers();
    let token = next_token(&NEXT_TOKEN, &table);
    table.insert(token, handler);
    drop(table);
    log::trace!("registered listener token {token}");
    Registration { token }
}

/// Handler registered under `user_data`, if the session is still live.
pub(crate) fn lookup(user_data: *mut c_void) -> Option<Arc<dyn KeyHandler>> {
    let token = NonZeroUsize::new(user_data.addr())?;
    handlers().get(&token).cloned()
}

/// Entry point handed to the native monitor.
///
/// Runs on the library's monitoring thread. The table lock is released before
/// the handler runs, so a handler may stop its own listener. Panics are
/// caught here; unwinding into the C frame would abort the process.
pub(crate) extern "C" fn trampoline(
    codepoint: u32,
    key: u16,
    mods: u8,
    pressed: bool,
    user_data: *mut c_void,
) {
    let Some(handler) = lookup(user_data) else {
        log::trace!("dropping key event for a revoked listener session");
        return;
    };

    let event = KeyEvent::new(codepoint, Key(key), Modifier::from_bits(mods), pressed);
    log::trace!("key event {event:?}");

    if panic::catch_unwind(AssertUnwindSafe(|| handler.handle_key(event))).is_err() {
        log::error!("key handler panicked; event dropped");
    }
}
