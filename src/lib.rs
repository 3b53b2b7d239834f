//! # axidev-io
//!
//! Rust bindings for the `axidev_io` native keyboard library: inject key
//! presses and text, and monitor global key events.
//!
//! ## Features
//!
//! - [`Sender`] injects keys, modifier holds, combos and layout-independent text
//! - [`Listener`] delivers every global key press and release to a handler
//! - Channel adapters ([`channel`]) for consuming events off the callback thread
//! - Native failures surface as typed [`Error`]s carrying the library's message
//! - Thread-safe handles: every method takes `&self`
//!
//! ## Cargo features
//!
//! - `native`: link `libaxidev_io` and enable [`Sender::new`], [`Listener::new`]
//!   and the process-wide accessors. Without it, build instances from a
//!   [`NativeApi`] table with `with_api`.
//! - `tokio`: [`channel::listen_async_channel`]
//! - `serde`: `Serialize`/`Deserialize` for the value types
//!
//! ## Quick Start
//!
//! ### Injecting Keys
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> axidev_io::Result<()> {
//! use axidev_io::{Key, Modifier, Sender};
//!
//! let sender = Sender::new()?;
//! if !sender.is_ready() {
//!     sender.request_permissions();
//! }
//! sender.type_text("Hello from Rust!")?;
//! sender.combo(Modifier::CTRL, Key::from_name("A"))?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```
//!
//! ### Listening for Events
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> axidev_io::Result<()> {
//! use axidev_io::{KeyEvent, Listener};
//!
//! let listener = Listener::new()?;
//! listener.start(|event: KeyEvent| {
//!     let state = if event.is_press() { "down" } else { "up" };
//!     println!("{} {state} [{}]", event.key_name(), event.modifiers);
//! })?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```
//!
//! ## Architecture
//!
//! The library reports failure as `false` and keeps the reason in one
//! process-wide last-error slot. Every fallible method reads that slot right
//! after the failing call and returns it inside [`Error::OperationFailed`], so
//! callers never touch it themselves.
//!
//! Listener callbacks carry an integer token instead of a pointer into Rust
//! memory (see the `registry` module). A callback that races `stop` finds its
//! token revoked and returns without running the handler.

pub mod capabilities;
pub mod channel;
pub mod error;
pub mod event;
pub mod keycode;
pub mod listener;
pub mod logging;
pub mod modifier;
pub mod native;
pub mod sender;

mod marshal;
mod registry;

// Re-exports
pub use capabilities::Capabilities;
pub use error::{Error, Result};
pub use event::KeyEvent;
pub use keycode::Key;
pub use listener::{KeyHandler, Listener};
pub use logging::LogLevel;
pub use modifier::Modifier;
pub use native::NativeApi;
#[cfg(feature = "native")]
pub use native::{
    clear_last_error, is_log_enabled, last_error, library_version, log_level, set_log_level,
};
pub use sender::Sender;
