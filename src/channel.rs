//! Channel-based event receiving for non-blocking event processing.
//!
//! These functions start a [`Listener`] with a handler that forwards every
//! [`KeyEvent`] into a channel, so events can be consumed on any thread (or in
//! an async task) instead of inside a callback on the library's thread.
//!
//! The listener keeps ownership of the session: [`Listener::stop`] or
//! [`Listener::close`] ends delivery, after which the receiver drains what is
//! buffered and then reports the channel as disconnected.
//!
//! # Example (Sync)
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # fn main() -> axidev_io::Result<()> {
//! use axidev_io::Listener;
//! use axidev_io::channel::listen_channel;
//! use std::time::Duration;
//!
//! let listener = Listener::new()?;
//! let rx = listen_channel(&listener, 100)?;
//!
//! while let Ok(event) = rx.recv_timeout(Duration::from_secs(10)) {
//!     println!("{event:?}");
//! }
//! listener.stop();
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```
//!
//! # Example (Async with Tokio)
//!
//! ```ignore
//! use axidev_io::Listener;
//! use axidev_io::channel::listen_async_channel;
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = Listener::new().expect("Failed to create listener");
//!     let mut rx = listen_async_channel(&listener, 100).expect("Failed to start listener");
//!
//!     while let Some(event) = rx.recv().await {
//!         println!("{event:?}");
//!     }
//! }
//! ```

use crate::error::Result;
use crate::event::KeyEvent;
use crate::listener::{KeyHandler, Listener};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};

/// Handler that sends events to a bounded sync channel.
struct ChannelHandler {
    sender: SyncSender<KeyEvent>,
}

impl KeyHandler for ChannelHandler {
    fn handle_key(&self, event: KeyEvent) {
        // Never block the monitoring thread; drop the event if the consumer lags
        if self.sender.try_send(event).is_err() {
            log::trace!("channel full or closed, dropping {event:?}");
        }
    }
}

/// Handler that sends events to an unbounded sync channel.
struct UnboundedChannelHandler {
    sender: Sender<KeyEvent>,
}

impl KeyHandler for UnboundedChannelHandler {
    fn handle_key(&self, event: KeyEvent) {
        let _ = self.sender.send(event);
    }
}

/// Starts `listener` delivering into a bounded channel.
///
/// # Arguments
///
/// * `capacity` - Maximum number of events to buffer. If the buffer is full,
///   new events are dropped so the native monitor never waits on the consumer.
///
/// Fails like [`Listener::start`].
pub fn listen_channel(listener: &Listener, capacity: usize) -> Result<Receiver<KeyEvent>> {
    let (sender, receiver) = mpsc::sync_channel(capacity);
    listener.start(ChannelHandler { sender })?;
    Ok(receiver)
}

/// Starts `listener` delivering into an unbounded channel.
///
/// Use this if no event may be dropped, but watch memory usage if the consumer
/// is slow.
pub fn listen_unbounded_channel(listener: &Listener) -> Result<Receiver<KeyEvent>> {
    let (sender, receiver) = mpsc::channel();
    listener.start(UnboundedChannelHandler { sender })?;
    Ok(receiver)
}

#[cfg(feature = "tokio")]
pub use tokio_channel::*;

#[cfg(feature = "tokio")]
mod tokio_channel {
    use super::*;
    use crate::error::Error;
    use tokio::sync::mpsc as tokio_mpsc;

    /// Handler that sends events to a tokio async channel.
    struct TokioChannelHandler {
        sender: tokio_mpsc::Sender<KeyEvent>,
    }

    impl KeyHandler for TokioChannelHandler {
        fn handle_key(&self, event: KeyEvent) {
            // try_send: the monitoring thread is not inside a runtime
            if self.sender.try_send(event).is_err() {
                log::trace!("async channel full or closed, dropping {event:?}");
            }
        }
    }

    /// Starts `listener` delivering into a bounded tokio channel.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer; must be non-zero.
    ///   Events arriving while the buffer is full are dropped.
    ///
    /// A zero `capacity` is rejected with [`Error::InvalidArgument`] and
    /// leaves the listener untouched.
    pub fn listen_async_channel(
        listener: &Listener,
        capacity: usize,
    ) -> Result<tokio_mpsc::Receiver<KeyEvent>> {
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "async channel capacity must be non-zero".into(),
            ));
        }
        let (sender, receiver) = tokio_mpsc::channel(capacity);
        listener.start(TokioChannelHandler { sender })?;
        Ok(receiver)
    }
}
