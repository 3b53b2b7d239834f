//! Error types for the keyboard bindings.

use thiserror::Error;

/// Result type alias for axidev-io operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Sender`](crate::Sender), [`Listener`](crate::Listener)
/// and the marshalling helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The native factory returned a null handle.
    #[error("failed to create {0}")]
    Allocation(&'static str),

    /// A mutating operation was attempted after `close()`.
    #[error("{0} is closed")]
    Closed(&'static str),

    /// A required argument was missing or could not be passed to the native layer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A native call reported failure.
    ///
    /// `message` is the library's last-error string captured right after the
    /// call, or a fixed fallback when the library left it empty.
    #[error("{message}")]
    OperationFailed {
        /// Short name of the failed operation, e.g. `"key down"`.
        operation: &'static str,
        /// The captured error text.
        message: String,
    },
}

impl Error {
    /// Returns true for [`Error::Closed`].
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::Closed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::Allocation("keyboard sender").to_string(),
            "failed to create keyboard sender"
        );
        assert_eq!(Error::Closed("listener").to_string(), "listener is closed");
        assert_eq!(
            Error::OperationFailed {
                operation: "tap",
                message: "backend not ready".into(),
            }
            .to_string(),
            "backend not ready"
        );
    }

    #[test]
    fn test_is_closed() {
        assert!(Error::Closed("sender").is_closed());
        assert!(!Error::InvalidArgument("x".into()).is_closed());
    }
}
