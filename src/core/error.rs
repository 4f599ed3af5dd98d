//! Error types for the viewer host.

use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in viewer operations.
#[derive(Error, Debug)]
pub enum Error {
    // Registry errors
    #[error("Plugin '{0}' is already registered")]
    DuplicateName(String),

    #[error("No plugin registered under '{0}'")]
    UnknownPlugin(String),

    // Host errors
    #[error("Operation '{operation}' is not valid while the host is {state}")]
    InvalidState {
        /// The operation that was attempted
        operation: String,
        /// The host state at the time of the attempt
        state: String,
    },

    #[error("Host has been destroyed")]
    HostDestroyed,

    #[error("Activation of plugin '{0}' timed out")]
    ActivationTimeout(String),

    // Catalog errors
    #[error("Command catalog unavailable: {0}")]
    CatalogUnavailable(String),

    // Plugin errors
    #[error("Plugin failure: {0}")]
    Plugin(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an invalid-state error for an operation.
    pub fn invalid_state(operation: &str, state: impl std::fmt::Display) -> Self {
        Error::InvalidState {
            operation: operation.to_string(),
            state: state.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
