//! Custom error types for nvim-remote
//!
//! Every internal layer returns [`Result`]. The accessor facade is the only
//! place errors are flattened into a logged warning and a `false` return.

use thiserror::Error;

/// Main error type for remote editor operations
#[derive(Error, Debug)]
pub enum NvimRemoteError {
    /// No server address is known, usually because Neovim has not
    /// registered itself yet
    #[error("no remote server configured")]
    NoServer,

    /// Invalid input detected before anything is spawned
    #[error("Validation error: {0}")]
    Validation(String),

    /// The editor executable could not be started; `command` is the full
    /// command line so it can be rerun by hand
    #[error("Failed to launch '{command}': {message}")]
    Launch { command: String, message: String },

    /// The remote client ran but reported failure
    #[error("nvim failed: '{command}' code={code} stdout={stdout} stderr={stderr}")]
    RemoteExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors with a message
    #[error("{0}")]
    General(String),
}

impl NvimRemoteError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a launch error
    pub fn launch(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Launch {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<NvimRemoteError> for String {
    fn from(err: NvimRemoteError) -> Self {
        err.to_string()
    }
}

impl From<String> for NvimRemoteError {
    fn from(s: String) -> Self {
        Self::General(s)
    }
}

impl From<&str> for NvimRemoteError {
    fn from(s: &str) -> Self {
        Self::General(s.to_string())
    }
}

/// Result type alias using NvimRemoteError
pub type Result<T> = std::result::Result<T, NvimRemoteError>;
