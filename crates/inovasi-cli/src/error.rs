//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `ControllerError` to exit codes and user-facing messages.

use inovasi_core::ControllerError;
use inovasi_store::StoreConfigError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No record with the requested key.
    #[error("{0}")]
    NotFound(String),

    /// The store rejected the change.
    #[error("Rejected by the store: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// The credential check failed.
    #[error("{0}")]
    Unauthorized(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else reported by the controller.
    #[error("{0}")]
    Controller(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Controller(_) => 1,
            Self::Arguments(_) => 2,     // EX_USAGE
            Self::Rejected(_) => 65,     // EX_DATAERR
            Self::NotFound(_) => 66,     // EX_NOINPUT
            Self::Unavailable(_) => 69,  // EX_UNAVAILABLE
            Self::Io(_) => 74,           // EX_IOERR
            Self::Unauthorized(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,       // EX_CONFIG
        }
    }
}

impl From<ControllerError> for CliError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::StoreUnavailable(_) => Self::Unavailable(err.to_string()),
            ControllerError::ValidationRejected(msg) => Self::Rejected(msg),
            ControllerError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            ControllerError::UnknownRecord(key) => {
                Self::NotFound(format!("No record found with number {key}"))
            }
            ControllerError::Settings(settings_err) => Self::Arguments(settings_err.to_string()),
            ControllerError::NothingToConfirm => Self::Controller(err.to_string()),
        }
    }
}

impl From<StoreConfigError> for CliError {
    fn from(err: StoreConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
