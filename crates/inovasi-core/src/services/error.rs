//! Controller error type.

use thiserror::Error;

use crate::domain::RecordKey;
use crate::ports::{SessionError, StoreError};
use crate::settings::SettingsError;

/// Error returned by `RecordController` operations.
///
/// Store failures are already recorded on the controller as a displayable
/// message when this is returned; state is left as it was before the call.
/// Adapters should map this to their own error types (exit codes, HTTP
/// status codes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The store call itself failed (network, timeout, service error).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store rejected a write. The message is the store's, verbatim.
    #[error("{0}")]
    ValidationRejected(String),

    /// The credential check failed; the pending operation was discarded.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The key is not in the working set.
    #[error("Record not found: {0}")]
    UnknownRecord(RecordKey),

    /// `confirm_delete` was called with no delete awaiting confirmation.
    #[error("No delete is awaiting confirmation")]
    NothingToConfirm,

    /// Invalid controller settings.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<StoreError> for ControllerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            StoreError::Rejected(msg) => Self::ValidationRejected(msg),
        }
    }
}

impl From<SessionError> for ControllerError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => Self::InvalidCredentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_taxonomy() {
        assert_eq!(
            ControllerError::from(StoreError::Unavailable("timeout".into())),
            ControllerError::StoreUnavailable("timeout".into())
        );
        let rejected = ControllerError::from(StoreError::Rejected(
            "null value in column \"judul_inovasi\"".into(),
        ));
        assert_eq!(rejected.to_string(), "null value in column \"judul_inovasi\"");
    }
}
