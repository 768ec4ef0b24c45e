//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - Store traits are minimal and CRUD-focused
//! - The session port exposes a capability check, not storage

pub mod record_store;
pub mod session;

use thiserror::Error;

pub use record_store::RecordStore;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use session::{Credentials, SessionError, SessionPort, StaticCredentialSession};

/// Domain-specific errors for record store operations.
///
/// This error type abstracts away transport details (HTTP status codes,
/// connection errors) so the controller can decide how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The call itself failed (network, timeout, service error).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the write because of a constraint it enforces.
    #[error("{0}")]
    Rejected(String),
}

impl StoreError {
    /// Message suitable for showing to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Unavailable(msg) | Self::Rejected(msg) => msg,
        }
    }
}
