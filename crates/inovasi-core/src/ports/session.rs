//! Session/privilege trait for gating mutating operations.
//!
//! The controller only needs a capability check and a way to attempt
//! sign-in. Where the privilege flag lives is up to the implementation.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Username/password pair submitted at the credential prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Errors from a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Privilege gate consulted before any mutation.
pub trait SessionPort: Send + Sync {
    /// Whether mutating operations are currently allowed.
    fn is_privileged(&self) -> bool;

    /// Check credentials and, on success, grant privilege.
    fn sign_in(&self, credentials: &Credentials) -> Result<(), SessionError>;

    /// Drop privilege.
    fn sign_out(&self);
}

/// Session checked against a single configured credential pair.
///
/// This is a plain comparison, not a security boundary.
pub struct StaticCredentialSession {
    expected: Option<Credentials>,
    privileged: AtomicBool,
}

impl StaticCredentialSession {
    /// Create a signed-out session accepting `expected`.
    ///
    /// With `None`, every sign-in attempt fails.
    pub const fn new(expected: Option<Credentials>) -> Self {
        Self {
            expected,
            privileged: AtomicBool::new(false),
        }
    }

    /// Create a session that starts out privileged.
    #[must_use]
    pub fn signed_in(self) -> Self {
        self.privileged.store(true, Ordering::SeqCst);
        self
    }
}

impl SessionPort for StaticCredentialSession {
    fn is_privileged(&self) -> bool {
        self.privileged.load(Ordering::SeqCst)
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<(), SessionError> {
        match &self.expected {
            Some(expected) if expected == credentials => {
                self.privileged.store(true, Ordering::SeqCst);
                Ok(())
            }
            _ => Err(SessionError::InvalidCredentials),
        }
    }

    fn sign_out(&self) {
        self.privileged.store(false, Ordering::SeqCst);
    }
}
