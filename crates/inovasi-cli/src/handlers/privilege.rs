//! Sign-in handling for mutating commands.

use anyhow::Result;
use inovasi_core::{Credentials, Outcome};
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Sign in and replay the captured intent when the controller asks for credentials.
///
/// Any other outcome is returned unchanged. A failed sign-in is an
/// `Unauthorized` error; the controller has already dropped the intent.
pub async fn resolve<F>(ctx: &mut CliContext, outcome: Outcome, prompt: F) -> Result<Outcome>
where
    F: FnOnce() -> Result<Credentials>,
{
    if outcome != Outcome::CredentialsRequired {
        return Ok(outcome);
    }

    let credentials = prompt()?;
    debug!(username = %credentials.username, "Submitting credentials");
    let outcome = ctx
        .controller_mut()
        .submit_credentials(&credentials)
        .await
        .map_err(CliError::from)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use inovasi_core::{ControllerSettings, NewRecord, StaticCredentialSession};
    use inovasi_store::MemoryRecordStore;
    use std::sync::Arc;

    async fn context() -> CliContext {
        let store = Arc::new(MemoryRecordStore::seeded(2, |key| {
            NewRecord::new(format!("Inovasi {key}"))
        }));
        let session = Arc::new(StaticCredentialSession::new(Some(Credentials::new(
            "admin", "rahasia",
        ))));
        bootstrap_with(store, session, ControllerSettings::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_other_outcomes_pass_through() {
        let mut ctx = context().await;
        let outcome = resolve(&mut ctx, Outcome::Unchanged, || {
            panic!("prompt should not be shown")
        })
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[tokio::test]
    async fn test_sign_in_replays_intent() {
        let mut ctx = context().await;
        let outcome = ctx.controller_mut().request_delete(2).unwrap();

        let outcome = resolve(&mut ctx, outcome, || Ok(Credentials::new("admin", "rahasia")))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::AwaitingConfirmation);
        assert!(ctx.controller().is_privileged());
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let mut ctx = context().await;
        let outcome = ctx.controller_mut().request_delete(2).unwrap();

        let err = resolve(&mut ctx, outcome, || Ok(Credentials::new("admin", "salah")))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 77);
        assert!(ctx.controller().pending_operation().is_none());
    }
}
