//! Delete-many command handler.
//!
//! Selects the given records and removes them in a single store request.

use anyhow::Result;
use inovasi_core::{ControllerError, Outcome, RecordKey};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::{delete, privilege};
use crate::presentation::{RecordSummaryOpts, display_record_summary};
use crate::utils::input;

/// Execute the delete-many command.
///
/// # Errors
///
/// This function will return an error if:
/// - Any key is not in the working set (nothing is deleted)
/// - Sign-in fails or the store rejects the delete
pub async fn execute(ctx: &mut CliContext, keys: &[RecordKey], force: bool) -> Result<()> {
    select_keys(ctx, keys)?;

    let outcome = ctx.controller_mut().request_bulk_delete();
    let outcome = privilege::resolve(ctx, outcome, input::prompt_credentials).await?;
    if outcome != Outcome::AwaitingConfirmation {
        return Ok(());
    }

    let selected = ctx.controller().selection().keys();
    println!("{} records to delete:", selected.len());
    for key in &selected {
        if let Some(record) = ctx.controller().find(*key) {
            display_record_summary(record, RecordSummaryOpts::default());
        }
    }

    delete::confirm_and_delete(ctx, force, || {
        input::prompt_confirmation("Are you sure you want to delete these records?")
    })
    .await
}

/// Replace the selection with `keys`.
///
/// Every key must be in the working set; duplicates are ignored.
pub fn select_keys(ctx: &mut CliContext, keys: &[RecordKey]) -> Result<(), CliError> {
    if let Some(missing) = keys.iter().find(|key| ctx.controller().find(**key).is_none()) {
        return Err(ControllerError::UnknownRecord(*missing).into());
    }

    let controller = ctx.controller_mut();
    controller.clear_selection();
    for key in keys {
        if !controller.selection().contains(*key) {
            controller.toggle_selection(*key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use inovasi_core::{ControllerSettings, Credentials, NewRecord, StaticCredentialSession};
    use inovasi_store::{MemoryRecordStore, StoreCall};
    use std::sync::Arc;

    async fn context(store: Arc<MemoryRecordStore>) -> CliContext {
        let session = StaticCredentialSession::new(Some(Credentials::new("admin", "rahasia")));
        bootstrap_with(store, Arc::new(session.signed_in()), ControllerSettings::default())
            .await
            .unwrap()
    }

    fn seeded(count: RecordKey) -> Arc<MemoryRecordStore> {
        Arc::new(MemoryRecordStore::seeded(count, |key| {
            NewRecord::new(format!("Inovasi {key}"))
        }))
    }

    #[tokio::test]
    async fn test_select_keys_dedupes() {
        let mut ctx = context(seeded(5)).await;
        select_keys(&mut ctx, &[4, 2, 4]).unwrap();
        assert_eq!(ctx.controller().selection().keys(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_unknown_key_deletes_nothing() {
        let store = seeded(3);
        let mut ctx = context(store.clone()).await;

        let err = execute(&mut ctx, &[1, 9], true).await.unwrap_err();

        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 66);
        assert_eq!(store.calls().await, vec![StoreCall::FetchAll]);
    }

    #[tokio::test]
    async fn test_forced_bulk_delete_is_one_request() {
        let store = seeded(5);
        let mut ctx = context(store.clone()).await;

        execute(&mut ctx, &[1, 3, 5], true).await.unwrap();

        let keys: Vec<_> = ctx.controller().records().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![2, 4]);
        assert!(ctx.controller().selection().is_empty());
        assert_eq!(
            store.calls().await,
            vec![
                StoreCall::FetchAll,
                StoreCall::DeleteMany(vec![1, 3, 5]),
                StoreCall::FetchAll
            ]
        );
    }
}
