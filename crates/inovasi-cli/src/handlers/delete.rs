//! Delete command handler.
//!
//! Removes one record after confirmation.

use anyhow::Result;
use inovasi_core::{ControllerError, Mutation, Outcome, RecordKey};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::privilege;
use crate::presentation::{RecordSummaryOpts, display_record_summary};
use crate::utils::input;

/// Execute the delete command.
///
/// Signs in first if needed, shows the record and asks for confirmation
/// unless `force` is set.
///
/// # Errors
///
/// This function will return an error if:
/// - The record is not in the working set
/// - Sign-in fails or the store rejects the delete
pub async fn execute(ctx: &mut CliContext, key: RecordKey, force: bool) -> Result<()> {
    let outcome = ctx
        .controller_mut()
        .request_delete(key)
        .map_err(CliError::from)?;
    let outcome = privilege::resolve(ctx, outcome, input::prompt_credentials).await?;
    if outcome != Outcome::AwaitingConfirmation {
        return Ok(());
    }

    let record = ctx
        .controller()
        .find(key)
        .cloned()
        .ok_or_else(|| CliError::from(ControllerError::UnknownRecord(key)))?;
    display_record_summary(&record, RecordSummaryOpts::for_removal());

    confirm_and_delete(ctx, force, || {
        input::prompt_confirmation("Are you sure you want to delete this record?")
    })
    .await
}

/// Dispatch the delete awaiting confirmation, or cancel it if declined.
///
/// `confirm` is not called when `force` is set.
pub async fn confirm_and_delete<F>(ctx: &mut CliContext, force: bool, confirm: F) -> Result<()>
where
    F: FnOnce() -> Result<bool>,
{
    if !force && !confirm()? {
        ctx.controller_mut().cancel_pending();
        println!("Deletion cancelled.");
        return Ok(());
    }

    let outcome = ctx
        .controller_mut()
        .confirm_delete()
        .await
        .map_err(CliError::from)?;
    match outcome {
        Outcome::Committed(Mutation::Deleted(keys)) if keys.len() == 1 => {
            println!("Record {} deleted.", keys[0]);
        }
        Outcome::Committed(Mutation::Deleted(keys)) => {
            println!("{} records deleted.", keys.len());
        }
        other => println!("Nothing was deleted ({other:?})."),
    }
    Ok(())
}
