//! Add command handler.
//!
//! Creates a record from a JSON file using the table's column names.

use std::path::Path;

use anyhow::{Context, Result};
use inovasi_core::{Mutation, NewRecord, Outcome};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::edit::MAX_MATURITY;
use crate::handlers::privilege;
use crate::presentation::{RecordSummaryOpts, display_record_summary};
use crate::utils::input;

/// Execute the add command.
///
/// Reads a `NewRecord` from `path`; fields the file leaves out take the
/// add-form defaults (region, maturity 50, today's date, no video).
///
/// # Errors
///
/// This function will return an error if:
/// - The file can't be read or isn't a JSON object
/// - The title is blank
/// - Sign-in fails or the store rejects the record
pub async fn execute(ctx: &mut CliContext, path: &Path) -> Result<()> {
    let record = read_new_record(path)?;

    let outcome = ctx
        .controller_mut()
        .submit_create(record)
        .await
        .map_err(CliError::from)?;
    let outcome = privilege::resolve(ctx, outcome, input::prompt_credentials).await?;

    match outcome {
        Outcome::Committed(Mutation::Created(created)) => {
            display_record_summary(&created, RecordSummaryOpts::with_title("Record created:"));
        }
        other => println!("Nothing was created ({other:?})."),
    }
    Ok(())
}

/// Read and validate a `NewRecord` from a JSON file.
pub fn read_new_record(path: &Path) -> Result<NewRecord> {
    let contents = std::fs::read_to_string(path)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let record: NewRecord = serde_json::from_str(&contents)
        .map_err(|e| CliError::Arguments(format!("{}: {e}", path.display())))?;

    if record.title.trim().is_empty() {
        return Err(CliError::Arguments("judul_inovasi must not be empty".to_string()).into());
    }
    if !(0.0..=MAX_MATURITY).contains(&record.maturity) {
        return Err(CliError::Arguments(format!(
            "kematangan must be between 0 and {MAX_MATURITY}, got {}",
            record.maturity
        ))
        .into());
    }
    Ok(record)
}
