//! Show command handler.

use anyhow::Result;
use inovasi_core::{ControllerError, RecordKey};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_record_detail;

/// Execute the show command.
///
/// Prints every field of one record, its maturity level and a map link.
///
/// # Errors
///
/// Returns `CliError::NotFound` if the key is not in the working set.
pub async fn execute(ctx: &CliContext, key: RecordKey) -> Result<()> {
    let record = ctx
        .controller()
        .find(key)
        .ok_or_else(|| CliError::from(ControllerError::UnknownRecord(key)))?;
    display_record_detail(record);
    Ok(())
}
