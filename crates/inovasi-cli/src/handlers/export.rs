//! Export command handler.

use std::path::Path;

use anyhow::{Context, Result};
use inovasi_core::RecordKey;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::delete_many::select_keys;

/// Execute the export command.
///
/// Writes the given records as a JSON array using the table's column
/// names, to `output` or stdout.
///
/// # Errors
///
/// This function will return an error if any key is unknown or the output
/// file can't be written.
pub async fn execute(ctx: &mut CliContext, keys: &[RecordKey], output: Option<&Path>) -> Result<()> {
    select_keys(ctx, keys)?;
    let json = ctx
        .controller()
        .export_selected_json()
        .context("Failed to serialize records")?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .map_err(CliError::from)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} records to {}",
                ctx.controller().selection().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use inovasi_core::{ControllerSettings, NewRecord, Record, StaticCredentialSession};
    use inovasi_store::MemoryRecordStore;
    use std::sync::Arc;
    use tempfile::tempdir;

    async fn context() -> CliContext {
        let store = Arc::new(MemoryRecordStore::seeded(4, |key| {
            NewRecord::new(format!("Inovasi {key}"))
        }));
        let session = Arc::new(StaticCredentialSession::new(None));
        bootstrap_with(store, session, ControllerSettings::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_export_to_file_needs_no_privilege() {
        let mut ctx = context().await;
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");

        execute(&mut ctx, &[3, 1], Some(&path)).await.unwrap();

        let written: Vec<Record> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.iter().map(|r| r.key).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_export_unknown_key() {
        let mut ctx = context().await;
        let err = execute(&mut ctx, &[8], None).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 66);
    }

    #[tokio::test]
    async fn test_export_to_missing_directory_is_io_error() {
        let mut ctx = context().await;
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("export.json");

        let err = execute(&mut ctx, &[1], Some(&path)).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 74);
    }
}
