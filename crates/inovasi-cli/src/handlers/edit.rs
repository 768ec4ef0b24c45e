//! Edit command handler.
//!
//! Applies `field=value` assignments to one record as a partial update.

use anyhow::Result;
use inovasi_core::{ControllerError, Mutation, Outcome, Record, RecordKey, RecordPatch};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::privilege;
use crate::presentation::or_placeholder;
use crate::utils::input;

/// Highest maturity score the editor accepts.
pub const MAX_MATURITY: f64 = 120.0;

/// Execute the edit command.
///
/// Each assignment names a field by its English name or its column name
/// (`title` or `judul_inovasi`). Only fields that actually change are sent.
///
/// # Errors
///
/// This function will return an error if:
/// - The record is not in the working set
/// - An assignment is malformed, names an unknown field or has a bad number
/// - Sign-in fails or the store rejects the update
pub async fn execute(ctx: &mut CliContext, key: RecordKey, assignments: &[String]) -> Result<()> {
    let current = ctx
        .controller()
        .find(key)
        .cloned()
        .ok_or_else(|| CliError::from(ControllerError::UnknownRecord(key)))?;

    let updated = apply_assignments(&current, assignments)?;
    let patch = RecordPatch::diff(&current, &updated);
    show_changes_preview(&current, &updated);

    let outcome = ctx
        .controller_mut()
        .submit_edit(key, patch)
        .await
        .map_err(CliError::from)?;
    let outcome = privilege::resolve(ctx, outcome, input::prompt_credentials).await?;

    match outcome {
        Outcome::Committed(Mutation::Updated(key)) => println!("Record {key} updated."),
        Outcome::Unchanged => println!("No changes to apply."),
        other => println!("Record was not updated ({other:?})."),
    }
    Ok(())
}

/// Parse assignments into `(field, value)` pairs.
pub fn parse_assignments(assignments: &[String]) -> Result<Vec<(String, String)>, CliError> {
    assignments
        .iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(field, value)| (field.trim().to_string(), value.to_string()))
                .ok_or_else(|| {
                    CliError::Arguments(format!("Invalid assignment '{arg}'. Use 'field=value'"))
                })
        })
        .collect()
}

/// Build the edited copy of `existing`.
pub fn apply_assignments(existing: &Record, assignments: &[String]) -> Result<Record, CliError> {
    let mut updated = existing.clone();
    for (field, value) in parse_assignments(assignments)? {
        set_field(&mut updated, &field, value)?;
    }
    Ok(updated)
}

fn set_field(record: &mut Record, field: &str, value: String) -> Result<(), CliError> {
    let field = field.to_lowercase().replace('-', "_");
    match field.as_str() {
        "title" | "judul_inovasi" => record.title = value,
        "region" | "pemda" => record.region = value,
        "admin_unit" | "admin_opd" => record.admin_unit = value,
        "initiator" | "inisiator" => record.initiator = value,
        "initiator_name" | "nama_inisiator" => record.initiator_name = value,
        "form" | "bentuk_inovasi" => record.form = value,
        "kind" | "jenis" => record.kind = value,
        "asta_cipta" => record.asta_cipta = value,
        "main_affair" | "urusan_utama" => record.main_affair = value,
        "related_affairs" | "urusan_lain_yang_beririsan" => record.related_affairs = value,
        "stage" | "tahapan_inovasi" => record.stage = value,
        "input_date" | "tanggal_input" => record.input_date = value,
        "applied_date" | "tanggal_penerapan" => record.applied_date = value,
        "development_date" | "tanggal_pengembangan" => record.development_date = value,
        "video" => record.video = value,
        "video_url" | "link_video" => record.video_url = value,
        "maturity_label" | "label_kematangan" => record.maturity_label = value,
        "maturity" | "kematangan" => {
            let score = parse_number(&field, &value)?;
            if !(0.0..=MAX_MATURITY).contains(&score) {
                return Err(CliError::Arguments(format!(
                    "Maturity must be between 0 and {MAX_MATURITY}, got {score}"
                )));
            }
            record.maturity = score;
        }
        "lat" => record.lat = parse_number(&field, &value)?,
        "lon" => record.lon = parse_number(&field, &value)?,
        "key" | "no" => {
            return Err(CliError::Arguments(
                "The record number can't be changed".to_string(),
            ));
        }
        _ => return Err(CliError::Arguments(format!("Unknown field '{field}'"))),
    }
    Ok(())
}

fn parse_number(field: &str, value: &str) -> Result<f64, CliError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::Arguments(format!("{field} must be a number, got '{value}'")))
}

/// Show a preview of the changes that will be applied.
fn show_changes_preview(existing: &Record, updated: &Record) {
    let patch = RecordPatch::diff(existing, updated);
    if patch.is_empty() {
        return;
    }
    println!("Changes for record {}:", existing.key);

    let text = |label: &str, old: &str, new: &str| {
        if old != new {
            println!("  {label}: {} -> {}", or_placeholder(old, "-"), or_placeholder(new, "-"));
        }
    };
    text("Title", &existing.title, &updated.title);
    text("Region", &existing.region, &updated.region);
    text("Admin unit", &existing.admin_unit, &updated.admin_unit);
    text("Initiator", &existing.initiator, &updated.initiator);
    text("Initiator name", &existing.initiator_name, &updated.initiator_name);
    text("Form", &existing.form, &updated.form);
    text("Kind", &existing.kind, &updated.kind);
    text("Asta Cipta", &existing.asta_cipta, &updated.asta_cipta);
    text("Main affair", &existing.main_affair, &updated.main_affair);
    text("Related affairs", &existing.related_affairs, &updated.related_affairs);
    text("Stage", &existing.stage, &updated.stage);
    text("Input date", &existing.input_date, &updated.input_date);
    text("Applied date", &existing.applied_date, &updated.applied_date);
    text("Development date", &existing.development_date, &updated.development_date);
    text("Video", &existing.video, &updated.video);
    text("Video URL", &existing.video_url, &updated.video_url);
    text("Maturity label", &existing.maturity_label, &updated.maturity_label);

    if patch.maturity.is_some() {
        println!("  Maturity: {} -> {}", existing.maturity, updated.maturity);
    }
    if patch.lat.is_some() || patch.lon.is_some() {
        println!(
            "  Coordinates: {}, {} -> {}, {}",
            existing.lat, existing.lon, updated.lat, updated.lon
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use inovasi_core::{ControllerSettings, NewRecord, StaticCredentialSession};
    use inovasi_store::{MemoryRecordStore, StoreCall};
    use std::sync::Arc;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn record() -> Record {
        NewRecord::new("Portal Data").into_record(3)
    }

    #[test]
    fn test_apply_assignments_accepts_column_names() {
        let updated = apply_assignments(
            &record(),
            &args(&["judul_inovasi=Portal Data Terpadu", "kematangan=80", "stage=Uji Coba"]),
        )
        .unwrap();

        assert_eq!(updated.title, "Portal Data Terpadu");
        assert!((updated.maturity - 80.0).abs() < f64::EPSILON);
        assert_eq!(updated.stage, "Uji Coba");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let updated =
            apply_assignments(&record(), &args(&["link-video=https://x.test/?v=1"])).unwrap();
        assert_eq!(updated.video_url, "https://x.test/?v=1");
    }

    #[test]
    fn test_rejects_bad_assignments() {
        let existing = record();
        assert!(apply_assignments(&existing, &args(&["title"])).is_err());
        assert!(apply_assignments(&existing, &args(&["colour=red"])).is_err());
        assert!(apply_assignments(&existing, &args(&["kematangan=tinggi"])).is_err());
        assert!(apply_assignments(&existing, &args(&["kematangan=121"])).is_err());
        assert!(apply_assignments(&existing, &args(&["no=9"])).is_err());
    }

    #[test]
    fn test_diff_only_carries_changed_fields() {
        let existing = record();
        let updated = apply_assignments(&existing, &args(&["title=Portal Data", "lat=-7.5"])).unwrap();
        let patch = RecordPatch::diff(&existing, &updated);

        assert!(patch.title.is_none());
        assert_eq!(patch.lat, Some(-7.5));
    }

    #[tokio::test]
    async fn test_execute_updates_record() {
        let store = Arc::new(MemoryRecordStore::seeded(3, |key| {
            NewRecord::new(format!("Inovasi {key}"))
        }));
        let session = Arc::new(StaticCredentialSession::new(None).signed_in());
        let mut ctx = bootstrap_with(store.clone(), session, ControllerSettings::default())
            .await
            .unwrap();

        execute(&mut ctx, 2, &args(&["kind=Digital"])).await.unwrap();

        assert_eq!(ctx.controller().find(2).unwrap().kind, "Digital");
        assert_eq!(
            store.calls().await,
            vec![StoreCall::FetchAll, StoreCall::Update(2), StoreCall::FetchAll]
        );
    }

    #[tokio::test]
    async fn test_execute_without_changes_skips_store() {
        let store = Arc::new(MemoryRecordStore::seeded(1, |key| {
            NewRecord::new(format!("Inovasi {key}"))
        }));
        let session = Arc::new(StaticCredentialSession::new(None).signed_in());
        let mut ctx = bootstrap_with(store.clone(), session, ControllerSettings::default())
            .await
            .unwrap();

        execute(&mut ctx, 1, &args(&["title=Inovasi 1"])).await.unwrap();
        assert_eq!(store.calls().await, vec![StoreCall::FetchAll]);
    }

    #[tokio::test]
    async fn test_execute_unknown_key() {
        let store = Arc::new(MemoryRecordStore::new());
        let session = Arc::new(StaticCredentialSession::new(None).signed_in());
        let mut ctx = bootstrap_with(store, session, ControllerSettings::default())
            .await
            .unwrap();

        let err = execute(&mut ctx, 4, &args(&["title=x"])).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 66);
    }
}
