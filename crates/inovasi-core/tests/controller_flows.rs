//! End-to-end controller flows against the in-memory record store.

use std::sync::Arc;

use inovasi_core::{
    ControllerError, ControllerSettings, Credentials, DeleteTarget, FilterField, Mutation,
    NewRecord, Outcome, RecordController, RecordPatch, SortField, StaticCredentialSession,
    StoreError,
};
use inovasi_store::{MemoryRecordStore, StoreCall};

fn admin() -> Credentials {
    Credentials::new("admin", "brida2024")
}

fn sample(key: i64) -> NewRecord {
    let (title, unit, kind, stage) = match key % 3 {
        0 => ("Sistem Informasi Desa", "Dinas PMD", "Digital", "Penerapan"),
        1 => ("Layanan Posyandu Keliling", "Dinas Kesehatan", "Non Digital", "Uji Coba"),
        _ => ("Irigasi Tetes Pintar", "Dinas Pertanian", "Teknologi", "Inisiatif"),
    };
    NewRecord {
        title: format!("{title} {key}"),
        admin_unit: unit.to_string(),
        kind: kind.to_string(),
        stage: stage.to_string(),
        maturity: f64::from(u8::try_from(key).unwrap_or(0)) * 4.0,
        ..NewRecord::default()
    }
}

async fn setup(count: i64) -> (Arc<MemoryRecordStore>, RecordController) {
    let store = Arc::new(MemoryRecordStore::seeded(count, sample));
    let session = Arc::new(StaticCredentialSession::new(Some(admin())));
    let mut controller =
        RecordController::new(store.clone(), session, ControllerSettings::default()).unwrap();
    controller.reload().await.unwrap();
    (store, controller)
}

#[tokio::test]
async fn browse_search_filter_and_page() {
    let (_store, mut controller) = setup(25).await;

    controller.set_sort(SortField::Key);
    let result = controller.result();
    assert_eq!(result.total_pages(), 3);
    assert_eq!(result.visible_keys(), (1..=10).collect::<Vec<_>>());

    controller.set_page(3);
    assert_eq!(controller.result().visible_keys(), (21..=25).collect::<Vec<_>>());

    controller.set_search_term("kesehatan");
    let result = controller.result();
    assert_eq!(controller.query().page, 1);
    assert!(result.matched().iter().all(|r| r.admin_unit == "Dinas Kesehatan"));
    assert_eq!(result.filtered_count(), 9);
    assert_eq!(result.total_records(), 25);

    controller.set_search_term("");
    controller.set_filter(FilterField::Kind, "Teknologi");
    controller.set_filter(FilterField::Stage, "Inisiatif");
    assert_eq!(controller.result().filtered_count(), 8);

    controller.set_filter(FilterField::Kind, "Semua");
    controller.set_filter(FilterField::Stage, "all");
    assert_eq!(controller.result().filtered_count(), 25);
}

#[tokio::test]
async fn unprivileged_edit_then_sign_in_commits_once() {
    let (store, mut controller) = setup(5).await;

    let patch = RecordPatch {
        maturity: Some(100.0),
        maturity_label: Some("Sangat Matang".to_string()),
        ..Default::default()
    };
    assert_eq!(
        controller.submit_edit(4, patch).await.unwrap(),
        Outcome::CredentialsRequired
    );

    let outcome = controller.submit_credentials(&admin()).await.unwrap();
    assert_eq!(outcome, Outcome::Committed(Mutation::Updated(4)));

    let updated = controller.find(4).unwrap();
    assert!((updated.maturity - 100.0).abs() < f64::EPSILON);
    assert_eq!(updated.maturity_label, "Sangat Matang");
    assert_eq!(
        store.calls().await,
        vec![StoreCall::FetchAll, StoreCall::Update(4), StoreCall::FetchAll]
    );
}

#[tokio::test]
async fn bulk_delete_after_sign_in_requires_confirmation() {
    let (store, mut controller) = setup(6).await;
    controller.toggle_selection(2);
    controller.toggle_selection(5);

    assert_eq!(controller.request_bulk_delete(), Outcome::CredentialsRequired);
    assert_eq!(
        controller.submit_credentials(&admin()).await.unwrap(),
        Outcome::AwaitingConfirmation
    );
    assert_eq!(
        controller.delete_target(),
        Some(&DeleteTarget::Bulk { keys: vec![2, 5] })
    );

    controller.confirm_delete().await.unwrap();

    assert!(controller.selection().is_empty());
    let keys: Vec<_> = controller.records().iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![1, 3, 4, 6]);
    assert_eq!(
        store.calls().await,
        vec![
            StoreCall::FetchAll,
            StoreCall::DeleteMany(vec![2, 5]),
            StoreCall::FetchAll
        ]
    );
}

#[tokio::test]
async fn store_outage_then_retry() {
    let (store, mut controller) = setup(3).await;
    controller.submit_credentials(&admin()).await.unwrap();

    store
        .fail_next(StoreError::Unavailable("HTTP 503: upstream down".to_string()))
        .await;
    let err = controller
        .submit_create(NewRecord::new("Portal Beasiswa"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ControllerError::StoreUnavailable("HTTP 503: upstream down".to_string())
    );
    assert_eq!(controller.records().len(), 3);
    assert_eq!(controller.error(), Some("HTTP 503: upstream down"));

    controller.retry().await.unwrap();
    assert!(controller.error().is_none());

    let outcome = controller
        .submit_create(NewRecord::new("Portal Beasiswa"))
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Committed(Mutation::Created(ref r)) if r.key == 4));
    assert_eq!(controller.records().len(), 4);
}

#[tokio::test]
async fn filter_options_follow_working_set() {
    let (_store, mut controller) = setup(6).await;
    controller.submit_credentials(&admin()).await.unwrap();

    let options = controller.filter_options();
    assert_eq!(options.kinds, vec!["Digital", "Non Digital", "Teknologi"]);

    for key in [2, 5] {
        controller.request_delete(key).unwrap();
        controller.confirm_delete().await.unwrap();
    }
    assert_eq!(controller.filter_options().kinds, vec!["Digital", "Non Digital"]);
}
