//! Record controller - the tabular data controller behind the data
//! management screen.
//!
//! Owns the working set, the query state and the selection set, and
//! sequences mutations against the record store. Every successful mutation
//! is followed by a full reload; the cache is never patched in place.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::ControllerError;
use super::intent::{
    DeleteTarget, EditorState, Mutation, Outcome, PendingOperation, ReloadOutcome, ReloadTicket,
};
use super::view::ViewSnapshot;
use crate::domain::{FilterOptions, NewRecord, Record, RecordKey, RecordPatch};
use crate::export;
use crate::ports::{Credentials, RecordStore, SessionPort, StoreError};
use crate::query::{FilterField, QueryResult, RecordQuery, SortField, SortSpec};
use crate::selection::SelectionSet;
use crate::settings::{ControllerSettings, validate_rows_per_page, validate_settings};

/// Client-held view over the remote record collection.
///
/// One controller per view. It is driven through `&mut self`, so handlers
/// never interleave; overlapping fetches are still possible through
/// `begin_reload`/`finish_reload`, and only the latest one is applied.
pub struct RecordController {
    store: Arc<dyn RecordStore>,
    session: Arc<dyn SessionPort>,
    settings: ControllerSettings,
    records: Vec<Record>,
    query: RecordQuery,
    selection: SelectionSet,
    editor: EditorState,
    pending: Option<PendingOperation>,
    delete_target: Option<DeleteTarget>,
    loading: bool,
    error: Option<String>,
    latest_reload: u64,
}

impl RecordController {
    /// Create a controller with an empty working set.
    ///
    /// Call `reload` to populate it.
    pub fn new(
        store: Arc<dyn RecordStore>,
        session: Arc<dyn SessionPort>,
        settings: ControllerSettings,
    ) -> Result<Self, ControllerError> {
        validate_settings(&settings)?;
        let query = RecordQuery {
            rows_per_page: settings.rows_per_page,
            ..RecordQuery::default()
        };
        Ok(Self {
            store,
            session,
            settings,
            records: Vec::new(),
            query,
            selection: SelectionSet::new(),
            editor: EditorState::Closed,
            pending: None,
            delete_target: None,
            loading: false,
            error: None,
            latest_reload: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read side
    // ─────────────────────────────────────────────────────────────────────────

    /// The working set, ordered by key.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, key: RecordKey) -> Option<&Record> {
        self.records.iter().find(|record| record.key == key)
    }

    pub const fn query(&self) -> &RecordQuery {
        &self.query
    }

    /// Run the query pipeline over the working set.
    pub fn result(&self) -> QueryResult<'_> {
        self.query.run(&self.records)
    }

    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_all_visible_selected(&self) -> bool {
        self.selection
            .is_all_visible_selected(&self.result().visible_keys())
    }

    pub const fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Intent waiting for credentials, if any.
    pub const fn pending_operation(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Whether the credential prompt should be shown.
    pub const fn credentials_required(&self) -> bool {
        self.pending.is_some()
    }

    /// Delete waiting for confirmation, if any.
    pub const fn delete_target(&self) -> Option<&DeleteTarget> {
        self.delete_target.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last error message to show, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_privileged(&self) -> bool {
        self.session.is_privileged()
    }

    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Distinct categorical values in the working set.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Selected records as JSON, in working-set order.
    pub fn export_selected_json(&self) -> Result<String, serde_json::Error> {
        export::records_to_json(&export::selected_records(&self.records, &self.selection))
    }

    /// Owned snapshot of everything a view renders.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::capture(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query handlers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.query.search {
            return;
        }
        debug!(term = %term, "Search term changed");
        self.query.search = term;
        self.on_universe_changed();
    }

    /// Select a filter value; "all"/"semua" removes the constraint.
    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        if self.query.filters.set(field, value) {
            debug!(field = field.name(), value, "Filter changed");
            self.on_universe_changed();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.query.filters.is_empty() {
            self.query.filters.clear();
            self.on_universe_changed();
        }
    }

    /// Column-header click: same field flips direction, a new field sorts ascending.
    pub fn set_sort(&mut self, field: SortField) {
        self.query.sort = self.query.sort.clicked(field);
    }

    pub fn set_sort_spec(&mut self, sort: SortSpec) {
        self.query.sort = sort;
    }

    /// Go to a page, clamped into the valid range.
    pub fn set_page(&mut self, page: usize) {
        let total_pages = self.result().total_pages();
        self.query.page = page.clamp(1, total_pages);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), ControllerError> {
        validate_rows_per_page(rows_per_page)?;
        self.query.rows_per_page = rows_per_page;
        self.query.page = 1;
        Ok(())
    }

    pub fn toggle_selection(&mut self, key: RecordKey) {
        self.selection.toggle(key);
    }

    /// Toggle "select all" for the rows on the current page.
    pub fn toggle_select_all_visible(&mut self) {
        let visible = self.result().visible_keys();
        self.selection.toggle_all_visible(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn on_universe_changed(&mut self) {
        self.query.page = 1;
        if self.settings.clear_selection_on_query_change && !self.selection.is_empty() {
            debug!(cleared = self.selection.len(), "Selection cleared by query change");
            self.selection.clear();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reload
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a reload. Only the most recently issued ticket will be applied.
    pub const fn begin_reload(&mut self) -> ReloadTicket {
        self.latest_reload += 1;
        self.loading = true;
        ReloadTicket(self.latest_reload)
    }

    /// Complete a reload started with `begin_reload`.
    ///
    /// A response for anything but the latest ticket is discarded. On
    /// failure the working set keeps its last good value.
    pub fn finish_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<Vec<Record>, StoreError>,
    ) -> Result<ReloadOutcome, ControllerError> {
        if ticket.0 != self.latest_reload {
            warn!(
                ticket = ticket.0,
                latest = self.latest_reload,
                "Discarding stale reload response"
            );
            return Ok(ReloadOutcome::Stale);
        }
        self.loading = false;

        match result {
            Ok(mut records) => {
                records.sort_by_key(|record| record.key);
                let count = records.len();
                self.records = records;
                let records = &self.records;
                self.selection
                    .retain(|key| records.iter().any(|record| record.key == key));
                self.error = None;
                debug!(records = count, "Working set reloaded");
                Ok(ReloadOutcome::Applied { records: count })
            }
            Err(err) => {
                warn!(error = %err, "Failed to load records");
                self.error = Some(err.message().to_string());
                Err(err.into())
            }
        }
    }

    /// Discard the working set and fetch everything again.
    pub async fn reload(&mut self) -> Result<ReloadOutcome, ControllerError> {
        let ticket = self.begin_reload();
        let result = self.store.fetch_all().await;
        self.finish_reload(ticket, result)
    }

    /// Re-issue the fetch after a failure.
    pub async fn retry(&mut self) -> Result<ReloadOutcome, ControllerError> {
        self.reload().await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Intents
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the add editor.
    pub fn request_create(&mut self) -> Outcome {
        if !self.is_privileged() {
            return self.capture(PendingOperation::OpenCreate);
        }
        self.editor = EditorState::Creating;
        Outcome::EditorOpened
    }

    /// Open the edit editor for a record in the working set.
    pub fn request_edit(&mut self, key: RecordKey) -> Result<Outcome, ControllerError> {
        let record = self
            .find(key)
            .cloned()
            .ok_or(ControllerError::UnknownRecord(key))?;
        if !self.is_privileged() {
            return Ok(self.capture(PendingOperation::OpenEdit { key }));
        }
        self.editor = EditorState::Editing { record };
        Ok(Outcome::EditorOpened)
    }

    /// Ask to delete one record; the delete waits for `confirm_delete`.
    pub fn request_delete(&mut self, key: RecordKey) -> Result<Outcome, ControllerError> {
        if self.find(key).is_none() {
            return Err(ControllerError::UnknownRecord(key));
        }
        if !self.is_privileged() {
            return Ok(self.capture(PendingOperation::Delete { key }));
        }
        self.delete_target = Some(DeleteTarget::Single { key });
        Ok(Outcome::AwaitingConfirmation)
    }

    /// Ask to delete every selected record; the delete waits for `confirm_delete`.
    pub fn request_bulk_delete(&mut self) -> Outcome {
        if self.selection.is_empty() {
            return Outcome::Unchanged;
        }
        let keys = self.selection.keys();
        if !self.is_privileged() {
            return self.capture(PendingOperation::BulkDelete { keys });
        }
        self.delete_target = Some(DeleteTarget::Bulk { keys });
        Outcome::AwaitingConfirmation
    }

    /// Drop the pending operation, the delete awaiting confirmation and the editor.
    pub fn cancel_pending(&mut self) {
        if let Some(op) = self.pending.take() {
            debug!(operation = op.name(), "Pending operation cancelled");
        }
        self.delete_target = None;
        self.editor = EditorState::Closed;
    }

    /// Check credentials and replay the captured intent exactly once.
    ///
    /// On failure the pending operation is discarded.
    pub async fn submit_credentials(
        &mut self,
        credentials: &Credentials,
    ) -> Result<Outcome, ControllerError> {
        let pending = self.pending.take();

        if let Err(err) = self.session.sign_in(credentials) {
            warn!(
                username = %credentials.username,
                discarded = ?pending.as_ref().map(PendingOperation::name),
                "Sign-in failed"
            );
            self.error = Some(err.to_string());
            return Err(err.into());
        }
        info!(username = %credentials.username, "Signed in");
        self.error = None;

        match pending {
            Some(op) => {
                debug!(operation = op.name(), "Replaying pending operation");
                self.replay(op).await
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        info!("Signed out");
    }

    fn capture(&mut self, op: PendingOperation) -> Outcome {
        debug!(operation = op.name(), "Credentials required");
        if let Some(previous) = self.pending.replace(op) {
            debug!(operation = previous.name(), "Superseded pending operation");
        }
        Outcome::CredentialsRequired
    }

    async fn replay(&mut self, op: PendingOperation) -> Result<Outcome, ControllerError> {
        match op {
            PendingOperation::OpenCreate => Ok(self.request_create()),
            PendingOperation::OpenEdit { key } => self.request_edit(key),
            PendingOperation::Delete { key } => self.request_delete(key),
            PendingOperation::BulkDelete { keys } => {
                if keys.is_empty() {
                    return Ok(Outcome::Unchanged);
                }
                self.delete_target = Some(DeleteTarget::Bulk { keys });
                Ok(Outcome::AwaitingConfirmation)
            }
            PendingOperation::Create { record } => self.submit_create(record).await,
            PendingOperation::Update { key, patch } => self.submit_edit(key, patch).await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a completed record, then reload.
    pub async fn submit_create(&mut self, record: NewRecord) -> Result<Outcome, ControllerError> {
        if !self.is_privileged() {
            return Ok(self.capture(PendingOperation::Create { record }));
        }

        match self.store.insert(&record).await {
            Ok(created) => {
                info!(key = created.key, title = %created.title, "Record created");
                self.editor = EditorState::Closed;
                self.reload_after_commit().await;
                Ok(Outcome::Committed(Mutation::Created(created)))
            }
            Err(err) => Err(self.store_failure("create", err)),
        }
    }

    /// Apply a patch to a record, then reload.
    pub async fn submit_edit(
        &mut self,
        key: RecordKey,
        patch: RecordPatch,
    ) -> Result<Outcome, ControllerError> {
        if self.find(key).is_none() {
            return Err(ControllerError::UnknownRecord(key));
        }
        if !self.is_privileged() {
            return Ok(self.capture(PendingOperation::Update { key, patch }));
        }
        if patch.is_empty() {
            debug!(key, "Empty patch, nothing to update");
            self.editor = EditorState::Closed;
            return Ok(Outcome::Unchanged);
        }

        match self.store.update(key, &patch).await {
            Ok(()) => {
                info!(key, "Record updated");
                self.editor = EditorState::Closed;
                self.reload_after_commit().await;
                Ok(Outcome::Committed(Mutation::Updated(key)))
            }
            Err(err) => Err(self.store_failure("update", err)),
        }
    }

    /// Dispatch the delete awaiting confirmation, then reload.
    ///
    /// A bulk delete is a single store call over all selected keys.
    pub async fn confirm_delete(&mut self) -> Result<Outcome, ControllerError> {
        let target = self
            .delete_target
            .clone()
            .ok_or(ControllerError::NothingToConfirm)?;
        if !self.is_privileged() {
            let op = match target {
                DeleteTarget::Single { key } => PendingOperation::Delete { key },
                DeleteTarget::Bulk { keys } => PendingOperation::BulkDelete { keys },
            };
            self.delete_target = None;
            return Ok(self.capture(op));
        }

        let result = match &target {
            DeleteTarget::Single { key } => self.store.delete_one(*key).await,
            DeleteTarget::Bulk { keys } => self.store.delete_many(keys).await,
        };

        match result {
            Ok(()) => {
                self.delete_target = None;
                let keys = target.keys();
                match target {
                    DeleteTarget::Single { key } => {
                        self.selection.remove(key);
                    }
                    DeleteTarget::Bulk { .. } => self.selection.clear(),
                }
                info!(count = keys.len(), ?keys, "Records deleted");
                self.reload_after_commit().await;
                Ok(Outcome::Committed(Mutation::Deleted(keys)))
            }
            Err(err) => Err(self.store_failure("delete", err)),
        }
    }

    async fn reload_after_commit(&mut self) {
        if let Err(err) = self.reload().await {
            warn!(error = %err, "Reload after commit failed");
        }
    }

    fn store_failure(&mut self, operation: &'static str, err: StoreError) -> ControllerError {
        warn!(operation, error = %err, "Store rejected operation");
        self.error = Some(err.message().to_string());
        err.into()
    }
}
