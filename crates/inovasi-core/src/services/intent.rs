//! Intents, prompts and outcomes exchanged between the controller and a view.

use serde::{Deserialize, Serialize};

use crate::domain::{NewRecord, Record, RecordKey, RecordPatch};

/// A mutating intent captured while unprivileged, replayed after sign-in.
///
/// At most one is held at a time; a newer intent replaces an older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingOperation {
    /// Open the add editor.
    OpenCreate,
    /// Open the edit editor for a record.
    OpenEdit { key: RecordKey },
    /// Ask to delete one record.
    Delete { key: RecordKey },
    /// Ask to delete the selected records.
    BulkDelete { keys: Vec<RecordKey> },
    /// Insert a completed record.
    Create { record: NewRecord },
    /// Apply a patch to a record.
    Update { key: RecordKey, patch: RecordPatch },
}

impl PendingOperation {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenCreate => "open_create",
            Self::OpenEdit { .. } => "open_edit",
            Self::Delete { .. } => "delete",
            Self::BulkDelete { .. } => "bulk_delete",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
        }
    }
}

/// Delete awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeleteTarget {
    Single { key: RecordKey },
    Bulk { keys: Vec<RecordKey> },
}

impl DeleteTarget {
    /// Keys the delete would remove.
    pub fn keys(&self) -> Vec<RecordKey> {
        match self {
            Self::Single { key } => vec![*key],
            Self::Bulk { keys } => keys.clone(),
        }
    }
}

/// Editor state driven by the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditorState {
    #[default]
    Closed,
    Creating,
    Editing { record: Record },
}

impl EditorState {
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// A mutation the store accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Created(Record),
    Updated(RecordKey),
    Deleted(Vec<RecordKey>),
}

/// What a controller handler did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The editor is open (see `RecordController::editor`).
    EditorOpened,
    /// A delete is waiting for `confirm_delete` or `cancel_pending`.
    AwaitingConfirmation,
    /// The intent was captured; submit credentials to continue.
    CredentialsRequired,
    /// The store accepted the mutation and the working set was reloaded.
    Committed(Mutation),
    /// Nothing to do.
    Unchanged,
}

/// Identifies one reload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReloadTicket(pub(crate) u64);

impl ReloadTicket {
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Result of completing a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The working set was replaced.
    Applied { records: usize },
    /// A newer reload had been issued; this response was discarded.
    Stale,
}
