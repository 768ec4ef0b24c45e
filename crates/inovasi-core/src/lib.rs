#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod export;
pub mod ports;
pub mod query;
pub mod selection;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{FilterOptions, MaturityLevel, NewRecord, Record, RecordKey, RecordPatch};
pub use ports::{
    Credentials, RecordStore, SessionError, SessionPort, StaticCredentialSession, StoreError,
};
pub use query::{
    FilterField, Filters, QueryParseError, QueryResult, RecordQuery, SortDirection, SortField,
    SortSpec,
};
pub use selection::SelectionSet;
pub use services::{
    ControllerError, DeleteTarget, EditorState, Mutation, Outcome, PendingOperation,
    RecordController, ReloadOutcome, ReloadTicket, ViewSnapshot,
};
pub use settings::{ControllerSettings, SettingsError, validate_settings};

#[cfg(test)]
use inovasi_store as _;
