//! Core services - the application's business logic layer.
//!
//! The record controller orchestrates between the record store and session
//! ports and the pure query/selection logic. It knows nothing about
//! concrete adapters.

mod error;
mod intent;
mod record_controller;
mod view;

pub use error::ControllerError;
pub use intent::{
    DeleteTarget, EditorState, Mutation, Outcome, PendingOperation, ReloadOutcome, ReloadTicket,
};
pub use record_controller::RecordController;
pub use view::ViewSnapshot;
