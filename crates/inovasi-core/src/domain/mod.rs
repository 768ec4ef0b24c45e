//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, storage, terminal).
//!
//! # Structure
//!
//! - `record` - Record types (`Record`, `NewRecord`, `RecordPatch`)
//! - `maturity` - Maturity banding of scores
//! - `options` - Distinct categorical values for filter controls

mod maturity;
mod options;
mod record;

pub use maturity::MaturityLevel;
pub use options::FilterOptions;
pub use record::{
    DEFAULT_COORDINATES, DEFAULT_MATURITY, DEFAULT_MATURITY_LABEL, DEFAULT_REGION, NewRecord,
    RELATED_AFFAIRS_SEPARATOR, Record, RecordKey, RecordPatch, VIDEO_ABSENT, VIDEO_PRESENT,
    join_related_affairs, split_related_affairs,
};
