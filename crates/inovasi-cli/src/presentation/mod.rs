//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Query and selection logic belongs in the core controller

pub mod record_display;
pub mod tables;

// Re-export commonly used items
pub use record_display::{
    RecordSummaryOpts, display_record_detail, display_record_summary, print_filter_options,
    print_table_header, print_table_row,
};
pub use tables::{format_score, or_placeholder, print_separator, truncate_string};
