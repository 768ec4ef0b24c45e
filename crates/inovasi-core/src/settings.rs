//! Controller settings and validation.
//!
//! These are pure domain types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_ROWS_PER_PAGE;

/// Page sizes offered by the rows-per-page selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Largest page size accepted.
pub const MAX_ROWS_PER_PAGE: usize = 500;

/// Settings for a `RecordController`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Rows per page when the view first opens.
    pub rows_per_page: usize,

    /// Choices offered by the rows-per-page selector.
    pub page_size_options: Vec<usize>,

    /// Clear the selection when the search term or a filter changes.
    pub clear_selection_on_query_change: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            clear_selection_on_query_change: true,
        }
    }
}

impl ControllerSettings {
    #[must_use]
    pub const fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Rows per page must be between 1 and 500, got {0}")]
    InvalidRowsPerPage(usize),

    #[error("Page size options cannot be empty")]
    EmptyPageSizeOptions,
}

/// Validate a single page size.
pub const fn validate_rows_per_page(rows_per_page: usize) -> Result<(), SettingsError> {
    if rows_per_page == 0 || rows_per_page > MAX_ROWS_PER_PAGE {
        Err(SettingsError::InvalidRowsPerPage(rows_per_page))
    } else {
        Ok(())
    }
}

/// Validate controller settings.
pub fn validate_settings(settings: &ControllerSettings) -> Result<(), SettingsError> {
    validate_rows_per_page(settings.rows_per_page)?;
    if settings.page_size_options.is_empty() {
        return Err(SettingsError::EmptyPageSizeOptions);
    }
    for option in &settings.page_size_options {
        validate_rows_per_page(*option)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ControllerSettings::default();
        assert_eq!(settings.rows_per_page, 10);
        assert!(settings.clear_selection_on_query_change);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let settings = ControllerSettings::default().with_rows_per_page(0);
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::InvalidRowsPerPage(0))
        );
    }

    #[test]
    fn test_empty_options_rejected() {
        let settings = ControllerSettings {
            page_size_options: vec![],
            ..Default::default()
        };
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::EmptyPageSizeOptions)
        );
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let settings: ControllerSettings = serde_json::from_str(r#"{"rows_per_page": 25}"#).unwrap();
        assert_eq!(settings.rows_per_page, 25);
        assert_eq!(settings.page_size_options, vec![10, 25, 50, 100]);
    }
}
