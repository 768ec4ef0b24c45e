//! Owned snapshot of controller state for rendering.

use serde::Serialize;

use super::intent::{DeleteTarget, EditorState};
use super::record_controller::RecordController;
use crate::domain::{Record, RecordKey};
use crate::query::{Filters, SortSpec};

/// Everything a view needs to draw the table and its dialogs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub rows: Vec<Record>,
    pub search: String,
    pub filters: Filters,
    pub sort: SortSpec,
    pub page: usize,
    pub total_pages: usize,
    pub rows_per_page: usize,
    pub page_size_options: Vec<usize>,
    pub filtered_count: usize,
    pub total_records: usize,
    /// 1-based row number of the first visible row (0 when empty).
    pub first_row: usize,
    pub last_row: usize,
    pub selected: Vec<RecordKey>,
    pub all_visible_selected: bool,
    pub editor: EditorState,
    pub delete_target: Option<DeleteTarget>,
    pub credentials_required: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub privileged: bool,
}

impl ViewSnapshot {
    pub(crate) fn capture(controller: &RecordController) -> Self {
        let result = controller.result();
        let visible = result.visible_keys();
        let query = controller.query();

        Self {
            rows: result.page_rows().iter().map(|&r| r.clone()).collect(),
            search: query.search.clone(),
            filters: query.filters.clone(),
            sort: query.sort,
            page: result.page(),
            total_pages: result.total_pages(),
            rows_per_page: result.rows_per_page(),
            page_size_options: controller.settings().page_size_options.clone(),
            filtered_count: result.filtered_count(),
            total_records: result.total_records(),
            first_row: result.first_row_number(),
            last_row: result.last_row_number(),
            selected: controller.selection().keys(),
            all_visible_selected: controller.selection().is_all_visible_selected(&visible),
            editor: controller.editor().clone(),
            delete_target: controller.delete_target().cloned(),
            credentials_required: controller.credentials_required(),
            loading: controller.is_loading(),
            error: controller.error().map(str::to_string),
            privileged: controller.is_privileged(),
        }
    }
}
