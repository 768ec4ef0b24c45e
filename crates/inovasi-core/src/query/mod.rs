//! Query pipeline: search, filter, sort and paginate the working set.
//!
//! The pipeline is a pure function of the working set and a `RecordQuery`.
//! It re-runs from scratch on every change; the working set holds hundreds
//! of rows, so nothing is memoised.

mod filter;
mod sort;

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

use crate::domain::{Record, RecordKey};

pub use filter::{FilterField, Filters, UNCONSTRAINED_VALUES, is_unconstrained, matches_search};
pub use sort::{SortDirection, SortField, SortSpec};

/// Default number of rows shown per page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Errors parsing query parameters from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("Unknown filter field: {0}")]
    UnknownFilterField(String),
}

/// Everything the view controls about which rows are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Free-text search term.
    pub search: String,
    /// Categorical filter selections.
    pub filters: Filters,
    /// Active sort.
    pub sort: SortSpec,
    /// Requested page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub rows_per_page: usize,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Filters::new(),
            sort: SortSpec::default(),
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl RecordQuery {
    /// Run the pipeline over `records`.
    pub fn run<'a>(&self, records: &'a [Record]) -> QueryResult<'a> {
        let needle = self.search.to_lowercase();
        let mut matched: Vec<&Record> = records
            .iter()
            .filter(|record| matches_search(record, &needle) && self.filters.matches(record))
            .collect();
        self.sort.sort(&mut matched);

        let rows_per_page = self.rows_per_page.max(1);
        let total_pages = total_pages(matched.len(), rows_per_page);
        let page = self.page.clamp(1, total_pages);
        let page_range = page_range(matched.len(), page, rows_per_page);

        QueryResult {
            matched,
            page,
            rows_per_page,
            total_pages,
            total_records: records.len(),
            page_range,
        }
    }
}

/// Number of pages needed for `count` rows. Never less than one.
pub const fn total_pages(count: usize, rows_per_page: usize) -> usize {
    let rows_per_page = if rows_per_page == 0 { 1 } else { rows_per_page };
    let pages = count.div_ceil(rows_per_page);
    if pages == 0 { 1 } else { pages }
}

fn page_range(count: usize, page: usize, rows_per_page: usize) -> Range<usize> {
    let start = ((page - 1) * rows_per_page).min(count);
    let end = (start + rows_per_page).min(count);
    start..end
}

/// Output of the query pipeline.
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    matched: Vec<&'a Record>,
    page: usize,
    rows_per_page: usize,
    total_pages: usize,
    total_records: usize,
    page_range: Range<usize>,
}

impl<'a> QueryResult<'a> {
    /// Full filtered-and-sorted sequence.
    pub fn matched(&self) -> &[&'a Record] {
        &self.matched
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[&'a Record] {
        &self.matched[self.page_range.clone()]
    }

    /// Keys of the rows on the current page, in display order.
    pub fn visible_keys(&self) -> Vec<RecordKey> {
        self.page_rows().iter().map(|record| record.key).collect()
    }

    /// Current page after clamping, 1-based.
    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of rows that passed search and filters.
    pub fn filtered_count(&self) -> usize {
        self.matched.len()
    }

    /// Number of rows in the working set.
    pub const fn total_records(&self) -> usize {
        self.total_records
    }

    /// 1-based index of the first row on the page, 0 when empty.
    pub fn first_row_number(&self) -> usize {
        if self.page_range.is_empty() {
            0
        } else {
            self.page_range.start + 1
        }
    }

    /// 1-based index of the last row on the page.
    pub const fn last_row_number(&self) -> usize {
        self.page_range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRecord;

    fn numbered(count: i64) -> Vec<Record> {
        (1..=count)
            .map(|key| NewRecord::new(format!("Inovasi {key:03}")).into_record(key))
            .collect()
    }

    fn keys(rows: &[&Record]) -> Vec<RecordKey> {
        rows.iter().map(|r| r.key).collect()
    }

    fn by_key() -> RecordQuery {
        RecordQuery {
            sort: SortSpec::new(SortField::Key, SortDirection::Ascending),
            ..RecordQuery::default()
        }
    }

    #[test]
    fn test_twenty_five_rows_in_pages_of_ten() {
        let records = numbered(25);
        let mut query = by_key();

        let first = query.run(&records);
        assert_eq!(first.total_pages(), 3);
        assert_eq!(first.visible_keys(), (1..=10).collect::<Vec<_>>());

        query.page = 3;
        let last = query.run(&records);
        assert_eq!(last.visible_keys(), (21..=25).collect::<Vec<_>>());
        assert_eq!(last.first_row_number(), 21);
        assert_eq!(last.last_row_number(), 25);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let records = vec![
            NewRecord::new("Kesehatan Ibu").into_record(1),
            NewRecord::new("Posyandu Kesehatan").into_record(2),
        ];
        let query = RecordQuery {
            search: "kesehatan ".to_string(),
            ..by_key()
        };
        assert_eq!(keys(query.run(&records).matched()), vec![1]);
    }

    #[test]
    fn test_empty_working_set_has_one_page() {
        let result = RecordQuery::default().run(&[]);
        assert_eq!(result.total_pages(), 1);
        assert_eq!(result.page(), 1);
        assert!(result.page_rows().is_empty());
        assert_eq!(result.first_row_number(), 0);
    }

    #[test]
    fn test_page_is_clamped() {
        let records = numbered(12);
        let mut query = by_key();

        query.page = 99;
        let result = query.run(&records);
        assert_eq!(result.page(), 2);
        assert_eq!(result.visible_keys(), vec![11, 12]);

        query.page = 0;
        assert_eq!(query.run(&records).page(), 1);
    }

    #[test]
    fn test_zero_rows_per_page_treated_as_one() {
        let records = numbered(3);
        let query = RecordQuery {
            rows_per_page: 0,
            ..by_key()
        };
        let result = query.run(&records);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.visible_keys(), vec![1]);
    }

    #[test]
    fn test_pages_partition_filtered_sequence() {
        let records = numbered(47);
        let mut query = RecordQuery {
            search: "inovasi 0".to_string(),
            rows_per_page: 7,
            ..RecordQuery::default()
        };
        let full = keys(query.run(&records).matched());
        let total_pages = query.run(&records).total_pages();

        let mut concatenated = Vec::new();
        for page in 1..=total_pages {
            query.page = page;
            concatenated.extend(query.run(&records).visible_keys());
        }
        assert_eq!(concatenated, full);
    }

    #[test]
    fn test_output_is_subset_of_working_set() {
        let records = numbered(30);
        let mut query = RecordQuery {
            search: "2".to_string(),
            ..RecordQuery::default()
        };
        query.filters.set(FilterField::Region, "Provinsi Jawa Timur");

        let result = query.run(&records);
        assert!(result.filtered_count() > 0);
        assert!(
            result
                .matched()
                .iter()
                .all(|row| records.iter().any(|r| r == *row))
        );
        assert_eq!(result.total_records(), 30);
    }

    #[test]
    fn test_search_scenario() {
        let records = vec![
            NewRecord::new("Sistem Kesehatan Digital").into_record(1),
            NewRecord::new("Portal Pendidikan").into_record(2),
        ];
        let query = RecordQuery {
            search: "kesehatan".to_string(),
            ..RecordQuery::default()
        };
        assert_eq!(query.run(&records).visible_keys(), vec![1]);
    }

    #[test]
    fn test_sort_idempotent_and_reversible() {
        let records: Vec<Record> = [(1, 40.0), (2, 10.0), (3, 99.0), (4, 75.0)]
            .into_iter()
            .map(|(key, maturity)| {
                NewRecord {
                    maturity,
                    ..NewRecord::new("x")
                }
                .into_record(key)
            })
            .collect();

        let mut query = RecordQuery {
            sort: SortSpec::new(SortField::Maturity, SortDirection::Ascending),
            ..RecordQuery::default()
        };
        let once = keys(query.run(&records).matched());
        assert_eq!(once, vec![2, 1, 4, 3]);

        let sorted: Vec<Record> = query.run(&records).matched().iter().map(|r| (*r).clone()).collect();
        assert_eq!(keys(query.run(&sorted).matched()), once);

        query.sort.direction = SortDirection::Descending;
        let mut reversed = keys(query.run(&records).matched());
        reversed.reverse();
        assert_eq!(reversed, once);
    }
}
