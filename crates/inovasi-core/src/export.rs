//! JSON export of records.
//!
//! Records are written with the table's column names so an export can be
//! re-imported as-is. Spreadsheet and PDF exports are handled elsewhere.

use crate::domain::Record;
use crate::selection::SelectionSet;

/// Records whose key is selected, in working-set order.
pub fn selected_records<'a>(records: &'a [Record], selection: &SelectionSet) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| selection.contains(record.key))
        .collect()
}

/// Serialize records as a pretty-printed JSON array.
pub fn records_to_json(records: &[&Record]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
