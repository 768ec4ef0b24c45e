//! Sortable columns and ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::QueryParseError;
use crate::domain::Record;

/// Columns the record table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Title,
    AdminUnit,
    Kind,
    Stage,
    Maturity,
    Key,
}

impl SortField {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::AdminUnit,
        Self::Kind,
        Self::Stage,
        Self::Maturity,
        Self::Key,
    ];

    /// Column name in the record table.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Title => "judul_inovasi",
            Self::AdminUnit => "admin_opd",
            Self::Kind => "jenis",
            Self::Stage => "tahapan_inovasi",
            Self::Maturity => "kematangan",
            Self::Key => "no",
        }
    }

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::AdminUnit => "admin-unit",
            Self::Kind => "kind",
            Self::Stage => "stage",
            Self::Maturity => "maturity",
            Self::Key => "key",
        }
    }

    /// Compare two records on this column, ascending.
    ///
    /// Text compares case-insensitively; numbers compare by value.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::Title => compare_text(&a.title, &b.title),
            Self::AdminUnit => compare_text(&a.admin_unit, &b.admin_unit),
            Self::Kind => compare_text(&a.kind, &b.kind),
            Self::Stage => compare_text(&a.stage, &b.stage),
            Self::Maturity => a.maturity.total_cmp(&b.maturity),
            Self::Key => a.key.cmp(&b.key),
        }
    }
}

impl FromStr for SortField {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|field| field.name() == wanted || field.column().replace('_', "-") == wanted)
            .ok_or_else(|| QueryParseError::UnknownSortField(s.to_string()))
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header click: same field flips direction, a new field starts ascending.
    #[must_use]
    pub fn clicked(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, rows: &mut [&Record]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRecord;

    fn record(key: i64, title: &str, maturity: f64) -> Record {
        NewRecord {
            maturity,
            ..NewRecord::new(title)
        }
        .into_record(key)
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!("admin_unit".parse::<SortField>().unwrap(), SortField::AdminUnit);
        assert_eq!("kematangan".parse::<SortField>().unwrap(), SortField::Maturity);
        assert_eq!("NO".parse::<SortField>().unwrap(), SortField::Key);
        assert!("colour".parse::<SortField>().is_err());
    }

    #[test]
    fn test_text_compare_ignores_case() {
        let a = record(1, "alpha", 0.0);
        let b = record(2, "Beta", 0.0);
        assert_eq!(SortField::Title.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_numeric_compare_by_value() {
        let low = record(1, "x", 9.0);
        let high = record(2, "x", 100.0);
        assert_eq!(SortField::Maturity.compare(&low, &high), Ordering::Less);
    }

    #[test]
    fn test_clicked_toggles_or_resets() {
        let spec = SortSpec::default();
        let flipped = spec.clicked(SortField::Title);
        assert_eq!(flipped.direction, SortDirection::Descending);

        let other = flipped.clicked(SortField::Maturity);
        assert_eq!(other, SortSpec::new(SortField::Maturity, SortDirection::Ascending));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let records = [record(1, "same", 0.0), record(2, "SAME", 0.0), record(3, "same", 0.0)];
        let mut rows: Vec<&Record> = records.iter().collect();

        SortSpec::new(SortField::Title, SortDirection::Descending).sort(&mut rows);
        let keys: Vec<i64> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }
}
