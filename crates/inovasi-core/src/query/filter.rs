//! Categorical filters and free-text search.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::QueryParseError;
use crate::domain::Record;

/// Selector values meaning "no constraint on this field".
pub const UNCONSTRAINED_VALUES: [&str; 2] = ["all", "semua"];

/// True when a selector value places no constraint.
pub fn is_unconstrained(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || UNCONSTRAINED_VALUES
            .iter()
            .any(|all| value.eq_ignore_ascii_case(all))
}

/// Categorical fields a filter selector can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Kind,
    Stage,
    Initiator,
    Form,
    AstaCipta,
    MainAffair,
    Region,
}

impl FilterField {
    pub const ALL: [Self; 7] = [
        Self::Kind,
        Self::Stage,
        Self::Initiator,
        Self::Form,
        Self::AstaCipta,
        Self::MainAffair,
        Self::Region,
    ];

    /// Column name in the record table.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Kind => "jenis",
            Self::Stage => "tahapan_inovasi",
            Self::Initiator => "inisiator",
            Self::Form => "bentuk_inovasi",
            Self::AstaCipta => "asta_cipta",
            Self::MainAffair => "urusan_utama",
            Self::Region => "pemda",
        }
    }

    /// Short name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Stage => "stage",
            Self::Initiator => "initiator",
            Self::Form => "form",
            Self::AstaCipta => "asta-cipta",
            Self::MainAffair => "main-affair",
            Self::Region => "region",
        }
    }

    /// The record's value for this field.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Self::Kind => &record.kind,
            Self::Stage => &record.stage,
            Self::Initiator => &record.initiator,
            Self::Form => &record.form,
            Self::AstaCipta => &record.asta_cipta,
            Self::MainAffair => &record.main_affair,
            Self::Region => &record.region,
        }
    }
}

impl FromStr for FilterField {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|field| field.name() == wanted || field.column().replace('_', "-") == wanted)
            .ok_or_else(|| QueryParseError::UnknownFilterField(s.to_string()))
    }
}

/// Selected value per filter field. Absent fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters(BTreeMap<FilterField, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a value for `field`. "all"/"semua"/empty removes the constraint.
    ///
    /// Returns true if the filter set changed.
    pub fn set(&mut self, field: FilterField, value: &str) -> bool {
        if is_unconstrained(value) {
            self.0.remove(&field).is_some()
        } else {
            self.0.insert(field, value.to_string()).as_deref() != Some(value)
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Exact-match every active constraint.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(field, value)| field.value_of(record) == value)
    }
}

/// Case-insensitive substring search over title and administering unit.
///
/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_search(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record.title.to_lowercase().contains(needle)
        || record.admin_unit.to_lowercase().contains(needle)
}
