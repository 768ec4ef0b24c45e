//! Filter/aggregate types for editor dropdowns and filter selectors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::record::Record;

/// Distinct values of each categorical field in the working set.
///
/// Values are sorted and never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub initiators: Vec<String>,
    pub forms: Vec<String>,
    pub kinds: Vec<String>,
    pub asta_cipta: Vec<String>,
    pub main_affairs: Vec<String>,
    pub stages: Vec<String>,
}

impl FilterOptions {
    /// Aggregate distinct values from a set of records.
    ///
    /// Uses in-memory aggregation; the working set is small (hundreds of rows).
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut initiators = BTreeSet::new();
        let mut forms = BTreeSet::new();
        let mut kinds = BTreeSet::new();
        let mut asta_cipta = BTreeSet::new();
        let mut main_affairs = BTreeSet::new();
        let mut stages = BTreeSet::new();

        for record in records {
            insert_non_empty(&mut initiators, &record.initiator);
            insert_non_empty(&mut forms, &record.form);
            insert_non_empty(&mut kinds, &record.kind);
            insert_non_empty(&mut asta_cipta, &record.asta_cipta);
            insert_non_empty(&mut main_affairs, &record.main_affair);
            insert_non_empty(&mut stages, &record.stage);
        }

        Self {
            initiators: initiators.into_iter().collect(),
            forms: forms.into_iter().collect(),
            kinds: kinds.into_iter().collect(),
            asta_cipta: asta_cipta.into_iter().collect(),
            main_affairs: main_affairs.into_iter().collect(),
            stages: stages.into_iter().collect(),
        }
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() {
        set.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRecord;

    #[test]
    fn test_options_empty() {
        let options = FilterOptions::from_records(std::iter::empty());
        assert_eq!(options, FilterOptions::default());
    }

    #[test]
    fn test_options_distinct_and_sorted() {
        let records = vec![
            NewRecord {
                kind: "Non Digital".to_string(),
                stage: "Uji Coba".to_string(),
                ..NewRecord::new("a")
            }
            .into_record(1),
            NewRecord {
                kind: "Digital".to_string(),
                stage: String::new(),
                ..NewRecord::new("b")
            }
            .into_record(2),
            NewRecord {
                kind: "Digital".to_string(),
                stage: "Inisiatif".to_string(),
                ..NewRecord::new("c")
            }
            .into_record(3),
        ];

        let options = FilterOptions::from_records(&records);
        assert_eq!(options.kinds, vec!["Digital", "Non Digital"]);
        assert_eq!(options.stages, vec!["Inisiatif", "Uji Coba"]);
        assert!(options.initiators.is_empty());
    }
}
