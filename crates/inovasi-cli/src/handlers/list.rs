//! List command handler.
//!
//! Displays one page of records in a formatted table.

use std::str::FromStr;

use anyhow::Result;
use inovasi_core::{FilterField, SortDirection, SortField, SortSpec};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_table_header, print_table_row};

/// Arguments for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub stage: Option<String>,
    pub filters: Vec<String>,
    pub sort: String,
    pub desc: bool,
    pub page: usize,
    pub rows: usize,
}

/// Execute the list command.
///
/// Applies the search term, filters, sort and pagination to the controller
/// and prints the resulting page along with "showing X-Y of Z" totals.
///
/// # Errors
///
/// This function will return an error if:
/// - The sort field or a filter field is unknown
/// - A filter is not written as `field=value`
/// - Rows per page is out of range
pub async fn execute(ctx: &mut CliContext, args: ListArgs) -> Result<()> {
    apply_query(ctx, &args)?;

    let controller = ctx.controller();
    let result = controller.result();

    if result.total_records() == 0 {
        println!("No records found.");
        println!("Use 'inovasi add --json <file>' to add the first record.");
        return Ok(());
    }
    if result.filtered_count() == 0 {
        println!(
            "No records match the current search and filters ({} records in total).",
            result.total_records()
        );
        return Ok(());
    }

    print_table_header();
    for record in result.page_rows() {
        print_table_row(record, controller.selection().contains(record.key));
    }
    println!();
    println!(
        "Showing {}-{} of {} (total {}), page {} of {}",
        result.first_row_number(),
        result.last_row_number(),
        result.filtered_count(),
        result.total_records(),
        result.page(),
        result.total_pages()
    );

    Ok(())
}

/// Push the list arguments into the controller's query state.
pub fn apply_query(ctx: &mut CliContext, args: &ListArgs) -> Result<(), CliError> {
    let controller = ctx.controller_mut();

    if let Some(ref search) = args.search {
        controller.set_search_term(search.as_str());
    }
    if let Some(ref kind) = args.kind {
        controller.set_filter(FilterField::Kind, kind);
    }
    if let Some(ref stage) = args.stage {
        controller.set_filter(FilterField::Stage, stage);
    }
    for (field, value) in parse_filters(&args.filters)? {
        controller.set_filter(field, &value);
    }

    let field = SortField::from_str(&args.sort).map_err(|e| CliError::Arguments(e.to_string()))?;
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    controller.set_sort_spec(SortSpec::new(field, direction));

    controller.set_rows_per_page(args.rows)?;
    controller.set_page(args.page);
    Ok(())
}

/// Parse `field=value` filter arguments.
pub fn parse_filters(filter_args: &[String]) -> Result<Vec<(FilterField, String)>, CliError> {
    filter_args
        .iter()
        .map(|arg| {
            let (field, value) = arg.split_once('=').ok_or_else(|| {
                CliError::Arguments(format!("Invalid filter format '{arg}'. Use 'field=value'"))
            })?;
            let field =
                FilterField::from_str(field).map_err(|e| CliError::Arguments(e.to_string()))?;
            Ok((field, value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::bootstrap_with;
    use inovasi_core::{ControllerSettings, NewRecord, StaticCredentialSession};
    use inovasi_store::MemoryRecordStore;
    use std::sync::Arc;

    async fn context(count: i64) -> CliContext {
        let store = Arc::new(MemoryRecordStore::seeded(count, |key| NewRecord {
            kind: if key % 2 == 0 { "Digital" } else { "Non Digital" }.to_string(),
            ..NewRecord::new(format!("Inovasi {key:02}"))
        }));
        let session = Arc::new(StaticCredentialSession::new(None));
        bootstrap_with(store, session, ControllerSettings::default())
            .await
            .unwrap()
    }

    fn args() -> ListArgs {
        ListArgs {
            sort: "title".to_string(),
            page: 1,
            rows: 10,
            ..ListArgs::default()
        }
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(&["asta-cipta=Ekonomi Hijau".to_string()]).unwrap();
        assert_eq!(filters, vec![(FilterField::AstaCipta, "Ekonomi Hijau".to_string())]);
    }

    #[test]
    fn test_parse_filters_invalid_format() {
        let err = parse_filters(&["kind".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(parse_filters(&["colour=red".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_apply_query_pages_and_filters() {
        let mut ctx = context(25).await;
        let list = ListArgs {
            kind: Some("Digital".to_string()),
            sort: "key".to_string(),
            desc: true,
            page: 2,
            rows: 5,
            ..args()
        };

        apply_query(&mut ctx, &list).unwrap();
        let result = ctx.controller().result();
        assert_eq!(result.filtered_count(), 12);
        assert_eq!(result.visible_keys(), vec![14, 12, 10, 8, 6]);
    }

    #[tokio::test]
    async fn test_apply_query_rejects_unknown_sort() {
        let mut ctx = context(3).await;
        let list = ListArgs {
            sort: "colour".to_string(),
            ..args()
        };
        assert!(apply_query(&mut ctx, &list).is_err());
    }

    #[tokio::test]
    async fn test_execute_prints_page() {
        let mut ctx = context(3).await;
        execute(&mut ctx, args()).await.unwrap();
        assert_eq!(ctx.controller().query().rows_per_page, 10);
    }
}
