//! Record display utilities for CLI output.

use inovasi_core::{FilterOptions, MaturityLevel, Record};

use super::tables::{format_score, or_placeholder, print_separator, truncate_string};

const TABLE_WIDTH: usize = 118;

/// Options for displaying a record summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSummaryOpts<'a> {
    /// Optional title to display before the record details.
    pub title: Option<&'a str>,
}

impl<'a> RecordSummaryOpts<'a> {
    pub const fn with_title(title: &'a str) -> Self {
        Self { title: Some(title) }
    }

    /// Options for delete confirmation.
    pub const fn for_removal() -> Self {
        Self::with_title("Record to delete:")
    }
}

/// Display a short record summary to stdout.
pub fn display_record_summary(record: &Record, opts: RecordSummaryOpts) {
    if let Some(title) = opts.title {
        println!("{title}");
    }
    println!("  No: {}", record.key);
    println!("  Title: {}", record.title);
    println!("  Admin unit: {}", or_placeholder(&record.admin_unit, "-"));
    println!(
        "  Kind / Stage: {} / {}",
        or_placeholder(&record.kind, "-"),
        or_placeholder(&record.stage, "-")
    );
}

/// Display every field of a record.
pub fn display_record_detail(record: &Record) {
    let level = MaturityLevel::from_score(record.maturity);

    println!("{} (No {})", record.title, record.key);
    print_separator(TABLE_WIDTH.min(72));
    let field = |label: &str, value: &str| println!("  {label:<20} {}", or_placeholder(value, "-"));

    field("Region", &record.region);
    field("Admin unit", &record.admin_unit);
    field("Initiator", &record.initiator);
    field("Initiator name", &record.initiator_name);
    field("Form", &record.form);
    field("Kind", &record.kind);
    field("Asta Cipta", &record.asta_cipta);
    field("Main affair", &record.main_affair);

    let related = record.related_affairs_list();
    if related.is_empty() {
        field("Related affairs", "");
    } else {
        println!("  {:<20} {}", "Related affairs", related[0]);
        for tag in &related[1..] {
            println!("  {:<20} {tag}", "");
        }
    }

    field("Stage", &record.stage);
    println!(
        "  {:<20} {} ({})",
        "Maturity",
        format_score(record.maturity),
        level
    );
    field("Maturity label", &record.maturity_label);
    field("Input date", &record.input_date);
    field("Applied date", &record.applied_date);
    field("Development date", &record.development_date);

    if record.has_video() {
        field("Video", &record.video_url);
    } else {
        field("Video", &record.video);
    }

    println!("  {:<20} {}, {}", "Coordinates", record.lat, record.lon);
    println!("  {:<20} {}", "Map", record.maps_url());
}

/// Print the records table header.
pub fn print_table_header() {
    println!(
        "{:<5} {:<40} {:<28} {:<14} {:<12} {:>9}",
        "No", "Title", "Admin unit", "Kind", "Stage", "Maturity"
    );
    print_separator(TABLE_WIDTH);
}

/// Print one table row; `selected` marks rows with a leading asterisk.
pub fn print_table_row(record: &Record, selected: bool) {
    let marker = if selected { "*" } else { "" };
    println!(
        "{:<5} {:<40} {:<28} {:<14} {:<12} {:>9}",
        format!("{marker}{}", record.key),
        truncate_string(&record.title, 39),
        truncate_string(or_placeholder(&record.admin_unit, "-"), 27),
        truncate_string(or_placeholder(&record.kind, "-"), 13),
        truncate_string(or_placeholder(&record.stage, "-"), 11),
        format_score(record.maturity)
    );
}

/// Print the distinct values of each categorical field.
pub fn print_filter_options(options: &FilterOptions) {
    let groups: [(&str, &Vec<String>); 6] = [
        ("Initiator", &options.initiators),
        ("Form", &options.forms),
        ("Kind", &options.kinds),
        ("Asta Cipta", &options.asta_cipta),
        ("Main affair", &options.main_affairs),
        ("Stage", &options.stages),
    ];

    for (label, values) in groups {
        println!("{label} ({}):", values.len());
        if values.is_empty() {
            println!("  -");
        }
        for value in values {
            println!("  {value}");
        }
    }
}
