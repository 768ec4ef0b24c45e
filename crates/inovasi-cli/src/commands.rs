//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;
use inovasi_core::RecordKey;

/// Available commands.
///
/// Read commands work without credentials. Commands that change records
/// prompt for the administrator username and password when the session is
/// not yet privileged.
#[derive(Subcommand)]
pub enum Commands {
    /// List records as a paginated table
    List {
        /// Case-insensitive search over title and administering unit
        #[arg(short, long)]
        search: Option<String>,
        /// Only records of this kind ("Semua" for all)
        #[arg(long)]
        kind: Option<String>,
        /// Only records at this stage ("Semua" for all)
        #[arg(long)]
        stage: Option<String>,
        /// Extra filters as field=value (initiator, form, asta-cipta, main-affair, region)
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
        /// Sort by: title, admin-unit, kind, stage, maturity, key
        #[arg(long, default_value = "title")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Rows per page
        #[arg(short, long, default_value_t = 10)]
        rows: usize,
    },

    /// Show every field of one record
    Show {
        /// Record number
        key: RecordKey,
    },

    /// List the distinct values of each categorical field
    Options,

    /// Add a record from a JSON file
    Add {
        /// JSON object using the table's column names; missing fields take defaults
        #[arg(long = "json")]
        json: PathBuf,
    },

    /// Change fields of a record
    Edit {
        /// Record number
        key: RecordKey,
        /// Field assignments such as title="Portal Data" or kematangan=80
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        assignments: Vec<String>,
    },

    /// Delete one record
    Delete {
        /// Record number
        key: RecordKey,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete several records in one request
    DeleteMany {
        /// Record numbers
        #[arg(required = true)]
        keys: Vec<RecordKey>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export records as JSON
    Export {
        /// Record numbers
        #[arg(required = true)]
        keys: Vec<RecordKey>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use crate::commands::Commands;
    use clap::Parser;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::parse_from(["inovasi", "list"]);
        let Some(Commands::List {
            search,
            sort,
            desc,
            page,
            rows,
            ..
        }) = cli.command
        else {
            panic!("expected list command");
        };
        assert!(search.is_none());
        assert_eq!(sort, "title");
        assert!(!desc);
        assert_eq!((page, rows), (1, 10));
    }

    #[test]
    fn test_edit_collects_assignments() {
        let cli = Cli::parse_from([
            "inovasi",
            "edit",
            "4",
            "--set",
            "stage=Penerapan",
            "--set",
            "kematangan=90",
        ]);
        let Some(Commands::Edit { key, assignments }) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(key, 4);
        assert_eq!(assignments, vec!["stage=Penerapan", "kematangan=90"]);
    }

    #[test]
    fn test_edit_requires_assignment() {
        assert!(Cli::try_parse_from(["inovasi", "edit", "4"]).is_err());
    }

    #[test]
    fn test_delete_many_requires_keys() {
        assert!(Cli::try_parse_from(["inovasi", "delete-many"]).is_err());
        let cli = Cli::parse_from(["inovasi", "delete-many", "3", "5", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::DeleteMany { ref keys, force: true }) if keys == &vec![3, 5]
        ));
    }
}
