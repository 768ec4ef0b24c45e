//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use inovasi_store::DEFAULT_TABLE;

use crate::commands::Commands;

/// Command-line interface for the regional innovation records.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "inovasi")]
#[command(about = "Browse and manage regional innovation records")]
#[command(version)]
pub struct Cli {
    /// Supabase project URL
    #[arg(long = "url", env = "SUPABASE_URL", global = true)]
    pub url: Option<String>,

    /// Supabase anonymous key
    #[arg(long = "api-key", env = "SUPABASE_ANON_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Records table name
    #[arg(long = "table", default_value = DEFAULT_TABLE, global = true)]
    pub table: String,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
