//! CLI entry point.
//!
//! Parses arguments, installs logging, builds the context through
//! bootstrap and routes each command to its handler.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use inovasi_cli::handlers::{self, list::ListArgs};
use inovasi_cli::{Cli, CliConfig, CliError, Commands, bootstrap};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

/// Log to stderr so exported JSON on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli)?;
    let mut ctx = bootstrap(config).await?;

    match command {
        Commands::List {
            search,
            kind,
            stage,
            filters,
            sort,
            desc,
            page,
            rows,
        } => {
            let args = ListArgs {
                search: search.clone(),
                kind: kind.clone(),
                stage: stage.clone(),
                filters: filters.clone(),
                sort: sort.clone(),
                desc: *desc,
                page: *page,
                rows: *rows,
            };
            handlers::list::execute(&mut ctx, args).await?;
        }
        Commands::Show { key } => {
            handlers::show::execute(&ctx, *key).await?;
        }
        Commands::Options => {
            handlers::options::execute(&ctx).await?;
        }
        Commands::Add { json } => {
            handlers::add::execute(&mut ctx, json).await?;
        }
        Commands::Edit { key, assignments } => {
            handlers::edit::execute(&mut ctx, *key, assignments).await?;
        }
        Commands::Delete { key, force } => {
            handlers::delete::execute(&mut ctx, *key, *force).await?;
        }
        Commands::DeleteMany { keys, force } => {
            handlers::delete_many::execute(&mut ctx, keys, *force).await?;
        }
        Commands::Export { keys, output } => {
            handlers::export::execute(&mut ctx, keys, output.as_deref()).await?;
        }
    }

    Ok(())
}
