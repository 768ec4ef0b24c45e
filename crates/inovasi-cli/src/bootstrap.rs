//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - PostgREST record store (via inovasi-store)
//! - Credential session from the environment
//! - Record controller (via inovasi-core)
//!
//! Command handlers receive the composed context and drive the controller.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use inovasi_core::{
    ControllerSettings, Credentials, RecordController, RecordStore, SessionPort,
    StaticCredentialSession,
};
use inovasi_store::{PostgrestRecordStore, StoreConfig};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Environment variable holding the administrator username.
pub const ADMIN_USER_ENV: &str = "INOVASI_ADMIN_USER";

/// Environment variable holding the administrator password.
pub const ADMIN_PASSWORD_ENV: &str = "INOVASI_ADMIN_PASSWORD";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Supabase project URL.
    pub url: String,
    /// Anonymous key.
    pub api_key: Option<String>,
    /// Records table.
    pub table: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Credentials accepted by the sign-in prompt.
    pub admin: Option<Credentials>,
}

impl CliConfig {
    /// Build the configuration from parsed arguments and the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let url = cli
            .url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config("store URL is not set; use --url or SUPABASE_URL".to_string())
            })?;

        Ok(Self {
            url,
            api_key: cli.api_key.clone(),
            table: cli.table.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            admin: admin_credentials_from_env(),
        })
    }
}

/// Read the expected administrator credentials.
///
/// Both variables must be set; otherwise every sign-in attempt fails.
pub fn admin_credentials_from_env() -> Option<Credentials> {
    let username = std::env::var(ADMIN_USER_ENV).ok()?;
    let password = std::env::var(ADMIN_PASSWORD_ENV).ok()?;
    Some(Credentials::new(username, password))
}

/// Composed application context for CLI commands.
pub struct CliContext {
    /// The record controller, loaded with the current working set.
    pub controller: RecordController,
}

impl CliContext {
    /// Access the controller.
    pub const fn controller(&self) -> &RecordController {
        &self.controller
    }

    /// Access the controller mutably.
    pub const fn controller_mut(&mut self) -> &mut RecordController {
        &mut self.controller
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Creates the PostgREST record store
/// 2. Creates the credential session
/// 3. Assembles the controller and loads the working set
///
/// # Errors
///
/// Fails when the store configuration is invalid or the initial load fails.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let store_config = StoreConfig::new(&config.url)
        .with_optional_api_key(config.api_key)
        .with_table(&config.table)
        .with_timeout(config.timeout);
    let store = PostgrestRecordStore::new(&store_config).map_err(CliError::from)?;
    debug!(endpoint = %store.endpoint(), "Record store ready");

    let session = Arc::new(StaticCredentialSession::new(config.admin));

    bootstrap_with(Arc::new(store), session, ControllerSettings::default()).await
}

/// Bootstrap with a custom store and session (for testing).
pub async fn bootstrap_with(
    store: Arc<dyn RecordStore>,
    session: Arc<dyn SessionPort>,
    settings: ControllerSettings,
) -> Result<CliContext> {
    let mut controller = RecordController::new(store, session, settings).map_err(CliError::from)?;
    controller.reload().await.map_err(CliError::from)?;
    Ok(CliContext { controller })
}
