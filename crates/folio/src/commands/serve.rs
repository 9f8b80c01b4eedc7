//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::{ServerConfig, run_server};
use folio_store::Fetcher;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve from a dataset export instead of the remote store.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Query the CDN endpoint.
    #[arg(long)]
    cdn: bool,

    /// Enable verbose output (info logs, render warnings in responses).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            export_file: self.export,
            use_cdn: self.cdn.then_some(true),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let store = config.require_store()?;
        tracing::info!(config = ?config.config_path, "Loaded configuration");

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match &store.export_file {
            Some(path) => output.info(&format!("Dataset export: {}", path.display())),
            None => output.info(&format!(
                "Content store: {}/{} (API {}{})",
                store.project_id,
                store.dataset,
                store.api_version,
                if store.use_cdn { ", CDN" } else { "" }
            )),
        }

        let fetcher = Fetcher::from_config(store)?;
        let server_config = ServerConfig::from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config, fetcher).await?;

        Ok(())
    }
}
