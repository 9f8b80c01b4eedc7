//! Folio CLI - portfolio content engine.
//!
//! Provides commands for:
//! - `serve`: Start the page data server
//! - `render`: Render a blog post or project body to HTML
//! - `validate`: Check a dataset export against the content schema
//! - `schema`: Print the content schema as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SchemaArgs, ServeArgs, ValidateArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Folio - portfolio content engine.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page data server.
    Serve(ServeArgs),
    /// Render a document body to HTML.
    Render(RenderArgs),
    /// Validate a dataset export against the content schema.
    Validate(ValidateArgs),
    /// Print the content schema as JSON.
    Schema(SchemaArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Render(args) => args.verbose,
            Self::Validate(_) | Self::Schema(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Render(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Schema(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
