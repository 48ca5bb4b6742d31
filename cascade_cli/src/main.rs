//! Cascade CLI - Check and preview cascading form data
//!
//! Usage:
//!   cascade check               Validate the form data tables
//!   cascade render [--test ID]  Show the form state after a refresh
//!   cascade tests               List the selectable tests
//!   cascade init <PATH>         Write the sample data set to a file

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cascade")]
#[command(author = "Cascade Team")]
#[command(version)]
#[command(about = "Check and preview cascading test-selection form data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Form data file (YAML or JSON); defaults to the configured file, then the built-in sample
    #[arg(long, global = true, env = "CASCADE_DATA")]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the form data tables
    Check,

    /// Show the form state after a refresh
    Render {
        /// Test to select (defaults to the first test, as on page load)
        #[arg(short, long)]
        test: Option<String>,

        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the selectable tests
    Tests,

    /// Write the sample data set to a file and make it the default
    Init {
        /// Destination (.yaml/.yml for YAML, anything else for JSON)
        path: PathBuf,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},cascade_cli={},cascade_common={}", log_level, log_level, log_level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let data = cli.data.as_deref();

    match cli.command {
        Commands::Check => commands::check::run(data)?,

        Commands::Render { test, json } => {
            commands::render::run(data, test.as_deref(), json)?;
        }

        Commands::Tests => commands::tests::run(data)?,

        Commands::Init { path, force } => commands::init::run(&path, force)?,
    }

    Ok(())
}
