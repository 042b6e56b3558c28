use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{export, report};
use wl_cli::store::JsonStore;
use wl_cli::{Cli, Commands, Config};

/// Load config and open the data file, honoring the `--data` override.
fn open_store(config_path: Option<&Path>, data_override: Option<&Path>) -> Result<JsonStore> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = data_override.unwrap_or(&config.data_path);
    JsonStore::open(path).context("failed to open data file")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Report {
            timespan,
            value,
            json,
        }) => {
            let store = open_store(cli.config.as_deref(), cli.data.as_deref())?;
            report::run(&store, timespan.as_deref(), value.as_deref(), *json)?;
        }
        Some(Commands::Export {
            timespan,
            value,
            sort_by,
            sort_order,
        }) => {
            let store = open_store(cli.config.as_deref(), cli.data.as_deref())?;
            export::run(
                &store,
                timespan.as_deref(),
                value.as_deref(),
                sort_by.as_deref(),
                sort_order.as_deref(),
            )?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
