mod commands;
mod manifest;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;
use stack_utils::{setup_logging, EnvConfigStore, LayeredConfigStore, MapConfigStore};

/// Declares container services and the API gateways in front of them.
///
/// Provider configuration is read from `--config` first and then from the
/// environment, e.g. `GCP_PROJECT`, `GCP_REGION`, `GCP_CREDENTIALS`,
/// `AWS_REGION`, `AWS_ACCESS_KEY` and `AWS_SECRET_KEY`.
#[derive(Debug, Parser)]
#[command(name = "containerstack", version = env!("APP_VERSION"), about)]
struct Cli {
    /// YAML file with provider configuration, e.g. `{gcp: {project: ..., region: ...}}`
    #[arg(long, global = true, env = "CONTAINERSTACK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the resources declared for a service runtime, e.g. service.yaml
    Service {
        file: PathBuf,
        /// Print the declaration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the resources declared for a gateway, e.g. gateway.yaml
    Gateway {
        file: PathBuf,
        /// Print the declaration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the public endpoint of a gateway
    Endpoint { file: PathBuf },
    /// Dry-run a stack file with a service and/or gateway and show its outputs
    Preview { file: PathBuf },
}

fn config_store(path: Option<&Path>) -> Result<LayeredConfigStore> {
    let mut store = LayeredConfigStore::new();
    if let Some(path) = path {
        store = store.layer(MapConfigStore::from_file(path)?);
    }
    Ok(store.layer(EnvConfigStore::new()))
}

async fn run(cli: Cli) -> Result<()> {
    let store = config_store(cli.config.as_deref())?;
    match cli.command {
        Commands::Service { file, json } => commands::service::handle_declare(&file, json, &store),
        Commands::Gateway { file, json } => commands::gateway::handle_declare(&file, json, &store),
        Commands::Endpoint { file } => commands::gateway::handle_endpoint(&file, &store),
        Commands::Preview { file } => commands::preview::handle_preview(&file, &store).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = setup_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
