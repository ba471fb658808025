//! portmap CLI - List the host ports used by apps
//!
//! Scans a directory holding one subdirectory per application and prints
//! every host port declared in their `compose.yml` files.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use portmap_core::{Config, ConfigStore};

#[derive(Parser)]
#[command(name = "portmap")]
#[command(author, version, about = "List host ports declared by apps' compose files")]
struct Cli {
    /// Apps root directory (defaults to the configured `appsDir`, else ./apps)
    root: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Log skipped apps and descriptors to stderr
    #[arg(short, long)]
    verbose: bool,
}

async fn load_config() -> Config {
    let store = match ConfigStore::new() {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!(error = %e, "Using default config");
            return Config::default();
        }
    };

    match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %store.config_path().display(),
                error = %e,
                "Using default config"
            );
            Config::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = load_config().await;
    if let Some(root) = cli.root {
        config.apps_dir = root;
    }

    commands::list::run(&config, cli.json).await
}
