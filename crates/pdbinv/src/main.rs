mod cli;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdbinv_core::{InventoryService, RedisCache};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.completions {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "pdbinv", &mut std::io::stdout());
        return Ok(());
    }

    let path = config_path(&cli);
    tracing::debug!(path = %path.display(), "loading configuration");
    let config = pdbinv_config::load_config(&path)?;
    let pipeline = config.to_pipeline()?;

    let cache = match config.redis() {
        Some(settings) if cli.touches_cache() => Some(RedisCache::connect(&settings).await?),
        _ => None,
    };

    let service = InventoryService::new(pipeline, cache)?;
    commands::dispatch(&cli, &service).await
}

/// `--config` / `PDBINV_CONFIG`, else the platform default.
fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(pdbinv_config::config_path)
}
