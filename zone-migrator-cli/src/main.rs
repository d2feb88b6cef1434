//! zone-migrator command-line entry point
//!
//! Copies, moves or re-points a DNS zone between hosting accounts. Accounts and transport
//! settings come from a JSON configuration file; logs go to stderr so stdout only carries
//! command output.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zone_migrator_core::ServiceContext;
use zone_migrator_provider::create_provider;

use commands::migrate::MigrateArgs;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "zone-migrator", version, about)]
struct Cli {
    /// Configuration file (default: <config dir>/zone-migrator/config.json)
    #[arg(long, global = true, env = "ZONE_MIGRATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the configured accounts
    Accounts {
        /// Check each token against the provider
        #[arg(long)]
        verify: bool,
    },
    /// Copy, move or re-point a zone
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(env_filter(cli.verbose, std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `--verbose` forces debug; otherwise `RUST_LOG` when set and valid, else info.
fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).await?;
    tracing::debug!("{} account(s) configured", config.accounts.len());

    let provider =
        create_provider(&config.client_options()).context("Failed to create provider client")?;
    let repository = config.account_repository()?;
    let ctx = Arc::new(ServiceContext::new(provider, Arc::new(repository)));

    match cli.command {
        Command::Accounts { verify } => commands::accounts::run(ctx, verify).await,
        Command::Migrate(args) => commands::migrate::run(ctx, args).await,
    }
}
