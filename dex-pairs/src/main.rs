//! DEX factory pair-address dumper CLI.
//!
//! Fetches every exchange/pair created by the Uniswap V1, Uniswap V2 and
//! SushiSwap factories and writes one address per line to
//! `v1pairs.csv`, `v2pairs.csv` and `sushipairs.csv`.
//!
//! # Usage
//!
//! ```bash
//! # Dump all three factories into ./res
//! URL=http://localhost:8545 dex-pairs
//!
//! # Re-run a single section after an RPC error
//! URL=http://localhost:8545 dex-pairs dump --factory sushiswap
//!
//! # Write somewhere else
//! URL=http://localhost:8545 dex-pairs dump --output-dir ./pairs
//!
//! # Show the known factories
//! dex-pairs list
//! ```

use std::path::PathBuf;

use alloy::providers::ProviderBuilder;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dex_factories::Factory;
use dex_pairs::config::{self, Endpoint, Settings};
use dex_pairs::fetcher;
use dex_pairs::source::RpcSource;

/// Dump factory pair addresses from an Ethereum node.
#[derive(Debug, Parser)]
#[command(name = "dex-pairs", version, about)]
struct Cli {
    /// Defaults to `dump` with no options.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch pair-creation logs and write the pair lists.
    Dump(DumpArgs),

    /// List the known factories.
    List,
}

#[derive(Debug, Default, Args)]
struct DumpArgs {
    /// Dump only this factory (repeatable). If omitted, all are dumped.
    #[arg(long = "factory", value_name = "NAME")]
    factories: Vec<Factory>,

    /// Directory for the output files (default `res`).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Settings file (default `dex-pairs.toml`, optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Dump(args)) => cmd_dump(args).await,
        None => cmd_dump(DumpArgs::default()).await,
        Some(Command::List) => {
            cmd_list();
            Ok(())
        }
    }
}

/// Execute the `dump` subcommand.
async fn cmd_dump(args: DumpArgs) -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("loading .env"),
    }

    // Endpoint first: nothing touches the network without it.
    let endpoint = Endpoint::from_env()?;

    let settings_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SETTINGS_FILE));
    let settings = Settings::load(&settings_path)?;
    let output_dir = settings.output_dir(args.output_dir.as_deref());

    let factories = if args.factories.is_empty() {
        Factory::ALL.to_vec()
    } else {
        args.factories
    };

    let provider = ProviderBuilder::new().connect_http(
        endpoint
            .url()
            .parse()
            .with_context(|| format!("invalid RPC URL: {}", endpoint.url()))?,
    );
    let source = RpcSource::new(provider);

    tracing::info!(
        factories = factories.len(),
        output_dir = %output_dir.display(),
        "starting dump"
    );

    let reports = fetcher::dump_all(&source, &factories, &settings, &output_dir).await?;

    let pairs: usize = reports.iter().map(|r| r.pairs).sum();
    tracing::info!(factories = reports.len(), pairs, "dump finished");
    Ok(())
}

/// Execute the `list` subcommand.
#[allow(clippy::print_stdout)]
fn cmd_list() {
    println!(
        "{:<12} {:<44} {:<12} {:<14} Output",
        "Name", "Factory", "Event", "Deploy Block"
    );
    println!("{}", "-".repeat(100));

    for factory in Factory::ALL {
        let d = factory.descriptor();
        println!(
            "{:<12} {:<44} {:<12} {:<14} {}",
            factory.name(),
            d.address.to_checksum(None),
            d.event.name(),
            d.deployment_block,
            d.output_file,
        );
    }
}
