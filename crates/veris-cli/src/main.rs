// crates/veris-cli/src/main.rs
//
// CLI entrypoint for the Veris trust network.
//
// Provides subcommands for creating claims, querying the trust graph,
// inspecting identities, rendering the graph, and exporting snapshots.
// The graph is rebuilt from the JSON-lines claim store on every invocation
// and each newly accepted claim is persisted back to it.

mod commands;
mod config;
mod output;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use commands::claim::ClaimCmd;
use commands::export::ExportCmd;
use commands::get::GetCmd;
use commands::map::MapCmd;
use commands::query::QueryCmd;
use config::VerisConfig;
use veris_graph::TrustNetwork;
use veris_store::JsonlClaimStore;

/// Veris trust network CLI — claims, trust queries, and graph export.
#[derive(Parser, Debug)]
#[command(
    name = "veris",
    version = "0.1.0",
    about = "Veris CLI — web-of-trust claim graph and query engine"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ~/.veris/config.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create and ingest a proof-sealed trust claim.
    Claim(ClaimCmd),

    /// Query the trust graph with filters, decay, and consensus.
    Query(QueryCmd),

    /// Show claims where an identity appears as issuer or subject.
    Get(GetCmd),

    /// Render the trust graph (ASCII or DOT).
    Map(MapCmd),

    /// Show trust graph statistics.
    Stats,

    /// Export a full graph snapshot as JSON.
    Export(ExportCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = VerisConfig::load(cli.config.as_deref())?;

    // Structured logging; RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(JsonlClaimStore::open(&config.data_file).await?);
    let network = TrustNetwork::new()
        .with_store(store)
        .with_decay_factor(config.decay_factor);
    network.load_from_store().await?;

    match &cli.command {
        Commands::Claim(cmd) => commands::claim::run(&network, cmd).await?,
        Commands::Query(cmd) => commands::query::run(&network, cmd, config.default_depth).await?,
        Commands::Get(cmd) => commands::get::run(&network, cmd).await?,
        Commands::Map(cmd) => commands::map::run(&network, cmd).await?,
        Commands::Stats => commands::stats::run(&network).await?,
        Commands::Export(cmd) => commands::export::run(&network, cmd).await?,
    }

    Ok(())
}
