// crates/veris-cli/src/commands/query.rs
//
// `veris query` — traverse and filter the trust graph.

use clap::Args;

use veris_core::identity::Identity;
use veris_graph::{QueryOptions, TrustNetwork};

use crate::output::{format_json, format_table, ResultRow};

/// Query the trust network.
#[derive(Debug, Args)]
pub struct QueryCmd {
    /// Traversal root; limits candidates to claims reachable within --depth hops.
    #[arg(long)]
    pub observer: Option<String>,

    /// Filter: claim issuer (exact match).
    #[arg(long)]
    pub agent: Option<String>,

    /// Filter: claim subject (exact match).
    #[arg(long)]
    pub subject: Option<String>,

    /// Filter: tag, match-any; repeatable.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Maximum hop count from the observer (0 = direct claims only).
    #[arg(long)]
    pub depth: Option<i32>,

    /// Lower bound on effective confidence.
    #[arg(long, default_value = "0.0")]
    pub min_confidence: f64,

    /// Upper bound on effective confidence.
    #[arg(long, default_value = "1.0")]
    pub max_confidence: f64,

    /// Aggregate claims per subject into consensus views.
    #[arg(long)]
    pub consensus: bool,

    /// Attenuate confidence by hop distance from the observer.
    #[arg(long)]
    pub decay: bool,

    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Run the query command.
pub async fn run(
    network: &TrustNetwork,
    cmd: &QueryCmd,
    default_depth: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let opts = QueryOptions {
        observer: cmd.observer.as_deref().map(Identity::from),
        agent: cmd.agent.as_deref().map(Identity::from),
        subject: cmd.subject.as_deref().map(Identity::from),
        tags: cmd.tags.clone(),
        depth: cmd.depth.unwrap_or(default_depth),
        min_confidence: cmd.min_confidence,
        max_confidence: cmd.max_confidence,
        use_consensus: cmd.consensus,
        use_trust_decay: cmd.decay,
    };

    let results = network.query(&opts).await?;
    if cmd.json {
        println!("{}", format_json(&results));
        return Ok(());
    }
    if results.is_empty() {
        println!("No matching claims.");
        return Ok(());
    }
    let rows: Vec<ResultRow> = results.iter().map(ResultRow::from_result).collect();
    println!("{}", format_table(&rows));
    Ok(())
}
