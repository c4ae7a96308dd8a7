// crates/veris-cli/src/commands/export.rs
//
// `veris export` — write a full graph snapshot as JSON.
//
// The snapshot file is the payload an archival collaborator (an
// `ArchiveSink` implementation) consumes; re-importing it through the
// persistence contract reconstructs an equivalent graph.

use clap::Args;

use veris_graph::TrustNetwork;

/// Export a graph snapshot.
#[derive(Debug, Args)]
pub struct ExportCmd {
    /// Output file path; stdout when omitted.
    #[arg(long, short)]
    pub output: Option<String>,
}

/// Run the export command.
pub async fn run(
    network: &TrustNetwork,
    cmd: &ExportCmd,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = network.snapshot().await;
    let json = snapshot.to_json()?;

    match &cmd.output {
        Some(path) => {
            tokio::fs::write(path, &json).await?;
            println!(
                "Exported {} claims to {} (snapshot {})",
                snapshot.claims.len(),
                path,
                snapshot.metadata.id
            );
        }
        None => {
            println!("{}", String::from_utf8_lossy(&json));
        }
    }
    Ok(())
}
