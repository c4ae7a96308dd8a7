// crates/veris-cli/src/commands/claim.rs
//
// `veris claim <issuer> <subject> <statement>` — create and ingest a
// proof-sealed claim.

use clap::Args;

use veris_core::factory::ClaimFactory;
use veris_core::identity::Identity;
use veris_graph::TrustNetwork;

/// Create a trust claim.
#[derive(Debug, Args)]
pub struct ClaimCmd {
    /// Identity making the claim (e.g. "twitter:alice").
    pub issuer: String,

    /// Identity the claim is about.
    pub subject: String,

    /// The statement text.
    pub statement: String,

    /// Confidence in the statement, in [0.0, 1.0].
    #[arg(long, default_value = "1.0")]
    pub confidence: f64,

    /// Tag to attach; repeatable.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

/// Run the claim command.
pub async fn run(
    network: &TrustNetwork,
    cmd: &ClaimCmd,
) -> Result<(), Box<dyn std::error::Error>> {
    let claim = ClaimFactory::new().create_claim(
        Identity::from(cmd.issuer.as_str()),
        Identity::from(cmd.subject.as_str()),
        cmd.statement.as_str(),
        cmd.confidence,
        cmd.tags.clone(),
    )?;
    let proof_hash = claim.proof.hash.clone();
    let outcome = network.add_claim(claim).await?;

    if outcome.is_new() {
        println!(
            "Created trust claim: {} -[{}]-> {}",
            cmd.issuer, cmd.statement, cmd.subject
        );
        println!("  Proof: {}", proof_hash);
    } else {
        println!("Claim already exists (proof {})", proof_hash);
    }
    Ok(())
}
