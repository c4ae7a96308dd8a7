// crates/veris-cli/src/commands/get.rs
//
// `veris get <id>` — claims where an identity appears as issuer or subject.

use clap::Args;

use veris_core::identity::Identity;
use veris_graph::TrustNetwork;

/// Get trust information for one identity.
#[derive(Debug, Args)]
pub struct GetCmd {
    /// The identity to look up.
    pub id: String,
}

/// Run the get command.
pub async fn run(
    network: &TrustNetwork,
    cmd: &GetCmd,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = Identity::from(cmd.id.as_str());
    let claims = network.claims_about(&id).await;

    if claims.is_empty() {
        println!("No trust claims found for '{}'", id);
        return Ok(());
    }

    println!("Trust claims for '{}':", id);
    for claim in claims {
        if claim.issuer == id {
            println!(
                "  -> Trusts '{}' as '{}' ({:.2})",
                claim.subject, claim.statement, claim.confidence
            );
        } else {
            println!(
                "  <- Trusted by '{}' as '{}' ({:.2})",
                claim.issuer, claim.statement, claim.confidence
            );
        }
    }
    Ok(())
}
