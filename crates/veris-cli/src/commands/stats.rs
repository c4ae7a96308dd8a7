// crates/veris-cli/src/commands/stats.rs
//
// `veris stats` — summary statistics for the trust graph.

use veris_graph::TrustNetwork;

/// Run the stats command.
pub async fn run(network: &TrustNetwork) -> Result<(), Box<dyn std::error::Error>> {
    let stats = network.stats().await;

    println!("Trust Graph Statistics:");
    println!("  Total Claims:    {}", stats.claim_count);
    println!("  Unique Entities: {}", stats.node_count);
    println!("  Trust Edges:     {}", stats.edge_count);

    if !stats.top_tags.is_empty() {
        println!();
        println!("Top Tags:");
        for tag in stats.top_tags.iter().take(10) {
            println!("  {}: {} claims", tag.tag, tag.count);
        }
    }
    Ok(())
}
