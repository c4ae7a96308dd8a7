// crates/veris-cli/src/commands/map.rs
//
// `veris map` — render the trust graph as ASCII or Graphviz DOT.

use clap::{Args, ValueEnum};

use veris_graph::TrustNetwork;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapFormat {
    Ascii,
    Dot,
}

/// Render the trust map.
#[derive(Debug, Args)]
pub struct MapCmd {
    /// Output format.
    #[arg(long, short, value_enum, default_value = "ascii")]
    pub format: MapFormat,
}

/// Run the map command.
pub async fn run(
    network: &TrustNetwork,
    cmd: &MapCmd,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = match cmd.format {
        MapFormat::Ascii => network.render_ascii().await,
        MapFormat::Dot => network.render_dot().await,
    };
    print!("{}", rendered);
    Ok(())
}
