// crates/veris-graph/src/lib.rs
//
// veris-graph: Claim graph, trust query engine, and snapshot export for the
// Veris trust network.
//
// The graph holds claims as weighted directed edges between identity nodes;
// the query engine traverses it from an observer, applies distance decay,
// reconciles conflicting claims into consensus views, and filters by
// tag/confidence/issuer/subject. `TrustNetwork` is the concurrent facade
// the CLI and embedding callers use.

pub mod graph;
pub mod network;
pub mod query;
pub mod render;
pub mod snapshot;
pub mod stats;

// Re-export key types for ergonomic access from downstream crates.
pub use graph::{AddOutcome, Edge, Node, TrustGraph};
pub use network::TrustNetwork;
pub use query::{
    ConsensusView, QueryEngine, QueryOptions, QueryResult, ScoredClaim, DEFAULT_DECAY_FACTOR,
    DEFAULT_DEPTH,
};
pub use snapshot::{GraphSnapshot, SnapshotMetadata, SNAPSHOT_VERSION};
pub use stats::{NetworkStats, TagCount};
