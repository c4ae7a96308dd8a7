// crates/veris-graph/src/snapshot.rs
//
// Full-graph snapshot export and import.
//
// The snapshot is the payload handed to an archival collaborator (an
// `ArchiveSink`). Claims are emitted sorted by (issuer, proof hash) so the
// serialized form is deterministic; replaying the claims through
// `add_claim` reconstructs an equivalent graph (same edges, same weights),
// though node visitation order is not guaranteed to match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use veris_core::claim::Claim;
use veris_core::error::VerisError;

use crate::graph::TrustGraph;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1";

/// Snapshot envelope metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Unique snapshot identifier (UUID v7 for time-ordering).
    pub id: Uuid,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
    /// Format version.
    pub version: String,
}

/// A serializable snapshot of the whole claim graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub claims: Vec<Claim>,
    pub metadata: SnapshotMetadata,
}

impl GraphSnapshot {
    /// Capture the graph's claim store, sorted for deterministic emission.
    pub fn capture(graph: &TrustGraph) -> Self {
        let mut claims: Vec<Claim> = graph.claims().cloned().collect();
        claims.sort_by(|a, b| {
            a.issuer
                .cmp(&b.issuer)
                .then_with(|| a.proof.hash.cmp(&b.proof.hash))
        });
        GraphSnapshot {
            claims,
            metadata: SnapshotMetadata {
                id: Uuid::now_v7(),
                timestamp: Utc::now(),
                version: SNAPSHOT_VERSION.to_string(),
            },
        }
    }

    /// Serialize to the snapshot JSON shape.
    pub fn to_json(&self) -> Result<Vec<u8>, VerisError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, VerisError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Rebuild a graph by replaying every snapshot claim.
    pub fn restore(&self) -> Result<TrustGraph, VerisError> {
        let mut graph = TrustGraph::new();
        for claim in &self.claims {
            graph.add_claim(claim.clone())?;
        }
        Ok(graph)
    }
}
