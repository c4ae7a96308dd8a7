// crates/veris-core/src/traits.rs

use async_trait::async_trait;

use crate::claim::Claim;
use crate::error::VerisError;

/// Trait for durable claim persistence.
///
/// Implemented by veris-store. The graph persists each newly accepted claim
/// once ("persist after accept") and replays `load_all` at startup to
/// rebuild its edges; no transactional coupling beyond that is assumed.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Load every persisted claim, in unspecified order.
    async fn load_all(&self) -> Result<Vec<Claim>, VerisError>;

    /// Persist one claim. Writing the same claim twice is permitted; the
    /// proof hash keys deduplication on reload.
    async fn store(&self, claim: &Claim) -> Result<(), VerisError>;
}

/// Trait for off-box content-addressed archival of graph snapshots.
///
/// The core produces the serialized snapshot; the sink returns an opaque
/// content identifier (e.g. an IPFS CID).
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Archive a serialized snapshot, returning its content id.
    async fn archive(&self, snapshot_json: &[u8]) -> Result<String, VerisError>;
}
