// crates/veris-graph/src/network.rs
//
// TrustNetwork: the concurrent facade over the claim graph.
//
// The graph and its claim store are a single shared mutable resource behind
// one reader/writer lock: queries share the read lock, ingestion takes the
// write lock, so the duplicate-hash check and edge insertion are atomic
// together and `add_claim` stays idempotent under concurrency.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use veris_core::cancel::CancelToken;
use veris_core::claim::Claim;
use veris_core::error::VerisError;
use veris_core::identity::Identity;
use veris_core::traits::ClaimStore;

use crate::graph::{AddOutcome, TrustGraph};
use crate::query::{QueryEngine, QueryOptions, QueryResult};
use crate::snapshot::GraphSnapshot;
use crate::{render, stats::NetworkStats};

/// Shared handle to a trust network. Cloning is cheap and clones observe
/// the same graph.
#[derive(Clone)]
pub struct TrustNetwork {
    graph: Arc<RwLock<TrustGraph>>,
    engine: QueryEngine,
    store: Option<Arc<dyn ClaimStore>>,
}

impl TrustNetwork {
    /// A network with no durable store.
    pub fn new() -> Self {
        Self {
            graph: Arc::new(RwLock::new(TrustGraph::new())),
            engine: QueryEngine::new(),
            store: None,
        }
    }

    /// Attach a persistence backend. Each newly accepted claim is forwarded
    /// to it ("persist after accept").
    pub fn with_store(mut self, store: Arc<dyn ClaimStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the trust-decay factor used by queries.
    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.engine = self.engine.with_decay_factor(decay_factor);
        self
    }

    /// Ingest a claim, persisting it if it was genuinely new.
    ///
    /// A store failure after acceptance surfaces as `Storage`; the claim
    /// stays in the in-memory graph (no transactional coupling is assumed
    /// between graph mutation and persistence).
    pub async fn add_claim(&self, claim: Claim) -> Result<AddOutcome, VerisError> {
        let outcome = {
            let mut graph = self.graph.write().await;
            graph.add_claim(claim.clone())?
        };
        if outcome.is_new() {
            if let Some(store) = &self.store {
                if let Err(e) = store.store(&claim).await {
                    warn!(proof = %claim.proof.hash, error = %e, "failed to persist accepted claim");
                    return Err(e);
                }
            }
        }
        Ok(outcome)
    }

    /// Run a trust query. Concurrent queries proceed in parallel under the
    /// read lock.
    pub async fn query(&self, opts: &QueryOptions) -> Result<Vec<QueryResult>, VerisError> {
        let graph = self.graph.read().await;
        self.engine.run(&graph, opts)
    }

    /// Run a trust query that the caller can abort via `cancel`.
    pub async fn query_with_cancel(
        &self,
        opts: &QueryOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<QueryResult>, VerisError> {
        let graph = self.graph.read().await;
        self.engine.run_with_cancel(&graph, opts, cancel)
    }

    /// Rebuild the graph from the attached store at startup.
    ///
    /// Replays `load_all` through `add_claim`; duplicates in the store are
    /// absorbed by proof-hash idempotency. Returns the number of claims
    /// actually added.
    pub async fn load_from_store(&self) -> Result<usize, VerisError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| VerisError::Storage("no claim store attached".to_string()))?;
        let claims = store.load_all().await?;
        let mut graph = self.graph.write().await;
        let mut added = 0;
        for claim in claims {
            if graph.add_claim(claim)?.is_new() {
                added += 1;
            }
        }
        info!(added, total = graph.claim_count(), "trust graph rebuilt from store");
        Ok(added)
    }

    /// Capture a serializable snapshot of the whole graph.
    pub async fn snapshot(&self) -> GraphSnapshot {
        let graph = self.graph.read().await;
        GraphSnapshot::capture(&graph)
    }

    /// Claims where `id` appears as issuer or subject.
    pub async fn claims_about(&self, id: &Identity) -> Vec<Claim> {
        let graph = self.graph.read().await;
        graph.claims_about(id).into_iter().cloned().collect()
    }

    /// Deterministic summary statistics.
    pub async fn stats(&self) -> NetworkStats {
        let graph = self.graph.read().await;
        NetworkStats::collect(&graph)
    }

    /// DOT rendering of the current graph.
    pub async fn render_dot(&self) -> String {
        let graph = self.graph.read().await;
        render::to_dot(&graph)
    }

    /// ASCII rendering of the current graph.
    pub async fn render_ascii(&self) -> String {
        let graph = self.graph.read().await;
        render::to_ascii(&graph)
    }
}

impl Default for TrustNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veris_core::factory::ClaimFactory;

    fn claim(issuer: &str, subject: &str, confidence: f64) -> Claim {
        ClaimFactory::new()
            .create_claim(
                Identity::from(issuer),
                Identity::from(subject),
                "trusts",
                confidence,
                vec![],
            )
            .unwrap()
    }

    #[tokio::test]
    async fn concurrent_duplicate_ingestion_creates_one_edge() {
        let network = TrustNetwork::new();
        let c = claim("a", "b", 0.8);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let network = network.clone();
            let c = c.clone();
            handles.push(tokio::spawn(async move { network.add_claim(c).await }));
        }
        let mut added = 0;
        for h in handles {
            if h.await.unwrap().unwrap().is_new() {
                added += 1;
            }
        }
        assert_eq!(added, 1);

        let stats = network.stats().await;
        assert_eq!(stats.claim_count, 1);
        assert_eq!(stats.edge_count, 1);
        assert_eq!(stats.node_count, 2);
    }

    #[tokio::test]
    async fn queries_observe_ingested_claims() {
        let network = TrustNetwork::new();
        network.add_claim(claim("a", "b", 0.8)).await.unwrap();
        network.add_claim(claim("b", "c", 0.6)).await.unwrap();

        let results = network.query(&QueryOptions::default()).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn cancelled_query_returns_cancelled() {
        let network = TrustNetwork::new();
        network.add_claim(claim("a", "b", 0.8)).await.unwrap();

        let token = CancelToken::new();
        token.cancel();
        let err = network
            .query_with_cancel(&QueryOptions::default(), &token)
            .await
            .unwrap_err();
        assert!(matches!(err, VerisError::Cancelled));
    }
}
