// crates/veris-graph/src/query.rs
//
// Trust query engine: candidate selection by breadth-first traversal,
// distance-based trust decay, filtering, consensus aggregation, and
// deterministic ordering.
//
// Cycles, self-loops, and disconnected subgraphs are valid shapes; the
// visited set keeps traversal linear in the depth-limited subgraph.

use std::collections::{BTreeMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use veris_core::cancel::CancelToken;
use veris_core::claim::Claim;
use veris_core::error::VerisError;
use veris_core::identity::Identity;

use crate::graph::TrustGraph;

/// Default maximum hop count when none is given.
pub const DEFAULT_DEPTH: i32 = 3;

/// Default per-hop attenuation factor for trust decay.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.8;

/// Options for a trust query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Traversal root. When unset, every claim in the store is a candidate
    /// and depth does not apply.
    pub observer: Option<Identity>,
    /// Filter: claim issuer, exact match.
    pub agent: Option<Identity>,
    /// Filter: claim subject, exact match.
    pub subject: Option<Identity>,
    /// Filter: match-any tag intersection. Empty means no tag filter.
    pub tags: Vec<String>,
    /// Maximum hop count from the observer; 0 means direct claims only.
    pub depth: i32,
    /// Lower bound on effective confidence.
    pub min_confidence: f64,
    /// Upper bound on effective confidence.
    pub max_confidence: f64,
    /// Aggregate surviving claims per subject into consensus views.
    pub use_consensus: bool,
    /// Attenuate confidence by hop distance from the observer.
    pub use_trust_decay: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            observer: None,
            agent: None,
            subject: None,
            tags: Vec::new(),
            depth: DEFAULT_DEPTH,
            min_confidence: 0.0,
            max_confidence: 1.0,
            use_consensus: false,
            use_trust_decay: false,
        }
    }
}

impl QueryOptions {
    /// Reject malformed options before any traversal work.
    pub fn validate(&self) -> Result<(), VerisError> {
        if self.depth < 0 {
            return Err(VerisError::InvalidQuery(format!(
                "depth must be non-negative, got {}",
                self.depth
            )));
        }
        if self.min_confidence > self.max_confidence {
            return Err(VerisError::InvalidQuery(format!(
                "min_confidence {} exceeds max_confidence {}",
                self.min_confidence, self.max_confidence
            )));
        }
        Ok(())
    }
}

/// One claim surviving a query, with its traversal context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredClaim {
    pub claim: Claim,
    /// BFS distance from the observer to the claim's issuer (0 without an
    /// observer or for direct claims).
    pub hop_count: u32,
    /// Confidence after decay; equals the stored confidence when decay is
    /// off. Never written back to the claim.
    pub effective_confidence: f64,
}

/// Aggregated view of all surviving claims about one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusView {
    pub subject: Identity,
    /// Simple mean of the effective confidences in the group.
    pub consensus_confidence: f64,
    /// Earliest issuance in the group; the ordering tiebreak.
    pub issued_at: DateTime<Utc>,
    /// Every claim in the group, sorted by issuance then proof hash.
    pub supporting_claims: Vec<Claim>,
}

/// One entry of an ordered query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Claim(ScoredClaim),
    Consensus(ConsensusView),
}

impl QueryResult {
    /// The confidence the result is ordered by.
    pub fn confidence(&self) -> f64 {
        match self {
            QueryResult::Claim(s) => s.effective_confidence,
            QueryResult::Consensus(c) => c.consensus_confidence,
        }
    }

    fn issued_at(&self) -> DateTime<Utc> {
        match self {
            QueryResult::Claim(s) => s.claim.issued_at,
            QueryResult::Consensus(c) => c.issued_at,
        }
    }

    fn stable_key(&self) -> &str {
        match self {
            QueryResult::Claim(s) => &s.claim.proof.hash,
            QueryResult::Consensus(c) => c.subject.as_str(),
        }
    }
}

/// Executes trust queries against a claim graph.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    decay_factor: f64,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self {
            decay_factor: DEFAULT_DECAY_FACTOR,
        }
    }

    /// Override the per-hop decay factor. Expected to lie in (0, 1);
    /// values are clamped into [0, 1].
    pub fn with_decay_factor(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor.clamp(0.0, 1.0);
        self
    }

    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Run a query without a cancellation signal.
    pub fn run(
        &self,
        graph: &TrustGraph,
        opts: &QueryOptions,
    ) -> Result<Vec<QueryResult>, VerisError> {
        self.run_with_cancel(graph, opts, &CancelToken::new())
    }

    /// Run a query, aborting promptly with `Cancelled` if the token fires.
    /// A cancelled query never returns partial results.
    pub fn run_with_cancel(
        &self,
        graph: &TrustGraph,
        opts: &QueryOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<QueryResult>, VerisError> {
        opts.validate()?;

        let candidates = self.collect_candidates(graph, opts, cancel)?;
        debug!(candidates = candidates.len(), "query candidate selection done");

        let mut survivors: Vec<ScoredClaim> = Vec::new();
        for (claim, hop_count) in candidates {
            if cancel.is_cancelled() {
                return Err(VerisError::Cancelled);
            }
            let effective_confidence = if opts.use_trust_decay {
                claim.confidence * self.decay_factor.powi(hop_count as i32)
            } else {
                claim.confidence
            };
            if !self.matches(claim, effective_confidence, opts) {
                continue;
            }
            survivors.push(ScoredClaim {
                claim: claim.clone(),
                hop_count,
                effective_confidence,
            });
        }

        let mut results: Vec<QueryResult> = if opts.use_consensus {
            aggregate_consensus(survivors)
        } else {
            survivors.into_iter().map(QueryResult::Claim).collect()
        };

        // Descending confidence, then ascending issuance, then a stable key
        // so the full ordering is total and deterministic.
        results.sort_by(|a, b| {
            b.confidence()
                .total_cmp(&a.confidence())
                .then_with(|| a.issued_at().cmp(&b.issued_at()))
                .then_with(|| a.stable_key().cmp(b.stable_key()))
        });
        Ok(results)
    }

    /// Candidate selection: BFS from the observer, or the whole store.
    ///
    /// Each candidate carries the BFS hop distance from the observer to the
    /// edge's issuer. `depth = 0` restricts candidates to the observer's own
    /// claims; more generally an edge qualifies when its issuer sits within
    /// `max(depth - 1, 0)` hops. An observer absent from the graph yields an
    /// empty candidate set, not an error.
    fn collect_candidates<'g>(
        &self,
        graph: &'g TrustGraph,
        opts: &QueryOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<(&'g Claim, u32)>, VerisError> {
        let observer = match &opts.observer {
            Some(observer) => observer,
            None => {
                // No traversal root: every stored claim is a direct candidate.
                return Ok(graph
                    .edges()
                    .iter()
                    .filter_map(|e| graph.claim(&e.proof_hash).map(|c| (c, 0)))
                    .collect());
            }
        };
        if graph.node(observer).is_none() {
            return Ok(Vec::new());
        }

        let issuer_hop_limit = opts.depth.saturating_sub(1).max(0) as u32;
        let mut candidates = Vec::new();
        let mut visited: HashSet<&Identity> = HashSet::new();
        let mut queue: VecDeque<(&Identity, u32)> = VecDeque::new();

        visited.insert(observer);
        queue.push_back((observer, 0));

        while let Some((id, hop)) = queue.pop_front() {
            if cancel.is_cancelled() {
                return Err(VerisError::Cancelled);
            }
            let node = match graph.node(id) {
                Some(node) => node,
                None => continue,
            };
            // Outgoing edges in insertion order: first-reached hop wins and
            // ties break by edge insertion order.
            for &edge_idx in node.outgoing() {
                let edge = graph
                    .edge(edge_idx)
                    .ok_or_else(|| VerisError::NotFound(format!("edge index {}", edge_idx)))?;
                if let Some(claim) = graph.claim(&edge.proof_hash) {
                    candidates.push((claim, hop));
                }
                if hop + 1 <= issuer_hop_limit && !visited.contains(&edge.subject) {
                    if let Some((key, _)) = graph.node(&edge.subject).map(|n| (n.identity(), ())) {
                        visited.insert(key);
                        queue.push_back((key, hop + 1));
                    }
                }
            }
        }
        Ok(candidates)
    }

    /// Filtering per claim on the already-decayed effective confidence.
    fn matches(&self, claim: &Claim, effective: f64, opts: &QueryOptions) -> bool {
        if let Some(agent) = &opts.agent {
            if &claim.issuer != agent {
                return false;
            }
        }
        if let Some(subject) = &opts.subject {
            if &claim.subject != subject {
                return false;
            }
        }
        if !opts.tags.is_empty() && !opts.tags.iter().any(|t| claim.tags.iter().any(|ct| ct == t))
        {
            return false;
        }
        effective >= opts.min_confidence && effective <= opts.max_confidence
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Group survivors by subject and reduce each group to one consensus view.
fn aggregate_consensus(survivors: Vec<ScoredClaim>) -> Vec<QueryResult> {
    // BTreeMap keyed by subject keeps group enumeration deterministic
    // regardless of ingestion order.
    let mut groups: BTreeMap<Identity, Vec<ScoredClaim>> = BTreeMap::new();
    for scored in survivors {
        groups
            .entry(scored.claim.subject.clone())
            .or_default()
            .push(scored);
    }

    groups
        .into_iter()
        .map(|(subject, group)| {
            let consensus_confidence =
                group.iter().map(|s| s.effective_confidence).sum::<f64>() / group.len() as f64;
            let issued_at = group
                .iter()
                .map(|s| s.claim.issued_at)
                .min()
                .expect("consensus group is non-empty");
            let mut supporting_claims: Vec<Claim> =
                group.into_iter().map(|s| s.claim).collect();
            supporting_claims
                .sort_by(|a, b| a.issued_at.cmp(&b.issued_at).then_with(|| a.proof.hash.cmp(&b.proof.hash)));
            QueryResult::Consensus(ConsensusView {
                subject,
                consensus_confidence,
                issued_at,
                supporting_claims,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use veris_core::factory::ClaimFactory;

    fn add(graph: &mut TrustGraph, issuer: &str, subject: &str, confidence: f64, tags: &[&str]) {
        let claim = ClaimFactory::new()
            .create_claim(
                Identity::from(issuer),
                Identity::from(subject),
                format!("{} -> {}", issuer, subject),
                confidence,
                tags.iter().map(|t| t.to_string()).collect(),
            )
            .unwrap();
        graph.add_claim(claim).unwrap();
    }

    fn observer_query(observer: &str, depth: i32) -> QueryOptions {
        QueryOptions {
            observer: Some(Identity::from(observer)),
            depth,
            ..QueryOptions::default()
        }
    }

    #[test]
    fn rejects_malformed_options() {
        let graph = TrustGraph::new();
        let engine = QueryEngine::new();

        let negative_depth = QueryOptions {
            depth: -1,
            ..QueryOptions::default()
        };
        assert!(matches!(
            engine.run(&graph, &negative_depth),
            Err(VerisError::InvalidQuery(_))
        ));

        let inverted_range = QueryOptions {
            min_confidence: 0.9,
            max_confidence: 0.1,
            ..QueryOptions::default()
        };
        assert!(matches!(
            engine.run(&graph, &inverted_range),
            Err(VerisError::InvalidQuery(_))
        ));
    }

    #[test]
    fn unknown_observer_yields_empty_result() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        let results = QueryEngine::new()
            .run(&graph, &observer_query("ghost", 2))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn depth_zero_returns_only_direct_claims() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        add(&mut graph, "b", "c", 0.8, &[]);
        add(&mut graph, "c", "d", 0.8, &[]);

        let results = QueryEngine::new()
            .run(&graph, &observer_query("a", 0))
            .unwrap();
        assert_eq!(results.len(), 1);
        match &results[0] {
            QueryResult::Claim(s) => {
                assert_eq!(s.claim.issuer, Identity::from("a"));
                assert_eq!(s.hop_count, 0);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn depth_limits_traversal_reach() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        add(&mut graph, "b", "c", 0.8, &[]);

        let one_hop = QueryEngine::new()
            .run(&graph, &observer_query("a", 1))
            .unwrap();
        assert_eq!(one_hop.len(), 1);

        let two_hops = QueryEngine::new()
            .run(&graph, &observer_query("a", 2))
            .unwrap();
        assert_eq!(two_hops.len(), 2);
    }

    #[test]
    fn cycles_do_not_loop_traversal() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        add(&mut graph, "b", "a", 0.8, &[]);
        add(&mut graph, "a", "a", 0.8, &[]);

        let results = QueryEngine::new()
            .run(&graph, &observer_query("a", 10))
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn decay_is_monotonic_in_hop_distance() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        add(&mut graph, "b", "c", 0.8, &[]);
        add(&mut graph, "c", "d", 0.8, &[]);

        let opts = QueryOptions {
            use_trust_decay: true,
            ..observer_query("a", 3)
        };
        let results = QueryEngine::new().run(&graph, &opts).unwrap();
        assert_eq!(results.len(), 3);

        let mut by_hop: Vec<(u32, f64)> = results
            .iter()
            .map(|r| match r {
                QueryResult::Claim(s) => (s.hop_count, s.effective_confidence),
                other => panic!("unexpected result {:?}", other),
            })
            .collect();
        by_hop.sort_by_key(|(hop, _)| *hop);
        assert_eq!(by_hop[0].0, 0);
        assert!((by_hop[0].1 - 0.8).abs() < 1e-12);
        assert!(by_hop[1].1 < by_hop[0].1);
        assert!(by_hop[2].1 < by_hop[1].1);
        assert!((by_hop[2].1 - 0.8 * DEFAULT_DECAY_FACTOR * DEFAULT_DECAY_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn decay_never_mutates_the_stored_claim() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);

        let opts = QueryOptions {
            use_trust_decay: true,
            ..observer_query("a", 1)
        };
        QueryEngine::new().run(&graph, &opts).unwrap();
        assert!(graph
            .claims()
            .all(|c| (c.confidence - 0.8).abs() < f64::EPSILON));
    }

    #[test]
    fn filters_apply_to_effective_confidence() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);
        add(&mut graph, "b", "c", 0.8, &[]);

        // With decay, the 1-hop claim drops to 0.64 and falls below min.
        let opts = QueryOptions {
            use_trust_decay: true,
            min_confidence: 0.7,
            ..observer_query("a", 2)
        };
        let results = QueryEngine::new().run(&graph, &opts).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence(), 0.8);
    }

    #[test]
    fn agent_subject_and_tag_filters() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &["dev"]);
        add(&mut graph, "c", "b", 0.5, &["ops"]);
        add(&mut graph, "a", "d", 0.4, &["dev", "ops"]);
        let engine = QueryEngine::new();

        let by_agent = engine
            .run(
                &graph,
                &QueryOptions {
                    agent: Some(Identity::from("a")),
                    ..QueryOptions::default()
                },
            )
            .unwrap();
        assert_eq!(by_agent.len(), 2);

        let by_subject = engine
            .run(
                &graph,
                &QueryOptions {
                    subject: Some(Identity::from("b")),
                    ..QueryOptions::default()
                },
            )
            .unwrap();
        assert_eq!(by_subject.len(), 2);

        let by_tag = engine
            .run(
                &graph,
                &QueryOptions {
                    tags: vec!["ops".to_string()],
                    ..QueryOptions::default()
                },
            )
            .unwrap();
        assert_eq!(by_tag.len(), 2);
    }

    #[test]
    fn consensus_groups_by_subject_with_mean_confidence() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.9, &[]);
        add(&mut graph, "c", "b", 0.5, &[]);

        let opts = QueryOptions {
            subject: Some(Identity::from("b")),
            use_consensus: true,
            ..QueryOptions::default()
        };
        let results = QueryEngine::new().run(&graph, &opts).unwrap();
        assert_eq!(results.len(), 1);
        match &results[0] {
            QueryResult::Consensus(view) => {
                assert_eq!(view.subject, Identity::from("b"));
                assert!((view.consensus_confidence - 0.7).abs() < 1e-9);
                assert_eq!(view.supporting_claims.len(), 2);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn consensus_is_invariant_to_ingestion_order() {
        let factory = ClaimFactory::new();
        let claims: Vec<Claim> = (0..5)
            .map(|i| {
                factory
                    .create_claim(
                        Identity::new(format!("issuer{}", i)),
                        Identity::from("subject"),
                        format!("statement {}", i),
                        0.1 + 0.15 * i as f64,
                        vec![],
                    )
                    .unwrap()
            })
            .collect();

        let opts = QueryOptions {
            use_consensus: true,
            ..QueryOptions::default()
        };
        let engine = QueryEngine::new();

        let mut forward = TrustGraph::new();
        for c in claims.iter() {
            forward.add_claim(c.clone()).unwrap();
        }
        let mut reverse = TrustGraph::new();
        for c in claims.iter().rev() {
            reverse.add_claim(c.clone()).unwrap();
        }

        let a = engine.run(&forward, &opts).unwrap();
        let b = engine.run(&reverse, &opts).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        match (&a[0], &b[0]) {
            (QueryResult::Consensus(x), QueryResult::Consensus(y)) => {
                assert!((x.consensus_confidence - y.consensus_confidence).abs() < 1e-12);
                let hx: Vec<&str> =
                    x.supporting_claims.iter().map(|c| c.proof.hash.as_str()).collect();
                let hy: Vec<&str> =
                    y.supporting_claims.iter().map(|c| c.proof.hash.as_str()).collect();
                assert_eq!(hx, hy);
            }
            other => panic!("unexpected results {:?}", other),
        }
    }

    #[test]
    fn results_order_by_descending_confidence() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.3, &[]);
        add(&mut graph, "c", "d", 0.9, &[]);
        add(&mut graph, "e", "f", 0.6, &[]);

        let results = QueryEngine::new()
            .run(&graph, &QueryOptions::default())
            .unwrap();
        let confidences: Vec<f64> = results.iter().map(|r| r.confidence()).collect();
        assert_eq!(confidences, vec![0.9, 0.6, 0.3]);
    }

    #[test]
    fn cancelled_token_aborts_with_cancelled() {
        let mut graph = TrustGraph::new();
        add(&mut graph, "a", "b", 0.8, &[]);

        let token = CancelToken::new();
        token.cancel();
        let err = QueryEngine::new()
            .run_with_cancel(&graph, &observer_query("a", 2), &token)
            .unwrap_err();
        assert!(matches!(err, VerisError::Cancelled));
    }
}
