// crates/veris-graph/src/graph.rs
//
// The in-memory claim graph: one node per identity, one directed edge per
// claim, edge weight = claim confidence.
//
// The claim store (proof hash -> Claim) is the source of truth; nodes and
// edges are a derived index over it, rebuildable from the store alone.
// Parallel edges between the same pair are allowed and never merged.

use std::collections::HashMap;

use tracing::{debug, info};

use veris_core::claim::Claim;
use veris_core::error::VerisError;
use veris_core::identity::{Identity, NodePayload};
use veris_core::lifecycle::{LifecycleEvent, LifecycleTracker};
use veris_core::proof::verify_proof;

/// A graph node for one identity.
#[derive(Debug, Clone)]
pub struct Node {
    pub payload: NodePayload,
    pub lifecycle: LifecycleTracker,
    /// Indices into the edge list, in insertion order.
    outgoing: Vec<usize>,
    incoming: Vec<usize>,
}

impl Node {
    fn new(id: Identity) -> Self {
        Self {
            payload: NodePayload::Identity { id },
            lifecycle: LifecycleTracker::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn identity(&self) -> &Identity {
        self.payload.identity()
    }

    /// Outgoing edge indices in insertion order.
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[usize] {
        &self.incoming
    }
}

/// A directed trust edge: issuer -> subject, weighted by claim confidence.
///
/// Back-references the originating claim by proof hash.
#[derive(Debug, Clone)]
pub struct Edge {
    pub issuer: Identity,
    pub subject: Identity,
    pub weight: f64,
    pub proof_hash: String,
}

/// Result of an `add_claim` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The claim was new and an edge was created.
    Added,
    /// A claim with the same proof hash already existed; nothing changed.
    Existing,
}

impl AddOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// The claim graph and its backing claim store.
#[derive(Debug, Default)]
pub struct TrustGraph {
    nodes: HashMap<Identity, Node>,
    edges: Vec<Edge>,
    /// Source of truth: proof hash -> claim.
    claims: HashMap<String, Claim>,
}

impl TrustGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a sealed claim.
    ///
    /// Idempotent on proof hash: re-adding an existing claim changes
    /// nothing and reports `Existing`. A failed validation creates no node
    /// and no edge. Structural checks re-run here because claims may arrive
    /// from persistence rather than the factory.
    pub fn add_claim(&mut self, claim: Claim) -> Result<AddOutcome, VerisError> {
        let mut ingestion = LifecycleTracker::new();

        if let Err(e) = self.check_claim(&claim) {
            let _ = ingestion.fail(e.to_string());
            return Err(e);
        }
        ingestion.apply(LifecycleEvent::Validate)?;

        if self.claims.contains_key(&claim.proof.hash) {
            debug!(proof = %claim.proof.hash, "claim already present, ingestion is a no-op");
            return Ok(AddOutcome::Existing);
        }
        ingestion.apply(LifecycleEvent::Process)?;

        self.ensure_node(claim.issuer.clone());
        self.ensure_node(claim.subject.clone());

        let edge_idx = self.edges.len();
        self.edges.push(Edge {
            issuer: claim.issuer.clone(),
            subject: claim.subject.clone(),
            weight: claim.confidence,
            proof_hash: claim.proof.hash.clone(),
        });
        // Index both directions so traversal works from either role.
        if let Some(node) = self.nodes.get_mut(&claim.issuer) {
            node.outgoing.push(edge_idx);
        }
        if let Some(node) = self.nodes.get_mut(&claim.subject) {
            node.incoming.push(edge_idx);
        }

        info!(
            issuer = %claim.issuer,
            subject = %claim.subject,
            confidence = claim.confidence,
            proof = %claim.proof.hash,
            "claim added to trust graph"
        );
        self.claims.insert(claim.proof.hash.clone(), claim);
        ingestion.apply(LifecycleEvent::Complete)?;
        Ok(AddOutcome::Added)
    }

    /// Structural and integrity checks applied before any mutation.
    fn check_claim(&self, claim: &Claim) -> Result<(), VerisError> {
        if claim.issuer.is_empty() {
            return Err(VerisError::InvalidStatement(
                "issuer identity must be non-empty".to_string(),
            ));
        }
        if claim.subject.is_empty() {
            return Err(VerisError::InvalidStatement(
                "subject identity must be non-empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&claim.confidence) || claim.confidence.is_nan() {
            return Err(VerisError::InvalidConfidence {
                value: claim.confidence,
            });
        }
        if !verify_proof(&claim.content(), &claim.proof)? {
            return Err(VerisError::InvalidStatement(format!(
                "claim content does not match proof {}",
                claim.proof.hash
            )));
        }
        Ok(())
    }

    /// Look up or create the node for an identity. Idempotent: an existing
    /// identity is left untouched.
    fn ensure_node(&mut self, id: Identity) {
        if self.nodes.contains_key(&id) {
            return;
        }
        let mut node = Node::new(id.clone());
        // A node only exists because a structurally valid claim referenced
        // it, so it settles immediately: validate -> process -> complete.
        let settled = node
            .lifecycle
            .apply(LifecycleEvent::Validate)
            .and_then(|_| node.lifecycle.apply(LifecycleEvent::Process))
            .and_then(|_| node.lifecycle.apply(LifecycleEvent::Complete));
        debug_assert!(settled.is_ok());
        self.nodes.insert(id, node);
    }

    pub fn node(&self, id: &Identity) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, idx: usize) -> Option<&Edge> {
        self.edges.get(idx)
    }

    pub fn claim(&self, proof_hash: &str) -> Option<&Claim> {
        self.claims.get(proof_hash)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All claims, in unspecified order. Callers emitting output must sort
    /// by a stable key (see snapshot/render).
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// All identities, sorted for deterministic enumeration.
    pub fn identities(&self) -> Vec<&Identity> {
        let mut ids: Vec<&Identity> = self.nodes.keys().collect();
        ids.sort();
        ids
    }

    /// Claims where `id` appears as issuer or subject, sorted by proof hash.
    pub fn claims_about(&self, id: &Identity) -> Vec<&Claim> {
        let mut hashes: Vec<&str> = match self.nodes.get(id) {
            Some(node) => node
                .outgoing
                .iter()
                .chain(node.incoming.iter())
                .map(|&i| self.edges[i].proof_hash.as_str())
                .collect(),
            None => return Vec::new(),
        };
        hashes.sort();
        hashes.dedup();
        hashes.iter().filter_map(|h| self.claims.get(*h)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }
}
