// crates/veris-core/src/claim.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// A confidence-scored statement by one identity about another.
///
/// Immutable once proof-sealed: the proof hash is computed over every other
/// field, so content-identical claims carry identical proofs and the hash
/// doubles as the claim's deduplication key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Identity making the statement.
    pub issuer: Identity,
    /// Identity the statement is about.
    pub subject: Identity,
    /// The statement text.
    pub statement: String,
    /// Confidence in [0.0, 1.0]; becomes the edge weight in the graph.
    pub confidence: f64,
    /// Order-insensitive tag set, stored sorted and deduplicated.
    pub tags: Vec<String>,
    /// Issuance timestamp (UTC).
    pub issued_at: DateTime<Utc>,
    /// Integrity proof sealing the fields above.
    pub proof: Proof,
}

impl Claim {
    /// The canonical content this claim's proof was computed over.
    pub fn content(&self) -> ClaimContent<'_> {
        ClaimContent {
            issuer: &self.issuer,
            subject: &self.subject,
            statement: &self.statement,
            confidence: self.confidence,
            tags: &self.tags,
            issued_at: self.issued_at,
        }
    }
}

/// Integrity proof for a claim.
///
/// A pure function of the claim content: identical content yields an
/// identical hash (content-addressing), any field change yields a different
/// hash (tamper evidence). Not an authentication of who issued the claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Lowercase hex rendering of the 256-bit digest.
    pub hash: String,
    /// Digest algorithm tag, e.g. "sha3-256".
    pub algorithm: String,
    /// When the proof was generated.
    pub created_at: DateTime<Utc>,
}

/// Canonical field set of a claim, serialized in fixed declaration order.
///
/// Serde serializes struct fields in this exact order, so the JSON encoding
/// is deterministic as long as `tags` is sorted before hashing — the proof
/// generator enforces that. `issued_at` renders as RFC 3339 via chrono's
/// serde impl.
#[derive(Debug, Serialize)]
pub struct ClaimContent<'a> {
    pub issuer: &'a Identity,
    pub subject: &'a Identity,
    pub statement: &'a str,
    pub confidence: f64,
    pub tags: &'a [String],
    pub issued_at: DateTime<Utc>,
}

/// Normalize a tag set: trim, drop empties, sort, dedup.
///
/// Applied once at claim construction so every downstream consumer (proof
/// generator, filters, snapshot emission) sees the same ordering.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
