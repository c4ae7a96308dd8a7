// crates/veris-core/src/factory.rs
//
// Claim construction: validate, build the envelope, seal with a proof.
//
// Construction and sealing are atomic — a claim is never observable
// unsealed. Ingestion into a graph is a separate, explicit step.

use chrono::Utc;

use crate::claim::{normalize_tags, Claim, ClaimContent};
use crate::error::VerisError;
use crate::identity::Identity;
use crate::proof::ProofGenerator;

/// Builds well-formed, proof-sealed claims.
#[derive(Debug, Clone, Default)]
pub struct ClaimFactory {
    proof_gen: ProofGenerator,
}

impl ClaimFactory {
    pub fn new() -> Self {
        Self {
            proof_gen: ProofGenerator::new(),
        }
    }

    /// Create a sealed claim.
    ///
    /// Validation:
    /// - `issuer` and `subject` must be non-empty
    /// - `statement` must be non-empty
    /// - `confidence` must lie in [0.0, 1.0] (boundaries allowed)
    ///
    /// No side effect beyond computation.
    pub fn create_claim(
        &self,
        issuer: Identity,
        subject: Identity,
        statement: impl Into<String>,
        confidence: f64,
        tags: Vec<String>,
    ) -> Result<Claim, VerisError> {
        if issuer.is_empty() {
            return Err(VerisError::InvalidStatement(
                "issuer identity must be non-empty".to_string(),
            ));
        }
        if subject.is_empty() {
            return Err(VerisError::InvalidStatement(
                "subject identity must be non-empty".to_string(),
            ));
        }
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(VerisError::InvalidStatement(
                "statement must be non-empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&confidence) || confidence.is_nan() {
            return Err(VerisError::InvalidConfidence { value: confidence });
        }

        let tags = normalize_tags(tags);
        let issued_at = Utc::now();
        let proof = self.proof_gen.generate(&ClaimContent {
            issuer: &issuer,
            subject: &subject,
            statement: &statement,
            confidence,
            tags: &tags,
            issued_at,
        })?;

        Ok(Claim {
            issuer,
            subject,
            statement,
            confidence,
            tags,
            issued_at,
            proof,
        })
    }
}
