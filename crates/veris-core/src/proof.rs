// crates/veris-core/src/proof.rs
//
// Deterministic content hashing for claims.
//
// The generator serializes the canonical field set to JSON (fixed struct
// field order, tags pre-sorted) and digests it with SHA3-256. The hex hash
// is both the tamper-evidence seal and the claim's primary key.

use chrono::Utc;
use serde::Serialize;
use sha3::{Digest, Sha3_256};

use crate::claim::Proof;
use crate::error::VerisError;

/// Algorithm tag recorded in every proof.
pub const PROOF_ALGORITHM: &str = "sha3-256";

/// Generates integrity proofs over canonical claim content.
#[derive(Debug, Clone, Default)]
pub struct ProofGenerator;

impl ProofGenerator {
    pub fn new() -> Self {
        ProofGenerator
    }

    /// Generate a proof for any canonically-serializable content.
    ///
    /// Deterministic: the same content always yields the same hash. Performs
    /// no I/O; the only failure mode is a serialization error.
    pub fn generate<T: Serialize>(&self, content: &T) -> Result<Proof, VerisError> {
        let bytes = serde_json::to_vec(content)?;
        Ok(Proof {
            hash: hex::encode(Sha3_256::digest(&bytes)),
            algorithm: PROOF_ALGORITHM.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Verify that a claim's content still matches its proof hash.
///
/// Integrity check only — says nothing about who issued the claim.
pub fn verify_proof<T: Serialize>(content: &T, proof: &Proof) -> Result<bool, VerisError> {
    let bytes = serde_json::to_vec(content)?;
    Ok(hex::encode(Sha3_256::digest(&bytes)) == proof.hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimContent;
    use crate::identity::Identity;

    fn content<'a>(
        issuer: &'a Identity,
        subject: &'a Identity,
        statement: &'a str,
        confidence: f64,
        tags: &'a [String],
        issued_at: chrono::DateTime<Utc>,
    ) -> ClaimContent<'a> {
        ClaimContent {
            issuer,
            subject,
            statement,
            confidence,
            tags,
            issued_at,
        }
    }

    #[test]
    fn same_content_same_hash() {
        let issuer = Identity::from("a");
        let subject = Identity::from("b");
        let tags = vec!["x".to_string()];
        let at = Utc::now();
        let gen = ProofGenerator::new();

        let c = content(&issuer, &subject, "s", 0.5, &tags, at);
        let p1 = gen.generate(&c).unwrap();
        let p2 = gen.generate(&c).unwrap();
        assert_eq!(p1.hash, p2.hash);
        assert_eq!(p1.algorithm, PROOF_ALGORITHM);
        assert_eq!(p1.hash.len(), 64);
    }

    #[test]
    fn any_field_change_changes_hash() {
        let issuer = Identity::from("a");
        let subject = Identity::from("b");
        let other = Identity::from("c");
        let tags = vec!["x".to_string()];
        let other_tags = vec!["y".to_string()];
        let at = Utc::now();
        let later = at + chrono::Duration::seconds(1);
        let gen = ProofGenerator::new();

        let base = gen
            .generate(&content(&issuer, &subject, "s", 0.5, &tags, at))
            .unwrap();

        let variants = [
            gen.generate(&content(&other, &subject, "s", 0.5, &tags, at)),
            gen.generate(&content(&issuer, &other, "s", 0.5, &tags, at)),
            gen.generate(&content(&issuer, &subject, "t", 0.5, &tags, at)),
            gen.generate(&content(&issuer, &subject, "s", 0.6, &tags, at)),
            gen.generate(&content(&issuer, &subject, "s", 0.5, &other_tags, at)),
            gen.generate(&content(&issuer, &subject, "s", 0.5, &tags, later)),
        ];
        for v in variants {
            assert_ne!(base.hash, v.unwrap().hash);
        }
    }

    #[test]
    fn verify_detects_tampering() {
        let issuer = Identity::from("a");
        let subject = Identity::from("b");
        let tags: Vec<String> = vec![];
        let at = Utc::now();
        let gen = ProofGenerator::new();

        let good = content(&issuer, &subject, "s", 0.5, &tags, at);
        let proof = gen.generate(&good).unwrap();
        assert!(verify_proof(&good, &proof).unwrap());

        let tampered = content(&issuer, &subject, "s!", 0.5, &tags, at);
        assert!(!verify_proof(&tampered, &proof).unwrap());
    }

    #[test]
    fn no_collisions_across_random_sample() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let gen = ProofGenerator::new();
        let at = Utc::now();

        let mut seen = std::collections::HashSet::new();
        for i in 0..10_000 {
            let issuer = Identity::new(format!("issuer:{}", rng.gen::<u32>()));
            let subject = Identity::new(format!("subject:{}", i));
            let statement = format!("statement {} {}", i, rng.gen::<u64>());
            let confidence = rng.gen_range(0.0..=1.0);
            let tags = vec![format!("tag{}", rng.gen_range(0..100))];
            let proof = gen
                .generate(&content(&issuer, &subject, &statement, confidence, &tags, at))
                .unwrap();
            assert!(seen.insert(proof.hash), "collision in random sample");
        }
    }
}
