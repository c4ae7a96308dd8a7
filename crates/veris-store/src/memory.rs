// crates/veris-store/src/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use veris_core::claim::Claim;
use veris_core::error::VerisError;
use veris_core::traits::ClaimStore;

/// In-memory claim store, keyed by proof hash.
///
/// Useful for tests and for embedding the network without durability.
#[derive(Debug, Default)]
pub struct MemoryClaimStore {
    claims: RwLock<HashMap<String, Claim>>,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn load_all(&self) -> Result<Vec<Claim>, VerisError> {
        Ok(self.claims.read().await.values().cloned().collect())
    }

    async fn store(&self, claim: &Claim) -> Result<(), VerisError> {
        self.claims
            .write()
            .await
            .insert(claim.proof.hash.clone(), claim.clone());
        Ok(())
    }
}
