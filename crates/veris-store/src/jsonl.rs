// crates/veris-store/src/jsonl.rs
//
// Append-only JSON-lines claim store.
//
// One JSON-serialized claim per line. `store` appends; `load_all` reads the
// whole file and deduplicates by proof hash (rewrites of the same claim are
// permitted by the contract). The file is created on first write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use veris_core::claim::Claim;
use veris_core::error::VerisError;
use veris_core::traits::ClaimStore;

/// File-backed claim store using one JSON document per line.
#[derive(Debug)]
pub struct JsonlClaimStore {
    path: PathBuf,
    /// Serializes appends so concurrent `store` calls cannot interleave
    /// partial lines.
    write_lock: Mutex<()>,
}

impl JsonlClaimStore {
    /// Open a store at the given path. The parent directory is created if
    /// missing; the file itself is created on first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, VerisError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    VerisError::Storage(format!(
                        "failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ClaimStore for JsonlClaimStore {
    async fn load_all(&self) -> Result<Vec<Claim>, VerisError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(VerisError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut by_hash: HashMap<String, Claim> = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let claim: Claim = serde_json::from_str(line).map_err(|e| {
                VerisError::Storage(format!(
                    "malformed claim at {}:{}: {}",
                    self.path.display(),
                    lineno + 1,
                    e
                ))
            })?;
            by_hash.insert(claim.proof.hash.clone(), claim);
        }
        debug!(claims = by_hash.len(), path = %self.path.display(), "loaded claim store");
        Ok(by_hash.into_values().collect())
    }

    async fn store(&self, claim: &Claim) -> Result<(), VerisError> {
        let mut line = serde_json::to_string(claim)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                VerisError::Storage(format!("failed to open {}: {}", self.path.display(), e))
            })?;
        file.write_all(line.as_bytes()).await.map_err(|e| {
            VerisError::Storage(format!("failed to append to {}: {}", self.path.display(), e))
        })?;
        file.flush().await.map_err(|e| {
            VerisError::Storage(format!("failed to flush {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use veris_core::factory::ClaimFactory;
    use veris_core::identity::Identity;

    fn temp_store_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("veris_test_{}_{}.jsonl", label, Uuid::now_v7()))
    }

    fn claim(issuer: &str, subject: &str) -> Claim {
        ClaimFactory::new()
            .create_claim(
                Identity::from(issuer),
                Identity::from(subject),
                "trusts",
                0.7,
                vec!["t".to_string()],
            )
            .unwrap()
    }

    #[tokio::test]
    async fn load_from_missing_file_is_empty() {
        let store = JsonlClaimStore::open(temp_store_path("missing")).await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_appends_and_load_dedups() {
        let path = temp_store_path("roundtrip");
        let store = JsonlClaimStore::open(&path).await.unwrap();

        let a = claim("a", "b");
        let b = claim("b", "c");
        store.store(&a).await.unwrap();
        store.store(&b).await.unwrap();
        store.store(&a).await.unwrap(); // duplicate append

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        let hashes: std::collections::HashSet<&str> =
            loaded.iter().map(|c| c.proof.hash.as_str()).collect();
        assert!(hashes.contains(a.proof.hash.as_str()));
        assert!(hashes.contains(b.proof.hash.as_str()));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_line_is_a_storage_error() {
        let path = temp_store_path("malformed");
        tokio::fs::write(&path, "not json\n").await.unwrap();

        let store = JsonlClaimStore::open(&path).await.unwrap();
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, VerisError::Storage(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
