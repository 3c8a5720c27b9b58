use crate::traits::BlobStore;
use std::collections::HashMap;
use std::sync::Mutex;
use taskboard_core::{BoardError, BoardResult};

/// In-memory blob store.
///
/// Backs tests and the no-persistence mode; contents vanish with the
/// process.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| BoardError::Internal("blob store lock poisoned".to_string()))?;
        Ok(blobs.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: &[u8]) -> BoardResult<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| BoardError::Internal("blob store lock poisoned".to_string()))?;
        blobs.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = MemoryBlobStore::new();
        assert!(store.get("k").await.unwrap().is_none());

        store.set("k", b"payload").await.unwrap();
        assert_eq!(
            store.get("k").await.unwrap().as_deref(),
            Some(b"payload".as_slice())
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_single_entry() {
        let store = MemoryBlobStore::new();
        store.set("k", b"one").await.unwrap();
        store.set("k", b"two").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("k").await.unwrap().as_deref(),
            Some(b"two".as_slice())
        );
    }
}
