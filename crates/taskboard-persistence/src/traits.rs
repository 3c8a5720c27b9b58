use async_trait::async_trait;
use taskboard_core::BoardResult;

/// Abstract key-value blob storage.
///
/// The engine treats the persistence medium as a durable map from names to
/// opaque byte blobs. Implementations handle the actual backend (file,
/// memory, browser storage behind a bridge, ...).
///
/// Failures are non-fatal to the engine: a failed `get` makes the caller
/// fall back to seed data, a failed `set` is logged and swallowed.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`. `Ok(None)` when absent.
    async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>>;

    /// Durably store `blob` under `key`, replacing any previous value.
    async fn set(&self, key: &str, blob: &[u8]) -> BoardResult<()>;
}
