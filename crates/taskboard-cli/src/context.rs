use std::path::Path;
use taskboard_core::BoardResult;
use taskboard_domain::seed_tasks;
use taskboard_engine::TaskRepository;
use taskboard_persistence::{encode_tasks, BlobStore, FileBlobStore};

/// One-shot CLI state: the repository plus the store it persists to.
///
/// Unlike a long-lived host, the CLI saves explicitly after each mutation
/// instead of relying on the fire-and-forget mirror, so the process can
/// exit as soon as the write completes.
pub struct CliContext {
    pub repository: TaskRepository,
    store: FileBlobStore,
    key: String,
}

impl CliContext {
    pub async fn load(dir: &Path, key: &str) -> Self {
        let store = FileBlobStore::new(dir);
        let repository = TaskRepository::load(&store, key, seed_tasks()).await;
        Self {
            repository,
            store,
            key: key.to_string(),
        }
    }

    pub async fn save(&self) -> BoardResult<()> {
        let bytes = encode_tasks(self.repository.tasks())?;
        self.store.set(&self.key, &bytes).await
    }
}
