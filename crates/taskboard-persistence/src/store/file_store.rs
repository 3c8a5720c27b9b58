use crate::traits::BlobStore;
use std::path::{Path, PathBuf};
use taskboard_core::{BoardError, BoardResult};
use tokio::fs;

/// File-backed blob store: one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> BoardResult<PathBuf> {
        // Keys are storage names, not paths; anything that could escape the
        // directory is rejected.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(BoardError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Write via temp-file-then-rename so a crash mid-write never leaves a
/// truncated blob behind.
async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp = tempfile::NamedTempFile::new_in(parent)?;
    let temp_path = temp.path().to_path_buf();

    fs::write(&temp_path, data).await?;
    fs::rename(&temp_path, path).await?;

    tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

#[async_trait::async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, blob: &[u8]) -> BoardResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;
        write_atomic(&path, blob).await?;
        tracing::info!("Saved {} bytes to {}", blob.len(), path.display());
        Ok(())
    }
}
