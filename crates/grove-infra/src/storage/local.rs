//! Local-filesystem file store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use grove_core::error::StorageError;
use grove_core::ports::FileStore;

/// File store rooted at one upload directory.
///
/// Keys are relative paths like `<post_id>/<attachment_id>`; anything that
/// would escape the root is refused.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(StorageError::Io(format!("unsafe storage key: {key:?}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(key, size = bytes.len(), "Stored file");
        Ok(())
    }

    async fn open(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;
        fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_store() -> LocalFileStore {
        let root = std::env::temp_dir().join(format!("grove-store-{}", Uuid::new_v4()));
        LocalFileStore::new(root)
    }

    #[tokio::test]
    async fn save_then_open_round_trips() {
        let store = scratch_store();

        store.save("post-1/file-1", b"hello").await.unwrap();
        assert_eq!(store.open("post-1/file-1").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn open_missing_is_not_found() {
        let store = scratch_store();

        match store.open("nowhere/nothing").await {
            Err(StorageError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_deletes_the_file() {
        let store = scratch_store();

        store.save("p/f", b"x").await.unwrap();
        store.remove("p/f").await.unwrap();
        assert!(store.open("p/f").await.is_err());
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_root() {
        let store = scratch_store();

        assert!(store.save("../evil", b"x").await.is_err());
        assert!(store.save("/etc/passwd", b"x").await.is_err());
        assert!(store.open("..").await.is_err());
    }
}
