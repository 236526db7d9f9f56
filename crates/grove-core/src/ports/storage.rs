//! File store port.

use async_trait::async_trait;

use crate::error::StorageError;

/// Scoped file-save collaborator for attachment bytes.
///
/// Paths are opaque relative keys (see `FileAttachment::storage_path`);
/// the adapter decides where they land on disk.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;

    async fn open(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}
