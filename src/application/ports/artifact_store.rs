use bytes::Bytes;

use crate::domain::ArtifactPath;

#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn store(&self, path: &ArtifactPath, data: Bytes) -> Result<u64, ArtifactStoreError>;

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn delete(&self, path: &ArtifactPath) -> Result<(), ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}
