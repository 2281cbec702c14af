use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::ArtifactPath;

/// Filesystem-backed artifact store for generated audio.
pub struct LocalArtifactStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalArtifactStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(&self, path: &ArtifactPath, data: Bytes) -> Result<u64, ArtifactStoreError> {
        let size = data.len() as u64;
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(size)
    }

    async fn fetch(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| ArtifactStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &ArtifactPath) -> Result<(), ArtifactStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| ArtifactStoreError::DeleteFailed(e.to_string()))
    }
}
