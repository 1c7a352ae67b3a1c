use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ProofStore, StorageError, validate_object_name};

/// Route prefix the bucket is served under
pub const PROOFS_ROUTE: &str = "/api/proofs";

/// Bucket directory on local disk
#[derive(Debug, Clone)]
pub struct LocalProofStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalProofStore {
    /// Open (creating if needed) the bucket directory
    pub async fn open(dir: impl AsRef<Path>, public_base_url: &str) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        validate_object_name(file_name)?;
        Ok(self.dir.join(file_name))
    }
}

#[async_trait]
impl ProofStore for LocalProofStore {
    async fn put(&self, file_name: &str, data: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_of(file_name)?;
        // write-then-rename so readers never see a partial file
        let tmp = self.dir.join(format!(".{file_name}.part"));
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn get(&self, file_name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_of(file_name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, file_name: &str) -> Result<bool, StorageError> {
        let path = self.path_of(file_name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}{PROOFS_ROUTE}/{file_name}", self.base_url)
    }

    fn file_name_from_url(&self, url: &str) -> Option<String> {
        let name = url
            .strip_prefix(&self.base_url)?
            .strip_prefix(PROOFS_ROUTE)?
            .strip_prefix('/')?;
        validate_object_name(name).ok()?;
        Some(name.to_string())
    }
}
