//! On-disk icon cache
//!
//! Check-then-write: an icon is downloaded only when no file for its name
//! exists yet. Entries never expire; a renamed icon is a new entry.

use super::{checked_file_name, io_error, write_atomic};
use crate::backend::Backend;
use crate::error::StorageError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct IconCache {
    dir: PathBuf,
}

impl IconCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path an icon is (or would be) cached at
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir.join(checked_file_name(name)?))
    }

    /// Cached path for `name`, if it has been downloaded before
    pub async fn cached(&self, name: &str) -> Result<Option<PathBuf>, StorageError> {
        let path = self.path_for(name)?;
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(io_error(&path))?;
        Ok(exists.then_some(path))
    }

    /// Return the cached icon path, downloading it first if needed
    pub async fn get_or_fetch(
        &self,
        name: &str,
        backend: &dyn Backend,
    ) -> Result<PathBuf, StorageError> {
        if let Some(path) = self.cached(name).await? {
            tracing::debug!("Icon '{name}' served from cache");
            return Ok(path);
        }

        let bytes = backend.fetch_icon(name).await?;
        let path = write_atomic(&self.dir, checked_file_name(name)?, &bytes).await?;
        tracing::debug!("Cached icon '{name}' ({} bytes)", bytes.len());
        Ok(path)
    }
}
