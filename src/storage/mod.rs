//! Local storage: icon cache and exported files

mod exports;
mod icon_cache;

pub use exports::{file_name_from_path, save_export};
pub use icon_cache::IconCache;

use crate::error::StorageError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Reject names that are empty, hidden, or could leave the target directory
fn checked_file_name(name: &str) -> Result<&str, StorageError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && name.len() <= 255;
    if valid {
        Ok(name)
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path: PathBuf = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

/// Write via a temp file and rename so readers never see a partial file.
/// Each call gets its own temp file, so concurrent writers of the same name
/// cannot clobber each other.
async fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
    tokio::fs::create_dir_all(dir).await.map_err(io_error(dir))?;

    let target = dir.join(file_name);
    let partial = dir.join(format!(".{file_name}.{}.part", Uuid::new_v4().simple()));
    if let Err(source) = tokio::fs::write(&partial, bytes).await {
        discard_partial(&partial).await;
        return Err(StorageError::Io {
            path: partial,
            source,
        });
    }
    if let Err(source) = tokio::fs::rename(&partial, &target).await {
        discard_partial(&partial).await;
        return Err(StorageError::Io {
            path: target,
            source,
        });
    }
    Ok(target)
}

async fn discard_partial(partial: &Path) {
    if let Err(e) = tokio::fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {e}", partial.display());
        }
    }
}
