//! Writing downloaded reports and timesheet exports to disk

use super::{checked_file_name, write_atomic};
use crate::error::StorageError;
use std::path::{Path, PathBuf};

/// Last segment of a blob path, used as the local file name
pub fn file_name_from_path(blob_path: &str) -> &str {
    blob_path
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(blob_path)
}

/// Save `bytes` as `file_name` inside `dir`, replacing any older copy
pub async fn save_export(
    dir: &Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, StorageError> {
    let path = write_atomic(dir, checked_file_name(file_name)?, bytes).await?;
    tracing::info!("Saved export to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_path() {
        assert_eq!(file_name_from_path("reports/2026/s1.pdf"), "s1.pdf");
        assert_eq!(file_name_from_path("reports/s1.pdf/"), "s1.pdf");
        assert_eq!(file_name_from_path("plain.csv"), "plain.csv");
    }

    #[test]
    fn test_save_export_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        tokio_test::block_on(async {
            save_export(tmp.path(), "week.csv", b"old").await.unwrap();
            let path = save_export(tmp.path(), "week.csv", b"new").await.unwrap();
            assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
        });
    }

    #[test]
    fn test_save_export_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(save_export(tmp.path(), "..", b"x"));
        assert!(matches!(result, Err(StorageError::InvalidName(_))));
    }
}
