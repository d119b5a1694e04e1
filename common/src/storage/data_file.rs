// Shared trending data file
//
// The producer's workload writes this file and the API reads it on every
// request. Neither side interprets the JSON it contains.

use crate::errors::DataFileError;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::instrument;

/// Handle to the shared JSON file. Holds no cached content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file from scratch.
    ///
    /// There is no locking against a concurrent writer, so a read racing the
    /// workload can observe a truncated file and fail with `InvalidJson`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Value, DataFileError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DataFileError::NotFound(self.path.clone())
            } else {
                DataFileError::Read {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| DataFileError::InvalidJson {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Last modification time, or `None` if the file is absent or the
    /// platform does not report it
    pub async fn modified(&self) -> Option<SystemTime> {
        tokio::fs::metadata(&self.path)
            .await
            .and_then(|meta| meta.modified())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_returns_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_trending_repos.json");
        tokio::fs::write(&path, r#"{"repos": [{"name": "foo", "stars": 10}]}"#)
            .await
            .unwrap();

        let value = DataFile::new(&path).load().await.unwrap();
        assert_eq!(value, json!({"repos": [{"name": "foo", "stars": 10}]}));
    }

    #[tokio::test]
    async fn test_load_accepts_top_level_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, r#"[{"name": "bar", "forks": 3}]"#)
            .await
            .unwrap();

        let value = DataFile::new(&path).load().await.unwrap();
        assert_eq!(value, json!([{"name": "bar", "forks": 3}]));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = DataFile::new(dir.path().join("absent.json"));

        let err = file.load().await.unwrap_err();
        assert!(matches!(err, DataFileError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_truncated_file_is_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, r#"{"repos": [{"name": "fo"#)
            .await
            .unwrap();

        let err = DataFile::new(&path).load().await.unwrap_err();
        assert!(matches!(err, DataFileError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = DataFile::new(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, DataFileError::Read { .. }));
    }

    #[tokio::test]
    async fn test_each_load_sees_latest_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let file = DataFile::new(&path);

        tokio::fs::write(&path, "[1]").await.unwrap();
        assert_eq!(file.load().await.unwrap(), json!([1]));

        tokio::fs::write(&path, "[2]").await.unwrap();
        assert_eq!(file.load().await.unwrap(), json!([2]));
    }

    #[tokio::test]
    async fn test_modified_is_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = DataFile::new(dir.path().join("absent.json"));
        assert!(file.modified().await.is_none());

        tokio::fs::write(file.path(), "{}").await.unwrap();
        assert!(file.modified().await.is_some());
    }
}
