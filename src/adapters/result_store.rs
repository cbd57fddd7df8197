use crate::domain::ports::ResultStore;
use crate::utils::error::{NovelError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persists analysis results as `{base_path}/{key}.json`.
#[derive(Debug, Clone)]
pub struct LocalResultStore {
    base_path: PathBuf,
}

impl LocalResultStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl ResultStore for LocalResultStore {
    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(NovelError::ResultNotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(NovelError::IoError(e)),
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(key)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(temp_dir.path().join("results"));

        assert!(!store.exists("raw").await.unwrap());
        store.write("raw", b"{\"a\":1}").await.unwrap();

        assert!(store.exists("raw").await.unwrap());
        assert_eq!(store.read("raw").await.unwrap(), b"{\"a\":1}");
        assert!(temp_dir.path().join("results/raw.json").exists());
    }

    #[tokio::test]
    async fn test_missing_key_is_result_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(temp_dir.path());

        let err = store.read("nothing").await.unwrap_err();
        assert!(matches!(err, NovelError::ResultNotFound { key } if key == "nothing"));
    }
}
