use crate::domain::ports::TextSource;
use crate::utils::error::{NovelError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Reads corpus files relative to a local project root.
#[derive(Debug, Clone)]
pub struct LocalTextSource {
    base_path: PathBuf,
}

impl LocalTextSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl TextSource for LocalTextSource {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(NovelError::FileNotFound {
                path: full_path.display().to_string(),
            }),
            Err(e) => Err(NovelError::IoError(e)),
        }
    }

    fn describe(&self) -> String {
        format!("local path {}", self.base_path.display())
    }
}
