use crate::adapters::local_source::LocalTextSource;
use crate::adapters::remote_source::RemoteTextSource;
use crate::domain::ports::TextSource;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How corpus files are resolved. Chosen explicitly by the caller, never sniffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    Local {
        base_path: PathBuf,
    },
    Remote {
        base_url: String,
        timeout: Option<Duration>,
    },
}

impl SourceMode {
    pub fn into_source(self) -> Result<Arc<dyn TextSource>> {
        match self {
            SourceMode::Local { base_path } => {
                tracing::debug!("Using local text source at {}", base_path.display());
                Ok(Arc::new(LocalTextSource::new(base_path)))
            }
            SourceMode::Remote { base_url, timeout } => {
                tracing::debug!("Using remote text source at {}", base_url);
                Ok(Arc::new(RemoteTextSource::new(&base_url, timeout)?))
            }
        }
    }
}
