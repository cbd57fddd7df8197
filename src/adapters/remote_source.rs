use crate::domain::ports::TextSource;
use crate::utils::error::{NovelError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/dhmit/gender_novels/master/";

/// Fetches corpus files from a published HTTP mirror. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct RemoteTextSource {
    base_url: Url,
    client: Client,
}

impl RemoteTextSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        // Url::join 需要結尾斜線才會保留最後一段路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| NovelError::InvalidConfigValue {
            field: "source.base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| NovelError::RetrievalError {
                url: format!("{}{}", self.base_url, path),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl TextSource for RemoteTextSource {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path)?;
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NovelError::RetrievalError {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NovelError::RetrievalError {
                url: url.to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| NovelError::RetrievalError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        format!("remote mirror {}", self.base_url)
    }
}
