use crate::domain::model::{AnalysisResults, Dimension, InstanceCategory, Metric};
use crate::domain::novel::Novel;
use crate::utils::error::{NovelError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Csv,
    Txt,
}

impl ContentFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Ok(ContentFormat::Csv),
            Some("txt") => Ok(ContentFormat::Txt),
            _ => Err(NovelError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }

    /// csv 逐行回傳 (保留換行符)，txt 整份回傳
    pub fn decode(self, path: &str, bytes: Vec<u8>) -> Result<Content> {
        let text = String::from_utf8(bytes).map_err(|e| NovelError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Ok(match self {
            ContentFormat::Csv => {
                Content::Lines(text.split_inclusive('\n').map(str::to_string).collect())
            }
            ContentFormat::Txt => Content::Document(text),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Lines(Vec<String>),
    Document(String),
}

impl Content {
    pub fn into_document(self) -> String {
        match self {
            Content::Document(text) => text,
            Content::Lines(lines) => lines.concat(),
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        match self {
            Content::Lines(lines) => lines,
            Content::Document(text) => text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }
}

/// Resolves logical corpus paths (e.g. `corpora/x/x.csv`) to raw content.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    fn describe(&self) -> String;

    async fn retrieve(&self, path: &str) -> Result<Content> {
        let format = ContentFormat::from_path(path)?;
        tracing::debug!("Loading {} from {}", path, self.describe());
        let bytes = self.read(path).await?;
        format.decode(path, bytes)
    }
}

/// Produces token-position gaps between consecutive instances of a category.
#[async_trait]
pub trait InstanceDistance: Send + Sync {
    async fn distances(&self, novel: &Novel, category: InstanceCategory) -> Result<Vec<u64>>;

    /// Distances for two categories from one pass over the novel.
    async fn distances_pair(
        &self,
        novel: &Novel,
        a: InstanceCategory,
        b: InstanceCategory,
    ) -> Result<(Vec<u64>, Vec<u64>)> {
        let first = self.distances(novel, a).await?;
        let second = self.distances(novel, b).await?;
        Ok((first, second))
    }
}

pub trait ResultStore: Send + Sync {
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write(&self, key: &str, data: &[u8])
        -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, key: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn corpus_name(&self) -> &str;
    fn text_source(&self) -> Result<Arc<dyn TextSource>>;
    fn overwrite(&self) -> bool;
    fn metrics(&self) -> &[Metric];
    fn dimensions(&self) -> &[Dimension];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Novel>>;
    async fn transform(&self, novels: Vec<Novel>) -> Result<AnalysisResults>;
    async fn load(&self, results: AnalysisResults) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ContentFormat::from_path("corpora/a/a.csv").unwrap(), ContentFormat::Csv);
        assert_eq!(
            ContentFormat::from_path("corpora/a/texts/b.txt").unwrap(),
            ContentFormat::Txt
        );
        assert!(matches!(
            ContentFormat::from_path("corpora/a/a.json"),
            Err(NovelError::UnsupportedFormat { .. })
        ));
        assert!(ContentFormat::from_path("corpora/a/README").is_err());
    }

    #[test]
    fn test_csv_decodes_to_lines() {
        let content = ContentFormat::Csv
            .decode("a.csv", b"author,date\nAusten,1818\nEliot,1871".to_vec())
            .unwrap();
        assert_eq!(
            content,
            Content::Lines(vec![
                "author,date\n".to_string(),
                "Austen,1818\n".to_string(),
                "Eliot,1871".to_string(),
            ])
        );
    }

    #[test]
    fn test_txt_decodes_to_document() {
        let content = ContentFormat::Txt
            .decode("a.txt", b"line one\nline two\n".to_vec())
            .unwrap();
        assert_eq!(content.into_document(), "line one\nline two\n");
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let err = ContentFormat::Txt.decode("a.txt", vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, NovelError::Decode { .. }));
    }
}
