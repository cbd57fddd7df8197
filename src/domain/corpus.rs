use crate::domain::novel::Novel;
use crate::domain::ports::TextSource;
use crate::utils::error::{NovelError, Result};
use std::collections::HashMap;
use std::sync::Arc;

const REQUIRED_COLUMNS: [&str; 4] = ["author", "date", "title", "filename"];
const SAMPLE_CORPUS: &str = "sample_novels";

/// An ordered collection of novels loaded from `corpora/{name}/{name}.csv`.
#[derive(Debug)]
pub struct Corpus {
    corpus_name: String,
    novels: Vec<Novel>,
}

/// Texts of the four sample novels, in manifest order.
#[derive(Debug, Clone, Copy)]
pub struct SampleNovelTexts<'a> {
    pub austen: &'a str,
    pub dickens: &'a str,
    pub eliot: &'a str,
    pub hawthorne: &'a str,
}

impl Corpus {
    pub fn manifest_path(corpus_name: &str) -> String {
        format!("corpora/{}/{}.csv", corpus_name, corpus_name)
    }

    pub async fn load(corpus_name: &str, source: Arc<dyn TextSource>) -> Result<Self> {
        let path = Self::manifest_path(corpus_name);
        tracing::info!("Loading corpus '{}' from {}", corpus_name, source.describe());

        let manifest_error = |message: String| NovelError::ManifestError {
            path: path.clone(),
            message,
        };

        let lines = source
            .retrieve(&path)
            .await
            .map_err(|e| manifest_error(e.to_string()))?
            .into_lines();
        let manifest = lines.concat();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(manifest.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| manifest_error(format!("unreadable header row: {}", e)))?
            .clone();

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|header| header == **column))
        {
            return Err(manifest_error(format!(
                "missing required column '{}'",
                missing
            )));
        }

        let mut novels = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row_number = index + 1;
            let row =
                row.map_err(|e| manifest_error(format!("row {}: {}", row_number, e)))?;

            let mut metadata: HashMap<String, String> = headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            metadata.insert("corpus_name".to_string(), corpus_name.to_string());

            let novel = Novel::from_metadata(metadata, Arc::clone(&source))
                .map_err(|e| manifest_error(format!("row {}: {}", row_number, e)))?;
            novels.push(novel);
        }

        tracing::info!("Loaded {} novels from {}", novels.len(), path);

        Ok(Self {
            corpus_name: corpus_name.to_string(),
            novels,
        })
    }

    pub fn corpus_name(&self) -> &str {
        &self.corpus_name
    }

    pub fn novels(&self) -> &[Novel] {
        &self.novels
    }

    pub fn len(&self) -> usize {
        self.novels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.novels.is_empty()
    }

    pub fn into_novels(self) -> Vec<Novel> {
        self.novels
    }

    /// Only valid for the `sample_novels` corpus: rows 0..4 are Austen, Dickens, Eliot, Hawthorne.
    pub async fn load_sample_novels_by_authors(&self) -> Result<SampleNovelTexts<'_>> {
        if self.corpus_name != SAMPLE_CORPUS {
            return Err(NovelError::NotSampleCorpus {
                corpus_name: self.corpus_name.clone(),
            });
        }

        let [austen, dickens, eliot, hawthorne] = match &self.novels[..] {
            [a, b, c, d, ..] => [a, b, c, d],
            _ => {
                return Err(NovelError::ManifestError {
                    path: Self::manifest_path(&self.corpus_name),
                    message: format!(
                        "expected at least 4 sample novels, found {}",
                        self.novels.len()
                    ),
                })
            }
        };

        Ok(SampleNovelTexts {
            austen: austen.text().await?,
            dickens: dickens.text().await?,
            eliot: eliot.text().await?,
            hawthorne: hawthorne.text().await?,
        })
    }
}
