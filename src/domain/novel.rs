use crate::domain::model::NovelMetadata;
use crate::domain::ports::TextSource;
use crate::utils::error::{NovelError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

const GUTENBERG_START: &str = "*** START OF THIS PROJECT GUTENBERG EBOOK";
const GUTENBERG_END: &str = "*** END OF THIS PROJECT GUTENBERG EBOOK";
const MARKER: &str = "***";

const REQUIRED_FIELDS: [&str; 5] = ["author", "date", "title", "corpus_name", "filename"];

/// A single novel: fixed metadata plus a lazily loaded, cleaned full text.
pub struct Novel {
    metadata: NovelMetadata,
    text: OnceCell<String>,
    source: Arc<dyn TextSource>,
}

impl Novel {
    /// Builds a novel from a flat metadata record.
    ///
    /// Required keys are `author`, `date`, `title`, `corpus_name` and `filename`.
    /// A `text` key pre-fills the text cache, so nothing is retrieved or stripped.
    pub fn from_metadata(
        mut record: HashMap<String, String>,
        source: Arc<dyn TextSource>,
    ) -> Result<Self> {
        for field in REQUIRED_FIELDS {
            if !record.contains_key(field) {
                return Err(NovelError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        let raw_date = take_required(&mut record, "date");
        let date = raw_date
            .trim()
            .parse::<i32>()
            .map_err(|e| NovelError::InvalidField {
                field: "date".to_string(),
                value: raw_date.clone(),
                reason: e.to_string(),
            })?;

        let metadata = NovelMetadata {
            author: take_required(&mut record, "author"),
            date,
            title: take_required(&mut record, "title"),
            corpus_name: take_required(&mut record, "corpus_name"),
            filename: take_required(&mut record, "filename"),
            country_publication: take_optional(&mut record, "country_publication"),
            author_gender: take_optional(&mut record, "author_gender"),
            notes: take_optional(&mut record, "notes"),
        };

        let text = match record.remove("text") {
            Some(text) => OnceCell::new_with(Some(text)),
            None => OnceCell::new(),
        };

        if !record.is_empty() {
            let mut ignored: Vec<&str> = record.keys().map(String::as_str).collect();
            ignored.sort_unstable();
            tracing::debug!(
                "Ignoring unrecognized metadata keys for {}: {}",
                metadata.filename,
                ignored.join(", ")
            );
        }

        Ok(Self {
            metadata,
            text,
            source,
        })
    }

    pub fn metadata(&self) -> &NovelMetadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> NovelMetadata {
        self.metadata
    }

    pub fn filename(&self) -> &str {
        &self.metadata.filename
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn date(&self) -> i32 {
        self.metadata.date
    }

    /// `corpora/{corpus_name}/texts/{filename}`
    pub fn text_path(&self) -> String {
        format!(
            "corpora/{}/texts/{}",
            self.metadata.corpus_name, self.metadata.filename
        )
    }

    /// Full text with Gutenberg boilerplate removed. Loaded on first call and cached.
    pub async fn text(&self) -> Result<&str> {
        let text = self
            .text
            .get_or_try_init(|| async {
                let path = self.text_path();
                let content = self.source.retrieve(&path).await.map_err(|e| {
                    if e.is_retrieval_failure() {
                        NovelError::TextUnavailable {
                            path: path.clone(),
                            source: Box::new(e),
                        }
                    } else {
                        e
                    }
                })?;
                let raw = content.into_document();
                Ok::<_, NovelError>(strip_gutenberg_boilerplate(&raw).to_string())
            })
            .await?;
        Ok(text.as_str())
    }

    pub fn is_text_loaded(&self) -> bool {
        self.text.initialized()
    }

    /// Lowercased, punctuation-free, whitespace-split tokens. Recomputed on every call.
    pub async fn tokenized_text(&self) -> Result<Vec<String>> {
        Ok(tokenize(self.text().await?))
    }
}

impl fmt::Debug for Novel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Novel")
            .field("metadata", &self.metadata)
            .field("text_loaded", &self.is_text_loaded())
            .field("source", &self.source.describe())
            .finish()
    }
}

impl fmt::Display for Novel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({})",
            self.metadata.title, self.metadata.author, self.metadata.date
        )
    }
}

fn take_required(record: &mut HashMap<String, String>, key: &str) -> String {
    record.remove(key).unwrap_or_default()
}

// 空字串視為未提供
fn take_optional(record: &mut HashMap<String, String>, key: &str) -> Option<String> {
    record.remove(key).filter(|value| !value.trim().is_empty())
}

/// Removes Project Gutenberg front and back matter.
///
/// The body starts after the first `***` found at least five characters past the
/// start marker and ends right before the end marker. Text without a start marker
/// is returned unchanged. A missing end marker keeps everything to the end of the text.
pub fn strip_gutenberg_boilerplate(text: &str) -> &str {
    let Some(intro) = text.find(GUTENBERG_START) else {
        return text;
    };

    let search_from = intro + 5;
    let body_start = match text[search_from..].find(MARKER) {
        Some(offset) => search_from + offset + MARKER.len(),
        None => intro + GUTENBERG_START.len(),
    };

    let body_end = text.find(GUTENBERG_END).unwrap_or(text.len());
    if body_end <= body_start {
        return "";
    }

    &text[body_start..body_end]
}

pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase();

    cleaned.split_whitespace().map(str::to_string).collect()
}
