use thiserror::Error;

#[derive(Error, Debug)]
pub enum NovelError {
    #[error("Unsupported file format for '{path}'. Supported formats: .csv, .txt")]
    UnsupportedFormat { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to retrieve '{url}': {message}")]
    RetrievalError { url: String, message: String },

    #[error("Could not decode '{path}' as UTF-8: {message}")]
    Decode { path: String, message: String },

    #[error("Novel metadata must have an entry for '{field}'")]
    MissingField { field: String },

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Corpus manifest '{path}' could not be loaded: {message}")]
    ManifestError { path: String, message: String },

    #[error("Text for novel '{path}' is unavailable: {source}")]
    TextUnavailable {
        path: String,
        #[source]
        source: Box<NovelError>,
    },

    #[error("Not a valid metric name: '{metric}'. Valid names: 'median', 'mean', 'min', 'max'")]
    InvalidMetric { metric: String },

    #[error("Not a valid aggregation dimension: '{dimension}'. Valid names: 'author_gender', 'date', 'location'")]
    InvalidDimension { dimension: String },

    #[error("Sample accessor requires the 'sample_novels' corpus, got '{corpus_name}'")]
    NotSampleCorpus { corpus_name: String },

    #[error("Distance computation failed for '{filename}': {message}")]
    Distance { filename: String, message: String },

    #[error("No stored results for key '{key}'")]
    ResultNotFound { key: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Retrieval,
    Analysis,
    Persistence,
    Configuration,
}

impl NovelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NovelError::UnsupportedFormat { .. }
            | NovelError::MissingField { .. }
            | NovelError::InvalidField { .. }
            | NovelError::ManifestError { .. } => ErrorCategory::Input,
            NovelError::FileNotFound { .. }
            | NovelError::RetrievalError { .. }
            | NovelError::Decode { .. }
            | NovelError::TextUnavailable { .. }
            | NovelError::HttpError(_) => ErrorCategory::Retrieval,
            NovelError::InvalidMetric { .. }
            | NovelError::InvalidDimension { .. }
            | NovelError::NotSampleCorpus { .. }
            | NovelError::Distance { .. } => ErrorCategory::Analysis,
            NovelError::ResultNotFound { .. }
            | NovelError::IoError(_)
            | NovelError::SerializationError(_) => ErrorCategory::Persistence,
            NovelError::ConfigError { .. } | NovelError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the corpus manifest columns and the novel metadata",
            ErrorCategory::Retrieval => {
                "Check that the corpus files exist under the configured base path or URL"
            }
            ErrorCategory::Analysis => "Check the requested metric, dimension and corpus name",
            ErrorCategory::Persistence => "Check the output directory and stored result keys",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
        }
    }

    /// 是否為取檔失敗 (本地找不到或遠端取回失敗)
    pub fn is_retrieval_failure(&self) -> bool {
        matches!(
            self,
            NovelError::FileNotFound { .. }
                | NovelError::RetrievalError { .. }
                | NovelError::HttpError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NovelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_unavailable_wraps_cause() {
        let err = NovelError::TextUnavailable {
            path: "corpora/x/texts/a.txt".to_string(),
            source: Box::new(NovelError::FileNotFound {
                path: "corpora/x/texts/a.txt".to_string(),
            }),
        };

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("File not found"));
        assert_eq!(err.category(), ErrorCategory::Retrieval);
    }

    #[test]
    fn test_invalid_metric_message_names_metric() {
        let err = NovelError::InvalidMetric {
            metric: "variance".to_string(),
        };
        assert!(err.to_string().contains("'variance'"));
        assert_eq!(err.category(), ErrorCategory::Analysis);
    }
}
