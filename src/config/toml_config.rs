use crate::adapters::remote_source::DEFAULT_BASE_URL;
use crate::adapters::source::SourceMode;
use crate::core::{ConfigProvider, Dimension, Metric, TextSource};
use crate::utils::error::{NovelError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub corpus: CorpusConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Local,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub mode: SourceKind,
    pub base_path: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<Dimension>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            dimensions: default_dimensions(),
        }
    }
}

fn default_metrics() -> Vec<Metric> {
    vec![Metric::Mean, Metric::Median]
}

fn default_dimensions() -> Vec<Dimension> {
    Dimension::ALL.to_vec()
}

impl AnalysisConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NovelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CORPUS_ROOT})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NovelError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_mode(&self) -> Result<SourceMode> {
        match self.source.mode {
            SourceKind::Local => Ok(SourceMode::Local {
                base_path: PathBuf::from(self.source.base_path.as_deref().unwrap_or(".")),
            }),
            SourceKind::Remote => Ok(SourceMode::Remote {
                base_url: self
                    .source
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: self.source.timeout_seconds.map(Duration::from_secs),
            }),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_corpus_name("corpus.name", &self.corpus.name)?;
        validation::validate_path("output.path", &self.output.path)?;
        reject_unresolved("output.path", &self.output.path)?;

        match self.source.mode {
            SourceKind::Local => {
                if let Some(base_path) = &self.source.base_path {
                    validation::validate_path("source.base_path", base_path)?;
                    reject_unresolved("source.base_path", base_path)?;
                }
            }
            SourceKind::Remote => {
                if let Some(base_url) = &self.source.base_url {
                    reject_unresolved("source.base_url", base_url)?;
                    validation::validate_url("source.base_url", base_url)?;
                }
                if let Some(timeout) = self.source.timeout_seconds {
                    validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
                }
            }
        }

        if self.aggregation.metrics.is_empty() {
            return Err(NovelError::InvalidConfigValue {
                field: "aggregation.metrics".to_string(),
                value: "[]".to_string(),
                reason: "At least one metric is required".to_string(),
            });
        }

        if self.aggregation.dimensions.is_empty() {
            return Err(NovelError::InvalidConfigValue {
                field: "aggregation.dimensions".to_string(),
                value: "[]".to_string(),
                reason: "At least one dimension is required".to_string(),
            });
        }

        Ok(())
    }
}

// 未設定的環境變數會原樣留下 ${VAR}
fn reject_unresolved(field: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(NovelError::InvalidConfigValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Unresolved environment variable placeholder".to_string(),
        });
    }
    Ok(())
}

impl ConfigProvider for AnalysisConfig {
    fn corpus_name(&self) -> &str {
        &self.corpus.name
    }

    fn text_source(&self) -> Result<Arc<dyn TextSource>> {
        self.source_mode()?.into_source()
    }

    fn overwrite(&self) -> bool {
        self.output.overwrite
    }

    fn metrics(&self) -> &[Metric] {
        &self.aggregation.metrics
    }

    fn dimensions(&self) -> &[Dimension] {
        &self.aggregation.dimensions
    }
}
