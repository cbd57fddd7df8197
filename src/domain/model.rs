use crate::utils::error::NovelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 小說的中繼資料，不含全文
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NovelMetadata {
    pub corpus_name: String,
    pub filename: String,
    pub author: String,
    pub date: i32,
    pub title: String,
    pub country_publication: Option<String>,
    pub author_gender: Option<String>,
    pub notes: Option<String>,
}

/// Which class of token instances a distance sequence was measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceCategory {
    Male,
    Female,
    Any,
}

impl fmt::Display for InstanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstanceCategory::Male => "male",
            InstanceCategory::Female => "female",
            InstanceCategory::Any => "any",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Median,
    Mean,
    Min,
    Max,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Median, Metric::Mean, Metric::Min, Metric::Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Median => "median",
            Metric::Mean => "mean",
            Metric::Min => "min",
            Metric::Max => "max",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = NovelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(Metric::Median),
            "mean" => Ok(Metric::Mean),
            "min" => Ok(Metric::Min),
            "max" => Ok(Metric::Max),
            other => Err(NovelError::InvalidMetric {
                metric: other.to_string(),
            }),
        }
    }
}

/// Binning dimension used to regroup per-novel differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    AuthorGender,
    Date,
    Location,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::AuthorGender, Dimension::Date, Dimension::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::AuthorGender => "author_gender",
            Dimension::Date => "date",
            Dimension::Location => "location",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = NovelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "author_gender" => Ok(Dimension::AuthorGender),
            "date" => Ok(Dimension::Date),
            "location" => Ok(Dimension::Location),
            other => Err(NovelError::InvalidDimension {
                dimension: other.to_string(),
            }),
        }
    }
}

/// Four-number summary of a distance sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBundle {
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl StatBundle {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Median => self.median,
            Metric::Mean => self.mean,
            Metric::Min => self.min,
            Metric::Max => self.max,
        }
    }

    /// `self - other` for every statistic.
    pub fn difference(&self, other: &StatBundle) -> StatBundle {
        StatBundle {
            median: self.median - other.median,
            mean: self.mean - other.mean,
            min: self.min - other.min,
            max: self.max - other.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category_a: StatBundle,
    pub category_b: StatBundle,
    pub difference: StatBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelAnalysis {
    pub novel: NovelMetadata,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub filename: String,
    pub message: String,
}

/// Per-novel analysis output for one corpus run, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub corpus_name: String,
    pub category_a: InstanceCategory,
    pub category_b: InstanceCategory,
    pub entries: Vec<NovelAnalysis>,
    pub failures: Vec<AnalysisFailure>,
}

impl AnalysisResults {
    pub fn new(
        corpus_name: impl Into<String>,
        category_a: InstanceCategory,
        category_b: InstanceCategory,
    ) -> Self {
        Self {
            corpus_name: corpus_name.into(),
            category_a,
            category_b,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, filename: &str) -> Option<&AnalysisResult> {
        self.entries
            .iter()
            .find(|entry| entry.novel.filename == filename)
            .map(|entry| &entry.result)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NovelAnalysis> {
        self.entries.iter()
    }
}
