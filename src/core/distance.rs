use crate::domain::model::{
    AnalysisFailure, AnalysisResult, AnalysisResults, InstanceCategory, NovelAnalysis, StatBundle,
};
use crate::domain::novel::Novel;
use crate::domain::ports::InstanceDistance;
use crate::utils::error::Result;

/// Median, mean, min and max of a distance sequence. All zero when empty.
pub fn get_stats(distances: &[u64]) -> StatBundle {
    if distances.is_empty() {
        return StatBundle::default();
    }

    let mut sorted = distances.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    };
    let mean = sorted.iter().map(|&d| d as f64).sum::<f64>() / n as f64;

    StatBundle {
        median,
        mean,
        min: sorted[0] as f64,
        max: sorted[n - 1] as f64,
    }
}

/// Compares instance spacing between two categories for every novel.
///
/// A positive difference means category A instances sit farther apart than category B's.
pub struct DistanceAnalyzer<D: InstanceDistance> {
    distance: D,
    category_a: InstanceCategory,
    category_b: InstanceCategory,
}

impl<D: InstanceDistance> DistanceAnalyzer<D> {
    pub fn new(distance: D) -> Self {
        Self::with_categories(distance, InstanceCategory::Male, InstanceCategory::Female)
    }

    pub fn with_categories(
        distance: D,
        category_a: InstanceCategory,
        category_b: InstanceCategory,
    ) -> Self {
        Self {
            distance,
            category_a,
            category_b,
        }
    }

    pub async fn analyze_novel(&self, novel: &Novel) -> Result<AnalysisResult> {
        let (a, b) = self
            .distance
            .distances_pair(novel, self.category_a, self.category_b)
            .await?;

        let category_a = get_stats(&a);
        let category_b = get_stats(&b);

        Ok(AnalysisResult {
            category_a,
            category_b,
            difference: category_a.difference(&category_b),
        })
    }

    /// Analyzes novels one at a time. Each novel, and its text, is dropped as soon as it is done.
    /// A failing novel is recorded in `failures` and left out of `entries`.
    pub async fn analyze(&self, corpus_name: &str, novels: Vec<Novel>) -> AnalysisResults {
        let mut results = AnalysisResults::new(corpus_name, self.category_a, self.category_b);

        for novel in novels {
            tracing::debug!("Analyzing {}", novel);
            match self.analyze_novel(&novel).await {
                Ok(result) => results.entries.push(NovelAnalysis {
                    novel: novel.into_metadata(),
                    result,
                }),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", novel.filename(), e);
                    results.failures.push(AnalysisFailure {
                        filename: novel.filename().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        results
    }
}
