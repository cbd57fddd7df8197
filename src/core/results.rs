use crate::core::aggregate::{AggregationBins, Aggregator};
use crate::domain::model::{AnalysisResults, Dimension, Metric};
use crate::domain::ports::ResultStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw analysis results as persisted, with the time they were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResults {
    pub generated_at: DateTime<Utc>,
    pub results: AnalysisResults,
}

pub fn raw_results_key(corpus_name: &str) -> String {
    format!("instance_distance_raw_analysis_{}", corpus_name)
}

pub fn aggregate_key(metric: Metric, dimension: Dimension) -> String {
    format!("instance_distance_{}_differences_by_{}", metric, dimension)
}

/// Writes raw results unless they already exist and `overwrite` is off. Returns whether it wrote.
pub async fn store_raw_results<S: ResultStore>(
    store: &S,
    results: &AnalysisResults,
    overwrite: bool,
) -> Result<bool> {
    let key = raw_results_key(&results.corpus_name);

    if !overwrite && store.exists(&key).await? {
        tracing::warn!(
            "Results already stored under '{}', keeping previous analysis (set overwrite to replace)",
            key
        );
        return Ok(false);
    }

    let stored = StoredResults {
        generated_at: Utc::now(),
        results: results.clone(),
    };
    let data = serde_json::to_vec_pretty(&stored)?;
    store.write(&key, &data).await?;
    tracing::info!("💾 Stored raw results for {} novels under '{}'", results.len(), key);
    Ok(true)
}

pub async fn load_raw_results<S: ResultStore>(store: &S, corpus_name: &str) -> Result<StoredResults> {
    let data = store.read(&raw_results_key(corpus_name)).await?;
    Ok(serde_json::from_slice(&data)?)
}

pub async fn store_aggregate<S: ResultStore>(
    store: &S,
    metric: Metric,
    dimension: Dimension,
    bins: &AggregationBins,
) -> Result<String> {
    let key = aggregate_key(metric, dimension);
    let data = serde_json::to_vec_pretty(bins)?;
    store.write(&key, &data).await?;
    tracing::debug!("Stored {} values in {} bins under '{}'", bins.total(), bins.len(), key);
    Ok(key)
}

/// Reloads stored raw results and recomputes every requested aggregation.
pub async fn analyze_raw_results<S: ResultStore>(
    store: &S,
    corpus_name: &str,
    metrics: &[Metric],
    dimensions: &[Dimension],
) -> Result<Vec<(Metric, Dimension, AggregationBins)>> {
    let stored = load_raw_results(store, corpus_name).await?;
    tracing::info!(
        "Loaded raw results for '{}' generated at {}",
        corpus_name,
        stored.generated_at
    );

    let mut aggregates = Vec::with_capacity(metrics.len() * dimensions.len());
    for &metric in metrics {
        for &dimension in dimensions {
            let bins = Aggregator::aggregate(&stored.results, dimension, metric);
            aggregates.push((metric, dimension, bins));
        }
    }
    Ok(aggregates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::result_store::LocalResultStore;
    use crate::domain::model::{
        AnalysisResult, InstanceCategory, NovelAnalysis, NovelMetadata, StatBundle,
    };
    use crate::utils::error::NovelError;
    use tempfile::TempDir;

    fn results(corpus: &str, mean_diff: f64) -> AnalysisResults {
        let mut results =
            AnalysisResults::new(corpus, InstanceCategory::Male, InstanceCategory::Female);
        results.entries.push(NovelAnalysis {
            novel: NovelMetadata {
                corpus_name: corpus.to_string(),
                filename: "a.txt".to_string(),
                author: "A".to_string(),
                date: 1845,
                title: "T".to_string(),
                country_publication: Some("Scotland".to_string()),
                author_gender: Some("male".to_string()),
                notes: None,
            },
            result: AnalysisResult {
                category_a: StatBundle::default(),
                category_b: StatBundle::default(),
                difference: StatBundle {
                    mean: mean_diff,
                    ..StatBundle::default()
                },
            },
        });
        results
    }

    #[test]
    fn test_keys() {
        assert_eq!(raw_results_key("gutenberg"), "instance_distance_raw_analysis_gutenberg");
        assert_eq!(
            aggregate_key(Metric::Mean, Dimension::AuthorGender),
            "instance_distance_mean_differences_by_author_gender"
        );
    }

    #[tokio::test]
    async fn test_existing_results_are_kept_without_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(temp_dir.path());

        assert!(store_raw_results(&store, &results("demo", 1.0), false).await.unwrap());
        assert!(!store_raw_results(&store, &results("demo", 2.0), false).await.unwrap());
        let kept = load_raw_results(&store, "demo").await.unwrap();
        assert_eq!(kept.results.entries[0].result.difference.mean, 1.0);

        assert!(store_raw_results(&store, &results("demo", 2.0), true).await.unwrap());
        let replaced = load_raw_results(&store, "demo").await.unwrap();
        assert_eq!(replaced.results.entries[0].result.difference.mean, 2.0);
    }

    #[tokio::test]
    async fn test_analyze_raw_results_without_stored_data() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(temp_dir.path());

        let err = analyze_raw_results(&store, "demo", &[Metric::Mean], &[Dimension::Date])
            .await
            .unwrap_err();
        assert!(matches!(err, NovelError::ResultNotFound { .. }));
    }

    #[tokio::test]
    async fn test_analyze_raw_results_recomputes_bins() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(temp_dir.path());
        store_raw_results(&store, &results("demo", 2.5), false).await.unwrap();

        let aggregates = analyze_raw_results(
            &store,
            "demo",
            &[Metric::Mean, Metric::Median],
            &[Dimension::Location, Dimension::Date],
        )
        .await
        .unwrap();

        assert_eq!(aggregates.len(), 4);
        let (metric, dimension, bins) = &aggregates[0];
        assert_eq!((*metric, *dimension), (Metric::Mean, Dimension::Location));
        assert_eq!(bins.get("UK").unwrap(), &[2.5]);

        let (_, _, by_date) = &aggregates[1];
        assert_eq!(by_date.get("date_1840_to_1849").unwrap(), &[2.5]);
    }
}
