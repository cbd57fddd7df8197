use crate::core::aggregate::Aggregator;
use crate::core::distance::DistanceAnalyzer;
use crate::core::results::{
    load_raw_results, raw_results_key, store_aggregate, store_raw_results,
};
use crate::core::{AnalysisResults, ConfigProvider, InstanceDistance, Pipeline, ResultStore};
use crate::domain::corpus::Corpus;
use crate::domain::novel::Novel;
use crate::utils::error::Result;

/// Corpus -> instance distance analysis -> stored raw and aggregated results.
pub struct DistancePipeline<S: ResultStore, C: ConfigProvider, D: InstanceDistance> {
    storage: S,
    config: C,
    analyzer: DistanceAnalyzer<D>,
}

impl<S: ResultStore, C: ConfigProvider, D: InstanceDistance> DistancePipeline<S, C, D> {
    pub fn new(storage: S, config: C, distance: D) -> Self {
        Self::with_analyzer(storage, config, DistanceAnalyzer::new(distance))
    }

    pub fn with_analyzer(storage: S, config: C, analyzer: DistanceAnalyzer<D>) -> Self {
        Self {
            storage,
            config,
            analyzer,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait::async_trait]
impl<S: ResultStore, C: ConfigProvider, D: InstanceDistance> Pipeline for DistancePipeline<S, C, D> {
    async fn extract(&self) -> Result<Vec<Novel>> {
        let source = self.config.text_source()?;
        let corpus = Corpus::load(self.config.corpus_name(), source).await?;
        Ok(corpus.into_novels())
    }

    async fn transform(&self, novels: Vec<Novel>) -> Result<AnalysisResults> {
        let results = self
            .analyzer
            .analyze(self.config.corpus_name(), novels)
            .await;

        if !results.failures.is_empty() {
            tracing::warn!(
                "⚠️ {} novels could not be analyzed and were left out",
                results.failures.len()
            );
        }
        Ok(results)
    }

    async fn load(&self, results: AnalysisResults) -> Result<Vec<String>> {
        let mut stored_keys = Vec::new();

        // 未覆蓋時，彙總必須與保留下來的原始結果一致
        let wrote = store_raw_results(&self.storage, &results, self.config.overwrite()).await?;
        let results = if wrote {
            stored_keys.push(raw_results_key(&results.corpus_name));
            results
        } else {
            load_raw_results(&self.storage, &results.corpus_name)
                .await?
                .results
        };

        for &metric in self.config.metrics() {
            for &dimension in self.config.dimensions() {
                let bins = Aggregator::aggregate(&results, dimension, metric);
                let key = store_aggregate(&self.storage, metric, dimension, &bins).await?;
                stored_keys.push(key);
            }
        }

        Ok(stored_keys)
    }
}
