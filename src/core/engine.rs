use crate::core::Pipeline;
use crate::domain::model::AnalysisFailure;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub novels_loaded: usize,
    pub novels_analyzed: usize,
    pub failures: Vec<AnalysisFailure>,
    pub stored_keys: Vec<String>,
}

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting instance distance analysis...");

        // Extract
        tracing::info!("📚 Loading corpus...");
        let novels = self.pipeline.extract().await?;
        let novels_loaded = novels.len();
        tracing::info!("Loaded {} novels", novels_loaded);

        // Transform
        tracing::info!("🔬 Running distance analysis...");
        let results = self.pipeline.transform(novels).await?;
        let novels_analyzed = results.len();
        let failures = results.failures.clone();
        tracing::info!(
            "Analyzed {} of {} novels",
            novels_analyzed,
            novels_loaded
        );

        // Load
        tracing::info!("💾 Storing results...");
        let stored_keys = self.pipeline.load(results).await?;
        tracing::info!("Stored {} result sets", stored_keys.len());

        Ok(RunSummary {
            novels_loaded,
            novels_analyzed,
            failures,
            stored_keys,
        })
    }
}
