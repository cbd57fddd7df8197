pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalResultStore, LocalTextSource, RemoteTextSource, SourceMode};
pub use config::AnalysisConfig;
pub use crate::core::{
    aggregate::{AggregationBins, Aggregator},
    distance::{get_stats, DistanceAnalyzer},
    engine::{AnalysisEngine, RunSummary},
    pipeline::DistancePipeline,
    pronouns::PronounDistance,
};
pub use domain::{corpus::Corpus, novel::Novel};
pub use utils::error::{NovelError, Result};
