pub mod aggregate;
pub mod distance;
pub mod engine;
pub mod pipeline;
pub mod pronouns;
pub mod results;

pub use crate::domain::model::{AnalysisResults, Dimension, InstanceCategory, Metric};
pub use crate::domain::ports::{ConfigProvider, InstanceDistance, Pipeline, ResultStore, TextSource};
pub use crate::utils::error::Result;
