use crate::domain::model::{AnalysisResults, Dimension, Metric, NovelMetadata};
use crate::utils::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};

const UK_COUNTRIES: [&str; 4] = ["United Kingdom", "England", "Scotland", "Wales"];

const DATE_BINS: [(i32, &str); 10] = [
    (1810, "date_to_1810"),
    (1820, "date_1810_to_1819"),
    (1830, "date_1820_to_1829"),
    (1840, "date_1830_to_1839"),
    (1850, "date_1840_to_1849"),
    (1860, "date_1850_to_1859"),
    (1870, "date_1860_to_1869"),
    (1880, "date_1870_to_1879"),
    (1890, "date_1880_to_1889"),
    (1900, "date_1890_to_1899"),
];
const DATE_LAST_BIN: &str = "date_1900_on";

/// Ordered bin label -> difference values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationBins {
    bins: Vec<(String, Vec<f64>)>,
}

impl AggregationBins {
    fn with_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            bins: labels
                .into_iter()
                .map(|label| (label.to_string(), Vec::new()))
                .collect(),
        }
    }

    fn push(&mut self, label: &str, value: f64) {
        if let Some((_, values)) = self.bins.iter_mut().find(|(l, _)| l == label) {
            values.push(value);
        }
    }

    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.bins
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, values)| values.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bins.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.bins
            .iter()
            .map(|(label, values)| (label.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of values across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|(_, values)| values.len()).sum()
    }
}

impl Serialize for AggregationBins {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bins.len()))?;
        for (label, values) in &self.bins {
            map.serialize_entry(label, values)?;
        }
        map.end()
    }
}

/// Regroups per-novel differences by a metadata dimension.
pub struct Aggregator;

impl Aggregator {
    /// `male` for author_gender == "male", `female` for everything else (including missing).
    pub fn by_author_gender(results: &AnalysisResults, metric: &str) -> Result<AggregationBins> {
        Ok(Self::aggregate(results, Dimension::AuthorGender, metric.parse()?))
    }

    /// Decade bins from `date_to_1810` through `date_1900_on`.
    pub fn by_date(results: &AnalysisResults, metric: &str) -> Result<AggregationBins> {
        Ok(Self::aggregate(results, Dimension::Date, metric.parse()?))
    }

    /// `UK`, `US` or `other` by country of publication.
    pub fn by_location(results: &AnalysisResults, metric: &str) -> Result<AggregationBins> {
        Ok(Self::aggregate(results, Dimension::Location, metric.parse()?))
    }

    pub fn aggregate(
        results: &AnalysisResults,
        dimension: Dimension,
        metric: Metric,
    ) -> AggregationBins {
        match dimension {
            Dimension::AuthorGender => {
                Self::collect(results, metric, ["male", "female"], gender_bin)
            }
            Dimension::Date => {
                let labels = DATE_BINS
                    .iter()
                    .map(|(_, label)| *label)
                    .chain([DATE_LAST_BIN]);
                Self::collect(results, metric, labels, date_bin)
            }
            Dimension::Location => {
                Self::collect(results, metric, ["UK", "US", "other"], location_bin)
            }
        }
    }

    fn collect<'a>(
        results: &AnalysisResults,
        metric: Metric,
        labels: impl IntoIterator<Item = &'a str>,
        assign: fn(&NovelMetadata) -> &'static str,
    ) -> AggregationBins {
        let mut bins = AggregationBins::with_labels(labels);
        for entry in results.iter() {
            bins.push(assign(&entry.novel), entry.result.difference.get(metric));
        }
        bins
    }
}

fn gender_bin(novel: &NovelMetadata) -> &'static str {
    match novel.author_gender.as_deref() {
        Some("male") => "male",
        _ => "female",
    }
}

fn date_bin(novel: &NovelMetadata) -> &'static str {
    DATE_BINS
        .iter()
        .find(|(upper, _)| novel.date < *upper)
        .map(|(_, label)| *label)
        .unwrap_or(DATE_LAST_BIN)
}

fn location_bin(novel: &NovelMetadata) -> &'static str {
    match novel.country_publication.as_deref() {
        Some(country) if UK_COUNTRIES.contains(&country) => "UK",
        Some("United States") => "US",
        _ => "other",
    }
}
