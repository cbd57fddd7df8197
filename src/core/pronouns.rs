use crate::domain::model::InstanceCategory;
use crate::domain::novel::Novel;
use crate::domain::ports::InstanceDistance;
use crate::utils::error::Result;
use async_trait::async_trait;

const MALE_PRONOUNS: [&str; 4] = ["he", "him", "his", "himself"];
const FEMALE_PRONOUNS: [&str; 4] = ["she", "her", "hers", "herself"];

/// Gaps, in token positions, between consecutive gendered pronouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounDistance;

impl PronounDistance {
    pub fn new() -> Self {
        Self
    }

    fn matches(category: InstanceCategory, token: &str) -> bool {
        match category {
            InstanceCategory::Male => MALE_PRONOUNS.contains(&token),
            InstanceCategory::Female => FEMALE_PRONOUNS.contains(&token),
            InstanceCategory::Any => {
                MALE_PRONOUNS.contains(&token) || FEMALE_PRONOUNS.contains(&token)
            }
        }
    }
}

/// Distances between consecutive tokens matching `category`.
pub fn instance_distances(tokens: &[String], category: InstanceCategory) -> Vec<u64> {
    let positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| PronounDistance::matches(category, token))
        .map(|(index, _)| index)
        .collect();

    positions
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as u64)
        .collect()
}

#[async_trait]
impl InstanceDistance for PronounDistance {
    async fn distances(&self, novel: &Novel, category: InstanceCategory) -> Result<Vec<u64>> {
        let tokens = novel.tokenized_text().await?;
        Ok(instance_distances(&tokens, category))
    }

    async fn distances_pair(
        &self,
        novel: &Novel,
        a: InstanceCategory,
        b: InstanceCategory,
    ) -> Result<(Vec<u64>, Vec<u64>)> {
        let tokens = novel.tokenized_text().await?;
        Ok((
            instance_distances(&tokens, a),
            instance_distances(&tokens, b),
        ))
    }
}
