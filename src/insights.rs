use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    #[default]
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub statement: String,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub strength: Strength,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub insight_ids: BTreeSet<String>,
}

/// Synthesized output of a research study: themes grouping insights, plus
/// the opportunity statements and "how might we" prompts derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsDataset {
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub hmw_prompts: Vec<String>,
}

impl InsightsDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
            && self.insights.is_empty()
            && self.opportunities.is_empty()
            && self.hmw_prompts.is_empty()
    }
}
