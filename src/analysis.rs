use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::insights::{Evidence, InsightsDataset, Strength};

static PARTICIPANT_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*P?(\d+)").unwrap());
static PARTICIPANT_QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bP(\d+)").unwrap());

/// Summary of an insights dataset used to score visualizations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentShape {
    pub theme_count: usize,
    pub insight_count: usize,
    pub has_strong_evidence: bool,
    pub participant_ids: BTreeSet<String>,
    pub opportunity_count: usize,
    pub hmw_count: usize,
    pub avg_evidence_per_insight: f32,
}

pub fn analyze(dataset: &InsightsDataset) -> ContentShape {
    let insight_count = dataset.insights.len();
    let mut participant_ids = BTreeSet::new();
    let mut evidence_total = 0usize;
    let mut has_strong_evidence = false;

    for insight in &dataset.insights {
        has_strong_evidence |= insight.strength == Strength::Strong;
        evidence_total += insight.evidence.len();
        participant_ids.extend(insight.evidence.iter().filter_map(participant_of));
    }

    let avg_evidence_per_insight = if insight_count == 0 {
        0.0
    } else {
        evidence_total as f32 / insight_count as f32
    };

    ContentShape {
        theme_count: dataset.themes.len(),
        insight_count,
        has_strong_evidence,
        participant_ids,
        opportunity_count: dataset.opportunities.len(),
        hmw_count: dataset.hmw_prompts.len(),
        avg_evidence_per_insight,
    }
}

/// Participant number for one piece of evidence. An explicit participant id
/// (`P7`, `p07`, `7`) wins; otherwise the quote is searched for a `P<digits>`
/// token starting at a word boundary.
pub fn participant_of(evidence: &Evidence) -> Option<String> {
    let from_field = evidence
        .participant_id
        .as_deref()
        .and_then(|raw| PARTICIPANT_FIELD_RE.captures(raw))
        .map(|caps| caps[1].to_string());
    from_field.or_else(|| {
        PARTICIPANT_QUOTE_RE
            .captures(&evidence.quote)
            .map(|caps| caps[1].to_string())
    })
}
