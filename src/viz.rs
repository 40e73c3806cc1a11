use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{ContentShape, analyze};
use crate::insights::InsightsDataset;

pub const STUDY_TYPE_BOOST: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VizKind {
    ThemeStories,
    ParticipantHeatmap,
    StrengthLadder,
    ParticipantVoices,
    OpportunityFlow,
    Persona,
    EmpathyMap,
    JourneyMap,
}

impl VizKind {
    pub const ALL: [VizKind; 8] = [
        VizKind::ThemeStories,
        VizKind::ParticipantHeatmap,
        VizKind::StrengthLadder,
        VizKind::ParticipantVoices,
        VizKind::OpportunityFlow,
        VizKind::Persona,
        VizKind::EmpathyMap,
        VizKind::JourneyMap,
    ];

    pub fn id(self) -> &'static str {
        match self {
            VizKind::ThemeStories => "theme-stories",
            VizKind::ParticipantHeatmap => "participant-heatmap",
            VizKind::StrengthLadder => "strength-ladder",
            VizKind::ParticipantVoices => "participant-voices",
            VizKind::OpportunityFlow => "opportunity-flow",
            VizKind::Persona => "persona",
            VizKind::EmpathyMap => "empathy-map",
            VizKind::JourneyMap => "journey-map",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            VizKind::ThemeStories => "Theme Stories",
            VizKind::ParticipantHeatmap => "Participant Heatmap",
            VizKind::StrengthLadder => "Insight Strength Ladder",
            VizKind::ParticipantVoices => "Participant Voices",
            VizKind::OpportunityFlow => "Opportunity Flow",
            VizKind::Persona => "Persona",
            VizKind::EmpathyMap => "Empathy Map",
            VizKind::JourneyMap => "Journey Map",
        }
    }

    /// Width and height of a freshly built artifact of this kind.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            VizKind::ThemeStories => (400.0, 520.0),
            VizKind::ParticipantHeatmap => (400.0, 400.0),
            VizKind::StrengthLadder => (400.0, 360.0),
            VizKind::ParticipantVoices => (400.0, 480.0),
            VizKind::OpportunityFlow => (400.0, 440.0),
            VizKind::Persona => (400.0, 560.0),
            VizKind::EmpathyMap => (400.0, 400.0),
            VizKind::JourneyMap => (800.0, 360.0),
        }
    }
}

impl fmt::Display for VizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub struct VizEntry {
    pub kind: VizKind,
    pub relevance: fn(&ContentShape) -> f32,
}

/// Scored visualizations, in tie-break order. Persona, empathy map and
/// journey map are only inserted on request and never recommended.
pub static REGISTRY: [VizEntry; 5] = [
    VizEntry {
        kind: VizKind::ThemeStories,
        relevance: theme_stories_relevance,
    },
    VizEntry {
        kind: VizKind::ParticipantHeatmap,
        relevance: participant_heatmap_relevance,
    },
    VizEntry {
        kind: VizKind::StrengthLadder,
        relevance: strength_ladder_relevance,
    },
    VizEntry {
        kind: VizKind::ParticipantVoices,
        relevance: participant_voices_relevance,
    },
    VizEntry {
        kind: VizKind::OpportunityFlow,
        relevance: opportunity_flow_relevance,
    },
];

fn theme_stories_relevance(shape: &ContentShape) -> f32 {
    if shape.theme_count > 0 { 1.0 } else { 0.0 }
}

fn participant_heatmap_relevance(shape: &ContentShape) -> f32 {
    let participants = shape.participant_ids.len();
    if participants >= 3 && shape.theme_count >= 2 {
        0.9
    } else if participants >= 2 {
        0.5
    } else {
        0.0
    }
}

fn strength_ladder_relevance(shape: &ContentShape) -> f32 {
    match shape.insight_count {
        0 => 0.0,
        1 => 0.4,
        _ => 0.85,
    }
}

fn participant_voices_relevance(shape: &ContentShape) -> f32 {
    let avg = shape.avg_evidence_per_insight;
    if avg >= 1.5 {
        0.8
    } else if avg >= 1.0 {
        0.4
    } else {
        0.0
    }
}

fn opportunity_flow_relevance(shape: &ContentShape) -> f32 {
    if shape.opportunity_count >= 2 && shape.theme_count >= 2 {
        0.75
    } else if shape.opportunity_count >= 1 {
        0.3
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyType {
    #[default]
    Generative,
    Exploratory,
    Evaluative,
    Foundational,
    Comparative,
}

impl StudyType {
    const MATCH_ORDER: [StudyType; 5] = [
        StudyType::Generative,
        StudyType::Exploratory,
        StudyType::Evaluative,
        StudyType::Foundational,
        StudyType::Comparative,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StudyType::Generative => "generative",
            StudyType::Exploratory => "exploratory",
            StudyType::Evaluative => "evaluative",
            StudyType::Foundational => "foundational",
            StudyType::Comparative => "comparative",
        }
    }

    /// Maps a free-text study description onto a known study type: the first
    /// key (in match order) contained in the lower-cased text wins, and
    /// anything unrecognized is generative.
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|study| lowered.contains(study.key()))
            .unwrap_or_default()
    }

    pub fn boosted(self) -> &'static [VizKind] {
        match self {
            StudyType::Generative | StudyType::Exploratory => &[
                VizKind::ThemeStories,
                VizKind::ParticipantVoices,
                VizKind::OpportunityFlow,
            ],
            StudyType::Evaluative => &[
                VizKind::StrengthLadder,
                VizKind::ParticipantHeatmap,
                VizKind::ThemeStories,
            ],
            StudyType::Foundational => &[
                VizKind::ParticipantHeatmap,
                VizKind::ThemeStories,
                VizKind::ParticipantVoices,
            ],
            StudyType::Comparative => &[
                VizKind::ParticipantHeatmap,
                VizKind::StrengthLadder,
                VizKind::ThemeStories,
            ],
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: VizKind,
    pub label: String,
    pub score: f32,
}

pub fn select(dataset: &InsightsDataset, study_type: &str) -> Vec<Recommendation> {
    score_shape(&analyze(dataset), StudyType::normalize(study_type))
}

/// Ranks registry entries for an already analyzed dataset. Entries with no
/// base relevance are dropped before the study-type boost, so an empty
/// dataset recommends nothing. Ties keep registry order.
pub fn score_shape(shape: &ContentShape, study: StudyType) -> Vec<Recommendation> {
    let boosted = study.boosted();
    let mut ranked: Vec<Recommendation> = REGISTRY
        .iter()
        .filter_map(|entry| {
            let base = (entry.relevance)(shape);
            if base <= 0.0 {
                return None;
            }
            let boost = if boosted.contains(&entry.kind) {
                STUDY_TYPE_BOOST
            } else {
                0.0
            };
            let score = (base + boost).min(1.0);
            (score > 0.0).then(|| Recommendation {
                id: entry.kind,
                label: entry.kind.label().to_string(),
                score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    debug!(study = %study, count = ranked.len(), "ranked visualizations");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{Evidence, Insight, Strength, Theme};
    use proptest::prelude::*;

    fn theme(id: &str) -> Theme {
        Theme {
            id: id.to_string(),
            name: format!("Theme {id}"),
            ..Default::default()
        }
    }

    fn insight(id: &str, strength: Strength, quotes: &[&str]) -> Insight {
        Insight {
            id: id.to_string(),
            statement: format!("statement {id}"),
            evidence: quotes
                .iter()
                .map(|q| Evidence {
                    quote: q.to_string(),
                    participant_id: None,
                })
                .collect(),
            strength,
        }
    }

    fn scenario_a() -> InsightsDataset {
        InsightsDataset {
            themes: vec![theme("t1"), theme("t2"), theme("t3")],
            insights: vec![
                insight("i1", Strength::Strong, &["P1: I gave up", "P2: confusing"]),
                insight("i2", Strength::Strong, &["P3: where is it?"]),
                insight("i3", Strength::Moderate, &["P1: again"]),
                insight("i4", Strength::Weak, &[]),
                insight("i5", Strength::Moderate, &[]),
            ],
            opportunities: vec![
                "Guided setup".to_string(),
                "Inline help".to_string(),
                "Progress saving".to_string(),
            ],
            hmw_prompts: Vec::new(),
        }
    }

    fn score_of(ranked: &[Recommendation], kind: VizKind) -> Option<f32> {
        ranked.iter().find(|r| r.id == kind).map(|r| r.score)
    }

    #[test]
    fn empty_dataset_selects_nothing() {
        assert!(select(&InsightsDataset::new(), "generative").is_empty());
        assert!(select(&InsightsDataset::new(), "evaluative").is_empty());
    }

    #[test]
    fn evaluative_study_ranks_heatmap_above_opportunity_flow() {
        let ranked = select(&scenario_a(), "Evaluative usability test");
        let heatmap = ranked
            .iter()
            .position(|r| r.id == VizKind::ParticipantHeatmap)
            .unwrap();
        let flow = ranked
            .iter()
            .position(|r| r.id == VizKind::OpportunityFlow)
            .unwrap();
        assert!(heatmap < flow);
        assert_eq!(score_of(&ranked, VizKind::ParticipantHeatmap), Some(1.0));
        assert_eq!(score_of(&ranked, VizKind::OpportunityFlow), Some(0.75));
        // theme stories, heatmap and ladder all cap at 1.0 and keep registry order
        let top: Vec<VizKind> = ranked.iter().take(3).map(|r| r.id).collect();
        assert_eq!(
            top,
            vec![
                VizKind::ThemeStories,
                VizKind::ParticipantHeatmap,
                VizKind::StrengthLadder
            ]
        );
    }

    #[test]
    fn boost_is_capped_at_one() {
        let shape = ContentShape {
            theme_count: 4,
            ..Default::default()
        };
        let ranked = score_shape(&shape, StudyType::Generative);
        assert_eq!(ranked[0].id, VizKind::ThemeStories);
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn boost_never_revives_irrelevant_views() {
        let shape = ContentShape {
            theme_count: 1,
            ..Default::default()
        };
        let ranked = score_shape(&shape, StudyType::Foundational);
        assert_eq!(ranked.len(), 1);
        assert_eq!(score_of(&ranked, VizKind::ParticipantHeatmap), None);
        assert_eq!(score_of(&ranked, VizKind::ParticipantVoices), None);
    }

    #[test]
    fn unboosted_scores_keep_base_relevance() {
        let shape = ContentShape {
            insight_count: 1,
            opportunity_count: 1,
            ..Default::default()
        };
        let ranked = score_shape(&shape, StudyType::Foundational);
        assert_eq!(score_of(&ranked, VizKind::StrengthLadder), Some(0.4));
        assert_eq!(score_of(&ranked, VizKind::OpportunityFlow), Some(0.3));
        assert_eq!(ranked[0].id, VizKind::StrengthLadder);
    }

    #[test]
    fn normalizes_study_types() {
        assert_eq!(StudyType::normalize("Generative"), StudyType::Generative);
        assert_eq!(StudyType::normalize("EXPLORATORY interviews"), StudyType::Exploratory);
        assert_eq!(StudyType::normalize("evaluative"), StudyType::Evaluative);
        assert_eq!(StudyType::normalize("a foundational study"), StudyType::Foundational);
        assert_eq!(StudyType::normalize("Comparative"), StudyType::Comparative);
        assert_eq!(StudyType::normalize("diary study"), StudyType::Generative);
        assert_eq!(StudyType::normalize(""), StudyType::Generative);
        // earlier keys win when several are present
        assert_eq!(
            StudyType::normalize("comparative and evaluative"),
            StudyType::Evaluative
        );
    }

    #[test]
    fn relevance_thresholds() {
        let mut shape = ContentShape::default();
        shape.participant_ids = ["1", "2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(participant_heatmap_relevance(&shape), 0.5);
        shape.participant_ids.insert("3".to_string());
        assert_eq!(participant_heatmap_relevance(&shape), 0.5);
        shape.theme_count = 2;
        assert_eq!(participant_heatmap_relevance(&shape), 0.9);

        shape.avg_evidence_per_insight = 1.0;
        assert_eq!(participant_voices_relevance(&shape), 0.4);
        shape.avg_evidence_per_insight = 1.5;
        assert_eq!(participant_voices_relevance(&shape), 0.8);

        shape.opportunity_count = 1;
        assert_eq!(opportunity_flow_relevance(&shape), 0.3);
        shape.opportunity_count = 2;
        assert_eq!(opportunity_flow_relevance(&shape), 0.75);

        shape.insight_count = 1;
        assert_eq!(strength_ladder_relevance(&shape), 0.4);
        shape.insight_count = 2;
        assert_eq!(strength_ladder_relevance(&shape), 0.85);
    }

    #[test]
    fn ids_round_trip_through_from_id() {
        for kind in VizKind::ALL {
            assert_eq!(VizKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(VizKind::from_id("pie-chart"), None);
        assert_eq!(
            serde_json::to_string(&VizKind::EmpathyMap).unwrap(),
            "\"empathy-map\""
        );
    }

    #[test]
    fn registry_never_recommends_request_only_kinds() {
        for entry in &REGISTRY {
            assert!(!matches!(
                entry.kind,
                VizKind::Persona | VizKind::EmpathyMap | VizKind::JourneyMap
            ));
        }
    }

    fn arb_shape() -> impl Strategy<Value = ContentShape> {
        (
            0usize..6,
            0usize..8,
            any::<bool>(),
            prop::collection::btree_set("[0-9]{1,2}", 0..6),
            0usize..5,
            0usize..5,
            0.0f32..4.0,
        )
            .prop_map(
                |(themes, insights, strong, participants, opps, hmws, avg)| ContentShape {
                    theme_count: themes,
                    insight_count: insights,
                    has_strong_evidence: strong,
                    participant_ids: participants,
                    opportunity_count: opps,
                    hmw_count: hmws,
                    avg_evidence_per_insight: avg,
                },
            )
    }

    fn arb_study() -> impl Strategy<Value = StudyType> {
        prop::sample::select(StudyType::MATCH_ORDER.to_vec())
    }

    proptest! {
        #[test]
        fn scores_stay_within_bounds(shape in arb_shape(), study in arb_study()) {
            for rec in score_shape(&shape, study) {
                prop_assert!(rec.score > 0.0 && rec.score <= 1.0);
            }
        }

        #[test]
        fn scoring_is_deterministic_and_sorted(shape in arb_shape(), study in arb_study()) {
            let first = score_shape(&shape, study);
            let second = score_shape(&shape, study);
            prop_assert_eq!(&first, &second);
            for pair in first.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }
}
