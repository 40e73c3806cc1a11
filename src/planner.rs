use serde::Serialize;
use tracing::info;

use crate::config::ArtifactSizes;
use crate::host::HostCanvas;
use crate::insights::InsightsDataset;
use crate::layout::{CanvasSession, PlacedArtifact};
use crate::viz::{Recommendation, select};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedArtifact {
    pub recommendation: Recommendation,
    pub artifact: PlacedArtifact,
}

/// Recommends visualizations for `dataset` and inserts them into `canvas` in
/// ranked order, at most `limit` of them.
pub fn plan_and_insert<C: HostCanvas + ?Sized>(
    dataset: &InsightsDataset,
    study_type: &str,
    canvas: &mut C,
    session: &mut CanvasSession,
    limit: Option<usize>,
    sizes: &ArtifactSizes,
) -> Vec<PlannedArtifact> {
    let recommendations = select(dataset, study_type);
    insert_recommendations(&recommendations, canvas, session, limit, sizes)
}

/// Inserts an already ranked list, front first.
pub fn insert_recommendations<C: HostCanvas + ?Sized>(
    recommendations: &[Recommendation],
    canvas: &mut C,
    session: &mut CanvasSession,
    limit: Option<usize>,
    sizes: &ArtifactSizes,
) -> Vec<PlannedArtifact> {
    let take = limit.unwrap_or(recommendations.len());
    let planned: Vec<PlannedArtifact> = recommendations
        .iter()
        .take(take)
        .map(|recommendation| {
            let (width, height) = sizes.get(recommendation.id);
            let artifact =
                session.insert_artifact(&mut *canvas, &recommendation.label, width, height);
            PlannedArtifact {
                recommendation: recommendation.clone(),
                artifact,
            }
        })
        .collect();
    info!(
        inserted = planned.len(),
        ranked = recommendations.len(),
        "placed recommended visualizations"
    );
    planned
}
