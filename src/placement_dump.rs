use crate::config::LayoutConfig;
use crate::host::{Container, HostDocument, MemoryDocument};
use crate::layout::CanvasSession;
use crate::planner::PlannedArtifact;
use crate::viz::{Recommendation, StudyType};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDump {
    pub study_type: StudyType,
    pub layout: LayoutConfig,
    pub recommendations: Vec<Recommendation>,
    pub placed: Vec<PlacedDump>,
    pub registered: Vec<String>,
    pub document: Vec<Container>,
}

#[derive(Debug, Serialize)]
pub struct PlacedDump {
    pub viz: String,
    pub label: String,
    pub score: f32,
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacementDump {
    pub fn from_run(
        study_type: StudyType,
        layout: LayoutConfig,
        recommendations: Vec<Recommendation>,
        planned: &[PlannedArtifact],
        session: &CanvasSession,
        doc: &MemoryDocument,
    ) -> Self {
        let placed = planned
            .iter()
            .map(|item| PlacedDump {
                viz: item.recommendation.id.to_string(),
                label: item.recommendation.label.clone(),
                score: item.recommendation.score,
                id: item.artifact.id.clone(),
                x: item.artifact.x,
                y: item.artifact.y,
                width: item.artifact.width,
                height: item.artifact.height,
            })
            .collect();

        PlacementDump {
            study_type,
            layout,
            recommendations,
            placed,
            registered: session.registered_ids().to_vec(),
            document: doc.containers_with_prefix(""),
        }
    }
}

/// Pretty-prints any report to `path`, or stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, value)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, value)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}
