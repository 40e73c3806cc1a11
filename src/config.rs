use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::viz::VizKind;

pub const DEFAULT_ARTIFACT_PREFIX: &str = "Research / ";
pub const DEFAULT_STUDY_TYPE: &str = "generative";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Structured design document with frames and a layout grid.
    #[default]
    Primary,
    /// Free-form whiteboard.
    Collaborative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Grid,
    Clustered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Zero disables snapping.
    pub grid_size: f32,
    pub gutter_x: f32,
    pub gutter_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub mode: LayoutMode,
}

impl LayoutConfig {
    pub fn grid() -> Self {
        Self {
            grid_size: 100.0,
            gutter_x: 40.0,
            gutter_y: 40.0,
            offset_x: 100.0,
            offset_y: 100.0,
            mode: LayoutMode::Grid,
        }
    }

    pub fn clustered() -> Self {
        Self {
            grid_size: 0.0,
            gutter_x: 40.0,
            gutter_y: 40.0,
            offset_x: 0.0,
            offset_y: 0.0,
            mode: LayoutMode::Clustered,
        }
    }

    pub fn snaps(&self) -> bool {
        self.mode == LayoutMode::Grid && self.grid_size > 0.0
    }
}

pub fn resolve_layout_config(kind: DocumentKind) -> LayoutConfig {
    match kind {
        DocumentKind::Collaborative => LayoutConfig::clustered(),
        DocumentKind::Primary => LayoutConfig::grid(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSize {
    pub width: f32,
    pub height: f32,
}

/// Per-kind artifact dimensions; kinds without an override use their
/// built-in size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSizes {
    overrides: BTreeMap<VizKind, ArtifactSize>,
}

impl ArtifactSizes {
    pub fn get(&self, kind: VizKind) -> (f32, f32) {
        match self.overrides.get(&kind) {
            Some(size) => (size.width, size.height),
            None => kind.default_size(),
        }
    }

    pub fn set(&mut self, kind: VizKind, width: f32, height: f32) {
        self.overrides.insert(
            kind,
            ArtifactSize {
                width: width.max(1.0),
                height: height.max(1.0),
            },
        );
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub study_type: String,
    pub artifact_prefix: String,
    pub limit: Option<usize>,
    pub sizes: ArtifactSizes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            study_type: DEFAULT_STUDY_TYPE.to_string(),
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            limit: None,
            sizes: ArtifactSizes::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    study_type: Option<String>,
    artifact_prefix: Option<String>,
    limit: Option<usize>,
    artifact_sizes: Option<BTreeMap<String, ArtifactSize>>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON or JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(v) = parsed.study_type {
        config.study_type = v;
    }
    if let Some(v) = parsed.artifact_prefix {
        config.artifact_prefix = v;
    }
    if let Some(v) = parsed.limit {
        config.limit = Some(v);
    }
    if let Some(sizes) = parsed.artifact_sizes {
        for (id, size) in sizes {
            match VizKind::from_id(&id) {
                Some(kind) => config.sizes.set(kind, size.width, size.height),
                None => warn!(id = %id, "ignoring size override for unknown visualization"),
            }
        }
    }
    Ok(config)
}
