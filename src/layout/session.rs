use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::{DEFAULT_ARTIFACT_PREFIX, resolve_layout_config};
use crate::host::{HostCanvas, HostDocument};

use super::placement::next_position;
use super::types::{PlacedArtifact, Point};

/// Placement state for one editing session: the ids of artifacts inserted so
/// far and the name prefix that marks artifacts from earlier sessions.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    prefix: String,
    registered: Vec<String>,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_PREFIX)
    }
}

impl CanvasSession {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            registered: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registered_ids(&self) -> &[String] {
        &self.registered
    }

    /// Remembers an inserted artifact. Registering the same id again is a
    /// no-op.
    pub fn register_artifact(&mut self, id: &str) {
        if !self.registered.iter().any(|known| known == id) {
            self.registered.push(id.to_string());
        }
    }

    /// Artifacts the next placement has to avoid: registered ids that still
    /// resolve in the document, followed by prefix-named containers not
    /// already listed.
    pub fn find_existing_artifacts<D: HostDocument + ?Sized>(&self, doc: &D) -> Vec<PlacedArtifact> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut artifacts = Vec::new();

        for id in &self.registered {
            match doc.resolve_geometry(id) {
                Some(rect) => {
                    if seen.insert(id.clone()) {
                        artifacts.push(PlacedArtifact::new(id.clone(), rect));
                    }
                }
                None => trace!(id = %id, "registered artifact no longer in document"),
            }
        }

        for container in doc.containers_with_prefix(&self.prefix) {
            if seen.insert(container.id.clone()) {
                artifacts.push(PlacedArtifact::new(container.id.clone(), container.rect()));
            }
        }

        artifacts
    }

    pub fn next_placement<D: HostDocument + ?Sized>(&self, doc: &D, width: f32, height: f32) -> Point {
        let config = resolve_layout_config(doc.document_kind());
        let existing = self.find_existing_artifacts(doc);
        next_position(&existing, width, height, doc.viewport_center(), &config)
    }

    /// Creates a named artifact in the canvas, moves it to the next free
    /// position and registers it.
    pub fn insert_artifact<C: HostCanvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        title: &str,
        width: f32,
        height: f32,
    ) -> PlacedArtifact {
        let position = self.next_placement(&*canvas, width, height);
        let name = format!("{}{}", self.prefix, title);
        let id = canvas.create_artifact(&name, width, height);
        canvas.move_artifact(&id, position);
        self.register_artifact(&id);
        debug!(id = %id, name = %name, x = position.x, y = position.y, "inserted artifact");
        PlacedArtifact {
            id,
            x: position.x,
            y: position.y,
            width,
            height,
        }
    }
}
