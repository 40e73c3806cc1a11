use serde::{Deserialize, Serialize};

use crate::config::DocumentKind;
use crate::layout::{Point, Rect};

/// A top-level node of the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Read access to the document the plugin is running in.
pub trait HostDocument {
    /// Current geometry of a node, or `None` once it has been deleted.
    fn resolve_geometry(&self, id: &str) -> Option<Rect>;
    /// Top-level nodes whose name starts with `prefix`, in document order.
    fn containers_with_prefix(&self, prefix: &str) -> Vec<Container>;
    fn viewport_center(&self) -> Point;
    fn document_kind(&self) -> DocumentKind;
}

/// Write access used when inserting new artifacts.
pub trait HostCanvas: HostDocument {
    /// Creates an empty top-level node and returns its id.
    fn create_artifact(&mut self, name: &str, width: f32, height: f32) -> String;
    /// Moves a node; unknown ids are ignored.
    fn move_artifact(&mut self, id: &str, position: Point);
}

/// In-memory document, loadable from a JSON snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub viewport: Point,
    #[serde(default)]
    pub nodes: Vec<Container>,
    #[serde(skip)]
    next_id: usize,
}

impl MemoryDocument {
    pub fn new(kind: DocumentKind, viewport: Point) -> Self {
        Self {
            kind,
            viewport,
            nodes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add_node(&mut self, id: &str, name: &str, rect: Rect) {
        self.nodes.push(Container {
            id: id.to_string(),
            name: name.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        });
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        self.nodes.len() != before
    }

    pub fn node(&self, id: &str) -> Option<&Container> {
        self.nodes.iter().find(|node| node.id == id)
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("node-{}", self.next_id);
            if self.node(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl HostDocument for MemoryDocument {
    fn resolve_geometry(&self, id: &str) -> Option<Rect> {
        self.node(id).map(Container::rect)
    }

    fn containers_with_prefix(&self, prefix: &str) -> Vec<Container> {
        self.nodes
            .iter()
            .filter(|node| node.name.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn viewport_center(&self) -> Point {
        self.viewport
    }

    fn document_kind(&self) -> DocumentKind {
        self.kind
    }
}

impl HostCanvas for MemoryDocument {
    fn create_artifact(&mut self, name: &str, width: f32, height: f32) -> String {
        let id = self.allocate_id();
        self.add_node(&id, name, Rect::new(0.0, 0.0, width, height));
        id
    }

    fn move_artifact(&mut self, id: &str, position: Point) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) {
            node.x = position.x;
            node.y = position.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_loads_with_defaults() {
        let raw = r#"{"kind": "collaborative", "nodes": [
            {"id": "node-1", "name": "Research / Theme Stories", "x": 0, "y": 0, "width": 400, "height": 520}
        ]}"#;
        let doc: MemoryDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.document_kind(), DocumentKind::Collaborative);
        assert_eq!(doc.viewport_center(), Point::default());
        assert_eq!(doc.resolve_geometry("node-1"), Some(Rect::new(0.0, 0.0, 400.0, 520.0)));
    }

    #[test]
    fn created_ids_skip_existing_nodes() {
        let mut doc = MemoryDocument::new(DocumentKind::Primary, Point::default());
        doc.add_node("node-1", "sticky", Rect::new(0.0, 0.0, 10.0, 10.0));
        let id = doc.create_artifact("Research / Persona", 400.0, 560.0);
        assert_eq!(id, "node-2");
        let next = doc.create_artifact("Research / Journey Map", 800.0, 360.0);
        assert_eq!(next, "node-3");
    }

    #[test]
    fn prefix_scan_and_moves() {
        let mut doc = MemoryDocument::new(DocumentKind::Primary, Point::default());
        doc.add_node("a", "Research / Voices", Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.add_node("b", "Wireframes", Rect::new(0.0, 0.0, 10.0, 10.0));
        let found = doc.containers_with_prefix("Research / ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");

        doc.move_artifact("a", Point::new(50.0, 60.0));
        doc.move_artifact("missing", Point::new(1.0, 1.0));
        assert_eq!(doc.resolve_geometry("a").map(|r| (r.x, r.y)), Some((50.0, 60.0)));

        assert!(doc.remove_node("a"));
        assert!(!doc.remove_node("a"));
        assert_eq!(doc.resolve_geometry("a"), None);
    }
}
