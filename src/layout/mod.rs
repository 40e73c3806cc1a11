mod placement;
mod session;
pub mod types;

pub use placement::{CLUSTER_STAGGER, MAX_ROW_WIDTH, bounding_box, next_position, snap_to_grid};
pub use session::CanvasSession;
pub use types::{Bounds, PlacedArtifact, Point, Rect};
