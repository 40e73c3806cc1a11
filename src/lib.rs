#[cfg(feature = "cli")]
pub mod cli;
pub mod analysis;
pub mod config;
pub mod host;
pub mod input;
pub mod insights;
pub mod layout;
pub mod placement_dump;
pub mod planner;
pub mod viz;

#[cfg(feature = "cli")]
pub use cli::run;
pub use analysis::{ContentShape, analyze};
pub use config::{DocumentKind, LayoutConfig, LayoutMode, resolve_layout_config};
pub use host::{Container, HostCanvas, HostDocument, MemoryDocument};
pub use insights::InsightsDataset;
pub use layout::{CanvasSession, PlacedArtifact, Point, Rect, next_position, snap_to_grid};
pub use planner::{PlannedArtifact, insert_recommendations, plan_and_insert};
pub use viz::{Recommendation, StudyType, VizKind, select};
