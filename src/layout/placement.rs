use tracing::debug;

use crate::config::{LayoutConfig, LayoutMode};

use super::types::{Bounds, PlacedArtifact, Point};

/// Widest a grid row may grow before the next artifact wraps, sized for
/// about four 400-wide artifacts.
pub const MAX_ROW_WIDTH: f32 = 1600.0;
pub const CLUSTER_STAGGER: f32 = 50.0;
const CLUSTER_STAGGER_STEPS: usize = 3;

/// Axis-aligned box around every artifact with finite geometry.
pub fn bounding_box(existing: &[PlacedArtifact]) -> Option<Bounds> {
    existing
        .iter()
        .map(PlacedArtifact::rect)
        .filter(|rect| rect.is_finite())
        .fold(None, |acc: Option<Bounds>, rect| {
            Some(match acc {
                None => Bounds {
                    min_x: rect.x,
                    min_y: rect.y,
                    max_x: rect.right(),
                    max_y: rect.bottom(),
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(rect.x),
                    min_y: b.min_y.min(rect.y),
                    max_x: b.max_x.max(rect.right()),
                    max_y: b.max_y.max(rect.bottom()),
                },
            })
        })
}

pub fn snap_to_grid(point: Point, config: &LayoutConfig) -> Point {
    if !config.snaps() {
        return point;
    }
    let size = config.grid_size;
    Point::new(
        (point.x / size).round() * size,
        (point.y / size).round() * size,
    )
}

/// Where the next artifact of the given size goes. With nothing on the canvas
/// it starts at the viewport center; otherwise grid mode extends the current
/// row (wrapping past [`MAX_ROW_WIDTH`]) and clustered mode drops it to the
/// right with a small vertical stagger.
pub fn next_position(
    existing: &[PlacedArtifact],
    new_width: f32,
    _new_height: f32,
    viewport_center: Point,
    config: &LayoutConfig,
) -> Point {
    let Some(bounds) = bounding_box(existing) else {
        let start = match config.mode {
            LayoutMode::Grid => snap_to_grid(viewport_center, config),
            LayoutMode::Clustered => viewport_center,
        };
        debug!(x = start.x, y = start.y, mode = ?config.mode, "placing first artifact");
        return start;
    };

    let position = match config.mode {
        LayoutMode::Grid => {
            let candidate_x = bounds.max_x + config.gutter_x;
            let row_width = (candidate_x - bounds.min_x) + new_width;
            if row_width > MAX_ROW_WIDTH {
                Point::new(bounds.min_x, bounds.max_y + config.gutter_y)
            } else {
                Point::new(candidate_x, rightmost_top(existing).unwrap_or(bounds.min_y))
            }
        }
        LayoutMode::Clustered => {
            let placed = existing
                .iter()
                .filter(|artifact| artifact.rect().is_finite())
                .count();
            let step = (placed % CLUSTER_STAGGER_STEPS) as f32;
            Point::new(
                bounds.max_x + config.gutter_x,
                bounds.min_y + step * CLUSTER_STAGGER,
            )
        }
    };
    debug!(
        x = position.x,
        y = position.y,
        mode = ?config.mode,
        existing = existing.len(),
        "placing artifact"
    );
    position
}

/// Top edge of the artifact with the largest x; the first one wins on ties.
fn rightmost_top(existing: &[PlacedArtifact]) -> Option<f32> {
    existing
        .iter()
        .filter(|artifact| artifact.rect().is_finite())
        .fold(None, |best: Option<&PlacedArtifact>, artifact| match best {
            Some(current) if current.x >= artifact.x => Some(current),
            _ => Some(artifact),
        })
        .map(|artifact| artifact.y)
}
