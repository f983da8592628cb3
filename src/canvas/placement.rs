//! Overlap-avoiding placement for newly created nodes.
//!
//! Every node occupies the same fixed footprint.  A candidate that collides
//! with the padded footprint of an existing node is nudged diagonally and
//! re-checked, up to a fixed number of attempts.

use crate::constants::{
    MAX_PLACEMENT_ATTEMPTS, NODE_HEIGHT, NODE_PADDING, NODE_WIDTH, PLACEMENT_STEP,
};
use crate::models::{Point, WorkflowNode};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Point,
    /// `false` when the attempt budget ran out and `position` may still
    /// overlap an existing node.
    pub resolved: bool,
}

/// Whether a node placed at `candidate` would collide with one at `existing`.
pub fn overlaps(candidate: Point, existing: Point) -> bool {
    candidate.x < existing.x + NODE_WIDTH + NODE_PADDING
        && candidate.x + NODE_WIDTH + NODE_PADDING > existing.x
        && candidate.y < existing.y + NODE_HEIGHT + NODE_PADDING
        && candidate.y + NODE_HEIGHT + NODE_PADDING > existing.y
}

pub fn find_non_overlapping_position(nodes: &[WorkflowNode], base: Point) -> Placement {
    let mut position = base;
    let mut resolved = false;
    let mut attempts = 0;

    while !resolved && attempts < MAX_PLACEMENT_ATTEMPTS {
        resolved = true;
        if nodes.iter().any(|n| overlaps(position, n.position)) {
            resolved = false;
            position = position.offset(PLACEMENT_STEP, PLACEMENT_STEP);
        }
        attempts += 1;
    }

    if !resolved {
        tracing::debug!(
            x = position.x,
            y = position.y,
            "placement budget exhausted, accepting overlapping position"
        );
    }

    Placement { position, resolved }
}

/// Where a node goes when the toolbar creates it without a position:
/// horizontally centred, a third of the way down the workflow area.
pub fn default_position(canvas_width: f64, canvas_height: f64) -> Point {
    Point::new(canvas_width / 2.0 - NODE_WIDTH / 2.0, canvas_height / 3.0)
}
