//! Axis-aligned box collision with directional resolution
//!
//! Everything is integer pixels. Box edges are inclusive on both sides, so two
//! boxes that merely touch count as overlapping.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::intervals_overlap;

/// An integer axis-aligned box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Far corner (inclusive)
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.pos + self.size
    }
}

/// Side of the focus box that another box is colliding from
///
/// - `Top`: other object is above the focus
/// - `Bottom`: other object is below the focus
/// - `Left`: other object is left of the focus
/// - `Right`: other object is right of the focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Bottom,
    Top,
}

/// True iff the boxes overlap on both axes
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    intervals_overlap(a.pos.x, a_max.x, b.pos.x, b_max.x)
        && intervals_overlap(a.pos.y, a_max.y, b.pos.y, b_max.y)
}

/// Classify which side `other` penetrates `focus` from
///
/// Picks the shallowest of the four penetration depths. Ties resolve in the
/// order Top, Bottom, Left, Right. Only meaningful when the boxes overlap.
pub fn classify_direction(focus: &Rect, other: &Rect) -> Direction {
    let (focus_max, other_max) = (focus.max(), other.max());

    let overlap_right = focus_max.x - other.pos.x;
    let overlap_left = other_max.x - focus.pos.x;
    let overlap_bottom = focus_max.y - other.pos.y;
    let overlap_top = other_max.y - focus.pos.y;

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min_overlap == overlap_top {
        Direction::Top
    } else if min_overlap == overlap_bottom {
        Direction::Bottom
    } else if min_overlap == overlap_left {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Check whether `other` collides with `focus`, and from which side
pub fn bbox_colliding(focus: &Rect, other: &Rect) -> Option<Direction> {
    boxes_overlap(focus, other).then(|| classify_direction(focus, other))
}
