//! Freehand stroke definitions.

use super::color::Color;
use crate::util::{self, Rect};

/// How a brush affects the pixels under its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    /// No brush: gestures do not produce strokes
    None,
    /// Paints pigment
    Stroke,
    /// Removes pigment from strokes beneath it
    Eraser,
}

/// Brush parameters applied to newly drawn strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub kind: BrushKind,
    /// Line width in logical units
    pub width: f64,
    pub color: Color,
}

/// One completed freehand action.
///
/// Strokes are immutable once produced. The sequence number is assigned by the
/// canvas and defines paint order: an eraser stroke only affects strokes with a
/// lower sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Monotonically increasing commit identifier
    pub seq: u64,
    /// Path in logical coordinates, in drawing order
    pub points: Vec<(f64, f64)>,
    /// Either [`BrushKind::Stroke`] or [`BrushKind::Eraser`]
    pub kind: BrushKind,
    /// Line width in logical units
    pub width: f64,
    /// Ink color (ignored by erasers)
    pub color: Color,
}

impl Stroke {
    /// Builds a stroke from a finished gesture path.
    pub fn new(seq: u64, points: Vec<(f64, f64)>, brush: Brush) -> Self {
        Self {
            seq,
            points,
            kind: brush.kind,
            width: brush.width,
            color: brush.color,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.kind == BrushKind::Eraser
    }

    /// Returns the axis-aligned bounds of the path, expanded by half the line width.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.width)
    }

    /// Returns true if `(x, y)` lies within `tolerance` of the painted path.
    pub fn hit_test(&self, x: f64, y: f64, tolerance: f64) -> bool {
        let reach = self.width / 2.0 + tolerance;
        match self.points.as_slice() {
            [] => false,
            [only] => util::distance_to_segment((x, y), *only, *only) <= reach,
            points => points
                .windows(2)
                .any(|pair| util::distance_to_segment((x, y), pair[0], pair[1]) <= reach),
        }
    }
}

pub(crate) fn bounding_box_for_points(points: &[(f64, f64)], width: f64) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let (mut min_x, mut min_y) = *first;
    let (mut max_x, mut max_y) = *first;

    for &(x, y) in rest {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padding = (width / 2.0).max(0.5);
    Rect::from_min_max(
        min_x - padding,
        min_y - padding,
        max_x + padding,
        max_y + padding,
    )
}
