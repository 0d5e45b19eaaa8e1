//! Pointer gesture state machine.

use crate::draw::Brush;

/// What the pointer is currently doing.
///
/// A gesture starts on pointer-down and ends on pointer-up (commit) or on
/// cancellation (pointer leaves the surface, tool switch, undo/redo).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// Pointer is up
    #[default]
    Idle,
    /// Freehand drawing with the brush captured at pointer-down
    Drawing {
        brush: Brush,
        /// Accumulated path in logical coordinates
        points: Vec<(f64, f64)>,
    },
    /// Picking strokes with the select tool
    Selecting {
        start: (f64, f64),
        current: (f64, f64),
    },
    /// Pointer is down in drawing mode without a brush; nothing will commit
    Inert,
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}
