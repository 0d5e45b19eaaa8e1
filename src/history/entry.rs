//! Reversible operations recorded by the history store.

use crate::draw::{Scene, Stroke};

/// One step on the undo timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// A completed freehand stroke (ink or eraser)
    Draw(Stroke),
    /// Strokes removed from the scene by a delete
    Delete(Vec<Stroke>),
    /// Full-state replacement, e.g. clearing the canvas
    Snapshot { before: Scene, after: Scene },
}

impl HistoryEntry {
    /// Applies the entry to `scene` in the forward direction.
    pub fn apply(&self, scene: &mut Scene) {
        match self {
            HistoryEntry::Draw(stroke) => scene.insert(stroke.clone()),
            HistoryEntry::Delete(strokes) => {
                for stroke in strokes {
                    scene.remove(stroke.seq);
                }
            }
            HistoryEntry::Snapshot { after, .. } => *scene = after.clone(),
        }
    }

    /// Reverses [`apply`](Self::apply).
    pub fn revert(&self, scene: &mut Scene) {
        match self {
            HistoryEntry::Draw(stroke) => {
                scene.remove(stroke.seq);
            }
            HistoryEntry::Delete(strokes) => {
                for stroke in strokes {
                    scene.insert(stroke.clone());
                }
            }
            HistoryEntry::Snapshot { before, .. } => *scene = before.clone(),
        }
    }

    /// Returns true for entries that only add content.
    pub fn is_additive(&self) -> bool {
        matches!(self, HistoryEntry::Draw(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryEntry::Draw(stroke) if stroke.is_eraser() => "erase",
            HistoryEntry::Draw(_) => "draw",
            HistoryEntry::Delete(_) => "delete",
            HistoryEntry::Snapshot { .. } => "snapshot",
        }
    }
}
