//! Repaint tracking for incremental rendering.
//!
//! Collects the strokes that must be painted on top of the existing raster, or a
//! request to repaint the whole scene.

/// Tracks pending paint work accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    pending: Vec<u64>,
    force_full: bool,
}

/// Work drained from a [`DirtyTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    /// Nothing to paint
    None,
    /// Paint these strokes over the current raster, in order
    Strokes(Vec<u64>),
    /// Clear the raster and repaint everything
    Full,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated strokes.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.pending.clear();
    }

    /// Queues a newly committed stroke unless a full repaint is already pending.
    pub fn mark_stroke(&mut self, seq: u64) {
        if self.force_full {
            return;
        }
        self.pending.push(seq);
    }

    /// Returns true if any paint work is queued.
    pub fn is_dirty(&self) -> bool {
        self.force_full || !self.pending.is_empty()
    }

    /// Drains the work gathered so far.
    pub fn take(&mut self) -> Damage {
        if self.force_full {
            self.force_full = false;
            self.pending.clear();
            Damage::Full
        } else if self.pending.is_empty() {
            Damage::None
        } else {
            Damage::Strokes(self.pending.drain(..).collect())
        }
    }
}
