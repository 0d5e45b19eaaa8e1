//! Scene container holding every committed stroke.

use super::stroke::Stroke;
use std::collections::BTreeMap;

/// All committed strokes in the current drawing, keyed by sequence number.
///
/// Iteration order is paint order (lowest sequence first = bottom layer). Keying by
/// sequence means a removed stroke that is later restored lands back in its
/// original position without any index bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    strokes: BTreeMap<u64, Stroke>,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a stroke, replacing any stroke with the same sequence number.
    pub fn insert(&mut self, stroke: Stroke) {
        self.strokes.insert(stroke.seq, stroke);
    }

    /// Removes a stroke by sequence number.
    pub fn remove(&mut self, seq: u64) -> Option<Stroke> {
        self.strokes.remove(&seq)
    }

    pub fn get(&self, seq: u64) -> Option<&Stroke> {
        self.strokes.get(&seq)
    }

    pub fn contains(&self, seq: u64) -> bool {
        self.strokes.contains_key(&seq)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Iterates strokes in paint order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Stroke> {
        self.strokes.values()
    }

    /// Sequence numbers in paint order.
    pub fn sequences(&self) -> Vec<u64> {
        self.strokes.keys().copied().collect()
    }
}
