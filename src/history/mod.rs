//! Linear, saturating undo/redo over committed drawing operations.
//!
//! The store owns the authoritative [`Scene`]. Every committed operation is applied
//! to it and, while recording is on, pushed onto the undo stack. The timeline has a
//! floor captured by [`HistoryStore::save_initial_state`]; undo never goes behind it.
//!
//! Invariant: replaying the undo stack over the floor yields the current scene.

mod entry;

pub use entry::HistoryEntry;

use crate::draw::Scene;
use log::{debug, warn};
use std::collections::VecDeque;

/// Undo/redo history and the scene it governs.
#[derive(Debug, Default)]
pub struct HistoryStore {
    scene: Scene,
    floor: Option<Scene>,
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    paused: bool,
    max_undo: usize,
}

impl HistoryStore {
    /// Creates an empty store. `max_undo` caps the undo depth (0 = unlimited).
    pub fn new(max_undo: usize) -> Self {
        Self {
            max_undo,
            ..Self::default()
        }
    }

    /// The current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Captures the current scene as the permanent floor of the timeline.
    ///
    /// Only the first call takes effect; later calls are ignored until
    /// [`clear_history`](Self::clear_history). Returns whether the floor was set.
    pub fn save_initial_state(&mut self) -> bool {
        if self.floor.is_some() {
            warn!("Initial history state already saved; ignoring");
            return false;
        }
        self.floor = Some(self.scene.clone());
        debug!("Saved initial history state ({} strokes)", self.scene.len());
        true
    }

    /// Applies an operation to the scene and records it.
    ///
    /// While recording is on the entry is pushed onto the undo stack and the redo
    /// stack is cleared. While recording is off the scene still changes but the
    /// stacks keep their length: additive entries become part of the baseline
    /// (the floor and every snapshot on either stack), anything else re-bases the
    /// floor on the new scene and drops both stacks.
    /// Returns whether the entry landed on the undo stack.
    pub fn commit(&mut self, entry: HistoryEntry) -> bool {
        if self.floor.is_none() {
            debug!("Commit before initial state; capturing floor implicitly");
            self.floor = Some(self.scene.clone());
        }

        entry.apply(&mut self.scene);

        if self.paused {
            if entry.is_additive() {
                self.fold_into_baseline(&entry);
            } else {
                debug!(
                    "Unrecorded {} entry; re-basing history on current scene",
                    entry.label()
                );
                self.rebase();
            }
            return false;
        }

        debug!("Committed {} entry", entry.label());
        self.undo_stack.push_back(entry);
        self.redo_stack.clear();
        self.enforce_limit();
        true
    }

    /// Reverts the most recent entry. Returns `false` when already at the floor.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            return false;
        };
        entry.revert(&mut self.scene);
        debug!("Undid {} entry", entry.label());
        self.redo_stack.push(entry);
        true
    }

    /// Re-applies the most recently undone entry. Returns `false` when at the head.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };
        entry.apply(&mut self.scene);
        debug!("Redid {} entry", entry.label());
        self.undo_stack.push_back(entry);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Empties both stacks and forgets the floor.
    ///
    /// The next [`save_initial_state`](Self::save_initial_state) (or commit)
    /// captures a new floor from the scene as it is at that point.
    pub fn clear_history(&mut self) {
        self.floor = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        debug!("History cleared");
    }

    /// Resumes recording of committed entries.
    pub fn on_history(&mut self) {
        self.paused = false;
    }

    /// Suspends recording; commits still change the scene.
    pub fn off_history(&mut self) {
        self.paused = true;
    }

    pub fn is_recording(&self) -> bool {
        !self.paused
    }

    /// Rebuilds the scene from the floor and the undo stack.
    pub fn replay(&self) -> Scene {
        // Without a floor both stacks are empty and the scene is its own baseline.
        let mut scene = self.floor.clone().unwrap_or_else(|| self.scene.clone());
        for entry in &self.undo_stack {
            entry.apply(&mut scene);
        }
        scene
    }

    /// Makes an additive entry permanent: undoing or redoing a snapshot keeps it.
    fn fold_into_baseline(&mut self, entry: &HistoryEntry) {
        if let Some(floor) = self.floor.as_mut() {
            entry.apply(floor);
        }
        for stacked in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            if let HistoryEntry::Snapshot { before, after } = stacked {
                entry.apply(before);
                entry.apply(after);
            }
        }
    }

    fn rebase(&mut self) {
        self.floor = Some(self.scene.clone());
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_limit(&mut self) {
        if self.max_undo == 0 {
            return;
        }
        while self.undo_stack.len() > self.max_undo {
            let Some(oldest) = self.undo_stack.pop_front() else {
                break;
            };
            if let Some(floor) = self.floor.as_mut() {
                oldest.apply(floor);
            }
            debug!("Undo limit reached; folded oldest {} entry into floor", oldest.label());
        }
    }
}
