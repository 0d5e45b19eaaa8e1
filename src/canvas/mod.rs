//! Drawing canvas: surface, history, gesture and selection composed together.
//!
//! The canvas owns a [`Surface`] and a [`HistoryStore`] and exposes undo/redo as
//! delegating methods. Tools configure it through [`Canvas::apply_capabilities`];
//! the pointer methods turn gestures into history entries.

mod gesture;

pub use gesture::Gesture;

use crate::config::{Config, ResizePolicy};
use crate::draw::{
    Brush, BrushKind, Color, Damage, DirtyTracker, Scene, Stroke, Surface, SurfaceError,
    render::{self, render_marquee, render_path, render_selection_outline},
    surface::ResizeOutcome,
};
use crate::history::{HistoryEntry, HistoryStore};
use crate::host::Host;
use crate::input::Capabilities;
use crate::util::Rect;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Drawing canvas with undo/redo.
pub struct Canvas {
    surface: Surface,
    history: HistoryStore,
    gesture: Gesture,
    selection: BTreeSet<u64>,
    dirty: DirtyTracker,
    /// Pointer gestures draw
    drawing_mode: bool,
    /// Pointer gestures pick strokes
    selection_enabled: bool,
    /// Brush kind in effect; `None` disables stroke production
    brush_kind: BrushKind,
    /// Last configured brush parameters
    brush: Brush,
    next_seq: u64,
    resize_policy: ResizePolicy,
    hit_tolerance: f64,
}

impl Canvas {
    /// Creates an unmounted canvas from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            surface: Surface::new(config.surface.max_scale),
            history: HistoryStore::new(config.history.max_undo),
            gesture: Gesture::Idle,
            selection: BTreeSet::new(),
            dirty: DirtyTracker::new(),
            drawing_mode: false,
            selection_enabled: false,
            brush_kind: BrushKind::None,
            brush: Brush {
                kind: BrushKind::Stroke,
                width: config.brush.pencil_width,
                color: config.brush.pencil_color.to_color(),
            },
            next_seq: 1,
            resize_policy: config.surface.resize_policy,
            hit_tolerance: config.selection.hit_tolerance,
        }
    }

    /// Allocates the surface for `host` and saves the initial history state.
    ///
    /// Returns `false` when the host is unusable; the canvas then ignores all
    /// drawing operations.
    pub fn initialize(&mut self, host: &mut dyn Host) -> bool {
        match self.surface.initialize(host) {
            Ok(()) => {
                self.history.save_initial_state();
                self.dirty.mark_full();
                self.render();
                true
            }
            Err(err) => {
                warn!("Drawing surface unavailable, overlay disabled: {err}");
                false
            }
        }
    }

    /// Handles a content or device-pixel-ratio change.
    ///
    /// Returns `true` if the surface was reallocated. A surface that fails its
    /// dimension check is rebuilt from scratch and repainted.
    pub fn resize(&mut self, host: &mut dyn Host) -> bool {
        if !self.surface.is_initialized() {
            debug!("Resize ignored: canvas not initialized");
            return false;
        }

        if let Err(err) = self.surface.verify() {
            warn!("Surface inconsistent before resize ({err}); re-initializing");
            return self.reinitialize(host);
        }

        match self.surface.resize(host, self.resize_policy) {
            Ok(ResizeOutcome::Unchanged) => false,
            Ok(ResizeOutcome::Resized { needs_replay }) => {
                if needs_replay {
                    self.replay_scene();
                }
                true
            }
            Err(err @ SurfaceError::DimensionMismatch { .. }) => {
                warn!("Surface inconsistent after resize ({err}); re-initializing");
                self.reinitialize(host)
            }
            Err(err) => {
                warn!("Surface resize failed: {err}");
                false
            }
        }
    }

    /// Drops the surface and history. The canvas can be initialized again.
    pub fn release(&mut self) {
        self.gesture = Gesture::Idle;
        self.selection.clear();
        self.history.clear_history();
        self.surface.release();
    }

    // ------------------------------------------------------------------
    // Tool configuration
    // ------------------------------------------------------------------

    /// Applies a tool's capability record.
    ///
    /// Brush parameters are only replaced when the record carries a brush; the
    /// brush kind itself always follows the record.
    pub fn apply_capabilities(&mut self, caps: Capabilities) {
        if let Some(brush) = caps.brush() {
            self.brush = brush;
        }
        self.brush_kind = caps.brush_kind;
        self.drawing_mode = caps.drawing_mode_enabled;
        self.selection_enabled = caps.selection_enabled;
    }

    /// Cancels the in-progress gesture without committing. Returns whether one existed.
    pub fn abort_gesture(&mut self) -> bool {
        let active = self.gesture.is_active();
        if active {
            debug!("Gesture cancelled");
        }
        self.gesture = Gesture::Idle;
        active
    }

    /// Clears the selection and forces a full redraw.
    pub fn discard_selection(&mut self) {
        self.selection.clear();
        self.dirty.mark_full();
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Starts a gesture at logical `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.abort_gesture() {
            debug!("Pointer down while a gesture was active; previous gesture dropped");
        }
        if !self.surface.contains(x, y) {
            return;
        }

        self.gesture = if self.selection_enabled {
            Gesture::Selecting {
                start: (x, y),
                current: (x, y),
            }
        } else if self.drawing_mode && self.brush_kind != BrushKind::None {
            Gesture::Drawing {
                brush: Brush {
                    kind: self.brush_kind,
                    ..self.brush
                },
                points: vec![(x, y)],
            }
        } else if self.drawing_mode {
            Gesture::Inert
        } else {
            Gesture::Idle
        };
    }

    /// Extends the gesture. Leaving the surface cancels it.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.gesture.is_active() {
            return;
        }
        if !self.surface.contains(x, y) {
            debug!("Pointer left the surface at ({x:.1}, {y:.1})");
            self.abort_gesture();
            return;
        }

        match &mut self.gesture {
            Gesture::Drawing { points, .. } => points.push((x, y)),
            Gesture::Selecting { current, .. } => *current = (x, y),
            Gesture::Idle | Gesture::Inert => {}
        }
    }

    /// Completes the gesture, committing a stroke or updating the selection.
    pub fn pointer_up(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Drawing { brush, points } => {
                self.commit_stroke(points, brush);
            }
            Gesture::Selecting { start, current } => self.finish_selection(start, current),
            Gesture::Idle | Gesture::Inert => {}
        }
    }

    /// Pointer left the surface: cancel without committing.
    pub fn pointer_leave(&mut self) {
        self.abort_gesture();
    }

    // ------------------------------------------------------------------
    // Structural edits and history
    // ------------------------------------------------------------------

    /// Deletes the selected strokes as one undoable step.
    pub fn delete_selection(&mut self) -> bool {
        let removed: Vec<Stroke> = self
            .selection
            .iter()
            .filter_map(|seq| self.history.scene().get(*seq).cloned())
            .collect();
        self.selection.clear();
        if removed.is_empty() {
            return false;
        }

        info!("Deleting {} selected stroke(s)", removed.len());
        self.history.commit(HistoryEntry::Delete(removed));
        self.dirty.mark_full();
        true
    }

    /// Removes every stroke as one undoable step.
    pub fn clear(&mut self) -> bool {
        if !self.surface.is_initialized() || self.history.scene().is_empty() {
            return false;
        }
        self.abort_gesture();
        self.selection.clear();
        let before = self.history.scene().clone();
        self.history.commit(HistoryEntry::Snapshot {
            before,
            after: Scene::new(),
        });
        self.dirty.mark_full();
        true
    }

    /// Draws a stroke without creating an undo step.
    ///
    /// Recording is paused for the duration of the commit, so the stroke becomes
    /// part of the permanent baseline. Returns the stroke's sequence number.
    pub fn draw_unrecorded(&mut self, points: Vec<(f64, f64)>, brush: Brush) -> Option<u64> {
        let recording = self.history.is_recording();
        self.history.off_history();
        let seq = self.commit_stroke(points, brush);
        if recording {
            self.history.on_history();
        }
        seq
    }

    pub fn undo(&mut self) -> bool {
        self.abort_gesture();
        let changed = self.history.undo();
        if changed {
            self.after_history_change();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.abort_gesture();
        let changed = self.history.redo();
        if changed {
            self.after_history_change();
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Suspends history recording.
    pub fn off_history(&mut self) {
        self.history.off_history();
    }

    /// Resumes history recording.
    pub fn on_history(&mut self) {
        self.history.on_history();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Paints pending changes onto the surface. Returns whether anything was drawn.
    pub fn render(&mut self) -> bool {
        if !self.surface.is_initialized() {
            return false;
        }

        let damage = self.dirty.take();
        if damage == Damage::None {
            return false;
        }

        let ctx = match self.surface.context() {
            Ok(ctx) => ctx,
            Err(err) => {
                warn!("Cannot render canvas: {err}");
                return false;
            }
        };

        match damage {
            Damage::None => {}
            Damage::Strokes(seqs) => {
                for seq in seqs {
                    if let Some(stroke) = self.history.scene().get(seq) {
                        render::render_stroke(&ctx, stroke);
                    }
                }
            }
            Damage::Full => {
                render::clear_target(&ctx);
                render::render_scene(&ctx, self.history.scene());
                for seq in &self.selection {
                    if let Some(bounds) = self
                        .history
                        .scene()
                        .get(*seq)
                        .and_then(Stroke::bounding_box)
                    {
                        render_selection_outline(&ctx, bounds);
                    }
                }
            }
        }
        true
    }

    /// Draws the live gesture onto `ctx` (an upper layer the size of the surface).
    pub fn render_preview(&self, ctx: &cairo::Context) {
        self.surface.apply_transform(ctx);
        match &self.gesture {
            Gesture::Drawing { brush, points } => {
                if brush.kind == BrushKind::Eraser {
                    // The eraser has nothing to punch out on the upper layer; show its path instead.
                    let trail = Color::new(0.5, 0.5, 0.5, 0.35);
                    render_path(ctx, points, BrushKind::Stroke, brush.width, trail);
                } else {
                    render_path(ctx, points, brush.kind, brush.width, brush.color);
                }
            }
            Gesture::Selecting { start, current } => {
                if let Some(rect) = Rect::from_corners(*start, *current) {
                    render_marquee(ctx, rect);
                }
            }
            Gesture::Idle | Gesture::Inert => {}
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.surface.is_initialized()
    }

    pub fn scene(&self) -> &Scene {
        self.history.scene()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Pixel probes and export need exclusive access to the buffer.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Selected stroke sequence numbers in paint order.
    pub fn selection(&self) -> Vec<u64> {
        self.selection.iter().copied().collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn needs_render(&self) -> bool {
        self.dirty.is_dirty()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn commit_stroke(&mut self, points: Vec<(f64, f64)>, brush: Brush) -> Option<u64> {
        if points.is_empty() || brush.kind == BrushKind::None || !self.surface.is_initialized() {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        let stroke = Stroke::new(seq, points, brush);
        debug!(
            "Stroke {} completed ({} points, {:?})",
            seq,
            stroke.points.len(),
            stroke.kind
        );
        self.history.commit(HistoryEntry::Draw(stroke));
        self.dirty.mark_stroke(seq);
        Some(seq)
    }

    fn finish_selection(&mut self, start: (f64, f64), end: (f64, f64)) {
        let travel = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
        let scene = self.history.scene();

        let picked: BTreeSet<u64> = if travel <= self.hit_tolerance {
            scene
                .iter()
                .rev()
                .filter(|stroke| !stroke.is_eraser())
                .find(|stroke| stroke.hit_test(end.0, end.1, self.hit_tolerance))
                .map(|stroke| stroke.seq)
                .into_iter()
                .collect()
        } else {
            match Rect::from_corners(start, end) {
                Some(marquee) => scene
                    .iter()
                    .filter(|stroke| !stroke.is_eraser())
                    .filter(|stroke| {
                        stroke
                            .bounding_box()
                            .is_some_and(|bounds| bounds.intersects(&marquee))
                    })
                    .map(|stroke| stroke.seq)
                    .collect(),
                None => BTreeSet::new(),
            }
        };

        if picked != self.selection {
            debug!("Selection now {:?}", picked);
            self.selection = picked;
            self.dirty.mark_full();
        }
    }

    fn after_history_change(&mut self) {
        let scene = self.history.scene();
        self.selection.retain(|seq| scene.contains(*seq));
        self.dirty.mark_full();
    }

    /// Repaints the whole scene with recording paused.
    fn replay_scene(&mut self) {
        let recording = self.history.is_recording();
        self.history.off_history();
        self.dirty.mark_full();
        self.render();
        if recording {
            self.history.on_history();
        }
    }

    fn reinitialize(&mut self, host: &mut dyn Host) -> bool {
        self.surface.release();
        match self.surface.initialize(host) {
            Ok(()) => {
                self.replay_scene();
                true
            }
            Err(err) => {
                warn!("Surface re-initialization failed, overlay disabled: {err}");
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn next_seq(&self) -> u64 {
        self.next_seq
    }
}
