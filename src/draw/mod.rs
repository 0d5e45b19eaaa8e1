//! Rendering primitives and the pixel surface (Cairo-based).
//!
//! This module defines the core drawing types used by the overlay:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Stroke`]: One completed freehand action (ink or eraser)
//! - [`Scene`]: The ordered set of strokes currently on the canvas
//! - [`Surface`]: The DPR-aware backing store strokes are painted into
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod dirty;
pub mod render;
pub mod scene;
pub mod stroke;
pub mod surface;

// Re-export commonly used types at module level
pub use color::{
    BLACK, BLUE, CYAN, Color, GREEN, ORANGE, PINK, RED, SELECTION_BLUE, WHITE, YELLOW,
};
pub use dirty::{Damage, DirtyTracker};
pub use render::{render_path, render_scene, render_stroke};
pub use scene::Scene;
pub use stroke::{Brush, BrushKind, Stroke};
pub use surface::{ResizeOutcome, Surface, SurfaceError};
