//! Semantic input events delivered to the overlay.
//!
//! Whatever listens to the page (keyboard shortcuts, toolbar clicks, pointer and
//! resize notifications) translates raw events into these before handing them to
//! [`Overlay::dispatch`](crate::overlay::Overlay::dispatch). Coordinates are logical
//! units relative to the surface origin.

use super::tool::Tool;
use serde::{Deserialize, Serialize};

/// One user or environment action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Activate a palette tool
    SetTool { tool: Tool },
    Undo,
    Redo,
    /// Primary button pressed
    PointerDown { x: f64, y: f64 },
    /// Pointer moved while tracked
    PointerMove { x: f64, y: f64 },
    /// Primary button released
    PointerUp,
    /// Pointer left the surface
    PointerLeave,
    /// Delete the current selection (select tool only)
    DeleteSelection,
    /// Remove every stroke as one undoable step
    Clear,
    /// Page content or device pixel ratio changed; the host has the new values
    Resize,
}
