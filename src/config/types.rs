//! Configuration type definitions.

use super::enums::{ColorSpec, ResizePolicy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush settings applied by the drawing tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Pencil line width in logical pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_pencil_width")]
    pub pencil_width: f64,

    /// Pencil ink - a named color, a `#RRGGBB` literal, or an RGB array like `[0, 255, 255]`
    #[serde(default = "default_pencil_color")]
    pub pencil_color: ColorSpec,

    /// Eraser width in logical pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            pencil_width: default_pencil_width(),
            pencil_color: default_pencil_color(),
            eraser_width: default_eraser_width(),
        }
    }
}

/// Drawing surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// What happens to drawn content when the page is resized
    /// - "replay" = repaint from stroke history (lossless, recommended)
    /// - "raster" = copy the existing pixels (clips when shrinking)
    #[serde(default)]
    pub resize_policy: ResizePolicy,

    /// Upper bound for the device pixel ratio (valid range: 1.0 - 8.0)
    /// Keeps memory bounded on very dense displays
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            resize_policy: ResizePolicy::default(),
            max_scale: default_max_scale(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct HistoryConfig {
    /// Maximum number of undoable steps (0 = unlimited)
    /// Older steps become permanent once the limit is reached
    #[serde(default)]
    pub max_undo: usize,
}

/// Selection tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Extra distance in logical pixels around a stroke that still counts as a hit
    /// (valid range: 0.0 - 32.0). Also the drag distance below which a press is a click.
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
        }
    }
}

/// Tool palette settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    /// Tool active when the overlay mounts (select, pencil, erase, text, frame, line)
    #[serde(default = "default_tool")]
    pub default_tool: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pencil_width() -> f64 {
    15.0
}

fn default_pencil_color() -> ColorSpec {
    ColorSpec::Name("#00FFFF".to_string())
}

fn default_eraser_width() -> f64 {
    30.0
}

fn default_max_scale() -> f64 {
    4.0
}

fn default_hit_tolerance() -> f64 {
    4.0
}

fn default_tool() -> String {
    "select".to_string()
}
