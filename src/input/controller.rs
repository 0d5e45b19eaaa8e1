//! Active-tool tracking and tool switching.

use super::tool::Tool;
use crate::canvas::Canvas;
use crate::config::BrushConfig;
use log::{debug, info};

/// Owns the active tool and applies tool capabilities to a canvas.
///
/// The controller does not hold the canvas; callers pass it in for each
/// operation that touches it.
#[derive(Debug, Clone)]
pub struct ToolController {
    active: Tool,
    brushes: BrushConfig,
}

impl ToolController {
    pub fn new(initial: Tool, brushes: BrushConfig) -> Self {
        Self {
            active: initial,
            brushes,
        }
    }

    pub fn current_tool(&self) -> Tool {
        self.active
    }

    /// Switches to `next` and reconfigures the canvas.
    ///
    /// Any in-progress gesture is dropped without committing and the selection is
    /// discarded before the new tool's capabilities are applied. Re-selecting the
    /// active tool goes through the same steps.
    pub fn set_tool(&mut self, canvas: &mut Canvas, next: Tool) {
        if canvas.abort_gesture() {
            debug!("Tool switch cancelled the in-progress gesture");
        }
        canvas.discard_selection();
        canvas.apply_capabilities(next.capabilities(&self.brushes));

        if next != self.active {
            info!("Tool switched: {} -> {}", self.active, next);
        }
        self.active = next;
    }

    /// Records `next` as active without a canvas to configure (overlay not mounted).
    pub fn preselect(&mut self, next: Tool) {
        debug!("Tool {} selected while unmounted", next);
        self.active = next;
    }

    /// Deletes the canvas selection. Only the select tool can delete.
    pub fn delete_selection(&self, canvas: &mut Canvas) -> bool {
        if self.active != Tool::Select {
            debug!("Delete ignored: {} tool active", self.active);
            return false;
        }
        canvas.delete_selection()
    }
}
