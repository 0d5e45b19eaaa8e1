//! Mountable annotation overlay.
//!
//! [`Overlay`] ties a [`Canvas`] and a [`ToolController`] to a [`Host`] for the
//! duration of a mount. Unmounting releases the surface and hands the host back.
//! Input arrives either as semantic method calls or as [`InputEvent`]s through
//! [`Overlay::dispatch`]; after each one the canvas repaints whatever changed.

use crate::canvas::Canvas;
use crate::config::Config;
use crate::host::Host;
use crate::input::{InputEvent, Tool, ToolController};
use log::{debug, info, warn};
use thiserror::Error;

/// Errors from the overlay lifecycle.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Overlay is already mounted")]
    AlreadyMounted,
}

struct Mount<H> {
    host: H,
    canvas: Canvas,
}

/// Annotation overlay attached to at most one host at a time.
pub struct Overlay<H: Host> {
    config: Config,
    tools: ToolController,
    mount: Option<Mount<H>>,
}

impl<H: Host> Overlay<H> {
    pub fn new(config: Config) -> Self {
        let tools = ToolController::new(config.default_tool(), config.brush.clone());
        Self {
            config,
            tools,
            mount: None,
        }
    }

    /// Attaches to `host`, allocating the surface and applying the active tool.
    ///
    /// A host without a usable mount point still mounts; drawing is then disabled
    /// and every canvas operation is a no-op.
    ///
    /// # Errors
    /// Returns [`OverlayError::AlreadyMounted`] if a host is already attached; the
    /// new host is dropped.
    pub fn mount(&mut self, mut host: H) -> Result<(), OverlayError> {
        if self.mount.is_some() {
            return Err(OverlayError::AlreadyMounted);
        }

        let mut canvas = Canvas::new(&self.config);
        if canvas.initialize(&mut host) {
            info!("Overlay mounted with {} tool", self.tools.current_tool());
        } else {
            warn!("Overlay mounted without a drawing surface");
        }
        let active = self.tools.current_tool();
        self.tools.set_tool(&mut canvas, active);
        canvas.render();

        self.mount = Some(Mount { host, canvas });
        Ok(())
    }

    /// Detaches from the host, releasing the surface. Returns the host, if mounted.
    pub fn unmount(&mut self) -> Option<H> {
        let Mount { host, mut canvas } = self.mount.take()?;
        canvas.release();
        info!("Overlay unmounted");
        Some(host)
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Routes one input event. Returns whether the event reached a mounted canvas.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        debug!("Dispatching {:?}", event);
        match event {
            InputEvent::SetTool { tool } => {
                self.set_tool(tool);
                return self.is_mounted();
            }
            InputEvent::Resize => return self.on_resize(),
            _ => {}
        }

        let Some(mount) = self.mount.as_mut() else {
            debug!("Event ignored: overlay not mounted");
            return false;
        };
        let canvas = &mut mount.canvas;
        match event {
            InputEvent::Undo => {
                canvas.undo();
            }
            InputEvent::Redo => {
                canvas.redo();
            }
            InputEvent::PointerDown { x, y } => canvas.pointer_down(x, y),
            InputEvent::PointerMove { x, y } => canvas.pointer_move(x, y),
            InputEvent::PointerUp => canvas.pointer_up(),
            InputEvent::PointerLeave => canvas.pointer_leave(),
            InputEvent::DeleteSelection => {
                self.tools.delete_selection(canvas);
            }
            InputEvent::Clear => {
                canvas.clear();
            }
            InputEvent::SetTool { .. } | InputEvent::Resize => {}
        }
        canvas.render();
        true
    }

    /// Activates `tool`. Works while unmounted; the tool applies on the next mount.
    pub fn set_tool(&mut self, tool: Tool) {
        match self.mount.as_mut() {
            Some(mount) => {
                self.tools.set_tool(&mut mount.canvas, tool);
                mount.canvas.render();
            }
            None => self.tools.preselect(tool),
        }
    }

    pub fn current_tool(&self) -> Tool {
        self.tools.current_tool()
    }

    pub fn undo(&mut self) -> bool {
        self.with_canvas(Canvas::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.with_canvas(Canvas::redo)
    }

    pub fn can_undo(&self) -> bool {
        self.canvas().is_some_and(Canvas::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.canvas().is_some_and(Canvas::can_redo)
    }

    /// Deletes the selection if the select tool is active.
    pub fn delete_selection(&mut self) -> bool {
        let Some(mount) = self.mount.as_mut() else {
            return false;
        };
        let deleted = self.tools.delete_selection(&mut mount.canvas);
        mount.canvas.render();
        deleted
    }

    pub fn clear(&mut self) -> bool {
        self.with_canvas(Canvas::clear)
    }

    /// Re-measures the host after a content or device-pixel-ratio change.
    pub fn on_resize(&mut self) -> bool {
        let Some(Mount { host, canvas }) = self.mount.as_mut() else {
            return false;
        };
        canvas.resize(host)
    }

    /// Mutable access to the host, e.g. to feed it new measurements before a resize.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.mount.as_mut().map(|mount| &mut mount.host)
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.mount.as_ref().map(|mount| &mount.canvas)
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        self.mount.as_mut().map(|mount| &mut mount.canvas)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn with_canvas(&mut self, op: impl FnOnce(&mut Canvas) -> bool) -> bool {
        let Some(mount) = self.mount.as_mut() else {
            return false;
        };
        let changed = op(&mut mount.canvas);
        mount.canvas.render();
        changed
    }
}
