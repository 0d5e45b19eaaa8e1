//! Scripted input sessions for headless rendering.
//!
//! A script is a TOML file describing a page and a sequence of input events:
//!
//! ```toml
//! [page]
//! width = 400.0
//! height = 300.0
//! device_pixel_ratio = 2.0
//!
//! [[events]]
//! type = "set_tool"
//! tool = "pencil"
//!
//! [[events]]
//! type = "stroke"
//! points = [[20.0, 20.0], [120.0, 80.0]]
//!
//! [[events]]
//! type = "resize_page"
//! width = 600.0
//! height = 300.0
//! ```
//!
//! Besides every [`InputEvent`], two convenience steps exist: `stroke` expands to a
//! full pointer gesture and `resize_page` changes the page measurements before
//! signalling a resize.

use crate::host::StaticHost;
use crate::input::InputEvent;
use crate::overlay::Overlay;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Initial page measurements.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default = "default_page_width")]
    pub width: f64,
    #[serde(default = "default_page_height")]
    pub height: f64,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            width: default_page_width(),
            height: default_page_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

/// Script-only steps that are not plain input events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageStep {
    /// Pointer down at the first point, moves through the rest, pointer up
    Stroke { points: Vec<[f64; 2]> },
    /// New page measurements followed by a resize signal
    ResizePage {
        width: f64,
        height: f64,
        device_pixel_ratio: Option<f64>,
    },
}

/// One entry of the `events` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Page(PageStep),
    Input(InputEvent),
}

/// A parsed input script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub events: Vec<Step>,
}

/// What a script run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Input events delivered to the overlay
    pub events: usize,
    /// Strokes on the canvas afterwards
    pub strokes: usize,
}

impl Script {
    /// Parses a script from TOML text.
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse input script")
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::parse(&source)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        debug!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.events.len()
        );
        Ok(script)
    }

    /// A host matching the script's initial page.
    pub fn host(&self) -> StaticHost {
        StaticHost::new(
            self.page.width,
            self.page.height,
            self.page.device_pixel_ratio,
        )
    }

    /// Expands the steps into input events, keeping page changes in order.
    fn expand(&self) -> Vec<Expanded> {
        let mut expanded = Vec::new();
        for step in &self.events {
            match step {
                Step::Input(event) => expanded.push(Expanded::Event(*event)),
                Step::Page(PageStep::Stroke { points }) => {
                    let Some(([x0, y0], rest)) = points.split_first() else {
                        warn!("Skipping stroke step without points");
                        continue;
                    };
                    expanded.push(Expanded::Event(InputEvent::PointerDown { x: *x0, y: *y0 }));
                    for [x, y] in rest {
                        expanded.push(Expanded::Event(InputEvent::PointerMove { x: *x, y: *y }));
                    }
                    expanded.push(Expanded::Event(InputEvent::PointerUp));
                }
                Step::Page(PageStep::ResizePage {
                    width,
                    height,
                    device_pixel_ratio,
                }) => expanded.push(Expanded::Page {
                    width: *width,
                    height: *height,
                    device_pixel_ratio: *device_pixel_ratio,
                }),
            }
        }
        expanded
    }

    /// Plays the script against a mounted overlay.
    pub fn run(&self, overlay: &mut Overlay<StaticHost>) -> RunSummary {
        let mut summary = RunSummary::default();
        for item in self.expand() {
            match item {
                Expanded::Event(event) => {
                    overlay.dispatch(event);
                    summary.events += 1;
                }
                Expanded::Page {
                    width,
                    height,
                    device_pixel_ratio,
                } => {
                    if let Some(host) = overlay.host_mut() {
                        host.set_content_size(width, height);
                        if let Some(ratio) = device_pixel_ratio {
                            host.set_device_pixel_ratio(ratio);
                        }
                    }
                    overlay.dispatch(InputEvent::Resize);
                    summary.events += 1;
                }
            }
        }

        summary.strokes = overlay.canvas().map_or(0, |canvas| canvas.scene().len());
        info!(
            "Script finished: {} events, {} strokes on canvas",
            summary.events, summary.strokes
        );
        summary
    }
}

enum Expanded {
    Event(InputEvent),
    Page {
        width: f64,
        height: f64,
        device_pixel_ratio: Option<f64>,
    },
}

fn default_page_width() -> f64 {
    800.0
}

fn default_page_height() -> f64 {
    600.0
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}
