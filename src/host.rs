//! Boundary between the drawing core and the page hosting it.
//!
//! The core never touches a document directly. Whatever embeds the overlay
//! implements [`Host`] to report content dimensions and device pixel ratio, and to
//! receive the display (CSS) size the surface element should take.

/// Raw content measurements reported by the host, in logical units.
///
/// The surface covers the page content rather than the viewport, so it takes the
/// largest of the document and body client/scroll extents.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMetrics {
    pub document_client_width: f64,
    pub document_client_height: f64,
    pub document_scroll_width: f64,
    pub document_scroll_height: f64,
    pub body_client_width: f64,
    pub body_client_height: f64,
    pub body_scroll_width: f64,
    pub body_scroll_height: f64,
}

impl ContentMetrics {
    /// Metrics for a page whose every extent equals `width` x `height`.
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            document_client_width: width,
            document_client_height: height,
            document_scroll_width: width,
            document_scroll_height: height,
            body_client_width: width,
            body_client_height: height,
            body_scroll_width: width,
            body_scroll_height: height,
        }
    }

    /// The logical size the surface must cover.
    pub fn content_size(&self) -> (f64, f64) {
        let width = self
            .document_client_width
            .max(self.document_scroll_width)
            .max(self.body_client_width)
            .max(self.body_scroll_width);
        let height = self
            .document_client_height
            .max(self.document_scroll_height)
            .max(self.body_client_height)
            .max(self.body_scroll_height);
        (width, height)
    }
}

/// The mount point the surface attaches to.
pub trait Host {
    /// Current content measurements, or `None` when the mount point is missing.
    fn content_metrics(&self) -> Option<ContentMetrics>;

    /// Ratio between logical units and physical pixels.
    fn device_pixel_ratio(&self) -> f64;

    /// Sets the displayed (CSS) size of the surface element.
    fn set_display_size(&mut self, width: f64, height: f64);
}

/// In-memory host used for headless rendering and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticHost {
    metrics: Option<ContentMetrics>,
    device_pixel_ratio: f64,
    display_size: Option<(f64, f64)>,
}

impl StaticHost {
    /// A host whose content is exactly `width` x `height` logical units.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            metrics: Some(ContentMetrics::uniform(width, height)),
            device_pixel_ratio,
            display_size: None,
        }
    }

    /// A host without a mount point.
    pub fn detached() -> Self {
        Self {
            metrics: None,
            device_pixel_ratio: 1.0,
            display_size: None,
        }
    }

    pub fn set_metrics(&mut self, metrics: Option<ContentMetrics>) {
        self.metrics = metrics;
    }

    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.metrics = Some(ContentMetrics::uniform(width, height));
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// The last display size pushed by the surface.
    pub fn display_size(&self) -> Option<(f64, f64)> {
        self.display_size
    }
}

impl Host for StaticHost {
    fn content_metrics(&self) -> Option<ContentMetrics> {
        self.metrics
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn set_display_size(&mut self, width: f64, height: f64) {
        self.display_size = Some((width, height));
    }
}
