//! Device-resolution pixel buffer sized to the page content.

use super::render;
use crate::config::ResizePolicy;
use crate::host::Host;
use crate::util;
use log::{debug, info, warn};
use std::io::Write;
use thiserror::Error;

/// Lowest device pixel ratio the surface accepts.
pub const MIN_SCALE: f64 = 0.25;

/// Failures raised by [`Surface`].
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("host mount point is not available")]
    HostUnavailable,
    #[error("surface has not been initialized")]
    Uninitialized,
    #[error("content dimensions {width}x{height} are not drawable")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("backing store is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: i32,
        expected_height: i32,
        actual_width: i32,
        actual_height: i32,
    },
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// Result of a [`Surface::resize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Size and scale were unchanged (or the surface is not initialized)
    Unchanged,
    /// The buffer was reallocated
    Resized {
        /// The raster is blank and must be repainted from the stroke log
        needs_replay: bool,
    },
}

/// The drawing target.
///
/// Drawing commands are issued in logical (CSS pixel) units. The backing store
/// is `ceil(logical * scale)` device pixels in each dimension and every context
/// handed out has the matching scale transform applied.
#[derive(Debug)]
pub struct Surface {
    buffer: Option<cairo::ImageSurface>,
    logical_width: f64,
    logical_height: f64,
    scale: f64,
    max_scale: f64,
}

impl Surface {
    /// Creates an uninitialized surface. `max_scale` caps the device pixel ratio.
    pub fn new(max_scale: f64) -> Self {
        Self {
            buffer: None,
            logical_width: 0.0,
            logical_height: 0.0,
            scale: 1.0,
            max_scale: max_scale.max(MIN_SCALE),
        }
    }

    /// Measures the host and allocates the backing store.
    ///
    /// # Errors
    /// Returns [`SurfaceError::HostUnavailable`] when the host has no mount point and
    /// [`SurfaceError::InvalidDimensions`] when the content has no drawable area.
    pub fn initialize(&mut self, host: &mut dyn Host) -> Result<(), SurfaceError> {
        let (width, height, scale) = self.measure(host)?;
        let buffer = allocate(width, height, scale)?;

        self.buffer = Some(buffer);
        self.logical_width = width;
        self.logical_height = height;
        self.scale = scale;
        host.set_display_size(width, height);
        self.verify()?;

        info!(
            "Surface initialized at {}x{} logical ({}x{} device, scale {:.2})",
            width,
            height,
            util::device_pixels(width, scale),
            util::device_pixels(height, scale),
            scale
        );
        Ok(())
    }

    /// Re-measures the host and reallocates the buffer if anything changed.
    ///
    /// Calling this before [`initialize`](Self::initialize) is a no-op. With
    /// [`ResizePolicy::Raster`] the old pixels are copied into the new buffer at the
    /// origin; with [`ResizePolicy::Replay`] the new buffer starts blank and the
    /// caller repaints it from its stroke log.
    pub fn resize(
        &mut self,
        host: &mut dyn Host,
        policy: ResizePolicy,
    ) -> Result<ResizeOutcome, SurfaceError> {
        let Some(old) = self.buffer.as_ref() else {
            debug!("Resize ignored: surface not initialized");
            return Ok(ResizeOutcome::Unchanged);
        };

        let (width, height, scale) = self.measure(host)?;
        if width == self.logical_width && height == self.logical_height && scale == self.scale {
            return Ok(ResizeOutcome::Unchanged);
        }

        let buffer = allocate(width, height, scale)?;
        if policy == ResizePolicy::Raster {
            let ctx = cairo::Context::new(&buffer)?;
            ctx.scale(scale / self.scale, scale / self.scale);
            ctx.set_source_surface(old, 0.0, 0.0)?;
            ctx.paint()?;
        }

        debug!(
            "Surface resized {}x{}@{:.2} -> {}x{}@{:.2} ({:?})",
            self.logical_width, self.logical_height, self.scale, width, height, scale, policy
        );

        self.buffer = Some(buffer);
        self.logical_width = width;
        self.logical_height = height;
        self.scale = scale;
        host.set_display_size(width, height);
        self.verify()?;

        Ok(ResizeOutcome::Resized {
            needs_replay: policy == ResizePolicy::Replay,
        })
    }

    /// Resets `ctx` to identity, then applies the current scale.
    ///
    /// Safe to call any number of times on the same context.
    pub fn apply_transform(&self, ctx: &cairo::Context) {
        ctx.identity_matrix();
        ctx.scale(self.scale, self.scale);
    }

    /// Returns a drawing context for the buffer with the transform applied.
    pub fn context(&self) -> Result<cairo::Context, SurfaceError> {
        let buffer = self.buffer.as_ref().ok_or(SurfaceError::Uninitialized)?;
        let ctx = cairo::Context::new(buffer)?;
        self.apply_transform(&ctx);
        Ok(ctx)
    }

    /// Clears every pixel to transparent.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        render::clear_target(&ctx);
        Ok(())
    }

    /// Checks that the backing store matches `ceil(logical * scale)`.
    pub fn verify(&self) -> Result<(), SurfaceError> {
        let buffer = self.buffer.as_ref().ok_or(SurfaceError::Uninitialized)?;
        let expected_width = util::device_pixels(self.logical_width, self.scale);
        let expected_height = util::device_pixels(self.logical_height, self.scale);
        if buffer.width() != expected_width || buffer.height() != expected_height {
            return Err(SurfaceError::DimensionMismatch {
                expected_width,
                expected_height,
                actual_width: buffer.width(),
                actual_height: buffer.height(),
            });
        }
        Ok(())
    }

    /// Drops the backing store. Returns whether a buffer was held.
    pub fn release(&mut self) -> bool {
        let released = self.buffer.take().is_some();
        if released {
            debug!("Surface buffer released");
        }
        released
    }

    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Logical (display) size in CSS pixels.
    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    /// Current device pixel ratio.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> Option<(i32, i32)> {
        self.buffer.as_ref().map(|b| (b.width(), b.height()))
    }

    /// Returns true if the logical point lies on the surface.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.is_initialized()
            && x >= 0.0
            && y >= 0.0
            && x <= self.logical_width
            && y <= self.logical_height
    }

    /// Alpha of the device pixel under the logical point `(x, y)`.
    pub fn alpha_at(&mut self, x: f64, y: f64) -> Option<u8> {
        let scale = self.scale;
        let buffer = self.buffer.as_mut()?;
        let px = (x * scale).floor();
        let py = (y * scale).floor();
        if px < 0.0 || py < 0.0 || px >= buffer.width() as f64 || py >= buffer.height() as f64 {
            return None;
        }
        buffer.flush();
        let stride = buffer.stride() as usize;
        let data = buffer.data().ok()?;
        // ARGB32 is native-endian; alpha is the most significant byte.
        let offset = py as usize * stride + px as usize * 4;
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Some((pixel >> 24) as u8)
    }

    /// Copies the raw premultiplied ARGB32 bytes of the buffer.
    pub fn pixels(&mut self) -> Option<Vec<u8>> {
        let buffer = self.buffer.as_mut()?;
        buffer.flush();
        let data = buffer.data().ok()?;
        Some(data.to_vec())
    }

    /// Encodes the buffer as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        let buffer = self.buffer.as_ref().ok_or(SurfaceError::Uninitialized)?;
        buffer.write_to_png(writer)?;
        Ok(())
    }

    fn measure(&self, host: &dyn Host) -> Result<(f64, f64, f64), SurfaceError> {
        let metrics = host
            .content_metrics()
            .ok_or(SurfaceError::HostUnavailable)?;
        let (width, height) = metrics.content_size();
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }

        let ratio = host.device_pixel_ratio();
        let scale = if ratio.is_finite() && ratio > 0.0 {
            ratio.clamp(MIN_SCALE, self.max_scale)
        } else {
            warn!("Ignoring invalid device pixel ratio {ratio}, using 1.0");
            1.0
        };
        Ok((width, height, scale))
    }

    #[cfg(test)]
    pub(crate) fn replace_buffer_for_test(&mut self, buffer: cairo::ImageSurface) {
        self.buffer = Some(buffer);
    }
}

fn allocate(width: f64, height: f64, scale: f64) -> Result<cairo::ImageSurface, SurfaceError> {
    let device_width = util::device_pixels(width, scale);
    let device_height = util::device_pixels(height, scale);
    if device_width <= 0 || device_height <= 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    Ok(cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        device_width,
        device_height,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BrushKind, CYAN};
    use crate::host::StaticHost;

    fn paint_line(surface: &Surface, from: (f64, f64), to: (f64, f64)) {
        let ctx = surface.context().unwrap();
        render::render_path(&ctx, &[from, to], BrushKind::Stroke, 6.0, CYAN);
    }

    #[test]
    fn backing_store_is_ceiled_device_size() {
        let mut host = StaticHost::new(100.5, 40.2, 2.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        assert_eq!(surface.backing_size(), Some((201, 81)));
        assert_eq!(surface.logical_size(), (100.5, 40.2));
        assert_eq!(host.display_size(), Some((100.5, 40.2)));
    }

    #[test]
    fn missing_host_leaves_surface_uninitialized() {
        let mut host = StaticHost::detached();
        let mut surface = Surface::new(4.0);
        assert!(matches!(
            surface.initialize(&mut host),
            Err(SurfaceError::HostUnavailable)
        ));
        assert!(!surface.is_initialized());
        assert!(matches!(surface.context(), Err(SurfaceError::Uninitialized)));
    }

    #[test]
    fn zero_sized_content_is_rejected() {
        let mut host = StaticHost::new(0.0, 100.0, 1.0);
        let mut surface = Surface::new(4.0);
        assert!(matches!(
            surface.initialize(&mut host),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn resize_before_initialize_is_noop() {
        let mut host = StaticHost::new(10.0, 10.0, 1.0);
        let mut surface = Surface::new(4.0);
        let outcome = surface.resize(&mut host, ResizePolicy::Replay).unwrap();
        assert_eq!(outcome, ResizeOutcome::Unchanged);
        assert!(!surface.is_initialized());
    }

    #[test]
    fn redundant_resize_is_unchanged() {
        let mut host = StaticHost::new(50.0, 50.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        paint_line(&surface, (0.0, 25.0), (50.0, 25.0));
        let outcome = surface.resize(&mut host, ResizePolicy::Replay).unwrap();
        assert_eq!(outcome, ResizeOutcome::Unchanged);
        assert_eq!(surface.alpha_at(25.0, 25.0), Some(255));
    }

    #[test]
    fn transform_does_not_compound() {
        let mut host = StaticHost::new(20.0, 20.0, 2.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        let ctx = surface.context().unwrap();
        surface.apply_transform(&ctx);
        surface.apply_transform(&ctx);
        let matrix = ctx.matrix();
        assert_eq!(matrix.xx(), 2.0);
        assert_eq!(matrix.yy(), 2.0);
        assert_eq!(matrix.x0(), 0.0);
    }

    #[test]
    fn dpr_change_reallocates_and_replay_policy_blanks() {
        let mut host = StaticHost::new(30.0, 30.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        paint_line(&surface, (0.0, 15.0), (30.0, 15.0));

        host.set_device_pixel_ratio(2.0);
        let outcome = surface.resize(&mut host, ResizePolicy::Replay).unwrap();
        assert_eq!(outcome, ResizeOutcome::Resized { needs_replay: true });
        assert_eq!(surface.backing_size(), Some((60, 60)));
        assert_eq!(surface.alpha_at(15.0, 15.0), Some(0));
    }

    #[test]
    fn raster_policy_preserves_pixels_in_logical_space() {
        let mut host = StaticHost::new(30.0, 30.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        paint_line(&surface, (0.0, 15.0), (30.0, 15.0));

        host.set_content_size(60.0, 60.0);
        host.set_device_pixel_ratio(2.0);
        let outcome = surface.resize(&mut host, ResizePolicy::Raster).unwrap();
        assert_eq!(outcome, ResizeOutcome::Resized { needs_replay: false });
        assert_eq!(surface.backing_size(), Some((120, 120)));
        assert_eq!(surface.alpha_at(15.0, 15.0), Some(255));
        assert_eq!(surface.alpha_at(45.0, 15.0), Some(0));
    }

    #[test]
    fn device_pixel_ratio_is_clamped() {
        let mut host = StaticHost::new(10.0, 10.0, 16.0);
        let mut surface = Surface::new(3.0);
        surface.initialize(&mut host).unwrap();
        assert_eq!(surface.scale(), 3.0);

        host.set_device_pixel_ratio(f64::NAN);
        surface.resize(&mut host, ResizePolicy::Replay).unwrap();
        assert_eq!(surface.scale(), 1.0);
    }

    #[test]
    fn verify_detects_mismatched_buffer() {
        let mut host = StaticHost::new(10.0, 10.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        surface.replace_buffer_for_test(
            cairo::ImageSurface::create(cairo::Format::ARgb32, 4, 4).unwrap(),
        );
        assert!(matches!(
            surface.verify(),
            Err(SurfaceError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn release_drops_buffer_once() {
        let mut host = StaticHost::new(10.0, 10.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        assert!(surface.release());
        assert!(!surface.release());
        assert!(surface.alpha_at(1.0, 1.0).is_none());
    }

    #[test]
    fn png_export_writes_signature() {
        let mut host = StaticHost::new(8.0, 8.0, 1.0);
        let mut surface = Surface::new(4.0);
        surface.initialize(&mut host).unwrap();
        let mut bytes = Vec::new();
        surface.write_png(&mut bytes).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
