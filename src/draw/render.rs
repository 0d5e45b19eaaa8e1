//! Cairo-based rendering functions for strokes and selection chrome.
//!
//! All functions draw in logical units; callers are expected to hand in a context
//! whose transform already maps logical units to device pixels (see
//! [`Surface::apply_transform`](super::Surface::apply_transform)).

use super::color::{Color, SELECTION_BLUE};
use super::scene::Scene;
use super::stroke::{BrushKind, Stroke};
use crate::util::Rect;

/// Renders all strokes of a scene in paint order.
pub fn render_scene(ctx: &cairo::Context, scene: &Scene) {
    for stroke in scene.iter() {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single committed stroke.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    render_path(ctx, &stroke.points, stroke.kind, stroke.width, stroke.color);
}

/// Render a freehand path (polyline through points).
///
/// Accepts a borrowed slice so in-progress gestures can be previewed without
/// cloning their points. Eraser paths punch out existing pigment with
/// `Operator::DestOut`; brush kind `None` draws nothing.
pub fn render_path(
    ctx: &cairo::Context,
    points: &[(f64, f64)],
    kind: BrushKind,
    width: f64,
    color: Color,
) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };

    let _ = ctx.save();
    match kind {
        BrushKind::None => {
            let _ = ctx.restore();
            return;
        }
        BrushKind::Stroke => {
            ctx.set_operator(cairo::Operator::Over);
            color.apply(ctx);
        }
        BrushKind::Eraser => {
            ctx.set_operator(cairo::Operator::DestOut);
            ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
        }
    }

    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(x0, y0);
    if rest.is_empty() {
        // Zero-length segment so the round cap paints a dot
        ctx.line_to(x0, y0);
    }
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }

    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Draws a dashed outline around a selected stroke.
pub fn render_selection_outline(ctx: &cairo::Context, bounds: Rect) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    SELECTION_BLUE.apply(ctx);
    ctx.set_line_width(1.0);
    ctx.set_dash(&[4.0, 3.0], 0.0);
    ctx.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Draws the translucent marquee shown while drag-selecting.
pub fn render_marquee(ctx: &cairo::Context, rect: Rect) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    ctx.set_source_rgba(SELECTION_BLUE.r, SELECTION_BLUE.g, SELECTION_BLUE.b, 0.15);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let _ = ctx.fill_preserve();
    SELECTION_BLUE.apply(ctx);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Clears the whole target to full transparency, regardless of transform.
pub fn clear_target(ctx: &cairo::Context) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Brush, CYAN};

    fn alpha_at(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> u8 {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        data[y as usize * stride + x as usize * 4 + 3]
    }

    fn brush(kind: BrushKind, width: f64) -> Brush {
        Brush {
            kind,
            width,
            color: CYAN,
        }
    }

    #[test]
    fn eraser_removes_pigment_from_earlier_strokes() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            let mut scene = Scene::new();
            scene.insert(Stroke::new(
                1,
                vec![(4.0, 32.0), (60.0, 32.0)],
                brush(BrushKind::Stroke, 8.0),
            ));
            scene.insert(Stroke::new(
                2,
                vec![(32.0, 4.0), (32.0, 60.0)],
                brush(BrushKind::Eraser, 12.0),
            ));
            render_scene(&ctx, &scene);
        }
        assert_eq!(alpha_at(&mut surface, 10, 32), 255);
        assert_eq!(alpha_at(&mut surface, 32, 32), 0);
    }

    #[test]
    fn none_brush_draws_nothing() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 16, 16).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            render_path(
                &ctx,
                &[(0.0, 8.0), (16.0, 8.0)],
                BrushKind::None,
                4.0,
                CYAN,
            );
        }
        assert_eq!(alpha_at(&mut surface, 8, 8), 0);
    }

    #[test]
    fn clear_target_wipes_pixels() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 16, 16).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            ctx.scale(2.0, 2.0);
            render_path(
                &ctx,
                &[(0.0, 4.0), (8.0, 4.0)],
                BrushKind::Stroke,
                4.0,
                CYAN,
            );
            clear_target(&ctx);
        }
        assert_eq!(alpha_at(&mut surface, 8, 8), 0);
    }
}
