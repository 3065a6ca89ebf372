//! Cairo-based rendering helpers shared by the tools and the compositor.

use cairo::{Context, Extend, ImageSurface, LineCap, LineJoin};
use serde::{Deserialize, Serialize};

use super::StrokeStyle;
use crate::error::SketchError;
use crate::util::{self, Point};

/// How a loaded background image is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Stretched to cover the whole canvas; width and height scale independently.
    #[default]
    ScaleToFit,
    /// Drawn at its natural size from the top-left corner.
    Original,
}

/// Returns the pixel size of the image surface `ctx` draws into.
pub fn target_size(ctx: &Context) -> Result<(i32, i32), SketchError> {
    let target = ImageSurface::try_from(ctx.target()).map_err(|_| SketchError::UnsupportedTarget)?;
    Ok((target.width(), target.height()))
}

/// Paints the background image onto a canvas of `width` × `height`.
///
/// Should be called on a cleared surface before any tool renders.
pub fn render_background(
    ctx: &Context,
    image: &ImageSurface,
    mode: RenderMode,
    width: i32,
    height: i32,
) -> Result<(), SketchError> {
    let (image_w, image_h) = (image.width() as f64, image.height() as f64);
    if image_w <= 0.0 || image_h <= 0.0 {
        return Ok(());
    }

    let stretch = mode == RenderMode::ScaleToFit;
    if stretch && (width <= 0 || height <= 0) {
        return Ok(());
    }

    ctx.save()?;
    if stretch {
        ctx.scale(width as f64 / image_w, height as f64 / image_h);
    }
    ctx.set_source_surface(image, 0.0, 0.0)?;
    if stretch {
        // Keep the filtered edges opaque instead of fading into transparency
        ctx.source().set_extend(Extend::Pad);
    }
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}

/// Paints `image` centered on `center`, scaled and rotated (radians) about its center.
pub fn render_image(
    ctx: &Context,
    image: &ImageSurface,
    center: Point,
    scale: f64,
    rotation: f64,
) -> Result<(), SketchError> {
    if scale <= 0.0 {
        return Ok(());
    }
    ctx.save()?;
    ctx.translate(center.x, center.y);
    ctx.rotate(rotation);
    ctx.scale(scale, scale);
    ctx.set_source_surface(
        image,
        -(image.width() as f64) / 2.0,
        -(image.height() as f64) / 2.0,
    )?;
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}

/// Render a straight line with square caps
pub fn render_line(
    ctx: &Context,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) -> Result<(), SketchError> {
    style.apply(ctx);
    ctx.set_line_cap(LineCap::Square);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()?;
    Ok(())
}

/// Render a line with a 135° arrowhead at `to`, stroked as one path so
/// translucent arrows do not darken where the head meets the shaft.
pub fn render_arrow(
    ctx: &Context,
    from: Point,
    to: Point,
    style: &StrokeStyle,
) -> Result<(), SketchError> {
    let [left, tip, right] = util::arrowhead(from, to, style.width);

    style.apply(ctx);
    ctx.set_line_cap(LineCap::Square);
    ctx.set_line_join(LineJoin::Miter);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.move_to(left.x, left.y);
    ctx.line_to(tip.x, tip.y);
    ctx.line_to(right.x, right.y);
    ctx.stroke()?;
    Ok(())
}

/// Render the rectangle spanned by two opposite corners
pub fn render_rect(
    ctx: &Context,
    a: Point,
    b: Point,
    style: &StrokeStyle,
    filled: bool,
) -> Result<(), SketchError> {
    style.apply(ctx);
    ctx.set_line_join(LineJoin::Miter);

    // Corners may arrive in any order while dragging
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    ctx.rectangle(x, y, (a.x - b.x).abs(), (a.y - b.y).abs());
    finish_path(ctx, filled)
}

/// Render the ellipse inscribed in the rectangle spanned by two corners
pub fn render_ellipse(
    ctx: &Context,
    a: Point,
    b: Point,
    style: &StrokeStyle,
    filled: bool,
) -> Result<(), SketchError> {
    let (cx, cy, rx, ry) = util::ellipse_bounds(a, b);
    if rx == 0.0 || ry == 0.0 {
        return Ok(());
    }

    style.apply(ctx);

    // Scale only the path, not the line width
    ctx.save()?;
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore()?;

    finish_path(ctx, filled)
}

/// Render a closed polygon through `points`.
pub fn render_polygon(
    ctx: &Context,
    points: &[Point],
    style: &StrokeStyle,
    filled: bool,
) -> Result<(), SketchError> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };

    style.apply(ctx);
    ctx.set_line_join(LineJoin::Miter);

    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.close_path();
    finish_path(ctx, filled)
}

fn finish_path(ctx: &Context, filled: bool) -> Result<(), SketchError> {
    if filled {
        ctx.fill()?;
    } else {
        ctx.stroke()?;
    }
    Ok(())
}
