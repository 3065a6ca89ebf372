//! Manipulation-handle artwork for editable stamps.
//!
//! Hosts may supply bitmaps through [`IconSource`]; when none is available the
//! handles are drawn as simple vector glyphs.

use std::f64::consts::PI;

use cairo::{Context, ImageSurface, LineCap};

use super::render::render_image;
use crate::error::SketchError;
use crate::util::Point;

/// Corner handle on an editable stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Delete,
    Rotate,
    Resize,
}

impl Handle {
    /// Name passed to [`IconSource::load_icon`].
    pub fn icon_name(self) -> &'static str {
        match self {
            Handle::Delete => "stamp-delete",
            Handle::Rotate => "stamp-rotate",
            Handle::Resize => "stamp-resize",
        }
    }
}

/// Resolves handle icons by name.
pub trait IconSource {
    fn load_icon(&self, name: &str) -> Option<ImageSurface>;
}

/// Icon source with no assets; every handle uses its vector glyph.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcons;

impl IconSource for NoIcons {
    fn load_icon(&self, _name: &str) -> Option<ImageSurface> {
        None
    }
}

/// Draws `handle` as a `size` × `size` square centered on `center`.
pub fn render_handle(
    ctx: &Context,
    icons: &dyn IconSource,
    handle: Handle,
    center: Point,
    size: f64,
) -> Result<(), SketchError> {
    if let Some(icon) = icons.load_icon(handle.icon_name()) {
        let extent = icon.width().max(icon.height());
        if extent > 0 {
            return render_image(ctx, &icon, center, size / extent as f64, 0.0);
        }
    }
    render_glyph(ctx, handle, center, size)
}

fn render_glyph(ctx: &Context, handle: Handle, center: Point, size: f64) -> Result<(), SketchError> {
    let radius = size / 2.0;
    let inner = radius * 0.5;

    ctx.save()?;
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.9);
    ctx.fill_preserve()?;
    ctx.set_source_rgba(0.2, 0.2, 0.2, 1.0);
    ctx.set_line_width((size / 15.0).max(1.0));
    ctx.stroke()?;

    ctx.set_line_width((size / 10.0).max(1.5));
    ctx.set_line_cap(LineCap::Round);
    match handle {
        Handle::Delete => {
            ctx.move_to(center.x - inner, center.y - inner);
            ctx.line_to(center.x + inner, center.y + inner);
            ctx.move_to(center.x + inner, center.y - inner);
            ctx.line_to(center.x - inner, center.y + inner);
        }
        Handle::Rotate => {
            let start = -PI * 0.9;
            let end = PI * 0.4;
            ctx.new_sub_path();
            ctx.arc(center.x, center.y, inner, start, end);
            let tip = center.offset_polar(end, inner);
            let barb = inner * 0.6;
            ctx.move_to(tip.x, tip.y);
            ctx.line_to(tip.x - barb, tip.y);
            ctx.move_to(tip.x, tip.y);
            ctx.line_to(tip.x, tip.y - barb);
        }
        Handle::Resize => {
            let barb = inner * 0.5;
            let (a, b) = (
                Point::new(center.x - inner, center.y - inner),
                Point::new(center.x + inner, center.y + inner),
            );
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.move_to(a.x + barb, a.y);
            ctx.line_to(a.x, a.y);
            ctx.line_to(a.x, a.y + barb);
            ctx.move_to(b.x - barb, b.y);
            ctx.line_to(b.x, b.y);
            ctx.line_to(b.x, b.y - barb);
        }
    }
    ctx.stroke()?;
    ctx.restore()?;
    Ok(())
}
