//! Freehand pen and eraser.
//!
//! Raw pointer samples are smoothed into quadratic segments that run between
//! the midpoints of the last three samples, with the middle sample as control
//! point. Consecutive segments share endpoints so the path is continuous.

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};

use super::{StrokeTool, padded_rect};
use crate::draw::blur::blur_surface;
use crate::draw::render::target_size;
use crate::draw::{PenStyle, StrokeStyle};
use crate::error::SketchError;
use crate::util::{Bounds, Point, Rect};

/// Glow radius is the stroke width divided by this factor.
const GLOW_DIVISOR: f64 = 1.25;

/// How the pen combines with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint with the stroke color
    #[default]
    Normal,
    /// Erase to transparent
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct QuadSegment {
    start: Point,
    control: Point,
    end: Point,
}

impl QuadSegment {
    fn append_to(&self, ctx: &Context) {
        // Cairo has no quadratic curves; raise to cubic.
        let c1 = Point::new(
            self.start.x + 2.0 / 3.0 * (self.control.x - self.start.x),
            self.start.y + 2.0 / 3.0 * (self.control.y - self.start.y),
        );
        let c2 = Point::new(
            self.end.x + 2.0 / 3.0 * (self.control.x - self.end.x),
            self.end.y + 2.0 / 3.0 * (self.control.y - self.end.y),
        );
        ctx.curve_to(c1.x, c1.y, c2.x, c2.y, self.end.x, self.end.y);
    }
}

/// Freehand stroke. An eraser is a pen in [`CompositeMode::Clear`].
#[derive(Debug, Clone)]
pub struct PenTool {
    style: StrokeStyle,
    pen_style: PenStyle,
    mode: CompositeMode,
    points: Vec<Point>,
    segments: Vec<QuadSegment>,
}

impl PenTool {
    pub fn new(style: StrokeStyle, pen_style: PenStyle, mode: CompositeMode) -> Self {
        Self {
            style,
            pen_style,
            mode,
            points: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn pen_style(&self) -> PenStyle {
        self.pen_style
    }

    pub fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    /// Raw samples received so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of smoothed segments in the path.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Bounds of the newest segment, padded by twice the stroke width.
    pub fn last_segment_bounds(&self) -> Option<Rect> {
        let segment = self.segments.last()?;
        padded_rect(
            &[segment.start, segment.control, segment.end],
            self.style.width * 2.0 + self.glow_radius(),
        )
    }

    fn glow_radius(&self) -> f64 {
        match (self.mode, self.pen_style) {
            (CompositeMode::Clear, _) | (_, PenStyle::Normal) => 0.0,
            _ => self.style.width / GLOW_DIVISOR,
        }
    }

    fn append_path(&self, ctx: &Context) {
        let Some(first) = self.segments.first() else {
            return;
        };
        ctx.move_to(first.start.x, first.start.y);
        for segment in &self.segments {
            segment.append_to(ctx);
        }
    }

    fn stroke_path(&self, ctx: &Context, width: f64) -> Result<(), SketchError> {
        ctx.set_line_width(width);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        self.append_path(ctx);
        ctx.stroke()?;
        Ok(())
    }

    /// Renders the colored stroke into an offscreen layer, blurs it and
    /// paints it onto `ctx` with `operator`.
    fn render_glow(&self, ctx: &Context, operator: Operator) -> Result<(), SketchError> {
        let radius = self.glow_radius();
        let (canvas_w, canvas_h) = target_size(ctx)?;
        let Some(area) = self.layer_area(radius, canvas_w, canvas_h) else {
            return Ok(());
        };

        let mut layer = ImageSurface::create(Format::ARgb32, area.width, area.height)?;
        {
            let layer_ctx = Context::new(&layer)?;
            layer_ctx.translate(-area.x as f64, -area.y as f64);
            self.style.color.set_source(&layer_ctx, 1.0);
            self.stroke_path(&layer_ctx, self.style.width)?;
        }
        blur_surface(&mut layer, radius)?;

        ctx.save()?;
        ctx.set_operator(operator);
        ctx.set_source_surface(&layer, area.x as f64, area.y as f64)?;
        ctx.paint_with_alpha(self.style.alpha)?;
        ctx.restore()?;
        Ok(())
    }

    /// Stroke bounds grown by the glow radius and clipped to the canvas.
    fn layer_area(&self, radius: f64, canvas_w: i32, canvas_h: i32) -> Option<Rect> {
        let bounds = Bounds::around(&self.points)?.inflate(self.style.width + radius * 2.0);
        let min_x = (bounds.min_x().floor() as i32).max(0);
        let min_y = (bounds.min_y().floor() as i32).max(0);
        let max_x = (bounds.max_x().ceil() as i32).min(canvas_w);
        let max_y = (bounds.max_y().ceil() as i32).min(canvas_h);
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }
}

impl StrokeTool for PenTool {
    fn set_initial_point(&mut self, point: Point) {
        self.points.clear();
        self.segments.clear();
        self.points.push(point);
    }

    fn move_to(&mut self, _from: Point, to: Point) {
        let Some(&first) = self.points.first() else {
            return;
        };
        self.points.push(to);

        let len = self.points.len();
        let previous = self.points[len - 2];
        let before_previous = if len >= 3 { self.points[len - 3] } else { first };

        self.segments.push(QuadSegment {
            start: before_previous.midpoint(previous),
            control: previous,
            end: previous.midpoint(to),
        });
    }

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        if self.segments.is_empty() {
            return Ok(());
        }

        ctx.save()?;
        let result = match (self.mode, self.pen_style) {
            (CompositeMode::Clear, _) => {
                ctx.set_operator(Operator::Clear);
                self.stroke_path(ctx, self.style.width)
            }
            (CompositeMode::Normal, PenStyle::Normal) => {
                self.style.color.set_source(ctx, self.style.alpha);
                self.stroke_path(ctx, self.style.width)
            }
            (CompositeMode::Normal, PenStyle::Blur) => {
                self.render_glow(ctx, Operator::Over).and_then(|()| {
                    self.style.color.set_source(ctx, self.style.alpha);
                    self.stroke_path(ctx, self.style.width)
                })
            }
            (CompositeMode::Normal, PenStyle::Neon) => {
                self.render_glow(ctx, Operator::Screen).and_then(|()| {
                    ctx.set_operator(Operator::Screen);
                    ctx.set_source_rgba(1.0, 1.0, 1.0, self.style.alpha);
                    self.stroke_path(ctx, (self.style.width / 2.0).max(1.0))
                })
            }
        };
        ctx.restore()?;
        result
    }

    fn bounds(&self) -> Option<Rect> {
        padded_rect(&self.points, self.style.width + self.glow_radius() * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, Color, PixelBuffer, WHITE};

    fn pen(mode: CompositeMode, pen_style: PenStyle) -> PenTool {
        PenTool::new(StrokeStyle::new(4.0, BLUE, 1.0), pen_style, mode)
    }

    fn draw(tool: &mut PenTool, points: &[(f64, f64)]) {
        let mut iter = points.iter().map(|&p| Point::from(p));
        let Some(mut last) = iter.next() else {
            return;
        };
        tool.set_initial_point(last);
        for point in iter {
            tool.move_to(last, point);
            last = point;
        }
    }

    fn pixel(surface: &mut ImageSurface, x: i32, y: i32) -> Color {
        surface.flush();
        let (w, h, stride) = (surface.width(), surface.height(), surface.stride() as usize);
        let data = surface.data().unwrap();
        PixelBuffer::new(&data[..], w, h, stride).unwrap().get(x, y).unwrap()
    }

    fn white_surface(size: i32) -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, size, size).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            ctx.set_source_rgb(1.0, 1.0, 1.0);
            ctx.paint().unwrap();
        }
        surface
    }

    #[test]
    fn segments_run_between_midpoints() {
        let mut tool = pen(CompositeMode::Normal, PenStyle::Normal);
        draw(&mut tool, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

        assert_eq!(tool.segment_count(), 2);
        let first = tool.segments[0];
        assert_eq!(first.start, Point::new(0.0, 0.0));
        assert_eq!(first.end, Point::new(5.0, 0.0));
        let second = tool.segments[1];
        assert_eq!(second.start, Point::new(5.0, 0.0));
        assert_eq!(second.control, Point::new(10.0, 0.0));
        assert_eq!(second.end, Point::new(10.0, 5.0));
    }

    #[test]
    fn move_before_initial_point_is_ignored() {
        let mut tool = pen(CompositeMode::Normal, PenStyle::Normal);
        tool.move_to(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        assert!(tool.points().is_empty());
        assert_eq!(tool.segment_count(), 0);
    }

    #[test]
    fn normal_pen_paints_stroke_color() {
        let mut surface = white_surface(30);
        let mut tool = pen(CompositeMode::Normal, PenStyle::Normal);
        draw(&mut tool, &[(2.0, 15.0), (15.0, 15.0), (28.0, 15.0)]);
        {
            let ctx = Context::new(&surface).unwrap();
            tool.render(&ctx).unwrap();
        }
        assert_eq!(pixel(&mut surface, 12, 15), BLUE);
        assert_eq!(pixel(&mut surface, 12, 2), WHITE);
    }

    #[test]
    fn render_reports_broken_context() {
        let surface = white_surface(10);
        let mut tool = pen(CompositeMode::Normal, PenStyle::Normal);
        draw(&mut tool, &[(1.0, 5.0), (5.0, 5.0), (9.0, 5.0)]);
        let ctx = Context::new(&surface).unwrap();
        assert!(ctx.restore().is_err());
        assert!(tool.render(&ctx).is_err());
    }

    #[test]
    fn eraser_clears_to_transparent() {
        let mut surface = white_surface(30);
        let mut tool = pen(CompositeMode::Clear, PenStyle::Neon);
        draw(&mut tool, &[(2.0, 15.0), (15.0, 15.0), (28.0, 15.0)]);
        {
            let ctx = Context::new(&surface).unwrap();
            tool.render(&ctx).unwrap();
        }
        assert_eq!(pixel(&mut surface, 12, 15).a, 0);
        assert_eq!(pixel(&mut surface, 12, 2), WHITE);
    }

    #[test]
    fn blur_pen_spreads_past_stroke_edge() {
        let mut sharp_surface = ImageSurface::create(Format::ARgb32, 40, 40).unwrap();
        let mut soft_surface = ImageSurface::create(Format::ARgb32, 40, 40).unwrap();
        let path = [(5.0, 20.0), (20.0, 20.0), (35.0, 20.0)];

        let mut sharp = pen(CompositeMode::Normal, PenStyle::Normal);
        let mut soft = PenTool::new(StrokeStyle::new(8.0, BLUE, 1.0), PenStyle::Blur, CompositeMode::Normal);
        draw(&mut sharp, &path);
        draw(&mut soft, &path);
        sharp.style = StrokeStyle::new(8.0, BLUE, 1.0);
        {
            let ctx = Context::new(&sharp_surface).unwrap();
            sharp.render(&ctx).unwrap();
            let ctx = Context::new(&soft_surface).unwrap();
            soft.render(&ctx).unwrap();
        }
        // Five pixels off the centerline is outside an 8px stroke.
        assert_eq!(pixel(&mut sharp_surface, 20, 26).a, 0);
        assert!(pixel(&mut soft_surface, 20, 26).a > 0);
    }

    #[test]
    fn neon_core_is_white_over_dark_canvas() {
        let mut surface = ImageSurface::create(Format::ARgb32, 40, 40).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            ctx.set_source_rgb(0.0, 0.0, 0.0);
            ctx.paint().unwrap();
        }
        let mut tool = PenTool::new(StrokeStyle::new(8.0, BLUE, 1.0), PenStyle::Neon, CompositeMode::Normal);
        draw(&mut tool, &[(5.0, 20.0), (20.0, 20.0), (35.0, 20.0)]);
        {
            let ctx = Context::new(&surface).unwrap();
            tool.render(&ctx).unwrap();
        }
        assert_eq!(pixel(&mut surface, 15, 20), WHITE);
        let glow = pixel(&mut surface, 15, 25);
        assert!(glow.b > glow.r);
    }

    #[test]
    fn bounds_cover_all_samples() {
        let mut tool = pen(CompositeMode::Normal, PenStyle::Normal);
        draw(&mut tool, &[(10.0, 10.0), (20.0, 30.0), (5.0, 12.0)]);
        let rect = tool.bounds().unwrap();
        assert!(rect.x <= 1 && rect.y <= 6);
        assert!(rect.x + rect.width >= 24 && rect.y + rect.height >= 34);
        assert!(tool.last_segment_bounds().is_some());
    }
}
