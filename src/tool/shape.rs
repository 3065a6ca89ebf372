//! Two-point shapes: line, arrow, rectangle, ellipse and star.
//!
//! Every shape is defined by the anchor set at stroke start and the current
//! drag position. Each move replaces the drag position and the whole shape is
//! recomputed on render.

use cairo::Context;

use super::{StrokeTool, padded_rect};
use crate::draw::StrokeStyle;
use crate::draw::render::{render_arrow, render_ellipse, render_line, render_polygon, render_rect};
use crate::error::SketchError;
use crate::input::ToolType;
use crate::util::{self, Point, Rect};

/// Side length of the square the star outline is designed in.
const STAR_DESIGN_SIZE: f64 = 500.0;

/// Star vertices in design space, alternating outer and inner points.
const STAR_VERTICES: [(f64, f64); 10] = [
    (250.0, 0.0),
    (308.8, 169.1),
    (487.8, 172.7),
    (345.1, 280.9),
    (396.9, 452.3),
    (250.0, 350.0),
    (103.1, 452.3),
    (154.9, 280.9),
    (12.2, 172.7),
    (191.2, 169.1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Arrow,
    Rect { filled: bool },
    Ellipse { filled: bool },
    Star,
}

impl ShapeKind {
    pub fn tool_type(self) -> ToolType {
        match self {
            ShapeKind::Line => ToolType::Line,
            ShapeKind::Arrow => ToolType::Arrow,
            ShapeKind::Rect { filled: false } => ToolType::RectStroke,
            ShapeKind::Rect { filled: true } => ToolType::RectFill,
            ShapeKind::Ellipse { filled: false } => ToolType::EllipseStroke,
            ShapeKind::Ellipse { filled: true } => ToolType::EllipseFill,
            ShapeKind::Star => ToolType::Star,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    style: StrokeStyle,
    anchor: Option<Point>,
    current: Point,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind, style: StrokeStyle) -> Self {
        Self {
            kind,
            style,
            anchor: None,
            current: Point::default(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Anchor and current drag point, once anchored.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.anchor.map(|anchor| (anchor, self.current))
    }

    /// Star outline fitted to the drag rectangle, or `None` when it has no area.
    fn star_points(anchor: Point, current: Point) -> Option<Vec<Point>> {
        let (min_x, min_y) = (anchor.x.min(current.x), anchor.y.min(current.y));
        let width = (anchor.x - current.x).abs();
        let height = (anchor.y - current.y).abs();
        if width == 0.0 || height == 0.0 {
            return None;
        }
        let (sx, sy) = (width / STAR_DESIGN_SIZE, height / STAR_DESIGN_SIZE);
        Some(
            STAR_VERTICES
                .iter()
                .map(|&(x, y)| Point::new(min_x + x * sx, min_y + y * sy))
                .collect(),
        )
    }
}

impl StrokeTool for ShapeTool {
    fn set_initial_point(&mut self, point: Point) {
        self.anchor = Some(point);
        self.current = point;
    }

    fn move_to(&mut self, _from: Point, to: Point) {
        if self.anchor.is_some() {
            self.current = to;
        }
    }

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        let Some((anchor, current)) = self.endpoints() else {
            return Ok(());
        };

        ctx.save()?;
        let result = match self.kind {
            ShapeKind::Line => render_line(ctx, anchor, current, &self.style),
            ShapeKind::Arrow => render_arrow(ctx, anchor, current, &self.style),
            ShapeKind::Rect { filled } => render_rect(ctx, anchor, current, &self.style, filled),
            ShapeKind::Ellipse { filled } => {
                render_ellipse(ctx, anchor, current, &self.style, filled)
            }
            ShapeKind::Star => match Self::star_points(anchor, current) {
                Some(points) => render_polygon(ctx, &points, &self.style, true),
                None => Ok(()),
            },
        };
        ctx.restore()?;
        result
    }

    fn bounds(&self) -> Option<Rect> {
        let (anchor, current) = self.endpoints()?;
        // Square caps and miter joins reach past the geometry by up to a full width.
        let padding = self.style.width + 1.0;
        match self.kind {
            ShapeKind::Arrow => {
                let [left, tip, right] = util::arrowhead(anchor, current, self.style.width);
                padded_rect(&[anchor, current, left, tip, right], padding)
            }
            _ => padded_rect(&[anchor, current], padding),
        }
    }
}
