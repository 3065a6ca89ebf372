//! Drawing tools and their stroke lifecycle.
//!
//! A tool is created on pointer-down, anchored once with
//! [`StrokeTool::set_initial_point`], fed geometry through
//! [`StrokeTool::move_to`] while the pointer moves, and from pointer-up onward
//! is plain data that the compositor renders whenever it rebuilds a cache.
//! Rendering never mutates the tool, so a tool may be rendered any number of
//! times.

pub mod editable;
pub mod fill;
pub mod pen;
pub mod shape;
pub mod stamp;

use cairo::Context;

use crate::draw::StrokeStyle;
use crate::error::SketchError;
use crate::input::ToolType;
use crate::util::{Bounds, Point, Rect};

pub use editable::{EditableStamp, StampHit, StampSettings};
pub use fill::FillTool;
pub use pen::{CompositeMode, PenTool};
pub use shape::{ShapeKind, ShapeTool};
pub use stamp::StampTool;

/// Capabilities every tool provides to the compositor.
pub trait StrokeTool {
    /// Anchors the tool. Called exactly once, at stroke start.
    fn set_initial_point(&mut self, point: Point);

    /// Updates geometry for a pointer move from `from` to `to`.
    fn move_to(&mut self, from: Point, to: Point);

    /// Draws the tool into `ctx`. Must not change the tool.
    fn render(&self, ctx: &Context) -> Result<(), SketchError>;

    /// Canvas area the tool paints into, padded for stroke width.
    ///
    /// `None` means the tool may touch any pixel.
    fn bounds(&self) -> Option<Rect>;
}

/// A committed or in-progress drawing operation.
#[derive(Debug)]
pub enum Tool {
    /// Freehand pen or eraser
    Pen(PenTool),
    /// Line, arrow, rectangle, ellipse or star
    Shape(ShapeTool),
    /// Fixed image placed at the touch point
    Stamp(StampTool),
    /// Image that can be moved, resized, rotated or deleted after placement
    EditableStamp(EditableStamp),
    /// Flood fill from the touch point
    Fill(FillTool),
}

impl Tool {
    fn as_stroke(&self) -> &dyn StrokeTool {
        match self {
            Tool::Pen(tool) => tool,
            Tool::Shape(tool) => tool,
            Tool::Stamp(tool) => tool,
            Tool::EditableStamp(tool) => tool,
            Tool::Fill(tool) => tool,
        }
    }

    fn as_stroke_mut(&mut self) -> &mut dyn StrokeTool {
        match self {
            Tool::Pen(tool) => tool,
            Tool::Shape(tool) => tool,
            Tool::Stamp(tool) => tool,
            Tool::EditableStamp(tool) => tool,
            Tool::Fill(tool) => tool,
        }
    }

    /// The tool type this instance was created from.
    pub fn kind(&self) -> ToolType {
        match self {
            Tool::Pen(pen) => match pen.composite_mode() {
                CompositeMode::Normal => ToolType::Pen,
                CompositeMode::Clear => ToolType::Eraser,
            },
            Tool::Shape(shape) => shape.kind().tool_type(),
            Tool::Stamp(_) | Tool::EditableStamp(_) => ToolType::Stamp,
            Tool::Fill(_) => ToolType::Fill,
        }
    }

    /// Style captured at creation, for tools that have one.
    pub fn style(&self) -> Option<&StrokeStyle> {
        match self {
            Tool::Pen(tool) => Some(tool.style()),
            Tool::Shape(tool) => Some(tool.style()),
            Tool::Fill(tool) => Some(tool.style()),
            Tool::Stamp(_) | Tool::EditableStamp(_) => None,
        }
    }

    pub fn as_editable(&self) -> Option<&EditableStamp> {
        match self {
            Tool::EditableStamp(stamp) => Some(stamp),
            _ => None,
        }
    }

    pub fn as_editable_mut(&mut self) -> Option<&mut EditableStamp> {
        match self {
            Tool::EditableStamp(stamp) => Some(stamp),
            _ => None,
        }
    }

    /// Dirty area for the most recent geometry change.
    ///
    /// Pens report only their newest segment (or the anchor before the first
    /// move); every other tool reports its whole bounds.
    pub fn recent_bounds(&self) -> Option<Rect> {
        match self {
            Tool::Pen(pen) => pen.last_segment_bounds().or_else(|| pen.bounds()),
            other => other.bounds(),
        }
    }
}

impl StrokeTool for Tool {
    fn set_initial_point(&mut self, point: Point) {
        self.as_stroke_mut().set_initial_point(point);
    }

    fn move_to(&mut self, from: Point, to: Point) {
        self.as_stroke_mut().move_to(from, to);
    }

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        self.as_stroke().render(ctx)
    }

    fn bounds(&self) -> Option<Rect> {
        self.as_stroke().bounds()
    }
}

/// Integer bounding box of `points` grown by `padding` on every side.
pub(crate) fn padded_rect(points: &[Point], padding: f64) -> Option<Rect> {
    Bounds::around(points)?.inflate(padding.max(1.0)).to_rect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, PenStyle};

    #[test]
    fn kind_reports_eraser_for_clear_pen() {
        let style = StrokeStyle::new(4.0, BLACK, 1.0);
        let pen = Tool::Pen(PenTool::new(style, PenStyle::Normal, CompositeMode::Normal));
        let eraser = Tool::Pen(PenTool::new(style, PenStyle::Normal, CompositeMode::Clear));
        assert_eq!(pen.kind(), ToolType::Pen);
        assert_eq!(eraser.kind(), ToolType::Eraser);
    }

    #[test]
    fn shape_kinds_map_to_tool_types() {
        let style = StrokeStyle::default();
        let rect = Tool::Shape(ShapeTool::new(ShapeKind::Rect { filled: true }, style));
        let star = Tool::Shape(ShapeTool::new(ShapeKind::Star, style));
        assert_eq!(rect.kind(), ToolType::RectFill);
        assert_eq!(star.kind(), ToolType::Star);
        assert!(rect.as_editable().is_none());
    }

    #[test]
    fn padded_rect_covers_points() {
        let rect = padded_rect(&[Point::new(2.0, 3.0), Point::new(10.0, 4.0)], 2.0).unwrap();
        assert_eq!(rect, Rect::new(0, 1, 12, 5).unwrap());
        assert!(padded_rect(&[], 2.0).is_none());
    }
}
