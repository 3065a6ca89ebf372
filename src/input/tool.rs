//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool type determines which tool is created on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ToolType {
    /// Freehand drawing - follows the pointer path
    #[default]
    Pen,
    /// Freehand erasing to transparent
    Eraser,
    /// Straight line between start and end points
    Line,
    /// Line with a 135° arrowhead at the end point
    Arrow,
    /// Rectangle outline - from corner to corner
    RectStroke,
    /// Solid rectangle
    RectFill,
    /// Ellipse outline inscribed in the drag rectangle
    EllipseStroke,
    /// Solid ellipse
    EllipseFill,
    /// Five-pointed star fitted to the drag rectangle
    Star,
    /// Image stamp (editable when stamp editing is enabled)
    Stamp,
    /// Flood fill from the touch point
    Fill,
}

impl ToolType {
    /// Every tool type, in menu order.
    pub const ALL: [ToolType; 11] = [
        ToolType::Pen,
        ToolType::Eraser,
        ToolType::Line,
        ToolType::Arrow,
        ToolType::RectStroke,
        ToolType::RectFill,
        ToolType::EllipseStroke,
        ToolType::EllipseFill,
        ToolType::Star,
        ToolType::Stamp,
        ToolType::Fill,
    ];

    /// Human-readable name for log output.
    pub fn label(self) -> &'static str {
        match self {
            ToolType::Pen => "Pen",
            ToolType::Eraser => "Eraser",
            ToolType::Line => "Line",
            ToolType::Arrow => "Arrow",
            ToolType::RectStroke => "Rectangle",
            ToolType::RectFill => "Filled rectangle",
            ToolType::EllipseStroke => "Ellipse",
            ToolType::EllipseFill => "Filled ellipse",
            ToolType::Star => "Star",
            ToolType::Stamp => "Stamp",
            ToolType::Fill => "Fill",
        }
    }
}
