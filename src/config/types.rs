//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{DEFAULT_TOLERANCE, PenStyle};
use crate::input::ToolType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and style used for new strokes until the host changes them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected at startup (pen, eraser, line, arrow, rect-stroke, rect-fill,
    /// ellipse-stroke, ellipse-fill, star, stamp, fill)
    #[serde(default)]
    pub default_tool: ToolType,

    /// Default stroke color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Default stroke opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_alpha")]
    pub default_alpha: f64,

    /// Pen rendering: normal, blur or neon
    #[serde(default)]
    pub pen_style: PenStyle,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: ToolType::default(),
            default_color: default_color(),
            default_width: default_width(),
            default_alpha: default_alpha(),
            pen_style: PenStyle::default(),
        }
    }
}

/// Flood fill settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FillConfig {
    /// Largest summed per-channel difference (ARGB) still treated as the same
    /// region (valid range: 0 - 1020)
    #[serde(default = "default_tolerance")]
    pub tolerance: u32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

/// Stamp tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StampConfig {
    /// Place stamps that can be moved, resized, rotated and deleted afterwards
    #[serde(default)]
    pub editable: bool,

    /// Size of the square handle hit regions in pixels (valid range: 8.0 - 96.0)
    #[serde(default = "default_handle_size")]
    pub handle_size: f64,

    /// Margin around a stamp that still selects it, in pixels (valid range: 0.0 - 64.0)
    #[serde(default = "default_hit_padding")]
    pub hit_padding: f64,

    /// Smallest scale factor a resize can reach (valid range: 0.01 - 1.0)
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            editable: false,
            handle_size: default_handle_size(),
            hit_padding: default_hit_padding(),
            min_scale: default_min_scale(),
        }
    }
}

/// Canvas size used when the host does not supply one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_width() -> f64 {
    3.0
}

fn default_alpha() -> f64 {
    1.0
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE
}

fn default_handle_size() -> f64 {
    30.0
}

fn default_hit_padding() -> f64 {
    20.0
}

fn default_min_scale() -> f64 {
    0.1
}

fn default_canvas_width() -> i32 {
    800
}

fn default_canvas_height() -> i32 {
    600
}
