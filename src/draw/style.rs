//! Stroke styling shared by every tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Color;

/// Width, base color and opacity captured when a tool is created.
///
/// The color is kept opaque; `alpha` is applied separately when rendering so
/// the same base color can be reused at different opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
    pub alpha: f64,
}

impl StrokeStyle {
    pub fn new(width: f64, color: Color, alpha: f64) -> Self {
        Self {
            width: width.max(0.0),
            color: Color { a: 255, ..color },
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Sets source color and line width on `ctx`.
    pub fn apply(&self, ctx: &cairo::Context) {
        self.color.set_source(ctx, self.alpha);
        ctx.set_line_width(self.width);
    }

    /// The color with alpha folded into the alpha channel.
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha(self.alpha)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(3.0, super::RED, 1.0)
    }
}

/// Rendering sub-mode for the freehand pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PenStyle {
    /// Flat stroke
    #[default]
    Normal,
    /// Soft stroke with a blurred halo proportional to width
    Blur,
    /// Colored glow under a white core, screen blended
    Neon,
}
