//! Flood fill tool.

use cairo::{Context, ImageSurface, Operator};
use log::warn;

use super::StrokeTool;
use crate::draw::{ChannelSumDistance, DEFAULT_TOLERANCE, StrokeStyle, fill_surface};
use crate::error::SketchError;
use crate::util::{Point, Rect};

/// Fills the region around the touch point with the stroke color.
///
/// Rendering reads back whatever is already on the target surface, so the
/// result depends on everything drawn beneath this tool.
#[derive(Debug, Clone)]
pub struct FillTool {
    style: StrokeStyle,
    tolerance: u32,
    touch_point: Option<Point>,
}

impl FillTool {
    pub fn new(style: StrokeStyle) -> Self {
        Self::with_tolerance(style, DEFAULT_TOLERANCE)
    }

    /// Uses a channel-sum tolerance other than the default of 30.
    pub fn with_tolerance(style: StrokeStyle, tolerance: u32) -> Self {
        Self {
            style,
            tolerance,
            touch_point: None,
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    pub fn touch_point(&self) -> Option<Point> {
        self.touch_point
    }
}

impl StrokeTool for FillTool {
    fn set_initial_point(&mut self, point: Point) {
        self.touch_point = Some(point);
    }

    fn move_to(&mut self, _from: Point, _to: Point) {}

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        let Some(seed) = self.touch_point else {
            return Ok(());
        };
        let target = ImageSurface::try_from(ctx.target()).map_err(|_| SketchError::UnsupportedTarget)?;
        target.flush();

        let comparator = ChannelSumDistance::new(self.tolerance);
        let filled = match fill_surface(&target, seed, self.style.effective_color(), &comparator) {
            Ok(Some(filled)) => filled,
            Ok(None) => return Ok(()),
            Err(err) => {
                warn!("Skipping fill at ({:.1}, {:.1}): {}", seed.x, seed.y, err);
                return Err(err);
            }
        };

        ctx.save()?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(&filled, 0.0, 0.0)?;
        ctx.paint()?;
        ctx.restore()?;
        Ok(())
    }

    /// A fill can reach any pixel.
    fn bounds(&self) -> Option<Rect> {
        None
    }
}
