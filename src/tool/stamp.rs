//! Fixed image stamp.

use std::fmt;
use std::rc::Rc;

use cairo::{Context, ImageSurface};

use super::StrokeTool;
use crate::draw::render::render_image;
use crate::error::SketchError;
use crate::util::{Bounds, Point, Rect};

/// Places an image at its natural size, centered on the touch point.
///
/// Pointer moves after placement are ignored.
#[derive(Clone)]
pub struct StampTool {
    image: Rc<ImageSurface>,
    center: Option<Point>,
}

impl StampTool {
    pub fn new(image: Rc<ImageSurface>) -> Self {
        Self {
            image,
            center: None,
        }
    }

    pub fn center(&self) -> Option<Point> {
        self.center
    }
}

impl fmt::Debug for StampTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StampTool")
            .field("image", &(self.image.width(), self.image.height()))
            .field("center", &self.center)
            .finish()
    }
}

impl StrokeTool for StampTool {
    fn set_initial_point(&mut self, point: Point) {
        self.center = Some(point);
    }

    fn move_to(&mut self, _from: Point, _to: Point) {}

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        match self.center {
            Some(center) => render_image(ctx, &self.image, center, 1.0, 0.0),
            None => Ok(()),
        }
    }

    fn bounds(&self) -> Option<Rect> {
        let center = self.center?;
        Bounds::centered(center, self.image.width() as f64, self.image.height() as f64)
            .inflate(1.0)
            .to_rect()
    }
}
