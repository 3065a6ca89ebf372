//! Stamp that stays editable after placement.
//!
//! While in edit mode the stamp shows three corner handles: delete (top-left),
//! rotate (top-right) and resize (bottom-right). Dragging the body moves it.
//! Handles are laid out on the unrotated frame and rotated with the image,
//! so hit-testing maps the pointer back into the stamp's own frame first.

use std::fmt;
use std::rc::Rc;

use cairo::{Context, ImageSurface};
use log::debug;

use super::{StrokeTool, padded_rect};
use crate::draw::icons::{Handle, IconSource, render_handle};
use crate::draw::render::render_image;
use crate::error::SketchError;
use crate::util::{Bounds, Point, Rect};

/// Hit-test and resize limits for editable stamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampSettings {
    /// Side length of each square handle hit region
    pub handle_size: f64,
    /// Extra margin around the image that still counts as a body hit
    pub hit_padding: f64,
    /// Smallest scale a resize may reach
    pub min_scale: f64,
}

impl Default for StampSettings {
    fn default() -> Self {
        Self {
            handle_size: 30.0,
            hit_padding: 20.0,
            min_scale: 0.1,
        }
    }
}

/// Result of hit-testing a point against an editable stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampHit {
    Delete,
    Resize,
    Rotate,
    Body,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Idle,
    Dragging { last: Point },
    Resizing { origin_x: f64, origin_scale: f64 },
    Rotating { origin_angle: f64, origin_rotation: f64 },
}

#[derive(Clone)]
pub struct EditableStamp {
    image: Rc<ImageSurface>,
    settings: StampSettings,
    center: Point,
    scale: f64,
    rotation: f64,
    is_editing: bool,
    interaction: Interaction,
}

impl EditableStamp {
    pub fn new(image: Rc<ImageSurface>, settings: StampSettings) -> Self {
        Self {
            image,
            settings,
            center: Point::default(),
            scale: 1.0,
            rotation: 0.0,
            is_editing: false,
            interaction: Interaction::Idle,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Enters or leaves edit mode. Leaving also drops any manipulation in progress.
    ///
    /// The compositor keeps at most one stamp in edit mode; use its selection
    /// methods rather than calling this directly.
    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
        if !editing {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::Idle
    }

    /// Unrotated frame of the scaled image.
    pub fn frame(&self) -> Bounds {
        Bounds::centered(
            self.center,
            self.image.width() as f64 * self.scale,
            self.image.height() as f64 * self.scale,
        )
    }

    /// Classifies `point`. Handles are only live while editing.
    pub fn hit_test(&self, point: Point) -> StampHit {
        let local = self.to_local(point);
        let frame = self.frame();

        if self.is_editing {
            for (handle, hit) in [
                (Handle::Delete, StampHit::Delete),
                (Handle::Resize, StampHit::Resize),
                (Handle::Rotate, StampHit::Rotate),
            ] {
                let corner = Self::corner(&frame, handle);
                let region = Bounds::centered(corner, self.settings.handle_size, self.settings.handle_size);
                if region.contains(local) {
                    return hit;
                }
            }
        }

        if frame.inflate(self.settings.hit_padding).contains(local) {
            StampHit::Body
        } else {
            StampHit::Outside
        }
    }

    /// Starts a drag, resize or rotate for a hit on the body or a handle.
    ///
    /// Returns false for hits that do not start a manipulation.
    pub fn begin_interaction(&mut self, hit: StampHit, point: Point) -> bool {
        self.interaction = match hit {
            StampHit::Body => Interaction::Dragging { last: point },
            StampHit::Resize => Interaction::Resizing {
                origin_x: point.x,
                origin_scale: self.scale,
            },
            StampHit::Rotate => Interaction::Rotating {
                origin_angle: self.center.angle_to(point),
                origin_rotation: self.rotation,
            },
            StampHit::Delete | StampHit::Outside => return false,
        };
        debug!("Stamp interaction started: {:?}", self.interaction);
        true
    }

    /// Applies a pointer move to the manipulation in progress.
    pub fn update_interaction(&mut self, point: Point) {
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Dragging { last } => {
                self.center.x += point.x - last.x;
                self.center.y += point.y - last.y;
                self.interaction = Interaction::Dragging { last: point };
            }
            Interaction::Resizing {
                origin_x,
                origin_scale,
            } => {
                let image_width = (self.image.width() as f64).max(1.0);
                let scale = origin_scale + (point.x - origin_x) / image_width;
                self.scale = scale.max(self.settings.min_scale);
            }
            Interaction::Rotating {
                origin_angle,
                origin_rotation,
            } => {
                self.rotation = origin_rotation + (self.center.angle_to(point) - origin_angle);
            }
        }
    }

    pub fn end_interaction(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Draws the edit-mode outline and handles. Does nothing outside edit mode.
    pub fn render_handles(&self, ctx: &Context, icons: &dyn IconSource) -> Result<(), SketchError> {
        if !self.is_editing {
            return Ok(());
        }
        let frame = self.frame();

        ctx.save()?;
        ctx.translate(self.center.x, self.center.y);
        ctx.rotate(self.rotation);
        ctx.translate(-self.center.x, -self.center.y);
        ctx.set_source_rgba(0.2, 0.2, 0.2, 0.8);
        ctx.set_line_width(1.5);
        ctx.set_dash(&[6.0, 4.0], 0.0);
        ctx.rectangle(frame.x, frame.y, frame.width, frame.height);
        ctx.stroke()?;
        ctx.set_dash(&[], 0.0);

        for handle in [Handle::Delete, Handle::Rotate, Handle::Resize] {
            let corner = Self::corner(&frame, handle);
            render_handle(ctx, icons, handle, corner, self.settings.handle_size)?;
        }
        ctx.restore()?;
        Ok(())
    }

    fn corner(frame: &Bounds, handle: Handle) -> Point {
        match handle {
            Handle::Delete => Point::new(frame.min_x(), frame.min_y()),
            Handle::Rotate => Point::new(frame.max_x(), frame.min_y()),
            Handle::Resize => Point::new(frame.max_x(), frame.max_y()),
        }
    }

    /// Maps a canvas point into the unrotated frame.
    fn to_local(&self, point: Point) -> Point {
        self.rotate_about_center(point, -self.rotation)
    }

    fn rotate_about_center(&self, point: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        Point::new(
            self.center.x + dx * cos - dy * sin,
            self.center.y + dx * sin + dy * cos,
        )
    }
}

impl fmt::Debug for EditableStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableStamp")
            .field("image", &(self.image.width(), self.image.height()))
            .field("center", &self.center)
            .field("scale", &self.scale)
            .field("rotation", &self.rotation)
            .field("is_editing", &self.is_editing)
            .field("interaction", &self.interaction)
            .finish()
    }
}

impl StrokeTool for EditableStamp {
    fn set_initial_point(&mut self, point: Point) {
        self.center = point;
    }

    fn move_to(&mut self, _from: Point, _to: Point) {}

    fn render(&self, ctx: &Context) -> Result<(), SketchError> {
        render_image(ctx, &self.image, self.center, self.scale, self.rotation)
    }

    /// Covers the rotated image plus its handles.
    fn bounds(&self) -> Option<Rect> {
        let outer = self.frame().inflate(self.settings.handle_size / 2.0);
        let corners = [
            Point::new(outer.min_x(), outer.min_y()),
            Point::new(outer.max_x(), outer.min_y()),
            Point::new(outer.max_x(), outer.max_y()),
            Point::new(outer.min_x(), outer.max_y()),
        ]
        .map(|corner| self.rotate_about_center(corner, self.rotation));
        padded_rect(&corners, 2.0)
    }
}
