//! Compositor state and configuration surface.

use std::rc::Rc;

use cairo::{Format, ImageSurface};
use log::{debug, info};

use super::observer::StrokeObserver;
use crate::config::Config;
use crate::draw::{
    DirtyTracker, History, IconSource, NoIcons, PenStyle, RenderMode, StrokeStyle,
    DEFAULT_TOLERANCE,
};
use crate::error::SketchError;
use crate::input::{TouchId, ToolType};
use crate::tool::{
    CompositeMode, EditableStamp, FillTool, PenTool, ShapeKind, ShapeTool, StampSettings,
    StampTool, Tool,
};
use crate::util::{self, Point, Rect};

/// Stroke state machine.
///
/// A stroke is either a drawing operation on a freshly committed tool or a
/// manipulation of the stamp currently in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// No pointer is down
    Idle,
    /// Feeding geometry into the committed tool at `index`
    Drawing { index: usize },
    /// Moving, resizing or rotating the editable stamp at `index`
    Manipulating { index: usize },
}

/// Background image and how it is placed.
pub(super) struct Background {
    pub(super) image: ImageSurface,
    pub(super) mode: RenderMode,
}

/// Interactive drawing surface.
///
/// Owns the committed tool list, the redo buffer, and the cached bitmaps the
/// host displays. Pointer events go in through [`Canvas::handle_pointer`] (or
/// the `pointer_*` methods); the composited result comes out of
/// [`Canvas::image`].
pub struct Canvas {
    pub(super) width: i32,
    pub(super) height: i32,
    /// Tool created on the next pointer-down
    pub tool_type: ToolType,
    /// Style copied into each new tool
    pub style: StrokeStyle,
    /// Rendering sub-mode for new pen strokes
    pub pen_style: PenStyle,
    /// Channel-sum threshold for new fills
    pub fill_tolerance: u32,
    /// Handle and resize limits for new editable stamps
    pub stamp_settings: StampSettings,
    pub(super) stamp_image: Option<Rc<ImageSurface>>,
    pub(super) stamp_editable: bool,
    pub(super) state: DrawingState,
    pub(super) history: History<Tool>,
    /// Index of the one stamp in edit mode, if any
    pub(super) editing: Option<usize>,
    /// Redo-buffer depth of the stamp that was in edit mode when undone
    pub(super) undone_editing: Option<usize>,
    pub(super) background: Option<Background>,
    /// Background plus every committed tool (and edit handles)
    pub(super) full: ImageSurface,
    /// `full` plus the stroke in progress
    pub(super) preview: Option<ImageSurface>,
    pub(super) last_point: Point,
    pub(super) active_touch: Option<TouchId>,
    /// Set whenever the displayed image changed
    pub needs_redraw: bool,
    pub(super) dirty: DirtyTracker,
    pub(super) observer: Option<Box<dyn StrokeObserver>>,
    pub(super) icons: Box<dyn IconSource>,
}

impl Canvas {
    /// Creates a blank, transparent canvas.
    pub fn new(width: i32, height: i32) -> Result<Self, SketchError> {
        let full = ImageSurface::create(Format::ARgb32, width, height)?;
        debug!("Created {}x{} canvas", width, height);
        Ok(Self {
            width,
            height,
            tool_type: ToolType::default(),
            style: StrokeStyle::default(),
            pen_style: PenStyle::default(),
            fill_tolerance: DEFAULT_TOLERANCE,
            stamp_settings: StampSettings::default(),
            stamp_image: None,
            stamp_editable: false,
            state: DrawingState::Idle,
            history: History::new(),
            editing: None,
            undone_editing: None,
            background: None,
            full,
            preview: None,
            last_point: Point::default(),
            active_touch: None,
            needs_redraw: true,
            dirty: DirtyTracker::new(),
            observer: None,
            icons: Box::new(NoIcons),
        })
    }

    /// Creates a canvas sized and configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self, SketchError> {
        let mut canvas = Self::new(config.canvas.width, config.canvas.height)?;
        canvas.apply_config(config);
        Ok(canvas)
    }

    /// Copies drawing defaults from `config`. Takes effect from the next stroke.
    pub fn apply_config(&mut self, config: &Config) {
        let drawing = &config.drawing;
        let color = drawing.default_color.to_color();
        self.tool_type = drawing.default_tool;
        self.style = StrokeStyle::new(drawing.default_width, color, drawing.default_alpha);
        self.pen_style = drawing.pen_style;
        self.fill_tolerance = config.fill.tolerance;
        self.stamp_settings = StampSettings {
            handle_size: config.stamp.handle_size,
            hit_padding: config.stamp.hit_padding,
            min_scale: config.stamp.min_scale,
        };
        self.set_stamp_editable(config.stamp.editable);
        info!(
            "Canvas defaults: tool={}, color={}, width={:.1}, alpha={:.2}, pen={:?}",
            self.tool_type.label(),
            util::color_to_name(&color),
            self.style.width,
            self.style.alpha,
            self.pen_style
        );
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The composited bitmap: the live preview while a stroke is in progress,
    /// otherwise the full cache.
    pub fn image(&self) -> &ImageSurface {
        self.preview.as_ref().unwrap_or(&self.full)
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Committed tools in draw order.
    pub fn tools(&self) -> &[Tool] {
        self.history.committed()
    }

    /// Number of tools waiting in the redo buffer.
    pub fn redo_len(&self) -> usize {
        self.history.undone_len()
    }

    /// Index of the stamp in edit mode.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    /// The stamp in edit mode.
    pub fn selected_stamp(&self) -> Option<&EditableStamp> {
        self.history.get(self.editing?)?.as_editable()
    }

    pub fn stamp_editable(&self) -> bool {
        self.stamp_editable
    }

    /// Sets the image used by the stamp tool.
    pub fn set_stamp_image(&mut self, image: ImageSurface) {
        debug!("Stamp image set ({}x{})", image.width(), image.height());
        self.stamp_image = Some(Rc::new(image));
    }

    pub fn set_observer(&mut self, observer: Box<dyn StrokeObserver>) {
        self.observer = Some(observer);
    }

    pub fn set_icon_source(&mut self, icons: Box<dyn IconSource>) {
        self.icons = icons;
        if self.editing.is_some() {
            self.rebuild_full();
        }
    }

    /// Drains the display regions that changed since the last call.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.needs_redraw = false;
        self.dirty.take_regions(self.width, self.height)
    }

    /// Builds a tool of the current type with the current style.
    ///
    /// Returns `None` for the stamp tool when no stamp image is set.
    pub(super) fn create_tool(&self) -> Option<Tool> {
        let style = self.style;
        let shape = |kind| Some(Tool::Shape(ShapeTool::new(kind, style)));
        match self.tool_type {
            ToolType::Pen => Some(Tool::Pen(PenTool::new(
                style,
                self.pen_style,
                CompositeMode::Normal,
            ))),
            ToolType::Eraser => Some(Tool::Pen(PenTool::new(
                style,
                self.pen_style,
                CompositeMode::Clear,
            ))),
            ToolType::Line => shape(ShapeKind::Line),
            ToolType::Arrow => shape(ShapeKind::Arrow),
            ToolType::RectStroke => shape(ShapeKind::Rect { filled: false }),
            ToolType::RectFill => shape(ShapeKind::Rect { filled: true }),
            ToolType::EllipseStroke => shape(ShapeKind::Ellipse { filled: false }),
            ToolType::EllipseFill => shape(ShapeKind::Ellipse { filled: true }),
            ToolType::Star => shape(ShapeKind::Star),
            ToolType::Stamp => {
                let image = Rc::clone(self.stamp_image.as_ref()?);
                if self.stamp_editable {
                    Some(Tool::EditableStamp(EditableStamp::new(
                        image,
                        self.stamp_settings,
                    )))
                } else {
                    Some(Tool::Stamp(StampTool::new(image)))
                }
            }
            ToolType::Fill => Some(Tool::Fill(FillTool::with_tolerance(
                style,
                self.fill_tolerance,
            ))),
        }
    }

    /// Puts the stamp at `index` (or nothing) into edit mode, taking every
    /// other stamp out of it.
    pub(super) fn set_editing(&mut self, index: Option<usize>) {
        for tool in self.history.committed_mut() {
            if let Some(stamp) = tool.as_editable_mut() {
                stamp.set_editing(false);
            }
        }
        self.editing = index.filter(|&i| {
            match self.history.get_mut(i).and_then(Tool::as_editable_mut) {
                Some(stamp) => {
                    stamp.set_editing(true);
                    true
                }
                None => false,
            }
        });
        debug!("Editing stamp: {:?}", self.editing);
    }
}
