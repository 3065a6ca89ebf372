//! Full and preview cache rebuilds.
//!
//! Caches are always re-rendered from scratch into a new surface and only
//! swapped in when rendering succeeded, so a failure never leaves a
//! half-drawn bitmap behind.

use cairo::{Context, Format, ImageSurface};
use log::{error, warn};

use super::Canvas;
use crate::draw::render::render_background;
use crate::error::SketchError;
use crate::tool::{StrokeTool, Tool};

impl Canvas {
    /// Re-renders the background plus every committed tool into the full cache
    /// and drops any preview.
    pub(super) fn rebuild_full(&mut self) {
        match self.render_committed() {
            Ok(surface) => {
                self.full = surface;
                self.preview = None;
            }
            Err(err) => error!("Failed to rebuild canvas: {}; keeping previous image", err),
        }
        self.dirty.mark_full();
        self.needs_redraw = true;
    }

    /// Re-renders the preview: the full cache with the tool at `index` on top.
    pub(super) fn rebuild_preview(&mut self, index: usize) {
        let Some(tool) = self.history.get(index) else {
            return;
        };
        match self.render_over_full(tool) {
            Ok(surface) => self.preview = Some(surface),
            Err(err) => error!("Failed to render stroke preview: {}", err),
        }
        self.needs_redraw = true;
    }

    fn render_committed(&self) -> Result<ImageSurface, SketchError> {
        let surface = ImageSurface::create(Format::ARgb32, self.width, self.height)?;
        {
            let ctx = Context::new(&surface)?;
            if let Some(background) = &self.background {
                render_background(&ctx, &background.image, background.mode, self.width, self.height)?;
            }
            for (index, tool) in self.history.committed().iter().enumerate() {
                render_tool(&ctx, index, tool);
            }
            if let Some(stamp) = self.selected_stamp() {
                stamp.render_handles(&ctx, self.icons.as_ref())?;
            }
            ctx.status()?;
        }
        Ok(surface)
    }

    fn render_over_full(&self, tool: &Tool) -> Result<ImageSurface, SketchError> {
        let surface = ImageSurface::create(Format::ARgb32, self.width, self.height)?;
        {
            let ctx = Context::new(&surface)?;
            ctx.set_source_surface(&self.full, 0.0, 0.0)?;
            ctx.paint()?;
            tool.render(&ctx)?;
            ctx.status()?;
        }
        Ok(surface)
    }
}

/// Renders one committed tool, skipping it for this rebuild if it fails.
fn render_tool(ctx: &Context, index: usize, tool: &Tool) {
    if let Err(err) = tool.render(ctx) {
        warn!(
            "Skipping {} at index {} for this frame: {}",
            tool.kind().label(),
            index,
            err
        );
    }
}
