//! Stroke scripts: headless replay of a drawing session.
//!
//! A script is a TOML file with an optional background image followed by
//! `[[step]]` tables. Each stroke step is replayed as pointer down, moves and
//! up through [`Canvas::handle_pointer`], exactly as a host would deliver them.
//!
//! ```toml
//! background = "photo.png"
//! background_mode = "scale-to-fit"
//!
//! [[step]]
//! action = "stroke"
//! tool = "arrow"
//! color = "blue"
//! width = 4.0
//! points = [[10.0, 10.0], [120.0, 80.0]]
//!
//! [[step]]
//! action = "undo"
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cairo::ImageSurface;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::canvas::Canvas;
use crate::config::ColorSpec;
use crate::draw::{PenStyle, RenderMode, StrokeStyle};
use crate::error::SketchError;
use crate::input::{PointerEvent, ToolType};

/// Touch id used for replayed strokes.
const SCRIPT_TOUCH: u64 = 0;

/// A parsed stroke script.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Canvas width, overriding the config default
    pub width: Option<i32>,
    /// Canvas height, overriding the config default
    pub height: Option<i32>,
    /// PNG loaded as the background before the first step
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub background_mode: RenderMode,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One scripted action.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Stroke(StrokeStep),
    Undo,
    Redo,
    Clear,
    SetStampEditable { editable: bool },
    DeleteSelectedStamp,
}

/// A single pointer-down-to-up interaction.
///
/// Settings given here stay selected for later strokes, like a toolbar.
#[derive(Debug, Deserialize)]
pub struct StrokeStep {
    pub tool: Option<ToolType>,
    pub color: Option<ColorSpec>,
    pub width: Option<f64>,
    pub alpha: Option<f64>,
    pub pen_style: Option<PenStyle>,
    /// PNG used by the stamp tool
    pub stamp: Option<PathBuf>,
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script: Script = toml::from_str(&text)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        info!("Loaded script {} ({} steps)", path.display(), script.steps.len());
        Ok(script)
    }

    /// Replays the script onto `canvas`. Relative image paths resolve against `base_dir`.
    pub fn apply(&self, canvas: &mut Canvas, base_dir: &Path) -> Result<()> {
        if let Some(background) = &self.background {
            let image = load_png(&base_dir.join(background))?;
            canvas.load_image(image, self.background_mode);
        }

        for (number, step) in self.steps.iter().enumerate() {
            debug!("Step {}: {:?}", number + 1, step);
            match step {
                Step::Stroke(stroke) => stroke
                    .apply(canvas, base_dir)
                    .with_context(|| format!("Step {} failed", number + 1))?,
                Step::Undo => canvas.undo(),
                Step::Redo => canvas.redo(),
                Step::Clear => canvas.clear(),
                Step::SetStampEditable { editable } => canvas.set_stamp_editable(*editable),
                Step::DeleteSelectedStamp => canvas.delete_selected_stamp(),
            }
        }
        Ok(())
    }
}

impl StrokeStep {
    fn apply(&self, canvas: &mut Canvas, base_dir: &Path) -> Result<()> {
        if let Some(tool) = self.tool {
            canvas.tool_type = tool;
        }
        if let Some(pen_style) = self.pen_style {
            canvas.pen_style = pen_style;
        }
        if self.color.is_some() || self.width.is_some() || self.alpha.is_some() {
            let current = canvas.style;
            canvas.style = StrokeStyle::new(
                self.width.unwrap_or(current.width),
                self.color.as_ref().map_or(current.color, ColorSpec::to_color),
                self.alpha.unwrap_or(current.alpha),
            );
        }
        if let Some(stamp) = &self.stamp {
            canvas.set_stamp_image(load_png(&base_dir.join(stamp))?);
        }

        let Some((&[x, y], rest)) = self.points.split_first() else {
            warn!("Stroke step without points; skipping");
            return Ok(());
        };
        canvas.handle_pointer(PointerEvent::down(SCRIPT_TOUCH, x, y));
        let mut last = (x, y);
        for &[x, y] in rest {
            canvas.handle_pointer(PointerEvent::moved(SCRIPT_TOUCH, x, y));
            last = (x, y);
        }
        canvas.handle_pointer(PointerEvent::up(SCRIPT_TOUCH, last.0, last.1));
        Ok(())
    }
}

/// Decodes a PNG file into an image surface.
pub fn load_png(path: &Path) -> Result<ImageSurface> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    let image = ImageSurface::create_from_png(&mut file)
        .map_err(SketchError::ImageLoad)
        .with_context(|| format!("Failed to decode PNG {}", path.display()))?;
    debug!("Loaded {}x{} image from {}", image.width(), image.height(), path.display());
    Ok(image)
}

/// Encodes `surface` as a PNG file.
pub fn save_png(surface: &ImageSurface, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to encode PNG {}", path.display()))?;
    info!("Wrote {}x{} image to {}", surface.width(), surface.height(), path.display());
    Ok(())
}
