//! Raster drawing engine.
//!
//! A [`Canvas`] turns pointer events into committed drawing tools (pens,
//! shapes, stamps, flood fills), keeps them on an undo/redo history and
//! composites them into cached ARGB32 bitmaps for a host to display. The
//! configuration and script modules let the bundled binary drive the engine
//! headlessly.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod script;
pub mod tool;
pub mod util;

pub use canvas::{Canvas, DrawingState, StrokeObserver};
pub use config::Config;
pub use error::SketchError;
pub use input::{PointerEvent, ToolType};
pub use script::Script;
pub use tool::Tool;
