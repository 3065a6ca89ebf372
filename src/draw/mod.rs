//! Raster primitives (Cairo-based).
//!
//! This module defines the low-level drawing types the tools build on:
//! - [`Color`]: ARGB color representation with predefined color constants
//! - [`PixelBuffer`]: bounds-checked access to raw ARGB32 pixel data
//! - [`seed_fill`] / [`fill_surface`]: scanline flood fill
//! - [`History`]: committed/undone sequences for undo and redo
//! - Rendering helpers, blur, dirty tracking and handle icons

pub mod blur;
pub mod color;
pub mod dirty;
pub mod fill;
pub mod history;
pub mod icons;
pub mod pixel;
pub mod render;
pub mod style;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use fill::{ChannelSumDistance, ColorComparator, DEFAULT_TOLERANCE, fill_surface, seed_fill};
pub use history::History;
pub use icons::{Handle, IconSource, NoIcons};
pub use pixel::PixelBuffer;
pub use render::RenderMode;
pub use style::{PenStyle, StrokeStyle};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
