//! Canvas compositor: committed tools, undo/redo and cached bitmaps.

mod cache;
mod commands;
mod core;
mod observer;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::{Canvas, DrawingState};
pub use observer::StrokeObserver;
