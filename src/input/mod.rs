//! Pointer input types and tool selection.
//!
//! Hosts translate their native touch or mouse events into [`PointerEvent`]s
//! and choose the active [`ToolType`]; the compositor does the rest.

pub mod events;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerPhase, TouchId};
pub use tool::ToolType;
