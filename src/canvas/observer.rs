//! Host notifications for stroke boundaries.

use crate::tool::Tool;

/// Receives a callback when a stroke starts and when it is finalized.
///
/// Hosts use this for haptics, analytics or toolbar updates. Both calls see
/// the committed tool; `stroke_ended` sees its final geometry.
pub trait StrokeObserver {
    fn stroke_began(&mut self, tool: &Tool);
    fn stroke_ended(&mut self, tool: &Tool);
}
