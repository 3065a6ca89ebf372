//! Pointer routing: stroke start, update and finalization.

use log::{debug, warn};

use super::{Canvas, DrawingState};
use crate::input::{PointerEvent, PointerPhase, ToolType};
use crate::tool::{StampHit, StrokeTool, Tool};
use crate::util::Point;

impl Canvas {
    /// Routes a pointer event, honoring only the first active touch.
    ///
    /// Secondary touches are ignored until the first one lifts.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                if let Some(active) = self.active_touch {
                    debug!("Ignoring touch {} while touch {} is active", event.touch, active);
                    return;
                }
                self.active_touch = Some(event.touch);
                self.pointer_down(event.point);
            }
            PointerPhase::Move => {
                if self.active_touch == Some(event.touch) {
                    self.pointer_move(event.point);
                }
            }
            PointerPhase::Up => {
                if self.active_touch == Some(event.touch) {
                    self.active_touch = None;
                    self.pointer_up(event.point);
                }
            }
        }
    }

    /// Starts a stroke, or a manipulation of the stamp in edit mode.
    ///
    /// # Behavior
    /// - A stroke still in progress is finalized first
    /// - With stamp editing on, a hit on the edited stamp's handles or body
    ///   deletes or manipulates it; a tap elsewhere takes it out of edit mode
    ///   and then proceeds as a normal tap
    /// - With the stamp tool, tapping an existing editable stamp selects the
    ///   topmost one under the pointer instead of placing a new stamp
    /// - Otherwise a new tool is committed and anchored at `point`
    pub fn pointer_down(&mut self, point: Point) {
        if self.state != DrawingState::Idle {
            warn!("Pointer down during an active stroke; finalizing it first");
            self.finish_stroke();
        }
        self.last_point = point;

        if self.stamp_editable {
            if let Some(index) = self.editing {
                let hit = self
                    .selected_stamp()
                    .map_or(StampHit::Outside, |stamp| stamp.hit_test(point));
                match hit {
                    StampHit::Delete => {
                        self.delete_selected_stamp();
                        return;
                    }
                    StampHit::Outside => {
                        self.set_editing(None);
                        self.rebuild_full();
                    }
                    manipulation => {
                        self.begin_manipulation(index, manipulation, point);
                        return;
                    }
                }
            }

            if self.tool_type == ToolType::Stamp {
                if let Some(index) = self.editable_stamp_at(point) {
                    self.set_editing(Some(index));
                    self.begin_manipulation(index, StampHit::Body, point);
                    self.rebuild_full();
                    return;
                }
            }
        }

        self.begin_stroke(point);
    }

    /// Feeds a pointer move into the active stroke or manipulation.
    pub fn pointer_move(&mut self, point: Point) {
        match self.state {
            DrawingState::Idle => {}
            DrawingState::Drawing { index } => {
                let from = self.last_point;
                if let Some(tool) = self.history.get_mut(index) {
                    self.dirty.mark_tool_recent(tool);
                    tool.move_to(from, point);
                    self.dirty.mark_tool_recent(tool);
                }
                self.rebuild_preview(index);
            }
            DrawingState::Manipulating { index } => {
                if let Some(stamp) = self.history.get_mut(index).and_then(Tool::as_editable_mut) {
                    stamp.update_interaction(point);
                }
                self.rebuild_full();
            }
        }
        self.last_point = point;
    }

    /// Applies the final move and finalizes the stroke.
    pub fn pointer_up(&mut self, point: Point) {
        match self.state {
            DrawingState::Idle => return,
            DrawingState::Drawing { index } => {
                let from = self.last_point;
                if let Some(tool) = self.history.get_mut(index) {
                    tool.move_to(from, point);
                }
            }
            DrawingState::Manipulating { index } => {
                if let Some(stamp) = self.history.get_mut(index).and_then(Tool::as_editable_mut) {
                    stamp.update_interaction(point);
                }
            }
        }
        self.last_point = point;
        self.finish_stroke();
    }

    /// Finalizes whatever is in progress and returns to idle.
    ///
    /// A finished drawing stroke rebuilds the full cache, discards the redo
    /// buffer and notifies the observer.
    pub(super) fn finish_stroke(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            DrawingState::Drawing { index } => {
                self.rebuild_full();
                self.history.discard_redo();
                self.undone_editing = None;
                self.notify(index, false);
                debug!("Stroke {} finalized", index);
            }
            DrawingState::Manipulating { index } => {
                if let Some(stamp) = self.history.get_mut(index).and_then(Tool::as_editable_mut) {
                    stamp.end_interaction();
                }
                self.rebuild_full();
            }
        }
    }

    fn begin_stroke(&mut self, point: Point) {
        let Some(mut tool) = self.create_tool() else {
            warn!("No stamp image set; ignoring {} tap", self.tool_type.label());
            return;
        };
        tool.set_initial_point(point);
        let editable = tool.as_editable().is_some();
        let index = self.history.push(tool);
        if editable {
            self.set_editing(Some(index));
        }
        self.state = DrawingState::Drawing { index };
        debug!("Started {} stroke at ({:.1}, {:.1})", self.tool_type.label(), point.x, point.y);

        self.notify(index, true);
        if let Some(tool) = self.history.get(index) {
            self.dirty.mark_tool_recent(tool);
        }
        self.rebuild_preview(index);
    }

    fn begin_manipulation(&mut self, index: usize, hit: StampHit, point: Point) {
        let started = self
            .history
            .get_mut(index)
            .and_then(Tool::as_editable_mut)
            .is_some_and(|stamp| stamp.begin_interaction(hit, point));
        if started {
            self.state = DrawingState::Manipulating { index };
        }
    }

    /// Topmost editable stamp whose body contains `point`.
    fn editable_stamp_at(&self, point: Point) -> Option<usize> {
        self.history
            .committed()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, tool)| {
                tool.as_editable()
                    .is_some_and(|stamp| stamp.hit_test(point) == StampHit::Body)
            })
            .map(|(index, _)| index)
    }

    fn notify(&mut self, index: usize, began: bool) {
        let (Some(observer), Some(tool)) = (self.observer.as_mut(), self.history.get(index)) else {
            return;
        };
        if began {
            observer.stroke_began(tool);
        } else {
            observer.stroke_ended(tool);
        }
    }
}
