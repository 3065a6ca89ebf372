//! History and document commands.
//!
//! Each command settles any stroke in progress, mutates the tool lists and
//! rebuilds the full cache before returning.

use cairo::ImageSurface;
use log::{debug, info};

use super::core::Background;
use super::Canvas;
use crate::draw::RenderMode;

impl Canvas {
    /// Removes every tool and the background, leaving a blank canvas.
    pub fn clear(&mut self) {
        self.finish_stroke();
        self.editing = None;
        self.undone_editing = None;
        self.history.clear();
        self.background = None;
        info!("Canvas cleared");
        self.rebuild_full();
    }

    /// Moves the most recent tool to the redo buffer. No-op when nothing is committed.
    ///
    /// Undoing the stamp in edit mode ends the edit; redoing it resumes the edit.
    pub fn undo(&mut self) {
        self.finish_stroke();
        let Some(top) = self.history.len().checked_sub(1) else {
            debug!("Nothing to undo");
            return;
        };
        let was_editing = self.editing == Some(top);
        if was_editing {
            self.set_editing(None);
        }
        self.history.undo();
        if was_editing {
            self.undone_editing = Some(self.history.undone_len());
        }
        debug!("Undo: {} committed, {} redoable", self.history.len(), self.history.undone_len());
        self.rebuild_full();
    }

    /// Restores the most recently undone tool. No-op when the redo buffer is empty.
    pub fn redo(&mut self) {
        self.finish_stroke();
        let resumes_edit = self.undone_editing == Some(self.history.undone_len());
        let Some(index) = self.history.redo() else {
            debug!("Nothing to redo");
            return;
        };
        if resumes_edit {
            self.undone_editing = None;
            if self.stamp_editable {
                self.set_editing(Some(index));
            }
        }
        debug!("Redo: {} committed, {} redoable", self.history.len(), self.history.undone_len());
        self.rebuild_full();
    }

    /// Replaces the background and discards all tools.
    pub fn load_image(&mut self, image: ImageSurface, mode: RenderMode) {
        self.finish_stroke();
        info!(
            "Loading {}x{} background ({:?})",
            image.width(),
            image.height(),
            mode
        );
        self.editing = None;
        self.undone_editing = None;
        self.history.clear();
        self.background = Some(Background { image, mode });
        self.rebuild_full();
    }

    /// Turns editable stamp placement on or off.
    ///
    /// Turning it off takes the edited stamp out of edit mode.
    pub fn set_stamp_editable(&mut self, editable: bool) {
        if self.stamp_editable == editable {
            return;
        }
        self.finish_stroke();
        self.stamp_editable = editable;
        debug!("Stamp editing {}", if editable { "enabled" } else { "disabled" });
        if !editable && self.editing.is_some() {
            self.set_editing(None);
            self.rebuild_full();
        }
    }

    /// Removes the stamp in edit mode. Deletion is not recorded in history.
    pub fn delete_selected_stamp(&mut self) {
        self.finish_stroke();
        let Some(index) = self.editing.take() else {
            debug!("No stamp selected");
            return;
        };
        self.history.remove(index);
        info!("Deleted stamp at index {}", index);
        self.rebuild_full();
    }
}
