//! Committed and undone stroke sequences.

/// Undo/redo history over committed items.
///
/// `committed` is in draw order (first = bottom layer, last = top layer).
/// Undo moves the tail of `committed` onto `undone`; redo moves it back.
/// Pushing a new item does not touch `undone`; callers discard redo history
/// explicitly with [`History::discard_redo`] once a stroke is finalized.
#[derive(Debug)]
pub struct History<T> {
    committed: Vec<T>,
    undone: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            undone: Vec::new(),
        }
    }

    /// Appends an item on top of the committed list and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        self.committed.push(item);
        self.committed.len() - 1
    }

    /// Drops everything that could be redone.
    pub fn discard_redo(&mut self) {
        self.undone.clear();
    }

    /// Moves the most recent committed item to the redo buffer.
    ///
    /// Returns the index the item had in the committed list.
    pub fn undo(&mut self) -> Option<usize> {
        let item = self.committed.pop()?;
        self.undone.push(item);
        Some(self.committed.len())
    }

    /// Restores the most recently undone item and returns its new index.
    pub fn redo(&mut self) -> Option<usize> {
        let item = self.undone.pop()?;
        Some(self.push(item))
    }

    /// Empties both sequences.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    /// Removes a committed item outright (not undoable).
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.committed.len()).then(|| self.committed.remove(index))
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.committed.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.committed.get_mut(index)
    }

    /// Committed items in draw order.
    pub fn committed(&self) -> &[T] {
        &self.committed
    }

    pub fn committed_mut(&mut self) -> &mut [T] {
        &mut self.committed
    }

    /// Number of committed items.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Number of items waiting in the redo buffer.
    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }
}
