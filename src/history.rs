//! Bounded undo/redo history over snapshots of a value.

use std::collections::VecDeque;

/// Default number of past snapshots retained
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Linear undo/redo history with a bounded past
///
/// Every [`History::set`] records the previous value and discards any redo
/// branch. Undo and redo move between recorded snapshots without recording
/// new ones.
///
/// # Examples
///
/// ```rust
/// use grocery_list::history::History;
///
/// let mut history = History::new(1);
/// history.set(2);
/// history.set(3);
///
/// history.undo();
/// assert_eq!(*history.present(), 2);
/// history.redo();
/// assert_eq!(*history.present(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    max_history: usize,
}

impl<T: Clone> History<T> {
    /// Create a history with the default depth
    pub fn new(initial: T) -> Self {
        Self::with_max_history(initial, DEFAULT_MAX_HISTORY)
    }

    /// Create a history retaining at most `max_history` past snapshots
    pub fn with_max_history(initial: T, max_history: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            max_history,
        }
    }

    /// Rebuild a history from stored snapshots
    ///
    /// `past` is oldest first and `future` is next-to-redo first. Only the
    /// newest `max_history` past snapshots are kept.
    pub fn from_parts(past: Vec<T>, present: T, future: Vec<T>, max_history: usize) -> Self {
        let mut past: VecDeque<T> = past.into();
        while past.len() > max_history {
            past.pop_front();
        }

        Self {
            past,
            present,
            future: future.into(),
            max_history,
        }
    }

    /// Snapshots available to undo, oldest first
    pub fn past(&self) -> impl Iterator<Item = &T> + '_ {
        self.past.iter()
    }

    /// Snapshots available to redo, next first
    pub fn future(&self) -> impl Iterator<Item = &T> + '_ {
        self.future.iter()
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Replace the current value, recording the old one
    pub fn set(&mut self, value: T) {
        let previous = std::mem::replace(&mut self.present, value);
        self.past.push_back(previous);
        while self.past.len() > self.max_history {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Derive the next value from the current one and record it
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.present);
        self.set(next);
    }

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Forget all snapshots, keeping the current value
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Replace the current value and forget all snapshots
    pub fn reset(&mut self, value: T) {
        self.present = value;
        self.clear();
    }

    /// Number of snapshots available to undo
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }
}
