//! Bounded undo/redo history of whole-image snapshots.
//!
//! Every entry is a deep copy of the buffer it was created from. Later edits
//! to the live image can never reach back into a stored snapshot.
//!
//! Both stacks hold at most `capacity` entries. When a push would exceed
//! that, the oldest entry is evicted (FIFO eviction, LIFO pop).

use std::collections::VecDeque;

use crate::decode::ImageBuffer;

/// Default number of snapshots kept on each stack.
pub const DEFAULT_HISTORY_DEPTH: usize = 30;

/// Which way a history operation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryDirection::Undo => f.write_str("undo"),
            HistoryDirection::Redo => f.write_str("redo"),
        }
    }
}

/// Undo and redo stacks with a shared depth bound.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    undo: VecDeque<ImageBuffer>,
    redo: VecDeque<ImageBuffer>,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_DEPTH)
    }
}

impl HistoryStack {
    /// Create an empty history with the default depth of 30.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history holding at most `capacity` entries per stack.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a snapshot of `buffer` as the newest undo entry.
    ///
    /// Always clears the redo stack.
    pub fn push(&mut self, buffer: &ImageBuffer) {
        push_bounded(&mut self.undo, buffer.clone(), self.capacity);
        self.redo.clear();
    }

    /// Pop the newest undo entry.
    ///
    /// `current` is the buffer being replaced; when present it becomes the
    /// newest redo entry. Returns `None` and changes nothing if there is
    /// nothing to undo.
    pub fn undo(&mut self, current: Option<&ImageBuffer>) -> Option<ImageBuffer> {
        let restored = self.undo.pop_back()?;
        if let Some(current) = current {
            push_bounded(&mut self.redo, current.clone(), self.capacity);
        }
        Some(restored)
    }

    /// Pop the newest redo entry, the mirror image of [`HistoryStack::undo`].
    pub fn redo(&mut self, current: Option<&ImageBuffer>) -> Option<ImageBuffer> {
        let restored = self.redo.pop_back()?;
        if let Some(current) = current {
            push_bounded(&mut self.undo, current.clone(), self.capacity);
        }
        Some(restored)
    }

    /// Drop every entry on both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn push_bounded(stack: &mut VecDeque<ImageBuffer>, buffer: ImageBuffer, capacity: usize) {
    stack.push_back(buffer);
    while stack.len() > capacity {
        stack.pop_front();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: after n edits, n undos walk back through every snapshot
        /// and n redos walk forward to the final state again.
        #[test]
        fn prop_undo_redo_restores_sequence(n in 1usize..=30) {
            let states: Vec<ImageBuffer> = (0..=n)
                .map(|i| ImageBuffer::filled(2, 1, [i as u8, (i * 7) as u8, 1]))
                .collect();

            let mut history = HistoryStack::new();
            let mut current = states[0].clone();
            for next in &states[1..] {
                history.push(&current);
                current = next.clone();
            }

            for expected in states[..n].iter().rev() {
                let restored = history.undo(Some(&current)).unwrap();
                prop_assert_eq!(&restored, expected);
                current = restored;
            }
            prop_assert!(history.undo(Some(&current)).is_none());

            for expected in &states[1..] {
                let restored = history.redo(Some(&current)).unwrap();
                prop_assert_eq!(&restored, expected);
                current = restored;
            }
            prop_assert!(history.redo(Some(&current)).is_none());
            prop_assert_eq!(history.undo_len(), n);
        }

        /// Property: neither stack ever exceeds its capacity.
        #[test]
        fn prop_stacks_stay_bounded(
            capacity in 1usize..=8,
            ops in proptest::collection::vec(0u8..3, 0..64),
        ) {
            let mut history = HistoryStack::with_capacity(capacity);
            let current = ImageBuffer::filled(1, 1, [0, 0, 0]);
            for op in ops {
                match op {
                    0 => history.push(&current),
                    1 => { history.undo(Some(&current)); }
                    _ => { history.redo(Some(&current)); }
                }
                prop_assert!(history.undo_len() <= capacity);
                prop_assert!(history.redo_len() <= capacity);
            }
        }
    }
}
