//! Snapshot-based undo/redo over the layer collection.
//!
//! Each committed mutation records the complete layer array. Layer counts
//! are small (tens, not thousands), so full snapshots are cheap and avoid
//! the drift risk of composing incremental diffs. The cursor invariant
//! holds at every rest point: `snapshots[index]` equals the live layers.

use serde::{Deserialize, Serialize};

use crate::layer::Layer;

/// Ordered full-state snapshots plus a cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Vec<Layer>>,
    index: usize,
}

impl History {
    /// A history with a single empty snapshot at the cursor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            index: 0,
        }
    }

    /// Record a committed state.
    ///
    /// Any redo branch past the cursor is truncated first; once a new
    /// mutation lands, the abandoned future is permanently unreachable.
    pub fn record(&mut self, layers: Vec<Layer>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(layers);
        self.index = self.snapshots.len() - 1;
    }

    /// Step the cursor back and return the snapshot to restore.
    ///
    /// Returns `None` at the start boundary.
    pub fn undo(&mut self) -> Option<Vec<Layer>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Step the cursor forward and return the snapshot to restore.
    ///
    /// Returns `None` at the end boundary.
    pub fn redo(&mut self) -> Option<Vec<Layer>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &[Layer] {
        self.snapshots.get(self.index).map_or(&[], Vec::as_slice)
    }

    /// Number of snapshots held, including the initial empty one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether only the initial snapshot is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.len() == 1
    }

    /// Position of the cursor.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
