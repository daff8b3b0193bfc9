//! # Command History
//!
//! Undo and redo over recorded change-sets.
//!
//! A change-set is the ordered list of voxel writes made by one user action. The
//! history never inspects the world when recording; callers push the
//! [`BlockChange`]s the world reported. Replaying goes through a [`BlockWriter`],
//! always inside a single batch so one undo costs one rebuild per touched chunk.
//! If the writer already has a batch open, the replay joins it and leaves closing
//! it to whoever opened it.
//!
//! ## Ordering
//! Undo applies a change-set's entries in reverse and writes the previous values;
//! redo applies them in recorded order and writes the new values. When a
//! change-set touches the same voxel twice this is what makes undo land on the
//! value from before the first write.

use std::collections::VecDeque;

use log::debug;

use crate::voxels::block::{BlockId, Rotation};

/// Number of change-sets kept on the undo stack by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One recorded voxel write.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockChange {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub prev_id: BlockId,
    pub prev_rotation: Rotation,
    pub new_id: BlockId,
    pub new_rotation: Rotation,
}

/// The writes made by one user action, in the order they happened.
pub type ChangeSet = Vec<BlockChange>;

/// Where the history writes when it replays a change-set.
pub trait BlockWriter {
    /// Starts coalescing rebuilds.
    fn begin_batch(&mut self);

    /// Rebuilds everything touched since `begin_batch` and notifies once.
    fn end_batch(&mut self);

    /// Returns `true` while a batch is open.
    fn is_batching(&self) -> bool;

    /// Writes one voxel.
    fn write_block(&mut self, x: i32, y: i32, z: i32, id: BlockId, rotation: Rotation);
}

/// Bounded undo stack plus redo stack.
#[derive(Debug)]
pub struct CommandHistory {
    undo_stack: VecDeque<ChangeSet>,
    redo_stack: Vec<ChangeSet>,
    capacity: usize,
}

impl CommandHistory {
    /// Creates a history that keeps [`DEFAULT_HISTORY_CAPACITY`] change-sets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a history that keeps at most `capacity` change-sets.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        CommandHistory {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records a change-set.
    ///
    /// Empty change-sets are ignored and `false` is returned. Otherwise the oldest
    /// change-set is dropped when the stack is full, and the redo stack is cleared.
    pub fn push(&mut self, changes: ChangeSet) -> bool {
        if changes.is_empty() {
            return false;
        }

        self.undo_stack.push_back(changes);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
            debug!("history full, dropped oldest change-set");
        }
        self.redo_stack.clear();
        true
    }

    /// Reverts the most recent change-set.
    ///
    /// # Returns
    /// `false` if there was nothing to undo.
    pub fn undo(&mut self, world: &mut dyn BlockWriter) -> bool {
        let Some(changes) = self.undo_stack.pop_back() else {
            return false;
        };

        replay(
            world,
            changes
                .iter()
                .rev()
                .map(|change| (change.x, change.y, change.z, change.prev_id, change.prev_rotation)),
        );

        debug!("undid {} block changes", changes.len());
        self.redo_stack.push(changes);
        true
    }

    /// Re-applies the most recently undone change-set.
    ///
    /// # Returns
    /// `false` if there was nothing to redo.
    pub fn redo(&mut self, world: &mut dyn BlockWriter) -> bool {
        let Some(changes) = self.redo_stack.pop() else {
            return false;
        };

        replay(
            world,
            changes
                .iter()
                .map(|change| (change.x, change.y, change.z, change.new_id, change.new_rotation)),
        );

        debug!("redid {} block changes", changes.len());
        self.undo_stack.push_back(changes);
        true
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Writes `writes` in order inside one batch, joining a batch that is already open.
fn replay<I>(world: &mut dyn BlockWriter, writes: I)
where
    I: IntoIterator<Item = (i32, i32, i32, BlockId, Rotation)>,
{
    let owns_batch = !world.is_batching();
    if owns_batch {
        world.begin_batch();
    }
    for (x, y, z, id, rotation) in writes {
        world.write_block(x, y, z, id, rotation);
    }
    if owns_batch {
        world.end_batch();
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
