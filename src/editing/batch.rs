//! # Batch Controller
//!
//! Coalesces chunk rebuilds across many edits.
//!
//! Outside a batch every edit is flushed at once. Inside a batch the dirty chunk
//! keys are collected in a set, so a chunk touched by a thousand edits is rebuilt
//! once when the batch ends.

use std::collections::HashSet;

use log::warn;

use crate::voxels::coords::ChunkKey;

/// Tracks whether edits are being batched and which chunks they dirtied.
#[derive(Default, Debug)]
pub struct BatchController {
    batching: bool,
    dirty: HashSet<ChunkKey>,
}

impl BatchController {
    /// Creates a controller in immediate mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a batch.
    ///
    /// Batches do not nest: opening one while another is open keeps the open
    /// batch and its dirty set, logs a warning and returns `false`.
    pub fn begin(&mut self) -> bool {
        if self.batching {
            warn!("begin_batch called while a batch is already open; ignoring");
            return false;
        }
        self.batching = true;
        self.dirty.clear();
        true
    }

    /// Records chunks that need a rebuild when the batch ends.
    pub fn mark<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = ChunkKey>,
    {
        self.dirty.extend(keys);
    }

    /// Closes the batch and hands back the chunks to rebuild.
    ///
    /// # Returns
    /// The dirty keys sorted by `(x, y, z)`, or `None` if no batch was open.
    pub fn end(&mut self) -> Option<Vec<ChunkKey>> {
        if !self.batching {
            warn!("end_batch called without an open batch; ignoring");
            return None;
        }
        self.batching = false;

        let mut keys: Vec<ChunkKey> = self.dirty.drain().collect();
        keys.sort_by_key(|key| (key.x, key.y, key.z));
        Some(keys)
    }

    /// Returns `true` while a batch is open.
    pub fn is_batching(&self) -> bool {
        self.batching
    }

    /// Number of distinct chunks dirtied so far in the open batch.
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }
}
