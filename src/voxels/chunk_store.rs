//! # Chunk Store Module
//!
//! The `ChunkStore` owns all voxel truth: a sparse map from chunk key to [`Chunk`]
//! plus the per-id block count registry.
//!
//! ## Lifecycle
//!
//! A chunk is created the first time any of its cells is written, including a
//! write of air into a chunk that does not exist yet. Chunks are never removed
//! again, even once every cell is air; only [`ChunkStore::clear`] drops them. This
//! keeps chunk identity stable for the mesh table at the cost of unbounded growth
//! in long sessions.
//!
//! ## Dirty tracking
//!
//! [`ChunkStore::set_block`] reports which chunks need new geometry: the edited
//! chunk and every neighbor that shares a face with the edited voxel. The store
//! does not rebuild anything itself; see [`crate::world::VoxelWorld`].

use std::collections::HashMap;

use cgmath::Point3;

use super::block::{BlockId, Rotation, Voxel, AIR};
use super::chunk::{Chunk, CHUNK_DIMENSION};
use super::coords::{boundary_neighbors, split_world_position, ChunkKey};

/// Outcome of a `set_block` call that actually changed a voxel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockWrite {
    /// The voxel that was overwritten.
    pub previous: Voxel,
    /// Chunks whose geometry is stale: the edited chunk first, then any neighbors.
    pub dirty: Vec<ChunkKey>,
}

/// Sparse 3D grid of chunks.
#[derive(Default)]
pub struct ChunkStore {
    /// Chunks that have been touched at least once.
    chunks: HashMap<ChunkKey, Chunk>,
    /// Number of voxels holding each non-air id. Ids with no voxels are absent.
    block_counts: HashMap<BlockId, u32>,
}

impl ChunkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the block id at a world position, or air if its chunk does not exist.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.get_voxel(x, y, z).id
    }

    /// Returns the rotation at a world position, or `R0` if its chunk does not exist.
    pub fn get_rotation(&self, x: i32, y: i32, z: i32) -> Rotation {
        self.get_voxel(x, y, z).rotation
    }

    /// Returns the voxel at a world position.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        let (key, local) = split_world_position(x, y, z);
        self.chunks
            .get(&key)
            .map_or(Voxel::EMPTY, |chunk| chunk.get(local))
    }

    /// Writes a voxel at a world position.
    ///
    /// Creates the chunk if needed. When `(id, rotation)` already matches the stored
    /// voxel, nothing else happens and `None` is returned: counts are untouched and
    /// no chunk is reported dirty. Otherwise the count registry is updated and the
    /// returned [`BlockWrite`] lists the chunks whose geometry is stale.
    pub fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        id: BlockId,
        rotation: Rotation,
    ) -> Option<BlockWrite> {
        let (key, local) = split_world_position(x, y, z);
        let chunk = self
            .chunks
            .entry(key)
            .or_insert_with(|| Chunk::empty(key));

        let voxel = Voxel::new(id, rotation);
        if chunk.get(local) == voxel {
            return None;
        }

        let previous = chunk.set(local, voxel);
        self.decrement_count(previous.id);
        self.increment_count(id);

        let mut dirty = vec![key];
        dirty.extend(boundary_neighbors(key, local));

        Some(BlockWrite { previous, dirty })
    }

    fn increment_count(&mut self, id: BlockId) {
        if id != AIR {
            *self.block_counts.entry(id).or_insert(0) += 1;
        }
    }

    fn decrement_count(&mut self, id: BlockId) {
        if id == AIR {
            return;
        }
        if let Some(count) = self.block_counts.get_mut(&id) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.block_counts.remove(&id);
            }
        }
    }

    /// Drops every chunk and resets the block counts.
    ///
    /// Listeners are not notified here; that is the caller's job.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.block_counts.clear();
    }

    /// Calls `f` with the world position and value of every non-air voxel.
    pub fn for_each_voxel<F>(&self, mut f: F)
    where
        F: FnMut(Point3<i32>, Voxel),
    {
        for (position, voxel) in self.voxels() {
            f(position, voxel);
        }
    }

    /// Iterates over every non-air voxel with its world position.
    ///
    /// Chunk order is unspecified; within a chunk voxels come in linear-index order.
    pub fn voxels(&self) -> impl Iterator<Item = (Point3<i32>, Voxel)> + '_ {
        self.chunks.values().flat_map(|chunk| {
            chunk
                .voxels()
                .map(move |(local, voxel)| (chunk.world_position(local), voxel))
        })
    }

    /// Highest world y holding a non-air voxel, or `None` if there is none.
    ///
    /// Each chunk contributes its topmost populated layer from its occupancy
    /// counts, so no voxels are scanned.
    pub fn max_non_empty_layer(&self) -> Option<i32> {
        self.chunks
            .values()
            .filter_map(|chunk| {
                chunk
                    .top_layer()
                    .map(|ly| chunk.position.y * CHUNK_DIMENSION + ly as i32)
            })
            .max()
    }

    /// Number of voxels per non-air block id.
    pub fn block_counts(&self) -> &HashMap<BlockId, u32> {
        &self.block_counts
    }

    /// Returns a chunk by key.
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Returns `true` if the chunk has ever been written.
    pub fn contains_chunk(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Keys of every existing chunk.
    pub fn chunk_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of existing chunks, empty ones included.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
