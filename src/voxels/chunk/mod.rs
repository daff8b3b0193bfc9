//! # Chunk Module
//!
//! The `Chunk` struct: a dense 16x16x16 cube of voxels.
//!
//! ## Storage
//!
//! A chunk keeps two parallel flat arrays of `CHUNK_SIZE` entries, one for block
//! ids and one for rotations, indexed by [`linear_index`] (`x + z*16 + y*256`).
//! Alongside them it maintains a non-air count per horizontal layer, which makes
//! "is this chunk empty" and "what is its highest populated layer" O(16) instead of
//! a scan over all 4096 cells, and lets iteration skip empty layers wholesale.
//!
//! ### Performance Characteristics
//! - **Voxel read/write**: O(1)
//! - **Topmost populated layer**: O(CHUNK_DIMENSION)
//! - **Iteration over non-air voxels**: O(populated layers × CHUNK_PLANE_SIZE)

use cgmath::Point3;

use super::block::{BlockId, Rotation, Voxel, AIR};
use super::coords::{linear_index, world_position, ChunkKey, LocalPosition};

use chunk_iteration::ChunkVoxelIterator;

pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in voxels.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of voxels in a single horizontal layer of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of voxels in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// A 16x16x16 block of voxel truth.
///
/// Chunks are created on first write and only ever mutated through
/// [`ChunkStore`](super::chunk_store::ChunkStore), which keeps the global block
/// counts in step with the arrays here.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    pub position: ChunkKey,

    /// Block id per cell, in linear-index order.
    ids: Box<[BlockId]>,

    /// Rotation per cell, parallel to `ids`.
    rotations: Box<[Rotation]>,

    /// Number of non-air cells in each horizontal layer, indexed by local y.
    layer_occupancy: [u16; CHUNK_DIMENSION as usize],
}

impl Chunk {
    /// Creates a chunk where every cell is air.
    pub fn empty(position: ChunkKey) -> Self {
        Chunk {
            position,
            ids: vec![AIR; CHUNK_SIZE as usize].into_boxed_slice(),
            rotations: vec![Rotation::R0; CHUNK_SIZE as usize].into_boxed_slice(),
            layer_occupancy: [0; CHUNK_DIMENSION as usize],
        }
    }

    /// Returns the voxel at a local position.
    ///
    /// # Panics
    /// Panics if any coordinate is `>= CHUNK_DIMENSION`.
    pub fn get(&self, local: LocalPosition) -> Voxel {
        self.get_at_index(linear_index(local.x, local.y, local.z))
    }

    /// Returns the voxel stored at a linear index.
    pub fn get_at_index(&self, index: usize) -> Voxel {
        Voxel {
            id: self.ids[index],
            rotation: self.rotations[index],
        }
    }

    /// Writes a voxel at a local position and returns the previous value.
    ///
    /// This only touches the chunk's own bookkeeping; callers that track global
    /// block counts must apply the returned previous value themselves.
    pub fn set(&mut self, local: LocalPosition, voxel: Voxel) -> Voxel {
        let index = linear_index(local.x, local.y, local.z);
        let previous = self.get_at_index(index);

        if previous.is_air() != voxel.is_air() {
            let layer = &mut self.layer_occupancy[local.y];
            if voxel.is_air() {
                *layer -= 1;
            } else {
                *layer += 1;
            }
        }

        self.ids[index] = voxel.id;
        self.rotations[index] = voxel.rotation;
        previous
    }

    /// Number of non-air voxels in the given local layer.
    pub fn layer_occupancy(&self, ly: usize) -> u16 {
        self.layer_occupancy[ly]
    }

    /// Number of non-air voxels in the chunk.
    pub fn solid_count(&self) -> usize {
        self.layer_occupancy.iter().map(|&count| count as usize).sum()
    }

    /// Returns `true` if every cell is air.
    ///
    /// Empty chunks are still kept by the store; this is informational.
    pub fn is_empty(&self) -> bool {
        self.layer_occupancy.iter().all(|&count| count == 0)
    }

    /// Highest local layer holding a non-air voxel.
    pub fn top_layer(&self) -> Option<usize> {
        self.layer_occupancy.iter().rposition(|&count| count > 0)
    }

    /// Converts a local position inside this chunk to a world position.
    pub fn world_position(&self, local: LocalPosition) -> Point3<i32> {
        world_position(self.position, local)
    }

    /// Iterates over the chunk's non-air voxels in linear-index order.
    pub fn voxels(&self) -> ChunkVoxelIterator<'_> {
        ChunkVoxelIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_all_air() {
        let chunk = Chunk::empty(Point3::new(0, 0, 0));
        assert!(chunk.is_empty());
        assert_eq!(chunk.top_layer(), None);
        assert_eq!(chunk.get(Point3::new(3, 4, 5)), Voxel::EMPTY);
        assert_eq!(chunk.voxels().count(), 0);
    }

    #[test]
    fn set_tracks_layer_occupancy() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));

        let previous = chunk.set(Point3::new(1, 7, 2), Voxel::new(3, Rotation::R90));
        assert_eq!(previous, Voxel::EMPTY);
        chunk.set(Point3::new(2, 7, 2), Voxel::new(3, Rotation::R0));
        chunk.set(Point3::new(0, 2, 0), Voxel::new(1, Rotation::R0));

        assert_eq!(chunk.layer_occupancy(7), 2);
        assert_eq!(chunk.top_layer(), Some(7));
        assert_eq!(chunk.solid_count(), 3);

        // Replacing a solid voxel with another solid voxel leaves counts alone.
        chunk.set(Point3::new(1, 7, 2), Voxel::new(4, Rotation::R180));
        assert_eq!(chunk.layer_occupancy(7), 2);

        chunk.set(Point3::new(1, 7, 2), Voxel::EMPTY);
        chunk.set(Point3::new(2, 7, 2), Voxel::EMPTY);
        assert_eq!(chunk.top_layer(), Some(2));
        assert!(!chunk.is_empty());
    }

    #[test]
    fn world_position_accounts_for_chunk_offset() {
        let chunk = Chunk::empty(Point3::new(-1, 2, 0));
        assert_eq!(
            chunk.world_position(Point3::new(15, 0, 3)),
            Point3::new(-1, 32, 3)
        );
    }
}
