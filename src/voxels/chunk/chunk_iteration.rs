//! # Chunk Iteration Module
//!
//! An iterator over the non-air voxels of a chunk.
//!
//! The iterator walks the flat arrays in linear-index order (x fastest, then z,
//! then y) and uses the chunk's per-layer occupancy counts to jump over layers
//! that hold no voxels at all, so sparse builds do not pay for 4096 lookups.

use crate::voxels::block::Voxel;
use crate::voxels::coords::{local_from_index, LocalPosition};

use super::{Chunk, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// An iterator over all non-air voxels in a chunk, yielding local positions.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next linear index to inspect
    index: usize,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates an iterator positioned before the chunk's first cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            index: 0,
        }
    }
}

impl Iterator for ChunkVoxelIterator<'_> {
    type Item = (LocalPosition, Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let plane = CHUNK_PLANE_SIZE as usize;

        while self.index < CHUNK_SIZE as usize {
            // At the start of a layer, skip it outright if it is empty.
            if self.index % plane == 0 && self.chunk_ref.layer_occupancy(self.index / plane) == 0 {
                self.index += plane;
                continue;
            }

            let index = self.index;
            self.index += 1;

            let voxel = self.chunk_ref.get_at_index(index);
            if !voxel.is_air() {
                return Some((local_from_index(index), voxel));
            }
        }

        None
    }
}
