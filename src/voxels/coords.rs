//! # Coordinate Module
//!
//! Conversions between world voxel coordinates, chunk keys and chunk-local
//! coordinates.
//!
//! World coordinates are unbounded `i32` triples. They split into a chunk key
//! (`floor(n / 16)` per axis) and a local coordinate (`((n % 16) + 16) % 16`),
//! which must also hold for negative inputs: world x = -1 lives in chunk -1 at
//! local x 15. Euclidean division gives exactly this pair.

use cgmath::{Point3, Vector3};

use super::chunk::{CHUNK_DIMENSION, CHUNK_PLANE_SIZE};

/// Integer key of a chunk in the sparse chunk grid.
pub type ChunkKey = Point3<i32>;

/// Position of a voxel inside its chunk, each axis in `0..CHUNK_DIMENSION`.
pub type LocalPosition = Point3<usize>;

/// Returns the chunk coordinate containing world coordinate `n` on one axis.
#[inline]
pub fn chunk_of(n: i32) -> i32 {
    n.div_euclid(CHUNK_DIMENSION)
}

/// Returns the chunk-local coordinate of world coordinate `n` on one axis.
#[inline]
pub fn local_of(n: i32) -> usize {
    n.rem_euclid(CHUNK_DIMENSION) as usize
}

/// Splits a world position into its chunk key and local position.
pub fn split_world_position(x: i32, y: i32, z: i32) -> (ChunkKey, LocalPosition) {
    (
        Point3::new(chunk_of(x), chunk_of(y), chunk_of(z)),
        Point3::new(local_of(x), local_of(y), local_of(z)),
    )
}

/// Returns the key of the chunk containing the world position.
pub fn chunk_key_of(x: i32, y: i32, z: i32) -> ChunkKey {
    Point3::new(chunk_of(x), chunk_of(y), chunk_of(z))
}

/// Linear index of a local position inside the chunk's flat arrays.
///
/// X varies fastest, then Z, then Y (`lx + lz*S + ly*S²`). Neighbor arithmetic
/// elsewhere in the crate relies on this ordering.
#[inline]
pub fn linear_index(lx: usize, ly: usize, lz: usize) -> usize {
    lx + lz * CHUNK_DIMENSION as usize + ly * CHUNK_PLANE_SIZE as usize
}

/// Inverse of [`linear_index`].
#[inline]
pub fn local_from_index(index: usize) -> LocalPosition {
    let dimension = CHUNK_DIMENSION as usize;
    let plane = CHUNK_PLANE_SIZE as usize;
    let ly = index / plane;
    let rem = index % plane;
    Point3::new(rem % dimension, ly, rem / dimension)
}

/// Converts a chunk key and a local position back into a world position.
pub fn world_position(key: ChunkKey, local: LocalPosition) -> Point3<i32> {
    Point3::new(
        key.x * CHUNK_DIMENSION + local.x as i32,
        key.y * CHUNK_DIMENSION + local.y as i32,
        key.z * CHUNK_DIMENSION + local.z as i32,
    )
}

/// Keys of the neighbor chunks that share a face with the voxel at `local`.
///
/// A voxel on the low or high boundary of an axis touches the neighbor chunk on
/// that side, so up to six keys are returned (a corner voxel yields three).
pub fn boundary_neighbors(key: ChunkKey, local: LocalPosition) -> Vec<ChunkKey> {
    let last = CHUNK_DIMENSION as usize - 1;
    let mut neighbors = Vec::new();

    let axes = [
        (local.x, Vector3::unit_x()),
        (local.y, Vector3::unit_y()),
        (local.z, Vector3::unit_z()),
    ];
    for (coordinate, axis) in axes {
        if coordinate == 0 {
            neighbors.push(key - axis);
        }
        if coordinate == last {
            neighbors.push(key + axis);
        }
    }

    neighbors
}
