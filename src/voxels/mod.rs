//! # Voxels Module
//!
//! Voxel truth: what a voxel is, how chunks lay voxels out in memory, and the
//! sparse store that owns every chunk.
//!
//! ## Architecture
//!
//! * **Block**: voxel values, block definitions and the block registry
//! * **Chunk**: dense 16³ arrays of voxels with per-layer occupancy counts
//! * **Coords**: world ↔ chunk/local coordinate conversions
//! * **Chunk store**: the sparse chunk map and the per-id count registry
//!
//! Nothing in this module builds geometry or notifies anyone; writes report the
//! chunks they made stale and the caller decides what to do about it.

pub mod block;
pub mod chunk;
pub mod chunk_store;
pub mod coords;
