//! Mesh generation for voxel chunks.
//!
//! This module converts the voxels of a chunk into GPU-friendly vertex and index
//! buffers, emitting one quad per visible voxel side.
//!
//! # Architecture
//! - [`ChunkMesh`]: The geometry of one chunk, as faces and as flat buffers
//! - [`Face`]: A single quad with its corners and atlas UVs
//! - [`build_chunk_mesh`]: The face-culling builder
//!
//! # Usage
//! ```no_run
//! use cgmath::Point3;
//! use voxel_sculpt::rendering::meshing::mesh::build_chunk_mesh;
//! use voxel_sculpt::rendering::texture::AtlasLayout;
//! use voxel_sculpt::voxels::{block::{registry::BlockRegistry, Rotation}, chunk_store::ChunkStore};
//!
//! let mut store = ChunkStore::new();
//! store.set_block(0, 0, 0, 1, Rotation::R0);
//! let mesh = build_chunk_mesh(
//!     &store,
//!     Point3::new(0, 0, 0),
//!     &BlockRegistry::with_defaults(),
//!     &AtlasLayout::default(),
//!     None,
//! );
//! ```
//!
//! # Performance Considerations
//! - Empty layers of a chunk are skipped without probing their cells
//! - Neighbor lookups cross chunk borders through the store, so border faces are
//!   culled exactly; this is why edits on a border dirty the neighbor chunk too

mod face;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::{face_uvs, Face};
pub use mesh::*;
