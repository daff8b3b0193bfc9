//! Chunk mesh generation and the hand-off to a renderer.
//!
//! The world rebuilds chunk meshes through [`mesh::build_chunk_mesh`] and keeps the
//! latest mesh per chunk. A [`MeshSink`] sees every change to that table so a
//! renderer can mirror it in GPU buffers.

pub mod mesh;

use crate::voxels::coords::ChunkKey;

use mesh::ChunkMesh;

/// Receives chunk meshes as the world rebuilds them.
///
/// For any key, calls alternate between one or more `upload`s and exactly one
/// `release`: `release` is called once when a mesh the sink was given is dropped,
/// either because the chunk no longer yields geometry or because the world was
/// cleared. A sink never sees `release` for a key it holds nothing for.
pub trait MeshSink {
    /// A chunk has new geometry. Replaces anything previously uploaded for `key`.
    fn upload(&mut self, key: ChunkKey, mesh: &ChunkMesh);

    /// The geometry for `key` is gone and its buffers can be freed.
    fn release(&mut self, key: ChunkKey);
}
