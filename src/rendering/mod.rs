//! # Rendering Module
//!
//! Everything between voxel truth and a renderer: vertex layout, texture lookup
//! and chunk meshing. Nothing here talks to a GPU; finished meshes leave through
//! [`meshing::MeshSink`].

pub mod meshing;
pub mod texture;
mod vertex;

pub use vertex::Vertex;
