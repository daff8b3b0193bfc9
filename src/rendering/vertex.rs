//! Vertex data structures for chunk meshes.
//!
//! This module defines the vertex format produced by the mesh builder. It is laid
//! out for direct upload to a GPU vertex buffer by whichever renderer consumes the
//! meshes.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Atlas UV coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - The corner position in world space
    /// * `normal` - The outward normal of the face the vertex belongs to
    /// * `tex_coords` - The atlas UV of the corner
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tex_coords,
        }
    }
}
