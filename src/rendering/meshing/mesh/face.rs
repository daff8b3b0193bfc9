use cgmath::Point3;

use crate::rendering::texture::TextureUv;
use crate::voxels::block::{block_side::BlockSide, BlockId, Rotation};

/// A single textured quad on one side of a voxel.
///
/// Corners are stored in world space as floats, so the far corner of a voxel at
/// `i32::MAX` stays representable. They are ordered counter-clockwise
/// when seen from outside the voxel, so the indices `0, 1, 2, 2, 3, 0` produce two
/// front-facing triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// World position of the voxel this face belongs to
    pub voxel: Point3<i32>,
    /// The block id the face was generated for
    pub block_id: BlockId,
    /// Which side of the voxel this face covers
    pub side: BlockSide,
    /// The four corners of the quad
    pub corners: [Point3<f32>; 4],
    /// Atlas UV for each corner, parallel to `corners`
    pub uvs: [[f32; 2]; 4],
}

impl Face {
    /// Creates a face on `side` of the voxel at `voxel`.
    ///
    /// # Arguments
    /// * `voxel` - World position of the voxel
    /// * `block_id` - The block id, kept for consumers that sort or filter faces
    /// * `side` - Which side of the voxel the face covers
    /// * `uvs` - Atlas UV for each corner, see [`face_uvs`]
    ///
    /// # Returns
    /// A new `Face` with its corners laid out for `side`.
    pub fn new(voxel: Point3<i32>, block_id: BlockId, side: BlockSide, uvs: [[f32; 2]; 4]) -> Self {
        Face {
            voxel,
            block_id,
            side,
            corners: corners(voxel, side),
            uvs,
        }
    }
}

/// Corner positions of one side of the unit cube at `voxel`.
fn corners(voxel: Point3<i32>, side: BlockSide) -> [Point3<f32>; 4] {
    let (x, y, z) = (voxel.x as f32, voxel.y as f32, voxel.z as f32);
    let p = Point3::new;

    match side {
        BlockSide::EAST => [
            p(x + 1.0, y, z + 1.0),
            p(x + 1.0, y, z),
            p(x + 1.0, y + 1.0, z),
            p(x + 1.0, y + 1.0, z + 1.0),
        ],
        BlockSide::WEST => [
            p(x, y, z),
            p(x, y, z + 1.0),
            p(x, y + 1.0, z + 1.0),
            p(x, y + 1.0, z),
        ],
        BlockSide::TOP => [
            p(x, y + 1.0, z + 1.0),
            p(x + 1.0, y + 1.0, z + 1.0),
            p(x + 1.0, y + 1.0, z),
            p(x, y + 1.0, z),
        ],
        BlockSide::BOTTOM => [
            p(x, y, z),
            p(x + 1.0, y, z),
            p(x + 1.0, y, z + 1.0),
            p(x, y, z + 1.0),
        ],
        BlockSide::SOUTH => [
            p(x, y, z + 1.0),
            p(x + 1.0, y, z + 1.0),
            p(x + 1.0, y + 1.0, z + 1.0),
            p(x, y + 1.0, z + 1.0),
        ],
        BlockSide::NORTH => [
            p(x + 1.0, y, z),
            p(x, y, z),
            p(x, y + 1.0, z),
            p(x + 1.0, y + 1.0, z),
        ],
    }
}

/// Computes the per-corner UVs for a face.
///
/// # Arguments
/// * `uv` - The atlas rectangle of the texture
/// * `inset` - Amount trimmed from every edge, normally half a texel
/// * `side` - The side the face covers
/// * `rotation` - The voxel's rotation
///
/// # Returns
/// UVs in corner order `(uMin,vMin), (uMax,vMin), (uMax,vMax), (uMin,vMax)`. Top
/// and bottom faces shift that order left by one step per quarter turn so the
/// cap texture turns with the block.
pub fn face_uvs(uv: TextureUv, inset: f32, side: BlockSide, rotation: Rotation) -> [[f32; 2]; 4] {
    let u_min = uv.u + inset;
    let u_max = uv.u + uv.u_size - inset;
    let v_min = uv.v + inset;
    let v_max = uv.v + uv.v_size - inset;

    let mut uvs = [
        [u_min, v_min],
        [u_max, v_min],
        [u_max, v_max],
        [u_min, v_max],
    ];
    if side.is_cap() {
        uvs.rotate_left(rotation.quarter_turns());
    }
    uvs
}
