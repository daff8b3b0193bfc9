//! # Block Side Module
//!
//! The six physical faces of a voxel and the rotation rules that decide which
//! texture each of them shows.
//!
//! Physical sides are fixed in world space (east is +X, south is +Z). Texture slots
//! (front, back, left, right) are relative to the block, so a rotated block maps its
//! slots onto different physical sides.

use cgmath::{Point3, Vector3};

use super::Rotation;

/// One of the six axis-aligned faces of a voxel, in world space.
///
/// The discriminants give the order in which the mesh builder visits faces.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing towards +X
    EAST = 0,

    /// The face pointing towards -X
    WEST = 1,

    /// The face pointing towards +Y
    TOP = 2,

    /// The face pointing towards -Y
    BOTTOM = 3,

    /// The face pointing towards +Z
    SOUTH = 4,

    /// The face pointing towards -Z
    NORTH = 5,
}

/// A texture role on a block definition, independent of the block's rotation.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TextureSlot {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl BlockSide {
    /// All six sides in emission order: +X, -X, +Y, -Y, +Z, -Z.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::EAST,
            BlockSide::WEST,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::SOUTH,
            BlockSide::NORTH,
        ]
    }

    /// Offset from a voxel to the neighbor that shares this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::EAST => Vector3::new(1, 0, 0),
            BlockSide::WEST => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::SOUTH => Vector3::new(0, 0, 1),
            BlockSide::NORTH => Vector3::new(0, 0, -1),
        }
    }

    /// Position of the neighbor across this face, or `None` past the `i32` range.
    pub fn neighbor_of(self, position: Point3<i32>) -> Option<Point3<i32>> {
        let offset = self.offset();
        Some(Point3::new(
            position.x.checked_add(offset.x)?,
            position.y.checked_add(offset.y)?,
            position.z.checked_add(offset.z)?,
        ))
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// Returns `true` for the top and bottom faces.
    ///
    /// Caps keep their textures under rotation and rotate their UVs instead.
    pub fn is_cap(self) -> bool {
        matches!(self, BlockSide::TOP | BlockSide::BOTTOM)
    }

    /// Returns which texture slot this physical side shows for a block at `rotation`.
    ///
    /// At rotation 0 the front faces +Z, the back -Z, the right +X and the left -X.
    /// Each quarter turn moves the front one step: 90° faces -X, 180° faces -Z and
    /// 270° faces +X, with the other three slots following.
    pub fn texture_slot(self, rotation: Rotation) -> TextureSlot {
        use TextureSlot::*;

        // Horizontal slots indexed by [rotation][east, west, south, north].
        const HORIZONTAL: [[TextureSlot; 4]; 4] = [
            [Right, Left, Front, Back],
            [Back, Front, Right, Left],
            [Left, Right, Back, Front],
            [Front, Back, Left, Right],
        ];

        let column = match self {
            BlockSide::TOP => return Top,
            BlockSide::BOTTOM => return Bottom,
            BlockSide::EAST => 0,
            BlockSide::WEST => 1,
            BlockSide::SOUTH => 2,
            BlockSide::NORTH => 3,
        };
        HORIZONTAL[rotation.quarter_turns()][column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side_showing(slot: TextureSlot, rotation: Rotation) -> Vec<BlockSide> {
        BlockSide::all()
            .into_iter()
            .filter(|side| side.texture_slot(rotation) == slot)
            .collect()
    }

    #[test]
    fn front_follows_rotation() {
        assert_eq!(side_showing(TextureSlot::Front, Rotation::R0), vec![BlockSide::SOUTH]);
        assert_eq!(side_showing(TextureSlot::Front, Rotation::R90), vec![BlockSide::WEST]);
        assert_eq!(side_showing(TextureSlot::Front, Rotation::R180), vec![BlockSide::NORTH]);
        assert_eq!(side_showing(TextureSlot::Front, Rotation::R270), vec![BlockSide::EAST]);
    }

    #[test]
    fn quarter_turn_assignment_is_exact() {
        assert_eq!(BlockSide::WEST.texture_slot(Rotation::R90), TextureSlot::Front);
        assert_eq!(BlockSide::EAST.texture_slot(Rotation::R90), TextureSlot::Back);
        assert_eq!(BlockSide::SOUTH.texture_slot(Rotation::R90), TextureSlot::Right);
        assert_eq!(BlockSide::NORTH.texture_slot(Rotation::R90), TextureSlot::Left);

        assert_eq!(BlockSide::EAST.texture_slot(Rotation::R270), TextureSlot::Front);
        assert_eq!(BlockSide::WEST.texture_slot(Rotation::R270), TextureSlot::Back);
        assert_eq!(BlockSide::NORTH.texture_slot(Rotation::R270), TextureSlot::Right);
        assert_eq!(BlockSide::SOUTH.texture_slot(Rotation::R270), TextureSlot::Left);
    }

    #[test]
    fn every_rotation_uses_each_horizontal_slot_once() {
        for rotation in Rotation::ALL {
            for slot in [TextureSlot::Front, TextureSlot::Back, TextureSlot::Left, TextureSlot::Right] {
                assert_eq!(side_showing(slot, rotation).len(), 1, "{slot:?} at {rotation:?}");
            }
            assert_eq!(side_showing(TextureSlot::Top, rotation), vec![BlockSide::TOP]);
        }
    }

    #[test]
    fn normals_point_away_from_the_voxel() {
        for side in BlockSide::all() {
            let offset = side.offset();
            assert_eq!(offset.x.abs() + offset.y.abs() + offset.z.abs(), 1);
            assert_eq!(side.normal(), offset.cast::<f32>().unwrap());
        }
    }

    #[test]
    fn neighbors_stop_at_the_integer_range() {
        let corner = Point3::new(i32::MAX, i32::MIN, 0);
        assert_eq!(BlockSide::EAST.neighbor_of(corner), None);
        assert_eq!(BlockSide::BOTTOM.neighbor_of(corner), None);
        assert_eq!(BlockSide::WEST.neighbor_of(corner), Some(Point3::new(i32::MAX - 1, i32::MIN, 0)));
        assert_eq!(BlockSide::TOP.neighbor_of(corner), Some(Point3::new(i32::MAX, i32::MIN + 1, 0)));
    }
}
