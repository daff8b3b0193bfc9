//! # Block Module
//!
//! Voxel values and the block definitions they refer to.
//!
//! A voxel is just a `(block id, rotation)` pair. Everything else about a block
//! (its name, textures, transparency) lives in a [`BlockDef`] looked up through the
//! [`registry::BlockRegistry`], so the chunk arrays stay small.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::rendering::texture::TextureUv;

use block_side::{BlockSide, TextureSlot};

pub mod block_side;
pub mod registry;

/// The integer type used for block ids in chunk storage.
pub type BlockId = u16;

/// Block id reserved for empty space.
pub const AIR: BlockId = 0;

/// Group name that marks a block as an entity.
///
/// Entity voxels are stored like any other voxel but are rendered by an external
/// collaborator, so the mesh builder skips them.
pub const ENTITY_GROUP: &str = "Entities";

/// Yaw of a voxel in quarter turns.
///
/// Only blocks with direction-dependent faces look different under rotation,
/// but every voxel carries one.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Rotation {
    /// 0°
    #[default]
    R0 = 0,
    /// 90°
    R90 = 1,
    /// 180°
    R180 = 2,
    /// 270°
    R270 = 3,
}

impl Rotation {
    /// All rotations in ascending order.
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Converts raw rotation bits into a rotation.
    ///
    /// Only the low two bits are meaningful; higher bits are ignored, matching how
    /// the rotation is packed alongside other metadata.
    pub fn from_bits(bits: u8) -> Self {
        num::FromPrimitive::from_u8(bits & 0x03).unwrap_or_default()
    }

    /// The rotation as a number of quarter turns (`0..4`).
    pub fn quarter_turns(self) -> usize {
        self as usize
    }

    /// The rotation as its raw two-bit value.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// A single cell of the voxel grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// The block occupying the cell, [`AIR`] when empty.
    pub id: BlockId,
    /// The yaw of the block.
    pub rotation: Rotation,
}

impl Voxel {
    /// An empty cell.
    pub const EMPTY: Voxel = Voxel {
        id: AIR,
        rotation: Rotation::R0,
    };

    /// Creates a voxel holding `id` at `rotation`.
    pub fn new(id: BlockId, rotation: Rotation) -> Self {
        Voxel { id, rotation }
    }

    /// Returns `true` if the cell is empty.
    pub fn is_air(&self) -> bool {
        self.id == AIR
    }
}

/// Texture names for the faces of a block.
///
/// `top`, `side` and `bottom` are always present. The four directional names are
/// optional and fall back to `side`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTextures {
    pub top: String,
    pub side: String,
    pub bottom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl BlockTextures {
    /// Same texture on every face.
    pub fn uniform(name: &str) -> Self {
        BlockTextures {
            top: name.to_owned(),
            side: name.to_owned(),
            bottom: name.to_owned(),
            ..Default::default()
        }
    }

    /// Distinct top, side and bottom textures.
    pub fn capped(top: &str, side: &str, bottom: &str) -> Self {
        BlockTextures {
            top: top.to_owned(),
            side: side.to_owned(),
            bottom: bottom.to_owned(),
            ..Default::default()
        }
    }

    /// Every texture name the block refers to, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.top, &self.side, &self.bottom]
            .into_iter()
            .map(String::as_str)
            .chain(
                [&self.front, &self.back, &self.left, &self.right]
                    .into_iter()
                    .filter_map(|name| name.as_deref()),
            )
    }

    /// Returns the texture name for a slot, applying the `side` fallback.
    pub fn for_slot(&self, slot: TextureSlot) -> &str {
        let directional = match slot {
            TextureSlot::Top => return &self.top,
            TextureSlot::Bottom => return &self.bottom,
            TextureSlot::Front => &self.front,
            TextureSlot::Back => &self.back,
            TextureSlot::Left => &self.left,
            TextureSlot::Right => &self.right,
        };
        directional.as_deref().unwrap_or(&self.side)
    }
}

/// Explicit UV rectangles for individual physical faces.
///
/// A face with an override bypasses texture lookup entirely. Faces are named by
/// compass direction: north is -Z, south is +Z, east is +X, west is -X.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceUvOverrides {
    #[serde(default)]
    pub north: Option<TextureUv>,
    #[serde(default)]
    pub south: Option<TextureUv>,
    #[serde(default)]
    pub east: Option<TextureUv>,
    #[serde(default)]
    pub west: Option<TextureUv>,
    #[serde(default)]
    pub up: Option<TextureUv>,
    #[serde(default)]
    pub down: Option<TextureUv>,
}

impl FaceUvOverrides {
    /// Returns the override for a physical side, if any.
    pub fn get(&self, side: BlockSide) -> Option<TextureUv> {
        match side {
            BlockSide::NORTH => self.north,
            BlockSide::SOUTH => self.south,
            BlockSide::EAST => self.east,
            BlockSide::WEST => self.west,
            BlockSide::TOP => self.up,
            BlockSide::BOTTOM => self.down,
        }
    }
}

/// Everything the core knows about a block id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub category: String,
    pub textures: BlockTextures,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_uvs: Option<FaceUvOverrides>,
}

impl BlockDef {
    /// The definition every registry holds for id 0.
    pub fn air() -> Self {
        BlockDef {
            id: AIR,
            name: "Air".to_owned(),
            group: "System".to_owned(),
            category: "System".to_owned(),
            textures: BlockTextures::default(),
            transparent: true,
            face_uvs: None,
        }
    }

    /// A block with one texture on every face.
    pub fn simple(id: BlockId, name: &str, group: &str, category: &str, texture: &str) -> Self {
        BlockDef {
            id,
            name: name.to_owned(),
            group: group.to_owned(),
            category: category.to_owned(),
            textures: BlockTextures::uniform(texture),
            transparent: false,
            face_uvs: None,
        }
    }

    /// A log-like block: one texture on the sides, another on both caps.
    pub fn pillar(id: BlockId, name: &str, group: &str, category: &str, side: &str, cap: &str) -> Self {
        BlockDef {
            textures: BlockTextures::capped(cap, side, cap),
            ..BlockDef::simple(id, name, group, category, side)
        }
    }

    /// A block with distinct top, side and bottom textures.
    pub fn unique(
        id: BlockId,
        name: &str,
        group: &str,
        category: &str,
        top: &str,
        side: &str,
        bottom: &str,
    ) -> Self {
        BlockDef {
            textures: BlockTextures::capped(top, side, bottom),
            ..BlockDef::simple(id, name, group, category, side)
        }
    }

    /// An entity placeholder, rendered by the entity collaborator as a banner.
    ///
    /// `path` is carried in the `side` texture as the model path payload.
    pub fn entity(id: BlockId, name: &str, category: &str, path: &str) -> Self {
        let front = format!("{name}_banner_front");
        BlockDef {
            id,
            name: name.to_owned(),
            group: ENTITY_GROUP.to_owned(),
            category: category.to_owned(),
            textures: BlockTextures {
                top: format!("{name}_banner_top"),
                side: path.to_owned(),
                bottom: format!("{name}_banner_bottom"),
                front: Some(front.clone()),
                back: Some(format!("{name}_banner_back")),
                left: Some(front.clone()),
                right: Some(front),
            },
            transparent: true,
            face_uvs: None,
        }
    }

    /// Sets the directional side textures.
    pub fn with_directional(mut self, front: &str, back: &str, left: &str, right: &str) -> Self {
        self.textures.front = Some(front.to_owned());
        self.textures.back = Some(back.to_owned());
        self.textures.left = Some(left.to_owned());
        self.textures.right = Some(right.to_owned());
        self
    }

    /// Marks the block as transparent.
    pub fn with_transparency(mut self) -> Self {
        self.transparent = true;
        self
    }

    /// Attaches per-face UV overrides.
    pub fn with_face_uvs(mut self, face_uvs: FaceUvOverrides) -> Self {
        self.face_uvs = Some(face_uvs);
        self
    }

    /// Returns `true` if the block is rendered by the entity collaborator.
    pub fn is_entity(&self) -> bool {
        self.group == ENTITY_GROUP
    }
}
