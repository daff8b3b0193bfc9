//! # Block Registry Module
//!
//! The append-only table that maps block ids to [`BlockDef`]s.
//!
//! Id 0 always resolves to air. Built-in blocks take small sequential ids, custom
//! blocks registered at runtime start at [`FIRST_CUSTOM_ID`]. Inserting a definition
//! whose id is already taken is rejected with [`RegistryError::IdCollision`]; the
//! existing definition is never overwritten.

use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use super::{BlockDef, BlockId, AIR};

/// Lowest id handed out by [`BlockRegistry::next_custom_id`].
pub const FIRST_CUSTOM_ID: BlockId = 1000;

/// Errors raised when extending the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("block id {id} is already registered to `{existing}`, cannot register `{incoming}`")]
    IdCollision {
        id: BlockId,
        existing: String,
        incoming: String,
    },
    #[error("no block ids left after {0}")]
    IdsExhausted(BlockId),
}

/// Maps block ids to their definitions.
pub struct BlockRegistry {
    blocks: BTreeMap<BlockId, BlockDef>,
}

impl BlockRegistry {
    /// Creates a registry that only knows air.
    pub fn new() -> Self {
        let mut blocks = BTreeMap::new();
        blocks.insert(AIR, BlockDef::air());
        BlockRegistry { blocks }
    }

    /// Creates a registry holding air and the built-in block set.
    ///
    /// Built-in ids are assigned sequentially from 1 in the order listed here.
    pub fn with_defaults() -> Self {
        let mut registry = BlockRegistry::new();
        for def in builtin_blocks() {
            // Sequential ids on a fresh registry cannot collide.
            if let Err(err) = registry.insert(def) {
                debug!("skipping built-in block: {err}");
            }
        }
        registry
    }

    /// Looks up a block definition.
    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        self.blocks.get(&id)
    }

    /// Looks up a block definition by its display name.
    pub fn find_by_name(&self, name: &str) -> Option<&BlockDef> {
        self.blocks.values().find(|def| def.name == name)
    }

    /// Adds a definition under its own id.
    ///
    /// # Errors
    /// Returns [`RegistryError::IdCollision`] if the id is taken (including id 0).
    pub fn insert(&mut self, def: BlockDef) -> Result<(), RegistryError> {
        if let Some(existing) = self.blocks.get(&def.id) {
            return Err(RegistryError::IdCollision {
                id: def.id,
                existing: existing.name.clone(),
                incoming: def.name,
            });
        }
        debug!("registered block {} ({})", def.id, def.name);
        self.blocks.insert(def.id, def);
        Ok(())
    }

    /// Registers a custom block under the next free custom id and returns that id.
    ///
    /// The `id` field of `def` is overwritten.
    pub fn register_custom(&mut self, mut def: BlockDef) -> Result<BlockId, RegistryError> {
        def.id = self.next_custom_id()?;
        let id = def.id;
        self.insert(def)?;
        Ok(id)
    }

    /// Returns one past the highest custom id, or [`FIRST_CUSTOM_ID`] if there are none.
    pub fn next_custom_id(&self) -> Result<BlockId, RegistryError> {
        match self.blocks.range(FIRST_CUSTOM_ID..).next_back() {
            None => Ok(FIRST_CUSTOM_ID),
            Some((&max, _)) => max.checked_add(1).ok_or(RegistryError::IdsExhausted(max)),
        }
    }

    /// Returns `true` if a neighbor holding `id` lets the face behind it show.
    ///
    /// Air and blocks flagged transparent are see-through. Ids missing from the
    /// registry count as opaque.
    pub fn is_transparent(&self, id: BlockId) -> bool {
        id == AIR || self.get(id).is_some_and(|def| def.transparent)
    }

    /// Returns `true` if `id` is registered as an entity.
    pub fn is_entity(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(BlockDef::is_entity)
    }

    /// Iterates over all definitions in id order, air included.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDef> {
        self.blocks.values()
    }

    /// Number of registered definitions, air included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`: air is always registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in palette, ids assigned in order starting at 1.
fn builtin_blocks() -> Vec<BlockDef> {
    let mut next_id: BlockId = 1;
    let mut id = || {
        let current = next_id;
        next_id += 1;
        current
    };

    let mut blocks = vec![
        BlockDef::unique(id(), "Grass Block", "Nature", "Terrain", "grass_block_top", "grass_block_side", "dirt"),
        BlockDef::simple(id(), "Dirt", "Nature", "Terrain", "dirt"),
        BlockDef::simple(id(), "Sand", "Nature", "Terrain", "sand"),
        BlockDef::simple(id(), "Gravel", "Nature", "Terrain", "gravel"),
        BlockDef::simple(id(), "Ice", "Nature", "Terrain", "ice").with_transparency(),
        BlockDef::simple(id(), "Stone", "Building", "Stone", "stone"),
        BlockDef::simple(id(), "Cobblestone", "Building", "Stone", "cobblestone"),
        BlockDef::simple(id(), "Stone Bricks", "Building", "Stone", "stone_bricks"),
        BlockDef::pillar(id(), "Deepslate", "Building", "Stone", "deepslate", "deepslate_top"),
        BlockDef::simple(id(), "Oak Planks", "Building", "Wood", "oak_planks"),
        BlockDef::pillar(id(), "Oak Log", "Building", "Wood", "oak_log", "oak_log_top"),
        BlockDef::simple(id(), "Oak Leaves", "Nature", "Plants", "oak_leaves").with_transparency(),
        BlockDef::simple(id(), "Glass", "Building", "Glass", "glass").with_transparency(),
        BlockDef::simple(id(), "White Wool", "Decoration", "Colored", "white_wool"),
        BlockDef::unique(id(), "Crafting Table", "Utility", "General", "crafting_table_top", "crafting_table_side", "crafting_table_top"),
        BlockDef::unique(id(), "Furnace", "Utility", "General", "furnace_top", "furnace_side", "furnace_top")
            .with_directional("furnace_front", "furnace_side", "furnace_side", "furnace_side"),
        BlockDef::unique(id(), "Carved Pumpkin", "Nature", "Plants", "pumpkin_top", "pumpkin_side", "pumpkin_top")
            .with_directional("carved_pumpkin", "pumpkin_side", "pumpkin_side", "pumpkin_side"),
        BlockDef::unique(id(), "Observer", "Redstone", "Mech", "observer_top", "observer_side", "observer_top")
            .with_directional("observer_front", "observer_back", "observer_side", "observer_side"),
        BlockDef::unique(id(), "Bookshelf", "Decoration", "Furniture", "oak_planks", "bookshelf", "oak_planks"),
        BlockDef::unique(id(), "Tnt", "Redstone", "Explosive", "tnt_top", "tnt_side", "tnt_bottom"),
    ];

    for (name, category, path) in [
        ("Cow", "Passive", "cow/cow"),
        ("Pig", "Passive", "pig/pig"),
        ("Zombie", "Hostile", "zombie/zombie"),
        ("Creeper", "Hostile", "creeper/creeper"),
    ] {
        blocks.push(BlockDef::entity(id(), name, category, path));
    }

    blocks
}
