//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use voxel_sculpt::{
    core::StResource,
    rendering::{
        meshing::{mesh::ChunkMesh, MeshSink},
        texture::{AtlasLayout, TextureProvider},
    },
    voxels::{
        block::{registry::BlockRegistry, BlockId},
        coords::ChunkKey,
    },
    PlacedBlock, VoxelWorld,
};

pub const STONE: BlockId = 6;
pub const GLASS: BlockId = 13;

/// A world with the built-in registry and every built-in texture in the atlas.
pub fn world() -> VoxelWorld {
    let registry = BlockRegistry::with_defaults();
    let mut atlas = AtlasLayout::default();
    for def in registry.iter() {
        for name in def.textures.names() {
            atlas.allocate(name);
        }
    }

    let textures: Box<dyn TextureProvider> = Box::new(atlas);
    VoxelWorld::new(StResource::new(registry), StResource::new(textures))
}

/// Every block in the world, in a stable order.
pub fn snapshot(world: &VoxelWorld) -> Vec<PlacedBlock> {
    let mut blocks = world.get_all_blocks();
    blocks.sort_by_key(|block| (block.x, block.y, block.z));
    blocks
}

/// Block counts recomputed from a full scan.
pub fn scanned_counts(world: &VoxelWorld) -> HashMap<BlockId, u32> {
    let mut counts = HashMap::new();
    world
        .store()
        .for_each_voxel(|_, voxel| *counts.entry(voxel.id).or_insert(0) += 1);
    counts
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Upload(ChunkKey, usize),
    Release(ChunkKey),
}

/// A mesh sink that records every call, readable through the shared handle.
pub struct RecordingSink {
    pub events: StResource<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn install(world: &mut VoxelWorld) -> StResource<Vec<SinkEvent>> {
        let events = StResource::new(Vec::new());
        world.set_mesh_sink(Box::new(RecordingSink {
            events: events.clone(),
        }));
        events
    }
}

impl MeshSink for RecordingSink {
    fn upload(&mut self, key: ChunkKey, mesh: &ChunkMesh) {
        self.events
            .get_mut()
            .push(SinkEvent::Upload(key, mesh.face_count()));
    }

    fn release(&mut self, key: ChunkKey) {
        self.events.get_mut().push(SinkEvent::Release(key));
    }
}
