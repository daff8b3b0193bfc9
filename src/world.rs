//! # Voxel World
//!
//! The editing facade. `VoxelWorld` owns the chunk store and the per-chunk mesh
//! table, and keeps the two in step: every voxel write reports the chunks it made
//! stale, and those chunks are rebuilt either immediately or when the open batch
//! ends.
//!
//! ## Flow of an edit
//! 1. [`VoxelWorld::place_block`] writes through the [`ChunkStore`]
//! 2. The dirty chunk keys are rebuilt now, or collected by the [`BatchController`]
//! 3. Each rebuild replaces the chunk's [`ChunkMesh`] and informs the [`MeshSink`]
//! 4. Listeners are notified once per edit, or once per batch
//!
//! ## Shared collaborators
//! The block registry and texture provider are held through [`StResource`]
//! handles, so the application can register custom blocks or feed in textures
//! while the world holds them.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info};

use crate::{
    config::WorldConfig,
    core::StResource,
    editing::{BatchController, BlockChange, BlockWriter, ChangeNotifier, ChangeSet, SubscriptionToken},
    rendering::{
        meshing::{
            mesh::{build_chunk_mesh, ChunkMesh},
            MeshSink,
        },
        texture::TextureProvider,
    },
    voxels::{
        block::{registry::BlockRegistry, BlockId, Rotation, AIR},
        chunk_store::ChunkStore,
        coords::ChunkKey,
    },
};

/// A shared, swappable texture provider.
pub type SharedTextures = StResource<Box<dyn TextureProvider>>;

/// A non-air voxel together with its world position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacedBlock {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub id: BlockId,
    pub rotation: Rotation,
}

/// The sculptable block world.
pub struct VoxelWorld {
    store: ChunkStore,
    registry: StResource<BlockRegistry>,
    textures: SharedTextures,

    /// Latest geometry per chunk. Chunks without geometry have no entry.
    meshes: HashMap<ChunkKey, ChunkMesh>,
    mesh_sink: Option<Box<dyn MeshSink>>,
    mesh_rebuilds: usize,

    batch: BatchController,
    notifier: ChangeNotifier<ChunkStore>,

    layer_limit: i32,
    layer_limit_enabled: bool,
}

impl VoxelWorld {
    /// Creates an empty world with default settings.
    pub fn new(registry: StResource<BlockRegistry>, textures: SharedTextures) -> Self {
        Self::with_config(&WorldConfig::default(), registry, textures)
    }

    /// Creates an empty world using the layer limit from `config`.
    pub fn with_config(
        config: &WorldConfig,
        registry: StResource<BlockRegistry>,
        textures: SharedTextures,
    ) -> Self {
        VoxelWorld {
            store: ChunkStore::new(),
            registry,
            textures,
            meshes: HashMap::new(),
            mesh_sink: None,
            mesh_rebuilds: 0,
            batch: BatchController::new(),
            notifier: ChangeNotifier::new(),
            layer_limit: config.layer_limit,
            layer_limit_enabled: config.layer_limit_enabled,
        }
    }

    // --- Editing ---

    /// Places a block.
    ///
    /// # Returns
    /// The recorded change, or `None` if the voxel already held `(id, rotation)`.
    /// A `None` edit rebuilds nothing and notifies nobody.
    pub fn place_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        id: BlockId,
        rotation: Rotation,
    ) -> Option<BlockChange> {
        let write = self.store.set_block(x, y, z, id, rotation)?;

        if self.batch.is_batching() {
            self.batch.mark(write.dirty);
        } else {
            for key in write.dirty {
                self.rebuild_chunk(key);
            }
            self.notify();
        }

        Some(BlockChange {
            x,
            y,
            z,
            prev_id: write.previous.id,
            prev_rotation: write.previous.rotation,
            new_id: id,
            new_rotation: rotation,
        })
    }

    /// Replaces a block with air.
    pub fn remove_block(&mut self, x: i32, y: i32, z: i32) -> Option<BlockChange> {
        self.place_block(x, y, z, AIR, Rotation::R0)
    }

    /// Fills the inclusive box between two corners.
    ///
    /// The fill runs inside one batch (or joins the one already open) and visits
    /// x, then y, then z from the low corner outwards.
    ///
    /// # Returns
    /// The voxels that actually changed, in write order.
    pub fn fill_region(
        &mut self,
        a: Point3<i32>,
        b: Point3<i32>,
        id: BlockId,
        rotation: Rotation,
    ) -> ChangeSet {
        let (min, max) = (
            Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        );

        let owns_batch = !self.batch.is_batching();
        if owns_batch {
            self.begin_batch();
        }

        let mut changes = ChangeSet::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    changes.extend(self.place_block(x, y, z, id, rotation));
                }
            }
        }

        if owns_batch {
            self.end_batch();
        }
        changes
    }

    /// Starts collecting rebuilds. See [`BatchController::begin`] for nesting.
    pub fn begin_batch(&mut self) {
        self.batch.begin();
    }

    /// Rebuilds every chunk dirtied since [`VoxelWorld::begin_batch`], once each,
    /// then notifies listeners once. Does nothing if no batch is open.
    pub fn end_batch(&mut self) {
        let Some(keys) = self.batch.end() else {
            return;
        };
        debug!("batch dirtied {} chunks", keys.len());
        for key in keys {
            self.rebuild_chunk(key);
        }
        self.notify();
    }

    /// Returns `true` while a batch is open.
    pub fn is_batching(&self) -> bool {
        self.batch.is_batching()
    }

    /// Drops every voxel and mesh, then notifies listeners.
    pub fn clear(&mut self) {
        self.store.clear();
        let mut keys: Vec<ChunkKey> = self.meshes.drain().map(|(key, _)| key).collect();
        keys.sort_by_key(|key| (key.x, key.y, key.z));
        for key in keys {
            if let Some(sink) = self.mesh_sink.as_mut() {
                sink.release(key);
            }
        }
        info!("world cleared");
        self.notify();
    }

    // --- Queries ---

    /// Block id at a world position, air if nothing was placed there.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.store.get_block(x, y, z)
    }

    /// Rotation at a world position.
    pub fn get_block_rotation(&self, x: i32, y: i32, z: i32) -> Rotation {
        self.store.get_rotation(x, y, z)
    }

    /// Every non-air voxel. Order is unspecified.
    pub fn get_all_blocks(&self) -> Vec<PlacedBlock> {
        self.store
            .voxels()
            .map(|(position, voxel)| PlacedBlock {
                x: position.x,
                y: position.y,
                z: position.z,
                id: voxel.id,
                rotation: voxel.rotation,
            })
            .collect()
    }

    /// Every voxel whose block is an entity, for the entity renderer.
    pub fn get_entity_instances(&self) -> Vec<PlacedBlock> {
        let registry = self.registry.get();
        let mut instances = self.get_all_blocks();
        instances.retain(|block| registry.is_entity(block.id));
        instances
    }

    /// Highest world y holding a block, or 0 for an empty world.
    pub fn get_max_layer(&self) -> i32 {
        self.store.max_non_empty_layer().unwrap_or(0)
    }

    /// Number of voxels per non-air block id.
    pub fn get_block_counts(&self) -> &HashMap<BlockId, u32> {
        self.store.block_counts()
    }

    // --- Listeners ---

    /// Registers a listener called after every edit or batch, and on clear.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: FnMut(&ChunkStore) + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if the token was unknown.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.notifier.unsubscribe(token)
    }

    fn notify(&mut self) {
        self.notifier.notify(&self.store);
    }

    // --- Meshing ---

    /// Sets the visible layer ceiling and rebuilds every chunk if it changed.
    pub fn set_layer_limit(&mut self, limit: i32, enabled: bool) {
        if self.layer_limit == limit && self.layer_limit_enabled == enabled {
            return;
        }
        self.layer_limit = limit;
        self.layer_limit_enabled = enabled;
        info!("layer limit set to {limit} (enabled: {enabled})");
        self.update_all_chunks();
    }

    /// The current layer limit and whether it is enforced.
    pub fn layer_limit(&self) -> (i32, bool) {
        (self.layer_limit, self.layer_limit_enabled)
    }

    /// Rebuilds every existing chunk, e.g. after textures finished loading.
    pub fn update_all_chunks(&mut self) {
        let mut keys: Vec<ChunkKey> = self.store.chunk_keys().collect();
        keys.sort_by_key(|key| (key.x, key.y, key.z));
        for key in keys {
            self.rebuild_chunk(key);
        }
    }

    fn rebuild_chunk(&mut self, key: ChunkKey) {
        // Neighbor keys of border edits may name chunks nobody created.
        if !self.store.contains_chunk(key) {
            return;
        }
        let ceiling = self.layer_limit_enabled.then_some(self.layer_limit);
        let mesh = {
            let registry = self.registry.get();
            let textures = self.textures.get();
            build_chunk_mesh(&self.store, key, &registry, &**textures, ceiling)
        };
        self.mesh_rebuilds += 1;

        match mesh {
            Some(mesh) => {
                debug!("rebuilt chunk {key:?}: {} faces", mesh.face_count());
                if let Some(sink) = self.mesh_sink.as_mut() {
                    sink.upload(key, &mesh);
                }
                self.meshes.insert(key, mesh);
            }
            None => {
                if self.meshes.remove(&key).is_some() {
                    debug!("chunk {key:?} has no geometry left");
                    if let Some(sink) = self.mesh_sink.as_mut() {
                        sink.release(key);
                    }
                }
            }
        }
    }

    /// Installs the receiver of mesh uploads and releases.
    ///
    /// The new sink immediately receives every mesh the world currently holds.
    pub fn set_mesh_sink(&mut self, mut sink: Box<dyn MeshSink>) {
        for (key, mesh) in self.meshes.iter() {
            sink.upload(*key, mesh);
        }
        self.mesh_sink = Some(sink);
    }

    /// The current mesh of a chunk, if it has geometry.
    pub fn mesh(&self, key: ChunkKey) -> Option<&ChunkMesh> {
        self.meshes.get(&key)
    }

    /// All current chunk meshes.
    pub fn meshes(&self) -> impl Iterator<Item = &ChunkMesh> {
        self.meshes.values()
    }

    /// Total number of faces across all chunk meshes.
    pub fn face_count(&self) -> usize {
        self.meshes.values().map(ChunkMesh::face_count).sum()
    }

    /// Number of chunk rebuilds performed since the world was created.
    pub fn mesh_rebuilds(&self) -> usize {
        self.mesh_rebuilds
    }

    // --- Collaborators ---

    /// Read access to voxel truth.
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// The shared block registry.
    pub fn registry(&self) -> &StResource<BlockRegistry> {
        &self.registry
    }

    /// The shared texture provider.
    pub fn textures(&self) -> &SharedTextures {
        &self.textures
    }
}

impl BlockWriter for VoxelWorld {
    fn begin_batch(&mut self) {
        VoxelWorld::begin_batch(self);
    }

    fn end_batch(&mut self) {
        VoxelWorld::end_batch(self);
    }

    fn is_batching(&self) -> bool {
        VoxelWorld::is_batching(self)
    }

    fn write_block(&mut self, x: i32, y: i32, z: i32, id: BlockId, rotation: Rotation) {
        self.place_block(x, y, z, id, rotation);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::rendering::texture::AtlasLayout;

    use super::*;

    fn world() -> VoxelWorld {
        let textures: Box<dyn TextureProvider> = Box::new(AtlasLayout::default());
        VoxelWorld::new(
            StResource::new(BlockRegistry::with_defaults()),
            StResource::new(textures),
        )
    }

    fn notifications(world: &mut VoxelWorld) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        world.subscribe(move |_| sink.set(sink.get() + 1));
        count
    }

    #[test]
    fn place_reports_the_previous_voxel() {
        let mut world = world();
        world.place_block(1, 2, 3, 6, Rotation::R0);
        let change = world.place_block(1, 2, 3, 7, Rotation::R90).unwrap();

        assert_eq!(change.prev_id, 6);
        assert_eq!(change.new_id, 7);
        assert_eq!(change.new_rotation, Rotation::R90);
        assert_eq!(world.get_block_rotation(1, 2, 3), Rotation::R90);
    }

    #[test]
    fn no_op_edits_are_silent() {
        let mut world = world();
        let notified = notifications(&mut world);
        world.place_block(0, 0, 0, 6, Rotation::R0);
        let rebuilds = world.mesh_rebuilds();

        assert_eq!(world.place_block(0, 0, 0, 6, Rotation::R0), None);
        assert_eq!(world.remove_block(9, 9, 9), None);
        assert_eq!(world.mesh_rebuilds(), rebuilds);
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn absent_neighbors_are_not_counted_as_rebuilds() {
        let mut world = world();
        // A chunk corner dirties three neighbor keys that have no chunk.
        world.place_block(0, 0, 0, 6, Rotation::R0);
        assert_eq!(world.mesh_rebuilds(), 1);

        world.place_block(-1, 0, 0, 6, Rotation::R0);
        assert_eq!(world.mesh_rebuilds(), 3);
    }

    #[test]
    fn immediate_edits_rebuild_and_notify() {
        let mut world = world();
        let notified = notifications(&mut world);

        world.place_block(0, 0, 0, 6, Rotation::R0);
        assert_eq!(notified.get(), 1);
        assert_eq!(world.face_count(), 6);

        world.remove_block(0, 0, 0);
        assert_eq!(notified.get(), 2);
        assert!(world.mesh(Point3::new(0, 0, 0)).is_none());
    }

    #[test]
    fn batches_notify_once() {
        let mut world = world();
        let notified = notifications(&mut world);

        let changes = world.fill_region(Point3::new(0, 0, 0), Point3::new(3, 3, 3), 6, Rotation::R0);
        assert_eq!(changes.len(), 64);
        assert_eq!(notified.get(), 1);
        // Only the outer shell of the 4x4x4 cube is visible.
        assert_eq!(world.face_count(), 6 * 16);
    }

    #[test]
    fn fill_region_orders_writes_and_skips_unchanged() {
        let mut world = world();
        world.place_block(0, 0, 1, 6, Rotation::R0);

        let changes = world.fill_region(Point3::new(1, 1, 1), Point3::new(0, 0, 0), 6, Rotation::R0);
        let order: Vec<_> = changes.iter().map(|c| (c.x, c.y, c.z)).collect();
        assert_eq!(
            order,
            vec![(0, 0, 0), (0, 1, 0), (0, 1, 1), (1, 0, 0), (1, 0, 1), (1, 1, 0), (1, 1, 1)]
        );
    }

    #[test]
    fn fill_region_joins_an_open_batch() {
        let mut world = world();
        let notified = notifications(&mut world);

        world.begin_batch();
        world.fill_region(Point3::new(0, 0, 0), Point3::new(1, 0, 0), 6, Rotation::R0);
        assert!(world.is_batching());
        world.place_block(5, 0, 0, 6, Rotation::R0);
        world.end_batch();

        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn entity_instances_are_listed_but_not_meshed() {
        let mut world = world();
        let pig = world.registry().get().find_by_name("Pig").unwrap().id;

        world.place_block(4, 0, 4, pig, Rotation::R180);
        world.place_block(0, 0, 0, 6, Rotation::R0);

        let entities = world.get_entity_instances();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].rotation, Rotation::R180);
        assert_eq!(world.face_count(), 6);
        assert_eq!(world.get_all_blocks().len(), 2);
    }

    #[test]
    fn layer_limit_rebuilds_only_on_change() {
        let mut world = world();
        world.place_block(0, 0, 0, 6, Rotation::R0);
        world.place_block(0, 1, 0, 6, Rotation::R0);
        assert_eq!(world.face_count(), 10);

        world.set_layer_limit(0, true);
        assert_eq!(world.face_count(), 6);
        let rebuilds = world.mesh_rebuilds();

        world.set_layer_limit(0, true);
        assert_eq!(world.mesh_rebuilds(), rebuilds);

        world.set_layer_limit(0, false);
        assert_eq!(world.face_count(), 10);
    }

    #[test]
    fn max_layer_defaults_to_zero() {
        let mut world = world();
        assert_eq!(world.get_max_layer(), 0);
        world.place_block(0, -7, 0, 6, Rotation::R0);
        assert_eq!(world.get_max_layer(), -7);
    }

    #[test]
    fn clear_notifies_and_drops_meshes() {
        let mut world = world();
        world.place_block(0, 0, 0, 6, Rotation::R0);
        let notified = notifications(&mut world);

        world.clear();
        assert_eq!(notified.get(), 1);
        assert_eq!(world.meshes().count(), 0);
        assert!(world.get_block_counts().is_empty());
    }
}
