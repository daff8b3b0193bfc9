#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sculpt
//!
//! The core of a block-sculpting tool: a chunked voxel store, incremental
//! face-culled chunk meshing, batched rebuilds, change notification and
//! command-based undo/redo, plus JSON project files.
//!
//! ## Key Modules
//!
//! * `voxels` - Voxel values, block definitions, chunks and the chunk store
//! * `rendering` - Vertex layout, texture lookup and chunk meshing
//! * `editing` - Batching, change notification and undo/redo history
//! * `world` - The `VoxelWorld` facade tying the above together
//! * `project` - Project save/load and the materials list
//! * `config` - Session settings
//! * `core` - Shared single-threaded resource handles
//!
//! ## Architecture
//!
//! The crate is single-threaded and synchronous. Rendering, windowing and file
//! dialogs live outside it and talk to it through three seams:
//! * [`rendering::texture::TextureProvider`] supplies atlas UVs
//! * [`rendering::meshing::MeshSink`] receives chunk meshes
//! * [`VoxelWorld::subscribe`] reports that the world changed
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sculpt::{
//!     core::StResource, rendering::texture::{AtlasLayout, TextureProvider},
//!     voxels::block::{registry::BlockRegistry, Rotation}, CommandHistory, VoxelWorld,
//! };
//!
//! let textures: Box<dyn TextureProvider> = Box::new(AtlasLayout::default());
//! let mut world = VoxelWorld::new(
//!     StResource::new(BlockRegistry::with_defaults()),
//!     StResource::new(textures),
//! );
//! let mut history = CommandHistory::new();
//!
//! if let Some(change) = world.place_block(0, 0, 0, 6, Rotation::R0) {
//!     history.push(vec![change]);
//! }
//! history.undo(&mut world);
//! assert_eq!(world.get_block(0, 0, 0), 0);
//! ```

use std::{env, path::Path};

use cgmath::Point3;
use log::info;

pub mod config;
pub mod core;
pub mod editing;
pub mod error;
pub mod project;
pub mod rendering;
pub mod voxels;
pub mod world;

pub use config::WorldConfig;
pub use editing::{BlockChange, ChangeSet, CommandHistory};
pub use error::SculptError;
pub use project::ProjectData;
pub use world::{PlacedBlock, VoxelWorld};

use crate::{
    core::StResource,
    rendering::texture::{AtlasLayout, TextureProvider},
    voxels::block::{registry::BlockRegistry, Rotation},
};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_SCULPT_CONFIG";

/// Runs the command-line front end.
///
/// `voxel-sculpt [PROJECT.json] [OUTPUT_DIR]`
///
/// Loads the project, or builds a small demo scene when none is given, meshes
/// every chunk and logs statistics. With an output directory the project and
/// its materials list are written back out.
pub fn run() -> Result<(), SculptError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match env::var(CONFIG_ENV_VAR) {
        Ok(path) => WorldConfig::from_path(path)?,
        Err(_) => WorldConfig::default(),
    };

    let registry = BlockRegistry::with_defaults();
    let mut atlas = AtlasLayout::from_config(&config);
    for def in registry.iter() {
        for name in def.textures.names() {
            atlas.allocate(name);
        }
    }
    info!("{} blocks registered, {} atlas tiles", registry.len(), atlas.len());

    let textures: Box<dyn TextureProvider> = Box::new(atlas);
    let mut world = VoxelWorld::with_config(&config, StResource::new(registry), StResource::new(textures));
    let mut history = CommandHistory::with_capacity(config.history_capacity);

    let mut args = env::args().skip(1);
    let name = match args.next() {
        Some(path) => {
            let project = ProjectData::load_from_path(&path)?;
            project.apply(&mut world);
            project.name
        }
        None => {
            build_demo_scene(&mut world, &mut history);
            "Demo".to_owned()
        }
    };

    log_statistics(&world, &history);

    if let Some(output_dir) = args.next() {
        let output_dir = Path::new(&output_dir);
        let project = ProjectData::capture(&world, &name);
        project.save_to_path(output_dir.join(project::file_name_for(&name)))?;

        let csv = project::materials_csv(world.get_block_counts(), &world.registry().get());
        std::fs::write(output_dir.join("materials.csv"), csv).map_err(project::ProjectError::from)?;
        info!("wrote materials list to {}", output_dir.display());
    }

    Ok(())
}

/// A stone platform with a furnace on it, recorded as undoable edits.
fn build_demo_scene(world: &mut VoxelWorld, history: &mut CommandHistory) {
    let find = |world: &VoxelWorld, name: &str| world.registry().get().find_by_name(name).map(|def| def.id);
    let (Some(stone), Some(furnace)) = (find(world, "Stone"), find(world, "Furnace")) else {
        return;
    };

    history.push(world.fill_region(Point3::new(-8, 0, -8), Point3::new(7, 0, 7), stone, Rotation::R0));
    history.push(world.place_block(0, 1, 0, furnace, Rotation::R90).into_iter().collect());
    history.push(world.fill_region(Point3::new(3, 1, 3), Point3::new(4, 2, 4), stone, Rotation::R0));

    // Exercise the history once so the log shows it round-tripping.
    history.undo(world);
    history.redo(world);
}

fn log_statistics(world: &VoxelWorld, history: &CommandHistory) {
    info!(
        "{} chunks, {} meshed faces, {} rebuilds, max layer {}",
        world.store().chunk_count(),
        world.face_count(),
        world.mesh_rebuilds(),
        world.get_max_layer()
    );
    info!(
        "{} entities, {} undo / {} redo steps",
        world.get_entity_instances().len(),
        history.undo_len(),
        history.redo_len()
    );

    let mut counts: Vec<_> = world.get_block_counts().iter().collect();
    counts.sort();
    let registry = world.registry().get();
    for (id, count) in counts {
        let name = registry.get(*id).map_or("unknown", |def| def.name.as_str());
        info!("  {name}: {count}");
    }
}
