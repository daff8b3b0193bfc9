//! # Project Files
//!
//! Saving and loading sculptures as JSON, and exporting a materials list.
//!
//! ## Format
//! ```json
//! {
//!   "name": "Castle",
//!   "version": 1,
//!   "created": "2024-05-01T12:00:00.000Z",
//!   "blocks": [{ "x": 0, "y": 0, "z": 0, "id": 6, "rotation": 1 }]
//! }
//! ```
//! `rotation` may be omitted and defaults to 0. Loading validates the whole file
//! before touching the world, so a malformed file leaves the world as it was.

use std::{collections::HashMap, fmt::Write as _, fs, io, path::Path};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{
    voxels::block::{registry::BlockRegistry, BlockId, Rotation},
    world::VoxelWorld,
};

/// Format version written by [`ProjectData::capture`].
pub const PROJECT_VERSION: u32 = 1;

/// Voxels per stack in the materials list.
pub const STACK_SIZE: u32 = 64;

/// 9999-12-31T23:59:59Z, the last second an RFC 3339 timestamp can hold.
const LATEST_TIMESTAMP_SECS: u64 = 253_402_300_799;

/// Errors raised while reading or writing project files.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("project file has no `blocks` array")]
    MissingBlocks,
    #[error("project file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// One saved voxel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBlock {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub id: BlockId,
    #[serde(default)]
    pub rotation: u32,
}

/// A saved sculpture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub name: String,
    pub version: u32,
    pub created: String,
    pub blocks: Vec<ProjectBlock>,
}

impl ProjectData {
    /// Snapshots every non-air voxel of `world`.
    ///
    /// Blocks are sorted bottom layer first so saved files diff cleanly.
    pub fn capture(world: &VoxelWorld, name: &str) -> Self {
        let mut blocks: Vec<ProjectBlock> = world
            .get_all_blocks()
            .into_iter()
            .map(|block| ProjectBlock {
                x: block.x,
                y: block.y,
                z: block.z,
                id: block.id,
                rotation: u32::from(block.rotation.bits()),
            })
            .collect();
        blocks.sort_by_key(|block| (block.y, block.z, block.x));

        ProjectData {
            name: name.to_owned(),
            version: PROJECT_VERSION,
            created: iso8601(SystemTime::now()),
            blocks,
        }
    }

    /// Serializes the project.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a project, checking its shape first.
    ///
    /// # Errors
    /// [`ProjectError::MissingBlocks`] if `blocks` is absent or not an array,
    /// [`ProjectError::Json`] for anything else that does not parse.
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.get("blocks").is_some_and(serde_json::Value::is_array) {
            return Err(ProjectError::MissingBlocks);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces the contents of `world` with this project.
    ///
    /// The world is cleared, then every block is placed inside one batch.
    pub fn apply(&self, world: &mut VoxelWorld) {
        world.clear();
        world.begin_batch();
        for block in &self.blocks {
            let rotation = Rotation::from_bits((block.rotation & 0x03) as u8);
            world.place_block(block.x, block.y, block.z, block.id, rotation);
        }
        world.end_batch();
        info!("loaded project `{}` with {} blocks", self.name, self.blocks.len());
    }

    /// Writes the project as JSON to `path`.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("saved project `{}` to {}", self.name, path.display());
        Ok(())
    }

    /// Reads and validates a project file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// File name a project is saved under: lower case, whitespace runs as `_`.
pub fn file_name_for(name: &str) -> String {
    let stem = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    format!("{stem}.json")
}

/// Builds the materials list for a set of block counts.
///
/// One row per known block id, sorted by id. Ids missing from the registry are
/// left out.
pub fn materials_csv(counts: &HashMap<BlockId, u32>, registry: &BlockRegistry) -> String {
    let mut ids: Vec<&BlockId> = counts.keys().collect();
    ids.sort();

    let mut csv = String::from("Block Name,Count,Stacks\n");
    for id in ids {
        let Some(def) = registry.get(*id) else {
            continue;
        };
        let count = counts[id];
        let stacks = count as f64 / STACK_SIZE as f64;
        // Writing into a String cannot fail.
        let _ = writeln!(csv, "\"{}\",{count},{stacks:.2}", def.name);
    }
    csv
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
///
/// Times outside 1970 to 9999 are clamped to that range.
pub fn iso8601(time: SystemTime) -> String {
    let latest = UNIX_EPOCH + Duration::from_secs(LATEST_TIMESTAMP_SECS);
    humantime::format_rfc3339_millis(time.clamp(UNIX_EPOCH, latest)).to_string()
}
