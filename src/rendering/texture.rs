//! Texture lookup for mesh generation.
//!
//! The mesh builder never touches image data. It asks a [`TextureProvider`] for the
//! atlas rectangle of a texture name and writes those coordinates into vertices.
//! [`AtlasLayout`] is the provider used by the application and tests: it reproduces
//! the tile allocation of the atlas packer (fixed tiles, padding between them,
//! row-major fill) without owning pixels.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// Name of the placeholder texture every provider must resolve.
pub const MISSING_TEXTURE: &str = "MISSING";

/// Default atlas edge length in pixels.
pub const DEFAULT_ATLAS_SIZE: u32 = 2048;

/// A rectangle in normalized atlas space.
///
/// `v` grows upwards, so a tile drawn at pixel row `y` has
/// `v = 1 - (y + tile) / atlas`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureUv {
    pub u: f32,
    pub v: f32,
    pub u_size: f32,
    pub v_size: f32,
}

impl TextureUv {
    /// The whole atlas. Used only if a provider breaks the `MISSING` contract.
    pub const FULL: TextureUv = TextureUv {
        u: 0.0,
        v: 0.0,
        u_size: 1.0,
        v_size: 1.0,
    };
}

/// Callback invoked with the name of a texture that just became available.
pub type TextureReadyCallback = Box<dyn FnMut(&str)>;

/// Resolves texture names to atlas rectangles.
///
/// Lookups never block. A texture that has not finished loading simply resolves to
/// `None`; the renderer subscribes with [`TextureProvider::on_texture_ready`] and
/// asks the world to rebuild once it arrives.
pub trait TextureProvider {
    /// Returns the atlas rectangle for `name`, if it is known.
    fn get_uv(&self, name: &str) -> Option<TextureUv>;

    /// Edge length of the atlas in pixels, used to compute the half-texel inset.
    fn atlas_size(&self) -> f32 {
        DEFAULT_ATLAS_SIZE as f32
    }

    /// Registers a callback fired whenever a texture becomes available.
    fn on_texture_ready(&mut self, callback: TextureReadyCallback);
}

/// Looks up `name`, falling back to the [`MISSING_TEXTURE`] placeholder.
pub fn resolve_uv(textures: &dyn TextureProvider, name: &str) -> TextureUv {
    textures
        .get_uv(name)
        .or_else(|| textures.get_uv(MISSING_TEXTURE))
        .unwrap_or(TextureUv::FULL)
}

/// Tile allocator for a square texture atlas.
///
/// Tiles are placed left to right, top to bottom, each followed by `tile_padding`
/// pixels of gap. The first slot is reserved for the `MISSING` placeholder.
pub struct AtlasLayout {
    atlas_size: u32,
    tile_size: u32,
    tile_padding: u32,
    next_x: u32,
    next_y: u32,
    textures: HashMap<String, TextureUv>,
    ready_callbacks: Vec<TextureReadyCallback>,
}

impl AtlasLayout {
    /// Creates a layout with only the `MISSING` tile allocated.
    pub fn new(atlas_size: u32, tile_size: u32, tile_padding: u32) -> Self {
        let size = tile_size as f32 / atlas_size as f32;
        let mut textures = HashMap::new();
        textures.insert(
            MISSING_TEXTURE.to_owned(),
            TextureUv {
                u: 0.0,
                v: 1.0 - size,
                u_size: size,
                v_size: size,
            },
        );

        AtlasLayout {
            atlas_size,
            tile_size,
            tile_padding,
            next_x: tile_size + tile_padding,
            next_y: 0,
            textures,
            ready_callbacks: Vec::new(),
        }
    }

    /// Creates a layout from the atlas settings in `config`.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.atlas_size, config.tile_size, config.tile_padding)
    }

    /// Reserves a tile for `name` and returns its rectangle.
    ///
    /// Allocating a name twice returns the existing tile. Returns `None` when the
    /// atlas is full. Ready callbacks fire for every newly allocated tile.
    pub fn allocate(&mut self, name: &str) -> Option<TextureUv> {
        if let Some(uv) = self.textures.get(name) {
            return Some(*uv);
        }

        let step = self.tile_size + self.tile_padding;
        if self.next_x + step > self.atlas_size {
            self.next_x = 0;
            self.next_y += step;
        }
        if self.next_y + step > self.atlas_size {
            warn!("texture atlas full, cannot place `{name}`");
            return None;
        }

        let atlas = self.atlas_size as f32;
        let size = self.tile_size as f32 / atlas;
        let uv = TextureUv {
            u: self.next_x as f32 / atlas,
            v: 1.0 - (self.next_y + self.tile_size) as f32 / atlas,
            u_size: size,
            v_size: size,
        };
        self.textures.insert(name.to_owned(), uv);
        self.next_x += step;
        debug!("atlas tile for `{name}` at {uv:?}");

        for callback in self.ready_callbacks.iter_mut() {
            callback(name);
        }
        Some(uv)
    }

    /// Returns `true` if `name` has a tile.
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Number of allocated tiles, `MISSING` included.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Always `false`: `MISSING` is always allocated.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

impl TextureProvider for AtlasLayout {
    fn get_uv(&self, name: &str) -> Option<TextureUv> {
        self.textures.get(name).copied()
    }

    fn atlas_size(&self) -> f32 {
        self.atlas_size as f32
    }

    fn on_texture_ready(&mut self, callback: TextureReadyCallback) {
        self.ready_callbacks.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn missing_tile_sits_in_the_top_left_corner() {
        let layout = AtlasLayout::new(2048, 16, 2);
        let missing = layout.get_uv(MISSING_TEXTURE).unwrap();
        assert_eq!(missing.u, 0.0);
        assert_eq!(missing.v, 1.0 - 16.0 / 2048.0);
        assert_eq!(missing.u_size, 16.0 / 2048.0);
    }

    #[test]
    fn tiles_are_spaced_by_padding_and_wrap() {
        let mut layout = AtlasLayout::new(64, 16, 2);
        let a = layout.allocate("a").unwrap();
        let b = layout.allocate("b").unwrap();
        let c = layout.allocate("c").unwrap();

        assert_eq!(a.u, 18.0 / 64.0);
        assert_eq!(b.u, 36.0 / 64.0);
        // 54 + 18 > 64, so the third tile wraps to the next row.
        assert_eq!(c.u, 0.0);
        assert_eq!(c.v, 1.0 - (18.0 + 16.0) / 64.0);
        assert_eq!(layout.allocate("a"), Some(a));
    }

    #[test]
    fn full_atlas_refuses_new_tiles() {
        let mut layout = AtlasLayout::new(36, 16, 2);
        assert!(layout.allocate("a").is_some());
        assert!(layout.allocate("b").is_some());
        assert!(layout.allocate("c").is_some());
        assert!(layout.allocate("d").is_none());
        assert!(!layout.contains("d"));
    }

    #[test]
    fn unknown_names_resolve_to_missing() {
        let layout = AtlasLayout::default();
        assert_eq!(
            resolve_uv(&layout, "no_such_texture"),
            layout.get_uv(MISSING_TEXTURE).unwrap()
        );
    }

    #[test]
    fn ready_callbacks_fire_on_allocation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut layout = AtlasLayout::default();
        layout.on_texture_ready(Box::new(move |name| sink.borrow_mut().push(name.to_owned())));
        layout.allocate("stone");
        layout.allocate("stone");
        layout.allocate("dirt");

        assert_eq!(*seen.borrow(), vec!["stone".to_owned(), "dirt".to_owned()]);
    }
}
