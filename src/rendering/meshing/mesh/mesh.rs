//! Chunk mesh data and the face-culling mesh builder.
//!
//! [`build_chunk_mesh`] turns the voxels of one chunk into a [`ChunkMesh`]: one quad
//! per voxel side that borders a see-through neighbor. Neighbors are read from the
//! whole store, so faces on chunk borders are culled against the adjacent chunk.

use log::debug;

use crate::rendering::texture::{resolve_uv, TextureProvider};
use crate::rendering::Vertex;
use crate::voxels::{
    block::{block_side::BlockSide, registry::BlockRegistry, BlockDef, Voxel},
    chunk_store::ChunkStore,
    coords::ChunkKey,
};

use super::face::{face_uvs, Face};

/// The geometry of one chunk.
///
/// `faces` keeps the quads in emission order; `vertices` and `indices` hold the
/// same quads flattened for upload, four vertices and six indices per face.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built from
    pub key: ChunkKey,
    /// Faces in the order they were emitted
    pub faces: Vec<Face>,
    /// Vertex buffer contents
    pub vertices: Vec<Vertex>,
    /// Index buffer contents
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates an empty mesh for `key`.
    pub fn new(key: ChunkKey) -> Self {
        ChunkMesh {
            key,
            faces: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends a face, generating its vertices and indices.
    pub fn push_face(&mut self, face: Face) {
        let offset = self.vertices.len() as u32;
        let normal = face.side.normal();

        self.vertices.extend(
            face.corners
                .iter()
                .zip(face.uvs.iter())
                .map(|(&corner, &uv)| Vertex::new(corner, normal, uv)),
        );
        self.indices.extend(Self::generate_face_indices(offset));
        self.faces.push(face);
    }

    /// Generates the indices of one quad starting at vertex `offset`.
    ///
    /// # Returns
    /// Six indices forming two counter-clockwise triangles.
    pub fn generate_face_indices(offset: u32) -> [u32; 6] {
        [offset, offset + 1, offset + 2, offset + 2, offset + 3, offset]
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Builds the mesh for a single chunk.
///
/// # Arguments
/// * `store` - The voxel store, used for the chunk and its neighbors
/// * `key` - The chunk to mesh
/// * `registry` - Block definitions for transparency and texture names
/// * `textures` - Resolves texture names to atlas rectangles
/// * `layer_ceiling` - When set, voxels above this world y are hidden and
///   treated as empty by their neighbors
///
/// # Returns
/// `None` if the chunk does not exist or produces no faces. A caller holding an
/// older mesh for `key` must release it in that case.
pub fn build_chunk_mesh(
    store: &ChunkStore,
    key: ChunkKey,
    registry: &BlockRegistry,
    textures: &dyn TextureProvider,
    layer_ceiling: Option<i32>,
) -> Option<ChunkMesh> {
    let chunk = store.chunk(key)?;
    let inset = 0.5 / textures.atlas_size();
    let above_ceiling = |y: i32| layer_ceiling.is_some_and(|ceiling| y > ceiling);

    let mut mesh = ChunkMesh::new(key);

    for (local, voxel) in chunk.voxels() {
        let position = chunk.world_position(local);
        if above_ceiling(position.y) {
            continue;
        }

        let Some(def) = registry.get(voxel.id) else {
            debug!("skipping unknown block id {} at {position:?}", voxel.id);
            continue;
        };
        if def.is_entity() {
            continue;
        }

        for side in BlockSide::all() {
            // Nothing exists past the edge of the coordinate range.
            let visible = match side.neighbor_of(position) {
                Some(neighbor) => {
                    above_ceiling(neighbor.y)
                        || registry.is_transparent(store.get_block(neighbor.x, neighbor.y, neighbor.z))
                }
                None => true,
            };
            if !visible {
                continue;
            }

            let uvs = side_uvs(def, voxel, side, textures, inset);
            mesh.push_face(Face::new(position, voxel.id, side, uvs));
        }
    }

    if mesh.is_empty() {
        return None;
    }
    Some(mesh)
}

/// Picks the UV rectangle for one side of a voxel and lays it out per corner.
fn side_uvs(
    def: &BlockDef,
    voxel: Voxel,
    side: BlockSide,
    textures: &dyn TextureProvider,
    inset: f32,
) -> [[f32; 2]; 4] {
    let uv = def
        .face_uvs
        .as_ref()
        .and_then(|overrides| overrides.get(side))
        .unwrap_or_else(|| {
            let name = def.textures.for_slot(side.texture_slot(voxel.rotation));
            resolve_uv(textures, name)
        });
    face_uvs(uv, inset, side, voxel.rotation)
}
