//! Visibility-culled meshing for voxel chunks.
//!
//! Every block face whose neighbor does not hide it becomes one unit quad. No
//! faces are merged, so the output maps one-to-one onto visible block faces and
//! the per-face texture table can be applied without atlas tiling tricks.

use cgmath::Point3;
use log::trace;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, texture_layer},
    chunk::{neighborhood::ChunkView, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
};

use super::{face::Face, mesh::Mesh};

/// Builds the mesh of the chunk at the centre of `view`.
///
/// Directions are swept in `BlockSide` order (−X, +X, −Y, +Y, −Z, +Z); within a
/// direction, blocks are visited with x outermost and z innermost. The output is
/// therefore fully determined by the block values the view can see.
///
/// # Arguments
/// * `view` - The chunk to mesh, with read access to its neighbors
///
/// # Returns
/// The chunk's triangle soup. Empty when every face is hidden.
///
/// # Performance
/// O(volume) per direction. There is no incremental rebuild.
pub fn culled(view: &ChunkView) -> Mesh {
    let start = Instant::now();
    let chunk = view.chunk();
    let mut mesh = Mesh::new();

    for side in BlockSide::all() {
        let step = side.offset();
        for x in 0..CHUNK_WIDTH {
            for y in 0..CHUNK_HEIGHT {
                for z in 0..CHUNK_DEPTH {
                    let (lx, ly, lz) = (x as usize, y as usize, z as usize);
                    if view.is_blocked(lx, ly, lz, x + step.x, y + step.y, z + step.z) {
                        continue;
                    }

                    let layer = texture_layer(chunk.get_local(lx, ly, lz), side);
                    let position = Point3::new(x as i8, y as i8, z as i8);
                    mesh.push_face(&Face::new(position, side, layer));
                }
            }
        }
    }

    trace!(
        "Meshed chunk {:?}: {} faces in {:?}",
        chunk.position(),
        mesh.face_count(),
        start.elapsed()
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::vertex::ByteVec3,
        voxels::{
            block::block_type::BlockType,
            chunk::{Chunk, Neighbors},
        },
    };

    fn lone_chunk() -> Vec<Chunk> {
        vec![Chunk::empty(Point3::new(0, 0, 0), Neighbors::default())]
    }

    #[test]
    fn all_air_is_empty() {
        let chunks = lone_chunk();
        assert!(culled(&ChunkView::new(&chunks, 0)).is_empty());
    }

    #[test]
    fn single_block_emits_six_faces_in_direction_order() {
        let mut chunks = lone_chunk();
        chunks[0].set_local(0, 0, 0, BlockType::GRASS.as_int());
        let mesh = culled(&ChunkView::new(&chunks, 0));
        assert_eq!(mesh.len(), 36);

        let normals: Vec<ByteVec3> = mesh.normals().iter().step_by(6).copied().collect();
        let expected: Vec<ByteVec3> = BlockSide::all()
            .into_iter()
            .map(|side| {
                let o = side.offset();
                ByteVec3::new(o.x as i8, o.y as i8, o.z as i8)
            })
            .collect();
        assert_eq!(normals, expected);

        let layers: Vec<i8> = mesh.texcoords().iter().step_by(6).map(|t| t.z).collect();
        assert_eq!(layers, vec![2, 2, 1, 3, 2, 2]);
    }

    #[test]
    fn unknown_values_mesh_with_an_atlas_layer() {
        let mut chunks = lone_chunk();
        chunks[0].set_local(2, 2, 2, 200);
        let mesh = culled(&ChunkView::new(&chunks, 0));
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh
            .texcoords()
            .iter()
            .all(|t| t.z == BlockType::MARKER.as_int() as i8));
    }

    #[test]
    fn two_adjacent_blocks_share_no_face() {
        let mut chunks = lone_chunk();
        chunks[0].set_local(4, 4, 4, BlockType::STONE.as_int());
        chunks[0].set_local(5, 4, 4, BlockType::STONE.as_int());
        assert_eq!(culled(&ChunkView::new(&chunks, 0)).face_count(), 10);
    }

    #[test]
    fn water_next_to_glass_shows_both_faces() {
        let mut chunks = lone_chunk();
        chunks[0].set_local(4, 4, 4, BlockType::WATER.as_int());
        chunks[0].set_local(5, 4, 4, BlockType::GLASS.as_int());
        assert_eq!(culled(&ChunkView::new(&chunks, 0)).face_count(), 12);

        chunks[0].set_local(5, 4, 4, BlockType::WATER.as_int());
        assert_eq!(culled(&ChunkView::new(&chunks, 0)).face_count(), 10);
    }
}
