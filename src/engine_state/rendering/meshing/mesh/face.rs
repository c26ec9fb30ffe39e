use cgmath::Point3;

use crate::engine_state::{rendering::vertex::ByteVec3, voxels::block::block_side::BlockSide};

/// Corner offsets of the two triangles forming each face, indexed by `BlockSide`.
///
/// Offsets are relative to the block's minimum corner. Every face winds
/// counter-clockwise when viewed from outside the block.
#[rustfmt::skip]
pub const QUAD_CORNERS: [[[i8; 3]; 6]; 6] = [
    // LEFT (-X)
    [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 0], [0, 0, 1], [0, 1, 1]],
    // RIGHT (+X)
    [[1, 0, 0], [1, 1, 0], [1, 0, 1], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
    // BOTTOM (-Y)
    [[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
    // TOP (+Y)
    [[0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 1, 0], [0, 1, 1], [1, 1, 1]],
    // FRONT (-Z)
    [[0, 0, 0], [0, 1, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
    // BACK (+Z)
    [[0, 0, 1], [1, 0, 1], [0, 1, 1], [0, 1, 1], [1, 0, 1], [1, 1, 1]],
];

/// Texture coordinates matching [`QUAD_CORNERS`] vertex for vertex.
#[rustfmt::skip]
pub const QUAD_UVS: [[[i8; 2]; 6]; 6] = [
    [[0, 0], [0, 1], [1, 0], [1, 0], [0, 1], [1, 1]],
    [[0, 0], [1, 0], [0, 1], [1, 0], [1, 1], [0, 1]],
    [[0, 0], [1, 0], [0, 1], [1, 0], [1, 1], [0, 1]],
    [[0, 0], [0, 1], [1, 0], [1, 0], [0, 1], [1, 1]],
    [[0, 0], [0, 1], [1, 0], [0, 1], [1, 1], [1, 0]],
    [[0, 0], [1, 0], [0, 1], [0, 1], [1, 0], [1, 1]],
];

/// A single visible unit quad of a block.
///
/// Holds everything needed to emit its six vertices: the block's chunk-local
/// position, the face direction and the resolved texture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Minimum corner of the block in chunk coordinates
    pub position: Point3<i8>,
    /// Which side of the block this face represents
    pub side: BlockSide,
    /// Atlas layer sampled by this face
    pub layer: u8,
}

impl Face {
    /// Creates a new face for the block at `position`.
    ///
    /// # Arguments
    /// * `position` - The block's chunk-local coordinates
    /// * `side` - Which side of the block this face represents
    /// * `layer` - The texture layer resolved from the face texture table
    pub fn new(position: Point3<i8>, side: BlockSide, layer: u8) -> Self {
        Face {
            position,
            side,
            layer,
        }
    }

    /// The constant normal shared by all six vertices.
    pub fn normal(&self) -> ByteVec3 {
        let offset = self.side.offset();
        ByteVec3::new(offset.x as i8, offset.y as i8, offset.z as i8)
    }

    /// Yields `(position, texcoord)` for each of the six vertices in emission order.
    pub fn vertices(&self) -> impl Iterator<Item = (ByteVec3, ByteVec3)> + '_ {
        let corners = &QUAD_CORNERS[self.side as usize];
        let uvs = &QUAD_UVS[self.side as usize];
        corners.iter().zip(uvs.iter()).map(move |(corner, uv)| {
            (
                ByteVec3::new(
                    self.position.x + corner[0],
                    self.position.y + corner[1],
                    self.position.z + corner[2],
                ),
                ByteVec3::from([uv[0], uv[1], self.layer as i8]),
            )
        })
    }
}
