//! # Block Module
//!
//! This module provides the block catalog: block type definitions, block faces,
//! the per-face texture table and the transparency classes that drive face
//! culling during meshing.

use block_side::BlockSide;
use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// How a block interacts with line of sight when deciding face visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransparencyClass {
    /// Blocks line of sight unconditionally.
    Opaque,
    /// Never blocks line of sight, not even against itself (air, foliage).
    NonBlocking,
    /// Blocks line of sight only against blocks of the same group.
    SemiTransparent(u8),
}

/// Maps each block type to its transparency class, indexed by `BlockType` as a `usize`.
pub static BLOCK_TRANSPARENCY: [TransparencyClass; BLOCK_TYPE_COUNT] = [
    TransparencyClass::NonBlocking,        // AIR
    TransparencyClass::Opaque,             // DIRT
    TransparencyClass::Opaque,             // TOPSOIL
    TransparencyClass::Opaque,             // GRASS
    TransparencyClass::NonBlocking,        // LEAVES
    TransparencyClass::Opaque,             // WOOD
    TransparencyClass::Opaque,             // STONE
    TransparencyClass::Opaque,             // SAND
    TransparencyClass::SemiTransparent(1), // WATER
    TransparencyClass::SemiTransparent(2), // GLASS
    TransparencyClass::Opaque,             // BRICK
    TransparencyClass::Opaque,             // ORE
    TransparencyClass::Opaque,             // RINGS
    TransparencyClass::Opaque,             // WHITE
    TransparencyClass::Opaque,             // BLACK
    TransparencyClass::Opaque,             // MARKER
];

/// Maps each block type to its texture layer for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 texture layers in `BlockSide` order:
/// [Left, Right, Bottom, Top, Front, Back]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[u8; 6]; BLOCK_TYPE_COUNT] = [
    [0, 0, 0, 0, 0, 0],       // AIR
    [1, 1, 1, 1, 1, 1],       // DIRT
    [2, 2, 2, 2, 2, 2],       // TOPSOIL
    [2, 2, 1, 3, 2, 2],       // GRASS (top: 3, bottom: 1, sides: 2)
    [4, 4, 4, 4, 4, 4],       // LEAVES
    [5, 5, 12, 12, 5, 5],     // WOOD (rings on top and bottom)
    [6, 6, 6, 6, 6, 6],       // STONE
    [7, 7, 7, 7, 7, 7],       // SAND
    [8, 8, 8, 8, 8, 8],       // WATER
    [9, 9, 9, 9, 9, 9],       // GLASS
    [10, 10, 10, 10, 10, 10], // BRICK
    [11, 11, 11, 11, 11, 11], // ORE
    [12, 12, 12, 12, 12, 12], // RINGS
    [13, 13, 13, 13, 13, 13], // WHITE
    [14, 14, 14, 14, 14, 14], // BLACK
    [15, 15, 15, 15, 15, 15], // MARKER
];

/// Looks up the transparency class of a stored block value.
///
/// Values outside the catalog are treated as opaque.
#[inline]
pub fn transparency(btype: BlockTypeSize) -> TransparencyClass {
    BLOCK_TRANSPARENCY
        .get(btype as usize)
        .copied()
        .unwrap_or(TransparencyClass::Opaque)
}

/// Gets the texture layer used on one face of a block.
///
/// # Arguments
/// * `btype` - The block type as a `BlockTypeSize`
/// * `side` - The face being textured
///
/// # Returns
/// The atlas layer for that face. Values outside the catalog get the marker
/// block's layer, so the result always lies inside the atlas.
#[inline]
pub fn texture_layer(btype: BlockTypeSize, side: BlockSide) -> u8 {
    let layers = BLOCK_TYPE_TO_TEXTURE_INDICES
        .get(btype as usize)
        .unwrap_or(&BLOCK_TYPE_TO_TEXTURE_INDICES[BlockType::MARKER as usize]);
    layers[side as usize]
}

/// Highest atlas layer referenced by the texture table.
pub fn max_texture_layer() -> u8 {
    BLOCK_TYPE_TO_TEXTURE_INDICES
        .iter()
        .flat_map(|layers| layers.iter().copied())
        .max()
        .unwrap_or(0)
}

/// Face visibility predicate used by meshing.
///
/// Decides whether the face of `source` that touches `neighbor` is hidden.
/// Air sources are always hidden, non-blocking neighbors (air, foliage) never
/// hide anything, opaque neighbors always do, and semi-transparent neighbors
/// only hide sources of their own group.
pub fn is_face_hidden(source: BlockTypeSize, neighbor: BlockTypeSize) -> bool {
    if source == BlockType::AIR.as_int() {
        return true;
    }

    match transparency(neighbor) {
        TransparencyClass::NonBlocking => false,
        TransparencyClass::Opaque => true,
        group @ TransparencyClass::SemiTransparent(_) => transparency(source) == group,
    }
}
