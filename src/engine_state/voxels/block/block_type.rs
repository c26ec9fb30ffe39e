//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion and
//! name lookup.

use num_derive::FromPrimitive;
use phf::phf_map;

use super::BlockTypeSize;

/// Number of entries in the block catalog.
pub const BLOCK_TYPE_COUNT: usize = 16;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant of each variant is the value stored in chunk arrays and the
/// default texture layer of the block. The `FromPrimitive` derive allows
/// conversion from the stored integers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Never rendered and never hides anything.
    AIR = 0,
    /// Plain dirt, also the bottom face of grass.
    DIRT = 1,
    /// Dirt with a grass fringe, used for the sides of grass blocks.
    TOPSOIL = 2,
    /// Grass-topped dirt generated on the surface above sea level.
    GRASS = 3,
    /// Tree foliage. Does not block line of sight, not even against itself.
    LEAVES = 4,
    /// Tree trunk with bark on the sides and rings on top and bottom.
    WOOD = 5,
    /// The rock layer below the soil.
    STONE = 6,
    /// Beach and shallow sea floor material.
    SAND = 7,
    /// Semi-transparent fluid filling everything below sea level.
    WATER = 8,
    /// Semi-transparent building block.
    GLASS = 9,
    /// Building block.
    BRICK = 10,
    /// Rare substitution inside the rock layer.
    ORE = 11,
    /// Cut wood, also the top and bottom face of wood.
    RINGS = 12,
    /// A plain white block.
    WHITE = 13,
    /// A plain black block.
    BLACK = 14,
    /// Axis marker block, handy when debugging orientation.
    MARKER = 15,
}

/// Static perfect-hash table from block names to block types.
///
/// Used by configuration and tooling that refer to blocks by name.
pub static BLOCK_NAMES: phf::Map<&'static str, BlockType> = phf_map! {
    "air" => BlockType::AIR,
    "dirt" => BlockType::DIRT,
    "topsoil" => BlockType::TOPSOIL,
    "grass" => BlockType::GRASS,
    "leaves" => BlockType::LEAVES,
    "wood" => BlockType::WOOD,
    "stone" => BlockType::STONE,
    "sand" => BlockType::SAND,
    "water" => BlockType::WATER,
    "glass" => BlockType::GLASS,
    "brick" => BlockType::BRICK,
    "ore" => BlockType::ORE,
    "woodrings" => BlockType::RINGS,
    "white" => BlockType::WHITE,
    "black" => BlockType::BLACK,
    "x-y" => BlockType::MARKER,
};

impl BlockType {
    /// Converts a stored `BlockTypeSize` into a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as stored in a chunk
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` for values outside the catalog.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Looks up a block type by its catalog name.
    ///
    /// # Arguments
    /// * `name` - The lowercase block name, e.g. `"stone"`
    ///
    /// # Returns
    /// The matching `BlockType`, or `None` if no block has that name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_NAMES.get(name).copied()
    }

    /// Returns the catalog name of this block type.
    pub fn name(self) -> &'static str {
        BLOCK_NAMES
            .entries()
            .find(|(_, btype)| **btype == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Returns the compact value stored in chunk arrays.
    #[inline]
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }
}
