//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size 3D array of block
//! values, its links to the six adjacent chunks and the state flags that drive
//! streaming and meshing.
//!
//! ## Neighbor Links
//!
//! Chunks never hold references to each other. The world owns every chunk in a
//! flat array and each chunk records the array indices of its neighbors. Reads
//! and writes that cross a chunk boundary go through [`neighborhood::ChunkView`]
//! and [`neighborhood::ChunkViewMut`], which resolve the index at access time.
//!
//! ## Memory Layout
//!
//! Blocks are stored x-major: `index = (x * CHUNK_HEIGHT + y) * CHUNK_DEPTH + z`.

use cgmath::{Matrix4, Point3, Vector3};

use super::block::{block_side::BlockSide, block_type::BlockType, BlockTypeSize};
use crate::engine_state::rendering::meshing::Mesh;

pub mod neighborhood;

/// The width of a chunk in blocks (X axis).
pub const CHUNK_WIDTH: i32 = 16;
/// The height of a chunk in blocks (Y axis).
pub const CHUNK_HEIGHT: i32 = 32;
/// The depth of a chunk in blocks (Z axis).
pub const CHUNK_DEPTH: i32 = 16;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = (CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH) as usize;

/// Chunk extents as a vector, in block units.
pub fn chunk_extents() -> Vector3<i32> {
    Vector3::new(CHUNK_WIDTH, CHUNK_HEIGHT, CHUNK_DEPTH)
}

/// Lifecycle of a chunk's contents.
///
/// Chunks only ever move forward: `Empty → Generated → Initialized`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChunkState {
    /// All air; terrain has not been generated yet.
    Empty,
    /// Terrain has been generated, usually because a neighbor was initialized.
    Generated,
    /// Selected by the streaming scheduler; meshed and drawn from now on.
    Initialized,
}

/// Indices of the six adjacent chunks in the world's chunk array.
///
/// `None` marks the edge of the world grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// Neighbor at −X
    pub left: Option<usize>,
    /// Neighbor at +X
    pub right: Option<usize>,
    /// Neighbor at −Y
    pub below: Option<usize>,
    /// Neighbor at +Y
    pub above: Option<usize>,
    /// Neighbor at −Z
    pub front: Option<usize>,
    /// Neighbor at +Z
    pub back: Option<usize>,
}

impl Neighbors {
    /// Returns the neighbor across the given face.
    pub fn get(&self, side: BlockSide) -> Option<usize> {
        match side {
            BlockSide::LEFT => self.left,
            BlockSide::RIGHT => self.right,
            BlockSide::BOTTOM => self.below,
            BlockSide::TOP => self.above,
            BlockSide::FRONT => self.front,
            BlockSide::BACK => self.back,
        }
    }

    /// Iterates over the present neighbors in `BlockSide` order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        BlockSide::all().into_iter().filter_map(|side| self.get(side))
    }
}

/// Represents a 16x32x16 collection of voxel blocks in the world.
///
/// Each chunk owns its block array and a cached mesh derived from it. The mesh
/// is stale whenever `dirty` is set and is rebuilt lazily before drawing.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: Point3<i32>,
    /// Block values, `CHUNK_SIZE` entries in x-major order.
    blocks: Box<[BlockTypeSize]>,
    /// Array indices of the adjacent chunks, fixed at world construction.
    neighbors: Neighbors,
    /// Set when the cached mesh no longer matches the block array.
    dirty: bool,
    state: ChunkState,
    mesh: Mesh,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `neighbors` - Array indices of the adjacent chunks
    ///
    /// # Returns
    /// A new dirty `Chunk` in the `Empty` state.
    pub fn empty(position: Point3<i32>, neighbors: Neighbors) -> Self {
        Chunk {
            position,
            blocks: vec![BlockType::AIR.as_int(); CHUNK_SIZE].into_boxed_slice(),
            neighbors,
            dirty: true,
            state: ChunkState::Empty,
            mesh: Mesh::new(),
        }
    }

    /// Converts chunk-local coordinates into an index into the block array.
    ///
    /// # Panics
    /// If a coordinate is out of range.
    #[inline]
    pub fn index_of(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < CHUNK_WIDTH as usize && y < CHUNK_HEIGHT as usize && z < CHUNK_DEPTH as usize,
            "chunk-local coordinate ({x}, {y}, {z}) out of range"
        );
        (x * CHUNK_HEIGHT as usize + y) * CHUNK_DEPTH as usize + z
    }

    /// Checks whether chunk-local coordinates lie inside the chunk.
    #[inline]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_DEPTH).contains(&z)
    }

    /// Returns the chunk coordinate assigned at construction.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Returns the block-space coordinate of this chunk's local origin.
    pub fn block_origin(&self) -> Point3<i32> {
        Point3::new(
            self.position.x * CHUNK_WIDTH,
            self.position.y * CHUNK_HEIGHT,
            self.position.z * CHUNK_DEPTH,
        )
    }

    /// World-space transform of this chunk's mesh: a translation by
    /// chunk coordinate × chunk extents.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let origin = self.block_origin();
        Matrix4::from_translation(Vector3::new(origin.x as f32, origin.y as f32, origin.z as f32))
    }

    /// Returns the neighbor link record.
    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    /// Gets the block at in-range chunk-local coordinates.
    ///
    /// # Panics
    /// If a coordinate is out of range.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockTypeSize {
        self.blocks[Self::index_of(x, y, z)]
    }

    /// Writes a block at in-range chunk-local coordinates and marks the chunk dirty.
    ///
    /// Neighbors are not touched; use [`neighborhood::ChunkViewMut::set`] when the
    /// write may change a neighbor's boundary faces.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, btype: BlockTypeSize) {
        self.blocks[Self::index_of(x, y, z)] = btype;
        self.dirty = true;
    }

    /// Writes a block without touching the dirty flag. Generation marks the
    /// chunk dirty once when it is done.
    #[inline]
    pub(crate) fn put_local(&mut self, x: usize, y: usize, z: usize, btype: BlockTypeSize) {
        self.blocks[Self::index_of(x, y, z)] = btype;
    }

    /// Fills the whole chunk with one block type and marks it dirty.
    pub fn fill(&mut self, btype: BlockTypeSize) {
        self.blocks.fill(btype);
        self.dirty = true;
    }

    /// Returns the raw block array in x-major order.
    pub fn blocks(&self) -> &[BlockTypeSize] {
        &self.blocks
    }

    /// Checks whether every block in the chunk is air.
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == BlockType::AIR.as_int())
    }

    /// Returns `true` when the cached mesh is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cached mesh stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the lifecycle state of this chunk.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Returns `true` once terrain has been generated into this chunk.
    pub fn is_generated(&self) -> bool {
        self.state >= ChunkState::Generated
    }

    /// Returns `true` once the streaming scheduler has initialized this chunk.
    pub fn is_initialized(&self) -> bool {
        self.state == ChunkState::Initialized
    }

    pub(crate) fn mark_generated(&mut self) {
        if self.state == ChunkState::Empty {
            self.state = ChunkState::Generated;
        }
        self.dirty = true;
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.state = ChunkState::Initialized;
    }

    /// Returns the cached mesh. May be stale if [`Chunk::is_dirty`] is set.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Number of vertices in the cached mesh.
    pub fn element_count(&self) -> usize {
        self.mesh.len()
    }

    /// Replaces the cached mesh and clears the dirty flag.
    pub(crate) fn store_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_empty_and_dirty() {
        let chunk = Chunk::empty(Point3::new(1, -1, 2), Neighbors::default());
        assert!(chunk.is_all_air());
        assert!(chunk.is_dirty());
        assert_eq!(chunk.state(), ChunkState::Empty);
        assert_eq!(chunk.blocks().len(), CHUNK_SIZE);
        assert_eq!(chunk.block_origin(), Point3::new(16, -32, 32));
    }

    #[test]
    fn index_is_unique() {
        let mut seen = vec![false; CHUNK_SIZE];
        for x in 0..CHUNK_WIDTH as usize {
            for y in 0..CHUNK_HEIGHT as usize {
                for z in 0..CHUNK_DEPTH as usize {
                    let index = Chunk::index_of(x, y, z);
                    assert!(!seen[index]);
                    seen[index] = true;
                }
            }
        }
        assert!(seen.into_iter().all(|b| b));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn overflowing_z_does_not_alias_the_next_row() {
        let chunk = Chunk::empty(Point3::new(0, 0, 0), Neighbors::default());
        chunk.get_local(0, 0, CHUNK_DEPTH as usize);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn overflowing_y_is_rejected() {
        Chunk::index_of(0, CHUNK_HEIGHT as usize, 0);
    }

    #[test]
    fn state_only_moves_forward() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0), Neighbors::default());
        chunk.mark_initialized();
        chunk.mark_generated();
        assert_eq!(chunk.state(), ChunkState::Initialized);
        assert!(chunk.is_generated());
    }

    #[test]
    fn storing_a_mesh_clears_dirty() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0), Neighbors::default());
        chunk.set_local(3, 4, 5, BlockType::STONE.as_int());
        assert_eq!(chunk.get_local(3, 4, 5), BlockType::STONE.as_int());
        chunk.store_mesh(Mesh::new());
        assert!(!chunk.is_dirty());
        chunk.mark_dirty();
        assert!(chunk.is_dirty());
    }
}
