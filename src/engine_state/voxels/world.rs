//! # World Module
//!
//! This module provides the `World` struct: a fixed grid of chunks wired into a
//! neighbor graph, plus global block access across chunk boundaries.
//!
//! ## Architecture
//!
//! All chunks live in one flat `Vec`, indexed `(gx * size.y + gy) * size.z + gz`
//! by grid coordinate. The grid is centred on the origin: chunk coordinate =
//! grid coordinate − size / 2. Neighbor links are array indices computed once at
//! construction and never change afterwards.
//!
//! ## Lifecycle
//!
//! Every chunk starts empty. Terrain is generated on demand, and a chunk is
//! initialized (selected for drawing) at most once, by the streaming scheduler.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use super::{
    block::{block_type::BlockType, BlockTypeSize},
    chunk::{
        chunk_extents,
        neighborhood::{write_block, ChunkView, ChunkViewMut},
        Chunk, Neighbors,
    },
    terrain::TerrainGenerator,
};
use crate::{config::WorldConfig, error::Result};

/// A bounded voxel world composed of a fixed grid of chunks.
///
/// # Examples
///
/// ```
/// use blockworld::{config::WorldConfig, engine_state::voxels::world::World};
///
/// let config = WorldConfig { seed: Some(1), size: [2, 1, 2], sea_level: 4 };
/// let mut world = World::new(&config).unwrap();
///
/// world.set(-3, 5, 7, 6);
/// assert_eq!(world.get(-3, 5, 7), 6);
/// assert_eq!(world.get(1000, 0, 0), 0);
/// ```
pub struct World {
    /// World size in chunks.
    size: Vector3<i32>,
    /// Every chunk, in grid order.
    chunks: Vec<Chunk>,
    /// The generator shared by every chunk; owns the world seed.
    terrain: TerrainGenerator,
}

impl World {
    /// Creates a world from validated configuration.
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if a dimension is outside `1..=256` or the
    /// grid holds more than `MAX_WORLD_CHUNKS` chunks.
    pub fn new(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let [x, y, z] = config.size;
        Ok(Self::build(
            Vector3::new(x, y, z),
            TerrainGenerator::new(config.resolved_seed(), config.sea_level),
        ))
    }

    fn build(size: Vector3<i32>, terrain: TerrainGenerator) -> Self {
        let count = (size.x * size.y * size.z) as usize;
        let mut chunks = Vec::with_capacity(count);

        for gx in 0..size.x {
            for gy in 0..size.y {
                for gz in 0..size.z {
                    let grid = Point3::new(gx, gy, gz);
                    let index_at = |offset: Vector3<i32>| Self::grid_index_in(size, grid + offset);
                    let neighbors = Neighbors {
                        left: index_at(Vector3::new(-1, 0, 0)),
                        right: index_at(Vector3::new(1, 0, 0)),
                        below: index_at(Vector3::new(0, -1, 0)),
                        above: index_at(Vector3::new(0, 1, 0)),
                        front: index_at(Vector3::new(0, 0, -1)),
                        back: index_at(Vector3::new(0, 0, 1)),
                    };
                    chunks.push(Chunk::empty(grid - size / 2, neighbors));
                }
            }
        }

        info!(
            "Created world of {}x{}x{} chunks with seed {}",
            size.x,
            size.y,
            size.z,
            terrain.seed()
        );

        World {
            size,
            chunks,
            terrain,
        }
    }

    fn grid_index_in(size: Vector3<i32>, grid: Point3<i32>) -> Option<usize> {
        if (0..size.x).contains(&grid.x) && (0..size.y).contains(&grid.y) && (0..size.z).contains(&grid.z) {
            Some(((grid.x * size.y + grid.y) * size.z + grid.z) as usize)
        } else {
            None
        }
    }

    /// The world seed.
    pub fn seed(&self) -> u32 {
        self.terrain.seed()
    }

    /// World size in chunks.
    pub fn size(&self) -> Vector3<i32> {
        self.size
    }

    /// The terrain generator owned by this world.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Every chunk, in grid order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Returns the chunk at an array index.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn chunk(&self, index: usize) -> &Chunk {
        &self.chunks[index]
    }

    /// Returns the chunk at an array index mutably.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn chunk_mut(&mut self, index: usize) -> &mut Chunk {
        &mut self.chunks[index]
    }

    /// Array index of the chunk at a grid coordinate (0-based, not centred).
    pub fn grid_index(&self, grid: Point3<i32>) -> Option<usize> {
        Self::grid_index_in(self.size, grid)
    }

    /// Array index of the chunk at a chunk coordinate (centred on the origin).
    pub fn chunk_index_at(&self, position: Point3<i32>) -> Option<usize> {
        self.grid_index(position + self.size / 2)
    }

    /// Splits a global block coordinate into a chunk index and a local position.
    fn locate(&self, x: i32, y: i32, z: i32) -> Option<(usize, Point3<usize>)> {
        let extents = chunk_extents();
        let position = Point3::new(
            x.div_euclid(extents.x),
            y.div_euclid(extents.y),
            z.div_euclid(extents.z),
        );
        let index = self.chunk_index_at(position)?;
        let local = Point3::new(
            x.rem_euclid(extents.x) as usize,
            y.rem_euclid(extents.y) as usize,
            z.rem_euclid(extents.z) as usize,
        );
        Some((index, local))
    }

    /// Gets the block at a global block coordinate. Outside the world, returns air.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        match self.locate(x, y, z) {
            Some((index, local)) => self.chunks[index].get_local(local.x, local.y, local.z),
            None => BlockType::AIR.as_int(),
        }
    }

    /// Writes a block at a global block coordinate. Outside the world, or for a
    /// value outside the block catalog, does nothing.
    ///
    /// The owning chunk is marked dirty, and so is every neighbor touching the cell.
    pub fn set(&mut self, x: i32, y: i32, z: i32, btype: BlockTypeSize) {
        if let Some((index, local)) = self.locate(x, y, z) {
            write_block(&mut self.chunks, index, local, btype);
        }
    }

    /// Read access to a chunk and its neighbors.
    pub fn view(&self, index: usize) -> ChunkView<'_> {
        ChunkView::new(&self.chunks, index)
    }

    /// Write access to a chunk and its neighbors.
    pub fn view_mut(&mut self, index: usize) -> ChunkViewMut<'_> {
        ChunkViewMut::new(&mut self.chunks, index)
    }

    /// Generates terrain into one chunk if it has none yet.
    ///
    /// # Returns
    /// `true` if terrain was generated.
    pub fn generate_chunk(&mut self, index: usize) -> bool {
        self.terrain.generate(&mut self.chunks, index)
    }

    /// Initializes a chunk: generates it and its six neighbors, then marks it initialized.
    ///
    /// Generating the neighbors first gives the chunk's boundary faces correct
    /// data on its first mesh build.
    ///
    /// # Returns
    /// `false` if the chunk was already initialized, in which case nothing happens.
    pub fn initialize_chunk(&mut self, index: usize) -> bool {
        if self.chunks[index].is_initialized() {
            return false;
        }

        self.generate_chunk(index);
        let neighbors = *self.chunks[index].neighbors();
        for neighbor in neighbors.iter() {
            self.generate_chunk(neighbor);
        }
        self.chunks[index].mark_initialized();

        debug!("Initialized chunk {:?}", self.chunks[index].position());
        true
    }
}
