//! # Terrain Module
//!
//! Deterministic procedural terrain: layered simplex noise decides the ground
//! height of every column and the material of every solid cell, water fills
//! everything below sea level, and trees are scattered on grass.
//!
//! Generation is a pure function of the world seed and the chunk coordinate,
//! plus whatever neighbor content trees read through the chunk views. Noise is
//! sampled at absolute block positions, so terrain is continuous across chunk
//! boundaries.

use cgmath::Point3;
use log::trace;
use noise::{NoiseFn, Simplex};
use web_time::Instant;

use super::{
    block::{block_type::BlockType, BlockTypeSize},
    chunk::{neighborhood::ChunkViewMut, Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
};

mod trees;

/// Default absolute block height of the water surface.
pub const SEA_LEVEL: i32 = 4;

/// Octaves summed for the column height noise.
const HEIGHT_OCTAVES: u32 = 5;
/// Amplitude falloff per height octave.
const HEIGHT_PERSISTENCE: f64 = 0.8;
/// World units per noise unit for the column height noise.
const HEIGHT_SCALE: f64 = 256.0;
/// Multiplier turning summed height noise into `n`.
const HEIGHT_AMPLITUDE: f64 = 4.0;

/// Octaves summed for the material noise.
const MATERIAL_OCTAVES: u32 = 2;
/// Amplitude falloff per material octave.
const MATERIAL_PERSISTENCE: f64 = 1.0;
/// World units per noise unit for the material noise.
const MATERIAL_SCALE: f64 = 16.0;

/// `n + 5r` below this is sand.
const SAND_THRESHOLD: f64 = 4.0;
/// `n + 5r` below this (and not sand) is dirt or grass.
const SOIL_THRESHOLD: f64 = 8.0;
/// Rock with `r` at or above this becomes ore.
const ORE_THRESHOLD: f64 = 1.25;

/// Fills chunks with terrain derived from a world seed.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    seed: u32,
    sea_level: i32,
    simplex: Simplex,
}

impl TerrainGenerator {
    /// Creates a generator for a world with the given seed and sea level.
    pub fn new(seed: u32, sea_level: i32) -> Self {
        TerrainGenerator {
            seed,
            sea_level,
            simplex: Simplex::new(seed),
        }
    }

    /// The world seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Absolute block height of the water surface.
    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    /// Samples the height noise for a world column.
    ///
    /// # Returns
    /// `(n, h)`: the scaled noise value and the ground height `trunc(2n)`.
    /// Cells with absolute height below `h` are solid.
    pub fn column_height(&self, wx: i32, wz: i32) -> (f64, i32) {
        let mut sum = 0.0;
        let mut strength = 1.0;
        let mut scale = 1.0;

        // Summed by hand: `Fbm` normalizes by the total amplitude, and the thresholds expect the raw sum.
        for _ in 0..HEIGHT_OCTAVES {
            let sample = self.simplex.get([
                wx as f64 / HEIGHT_SCALE * scale,
                wz as f64 / HEIGHT_SCALE * scale,
            ]);
            sum += strength * sample;
            scale *= 2.0;
            strength *= HEIGHT_PERSISTENCE;
        }

        let n = sum * HEIGHT_AMPLITUDE;
        (n, (n * 2.0) as i32)
    }

    /// Samples the summed absolute 3D material noise `r` at a world cell.
    pub fn material_noise(&self, wx: i32, wy: i32, wz: i32) -> f64 {
        let mut sum = 0.0;
        let mut strength = 1.0;
        let mut scale = 1.0;

        // `Fbm` cannot take the absolute value of each octave before summing.
        for _ in 0..MATERIAL_OCTAVES {
            let sample = self.simplex.get([
                wx as f64 / MATERIAL_SCALE * scale,
                wy as f64 / MATERIAL_SCALE * scale,
                wz as f64 / MATERIAL_SCALE * scale,
            ]);
            sum += strength * sample.abs();
            scale *= 2.0;
            strength *= MATERIAL_PERSISTENCE;
        }

        sum
    }

    /// Picks the material of a solid cell at absolute height `wy` in a column of height `h`.
    fn classify(&self, n: f64, r: f64, h: i32, wy: i32) -> BlockType {
        let layer = n + r * 5.0;
        if layer < SAND_THRESHOLD {
            BlockType::SAND
        } else if layer < SOIL_THRESHOLD {
            if h < self.sea_level || wy < h - 1 {
                BlockType::DIRT
            } else {
                BlockType::GRASS
            }
        } else if r < ORE_THRESHOLD {
            BlockType::STONE
        } else {
            BlockType::ORE
        }
    }

    /// Generates terrain into `chunks[index]` unless it already has some.
    ///
    /// Trees may spill into present neighbors through the neighbor links. Every
    /// present neighbor is marked dirty afterwards, since its boundary faces may
    /// now be hidden or exposed.
    ///
    /// # Returns
    /// `true` if terrain was generated, `false` if the chunk was already generated.
    pub fn generate(&self, chunks: &mut [Chunk], index: usize) -> bool {
        if chunks[index].is_generated() {
            return false;
        }

        let start = Instant::now();
        let position = chunks[index].position();
        let origin = chunks[index].block_origin();
        let mut rng = fastrand::Rng::with_seed(chunk_rng_seed(self.seed, position));
        let water = BlockType::WATER.as_int();
        let grass = BlockType::GRASS.as_int();
        let mut trees = 0;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_DEPTH {
                let (wx, wz) = (origin.x + x, origin.z + z);
                let (n, h) = self.column_height(wx, wz);

                for y in 0..CHUNK_HEIGHT {
                    let wy = origin.y + y;
                    let (lx, ly, lz) = (x as usize, y as usize, z as usize);

                    if wy >= h {
                        if wy < self.sea_level {
                            chunks[index].put_local(lx, ly, lz, water);
                            continue;
                        }

                        let mut view = ChunkViewMut::new(chunks, index);
                        if view.get(x, y - 1, z) == grass && rng.u8(..) == 0 {
                            trees::plant(&mut view, &mut rng, Point3::new(x, y, z));
                            trees += 1;
                        }
                        break;
                    }

                    let r = self.material_noise(wx, wy, wz);
                    chunks[index].put_local(lx, ly, lz, self.classify(n, r, h, wy).as_int());
                }
            }
        }

        chunks[index].mark_generated();
        let neighbors = *chunks[index].neighbors();
        for neighbor in neighbors.iter() {
            chunks[neighbor].mark_dirty();
        }

        trace!(
            "Generated chunk {:?} with {} trees in {:?}",
            position,
            trees,
            start.elapsed()
        );

        true
    }

    /// Generates a standalone copy of the chunk at `position`, with no neighbors.
    ///
    /// Trees reaching over the chunk boundary are clipped. Handy for inspecting
    /// terrain without building a world.
    pub fn generate_isolated(&self, position: Point3<i32>) -> Vec<BlockTypeSize> {
        let mut chunks = vec![Chunk::empty(position, Default::default())];
        self.generate(&mut chunks, 0);
        chunks[0].blocks().to_vec()
    }
}

/// Mixes the world seed and a chunk coordinate into an RNG seed.
///
/// Each chunk gets its own stream, so tree placement does not depend on the
/// order in which chunks are generated.
fn chunk_rng_seed(seed: u32, position: Point3<i32>) -> u64 {
    [position.x, position.y, position.z]
        .into_iter()
        .fold(splitmix64(seed as u64), |acc, c| splitmix64(acc ^ c as u32 as u64))
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
