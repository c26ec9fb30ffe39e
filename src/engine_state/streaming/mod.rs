//! # Streaming Module
//!
//! Decides, once per frame, which chunks are drawn and which single chunk is
//! brought to life next.
//!
//! ## Per-frame policy
//!
//! 1. Every chunk is classified against the view frustum. Chunks behind the
//!    camera or off screen are skipped entirely.
//! 2. Visible chunks that are already initialized have their mesh rebuilt if
//!    dirty and are reported for drawing.
//! 3. Visible chunks that are not initialized compete on clip-space distance;
//!    the nearest one (first in grid order on ties) is initialized at the end of
//!    the pass.
//!
//! At most one chunk is initialized per tick, which caps the generation cost of
//! a frame at seven chunk generations.

use cgmath::{Matrix4, Point3};
use log::{debug, info};

use super::{
    rendering::meshing::{MeshBuilder, MeshStats},
    voxels::world::World,
};

pub mod frustum;

pub use frustum::{ChunkVisibility, ViewFrustum};

/// One chunk to draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkDraw {
    /// Index of the chunk in the world's chunk array
    pub index: usize,
    /// Chunk coordinate
    pub position: Point3<i32>,
    /// World transform of the chunk's mesh
    pub model: Matrix4<f32>,
    /// Number of vertices in the chunk's mesh
    pub vertex_count: usize,
}

impl ChunkDraw {
    /// Returns `true` if the chunk contributes a draw call.
    pub fn has_geometry(&self) -> bool {
        self.vertex_count > 0
    }

    /// Number of triangles in the chunk's mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }
}

/// Everything one [`StreamingScheduler::tick`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Visible, initialized chunks in grid order
    pub draws: Vec<ChunkDraw>,
    /// Coordinate of the chunk initialized this tick, if any
    pub initialized: Option<Point3<i32>>,
    /// Number of meshes rebuilt this tick
    pub meshes_rebuilt: usize,
    /// Number of chunks that passed the visibility test
    pub visible: usize,
    /// Number of chunks behind the camera or off screen
    pub culled: usize,
}

impl FrameReport {
    /// Draws that actually carry geometry.
    pub fn draws_with_geometry(&self) -> impl Iterator<Item = &ChunkDraw> {
        self.draws.iter().filter(|draw| draw.has_geometry())
    }

    /// Total vertices across all draws.
    pub fn vertex_count(&self) -> usize {
        self.draws.iter().map(|draw| draw.vertex_count).sum()
    }
}

/// Drives incremental world initialization and lazy meshing.
#[derive(Debug, Default)]
pub struct StreamingScheduler {
    mesh_builder: MeshBuilder,
    ticks: u64,
    initialized: usize,
}

impl StreamingScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame of streaming.
    ///
    /// # Arguments
    /// * `world` - The world to stream
    /// * `frustum` - This frame's view-projection test
    ///
    /// # Returns
    /// The chunks to draw and what was built along the way.
    pub fn tick(&mut self, world: &mut World, frustum: &ViewFrustum) -> FrameReport {
        let mut report = FrameReport::default();
        let mut candidate: Option<(usize, f32)> = None;

        for index in 0..world.chunks().len() {
            let chunk = world.chunk(index);
            let distance = match frustum.classify(&chunk.model_matrix()) {
                ChunkVisibility::Visible { distance } => distance,
                ChunkVisibility::BehindCamera | ChunkVisibility::OffScreen => {
                    report.culled += 1;
                    continue;
                }
            };
            report.visible += 1;

            if !chunk.is_initialized() {
                if candidate.map_or(true, |(_, nearest)| distance < nearest) {
                    candidate = Some((index, distance));
                }
                continue;
            }

            if self.mesh_builder.refresh(world, index) {
                report.meshes_rebuilt += 1;
            }

            let chunk = world.chunk(index);
            report.draws.push(ChunkDraw {
                index,
                position: chunk.position(),
                model: chunk.model_matrix(),
                vertex_count: chunk.element_count(),
            });
        }

        if let Some((index, distance)) = candidate {
            if world.initialize_chunk(index) {
                let position = world.chunk(index).position();
                self.initialized += 1;
                report.initialized = Some(position);
                debug!("Streaming initialized chunk {:?} at distance {:.1}", position, distance);
            }
        }

        self.ticks += 1;
        if self.ticks % 600 == 0 {
            info!(
                "Streaming: {} ticks, {} of {} chunks initialized",
                self.ticks,
                self.initialized,
                world.chunks().len()
            );
        }

        report
    }

    /// Number of chunks this scheduler has initialized.
    pub fn initialized_count(&self) -> usize {
        self.initialized
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mesh statistics collected while refreshing chunks.
    pub fn mesh_stats(&self) -> MeshStats {
        self.mesh_builder.stats()
    }
}
