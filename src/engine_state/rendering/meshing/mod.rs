//! Mesh generation and management for voxel rendering.
//!
//! This module owns the policy around the mesher: a chunk's cached mesh is
//! rebuilt in full whenever its dirty flag is observed set, and left alone
//! otherwise.
//!
//! # Architecture
//! - `MeshBuilder`: Lazy rebuild entry point, keeps running statistics
//! - `mesh/`: The mesh data structures and the culling mesher itself

use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{chunk::neighborhood::ChunkView, world::World};

/// Core mesh data structures and the visibility-culling mesher.
pub mod mesh;

pub use mesh::Mesh;

/// Running totals collected by a [`MeshBuilder`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Number of meshes built
    pub meshes_built: u64,
    /// Number of vertices emitted across all builds
    pub vertices_emitted: u64,
    /// Number of builds that produced no geometry
    pub empty_meshes: u64,
}

/// Builds chunk meshes and stores them back into their chunks.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    stats: MeshStats,
}

impl MeshBuilder {
    /// Creates a new builder with zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mesh for the chunk at the centre of `view`.
    ///
    /// Pure with respect to block data: building an unchanged chunk twice
    /// yields identical streams.
    pub fn build(&mut self, view: &ChunkView) -> Mesh {
        let mesh = mesh::culled(view);

        self.stats.meshes_built += 1;
        self.stats.vertices_emitted += mesh.len() as u64;
        if mesh.is_empty() {
            self.stats.empty_meshes += 1;
        }

        mesh
    }

    /// Rebuilds the mesh of `world.chunk(index)` if it is dirty.
    ///
    /// # Arguments
    /// * `world` - The world owning the chunk
    /// * `index` - The chunk's index in the world's chunk array
    ///
    /// # Returns
    /// `true` if a rebuild happened. The chunk's dirty flag is clear afterwards.
    pub fn refresh(&mut self, world: &mut World, index: usize) -> bool {
        if !world.chunk(index).is_dirty() {
            return false;
        }

        let start = Instant::now();
        let mesh = self.build(&world.view(index));
        let vertices = mesh.len();
        let chunk = world.chunk_mut(index);
        chunk.store_mesh(mesh);

        debug!(
            "Rebuilt mesh for chunk {:?} ({} vertices) in {:?}",
            chunk.position(),
            vertices,
            start.elapsed()
        );

        true
    }

    /// Returns the statistics collected so far.
    pub fn stats(&self) -> MeshStats {
        self.stats
    }
}
