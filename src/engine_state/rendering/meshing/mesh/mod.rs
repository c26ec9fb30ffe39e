//! Mesh generation for voxel rendering.
//!
//! This module converts chunk block data into GPU-friendly triangle soups.
//!
//! # Architecture
//! - [`Mesh`]: Parallel position, normal and texture coordinate streams
//! - [`Face`]: A single visible block face and its vertex tables
//! - [`culled`]: The visibility-culling mesher
//!
//! # Usage
//! ```
//! use blockworld::engine_state::{
//!     rendering::meshing::mesh::culled,
//!     voxels::chunk::{neighborhood::ChunkView, Chunk, Neighbors},
//! };
//! use cgmath::Point3;
//!
//! let chunks = vec![Chunk::empty(Point3::new(0, 0, 0), Neighbors::default())];
//! let mesh = culled(&ChunkView::new(&chunks, 0));
//! assert!(mesh.is_empty());
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::culled;
pub use face::{Face, QUAD_CORNERS, QUAD_UVS};
pub use mesh::*;
