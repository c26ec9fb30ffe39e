//! Rendering data for the voxel engine.
//!
//! This module produces what a GPU collaborator needs to draw the world: packed
//! vertex attributes, per-chunk meshes and the texture atlas. It never talks to
//! a graphics API itself.

pub mod atlas;
pub mod meshing;
pub mod vertex;

// Re-export commonly used types
pub use atlas::TextureAtlas;
pub use vertex::ByteVec3;
