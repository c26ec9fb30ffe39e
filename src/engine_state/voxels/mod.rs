//! # Voxel Data
//!
//! Everything needed to represent and edit a block world, independent of how it
//! is drawn.
//!
//! ## Architecture
//!
//! * **Block**: the block catalog, faces and per-type rendering properties
//! * **Chunk**: fixed-size 3D arrays of blocks with neighbor links and state flags
//! * **Terrain**: seeded procedural generation of chunk contents
//! * **World**: the chunk grid and global block access across chunk boundaries
//!
//! ## Data Flow
//!
//! 1. The world receives a block read or write in global coordinates
//! 2. It resolves the owning chunk and local position
//! 3. Writes mark the chunk, and any neighbor sharing the touched face, dirty
//! 4. Dirty chunks are re-meshed the next time they are drawn

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
