//! # Chunk Neighborhood Module
//!
//! Boundary-crossing block access for chunks stored in a flat array.
//!
//! Chunk-local coordinates handed to these views may lie up to one chunk extent
//! outside `[0, extent)` on any axis. Such coordinates are resolved by following
//! the chunk's neighbor links, one axis at a time, and wrapping the coordinate
//! back into the neighbor's local range. A missing neighbor reads as air and
//! swallows writes.

use cgmath::Point3;
use log::debug;

use super::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::engine_state::voxels::block::{
    block_side::BlockSide, block_type::BlockType, is_face_hidden, BlockTypeSize,
};

/// Wraps a local coordinate that overflowed by one chunk back into `[0, extent)`.
///
/// Extents do not need to be powers of two.
#[inline]
pub fn wrap_local(value: i32, extent: i32) -> i32 {
    value.rem_euclid(extent)
}

/// Returns the first face (in x, y, z order) the coordinate lies beyond.
fn crossing(p: Point3<i32>) -> Option<BlockSide> {
    if p.x < 0 {
        Some(BlockSide::LEFT)
    } else if p.x >= CHUNK_WIDTH {
        Some(BlockSide::RIGHT)
    } else if p.y < 0 {
        Some(BlockSide::BOTTOM)
    } else if p.y >= CHUNK_HEIGHT {
        Some(BlockSide::TOP)
    } else if p.z < 0 {
        Some(BlockSide::FRONT)
    } else if p.z >= CHUNK_DEPTH {
        Some(BlockSide::BACK)
    } else {
        None
    }
}

/// Resolves possibly out-of-range local coordinates to a chunk index and an
/// in-range local position.
///
/// Returns `None` when the coordinate is more than one chunk away on some axis
/// or when a neighbor on the way is absent.
pub(crate) fn locate(
    chunks: &[Chunk],
    index: usize,
    x: i32,
    y: i32,
    z: i32,
) -> Option<(usize, Point3<usize>)> {
    if !(-CHUNK_WIDTH..2 * CHUNK_WIDTH).contains(&x)
        || !(-CHUNK_HEIGHT..2 * CHUNK_HEIGHT).contains(&y)
        || !(-CHUNK_DEPTH..2 * CHUNK_DEPTH).contains(&z)
    {
        return None;
    }

    let mut current = index;
    let mut p = Point3::new(x, y, z);

    while let Some(side) = crossing(p) {
        current = chunks[current].neighbors().get(side)?;
        match side {
            BlockSide::LEFT | BlockSide::RIGHT => p.x = wrap_local(p.x, CHUNK_WIDTH),
            BlockSide::BOTTOM | BlockSide::TOP => p.y = wrap_local(p.y, CHUNK_HEIGHT),
            BlockSide::FRONT | BlockSide::BACK => p.z = wrap_local(p.z, CHUNK_DEPTH),
        }
    }

    Some((current, Point3::new(p.x as usize, p.y as usize, p.z as usize)))
}

/// Writes one in-range block and marks every chunk whose mesh depends on it dirty.
///
/// Blocks on a chunk face are visible to the neighbor across that face, so the
/// neighbor's mesh goes stale too.
///
/// Values outside the block catalog are dropped.
pub(crate) fn write_block(chunks: &mut [Chunk], index: usize, p: Point3<usize>, btype: BlockTypeSize) {
    if BlockType::from_int(btype).is_none() {
        debug!("Ignoring write of unknown block type {} at {:?}", btype, p);
        return;
    }

    chunks[index].set_local(p.x, p.y, p.z, btype);

    let neighbors = *chunks[index].neighbors();
    let touched = [
        (p.x == 0, neighbors.left),
        (p.x == CHUNK_WIDTH as usize - 1, neighbors.right),
        (p.y == 0, neighbors.below),
        (p.y == CHUNK_HEIGHT as usize - 1, neighbors.above),
        (p.z == 0, neighbors.front),
        (p.z == CHUNK_DEPTH as usize - 1, neighbors.back),
    ];

    for (on_face, neighbor) in touched {
        if let (true, Some(neighbor)) = (on_face, neighbor) {
            chunks[neighbor].mark_dirty();
        }
    }
}

/// Read-only access to one chunk and, through its links, its neighbors.
#[derive(Clone, Copy)]
pub struct ChunkView<'a> {
    chunks: &'a [Chunk],
    index: usize,
}

impl<'a> ChunkView<'a> {
    /// Creates a view of `chunks[index]`.
    pub fn new(chunks: &'a [Chunk], index: usize) -> Self {
        ChunkView { chunks, index }
    }

    /// The chunk this view is centered on.
    pub fn chunk(&self) -> &'a Chunk {
        &self.chunks[self.index]
    }

    /// Gets the block at chunk-local coordinates, following neighbor links for
    /// coordinates up to one chunk outside. Absent neighbors read as air.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        match locate(self.chunks, self.index, x, y, z) {
            Some((index, p)) => self.chunks[index].get_local(p.x, p.y, p.z),
            None => BlockType::AIR.as_int(),
        }
    }

    /// Checks whether the face between the in-range block at `(x1, y1, z1)` and the
    /// block sampled at `(x2, y2, z2)` is hidden.
    ///
    /// This is the visibility predicate of the mesher, not a general occlusion query.
    pub fn is_blocked(&self, x1: usize, y1: usize, z1: usize, x2: i32, y2: i32, z2: i32) -> bool {
        is_face_hidden(self.chunk().get_local(x1, y1, z1), self.get(x2, y2, z2))
    }
}

/// Mutable access to one chunk and, through its links, its neighbors.
pub struct ChunkViewMut<'a> {
    chunks: &'a mut [Chunk],
    index: usize,
}

impl<'a> ChunkViewMut<'a> {
    /// Creates a mutable view of `chunks[index]`.
    pub fn new(chunks: &'a mut [Chunk], index: usize) -> Self {
        ChunkViewMut { chunks, index }
    }

    /// The chunk this view is centered on.
    pub fn chunk(&self) -> &Chunk {
        &self.chunks[self.index]
    }

    /// The chunk this view is centered on.
    pub fn chunk_mut(&mut self) -> &mut Chunk {
        &mut self.chunks[self.index]
    }

    /// Same contract as [`ChunkView::get`].
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockTypeSize {
        ChunkView::new(self.chunks, self.index).get(x, y, z)
    }

    /// Writes a block at chunk-local coordinates.
    ///
    /// Out-of-range coordinates are delegated to the neighbor across that face and
    /// are silently dropped at the edge of the world. The owning chunk is marked
    /// dirty, and so is any neighbor touching the written block.
    pub fn set(&mut self, x: i32, y: i32, z: i32, btype: BlockTypeSize) {
        if let Some((index, p)) = locate(self.chunks, self.index, x, y, z) {
            write_block(self.chunks, index, p, btype);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::Neighbors;

    const STONE: BlockTypeSize = BlockType::STONE as BlockTypeSize;
    const GLASS: BlockTypeSize = BlockType::GLASS as BlockTypeSize;

    /// Two chunks side by side along X.
    fn pair() -> Vec<Chunk> {
        vec![
            Chunk::empty(
                Point3::new(0, 0, 0),
                Neighbors { right: Some(1), ..Default::default() },
            ),
            Chunk::empty(
                Point3::new(1, 0, 0),
                Neighbors { left: Some(0), ..Default::default() },
            ),
        ]
    }

    #[test]
    fn wrap_local_is_euclidean() {
        assert_eq!(wrap_local(-1, CHUNK_WIDTH), CHUNK_WIDTH - 1);
        assert_eq!(wrap_local(CHUNK_HEIGHT, CHUNK_HEIGHT), 0);
        assert_eq!(wrap_local(5, CHUNK_DEPTH), 5);
    }

    #[test]
    fn get_crosses_into_present_neighbor() {
        let mut chunks = pair();
        chunks[1].set_local(0, 7, 3, STONE);
        let view = ChunkView::new(&chunks, 0);
        assert_eq!(view.get(CHUNK_WIDTH, 7, 3), STONE);
        let back = ChunkView::new(&chunks, 1);
        assert_eq!(back.get(-CHUNK_WIDTH, 7, 3), chunks[0].get_local(0, 7, 3));
    }

    #[test]
    fn absent_neighbor_reads_air_and_drops_writes() {
        let mut chunks = pair();
        let mut view = ChunkViewMut::new(&mut chunks, 0);
        view.set(-1, 0, 0, STONE);
        assert_eq!(view.get(-1, 0, 0), BlockType::AIR.as_int());
        assert_eq!(view.get(0, -1, 0), BlockType::AIR.as_int());
        assert!(chunks.iter().all(|c| c.is_all_air()));
    }

    #[test]
    fn too_far_is_absent() {
        let mut chunks = pair();
        chunks[1].fill(STONE);
        let view = ChunkView::new(&chunks, 0);
        assert_eq!(view.get(2 * CHUNK_WIDTH, 0, 0), BlockType::AIR.as_int());
    }

    #[test]
    fn boundary_write_dirties_neighbor() {
        let mut chunks = pair();
        for chunk in chunks.iter_mut() {
            chunk.store_mesh(Default::default());
        }
        ChunkViewMut::new(&mut chunks, 0).set(CHUNK_WIDTH - 1, 0, 0, GLASS);
        assert!(chunks[0].is_dirty());
        assert!(chunks[1].is_dirty());

        for chunk in chunks.iter_mut() {
            chunk.store_mesh(Default::default());
        }
        ChunkViewMut::new(&mut chunks, 0).set(3, 0, 0, GLASS);
        assert!(chunks[0].is_dirty());
        assert!(!chunks[1].is_dirty());
    }

    #[test]
    fn unknown_block_types_are_not_written() {
        let mut chunks = pair();
        for chunk in chunks.iter_mut() {
            chunk.store_mesh(Default::default());
        }
        ChunkViewMut::new(&mut chunks, 0).set(CHUNK_WIDTH - 1, 2, 2, 200);
        assert!(chunks.iter().all(|c| c.is_all_air() && !c.is_dirty()));
    }

    #[test]
    fn delegated_write_lands_in_neighbor() {
        let mut chunks = pair();
        ChunkViewMut::new(&mut chunks, 0).set(CHUNK_WIDTH + 2, 1, 1, GLASS);
        assert_eq!(chunks[1].get_local(2, 1, 1), GLASS);
        assert!(chunks[0].is_all_air());
    }

    #[test]
    fn is_blocked_reads_across_boundary() {
        let mut chunks = pair();
        chunks[0].set_local(CHUNK_WIDTH as usize - 1, 0, 0, STONE);
        assert!(!ChunkView::new(&chunks, 0).is_blocked(15, 0, 0, 16, 0, 0));
        chunks[1].set_local(0, 0, 0, STONE);
        assert!(ChunkView::new(&chunks, 0).is_blocked(15, 0, 0, 16, 0, 0));
    }
}
