use cgmath::Point3;
use fastrand::Rng;

use crate::engine_state::voxels::{block::block_type::BlockType, chunk::neighborhood::ChunkViewMut};

/// Shortest possible trunk, in blocks.
const TRUNK_MIN: i32 = 3;
/// Tallest possible trunk, in blocks.
const TRUNK_MAX: i32 = 6;
/// Half-extent of the cube searched for leaf cells.
const CANOPY_REACH: i32 = 3;
/// Squared radius of the canopy before the per-cell random bump.
const CANOPY_RADIUS_SQUARED: i32 = 8;

/// Grows a tree whose trunk starts at the chunk-local cell `base`.
///
/// The trunk overwrites whatever is in its way; leaves only go into air. Cells
/// beyond the chunk land in its neighbors or are dropped at the world edge.
pub(super) fn plant(view: &mut ChunkViewMut, rng: &mut Rng, base: Point3<i32>) {
    let wood = BlockType::WOOD.as_int();
    let leaves = BlockType::LEAVES.as_int();
    let air = BlockType::AIR.as_int();

    let trunk = rng.i32(TRUNK_MIN..=TRUNK_MAX);
    for i in 0..trunk {
        view.set(base.x, base.y + i, base.z, wood);
    }

    let top = base.y + trunk;
    for dx in -CANOPY_REACH..=CANOPY_REACH {
        for dy in -CANOPY_REACH..=CANOPY_REACH {
            for dz in -CANOPY_REACH..=CANOPY_REACH {
                let radius = CANOPY_RADIUS_SQUARED + rng.bool() as i32;
                if dx * dx + dy * dy + dz * dz >= radius {
                    continue;
                }
                let (x, y, z) = (base.x + dx, top + dy, base.z + dz);
                if view.get(x, y, z) == air {
                    view.set(x, y, z, leaves);
                }
            }
        }
    }
}
