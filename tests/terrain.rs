use blockworld::{
    config::WorldConfig,
    engine_state::{
        rendering::meshing::MeshBuilder,
        voxels::{
            block::block_type::{BlockType, BLOCK_TYPE_COUNT},
            chunk::ChunkState,
            terrain::TerrainGenerator,
            world::World,
        },
    },
};
use cgmath::Point3;
use proptest::prelude::*;

fn world(seed: u32) -> World {
    World::new(&WorldConfig {
        seed: Some(seed),
        size: [4, 2, 4],
        sea_level: 4,
    })
    .unwrap()
}

#[test]
fn same_seed_same_world() {
    let mut a = world(2024);
    let mut b = world(2024);

    for index in 0..a.chunks().len() {
        assert!(a.initialize_chunk(index) || a.chunk(index).is_initialized());
        assert!(b.initialize_chunk(index) || b.chunk(index).is_initialized());
    }

    for (left, right) in a.chunks().iter().zip(b.chunks()) {
        assert_eq!(left.blocks(), right.blocks());
    }
}

#[test]
fn generation_order_does_not_change_column_contents() {
    let generator = TerrainGenerator::new(77, 4);
    let alone = generator.generate_isolated(Point3::new(0, -1, 0));

    let mut world = world(77);
    let index = world.chunk_index_at(Point3::new(0, -1, 0)).unwrap();
    world.generate_chunk(index);

    // The chunk below ground level has no trees, so nothing spills into it.
    assert_eq!(world.chunk(index).blocks(), alone.as_slice());
}

#[test]
fn every_block_is_in_the_catalog() {
    let mut world = world(31337);
    for index in 0..world.chunks().len() {
        world.generate_chunk(index);
    }
    for chunk in world.chunks() {
        assert!(chunk.blocks().iter().all(|&b| (b as usize) < BLOCK_TYPE_COUNT));
    }
}

#[test]
fn chunks_are_generated_at_most_once() {
    let mut world = world(8);
    let index = world.chunk_index_at(Point3::new(0, 0, 0)).unwrap();

    assert!(world.generate_chunk(index));
    world.set(0, 31, 0, BlockType::MARKER.as_int());
    assert!(!world.generate_chunk(index));
    assert_eq!(world.get(0, 31, 0), BlockType::MARKER.as_int());
    assert_eq!(world.chunk(index).state(), ChunkState::Generated);
}

#[test]
fn generation_dirties_neighbors() {
    let mut world = world(8);
    let mut builder = MeshBuilder::new();
    for index in 0..world.chunks().len() {
        builder.refresh(&mut world, index);
    }

    let index = world.chunk_index_at(Point3::new(0, 0, 0)).unwrap();
    world.generate_chunk(index);

    for neighbor in world.chunk(index).neighbors().iter() {
        assert!(world.chunk(neighbor).is_dirty());
    }
}

#[test]
fn water_fills_up_to_sea_level() {
    let mut world = world(4242);
    for index in 0..world.chunks().len() {
        world.generate_chunk(index);
    }

    let sea_level = world.terrain().sea_level();
    for x in -32..32 {
        for z in -32..32 {
            let (_, height) = world.terrain().column_height(x, z);
            for y in height..sea_level {
                if (-32..32).contains(&y) {
                    let block = world.get(x, y, z);
                    assert!(
                        block == BlockType::WATER.as_int() || block == BlockType::WOOD.as_int(),
                        "unexpected block {block} at ({x}, {y}, {z})"
                    );
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // heights and material noise are pure functions of seed and position
    #[test]
    fn noise_is_deterministic(seed in any::<u32>(), x in -4096i32..4096, y in -64i32..64, z in -4096i32..4096) {
        let a = TerrainGenerator::new(seed, 4);
        let b = TerrainGenerator::new(seed, 4);
        let (na, ha) = a.column_height(x, z);
        let (nb, hb) = b.column_height(x, z);
        prop_assert!(na.is_finite());
        prop_assert_eq!(na, nb);
        prop_assert_eq!(ha, hb);
        prop_assert_eq!(a.material_noise(x, y, z), b.material_noise(x, y, z));
    }
}
