use blockworld::{
    config::WorldConfig,
    engine_state::{
        streaming::{ChunkVisibility, StreamingScheduler, ViewFrustum},
        voxels::{block::block_type::BlockType, world::World},
    },
};
use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

/// A 4x2x4 world: blocks span [-32, 32) on every axis.
fn world() -> World {
    World::new(&WorldConfig {
        seed: Some(11),
        size: [4, 2, 4],
        sea_level: 4,
    })
    .unwrap()
}

fn looking_down_negative_z(eye: Point3<f32>) -> ViewFrustum {
    let view = Matrix4::look_at_rh(eye, eye + Vector3::new(0.0, 0.0, -1.0), Vector3::unit_y());
    ViewFrustum::new(&view, &perspective(Deg(45.0), 1.0, 0.01, 1000.0))
}

#[test]
fn at_most_one_chunk_per_tick() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 80.0));

    let mut previous = 0;
    for _ in 0..10 {
        scheduler.tick(&mut world, &frustum);
        let now = world.chunks().iter().filter(|c| c.is_initialized()).count();
        assert!(now - previous <= 1);
        previous = now;
    }
    assert_eq!(scheduler.initialized_count(), previous);
}

#[test]
fn nearest_chunk_goes_first() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 80.0));

    let report = scheduler.tick(&mut world, &frustum);
    let first = report.initialized.unwrap();
    // Four chunks at z = 1 tie on distance; the first in grid order wins.
    assert_eq!(first, Point3::new(-1, -1, 1));
    assert!(report.draws.is_empty());

    // The chunk just initialized is drawn from the next tick on.
    let report = scheduler.tick(&mut world, &frustum);
    assert_eq!(report.draws.len(), 1);
    assert_eq!(report.draws[0].position, first);
    assert_eq!(report.meshes_rebuilt, 1);
}

#[test]
fn same_view_same_initialization_order() {
    let frustum = looking_down_negative_z(Point3::new(3.0, 5.0, 70.0));
    let order = || {
        let mut world = world();
        let mut scheduler = StreamingScheduler::new();
        (0..12)
            .map(|_| scheduler.tick(&mut world, &frustum).initialized)
            .collect::<Vec<_>>()
    };

    let first = order();
    assert!(first.iter().all(Option::is_some));
    assert_eq!(first, order());
}

#[test]
fn chosen_chunk_is_the_first_nearest_candidate() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 80.0));

    for _ in 0..8 {
        let candidates: Vec<(Point3<i32>, f32)> = world
            .chunks()
            .iter()
            .filter(|chunk| !chunk.is_initialized())
            .filter_map(|chunk| match frustum.classify(&chunk.model_matrix()) {
                ChunkVisibility::Visible { distance } => Some((chunk.position(), distance)),
                _ => None,
            })
            .collect();
        let nearest = candidates
            .iter()
            .map(|(_, distance)| *distance)
            .fold(f32::INFINITY, f32::min);
        let expected = candidates
            .iter()
            .find(|(_, distance)| *distance == nearest)
            .map(|(position, _)| *position);

        let chosen = scheduler.tick(&mut world, &frustum).initialized;
        assert_eq!(chosen, expected);
    }
}

#[test]
fn visibility_matches_the_report_counts() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 0.0));

    let visible = world
        .chunks()
        .iter()
        .filter(|chunk| frustum.classify(&chunk.model_matrix()).is_visible())
        .count();
    let report = scheduler.tick(&mut world, &frustum);
    assert_eq!(report.visible, visible);
    assert_eq!(report.culled, world.chunks().len() - visible);
}

#[test]
fn chunks_behind_the_camera_are_never_touched() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 0.0));

    let first = scheduler.tick(&mut world, &frustum);
    assert_eq!(first.culled, 8);
    assert_eq!(first.visible, 24);

    for _ in 0..100 {
        if scheduler.tick(&mut world, &frustum).initialized.is_none() {
            break;
        }
    }

    for chunk in world.chunks() {
        assert_eq!(chunk.is_initialized(), chunk.position().z < 1);
    }

    let report = scheduler.tick(&mut world, &frustum);
    assert_eq!(report.initialized, None);
    assert_eq!(report.draws.len(), 24);
    assert!(report.draws.iter().all(|draw| draw.position.z < 1));
}

#[test]
fn only_dirty_chunks_are_rebuilt() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 80.0));

    for _ in 0..40 {
        scheduler.tick(&mut world, &frustum);
    }
    let settled = scheduler.tick(&mut world, &frustum);
    assert_eq!(settled.initialized, None);
    assert_eq!(settled.meshes_rebuilt, 0);

    world.set(5, 5, 5, BlockType::BRICK.as_int());
    let edited = scheduler.tick(&mut world, &frustum);
    assert_eq!(edited.meshes_rebuilt, 1);
    assert_eq!(scheduler.tick(&mut world, &frustum).meshes_rebuilt, 0);
}

#[test]
fn draw_report_carries_model_transforms() {
    let mut world = world();
    let mut scheduler = StreamingScheduler::new();
    let frustum = looking_down_negative_z(Point3::new(0.0, 0.0, 80.0));

    scheduler.tick(&mut world, &frustum);
    let report = scheduler.tick(&mut world, &frustum);
    let draw = &report.draws[0];
    let origin = draw.model * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_eq!(origin.x, (draw.position.x * 16) as f32);
    assert_eq!(origin.y, (draw.position.y * 32) as f32);
    assert_eq!(origin.z, (draw.position.z * 16) as f32);
    assert_eq!(draw.has_geometry(), draw.vertex_count > 0);
    assert_eq!(
        report.draws_with_geometry().count(),
        report.draws.iter().filter(|draw| draw.vertex_count > 0).count()
    );
}
