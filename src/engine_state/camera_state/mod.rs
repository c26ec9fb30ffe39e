//! # Camera State Management
//!
//! This module handles the per-frame simulation state owned by the top-level
//! loop:
//! - Camera position and orientation
//! - View and projection matrices, and the frustum built from them
//! - Held movement keys
//! - The block type used for building and the block currently targeted
//!
//! ## Targeting
//! The rendering collaborator reads back the depth under the screen centre and
//! unprojects it to a world-space hit point. [`target_from_hit`] turns that
//! point into a block and face with a cheap heuristic: the axis whose
//! coordinate is closest to a whole number is taken as the face normal (ties
//! go to x, then y, then z). This is not an exact ray cast.

use cgmath::{Point3, Rad, Vector3};
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

use super::{
    streaming::ViewFrustum,
    voxels::{
        block::{
            block_side::BlockSide,
            block_type::{BlockType, BLOCK_TYPE_COUNT},
            BlockTypeSize,
        },
        chunk::{CHUNK_HEIGHT, CHUNK_WIDTH},
        world::World,
    },
};
use crate::config::{CameraPreset, ViewConfig};

pub mod camera;

use camera::{Camera, Controls, Projection};

/// A targeted block and the face the camera is looking at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Global block coordinate of the targeted block
    pub block: Point3<i32>,
    /// The face of that block under the crosshair
    pub face: BlockSide,
}

impl Target {
    /// The cell in front of the targeted face, where a new block would go.
    pub fn adjacent(&self) -> Point3<i32> {
        self.block + self.face.offset()
    }
}

/// Derives the targeted block and face from a world-space hit point.
///
/// # Arguments
/// * `hit` - The unprojected point under the screen centre
/// * `look` - The camera's viewing direction
pub fn target_from_hit(hit: Point3<f32>, look: Vector3<f32>) -> Target {
    let to_grid = |v: f32| (v - v.round()).abs();
    let (dx, dy, dz) = (to_grid(hit.x), to_grid(hit.y), to_grid(hit.z));

    let mut block = Point3::new(hit.x.floor() as i32, hit.y.floor() as i32, hit.z.floor() as i32);

    let face = if dx <= dy && dx <= dz {
        let (cell, face) = across_boundary(hit.x, look.x, BlockSide::RIGHT, BlockSide::LEFT);
        block.x = cell;
        face
    } else if dy <= dz {
        let (cell, face) = across_boundary(hit.y, look.y, BlockSide::TOP, BlockSide::BOTTOM);
        block.y = cell;
        face
    } else {
        let (cell, face) = across_boundary(hit.z, look.z, BlockSide::BACK, BlockSide::FRONT);
        block.z = cell;
        face
    };

    Target { block, face }
}

/// Picks the cell on the far side of the boundary nearest to `coordinate`.
fn across_boundary(coordinate: f32, look: f32, positive: BlockSide, negative: BlockSide) -> (i32, BlockSide) {
    let boundary = coordinate.round() as i32;
    if look < 0.0 {
        (boundary - 1, positive)
    } else {
        (boundary, negative)
    }
}

/// Explicit per-frame simulation state.
///
/// Owned by the top-level loop and threaded through each update; nothing here
/// is global.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The player camera
    pub camera: Camera,
    /// The perspective projection
    pub projection: Projection,
    /// Held movement keys
    pub controls: Controls,
    build_type: BlockTypeSize,
    target: Option<Target>,
}

impl SimulationState {
    const BUILD_TYPE_MASK: BlockTypeSize = (BLOCK_TYPE_COUNT - 1) as BlockTypeSize;

    /// Creates the simulation state from view settings.
    ///
    /// # Arguments
    /// * `view` - Viewport size and starting preset
    /// * `world_size` - World size in chunks, used by the overview preset
    /// * `build_type` - Initial block type for placing
    pub fn new(view: &ViewConfig, world_size: Vector3<i32>, build_type: BlockTypeSize) -> Self {
        let mut state = SimulationState {
            camera: Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0)),
            projection: Projection::standard(view.width, view.height),
            controls: Controls::default(),
            build_type: build_type & Self::BUILD_TYPE_MASK,
            target: None,
        };
        state.apply_preset(view.preset, world_size);
        state
    }

    /// Moves the camera to a named viewpoint.
    pub fn apply_preset(&mut self, preset: CameraPreset, world_size: Vector3<i32>) {
        match preset {
            CameraPreset::Spawn => {
                self.camera.position = Point3::new(0.0, (CHUNK_HEIGHT + 1) as f32, 0.0);
                self.camera.set_angles(Rad(0.0), Rad(-0.5));
            }
            CameraPreset::Overview => {
                self.camera.position = Point3::new(0.0, (CHUNK_WIDTH * world_size.x) as f32, 0.0);
                self.camera.set_angles(Rad(0.0), Rad(-FRAC_PI_2));
            }
        }
    }

    /// Advances the camera by `dt` using the held keys.
    pub fn update(&mut self, dt: Duration) {
        self.camera.advance(&self.controls, dt);
    }

    /// Applies a mouse movement in pixels.
    pub fn mouse_moved(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.rotate(delta_x, delta_y);
    }

    /// Cycles the build type: down for negative scroll, up otherwise, wrapping within the catalog.
    pub fn scroll(&mut self, delta: f32) {
        let next = if delta < 0.0 {
            self.build_type.wrapping_sub(1)
        } else {
            self.build_type.wrapping_add(1)
        };
        self.build_type = next & Self::BUILD_TYPE_MASK;
    }

    /// The block type placed by [`SimulationState::place`].
    pub fn build_type(&self) -> BlockTypeSize {
        self.build_type
    }

    /// Adapts the projection to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// This frame's view-projection test.
    pub fn frustum(&self) -> ViewFrustum {
        ViewFrustum::new(&self.camera.calc_matrix(), &self.projection.calc_matrix())
    }

    /// Updates the target from the point under the crosshair, or clears it.
    pub fn aim(&mut self, hit: Option<Point3<f32>>) {
        self.target = hit.map(|hit| target_from_hit(hit, self.camera.lookat()));
    }

    /// The currently targeted block, if any.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Places the build type in front of the targeted face.
    ///
    /// # Returns
    /// `false` when nothing is targeted.
    pub fn place(&self, world: &mut World) -> bool {
        match self.target {
            Some(target) => {
                let cell = target.adjacent();
                world.set(cell.x, cell.y, cell.z, self.build_type);
                true
            }
            None => false,
        }
    }

    /// Clears the targeted block to air.
    ///
    /// # Returns
    /// `false` when nothing is targeted.
    pub fn remove(&self, world: &mut World) -> bool {
        match self.target {
            Some(target) => {
                world.set(target.block.x, target.block.y, target.block.z, BlockType::AIR.as_int());
                true
            }
            None => false,
        }
    }
}
