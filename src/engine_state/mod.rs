//! # Engine State Module
//!
//! The core engine module that owns everything one frame needs.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera, projection, held keys and block targeting
//! * `rendering` - Mesh data, the culling mesher and the texture atlas
//! * `streaming` - Per-frame visibility and incremental initialization
//! * `voxels` - Blocks, chunks, terrain generation and the world grid
//!
//! ## Architecture
//!
//! `EngineState` is owned by the top-level loop. Each frame the loop calls
//! [`EngineState::update`] with the elapsed time and then [`EngineState::frame`],
//! which hands the resulting [`FrameReport`] to whoever draws. There is no
//! global state; input collaborators write into `simulation` directly.

use log::info;
use web_time::Duration;

use camera_state::SimulationState;
use rendering::atlas::TextureAtlas;
use streaming::{FrameReport, StreamingScheduler};
use voxels::world::World;

use crate::{config::EngineConfig, error::Result};

pub mod camera_state;
pub mod rendering;
pub mod streaming;
pub mod voxels;

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use blockworld::{config::EngineConfig, engine_state::EngineState};
/// use web_time::Duration;
///
/// let config = EngineConfig::from_json_str(r#"{ "world": { "seed": 3, "size": [4, 2, 4] } }"#).unwrap();
/// let mut engine = EngineState::new(&config).unwrap();
///
/// engine.update(Duration::from_millis(16));
/// let report = engine.frame();
/// assert!(report.initialized.is_some());
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// Camera, controls, build type and target
    pub simulation: SimulationState,
    /// Decides what to initialize and draw each frame
    scheduler: StreamingScheduler,
    /// Decoded texture atlas, when one was configured
    atlas: Option<TextureAtlas>,
}

impl EngineState {
    /// Creates a new engine state from configuration.
    ///
    /// # Errors
    /// Invalid configuration, or an atlas that cannot be read or does not
    /// cover the block catalog.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let atlas = match &config.atlas_path {
            Some(path) => Some(TextureAtlas::load(path)?),
            None => None,
        };

        let world = World::new(&config.world)?;
        let simulation = SimulationState::new(&config.view, world.size(), config.build_type()?);

        info!(
            "Engine ready: camera at {:?}, build type {}",
            simulation.camera.position,
            simulation.build_type()
        );

        Ok(EngineState {
            world,
            simulation,
            scheduler: StreamingScheduler::new(),
            atlas,
        })
    }

    /// Advances the simulation by `dt`.
    pub fn update(&mut self, dt: Duration) {
        self.simulation.update(dt);
    }

    /// Runs one streaming pass with the current camera.
    pub fn frame(&mut self) -> FrameReport {
        let frustum = self.simulation.frustum();
        self.scheduler.tick(&mut self.world, &frustum)
    }

    /// Adapts the projection to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.simulation.resize(width, height);
    }

    /// The streaming scheduler, for statistics.
    pub fn scheduler(&self) -> &StreamingScheduler {
        &self.scheduler
    }

    /// The texture atlas, if one was loaded.
    pub fn atlas(&self) -> Option<&TextureAtlas> {
        self.atlas.as_ref()
    }
}
