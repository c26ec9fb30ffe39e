#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Blockworld
//!
//! A chunked voxel world: block storage, procedural terrain, visibility-culled
//! meshing and a frame-bounded streaming scheduler.
//!
//! The crate produces everything a renderer needs (per-chunk vertex streams,
//! model transforms, a validated texture atlas) without depending on a graphics
//! API. Drawing, windowing and input are left to the embedding application.
//!
//! ## Key Modules
//!
//! * `config` - JSON configuration with defaults for every field
//! * `engine_state` - The world, meshing, streaming and camera simulation
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = blockworld::run(None) {
//!         eprintln!("{err}");
//!     }
//! }
//! ```
//!
//! ## Performance Considerations
//!
//! * At most one chunk is initialized per frame
//! * Meshes are only rebuilt for visible chunks whose blocks changed
//! * Mesh attributes are plain bytes, ready for a direct buffer upload

use std::path::Path;

use log::info;
use web_time::{Duration, Instant};

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::EngineConfig;
pub use engine_state::EngineState;
pub use error::{EngineError, Result};

/// Simulated time step of the headless runner.
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Horizontal mouse movement, in pixels, applied every simulated frame.
const ORBIT_PIXELS_PER_FRAME: f32 = 2.0;

/// Runs the engine headless for the configured number of frames.
///
/// Initializes logging, loads configuration from `config_path` (or uses the
/// defaults), then streams the world while slowly turning the camera.
///
/// # Errors
/// Anything [`EngineConfig::load`] or [`EngineState::new`] reports.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut engine = EngineState::new(&config)?;
    let start = Instant::now();
    let mut drawn_vertices = 0;
    let mut draw_calls = 0;

    for _ in 0..config.frames {
        engine.simulation.mouse_moved(ORBIT_PIXELS_PER_FRAME, 0.0);
        engine.update(FRAME_TIME);
        let report = engine.frame();
        drawn_vertices = report.vertex_count();
        draw_calls = report.draws_with_geometry().count();
    }

    let mesh_stats = engine.scheduler().mesh_stats();
    info!(
        "Ran {} frames in {:?}: {} of {} chunks initialized, {} meshes built ({} empty), {} vertices emitted, {} vertices in {} draw calls in the last frame",
        config.frames,
        start.elapsed(),
        engine.scheduler().initialized_count(),
        engine.world.chunks().len(),
        mesh_stats.meshes_built,
        mesh_stats.empty_meshes,
        mesh_stats.vertices_emitted,
        drawn_vertices,
        draw_calls
    );

    Ok(())
}
