//! # Engine Configuration
//!
//! JSON configuration for the engine, read with `serde_json`. Every field has a
//! default, so an empty object (or no file at all) yields a playable world.
//!
//! ```json
//! {
//!   "world": { "seed": 1234, "size": [32, 2, 32], "sea_level": 4 },
//!   "view": { "width": 1280, "height": 720, "preset": "spawn" },
//!   "frames": 600,
//!   "build_block": "brick",
//!   "atlas_path": "textures.png"
//! }
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::{
    engine_state::voxels::block::{block_type::BlockType, BlockTypeSize},
    error::{EngineError, Result},
};

/// Largest accepted world dimension, in chunks, on any axis.
pub const MAX_WORLD_DIMENSION: i32 = 256;
/// Largest accepted total chunk count. Every chunk owns a `CHUNK_SIZE`-byte
/// block array allocated up front, so this caps block storage at 256 MiB.
pub const MAX_WORLD_CHUNKS: i64 = 32_768;

/// World layout and generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Generation seed. `None` picks the current Unix time at startup.
    pub seed: Option<u32>,
    /// World size in chunks along x, y and z.
    pub size: [i32; 3],
    /// Absolute block height of the water surface.
    pub sea_level: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            size: [32, 2, 32],
            sea_level: 4,
        }
    }
}

impl WorldConfig {
    /// Rejects world sizes outside `1..=MAX_WORLD_DIMENSION` on any axis, and
    /// grids of more than `MAX_WORLD_CHUNKS` chunks.
    pub fn validate(&self) -> Result<()> {
        for (axis, extent) in ["x", "y", "z"].iter().zip(self.size) {
            if !(1..=MAX_WORLD_DIMENSION).contains(&extent) {
                return Err(EngineError::InvalidConfig(format!(
                    "world size along {axis} is {extent}, expected 1..={MAX_WORLD_DIMENSION}"
                )));
            }
        }

        let chunks = self.size.iter().map(|&extent| extent as i64).product::<i64>();
        if chunks > MAX_WORLD_CHUNKS {
            return Err(EngineError::InvalidConfig(format!(
                "world of {chunks} chunks exceeds the limit of {MAX_WORLD_CHUNKS}"
            )));
        }
        Ok(())
    }

    /// The configured seed, or the current Unix time in seconds.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs() as u32)
                .unwrap_or_default()
        })
    }
}

/// Named starting viewpoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraPreset {
    /// Just above the ground at the world origin, looking slightly down.
    #[default]
    Spawn,
    /// High above the world origin, looking straight down.
    Overview,
}

/// Viewport and camera settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Where the camera starts
    pub preset: CameraPreset,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            width: 800,
            height: 600,
            preset: CameraPreset::Spawn,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World layout and generation
    pub world: WorldConfig,
    /// Viewport and camera
    pub view: ViewConfig,
    /// Number of frames simulated by the headless runner.
    pub frames: u32,
    /// Catalog name of the block placed by edits.
    pub build_block: String,
    /// Optional PNG texture atlas to load and validate.
    pub atlas_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            world: WorldConfig::default(),
            view: ViewConfig::default(),
            frames: 600,
            build_block: BlockType::DIRT.name().to_string(),
            atlas_path: None,
        }
    }
}

impl EngineConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a JSON configuration string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field that can be wrong after deserialization.
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        if self.view.width == 0 || self.view.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "viewport {}x{} must be non-empty",
                self.view.width, self.view.height
            )));
        }

        if self.frames == 0 {
            warn!("Configured to run zero frames");
        }

        self.build_type().map(|_| ())
    }

    /// Resolves `build_block` against the block catalog.
    pub fn build_type(&self) -> Result<BlockTypeSize> {
        BlockType::from_name(&self.build_block)
            .map(BlockType::as_int)
            .ok_or_else(|| {
                EngineError::InvalidConfig(format!("unknown block name {:?}", self.build_block))
            })
    }
}
