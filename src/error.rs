//! Error types for the blockworld engine

use thiserror::Error;

/// Main error type for the engine.
///
/// The voxel core itself (block access, generation, meshing, streaming) never
/// fails; these errors come from the edges: configuration, files and the
/// texture atlas.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for `EngineConfig`
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The atlas image could not be decoded
    #[error("Atlas decode error: {0}")]
    AtlasDecode(#[from] image::ImageError),

    /// The atlas image is not a vertical strip of square tiles
    #[error("Atlas is {width}x{height}: {reason}")]
    AtlasDimensions {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Which layout rule was broken
        reason: &'static str,
    },

    /// The atlas has fewer layers than the face texture table references
    #[error("Atlas has {layers} layers, the block catalog needs {required}")]
    AtlasTooSmall {
        /// Layers present
        layers: u32,
        /// Layers needed
        required: u32,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
