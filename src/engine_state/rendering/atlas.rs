//! Texture atlas loading for block rendering.
//!
//! The atlas is a single image made of square tiles stacked vertically. Tile
//! `i` (counting from the top) is texture layer `i`, and the layer stored in a
//! vertex's texture coordinate selects it. The tile edge equals the image width.

use std::{io::Cursor, path::Path};

use image::{ImageFormat, ImageReader};
use log::info;

use crate::{
    engine_state::voxels::block::max_texture_layer,
    error::{EngineError, Result},
};

/// A decoded, validated RGBA8 texture atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAtlas {
    /// Edge length of one square tile in pixels (the image width)
    tile_size: u32,
    /// Number of tiles (height / width)
    layers: u32,
    /// Tightly packed RGBA8 pixels, row-major, top to bottom
    rgba: Vec<u8>,
}

impl TextureAtlas {
    /// Loads and validates a PNG atlas from disk.
    ///
    /// # Errors
    /// I/O failures, decode failures, bad dimensions, and atlases with fewer
    /// layers than the face texture table references.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let atlas = Self::from_png_bytes(&bytes)?;
        info!(
            "Loaded texture atlas {} ({} layers of {}x{})",
            path.display(),
            atlas.layers,
            atlas.tile_size,
            atlas.tile_size
        );
        Ok(atlas)
    }

    /// Decodes and validates an in-memory PNG atlas.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = ImageReader::new(Cursor::new(bytes));
        reader.set_format(ImageFormat::Png);
        let image = reader.decode()?.to_rgba8();
        let (width, height) = image.dimensions();
        let atlas = Self::from_rgba(width, height, image.into_raw())?;
        atlas.ensure_covers_catalog()?;
        Ok(atlas)
    }

    /// Wraps already decoded RGBA8 pixels, validating the tile layout.
    ///
    /// The width must be a non-zero power of two no larger than the height, and
    /// the height a whole multiple of the width.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let reason = if width == 0 {
            Some("width must be positive")
        } else if !width.is_power_of_two() {
            Some("width must be a power of two")
        } else if width > height {
            Some("width must not exceed height")
        } else if height % width != 0 {
            Some("height must be a multiple of width")
        } else if rgba.len() as u64 != 4 * width as u64 * height as u64 {
            Some("pixel buffer does not match dimensions")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(EngineError::AtlasDimensions {
                width,
                height,
                reason,
            });
        }

        Ok(TextureAtlas {
            tile_size: width,
            layers: height / width,
            rgba,
        })
    }

    /// Number of layers required by the face texture table.
    pub fn required_layers() -> u32 {
        max_texture_layer() as u32 + 1
    }

    /// Checks that every layer the face texture table references exists.
    pub fn ensure_covers_catalog(&self) -> Result<()> {
        let required = Self::required_layers();
        if self.layers < required {
            return Err(EngineError::AtlasTooSmall {
                layers: self.layers,
                required,
            });
        }
        Ok(())
    }

    /// Edge length of one tile in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tiles in the atlas.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// The whole atlas as RGBA8 bytes, suitable for a 2D array texture upload.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// The RGBA8 bytes of one tile, or `None` if the layer does not exist.
    pub fn layer(&self, layer: u32) -> Option<&[u8]> {
        if layer >= self.layers {
            return None;
        }
        let stride = 4 * (self.tile_size * self.tile_size) as usize;
        let start = layer as usize * stride;
        self.rgba.get(start..start + stride)
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_fn(width, height, |_, y| image::Rgba([y as u8, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_stacked_tiles() {
        let atlas = TextureAtlas::from_png_bytes(&png(4, 64)).unwrap();
        assert_eq!(atlas.tile_size(), 4);
        assert_eq!(atlas.layers(), 16);
        let tile = atlas.layer(2).unwrap();
        assert_eq!(tile.len(), 64);
        assert_eq!(tile[0], 8);
        assert!(atlas.layer(16).is_none());
        assert_eq!(atlas.rgba().len(), 4 * 4 * 64);
        assert_eq!(&atlas.rgba()[2 * 64..3 * 64], tile);
    }

    #[test]
    fn rejects_bad_dimensions() {
        for (width, height) in [(0, 16), (3, 48), (8, 4), (4, 18)] {
            let rgba = vec![0; (4 * width * height) as usize];
            assert!(matches!(
                TextureAtlas::from_rgba(width, height, rgba),
                Err(EngineError::AtlasDimensions { .. })
            ));
        }
    }

    #[test]
    fn rejects_atlas_missing_layers() {
        assert!(matches!(
            TextureAtlas::from_png_bytes(&png(4, 32)),
            Err(EngineError::AtlasTooSmall {
                layers: 8,
                required: 16
            })
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            TextureAtlas::from_png_bytes(b"not a png"),
            Err(EngineError::AtlasDecode(_))
        ));
    }
}
