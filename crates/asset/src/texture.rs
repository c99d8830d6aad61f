//! RGBA8 texture maps for the textured and bump-mapped render modes.

use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Colour of a flat tangent-space normal, `(0, 0, 1)` encoded as RGBA8.
pub const FLAT_NORMAL_TEXEL: [u8; 4] = [128, 128, 255, 255];

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    pub const BYTES_PER_PIXEL: u32 = 4;

    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL as usize;
        ensure!(
            data.len() == expected,
            "RGBA8 texture {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load any PNG and convert it to RGBA8.
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let rgba = image::open(path)
            .with_context(|| format!("Failed to open image {:?}", path))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!("Loaded texture {}x{} ({} bytes)", width, height, rgba.len());
        Self::new_rgba8(width, height, rgba.into_raw())
    }

    /// Black/white-ish checkerboard used when no diffuse map is supplied.
    pub fn checkerboard(size: u32) -> Self {
        let mut data = Vec::with_capacity((size * size * Self::BYTES_PER_PIXEL) as usize);
        for y in 0..size {
            for x in 0..size {
                let texel = if ((x / 8) + (y / 8)) % 2 == 0 {
                    [255, 255, 255, 255]
                } else {
                    [128, 128, 128, 255]
                };
                data.extend_from_slice(&texel);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Bump map that leaves every normal untouched.
    pub fn flat_normal_map(size: u32) -> Self {
        Self {
            data: FLAT_NORMAL_TEXEL.repeat((size * size) as usize),
            width: size,
            height: size,
        }
    }

    pub fn is_valid(&self) -> bool {
        let expected = (self.width * self.height * Self::BYTES_PER_PIXEL) as usize;
        self.data.len() == expected && self.width > 0 && self.height > 0
    }
}

/// Diffuse colour map plus tangent-space bump map.
#[derive(Clone, Debug)]
pub struct SurfaceMaps {
    pub diffuse: TextureData,
    pub bump: TextureData,
}

impl SurfaceMaps {
    const FALLBACK_SIZE: u32 = 64;

    /// Load both maps; a `None` path falls back to a procedural texture.
    pub fn load(diffuse: Option<&Path>, bump: Option<&Path>) -> Result<Self> {
        let diffuse = match diffuse {
            Some(path) => TextureData::load_png(path).context("diffuse map")?,
            None => {
                log::warn!("No diffuse map given, using checkerboard");
                TextureData::checkerboard(Self::FALLBACK_SIZE)
            }
        };
        let bump = match bump {
            Some(path) => TextureData::load_png(path).context("bump map")?,
            None => {
                log::warn!("No bump map given, using flat normal map");
                TextureData::flat_normal_map(Self::FALLBACK_SIZE)
            }
        };
        Ok(Self { diffuse, bump })
    }
}
