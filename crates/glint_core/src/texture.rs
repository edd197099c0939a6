//! Texture image loading.
//!
//! Decodes image files into linear RGB floats for image-mapped textures.
//! Lookups clamp out-of-range coordinates instead of failing.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture image.
///
/// Pixels are linear RGB in row-major order, top row first.
#[derive(Clone, Debug)]
pub struct TextureImage {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    pixels: Vec<[f32; 3]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl TextureImage {
    /// Create a texture from linear pixel data.
    ///
    /// Returns `None` if `pixels` does not hold exactly `width * height` entries
    /// or the image is empty.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<[f32; 3]>,
        path: impl Into<String>,
    ) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Linear color of the pixel at integer coordinates, clamped to the image.
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let [r, g, b] = self.pixels[(y * self.width + x) as usize];
        Vec3::new(r, g, b)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 3]>()
    }
}

/// Load a texture from a file path.
pub fn load_texture_image(path: impl AsRef<Path>) -> TextureResult<TextureImage> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: display.clone(),
        source,
    })?;
    let img = image::load_from_memory(&bytes)?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels: Vec<[f32; 3]> = rgb
        .pixels()
        .map(|p| [srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])])
        .collect();

    let texture =
        TextureImage::from_pixels(width, height, pixels, display.clone()).ok_or(TextureError::Empty(display))?;

    log::debug!(
        "Loaded texture: {} ({}x{}, {:.1} KB)",
        texture.path,
        texture.width,
        texture.height,
        texture.size_bytes() as f32 / 1024.0
    );

    Ok(texture)
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
