//! Textures: spatially varying colors sampled at a hit point.

use std::path::Path;
use std::sync::Arc;

use crate::Color;
use glint_core::TextureImage;
use glint_math::{Interval, Vec3};

/// Fallback color for image textures with no image data.
const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Trait for anything that supplies a color at surface coordinates (u, v)
/// and world-space point p.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// A 3D checker pattern of cubes with edge length `scale`.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    /// Checker alternating between two solid colors.
    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(scale, Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let parity = |c: f32| (c as i64).rem_euclid(2);
        let is_even = (parity(cell.x) + parity(cell.y) + parity(cell.z)) % 2 == 0;

        if is_even {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// A texture mapped from an image by (u, v).
///
/// Without image data every lookup returns solid cyan so missing textures
/// are obvious in the render rather than fatal.
pub struct ImageTexture {
    image: Option<Arc<TextureImage>>,
}

impl ImageTexture {
    pub fn new(image: Arc<TextureImage>) -> Self {
        Self { image: Some(image) }
    }

    /// Load the image at `path`, falling back to the missing-image color on failure.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match glint_core::load_texture_image(path) {
            Ok(image) => Self::new(Arc::new(image)),
            Err(err) => {
                log::warn!("Using fallback color for texture {}: {}", path.display(), err);
                Self { image: None }
            }
        }
    }

    /// Whether image data is present.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_IMAGE_COLOR;
        };

        // Clamp to [0,1]; flip v so v = 1 is the top row
        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        let v = 1.0 - unit.clamp(v);

        // `pixel` clamps u = 1 / v = 0 to the last column / row
        let i = (u * image.width as f32) as u32;
        let j = (v * image.height as f32) as u32;
        image.pixel(i, j)
    }
}
