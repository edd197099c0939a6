//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//!
//! Each pixel owns a random stream seeded from the render seed and its
//! coordinates, so an image depends only on camera, world and seed.

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::{Camera, Color, HitRecord, Hittable};
use glint_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Minimum hit distance; avoids self-intersection ("shadow acne").
const T_MIN: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Base seed for every pixel's random stream
    pub seed: u64,
    /// Edge length of a bucket in pixels (parallel path only)
    pub bucket_size: u32,
    /// Render buckets on the rayon pool instead of row by row
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// The same color in every direction.
    Solid(Color),
    /// Linear blend from `horizon` (straight down) to `zenith` (straight up).
    Gradient { horizon: Color, zenith: Color },
}

impl Background {
    /// The classic white-to-blue sky.
    pub fn sky() -> Self {
        Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        }
    }

    /// Radiance arriving along `ray`.
    pub fn color(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { horizon, zenith } => {
                let unit_direction = ray.direction().normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                horizon * (1.0 - a) + zenith * a
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and accumulating
/// emitted light, for at most `depth` bounces.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        return background.color(ray);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct one linear component and quantize it to a byte.
#[inline]
fn component_to_byte(linear: f32) -> u8 {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    // NaN fails `linear > 0.0` and comes out black
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [
        component_to_byte(color.x),
        component_to_byte(color.y),
        component_to_byte(color.z),
    ]
}

/// Convert a linear color to gamma-corrected 8-bit RGBA (opaque).
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let [r, g, b] = color_to_rgb8(color);
    [r, g, b, 255]
}

/// Random stream for pixel (x, y) under `seed`.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let coords = ((y as u64) << 32) | x as u64;
    StdRng::seed_from_u64(seed ^ coords.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel with multi-sampling.
///
/// The camera must already be initialized.
pub fn render_pixel(camera: &Camera, world: &dyn Hittable, x: u32, y: u32, seed: u64) -> Color {
    let mut rng = pixel_rng(seed, x, y);
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, &mut rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, &camera.background, &mut rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear-color image produced by a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Gamma-corrected RGB bytes, ready for [`glint_core::write_rgb8`].
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    /// Gamma-corrected RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

/// Render the entire scene row by row on the calling thread.
///
/// The camera must already be initialized.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height());

    for y in 0..image.height {
        for x in 0..image.width {
            let color = render_pixel(camera, world, x, y, config.seed);
            image.set(x, y, color);
        }
    }

    image
}
