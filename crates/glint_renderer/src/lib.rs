//! glint renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over shared, immutable scene data: hittable
//! geometry (spheres, quads, instance transforms) behind a BVH, a small
//! material and texture model, and a camera that integrates radiance per
//! pixel either row by row or as parallel buckets.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod material;
mod quad;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;
mod transform;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use quad::{make_box, Quad};
pub use renderer::{
    color_to_rgb8, color_to_rgba, linear_to_gamma, pixel_rng, ray_color, render, render_pixel, Background,
    ImageBuffer, RenderConfig,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture};
pub use transform::{RotateY, Translate};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
