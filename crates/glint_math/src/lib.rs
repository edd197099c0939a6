//! Numeric primitives for the glint path tracer.
//!
//! Re-exports glam's vector types and adds the ray, interval and bounding box
//! types the renderer is built on.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::Vec3Ext;
