//! Planar parallelogram primitive and the six-sided box built from it.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material,
};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// A parallelogram with corner `q` and edges `u` and `v`.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// Maps a planar offset from `q` to (alpha, beta) coordinates
    w: Vec3,
    /// Unit plane normal, `u × v` direction
    normal: Vec3,
    /// Plane constant: `normal · x = d` for every point x on the plane
    d: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    /// Create a new quad. The outward normal follows the right-hand rule on `u × v`.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let n_len_sq = n.length_squared();

        // A zero-area quad keeps a zero normal so hit() rejects every ray
        let (normal, w) = if n_len_sq > 0.0 {
            (n / n_len_sq.sqrt(), n / n_len_sq)
        } else {
            log::warn!("Quad at {:?} has zero area (u={:?}, v={:?})", q, u, v);
            (Vec3::ZERO, Vec3::ZERO)
        };
        let d = normal.dot(q);

        // Bounds of both diagonals
        let bbox = Aabb::surrounding(
            &Aabb::from_points(q, q + u + v),
            &Aabb::from_points(q + u, q + v),
        );

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
        }
    }

    /// Planar coordinates lie in the unit square.
    fn is_interior(alpha: f32, beta: f32) -> bool {
        let unit = Interval::new(0.0, 1.0);
        unit.contains(alpha) && unit.contains(beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane (or the quad is degenerate)
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        let intersection = ray.at(t);
        let planar_hitpt = intersection - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        if !Self::is_interior(alpha, beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The closed box with opposite corners `a` and `b`, as six quads facing outward.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}
