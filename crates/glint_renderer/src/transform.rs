//! Instance transforms: translation and rotation about the Y axis.
//!
//! Both wrap a shared hittable and move the ray into the object's local
//! frame instead of moving the geometry, then map the hit back to world space.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// A hittable displaced by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Same direction, so t is unchanged between frames
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction());

        if !self.object.hit(&offset_ray, ray_t, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A hittable rotated about the Y axis by a fixed angle.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl RotateY {
    /// Rotate `object` by `angle` degrees, counter-clockwise looking down -Y.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let radians = angle.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let mut rotate_y = Self {
            object,
            sin_theta,
            cos_theta,
            bbox: Aabb::EMPTY,
        };

        let local = rotate_y.object.bounding_box();
        if local == Aabb::EMPTY {
            return rotate_y;
        }

        let (min, max) = local.corners().iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), &corner| {
                let rotated = rotate_y.to_world(corner);
                (min.min(rotated), max.max(rotated))
            },
        );
        rotate_y.bbox = Aabb::from_points(min, max);
        rotate_y
    }

    /// World space to object space (rotation by -theta).
    #[inline]
    fn to_object(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x - self.sin_theta * p.z,
            p.y,
            self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }

    /// Object space to world space (rotation by +theta).
    #[inline]
    fn to_world(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * p.x + self.sin_theta * p.z,
            p.y,
            -self.sin_theta * p.x + self.cos_theta * p.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Rotation preserves lengths, so t is unchanged between frames
        let rotated = Ray::new(self.to_object(ray.origin()), self.to_object(ray.direction()));

        if !self.object.hit(&rotated, ray_t, rec) {
            return false;
        }

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_box, Lambertian, Material, Quad, Sphere};

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    fn sample_rays() -> Vec<Ray> {
        let mut rays = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                let origin = Vec3::new(-4.0 + 2.0 * i as f32, 3.0, 10.0 - j as f32);
                let target = Vec3::new(0.3 * j as f32, 0.2 * i as f32, -1.0);
                rays.push(Ray::new(origin, target - origin));
            }
        }
        rays
    }

    /// Assert two hittables give the same hit (or miss) for every probe ray.
    fn assert_same_hits(a: &dyn Hittable, b: &dyn Hittable) {
        let interval = Interval::new(0.001, f32::INFINITY);
        let mut hits = 0;

        for ray in sample_rays() {
            let mut rec_a = HitRecord::default();
            let mut rec_b = HitRecord::default();
            let hit_a = a.hit(&ray, interval, &mut rec_a);
            let hit_b = b.hit(&ray, interval, &mut rec_b);

            assert_eq!(hit_a, hit_b, "ray {:?}", ray);
            if hit_a {
                hits += 1;
                assert!((rec_a.t - rec_b.t).abs() < 1e-3, "t {} vs {}", rec_a.t, rec_b.t);
                assert!((rec_a.p - rec_b.p).length() < 1e-3);
                assert!((rec_a.normal - rec_b.normal).length() < 1e-3);
                assert_eq!(rec_a.front_face, rec_b.front_face);
            }
        }
        assert!(hits > 0, "probe rays never hit the object");
    }

    fn test_object() -> Arc<dyn Hittable> {
        Arc::new(make_box(Vec3::new(-1.0, -1.0, -2.0), Vec3::new(1.5, 2.0, 0.5), gray()))
    }

    #[test]
    fn test_translate_moves_hit_point() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, gray()));
        let moved = Translate::new(sphere, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(moved.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        assert!((rec.t - 9.0).abs() < 1e-4);
        assert!((rec.p - Vec3::new(5.0, 0.0, 1.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);

        let bbox = moved.bounding_box();
        assert_eq!(bbox.x, Interval::new(4.0, 6.0));
    }

    #[test]
    fn test_translate_round_trip() {
        let object = test_object();
        let offset = Vec3::new(3.0, -2.0, 7.5);
        let there: Arc<dyn Hittable> = Arc::new(Translate::new(object.clone(), offset));
        let back = Translate::new(there, -offset);

        assert_same_hits(object.as_ref(), &back);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // Quad facing +Z at z = 1 ends up facing +X at x = 1 after +90 degrees
        let quad: Arc<dyn Hittable> = Arc::new(Quad::new(
            Vec3::new(-0.5, -0.5, 1.0),
            Vec3::X,
            Vec3::Y,
            gray(),
        ));
        let rotated = RotateY::new(quad, 90.0);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X);
        let mut rec = HitRecord::default();
        assert!(rotated.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.p - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::X).length() < 1e-4);
        assert!(rec.front_face);
    }

    #[test]
    fn test_rotate_y_round_trip() {
        let object = test_object();
        for angle in [15.0, -18.0, 90.0, 137.0] {
            let there: Arc<dyn Hittable> = Arc::new(RotateY::new(object.clone(), angle));
            let back = RotateY::new(there, -angle);

            assert_same_hits(object.as_ref(), &back);
        }
    }

    #[test]
    fn test_rotate_y_bbox_encloses_rotated_object() {
        let object = test_object();
        let rotated = RotateY::new(object, 45.0);
        let bbox = rotated.bounding_box();

        // x' = (x + z) / sqrt(2), z' = (z - x) / sqrt(2) over the box corners
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!((bbox.x.min - -3.0 * s).abs() < 1e-4);
        assert!((bbox.x.max - 2.0 * s).abs() < 1e-4);
        assert!((bbox.z.min - -3.5 * s).abs() < 1e-4);
        assert!((bbox.z.max - 1.5 * s).abs() < 1e-4);
        assert!((bbox.y.min - -1.0).abs() < 1e-3, "y.min = {}", bbox.y.min);
        assert!((bbox.y.max - 2.0).abs() < 1e-3, "y.max = {}", bbox.y.max);
    }

    #[test]
    fn test_composed_transform_hits() {
        // Box rotated then translated, as scenes stack them
        let object = test_object();
        let rotated: Arc<dyn Hittable> = Arc::new(RotateY::new(object, 15.0));
        let placed = Translate::new(rotated, Vec3::new(265.0, 0.0, 295.0));

        let ray = Ray::new(Vec3::new(265.0, 0.5, -800.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(placed.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(rec.p.z > 290.0 && rec.p.z < 296.0);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }
}
