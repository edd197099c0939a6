//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// A static sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        if radius <= 0.0 {
            log::warn!("Sphere at {:?} has non-positive radius {}", center, radius);
        }
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if self.radius <= 0.0 {
            return false;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn gray_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Vec3::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = gray_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = gray_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_ray_at_center_hits_at_surface_distance() {
        let center = Vec3::new(3.0, -2.0, -7.0);
        let radius = 1.25;
        let sphere = gray_sphere(center, radius);

        let origin = Vec3::new(0.5, 1.0, 2.0);
        let ray = Ray::new(origin, center - origin);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // t is in units of the (unnormalized) direction length
        let distance = (center - origin).length();
        let expected_t = (distance - radius) / distance;
        assert!((rec.t - expected_t).abs() < 1e-4);

        // Normal is anti-parallel to the unit direction
        let unit_dir = ray.direction().normalize();
        assert!((rec.normal.dot(unit_dir) + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = gray_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!(!rec.front_face);
        // Normal flipped to face the ray origin
        assert!((rec.normal - -Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_t_stays_strictly_inside_interval() {
        let sphere = gray_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root 4 is the interval end: excluded. Far root 6 is outside too.
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, 4.0), &mut rec));

        assert!(sphere.hit(&ray, Interval::new(4.0, 10.0), &mut rec));
        assert!((rec.t - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_uv() {
        // +X maps to u = 0.5, equator to v = 0.5
        let (u, v) = Sphere::get_sphere_uv(Vec3::X);
        assert!((u - 0.5).abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);

        // Poles: -Y has v = 0, +Y has v = 1
        assert!(Sphere::get_sphere_uv(-Vec3::Y).1.abs() < 1e-5);
        assert!((Sphere::get_sphere_uv(Vec3::Y).1 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_radius_never_hits() {
        let sphere = gray_sphere(Vec3::new(0.0, 0.0, -1.0), -3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }
}
