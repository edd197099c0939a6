//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{Material, ScatterResult};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
///
/// Filled in place by [`Hittable::hit`]; the material is borrowed from the
/// primitive that was hit, so a record never outlives the world.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// `outward_normal` must have unit length. The stored normal always
    /// points against the ray, so `front_face` records which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns true on a hit and fills in `rec` with the closest
    /// intersection. `rec` is left untouched on a miss.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A list of hittable objects, tested by linear scan.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Create a list holding a single object.
    pub fn with_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Consume the list, returning its objects.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, Interval::new(ray_t.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};

    fn sphere_at(z: f32) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        ))
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        rec.set_face_normal(&ray, -Vec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_closest_regardless_of_order() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for order in [[-5.0, -2.0, -9.0], [-9.0, -5.0, -2.0], [-2.0, -9.0, -5.0]] {
            let mut list = HittableList::new();
            for z in order {
                list.add(sphere_at(z));
            }

            let mut rec = HitRecord::default();
            assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!((rec.t - 1.5).abs() < 1e-4, "t = {}", rec.t);
        }
    }

    #[test]
    fn test_list_respects_interval() {
        let mut list = HittableList::new();
        list.add(sphere_at(-5.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let mut rec = HitRecord::default();
        assert!(!list.hit(&ray, Interval::new(0.001, 4.0), &mut rec));
        assert!(list.hit(&ray, Interval::new(4.6, 10.0), &mut rec));
        // Near root 4.5 is outside, far root 5.5 is inside
        assert!((rec.t - 5.5).abs() < 1e-4);
    }

    #[test]
    fn test_list_bbox_is_union() {
        let mut list = HittableList::new();
        assert!(list.is_empty());
        assert_eq!(list.bounding_box(), Aabb::EMPTY);

        list.add(sphere_at(-5.0));
        list.add(sphere_at(3.0));

        let bbox = list.bounding_box();
        assert_eq!(list.len(), 2);
        assert!((bbox.z.min - -5.5).abs() < 1e-5);
        assert!((bbox.z.max - 3.5).abs() < 1e-5);
    }
}
