//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over shared hittables, built by median split.
//! Construction is deterministic: at every node the objects are sorted
//! (stably) by their box minimum on the longest axis of the node's bounds,
//! then halved. Leaves hold one or two primitives.

use std::sync::Arc;

use crate::{HitRecord, Hittable, HittableList};
use glint_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
///
/// Using an enum keeps tree traversal free of dynamic dispatch; only the
/// primitives in the leaves are trait objects.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with one or two primitives.
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Empty node (no primitives).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let count = objects.len();
        let bvh = Self::build(objects);
        log::debug!("Built BVH over {} primitives, depth {}", count, bvh.depth());
        bvh
    }

    /// Create a BVH over the objects of a hittable list.
    pub fn from_list(list: HittableList) -> Self {
        Self::new(list.into_objects())
    }

    /// Recursive median-split construction.
    fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if objects.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        let axis = bounds.longest_axis();
        objects.sort_by(|a, b| {
            let a_min = a.bounding_box().axis_interval(axis).min;
            let b_min = b.bounding_box().axis_interval(axis).min;
            a_min.total_cmp(&b_min)
        });

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left = Self::build(objects);
        let right = Self::build(right_objects);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Number of levels in the tree (a single leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of primitives stored in the leaves.
    pub fn primitive_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { objects, .. } => objects.len(),
            BvhNode::Branch { left, right, .. } => left.primitive_count() + right.primitive_count(),
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;

                for obj in objects {
                    if obj.hit(ray, Interval::new(ray_t.min, closest), rec) {
                        hit_anything = true;
                        closest = rec.t;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
