// Scattering helpers on top of glam::Vec3.

use glam::Vec3;

/// Extension trait adding the reflection/refraction helpers glam lacks.
pub trait Vec3Ext {
    /// True if every component is within 1e-8 of zero.
    fn near_zero(&self) -> bool;

    /// Mirror `self` about the unit normal `n`.
    fn reflect(&self, n: Vec3) -> Vec3;

    /// Refract the unit vector `self` through a surface with unit normal `n`
    /// (pointing against `self`) and relative index `eta = η_in / η_out`.
    fn refract(&self, n: Vec3, eta: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const EPS: f32 = 1e-8;
        self.x.abs() < EPS && self.y.abs() < EPS && self.z.abs() < EPS
    }

    #[inline]
    fn reflect(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(&self, n: Vec3, eta: f32) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = eta * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
