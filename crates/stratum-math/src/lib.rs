#![warn(missing_docs)]

//! Math types for the stratum boundary layer mesher.
//!
//! Thin wrappers around nalgebra: points, vectors and directions in 3D,
//! tolerance constants, and the handful of guarded vector helpers the
//! extrusion and relaxation code relies on.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance, in mesh units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-12 mesh units).
    ///
    /// Meshes are unitless, so this only guards against exact or near-exact
    /// degeneracy rather than modelling a manufacturing tolerance.
    pub const DEFAULT: Self = Self { linear: 1e-12 };

    /// Normalize `v`, returning the direction and the original length.
    ///
    /// Returns `None` when `v` is shorter than the linear tolerance.
    pub fn normalize(&self, v: &Vec3) -> Option<(Dir3, f64)> {
        Unit::try_new_and_get(*v, self.linear)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Arithmetic mean of a set of points.
///
/// Returns `None` for an empty set.
pub fn barycenter<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Point3> {
    let mut sum = Vec3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(Point3::from(sum / count as f64))
}

/// Move `from` toward `to` by the fraction `t`.
pub fn lerp(from: &Point3, to: &Point3, t: f64) -> Point3 {
    from + (to - from) * t
}
