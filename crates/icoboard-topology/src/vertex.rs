//! Points on the unit sphere.
//!
//! Every vertex produced by the mesh lives on the unit sphere. Geometric
//! operations that could move a point off the sphere (edge midpoints during
//! subdivision) renormalize before handing the vertex back.
//!
//! Coincidence is always tested with a fixed tolerance, never with `==`:
//! two midpoints computed from the two triangles sharing an edge agree only
//! up to rounding.

use std::ops::{Add, Neg, Sub};

use crate::error::{Error, Result};
use crate::EPSILON;

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    #[cfg_attr(feature = "serde", serde(rename = "_x"))]
    pub x: f64,
    #[cfg_attr(feature = "serde", serde(rename = "_y"))]
    pub y: f64,
    #[cfg_attr(feature = "serde", serde(rename = "_z"))]
    pub z: f64,
}

impl Vertex {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new vertex.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Project onto the unit sphere.
    ///
    /// Fails for (near) zero-length vectors, which have no direction.
    pub fn normalized(&self) -> Result<Self> {
        let len = self.norm();
        if len < EPSILON {
            return Err(Error::DegenerateVertex(*self));
        }
        Ok(self.scale(1.0 / len))
    }

    /// Midpoint of the chord between two points, pushed back onto the sphere.
    pub fn midpoint_on_sphere(&self, other: &Self) -> Result<Self> {
        (*self + *other).scale(0.5).normalized()
    }

    /// True when the two points are the same within [`EPSILON`].
    #[inline]
    pub fn coincides(&self, other: &Self) -> bool {
        self.coincides_within(other, EPSILON)
    }

    #[inline]
    pub fn coincides_within(&self, other: &Self, tolerance: f64) -> bool {
        self.distance(other) < tolerance
    }

    /// True when the point sits on the unit sphere within [`EPSILON`].
    pub fn is_on_unit_sphere(&self) -> bool {
        (self.norm() - 1.0).abs() < EPSILON
    }
}

impl Add for Vertex {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vertex {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vertex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_has_unit_length() {
        let v = Vertex::new(3.0, -4.0, 12.0).normalized().unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!(v.is_on_unit_sphere());
    }

    #[test]
    fn zero_vector_cannot_be_normalized() {
        assert!(matches!(
            Vertex::ORIGIN.normalized(),
            Err(Error::DegenerateVertex(_))
        ));
    }

    #[test]
    fn midpoint_lands_on_sphere() {
        let a = Vertex::new(1.0, 0.0, 0.0);
        let b = Vertex::new(0.0, 1.0, 0.0);
        let m = a.midpoint_on_sphere(&b).unwrap();

        assert!(m.is_on_unit_sphere());
        assert!((m.distance(&a) - m.distance(&b)).abs() < 1e-12);
    }

    #[test]
    fn midpoint_is_symmetric() {
        let a = Vertex::new(0.3, 0.4, 0.866).normalized().unwrap();
        let b = Vertex::new(-0.5, 0.1, 0.7).normalized().unwrap();

        let ab = a.midpoint_on_sphere(&b).unwrap();
        let ba = b.midpoint_on_sphere(&a).unwrap();
        assert!(ab.coincides(&ba));
    }

    #[test]
    fn coincidence_uses_tolerance() {
        let a = Vertex::new(1.0, 0.0, 0.0);
        let nudged = Vertex::new(1.0 + 1e-9, 0.0, 0.0);
        let far = Vertex::new(1.0 + 1e-3, 0.0, 0.0);

        assert!(a.coincides(&nudged));
        assert!(!a.coincides(&far));
    }

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex::new(-2.0, 0.5, 1.0);
        let c = a.cross(&b);

        assert!(c.dot(&a).abs() < 1e-12);
        assert!(c.dot(&b).abs() < 1e-12);
    }

    #[test]
    fn addition_subtraction() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex::new(4.0, -1.0, 2.0);

        assert_eq!(a + b, Vertex::new(5.0, 1.0, 5.0));
        assert_eq!(a - b, Vertex::new(-3.0, 3.0, 1.0));
        assert_eq!(a + (-b), a - b);
    }
}
