use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{GeometryError, Result};

use super::write_scalar;

/// A free 2D displacement. Carries no position.
///
/// Backed by [`nalgebra::Vector2`]; equality is exact component comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector(pub(crate) nalgebra::Vector2<f64>);

impl Vector {
    /// Creates a vector from its cartesian components.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self(nalgebra::Vector2::new(x, y))
    }

    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self(nalgebra::Vector2::zeros())
    }

    #[must_use]
    pub fn unit_x() -> Self {
        Self(nalgebra::Vector2::x())
    }

    #[must_use]
    pub fn unit_y() -> Self {
        Self(nalgebra::Vector2::y())
    }

    #[must_use]
    pub fn one() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Builds `(r cos θ, r sin θ)`.
    #[must_use]
    pub fn polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Builds `(a cos θ, b sin θ)`, the offset of an axis-aligned ellipse point
    /// at parametric angle `θ`.
    #[must_use]
    pub fn elliptical(a: f64, b: f64, theta: f64) -> Self {
        Self::new(a * theta.cos(), b * theta.sin())
    }

    /// Returns `(magnitude, angle)` with the angle in `(-π, π]`.
    #[must_use]
    pub fn to_polar(&self) -> (f64, f64) {
        (self.magnitude(), self.0.y.atan2(self.0.x))
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Returns the component at `index` (`0` for x, `1` for y).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] for any other index.
    pub fn component(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.0.x),
            1 => Ok(self.0.y),
            _ => Err(GeometryError::IndexOutOfRange { index }.into()),
        }
    }

    #[must_use]
    pub fn sum_squares(&self) -> f64 {
        self.0.norm_squared()
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0
    }

    /// Scales the vector to unit length.
    ///
    /// A zero vector has no direction and is returned unchanged.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let m = self.magnitude();
        if m > 0.0 {
            Self(self.0 / m)
        } else {
            *self
        }
    }

    #[must_use]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(&other.0)
    }

    /// Planar cross product `a.x * b.y - a.y * b.x`, the out-of-plane component.
    #[must_use]
    pub fn cross(&self, other: &Vector) -> f64 {
        self.0.perp(&other.0)
    }

    /// Cross product of this vector with an out-of-plane value `s`:
    /// `(a.y * s, -a.x * s)`.
    #[must_use]
    pub fn cross_scalar(&self, s: f64) -> Vector {
        Self::new(self.0.y * s, -self.0.x * s)
    }

    /// Cross product of an out-of-plane value `s` with `vector`.
    #[must_use]
    pub fn scalar_cross(s: f64, vector: &Vector) -> Vector {
        vector.cross_scalar(-s)
    }

    /// Euclidean distance between two position vectors.
    #[must_use]
    pub fn distance(from: &Vector, to: &Vector) -> f64 {
        (*to - *from).magnitude()
    }

    /// Unit direction from `from` towards `to`, or zero if they coincide.
    #[must_use]
    pub fn direction(from: &Vector, to: &Vector) -> Vector {
        (*to - *from).normalize()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        Vector(self.0 * factor)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Vector {
        Vector(vector.0 * self)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, divisor: f64) -> Vector {
        Vector(self.0 / divisor)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_scalar(f, self.0.x)?;
        f.write_str(",")?;
        write_scalar(f, self.0.y)?;
        f.write_str(")")
    }
}
