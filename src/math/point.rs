use std::fmt;
use std::ops::{Add, Sub};

use crate::geometry::Circle;

use super::{write_scalar, Vector};

/// An affine position in the plane.
///
/// Points and vectors combine the affine way: `Point - Point` is a [`Vector`],
/// and `Point ± Vector` is a `Point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub(crate) nalgebra::Point2<f64>);

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self(nalgebra::Point2::new(x, y))
    }

    #[must_use]
    pub fn origin() -> Self {
        Self(nalgebra::Point2::origin())
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// The displacement of this point from the origin.
    #[must_use]
    pub fn as_vector(&self) -> Vector {
        Vector(self.0.coords)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }

    /// Signed distance to the boundary of `circle`; negative inside.
    #[must_use]
    pub fn distance_to_circle(&self, circle: &Circle) -> f64 {
        circle.distance_to_point(self)
    }

    /// The vector that carries this point onto `target`.
    #[must_use]
    pub fn vector_to(&self, target: &Point) -> Vector {
        *target - *self
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Point(x=")?;
        write_scalar(f, self.0.x)?;
        f.write_str(", y=")?;
        write_scalar(f, self.0.y)?;
        f.write_str(")")
    }
}
