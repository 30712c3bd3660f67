use std::f64::consts::TAU;
use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{write_scalar, Point, Vector};

use super::{Curve, CurveDomain};

/// A circle in the plane, defined by a center and a radius.
///
/// `P(t) = center + radius * (cos t, sin t)`.
///
/// The radius is finite and non-negative. A zero radius is allowed and turns
/// the circle into a point, which is how contact searches model a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidRadius`] if the radius is negative or
    /// not finite.
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius(radius).into());
        }
        Ok(Self { center, radius })
    }

    /// Creates a circle centered at the origin.
    ///
    /// # Errors
    ///
    /// Same as [`Circle::new`].
    pub fn with_radius(radius: f64) -> Result<Self> {
        Self::new(Point::origin(), radius)
    }

    /// Returns the same circle moved to `center`.
    #[must_use]
    pub fn with_center(&self, center: Point) -> Self {
        Self {
            center,
            radius: self.radius,
        }
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The point at angle `t`, measured counter-clockwise from +X.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.center + Vector::polar(self.radius, t)
    }

    /// The point of the circle closest to `point`.
    ///
    /// For `point == center` every circle point is equally close; the point
    /// at angle zero is returned.
    #[must_use]
    pub fn closest_point(&self, point: &Point) -> Point {
        let delta = *point - self.center;
        self.point_at(delta.y().atan2(delta.x()))
    }

    /// Signed distance from the boundary to `point`; negative inside.
    #[must_use]
    pub fn distance_to_point(&self, point: &Point) -> f64 {
        self.center.distance_to(point) - self.radius
    }

    /// Signed separation between the two boundaries; negative when they overlap.
    #[must_use]
    pub fn distance_to_circle(&self, other: &Circle) -> f64 {
        self.center.distance_to(&other.center) - self.radius - other.radius
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Point {
        self.point_at(t)
    }

    fn tangent(&self, t: f64) -> Vector {
        Vector::new(-self.radius * t.sin(), self.radius * t.cos()).normalize()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Circle(x=")?;
        write_scalar(f, self.center.x())?;
        f.write_str(", y=")?;
        write_scalar(f, self.center.y())?;
        f.write_str(", r=")?;
        write_scalar(f, self.radius)?;
        f.write_str(")")
    }
}
