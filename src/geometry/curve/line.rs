use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::math::{sign, write_scalar, Point, Vector};

use super::{Circle, Curve, CurveDomain};

/// An infinite line in implicit form: `a * x + b * y + c = 0`.
///
/// The coefficients are homogeneous: any non-zero multiple describes the same
/// locus. Queries divide by the weight `sqrt(a² + b²)`, so they are only
/// meaningful for finite lines (see [`Line::is_finite`]).
///
/// Lines also form a pencil under component-wise `+`, `-` and scaling. That
/// algebra is raw; it has a geometric reading only between normalized lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// The degenerate all-zero line.
    pub const EMPTY: Line = Line::new(0.0, 0.0, 0.0);
    /// `y = 0`.
    pub const X_AXIS: Line = Line::new(0.0, 1.0, 0.0);
    /// `x = 0`.
    pub const Y_AXIS: Line = Line::new(-1.0, 0.0, 0.0);
    /// The line at infinity.
    pub const HORIZON: Line = Line::new(0.0, 0.0, 1.0);

    /// Creates a line from its coefficients.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The line through two points, directed from `p1` to `p2`.
    ///
    /// Points to the left of that direction have positive signed distance.
    #[must_use]
    pub fn join(p1: &Point, p2: &Point) -> Self {
        Self::new(
            p1.y() - p2.y(),
            p2.x() - p1.x(),
            p1.x() * p2.y() - p1.y() * p2.x(),
        )
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Returns `(a, b, c)`.
    #[must_use]
    pub fn coords(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    #[must_use]
    pub fn weight_sqr(&self) -> f64 {
        self.a * self.a + self.b * self.b
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight_sqr().sqrt()
    }

    /// Whether the line has a direction, i.e. is not [`Line::HORIZON`] or
    /// [`Line::EMPTY`] up to scale.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.weight_sqr() > 0.0
    }

    /// Whether all three coefficients are zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        self.a == 0.0 && self.b == 0.0 && self.c == 0.0
    }

    /// Scales the coefficients to unit weight.
    ///
    /// Lines with zero weight have no normal form and are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let w = self.weight();
        if w > 0.0 {
            *self / w
        } else {
            *self
        }
    }

    /// Evaluates `a * x + b * y + c` at `point`.
    #[must_use]
    pub fn dot(&self, point: &Point) -> f64 {
        self.a * point.x() + self.b * point.y() + self.c
    }

    /// The foot of the perpendicular from the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        let w2 = self.weight_sqr();
        Point::new(-self.c * self.a / w2, -self.c * self.b / w2)
    }

    /// Unit direction `(b, -a) / weight`, the direction of [`Line::point_at`].
    #[must_use]
    pub fn direction(&self) -> Vector {
        Vector::new(self.b, -self.a).normalize()
    }

    /// The line with the same normal passing through `point`.
    #[must_use]
    pub fn parallel_through(&self, point: &Point) -> Self {
        Self::new(self.a, self.b, -self.a * point.x() - self.b * point.y())
    }

    /// Orthogonal projection of `point` onto the line.
    #[must_use]
    pub fn closest_point(&self, point: &Point) -> Point {
        let (a, b, c) = self.coords();
        let w = self.weight_sqr();
        Point::new(
            (b * b * point.x() - a * (b * point.y() + c)) / w,
            (a * a * point.y() - b * (a * point.x() + c)) / w,
        )
    }

    /// Projection of the circle's center; the radius plays no part.
    #[must_use]
    pub fn closest_point_to_circle(&self, circle: &Circle) -> Point {
        self.closest_point(circle.center())
    }

    /// Unsigned distance from the line to `point`.
    #[must_use]
    pub fn distance_to(&self, point: &Point) -> f64 {
        self.closest_point(point).distance_to(point)
    }

    /// Distance from the line to the circle's center, less its radius.
    ///
    /// Negative when the line cuts the circle.
    #[must_use]
    pub fn distance_to_circle(&self, circle: &Circle) -> f64 {
        self.distance_to(circle.center()) - circle.radius()
    }

    /// Signed distance; positive on the side the normal `(a, b)` points to.
    #[must_use]
    pub fn signed_distance_to(&self, point: &Point) -> f64 {
        self.dot(point) / self.weight()
    }

    /// Signed distance to the circle's center, moved towards the line by the
    /// radius. A center exactly on the line keeps distance zero.
    #[must_use]
    pub fn signed_distance_to_circle(&self, circle: &Circle) -> f64 {
        let d = self.signed_distance_to(circle.center());
        d - sign(d) * circle.radius()
    }

    /// The vector from the projection of `point` to `point`.
    #[must_use]
    pub fn vector_to(&self, point: &Point) -> Vector {
        self.closest_point(point).vector_to(point)
    }

    /// The point at signed arclength `t` from [`Line::center`] along
    /// [`Line::direction`].
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let (a, b, c) = self.coords();
        let w = self.weight();
        let w2 = w * w;
        Point::new((b * w * t - a * c) / w2, (-a * w * t - b * c) / w2)
    }

    /// Whether both lines describe the same locus.
    ///
    /// Coefficients are compared exactly after cross-scaling by the other
    /// line's weight, so `(a, b, c)` and `(-a, -b, -c)` are coincident, but
    /// lines that differ by rounding are not.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_coincident(&self, other: &Line) -> bool {
        let (w1, w2) = (self.weight(), other.weight());
        let agrees = |s: f64| {
            self.a * w2 == s * other.a * w1
                && self.b * w2 == s * other.b * w1
                && self.c * w2 == s * other.c * w1
        };
        agrees(1.0) || agrees(-1.0)
    }

    /// Whether `point` satisfies the line equation exactly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains(&self, point: &Point) -> bool {
        self.dot(point) == 0.0
    }
}

impl Add for Line {
    type Output = Line;

    fn add(self, rhs: Line) -> Line {
        Line::new(self.a + rhs.a, self.b + rhs.b, self.c + rhs.c)
    }
}

impl Sub for Line {
    type Output = Line;

    fn sub(self, rhs: Line) -> Line {
        Line::new(self.a - rhs.a, self.b - rhs.b, self.c - rhs.c)
    }
}

impl Neg for Line {
    type Output = Line;

    fn neg(self) -> Line {
        Line::new(-self.a, -self.b, -self.c)
    }
}

impl Mul<f64> for Line {
    type Output = Line;

    fn mul(self, factor: f64) -> Line {
        Line::new(factor * self.a, factor * self.b, factor * self.c)
    }
}

impl Mul<Line> for f64 {
    type Output = Line;

    fn mul(self, line: Line) -> Line {
        line * self
    }
}

impl Div<f64> for Line {
    type Output = Line;

    fn div(self, divisor: f64) -> Line {
        Line::new(self.a / divisor, self.b / divisor, self.c / divisor)
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Point {
        self.point_at(t)
    }

    fn tangent(&self, _t: f64) -> Vector {
        self.direction()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Renders `a*x + b*y + c = 0`, omitting zero terms.
impl fmt::Display for Line {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = [(self.a, "*x"), (self.b, "*y"), (self.c, "")];
        let mut first = true;
        for (coefficient, suffix) in terms {
            if coefficient == 0.0 {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            write_scalar(f, coefficient)?;
            f.write_str(suffix)?;
            first = false;
        }
        if first {
            f.write_str("0")?;
        }
        f.write_str(" = 0")
    }
}
