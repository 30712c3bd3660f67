use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::math::{fixed_point_iteration, sign, write_scalar, Point, Vector, TOLERANCE};

use super::{Circle, Curve, CurveDomain, Line};

/// An axis-aligned ellipse in the plane.
///
/// `P(t) = center + (major_axis * cos t, minor_axis * sin t)`
///
/// `major_axis` is the semi-axis along X and `minor_axis` the semi-axis along
/// Y; no ordering between them is enforced. `t` is the parametric (eccentric)
/// angle, so evenly spaced `t` does not give evenly spaced arclength.
///
/// There is no closed form for the closest point of an ellipse. The queries
/// below reduce it to a fixed point in `z = tan t` and solve that with
/// [`fixed_point_iteration`], always in the frame where the longer semi-axis
/// lies along X, so tall ellipses are solved transposed. Neither failure mode
/// below is reported as an error:
///
/// - Near the shorter axis the iteration may stop at the iteration cap and
///   return its last iterate.
/// - For interior points on the longer axis `z = 0` is an exact but unstable
///   fixed point, so `with_axes(3.0, 2.0)` maps `(1, 0)` to the vertex `(3, 0)`
///   rather than to `(1.8, ±1.6)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: Point,
    major_axis: f64,
    minor_axis: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAxis`] if either semi-axis is not
    /// finite or smaller than [`TOLERANCE`].
    pub fn new(center: Point, major_axis: f64, minor_axis: f64) -> Result<Self> {
        for (axis, value) in [("major", major_axis), ("minor", minor_axis)] {
            if !value.is_finite() || value < TOLERANCE {
                return Err(GeometryError::InvalidAxis { axis, value }.into());
            }
        }
        Ok(Self {
            center,
            major_axis,
            minor_axis,
        })
    }

    /// Creates an ellipse centered at the origin.
    ///
    /// # Errors
    ///
    /// Same as [`Ellipse::new`].
    pub fn with_axes(major_axis: f64, minor_axis: f64) -> Result<Self> {
        Self::new(Point::origin(), major_axis, minor_axis)
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// Returns the semi-axis along X.
    #[must_use]
    pub fn major_axis(&self) -> f64 {
        self.major_axis
    }

    /// Returns the semi-axis along Y.
    #[must_use]
    pub fn minor_axis(&self) -> f64 {
        self.minor_axis
    }

    /// Whether both semi-axes are equal, making the ellipse a circle.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_circular(&self) -> bool {
        self.major_axis == self.minor_axis
    }

    /// The point at parametric angle `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.center + Vector::elliptical(self.major_axis, self.minor_axis, t)
    }

    /// The point of the ellipse closest to `point`, solved to tolerance `tol`
    /// in `tan t`.
    ///
    /// The iterated relation divides by the difference of the squared
    /// semi-axes, so a circular ellipse is answered with the circle closed
    /// form instead. A query point on the shorter axis maps straight to the
    /// nearer vertex; the center itself maps to the positive end of the longer
    /// axis.
    #[must_use]
    pub fn closest_point(&self, point: &Point, tol: f64) -> Point {
        let delta = *point - self.center;
        let (dx, dy) = (delta.x(), delta.y());
        let (rx, ry) = (self.major_axis, self.minor_axis);

        if self.is_circular() {
            trace!("circular ellipse, using circle closed form");
            return self.center + Vector::polar(rx, dy.atan2(dx));
        }

        let t = if ry > rx {
            // Swapping X and Y maps t to π/2 - t.
            FRAC_PI_2 - wide_closest_angle(dy, dx, ry, rx, tol)
        } else {
            wide_closest_angle(dx, dy, rx, ry, tol)
        };
        self.point_at(t)
    }

    /// Closest point to the circle's center.
    ///
    /// The circle is treated as its center only. The radius is applied by the
    /// caller (see [`Ellipse::distance_to_circle`]), so for a circle with
    /// positive radius this is an approximation of the true contact point.
    #[must_use]
    pub fn closest_point_to_circle(&self, circle: &Circle, tol: f64) -> Point {
        self.closest_point(circle.center(), tol)
    }

    /// The point of the ellipse closest to `line`.
    ///
    /// Solves for the tangent point whose tangent is parallel to the line and
    /// returns the one of the antipodal pair nearer the line. For a line that
    /// cuts the ellipse this is a tangent point, not an intersection, except
    /// when the line passes through the center, where an intersection along
    /// the line's direction is returned.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn closest_point_to_line(&self, line: &Line, tol: f64) -> Point {
        let (a, b, c) = line.coords();
        // Offset of the line relative to the ellipse center.
        let c = c + a * self.center.x() + b * self.center.y();
        let (rx, ry) = (self.major_axis, self.minor_axis);

        if c == 0.0 {
            return self.point_at((-a * rx).atan2(b * ry));
        }

        let t = if a == 0.0 {
            FRAC_PI_2
        } else {
            let iterate = |z: f64| {
                (b * ry - a * rx * z) * (a * rx + b * ry * z) / (a * c * rx * (1.0 + z * z).sqrt())
                    + (b * ry) / (a * rx)
            };
            fixed_point_iteration(iterate, 0.0, tol).atan()
        };

        let near = self.point_at(t);
        let far = self.point_at(t + PI);
        if line.dot(&near).abs() <= line.dot(&far).abs() {
            near
        } else {
            far
        }
    }

    /// Distance from `point` to its closest point on the ellipse.
    #[must_use]
    pub fn distance_to_point(&self, point: &Point, tol: f64) -> f64 {
        self.closest_point(point, tol).distance_to(point)
    }

    /// Signed distance from the closest point to the circle's center, less the
    /// radius. Negative when the circle reaches across the ellipse.
    #[must_use]
    pub fn distance_to_circle(&self, circle: &Circle, tol: f64) -> f64 {
        self.closest_point_to_circle(circle, tol)
            .distance_to_circle(circle)
    }
}

/// Parametric angle of the closest point to `(dx, dy)`, relative to the
/// center, on an ellipse with `rx > ry`.
#[allow(clippy::float_cmp)]
fn wide_closest_angle(dx: f64, dy: f64, rx: f64, ry: f64, tol: f64) -> f64 {
    if dx == 0.0 {
        return sign(dy) * FRAC_PI_2;
    }
    let q = rx * rx - ry * ry;
    let a = 2.0 * dx * rx / q;
    let b = 2.0 * dy * ry / q;
    // Same side of the shorter axis as the query point.
    let s = sign(dx);
    let iterate = |z: f64| (b + s * 2.0 * z / (1.0 + z * z).sqrt()) / a;
    let z = fixed_point_iteration(iterate, 0.0, tol);
    if s > 0.0 {
        z.atan()
    } else {
        z.atan() + PI
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Point {
        self.point_at(t)
    }

    fn tangent(&self, t: f64) -> Vector {
        Vector::new(-self.major_axis * t.sin(), self.minor_axis * t.cos()).normalize()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ellipse(x=")?;
        write_scalar(f, self.center.x())?;
        f.write_str(", y=")?;
        write_scalar(f, self.center.y())?;
        f.write_str(", rx=")?;
        write_scalar(f, self.major_axis)?;
        f.write_str(", ry=")?;
        write_scalar(f, self.minor_axis)?;
        f.write_str(")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ConicError;
    use crate::math::TIGHT_TOLERANCE;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    fn ellipse_3_2() -> Ellipse {
        Ellipse::with_axes(3.0, 2.0).unwrap()
    }

    fn assert_point_eq(actual: &Point, x: f64, y: f64) {
        assert_abs_diff_eq!(actual.x(), x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y(), y, epsilon = 1e-9);
    }

    /// Brute-force minimum distance over a dense sampling of the ellipse.
    fn sampled_distance(e: &Ellipse, p: &Point) -> f64 {
        (0..36_000)
            .map(|i| e.point_at(TAU * f64::from(i) / 36_000.0).distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn assert_is_closest(e: &Ellipse, p: &Point) {
        let q = e.closest_point(p, TIGHT_TOLERANCE);
        let local = q - *e.center();
        let (rx, ry) = (e.major_axis(), e.minor_axis());

        // On the ellipse.
        let level = (local.x() / rx).powi(2) + (local.y() / ry).powi(2);
        assert_abs_diff_eq!(level, 1.0, epsilon = 1e-9);

        // Query point lies along the normal at q.
        let tangent = Vector::new(-rx * local.y() / ry, ry * local.x() / rx);
        assert_abs_diff_eq!((*p - q).dot(&tangent.normalize()), 0.0, epsilon = 1e-8);

        // No sampled point is nearer.
        assert!(q.distance_to(p) <= sampled_distance(e, p) + 1e-9);
    }

    #[test]
    fn point_at_vertices() {
        let e = Ellipse::new(Point::new(1.0, -1.0), 3.0, 2.0).unwrap();
        assert_point_eq(&e.point_at(0.0), 4.0, -1.0);
        assert_point_eq(&e.point_at(FRAC_PI_2), 1.0, 1.0);
        assert_point_eq(&e.point_at(PI), -2.0, -1.0);
        assert_point_eq(&e.point_at(3.0 * FRAC_PI_2), 1.0, -3.0);
    }

    #[test]
    fn closest_point_in_every_quadrant() {
        let e = ellipse_3_2();
        for (x, y) in [(5.0, 4.0), (-5.0, 4.0), (-5.0, -4.0), (5.0, -4.0)] {
            let p = Point::new(x, y);
            assert_is_closest(&e, &p);
            let q = e.closest_point(&p, TIGHT_TOLERANCE);
            assert_eq!(q.x().signum(), x.signum());
            assert_eq!(q.y().signum(), y.signum());
        }
    }

    #[test]
    fn closest_point_off_center() {
        let e = Ellipse::new(Point::new(-2.0, 3.0), 4.0, 1.5).unwrap();
        assert_is_closest(&e, &Point::new(3.0, 5.0));
        assert_is_closest(&e, &Point::new(-8.0, 1.0));
    }

    #[test]
    fn closest_point_on_major_axis() {
        let e = ellipse_3_2();
        assert_eq!(e.closest_point(&Point::new(5.0, 0.0), TIGHT_TOLERANCE), Point::new(3.0, 0.0));
        assert_point_eq(&e.closest_point(&Point::new(-5.0, 0.0), TIGHT_TOLERANCE), -3.0, 0.0);
        assert_eq!(e.distance_to_point(&Point::new(5.0, 0.0), TIGHT_TOLERANCE), 2.0);
    }

    #[test]
    fn interior_point_on_major_axis_settles_on_vertex() {
        // z = 0 is a fixed point of the iteration; the true nearest point is (1.8, ±1.6).
        let e = ellipse_3_2();
        let q = e.closest_point(&Point::new(1.0, 0.0), TIGHT_TOLERANCE);
        assert_eq!(q, Point::new(3.0, 0.0));
        assert!(q.distance_to(&Point::new(1.0, 0.0)) > sampled_distance(&e, &Point::new(1.0, 0.0)));
    }

    #[test]
    fn closest_point_on_minor_axis_skips_iteration() {
        let e = ellipse_3_2();
        assert_point_eq(&e.closest_point(&Point::new(0.0, 5.0), TIGHT_TOLERANCE), 0.0, 2.0);
        assert_point_eq(&e.closest_point(&Point::new(0.0, -5.0), TIGHT_TOLERANCE), 0.0, -2.0);
        assert_eq!(e.closest_point(&Point::origin(), TIGHT_TOLERANCE), Point::new(3.0, 0.0));
    }

    #[test]
    fn circular_ellipse_uses_closed_form() {
        let e = Ellipse::with_axes(2.0, 2.0).unwrap();
        assert!(e.is_circular());
        let q = e.closest_point(&Point::new(3.0, 4.0), TIGHT_TOLERANCE);
        assert_point_eq(&q, 1.2, 1.6);
        assert!(q.x().is_finite() && q.y().is_finite());
    }

    #[test]
    fn closest_point_is_idempotent() {
        let e = ellipse_3_2();
        let first = e.closest_point(&Point::new(5.0, 1.0), TIGHT_TOLERANCE);
        let second = e.closest_point(&first, TIGHT_TOLERANCE);
        assert!(first.distance_to(&second) < 1e-8);
    }

    #[test]
    fn closest_point_on_tall_ellipse() {
        let tall = Ellipse::with_axes(1.0, 3.0).unwrap();
        for (x, y) in [(2.0, 1.0), (0.5, 2.9), (-2.0, -1.0), (4.0, -6.0)] {
            assert_is_closest(&tall, &Point::new(x, y));
        }
        let q = tall.closest_point(&Point::new(2.0, 1.0), TIGHT_TOLERANCE);
        assert_abs_diff_eq!(q.x(), 0.954_819_142_6, epsilon = 1e-8);
        assert_abs_diff_eq!(q.y(), 0.891_562_474_0, epsilon = 1e-8);

        let off_center = Ellipse::new(Point::new(1.0, -2.0), 1.5, 4.0).unwrap();
        assert_is_closest(&off_center, &Point::new(4.0, 3.0));
    }

    #[test]
    fn tall_ellipse_axes_and_center() {
        let tall = Ellipse::with_axes(1.0, 3.0).unwrap();
        assert_point_eq(&tall.closest_point(&Point::new(5.0, 0.0), TIGHT_TOLERANCE), 1.0, 0.0);
        assert_point_eq(&tall.closest_point(&Point::new(-5.0, 0.0), TIGHT_TOLERANCE), -1.0, 0.0);
        assert_point_eq(&tall.closest_point(&Point::new(0.0, 5.0), TIGHT_TOLERANCE), 0.0, 3.0);
        assert_point_eq(&tall.closest_point(&Point::origin(), TIGHT_TOLERANCE), 0.0, 3.0);
    }

    #[test]
    fn closest_point_on_tall_ellipse_is_idempotent() {
        for (e, p) in [
            (Ellipse::with_axes(1.0, 3.0).unwrap(), Point::new(2.0, 1.0)),
            (Ellipse::with_axes(2.0, 3.0).unwrap(), Point::new(4.0, 1.0)),
            (Ellipse::with_axes(1.0, 3.0).unwrap(), Point::new(0.5, 2.9)),
        ] {
            let first = e.closest_point(&p, TIGHT_TOLERANCE);
            let second = e.closest_point(&first, TIGHT_TOLERANCE);
            assert!(first.distance_to(&second) < 1e-8, "{e} from {p}");
        }
        let e = Ellipse::with_axes(2.0, 3.0).unwrap();
        assert_abs_diff_eq!(
            e.distance_to_point(&Point::new(4.0, 1.0), TIGHT_TOLERANCE),
            2.076_855_522_6,
            epsilon = 1e-8
        );
    }

    #[test]
    fn circle_queries_use_center() {
        let e = ellipse_3_2();
        let probe = Circle::new(Point::new(5.0, 0.0), 0.5).unwrap();
        assert_eq!(
            e.closest_point_to_circle(&probe, TIGHT_TOLERANCE),
            e.closest_point(probe.center(), TIGHT_TOLERANCE)
        );
        assert_eq!(e.distance_to_circle(&probe, TIGHT_TOLERANCE), 1.5);

        let overlapping = probe.with_center(Point::new(3.2, 0.0));
        assert!(e.distance_to_circle(&overlapping, TIGHT_TOLERANCE) < 0.0);
    }

    #[test]
    fn closest_point_to_diagonal_line() {
        let e = ellipse_3_2();
        let root13 = 13.0_f64.sqrt();
        let near_side = Line::new(1.0, 1.0, -10.0);
        assert_point_eq(
            &e.closest_point_to_line(&near_side, TIGHT_TOLERANCE),
            9.0 / root13,
            4.0 / root13,
        );
        let far_side = Line::new(1.0, 1.0, 10.0);
        assert_point_eq(
            &e.closest_point_to_line(&far_side, TIGHT_TOLERANCE),
            -9.0 / root13,
            -4.0 / root13,
        );
    }

    #[test]
    fn closest_point_to_line_off_center() {
        let e = Ellipse::new(Point::new(1.0, 1.0), 3.0, 2.0).unwrap();
        let root13 = 13.0_f64.sqrt();
        let line = Line::new(1.0, 1.0, -12.0);
        assert_point_eq(
            &e.closest_point_to_line(&line, TIGHT_TOLERANCE),
            1.0 + 9.0 / root13,
            1.0 + 4.0 / root13,
        );
    }

    #[test]
    fn closest_point_to_horizontal_line() {
        let e = ellipse_3_2();
        let above = Line::new(0.0, 1.0, -5.0);
        let below = Line::new(0.0, 1.0, 5.0);
        assert_point_eq(&e.closest_point_to_line(&above, TIGHT_TOLERANCE), 0.0, 2.0);
        assert_point_eq(&e.closest_point_to_line(&below, TIGHT_TOLERANCE), 0.0, -2.0);
    }

    #[test]
    fn closest_point_to_line_through_center() {
        let e = ellipse_3_2();
        let line = Line::join(&Point::origin(), &Point::new(1.0, 1.0));
        let q = e.closest_point_to_line(&line, TIGHT_TOLERANCE);
        assert_abs_diff_eq!(line.distance_to(&q), 0.0, epsilon = 1e-12);
        let level = (q.x() / 3.0).powi(2) + (q.y() / 2.0).powi(2);
        assert_abs_diff_eq!(level, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_axes() {
        assert_eq!(
            Ellipse::with_axes(0.0, 1.0),
            Err(ConicError::Geometry(GeometryError::InvalidAxis {
                axis: "major",
                value: 0.0,
            }))
        );
        assert!(Ellipse::with_axes(1.0, -2.0).is_err());
        assert!(Ellipse::with_axes(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn curve_interface() {
        let e = ellipse_3_2();
        assert!(e.is_closed());
        assert_eq!(e.domain(), CurveDomain::new(0.0, TAU));
        let t = e.tangent(0.0);
        assert_abs_diff_eq!(t.x(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y(), 1.0, epsilon = 1e-12);
        let diag = e.tangent(FRAC_PI_4);
        assert_abs_diff_eq!(diag.magnitude(), 1.0, epsilon = 1e-12);
        assert_eq!(e.evaluate(1.0), e.point_at(1.0));
    }

    #[test]
    fn display() {
        assert_eq!(
            Ellipse::with_axes(7.0, 1.0).unwrap().to_string(),
            "Ellipse(x=0, y=0, rx=7, ry=1)"
        );
    }
}
