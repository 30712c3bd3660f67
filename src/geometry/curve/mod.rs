mod circle;
mod ellipse;
mod line;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;

use crate::math::{Point, Vector};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Whether `t` lies within `[t_min, t_max]`.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min && t <= self.t_max
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point;

    /// Unit tangent at parameter `t`, pointing towards increasing `t`.
    ///
    /// Zero where the curve has no direction (e.g. a zero-radius circle).
    fn tangent(&self, t: f64) -> Vector;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}
