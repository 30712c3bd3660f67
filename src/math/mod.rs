pub mod numerical;
mod point;
mod vector;

use std::fmt;

pub use numerical::{
    bisection_root, fixed_point_iteration, fixed_point_iteration_with_status, FixedPoint,
    LOOSE_TOLERANCE, MAX_ITERATIONS, TIGHT_TOLERANCE,
};
pub use point::Point;
pub use vector::Vector;

/// Global geometric tolerance used when validating constructor inputs.
pub const TOLERANCE: f64 = 1e-10;

/// Sign of `value` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f64::signum`], both zeros (and NaN) map to `0.0`.
#[must_use]
pub(crate) fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Writes a scalar, honoring the formatter's precision if one was requested.
pub(crate) fn write_scalar(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{value:.precision$}"),
        None => write!(f, "{value}"),
    }
}
