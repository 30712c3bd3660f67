//! Scalar solvers shared by the ellipse queries and by contact searches.
//!
//! Both solvers take the scalar function as a closure. A closure that
//! captures and mutates shared state is the caller's concern; the solvers
//! themselves hold only local state.

use tracing::{debug, trace, warn};

use crate::error::{Result, SolverError};

/// Iteration cap shared by both solvers.
pub const MAX_ITERATIONS: usize = 128;

/// Tolerance suited to nested solves (e.g. a fixed-point solve inside a root search).
pub const LOOSE_TOLERANCE: f64 = 1e-6;

/// Tolerance suited to standalone, high-accuracy solves.
pub const TIGHT_TOLERANCE: f64 = 1e-10;

/// Outcome of a fixed-point iteration, including whether it settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPoint {
    /// The last iterate.
    pub value: f64,
    /// Number of times the function was applied.
    pub iterations: usize,
    /// Whether the last step was within tolerance.
    pub converged: bool,
}

/// Iterates `x <- f(x)` from `x_init` until successive iterates differ by at
/// most `tol`, or [`MAX_ITERATIONS`] is reached.
///
/// Always returns the last iterate. Divergence and oscillation are not
/// reported here; `f` being a contraction near the sought fixed point is the
/// caller's responsibility. Use [`fixed_point_iteration_with_status`] to see
/// whether the iteration settled.
pub fn fixed_point_iteration<F>(f: F, x_init: f64, tol: f64) -> f64
where
    F: FnMut(f64) -> f64,
{
    fixed_point_iteration_with_status(f, x_init, tol).value
}

/// Same iteration as [`fixed_point_iteration`], also reporting the iteration
/// count and convergence status.
pub fn fixed_point_iteration_with_status<F>(mut f: F, x_init: f64, tol: f64) -> FixedPoint
where
    F: FnMut(f64) -> f64,
{
    let mut x = x_init;
    let mut iterations = 0;
    loop {
        iterations += 1;
        let x_old = x;
        x = f(x);
        let step = (x - x_old).abs();
        let converged = step <= tol;
        // A NaN step ends the iteration as well; it can never shrink.
        if converged || step.is_nan() || iterations >= MAX_ITERATIONS {
            if converged {
                trace!(iterations, value = x, "fixed-point iteration converged");
            } else {
                warn!(iterations, step, tol, "fixed-point iteration did not converge");
            }
            return FixedPoint {
                value: x,
                iterations,
                converged,
            };
        }
    }
}

/// Finds a root of `f` in `[low, high]` by bisection.
///
/// If `f(low)` and `f(high)` share a sign, the bracket is stretched outward
/// (`low' = (3 low - high) / 2`, `high' = (3 high - low) / 2`) until a sign
/// change appears. Bisection stops when `|f(mid)| <= tol` or the bracket
/// half-width is at most `tol`; the last midpoint is returned.
///
/// # Errors
///
/// - [`SolverError::InvalidBracket`] if no sign change is found within
///   [`MAX_ITERATIONS`] expansions.
/// - [`SolverError::InvalidState`] if the bracket stops enclosing a sign
///   change, which can only happen for a discontinuous or NaN-producing `f`.
/// - [`SolverError::ToleranceTooSmall`] if the width criterion is not met
///   within [`MAX_ITERATIONS`] bisections.
pub fn bisection_root<F>(mut f: F, low: f64, high: f64, tol: f64) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let (mut x_low, mut x_high) = (low, high);
    let (mut f_low, mut f_high) = (f(x_low), f(x_high));

    let mut attempts = 0;
    loop {
        if f_low.abs() <= tol {
            return Ok(x_low);
        }
        if f_high.abs() <= tol {
            return Ok(x_high);
        }
        if f_low * f_high <= 0.0 || f_low.is_nan() || f_high.is_nan() {
            break;
        }
        if attempts >= MAX_ITERATIONS {
            return Err(SolverError::InvalidBracket {
                low,
                high,
                attempts,
            }
            .into());
        }
        attempts += 1;
        (x_low, x_high) = ((3.0 * x_low - x_high) / 2.0, (3.0 * x_high - x_low) / 2.0);
        (f_low, f_high) = (f(x_low), f(x_high));
        debug!(attempts, x_low, x_high, "expanded bisection bracket");
    }

    let mut iterations = 0;
    loop {
        iterations += 1;
        #[allow(clippy::manual_midpoint)]
        let x_mid = (x_low + x_high) / 2.0;
        let f_mid = f(x_mid);
        if f_mid.abs() <= tol {
            debug!(iterations, root = x_mid, "bisection hit residual tolerance");
            return Ok(x_mid);
        }

        if f_low * f_mid < 0.0 {
            x_high = x_mid;
            f_high = f_mid;
        } else if f_high * f_mid < 0.0 {
            x_low = x_mid;
            f_low = f_mid;
        } else {
            return Err(SolverError::InvalidState {
                low: x_low,
                mid: x_mid,
                high: x_high,
            }
            .into());
        }

        if (x_high - x_low).abs() <= 2.0 * tol {
            debug!(iterations, root = x_mid, "bisection bracket collapsed");
            return Ok(x_mid);
        }
        if iterations >= MAX_ITERATIONS {
            return Err(SolverError::ToleranceTooSmall { tol, iterations }.into());
        }
    }
}
