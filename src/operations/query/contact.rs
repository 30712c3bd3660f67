use tracing::debug;

use crate::error::Result;
use crate::geometry::{Circle, Ellipse};
use crate::math::{bisection_root, Point, LOOSE_TOLERANCE};

/// Result of an arc/ellipse contact search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResult {
    /// Angle on the arc at which the probe touches the ellipse.
    pub angle: f64,
    /// The probe circle placed at `angle`.
    pub probe: Circle,
    /// The ellipse point closest to the probe's center.
    pub contact: Point,
    /// Remaining separation between probe and ellipse; near zero.
    pub distance: f64,
}

/// Finds where a probe circle swept along a circular arc first touches an
/// ellipse.
///
/// The probe is centered at `arc.point_at(u)`; the search looks for the `u`
/// at which the signed probe/ellipse separation vanishes, using bisection
/// over the arc angle and the fixed-point closest-point solve at every
/// evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ArcEllipseContact {
    ellipse: Ellipse,
    arc: Circle,
    probe: Circle,
    tolerance: f64,
}

impl ArcEllipseContact {
    /// Creates a new `ArcEllipseContact` query.
    ///
    /// # Errors
    ///
    /// Returns an error if `probe_radius` is not a valid circle radius.
    pub fn new(ellipse: Ellipse, arc: Circle, probe_radius: f64) -> Result<Self> {
        let probe = Circle::new(*arc.center(), probe_radius)?;
        Ok(Self {
            ellipse,
            arc,
            probe,
            tolerance: LOOSE_TOLERANCE,
        })
    }

    /// Sets the tolerance of the search over the arc angle.
    ///
    /// The inner closest-point solve always uses [`LOOSE_TOLERANCE`].
    #[must_use]
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// The probe circle at arc angle `u`.
    #[must_use]
    pub fn probe_at(&self, u: f64) -> Circle {
        self.probe.with_center(self.arc.point_at(u))
    }

    /// Signed separation between the probe at arc angle `u` and the ellipse.
    #[must_use]
    pub fn separation(&self, u: f64) -> f64 {
        self.ellipse
            .distance_to_circle(&self.probe_at(u), LOOSE_TOLERANCE)
    }

    /// Executes the query over the arc angles `[low, high]`.
    ///
    /// The bracket is expanded automatically when the separation has the same
    /// sign at both ends.
    ///
    /// # Errors
    ///
    /// Returns a solver error if no contact angle can be bracketed or the
    /// search does not settle.
    pub fn execute(&self, low: f64, high: f64) -> Result<ContactResult> {
        let angle = bisection_root(|u| self.separation(u), low, high, self.tolerance)?;

        let probe = self.probe_at(angle);
        let contact = self.ellipse.closest_point_to_circle(&probe, LOOSE_TOLERANCE);
        let distance = contact.distance_to_circle(&probe);
        debug!(angle, distance, "arc/ellipse contact found");

        Ok(ContactResult {
            angle,
            probe,
            contact,
            distance,
        })
    }
}
