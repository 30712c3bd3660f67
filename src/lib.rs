pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ConicError, GeometryError, Result, SolverError};
pub use geometry::{Circle, Curve, CurveDomain, Ellipse, Line};
pub use math::{Point, Vector};
