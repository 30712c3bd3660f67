use thiserror::Error;

/// Top-level error type for the conic kernel.
#[derive(Debug, Error, PartialEq)]
pub enum ConicError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors raised while constructing or inspecting primitives.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("{axis} axis must be finite and positive, got {value}")]
    InvalidAxis { axis: &'static str, value: f64 },

    #[error("component index {index} is out of range [0, 1]")]
    IndexOutOfRange { index: usize },
}

/// Errors raised by the bracketed root finder.
///
/// The fixed-point solver has no failure path and never produces these.
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("no sign change in [{low}, {high}] after {attempts} bracket expansions")]
    InvalidBracket { low: f64, high: f64, attempts: usize },

    #[error("tolerance {tol} is too small: bracket still wide after {iterations} bisections")]
    ToleranceTooSmall { tol: f64, iterations: usize },

    #[error("bracket [{low}, {high}] lost its sign change at midpoint {mid}")]
    InvalidState { low: f64, mid: f64, high: f64 },
}

/// Convenience type alias for results using [`ConicError`].
pub type Result<T> = std::result::Result<T, ConicError>;
