use crate::axis::DomainExtent;
use crate::constants::Float;
use thiserror::Error;

pub type LbResult<T> = Result<T, LbError>;

#[derive(Error, Debug)]
pub enum LbError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid flow axis {0}: expected 0 (x), 1 (y) or 2 (z)")]
    InvalidAxis(i64),

    #[error("invalid refinement level {0}: expected 1, 2 or 3")]
    InvalidRefinementLevel(i64),

    #[error("invalid periodicity flag {0}: expected 0 or 1")]
    InvalidPeriodicity(i64),

    #[error("geometry has {found} cells but the domain {nx}x{ny}x{nz} needs {expected}")]
    GeometryMismatch {
        nx: usize,
        ny: usize,
        nz: usize,
        expected: usize,
        found: usize,
    },

    #[error("geometry extent {geometry} does not match the domain {domain}")]
    ExtentMismatch {
        geometry: DomainExtent,
        domain: DomainExtent,
    },

    #[error("could not parse geometry value '{token}' at position {position}")]
    GeometryParse { token: String, position: usize },

    #[error("degenerate result: {quantity} is zero (value {value:e}), no flow along the axis")]
    DegenerateResult { quantity: &'static str, value: Float },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
