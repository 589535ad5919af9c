use thiserror::Error;

/// Errors raised while de-overlapping.
///
/// Any error aborts the whole call; no partial results are returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeoverlapError {
    /// The input contains a geometry kind the flattener does not
    /// decompose (`Line`, `Rect` or `Triangle`).
    #[error("unsupported geometry type: {kind}")]
    UnsupportedType { kind: &'static str },

    /// Tolerance must be strictly positive and finite.
    #[error("tolerance must be a positive finite distance, got {0}")]
    InvalidTolerance(f64),

    /// An input part carries a NaN or infinite coordinate.
    #[error("{kind} has a non-finite coordinate")]
    NonFiniteCoordinate { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, DeoverlapError>;

pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance > 0. {
        Ok(())
    } else {
        Err(DeoverlapError::InvalidTolerance(tolerance))
    }
}
