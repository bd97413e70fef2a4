use rand::distributions::WeightedError;
use thiserror::Error;

/// An error from building graphs, sampling, or rotating states.
#[derive(Debug, Error)]
pub enum UtilError {
    /// An enumerated or ranged argument was outside its allowed values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Sizes or normalization of the supplied data do not agree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    /// The categorical sampler rejected the weights.
    #[error(transparent)]
    Weights(#[from] WeightedError),
    /// An array could not be shaped as requested.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

impl UtilError {
    /// Construct a new invalid argument error.
    pub fn invalid_argument<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(msg.into())
    }

    /// Construct a new dimension mismatch error.
    pub fn dimension_mismatch<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::DimensionMismatch(msg.into())
    }
}

/// A result which may contain a [`UtilError`].
pub type UtilResult<T> = Result<T, UtilError>;
