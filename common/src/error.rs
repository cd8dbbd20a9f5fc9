use thiserror::Error;

/// Failures detected while validating user input, before any filesystem
/// or process side effect takes place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required key of the argument mapping was not provided.
    #[error("missing required argument '{key}'")]
    MissingKey { key: &'static str },

    /// A dimension token is not an integer.
    #[error("{field} must be a positive integer: got '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    /// A dimension is zero or negative.
    #[error("dimensions must be positive integers: got {width}x{height}")]
    NonPositiveDimensions { width: i64, height: i64 },

    /// A dimension does not fit in 32 bits.
    #[error("{field} is too large: got {value}, at most {max}", max = u32::MAX)]
    DimensionOutOfRange { field: &'static str, value: i64 },

    /// Dimensions must be given as exactly (width, height).
    #[error("expected 2 dimension values (width, height), got {count}")]
    DimensionCount { count: usize },

    /// Resolution magnitude is not a positive integer.
    #[error("resolution must be a positive integer: got '{value}'")]
    InvalidResolution { value: String },

    /// Resolution unit string is not recognised.
    #[error("unit must be one of: PixelsPerInch, PixelsPerCentimeter; got '{value}'")]
    InvalidUnit { value: String },
}
