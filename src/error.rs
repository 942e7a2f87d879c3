//! Error type shared by the fallible operations of this crate.
//!
//! Only genuine precondition violations are errors. Degenerate inputs with
//! a mathematically defined answer (an empty log-sum-exp is −∞, a NaN
//! comparison is `false`) are returned as values and never reach this type.

/// Errors raised by accumulators and resampling routines.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    /// Fewer observations than the statistic needs.
    InsufficientData {
        /// Minimum number of observations for the statistic.
        required: u64,
        /// Observations recorded so far.
        actual: u64,
    },
    /// An input sequence was empty where at least one element is needed.
    EmptyInput,
    /// A configuration value is outside its valid domain.
    InvalidParameter(String),
    /// A computed value came out NaN.
    NonFinite,
}

impl std::fmt::Display for NumericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericError::InsufficientData { required, actual } => write!(
                f,
                "insufficient data: need at least {required} observations, have {actual}"
            ),
            NumericError::EmptyInput => write!(f, "input sequence is empty"),
            NumericError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            NumericError::NonFinite => write!(f, "computation produced a non-finite value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Convenience alias for results carrying a [`NumericError`].
pub type Result<T> = std::result::Result<T, NumericError>;
