//! Error types for klinechart-ta.

use thiserror::Error;

/// Result type alias for indicator operations.
pub type Result<T> = std::result::Result<T, IndicatorError>;

/// Error types for the indicator engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Bar x-coordinates decrease at the given index.
    #[error("Input is not ordered by x: bar {index} precedes its predecessor")]
    UnorderedInput { index: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl IndicatorError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an unordered input error.
    pub fn unordered_input(index: usize) -> Self {
        Self::UnorderedInput { index }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Reject a zero period.
pub(crate) fn require_period(name: &str, period: usize) -> Result<()> {
    if period == 0 {
        return Err(IndicatorError::invalid_parameter(format!(
            "{name} period must be > 0"
        )));
    }
    Ok(())
}

/// Reject a smoothing weight outside `1..=period`.
pub(crate) fn require_weight(name: &str, weight: usize, period: usize) -> Result<()> {
    if weight == 0 || weight > period {
        return Err(IndicatorError::invalid_parameter(format!(
            "{name} weight must be in 1..={period}, got {weight}"
        )));
    }
    Ok(())
}
