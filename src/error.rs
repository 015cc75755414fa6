use thiserror::Error;

use crate::config::ConfigError;

// ---------------------------
// ## Error Handling
// ---------------------------

/// Everything that can go wrong while computing a chart.
///
/// A chart is either computed in full or not at all: none of these variants
/// carry a partial result.
#[derive(Debug, Error)]
pub enum AstrologyError {
    /// Malformed time of birth, offset or location.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Calendar components outside their range (month 13, day 32, ...).
    #[error("Invalid Date: {year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// An internal invariant did not hold. Fatal to the request only.
    #[error("Calculation Error: {0}")]
    Computation(String),

    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
}

impl AstrologyError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AstrologyError::InvalidInput(message.into())
    }

    pub fn computation(message: impl Into<String>) -> Self {
        AstrologyError::Computation(message.into())
    }

    /// True for the errors a caller caused, as opposed to internal failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AstrologyError::InvalidInput(_) | AstrologyError::InvalidDate { .. }
        )
    }
}

pub type CalculationResult<T> = Result<T, AstrologyError>;
