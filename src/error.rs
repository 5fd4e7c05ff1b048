//! Error types for the pitch correction engine

use std::fmt;

/// Errors that can occur during a correction pass
#[derive(Debug, Clone)]
pub enum CorrectionError {
    /// A configuration field is outside its declared bound
    InvalidConfig(String),

    /// Invalid input parameters (caller contract violation)
    InvalidInput(String),

    /// The injected pitch-shift primitive failed or returned unusable output
    ShiftPrimitive(String),
}

impl fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            CorrectionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CorrectionError::ShiftPrimitive(msg) => write!(f, "Shift primitive failure: {}", msg),
        }
    }
}

impl std::error::Error for CorrectionError {}
