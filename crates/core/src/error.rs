//! Engine error type.

use std::fmt;

/// Precondition failures raised when building a board or engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Width or height was zero.
    InvalidDimensions { width: u16, height: u16 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimensions { width, height } => write!(
                f,
                "board dimensions must be positive (got {}x{})",
                width, height
            ),
        }
    }
}

impl std::error::Error for EngineError {}
