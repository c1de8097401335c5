//! Error types for the fallible constructors.

use thiserror::Error;

/// Rejected widget configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ring width must be finite and non-negative, got {0}")]
    RingWidth(f64),
    #[error("wheel padding must be finite and non-negative, got {0}")]
    Padding(f64),
    #[error("display density must be finite and positive, got {0}")]
    Density(f64),
    #[error("minimum font size must be finite and positive, got {0}")]
    MinFontSize(f64),
    #[error("font step must be finite and positive, got {0}")]
    FontStep(f64),
}

/// Failure to parse a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
    #[error("hex color must have 3, 6 or 8 digits, got {0}")]
    Length(usize),
}
