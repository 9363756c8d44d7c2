//! Platform error types
//!
//! Transport failures are small `Copy` values so they can be carried inside
//! the driver error without allocation.

use std::fmt;

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Transport implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// I2C transaction failed
    I2c(I2cError),
}

/// I2C transaction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// Bus level fault reported by the adapter
    BusError,
    /// Address or data byte not acknowledged
    Nack,
    /// Another master won arbitration
    ArbitrationLost,
    /// Fewer bytes transferred than requested
    ShortTransfer,
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            I2cError::BusError => "bus error",
            I2cError::Nack => "no acknowledge",
            I2cError::ArbitrationLost => "arbitration lost",
            I2cError::ShortTransfer => "short transfer",
        };
        f.write_str(text)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::I2c(e) => write!(f, "I2C error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<I2cError> for PlatformError {
    fn from(e: I2cError) -> Self {
        PlatformError::I2c(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_i2c_error() {
        let err = PlatformError::I2c(I2cError::Nack);
        assert_eq!(err.to_string(), "I2C error: no acknowledge");
    }

    #[test]
    fn test_from_i2c_error() {
        let err: PlatformError = I2cError::ShortTransfer.into();
        assert_eq!(err, PlatformError::I2c(I2cError::ShortTransfer));
    }
}
