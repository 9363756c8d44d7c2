use crate::config::DeviceAddress;
use crate::devices::magnetometer::family::DeviceFamily;
use crate::platform::PlatformError;
use std::fmt;

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Direction of a failed register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => f.write_str("read"),
            Operation::Write => f.write_str("write"),
        }
    }
}

/// Errors that can occur while talking to the sensor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open I2C bus [{path}]: {reason}")]
    TransportOpenFailure { path: String, reason: String },

    #[error("can't find sensor at address [{address}]")]
    DeviceNotFound { address: DeviceAddress },

    #[error("I2C {operation} failure for register {register:#04X}: {source}")]
    Io {
        register: u8,
        operation: Operation,
        #[source]
        source: PlatformError,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("timeout waiting for register {register:#04X} after {attempts} polls")]
    Timeout { register: u8, attempts: u32 },

    #[error("{operation} is not supported by the {family} family")]
    Unsupported {
        operation: &'static str,
        family: DeviceFamily,
    },

    #[error("sensor not initialized")]
    NotInitialized,

    #[error("register {register:#04X} read back {actual:#04X}, expected {expected:#04X}")]
    Verify {
        register: u8,
        expected: u8,
        actual: u8,
    },
}

impl Error {
    /// True if the underlying bus reported a missing acknowledge
    pub fn is_nack(&self) -> bool {
        matches!(
            self,
            Error::Io {
                source: PlatformError::I2c(crate::platform::I2cError::Nack),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::I2cError;

    #[test]
    fn test_io_error_names_register_and_operation() {
        let err = Error::Io {
            register: 0x0F,
            operation: Operation::Read,
            source: PlatformError::I2c(I2cError::Nack),
        };
        assert_eq!(
            err.to_string(),
            "I2C read failure for register 0x0F: I2C error: no acknowledge"
        );
        assert!(err.is_nack());
    }

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout {
            register: 0x07,
            attempts: 100,
        };
        assert_eq!(
            err.to_string(),
            "timeout waiting for register 0x07 after 100 polls"
        );
    }
}
