//! Linux I2C implementation
//!
//! Wraps the `/dev/i2c-N` character device through `linux-embedded-hal`.
//! The kernel driver binds the slave address per transaction, so the device
//! address is passed on every call exactly as on a microcontroller HAL.
//!
//! # Example
//!
//! ```no_run
//! use pi_lsm303d::platform::{linux::LinuxI2c, traits::I2cInterface};
//!
//! let mut i2c = LinuxI2c::open("/dev/i2c-1")?;
//! i2c.write(0x1D, &[0x0F])?;
//! let mut id = [0u8; 1];
//! i2c.read(0x1D, &mut id)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Error;
use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use embedded_hal::i2c::{Error as HalI2cError, ErrorKind, I2c};
use linux_embedded_hal::I2cdev;

/// Linux I2C implementation using `linux-embedded-hal`
pub struct LinuxI2c {
    i2c: I2cdev,
    path: String,
}

impl LinuxI2c {
    /// Open the I2C bus character device
    ///
    /// # Errors
    ///
    /// Returns `Error::TransportOpenFailure` if the device file cannot be
    /// opened (missing bus, missing permissions, i2c-dev not loaded).
    pub fn open(path: &str) -> std::result::Result<Self, Error> {
        let i2c = I2cdev::new(path).map_err(|e| Error::TransportOpenFailure {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        crate::log_debug!("I2C bus device: [{}]", path);
        Ok(Self {
            i2c,
            path: path.to_string(),
        })
    }

    /// Path of the opened bus device
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl I2cInterface for LinuxI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c.write(addr, data).map_err(map_hal_error)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.read(addr, buffer).map_err(map_hal_error)
    }
}

/// Map embedded-hal I2C errors to platform I2C errors
pub(crate) fn map_hal_error<E: HalI2cError>(error: E) -> PlatformError {
    match error.kind() {
        ErrorKind::NoAcknowledge(_) => PlatformError::I2c(I2cError::Nack),
        ErrorKind::ArbitrationLoss => PlatformError::I2c(I2cError::ArbitrationLost),
        ErrorKind::Overrun => PlatformError::I2c(I2cError::ShortTransfer),
        _ => PlatformError::I2c(I2cError::BusError),
    }
}
