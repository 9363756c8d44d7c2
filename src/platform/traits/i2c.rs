//! I2C transport trait

use crate::platform::Result;

/// Byte transport to one or more 7-bit I2C devices
///
/// Two primitives only. The LSM303D register pointer does not advance on its
/// own in the mode this crate uses, so a register read is always composed as
/// a one byte pointer write followed by a separate one byte read; a combined
/// repeated-start transfer is not offered.
///
/// Implementations own the bus exclusively. Short transfers must be reported
/// as errors, never as partially filled buffers.
pub trait I2cInterface {
    /// One write transaction (START, ADDR+W, `data`, STOP)
    ///
    /// # Errors
    ///
    /// `PlatformError::I2c` on NACK, bus fault or short write.
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// One read transaction filling all of `buffer` (START, ADDR+R, data, STOP)
    ///
    /// # Errors
    ///
    /// `PlatformError::I2c` on NACK, bus fault or short read.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;
}
