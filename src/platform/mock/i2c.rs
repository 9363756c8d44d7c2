//! Mock I2C implementation for testing
//!
//! Simulates a single register-file device behind one 7-bit address:
//! a one byte write sets the register pointer, a longer write stores the
//! following byte at the pointer, and a read returns the register under the
//! pointer. The pointer never auto-increments, so a multi-byte read repeats
//! the same register, exactly like the LSM303D in the mode this crate uses.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use std::collections::VecDeque;
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification and allows
/// pre-programming read data and transaction failures.
#[derive(Debug)]
pub struct MockI2c {
    device_addr: u8,
    registers: [u8; 256],
    pointer: u8,
    transactions: Vec<I2cTransaction>,
    read_data: VecDeque<u8>,
    faults: VecDeque<(usize, I2cError)>,
}

impl MockI2c {
    /// Create a new mock device answering at `device_addr`, all registers zero
    pub fn new(device_addr: u8) -> Self {
        Self {
            device_addr,
            registers: [0; 256],
            pointer: 0,
            transactions: Vec::new(),
            read_data: VecDeque::new(),
            faults: VecDeque::new(),
        }
    }

    /// Create a mock device with the first `image.len()` registers preloaded
    pub fn with_registers(device_addr: u8, image: &[u8]) -> Self {
        let mut i2c = Self::new(device_addr);
        i2c.registers[..image.len()].copy_from_slice(image);
        i2c
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Queue bytes returned by subsequent reads ahead of the register image
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_data = data.iter().copied().collect();
    }

    /// Set a register value in the simulated device
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.registers[reg as usize] = value;
    }

    /// Current value of a simulated register
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[reg as usize]
    }

    /// Fail the transaction `n` positions from now (0 = the next one)
    pub fn fail_transaction(&mut self, n: usize, error: I2cError) {
        self.faults.push_back((self.transactions.len() + n, error));
    }

    fn check(&mut self, addr: u8) -> Result<()> {
        let index = self.transactions.len() - 1;
        if let Some(pos) = self.faults.iter().position(|(i, _)| *i == index) {
            if let Some((_, error)) = self.faults.remove(pos) {
                return Err(PlatformError::I2c(error));
            }
        }
        if addr != self.device_addr {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        self.check(addr)?;

        if let Some((&reg, values)) = data.split_first() {
            self.pointer = reg;
            for &value in values {
                self.registers[reg as usize] = value;
            }
        }
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });
        self.check(addr)?;

        if !self.read_data.is_empty() {
            let to_read = std::cmp::min(buffer.len(), self.read_data.len());
            for slot in buffer[..to_read].iter_mut() {
                *slot = self.read_data.pop_front().unwrap_or_default();
            }
        } else {
            buffer.fill(self.registers[self.pointer as usize]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2c_write() {
        let mut i2c = MockI2c::new(0x50);
        i2c.write(0x50, &[0x01, 0x02]).unwrap();

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(
            transactions[0],
            I2cTransaction::Write {
                addr: 0x50,
                data: vec![0x01, 0x02]
            }
        );
        assert_eq!(i2c.register(0x01), 0x02);
    }

    #[test]
    fn test_mock_i2c_pointer_read() {
        let mut i2c = MockI2c::new(0x51);
        i2c.set_register(0x0F, 0x49);

        let mut buffer = [0u8; 1];
        i2c.write(0x51, &[0x0F]).unwrap();
        i2c.read(0x51, &mut buffer).unwrap();

        assert_eq!(buffer, [0x49]);
        assert_eq!(
            i2c.transactions()[1],
            I2cTransaction::Read { addr: 0x51, len: 1 }
        );
    }

    #[test]
    fn test_mock_i2c_no_auto_increment() {
        let mut i2c = MockI2c::with_registers(0x1D, &[0x10, 0x20, 0x30]);

        let mut buffer = [0u8; 3];
        i2c.write(0x1D, &[0x00]).unwrap();
        i2c.read(0x1D, &mut buffer).unwrap();

        assert_eq!(buffer, [0x10, 0x10, 0x10]);
    }

    #[test]
    fn test_mock_i2c_read_data_queue() {
        let mut i2c = MockI2c::new(0x52);
        i2c.set_read_data(&[0xAA, 0xBB]);

        let mut buffer = [0u8; 1];
        i2c.read(0x52, &mut buffer).unwrap();
        assert_eq!(buffer, [0xAA]);
        i2c.read(0x52, &mut buffer).unwrap();
        assert_eq!(buffer, [0xBB]);
        // Queue drained, falls back to the register image
        i2c.read(0x52, &mut buffer).unwrap();
        assert_eq!(buffer, [0x00]);
    }

    #[test]
    fn test_mock_i2c_wrong_address_nacks() {
        let mut i2c = MockI2c::new(0x1D);
        let result = i2c.write(0x1E, &[0x0F]);
        assert_eq!(result, Err(PlatformError::I2c(I2cError::Nack)));
        assert_eq!(i2c.transactions().len(), 1);
    }

    #[test]
    fn test_mock_i2c_injected_fault() {
        let mut i2c = MockI2c::new(0x1D);
        i2c.fail_transaction(1, I2cError::ShortTransfer);

        assert!(i2c.write(0x1D, &[0x0F]).is_ok());
        let mut buffer = [0u8; 1];
        assert_eq!(
            i2c.read(0x1D, &mut buffer),
            Err(PlatformError::I2c(I2cError::ShortTransfer))
        );
        // One-shot: the next read succeeds
        assert!(i2c.read(0x1D, &mut buffer).is_ok());
    }
}
