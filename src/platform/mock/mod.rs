//! Simulated platform for host tests
//!
//! `MockI2c` behaves like a single register-file device and logs every
//! transaction; `MockTimer` advances a simulated clock and can be scripted to
//! interrupt sleeps. Compiled for unit tests and with the `mock` feature
//! (used by the integration tests).
//!
//! # Example
//!
//! ```
//! use pi_lsm303d::platform::mock::MockI2c;
//! use pi_lsm303d::platform::traits::I2cInterface;
//!
//! let mut i2c = MockI2c::new(0x1D);
//! i2c.set_register(0x0F, 0x49);
//! i2c.write(0x1D, &[0x0F]).unwrap();
//! let mut id = [0u8; 1];
//! i2c.read(0x1D, &mut id).unwrap();
//! assert_eq!(id, [0x49]);
//! ```

#![cfg(any(test, feature = "mock"))]

mod i2c;
mod timer;

pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
