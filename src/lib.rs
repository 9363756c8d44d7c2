//! pi_lsm303d - LSM303D eCompass driver for Linux I2C
//!
//! This library provides a platform abstraction over the I2C bus and the
//! sleep primitive, the LSM303D magnetometer driver, and the heading
//! calculation. The `getlsm303d` binary is a thin command line front end.

// Platform abstraction layer (Linux I2C character device, host timer, mocks)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core systems (logging, delay)
pub mod core;

pub mod config;
pub mod error;

pub use error::{Error, Result};
