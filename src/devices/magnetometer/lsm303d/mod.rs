//! LSM303D eCompass Driver
//!
//! Userspace I2C driver for the magnetometer half of the STMicroelectronics
//! LSM303D, as found on small Raspberry Pi breakout boards.
//!
//! ## Features
//!
//! - Magnetic full scale ±4 gauss, high resolution, 6.25 Hz continuous conversion
//! - Single register transactions only (no auto-increment)
//! - 64 register dump with the reserved slots masked
//! - Heading from X/Y with declination correction
//!
//! ## Usage
//!
//! ```ignore
//! use pi_lsm303d::config::DriverConfig;
//! use pi_lsm303d::devices::magnetometer::Lsm303d;
//! use pi_lsm303d::devices::traits::CompassSensor;
//! use pi_lsm303d::platform::linux::{LinuxI2c, LinuxTimer};
//!
//! let config = DriverConfig::from_env()?;
//! let i2c = LinuxI2c::open(&config.bus_path)?;
//! let mut compass = Lsm303d::open(i2c, LinuxTimer::new(), config)?;
//! compass.initialize()?;
//! let heading = compass.read_heading()?;
//! ```

mod driver;
mod dump;
pub mod registers;

pub use driver::{DeviceState, Lsm303d, ProductId, SensorInfo};
pub use dump::RegisterDump;
