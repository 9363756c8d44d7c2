//! Magnetometer drivers
//!
//! ## Modules
//!
//! - `lsm303d`: LSM303D driver, register map and dump
//! - `mmc3416`: MMC3416xPJ register protocol (sibling family)
//! - `family`: Device families and capability gating
//! - `register`: Typed register identifiers
//! - `sample`: Raw to milli-Gauss conversion
//! - `heading`: Compass bearing from a sample

pub mod family;
pub mod heading;
pub mod lsm303d;
pub mod mmc3416;
pub mod register;
pub mod sample;

pub use family::{Capabilities, ContinuousFrequency, DeviceFamily};
pub use heading::compute_heading;
pub use lsm303d::{DeviceState, Lsm303d, ProductId, RegisterDump, SensorInfo};
pub use register::{Register, WritableRegister};
pub use sample::{convert_raw, PhysicalSample, RawSample, SENSITIVITY};
