//! Device drivers
//!
//! Drivers are written against the platform abstraction traits only.
//!
//! ## Modules
//!
//! - `magnetometer`: LSM303D driver, sibling MMC3416 protocol, sample
//!   conversion and heading
//! - `traits`: Device trait definitions (`CompassSensor`, calibration)

pub mod magnetometer;
pub mod traits;
