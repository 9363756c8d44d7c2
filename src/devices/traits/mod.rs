//! Device traits
//!
//! Hardware-independent trait definitions for device drivers, so that
//! consumers of a heading can be tested against mock sensors.

pub mod compass;

pub use compass::{CompassSensor, MagCalibration};
