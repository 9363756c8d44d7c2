//! Platform abstraction layer
//!
//! This module isolates everything that touches the host: the I2C character
//! device and the sleep/clock primitives. Drivers only see the traits.

pub mod error;
pub mod linux;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{I2cError, PlatformError, Result};
pub use traits::{I2cInterface, SleepOutcome, TimerInterface};
