//! Linux host platform
//!
//! - `LinuxI2c`: `/dev/i2c-N` through linux-embedded-hal (requires the `linux` feature)
//! - `LinuxTimer`: std sleep and monotonic clock

#[cfg(feature = "linux")]
mod i2c;
mod timer;

#[cfg(feature = "linux")]
pub use i2c::LinuxI2c;
pub use timer::LinuxTimer;
