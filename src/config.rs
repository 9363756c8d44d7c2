//! Driver configuration
//!
//! Bus path, sensor address, declination and polling limits are collected in
//! one `DriverConfig` handed to the driver at construction. Nothing here is
//! global.

use crate::devices::magnetometer::family::DeviceFamily;
use crate::error::{Error, Result};
use std::env;
use std::fmt;

/// Raspberry Pi 2/3/4 default I2C bus
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// LSM303D address with SA0 pulled high (board default)
pub const LSM303D_ADDR: DeviceAddress = DeviceAddress(0x1D);

/// LSM303D address with SA0 tied to ground
pub const LSM303D_ADDR_ALT: DeviceAddress = DeviceAddress(0x1E);

/// Milliseconds between data-ready polls
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Status reads before a measurement is declared lost
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 100;

/// 7-bit I2C device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Create an address, rejecting values that do not fit in 7 bits
    pub fn new(addr: u8) -> Result<Self> {
        if addr > 0x7F {
            return Err(Error::InvalidArgument(format!(
                "I2C address {addr:#04X} is not a 7-bit address"
            )));
        }
        Ok(Self(addr))
    }

    /// Parse a hexadecimal address such as `"0x1d"`, `"0X1E"` or `"1d"`
    pub fn parse_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let value = u8::from_str_radix(digits, 16).map_err(|_| {
            Error::InvalidArgument(format!("cannot parse I2C address [{s}] as hex"))
        })?;
        Self::new(value)
    }

    /// Raw 7-bit value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04X}", self.0)
    }
}

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// I2C bus character device
    pub bus_path: String,
    /// Sensor address on the bus
    pub address: DeviceAddress,
    /// Register protocol spoken by the sensor
    pub family: DeviceFamily,
    /// Local magnetic declination in degrees (east positive)
    pub declination: f32,
    /// Emit debug traces of every bus access
    pub verbose: bool,
    /// Sleep between data-ready polls
    pub poll_interval_ms: u32,
    /// Upper bound on data-ready polls per measurement
    pub max_poll_attempts: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bus_path: DEFAULT_BUS_PATH.to_string(),
            address: LSM303D_ADDR,
            family: DeviceFamily::Lsm303d,
            declination: 0.0,
            verbose: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl DriverConfig {
    /// Defaults overridden by `LSM303D_BUS`, `LSM303D_ADDR` and
    /// `LSM303D_DECLINATION` when set
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(bus) = env::var("LSM303D_BUS") {
            config.bus_path = bus;
        }
        if let Ok(addr) = env::var("LSM303D_ADDR") {
            config.address = DeviceAddress::parse_hex(&addr)?;
        }
        if let Ok(decl) = env::var("LSM303D_DECLINATION") {
            config.declination = parse_declination(&decl)?;
        }
        Ok(config)
    }
}

/// Parse a declination value in degrees
pub fn parse_declination(s: &str) -> Result<f32> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("cannot parse declination [{s}]")))?;
    if !value.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "declination [{s}] is not a finite number"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_prefix() {
        assert_eq!(DeviceAddress::parse_hex("0x1d").unwrap(), LSM303D_ADDR);
        assert_eq!(DeviceAddress::parse_hex("0X1E").unwrap(), LSM303D_ADDR_ALT);
    }

    #[test]
    fn test_parse_hex_without_prefix() {
        assert_eq!(DeviceAddress::parse_hex("1d").unwrap().value(), 0x1D);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(
            DeviceAddress::parse_hex("0xzz"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            DeviceAddress::parse_hex(""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_hex_rejects_8_bit() {
        assert!(matches!(
            DeviceAddress::parse_hex("0x80"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_address_display() {
        assert_eq!(LSM303D_ADDR.to_string(), "0x1D");
    }

    #[test]
    fn test_default_config() {
        let config = DriverConfig::default();
        assert_eq!(config.bus_path, "/dev/i2c-1");
        assert_eq!(config.address, LSM303D_ADDR);
        assert_eq!(config.family, DeviceFamily::Lsm303d);
        assert_eq!(config.declination, 0.0);
        assert_eq!(config.poll_interval_ms, 10);
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_declination() {
        assert!((parse_declination("7.73").unwrap() - 7.73).abs() < 1e-6);
        assert!((parse_declination("-3").unwrap() + 3.0).abs() < 1e-6);
        assert!(parse_declination("east").is_err());
        assert!(parse_declination("NaN").is_err());
    }
}
