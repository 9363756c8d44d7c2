//! Device families and their capabilities
//!
//! The command set was designed for a family of small I2C magnetometers.
//! Which operations perform bus traffic depends on the family; everything a
//! family cannot do is rejected with `Error::Unsupported` instead of being a
//! silent no-op.

use super::lsm303d::registers as lsm;
use super::mmc3416;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Register protocol spoken by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceFamily {
    /// STMicroelectronics LSM303D, continuous conversion
    #[default]
    Lsm303d,
    /// MEMSIC MMC3416xPJ, triggered measurement with SET/RESET
    Mmc3416,
}

/// Operations a family supports beyond plain register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// SET and RESET degaussing pulses
    pub set_reset: bool,
    /// Software reset command
    pub soft_reset: bool,
    /// Selectable continuous measurement frequency
    pub frequency_control: bool,
    /// Selectable output resolution
    pub resolution_control: bool,
    /// Single-shot measurements must be triggered before polling
    pub measurement_trigger: bool,
    /// Register map rendered by the `0x00..=0x3F` dump
    pub register_dump: bool,
}

/// Where a family keeps its magnetic sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SampleLayout {
    /// Status register polled for data-ready
    pub status: u8,
    /// Data-ready bit(s) in the status register
    pub ready_mask: u8,
    /// X low byte; the six data registers follow consecutively
    pub data_start: u8,
}

impl DeviceFamily {
    /// Capabilities of this family
    pub fn capabilities(self) -> Capabilities {
        match self {
            DeviceFamily::Lsm303d => Capabilities {
                set_reset: false,
                soft_reset: false,
                frequency_control: false,
                resolution_control: false,
                measurement_trigger: false,
                register_dump: true,
            },
            DeviceFamily::Mmc3416 => Capabilities {
                set_reset: true,
                soft_reset: true,
                frequency_control: true,
                resolution_control: true,
                measurement_trigger: true,
                register_dump: false,
            },
        }
    }

    /// Expected identification register response
    pub fn expected_product_id(self) -> u8 {
        match self {
            DeviceFamily::Lsm303d => lsm::WHO_AM_I_VALUE,
            DeviceFamily::Mmc3416 => mmc3416::PRODUCT_ID_VALUE,
        }
    }

    /// Identification register address
    pub(crate) fn id_register(self) -> u8 {
        match self {
            DeviceFamily::Lsm303d => lsm::ReadOnly::WhoAmI as u8,
            DeviceFamily::Mmc3416 => mmc3416::ReadOnly::ProductId as u8,
        }
    }

    pub(crate) fn sample_layout(self) -> SampleLayout {
        match self {
            DeviceFamily::Lsm303d => SampleLayout {
                status: lsm::ReadOnly::StatusM as u8,
                ready_mask: lsm::STATUS_M_ZYXMDA,
                data_start: lsm::ReadOnly::OutXLM as u8,
            },
            DeviceFamily::Mmc3416 => SampleLayout {
                status: mmc3416::ReadOnly::Status as u8,
                ready_mask: mmc3416::STATUS_MEAS_DONE,
                data_start: mmc3416::ReadOnly::XoutLsb as u8,
            },
        }
    }
}

impl FromStr for DeviceFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lsm303d" => Ok(DeviceFamily::Lsm303d),
            "mmc3416" => Ok(DeviceFamily::Mmc3416),
            _ => Err(Error::InvalidArgument(format!(
                "unknown sensor family [{s}], expected lsm303d or mmc3416"
            ))),
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceFamily::Lsm303d => f.write_str("LSM303D"),
            DeviceFamily::Mmc3416 => f.write_str("MMC3416"),
        }
    }
}

/// Continuous measurement frequency (MMC3416 CTL0 bits 2-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinuousFrequency {
    /// 1.5 Hz, one sample every 1.5 seconds
    #[default]
    Hz1_5,
    /// 13 Hz, one sample every 77 ms
    Hz13,
    /// 25 Hz, one sample every 40 ms
    Hz25,
    /// 50 Hz, one sample every 20 ms
    Hz50,
}

impl ContinuousFrequency {
    /// Two-bit register encoding
    pub fn bits(self) -> u8 {
        match self {
            ContinuousFrequency::Hz1_5 => 0,
            ContinuousFrequency::Hz13 => 1,
            ContinuousFrequency::Hz25 => 2,
            ContinuousFrequency::Hz50 => 3,
        }
    }

    /// Time between two samples
    pub fn period_ms(self) -> i64 {
        match self {
            ContinuousFrequency::Hz1_5 => 1500,
            ContinuousFrequency::Hz13 => 77,
            ContinuousFrequency::Hz25 => 40,
            ContinuousFrequency::Hz50 => 20,
        }
    }

    /// Decode from a CTL0 value
    pub fn from_ctl0(ctl0: u8) -> Self {
        match (ctl0 & mmc3416::CTL0_CM_FREQ_MASK) >> mmc3416::CTL0_CM_FREQ_SHIFT {
            0 => ContinuousFrequency::Hz1_5,
            1 => ContinuousFrequency::Hz13,
            2 => ContinuousFrequency::Hz25,
            _ => ContinuousFrequency::Hz50,
        }
    }
}

impl TryFrom<u8> for ContinuousFrequency {
    type Error = Error;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(ContinuousFrequency::Hz1_5),
            1 => Ok(ContinuousFrequency::Hz13),
            2 => Ok(ContinuousFrequency::Hz25),
            3 => Ok(ContinuousFrequency::Hz50),
            other => Err(Error::InvalidArgument(format!(
                "continuous read frequency mode {other} must be between 0..3"
            ))),
        }
    }
}

impl fmt::Display for ContinuousFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ContinuousFrequency::Hz1_5 => "1.5 Hz (1 sample every 1.5 seconds)",
            ContinuousFrequency::Hz13 => "13 Hz (1 sample every 77 milliseconds)",
            ContinuousFrequency::Hz25 => "25 Hz (1 sample every 40 milliseconds)",
            ContinuousFrequency::Hz50 => "50 Hz (1 sample every 20 milliseconds)",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsm303d_has_no_sibling_capabilities() {
        let caps = DeviceFamily::Lsm303d.capabilities();
        assert!(!caps.set_reset);
        assert!(!caps.soft_reset);
        assert!(!caps.frequency_control);
        assert!(!caps.resolution_control);
        assert!(!caps.measurement_trigger);
        assert!(caps.register_dump);
    }

    #[test]
    fn test_mmc3416_capabilities() {
        let caps = DeviceFamily::Mmc3416.capabilities();
        assert!(caps.set_reset && caps.soft_reset && caps.frequency_control);
        assert!(caps.measurement_trigger);
        assert!(!caps.register_dump);
    }

    #[test]
    fn test_sample_layouts() {
        let lsm = DeviceFamily::Lsm303d.sample_layout();
        assert_eq!(lsm.status, 0x07);
        assert_eq!(lsm.data_start, 0x08);

        let mmc = DeviceFamily::Mmc3416.sample_layout();
        assert_eq!(mmc.status, 0x06);
        assert_eq!(mmc.data_start, 0x00);
    }

    #[test]
    fn test_frequency_from_mode() {
        assert_eq!(
            ContinuousFrequency::try_from(2u8).unwrap(),
            ContinuousFrequency::Hz25
        );
        assert!(matches!(
            ContinuousFrequency::try_from(4u8),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("LSM303D".parse::<DeviceFamily>().unwrap(), DeviceFamily::Lsm303d);
        assert_eq!("mmc3416".parse::<DeviceFamily>().unwrap(), DeviceFamily::Mmc3416);
        assert!("hmc5883".parse::<DeviceFamily>().is_err());
    }

    #[test]
    fn test_frequency_period() {
        assert_eq!(ContinuousFrequency::Hz1_5.period_ms(), 1500);
        assert_eq!(ContinuousFrequency::Hz50.period_ms(), 20);
    }

    #[test]
    fn test_frequency_from_ctl0() {
        assert_eq!(ContinuousFrequency::from_ctl0(0b0000_0100), ContinuousFrequency::Hz13);
        assert_eq!(ContinuousFrequency::from_ctl0(0b1111_0011), ContinuousFrequency::Hz50);
    }
}
