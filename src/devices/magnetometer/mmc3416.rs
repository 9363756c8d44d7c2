//! MEMSIC MMC3416xPJ register protocol
//!
//! Sibling magnetometer family sharing the LSM303D tool's command set. Unlike
//! the LSM303D it measures on demand (trigger + poll), and needs periodic
//! SET/RESET pulses to remove residual magnetization of the sensing element.

use super::family::ContinuousFrequency;
use super::register::{register_enum, WritableRegister};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Fixed I2C address of the MMC3416xPJ
pub const MMC3416_ADDR: u8 = 0x30;

/// Product id register response
pub const PRODUCT_ID_VALUE: u8 = 0x06;

register_enum! {
    /// Read-only registers
    pub enum ReadOnly {
        XoutLsb = 0x00 => "XOUT_LSB",
        XoutMsb = 0x01 => "XOUT_MSB",
        YoutLsb = 0x02 => "YOUT_LSB",
        YoutMsb = 0x03 => "YOUT_MSB",
        ZoutLsb = 0x04 => "ZOUT_LSB",
        ZoutMsb = 0x05 => "ZOUT_MSB",
        Status = 0x06 => "STATUS",
        ProductId = 0x20 => "PRD_ID",
    }
}

register_enum! {
    /// Control registers
    pub enum ReadWrite {
        Ctl0 = 0x07 => "CTL0",
        Ctl1 = 0x08 => "CTL1",
    }
}

impl WritableRegister for ReadWrite {}

// =============================================================================
// Register Bits
// =============================================================================

/// CTL0 bit 0: take a single measurement
pub const CTL0_TM_M: u8 = 0x01;

/// CTL0 bit 1: continuous measurement mode
pub const CTL0_CONT_MODE: u8 = 0x02;

/// CTL0 bits 2-3: continuous measurement frequency
pub const CTL0_CM_FREQ_SHIFT: u8 = 2;
pub const CTL0_CM_FREQ_MASK: u8 = 0x0C;

/// CTL0 bit 4: charge the capacitor from VDD instead of the pump
pub const CTL0_NO_BOOST: u8 = 0x10;

/// CTL0 bit 5: SET pulse
pub const CTL0_SET: u8 = 0x20;

/// CTL0 bit 6: RESET pulse
pub const CTL0_RESET: u8 = 0x40;

/// CTL0 bit 7: recharge the SET/RESET capacitor
pub const CTL0_REFILL_CAP: u8 = 0x80;

/// CTL1 value triggering a software reset
pub const CTL1_SW_RESET: u8 = 0xB6;

/// CTL1 bits 0-1: output resolution
pub const CTL1_BW_MASK: u8 = 0x03;

/// STATUS bit 0: measurement done
pub const STATUS_MEAS_DONE: u8 = 0x01;

/// Capacitor charge time before a SET/RESET pulse (datasheet minimum 50 ms)
pub const CAP_CHARGE_MS: i64 = 60;

/// Output resolution selected by CTL1 bits 0-1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputResolution {
    /// 16 bit, 7.92 ms read time
    Bits16Slow,
    /// 16 bit, 4.08 ms read time
    Bits16,
    /// 14 bit, 2.16 ms read time
    Bits14,
    /// 12 bit, 1.20 ms read time
    Bits12,
}

impl OutputResolution {
    /// Decode from CTL1
    pub fn from_ctl1(ctl1: u8) -> Self {
        match ctl1 & CTL1_BW_MASK {
            0x00 => OutputResolution::Bits16Slow,
            0x01 => OutputResolution::Bits16,
            0x02 => OutputResolution::Bits14,
            _ => OutputResolution::Bits12,
        }
    }

    /// CTL1 bits for this resolution
    pub fn bits(self) -> u8 {
        match self {
            OutputResolution::Bits16Slow => 0x00,
            OutputResolution::Bits16 => 0x01,
            OutputResolution::Bits14 => 0x02,
            OutputResolution::Bits12 => 0x03,
        }
    }
}

impl FromStr for OutputResolution {
    type Err = Error;

    /// `12`, `14`, `16` or `16h` (the slow, high accuracy 16 bit mode)
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "12" => Ok(OutputResolution::Bits12),
            "14" => Ok(OutputResolution::Bits14),
            "16" => Ok(OutputResolution::Bits16),
            "16h" => Ok(OutputResolution::Bits16Slow),
            _ => Err(Error::InvalidArgument(format!(
                "output resolution [{s}] must be one of 12/14/16/16h"
            ))),
        }
    }
}

impl fmt::Display for OutputResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OutputResolution::Bits16Slow => "16 bit (7.92ms read time)",
            OutputResolution::Bits16 => "16 bit (4.08ms read time)",
            OutputResolution::Bits14 => "14 bit (2.16ms read time)",
            OutputResolution::Bits12 => "12 bit (1.20ms read time)",
        };
        f.write_str(text)
    }
}

/// Decoded CTL0/CTL1 state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub ctl0: u8,
    pub ctl1: u8,
    pub continuous: bool,
    pub frequency: ContinuousFrequency,
    pub no_boost: bool,
    pub resolution: OutputResolution,
}

impl ControlState {
    /// Decode the two control registers
    pub fn decode(ctl0: u8, ctl1: u8) -> Self {
        Self {
            ctl0,
            ctl1,
            continuous: ctl0 & CTL0_CONT_MODE != 0,
            frequency: ContinuousFrequency::from_ctl0(ctl0),
            no_boost: ctl0 & CTL0_NO_BOOST != 0,
            resolution: OutputResolution::from_ctl1(ctl1),
        }
    }
}

/// CTL0 value that enables continuous mode at `frequency`, keeping the other bits
pub fn continuous_ctl0(current: u8, frequency: ContinuousFrequency) -> u8 {
    let mut value = current | CTL0_TM_M | CTL0_CONT_MODE;
    value &= !CTL0_CM_FREQ_MASK;
    value |= frequency.bits() << CTL0_CM_FREQ_SHIFT;
    value | CTL0_SET
}
