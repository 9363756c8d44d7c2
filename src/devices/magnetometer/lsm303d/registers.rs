//! LSM303D Register Definitions
//!
//! Register map of the STMicroelectronics LSM303D (datasheet DocID023312).
//! Addresses `0x00..=0x3F` are used; `0x00..=0x04`, `0x0E`, `0x10` and
//! `0x11` are factory reserved.
//!
//! The sub-address MSB would request auto-increment over I2C, but reads in
//! this crate always address one register at a time.

use crate::devices::magnetometer::register::{register_enum, WritableRegister};

// =============================================================================
// Identification
// =============================================================================

/// WHO_AM_I response of the LSM303D
pub const WHO_AM_I_VALUE: u8 = 0x49;

/// Number of addressable registers covered by a dump
pub const REGISTER_COUNT: usize = 64;

/// Factory reserved addresses inside `0x00..=0x3F`
pub const RESERVED: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x0E, 0x10, 0x11];

// =============================================================================
// Register Map
// =============================================================================

register_enum! {
    /// Read-only registers (status, output data, identification)
    pub enum ReadOnly {
        TempOutL = 0x05 => "TEMP_OUT_L",
        TempOutH = 0x06 => "TEMP_OUT_H",
        StatusM = 0x07 => "STATUS_M",
        OutXLM = 0x08 => "OUT_X_L_M",
        OutXHM = 0x09 => "OUT_X_H_M",
        OutYLM = 0x0A => "OUT_Y_L_M",
        OutYHM = 0x0B => "OUT_Y_H_M",
        OutZLM = 0x0C => "OUT_Z_L_M",
        OutZHM = 0x0D => "OUT_Z_H_M",
        WhoAmI = 0x0F => "WHO_AM_I",
        IntSrcM = 0x13 => "INT_SRC_M",
        StatusA = 0x27 => "STATUS_A",
        OutXLA = 0x28 => "OUT_X_L_A",
        OutXHA = 0x29 => "OUT_X_H_A",
        OutYLA = 0x2A => "OUT_Y_L_A",
        OutYHA = 0x2B => "OUT_Y_H_A",
        OutZLA = 0x2C => "OUT_Z_L_A",
        OutZHA = 0x2D => "OUT_Z_H_A",
        FifoSrc = 0x2F => "FIFO_SRC",
        IgSrc1 = 0x31 => "IG_SRC1",
        IgSrc2 = 0x35 => "IG_SRC2",
        ClickSrc = 0x39 => "CLICK_SRC",
    }
}

register_enum! {
    /// Read-write registers (configuration, thresholds, offsets)
    pub enum ReadWrite {
        IntCtrlM = 0x12 => "INT_CTRL_M",
        IntThsLM = 0x14 => "INT_THS_L_M",
        IntThsHM = 0x15 => "INT_THS_H_M",
        OffsetXLM = 0x16 => "OFFSET_X_L_M",
        OffsetXHM = 0x17 => "OFFSET_X_H_M",
        OffsetYLM = 0x18 => "OFFSET_Y_L_M",
        OffsetYHM = 0x19 => "OFFSET_Y_H_M",
        OffsetZLM = 0x1A => "OFFSET_Z_L_M",
        OffsetZHM = 0x1B => "OFFSET_Z_H_M",
        ReferenceX = 0x1C => "REFERENCE_X",
        ReferenceY = 0x1D => "REFERENCE_Y",
        ReferenceZ = 0x1E => "REFERENCE_Z",
        Ctrl0 = 0x1F => "CTRL0",
        Ctrl1 = 0x20 => "CTRL1",
        Ctrl2 = 0x21 => "CTRL2",
        Ctrl3 = 0x22 => "CTRL3",
        Ctrl4 = 0x23 => "CTRL4",
        Ctrl5 = 0x24 => "CTRL5",
        Ctrl6 = 0x25 => "CTRL6",
        Ctrl7 = 0x26 => "CTRL7",
        FifoCtrl = 0x2E => "FIFO_CTRL",
        IgCfg1 = 0x30 => "IG_CFG1",
        IgThs1 = 0x32 => "IG_THS1",
        IgDur1 = 0x33 => "IG_DUR1",
        IgCfg2 = 0x34 => "IG_CFG2",
        IgThs2 = 0x36 => "IG_THS2",
        IgDur2 = 0x37 => "IG_DUR2",
        ClickCfg = 0x38 => "CLICK_CFG",
        ClickThs = 0x3A => "CLICK_THS",
        TimeLimit = 0x3B => "TIME_LIMIT",
        TimeLatency = 0x3C => "TIME_LATENCY",
        TimeWindow = 0x3D => "TIME_WINDOW",
        ActThs = 0x3E => "ACT_THS",
        ActDur = 0x3F => "ACT_DUR",
    }
}

impl WritableRegister for ReadWrite {}

/// True for factory reserved addresses
pub fn is_reserved(addr: u8) -> bool {
    RESERVED.contains(&addr)
}

/// Datasheet name of the register at `addr`, if it is not reserved
pub fn name_of(addr: u8) -> Option<&'static str> {
    use crate::devices::magnetometer::register::Register;

    ReadOnly::from_address(addr)
        .map(Register::name)
        .or_else(|| ReadWrite::from_address(addr).map(Register::name))
}

// =============================================================================
// Configuration Values
// =============================================================================

/// CTRL5: M_RES = 11 (high resolution), M_ODR = 001 (6.25 Hz)
pub const CTRL5_MAG_HIGH_RES_6_25HZ: u8 = 0x64;

/// CTRL6: MFS = 01 (±4 gauss)
pub const CTRL6_MFS_4_GAUSS: u8 = 0x20;

/// CTRL7: MLP = 0 (low power off), MD = 00 (continuous conversion)
pub const CTRL7_MAG_CONTINUOUS: u8 = 0x00;

/// STATUS_M: new X, Y and Z magnetic data available
pub const STATUS_M_ZYXMDA: u8 = 0x08;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::magnetometer::register::Register;

    #[test]
    fn test_register_map_covers_every_address() {
        for addr in 0..REGISTER_COUNT as u8 {
            let kinds = [
                is_reserved(addr),
                ReadOnly::from_address(addr).is_some(),
                ReadWrite::from_address(addr).is_some(),
            ];
            assert_eq!(
                kinds.iter().filter(|k| **k).count(),
                1,
                "address {addr:#04X} must be exactly one of reserved/ro/rw"
            );
        }
    }

    #[test]
    fn test_register_counts() {
        assert_eq!(ReadOnly::ALL.len(), 22);
        assert_eq!(ReadWrite::ALL.len(), 34);
        assert_eq!(ReadOnly::ALL.len() + ReadWrite::ALL.len() + RESERVED.len(), 64);
    }

    #[test]
    fn test_named_addresses() {
        assert_eq!(ReadOnly::WhoAmI.address(), 0x0F);
        assert_eq!(ReadOnly::StatusM.address(), 0x07);
        assert_eq!(ReadWrite::Ctrl5.address(), 0x24);
        assert_eq!(ReadWrite::Ctrl7.address(), 0x26);
        assert_eq!(name_of(0x08), Some("OUT_X_L_M"));
        assert_eq!(name_of(0x25), Some("CTRL6"));
        assert_eq!(name_of(0x0E), None);
    }
}
