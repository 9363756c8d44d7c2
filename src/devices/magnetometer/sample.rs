//! Raw to physical sample conversion
//!
//! Six data registers are read one at a time, low byte first, and paired into
//! unsigned 16-bit axis values. Conversion to milli-Gauss is a fixed scale
//! factor followed by the hard iron offset.

use crate::devices::traits::MagCalibration;
use nalgebra::Vector3;

/// Raw count to milli-Gauss (±4 gauss full scale selected by `initialize`)
pub const SENSITIVITY: f32 = 0.48828125;

/// One magnetic sample in milli-Gauss, sensor frame
pub type PhysicalSample = Vector3<f32>;

/// Unconverted axis counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl RawSample {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    /// Pair `[xl, xh, yl, yh, zl, zh]` into axis values
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: u16::from_le_bytes([bytes[0], bytes[1]]),
            y: u16::from_le_bytes([bytes[2], bytes[3]]),
            z: u16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// `raw * SENSITIVITY - offset` per axis
pub fn convert_raw(raw: RawSample, calibration: &MagCalibration) -> PhysicalSample {
    let scaled = Vector3::new(
        raw.x as f32 * SENSITIVITY,
        raw.y as f32 * SENSITIVITY,
        raw.z as f32 * SENSITIVITY,
    );
    calibration.apply(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_raw_is_zero_field() {
        let sample = convert_raw(RawSample::default(), &MagCalibration::default());
        assert_eq!(sample, Vector3::zeros());
    }

    #[test]
    fn test_sensitivity_scaling() {
        let sample = convert_raw(RawSample::new(4096, 0, 0), &MagCalibration::default());
        assert!((sample.x - 2000.0).abs() < 1e-3);
        assert_eq!(sample.y, 0.0);
        assert_eq!(sample.z, 0.0);
    }

    #[test]
    fn test_offset_is_subtracted() {
        let cal = MagCalibration::with_offset(100.0, -50.0, 0.0);
        let sample = convert_raw(RawSample::new(2048, 0, 2048), &cal);
        assert!((sample.x - 900.0).abs() < 1e-3);
        assert!((sample.y - 50.0).abs() < 1e-3);
        assert!((sample.z - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_from_bytes_pairs_low_then_high() {
        let raw = RawSample::from_bytes([0x34, 0x12, 0xFF, 0x00, 0x00, 0x80]);
        assert_eq!(raw, RawSample::new(0x1234, 0x00FF, 0x8000));
    }

    #[test]
    fn test_full_scale_count_stays_unsigned() {
        let sample = convert_raw(RawSample::new(0xFFFF, 0, 0), &MagCalibration::default());
        assert!((sample.x - 65535.0 * SENSITIVITY).abs() < 1e-2);
    }
}
