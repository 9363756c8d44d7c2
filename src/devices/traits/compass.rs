//! Compass Sensor Trait and Calibration
//!
//! Device-independent interface for magnetometers that can produce a heading.
//!
//! ## Usage
//!
//! ```ignore
//! use pi_lsm303d::devices::traits::CompassSensor;
//!
//! fn report<C: CompassSensor>(compass: &mut C) -> pi_lsm303d::Result<f32> {
//!     compass.read_heading()
//! }
//! ```

use crate::error::Result;
use nalgebra::Vector3;

/// Hard iron calibration for a magnetometer
///
/// Applied as `field - offset`, in milli-Gauss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagCalibration {
    /// Zero-field bias per axis (mG)
    pub offset: Vector3<f32>,
}

impl Default for MagCalibration {
    fn default() -> Self {
        Self {
            offset: Vector3::zeros(),
        }
    }
}

impl MagCalibration {
    /// Calibration with the given per-axis offset
    pub fn with_offset(x: f32, y: f32, z: f32) -> Self {
        Self {
            offset: Vector3::new(x, y, z),
        }
    }

    /// Apply calibration to a scaled magnetometer reading
    pub fn apply(&self, scaled: Vector3<f32>) -> Vector3<f32> {
        scaled - self.offset
    }
}

/// Device-independent compass interface
pub trait CompassSensor {
    /// Take one calibrated measurement (mG, sensor frame)
    fn read_field(&mut self) -> Result<Vector3<f32>>;

    /// Take one measurement and convert it to a heading in degrees
    fn read_heading(&mut self) -> Result<f32>;

    /// Apply calibration to all subsequent readings
    fn set_calibration(&mut self, calibration: MagCalibration);

    /// Current calibration
    fn calibration(&self) -> &MagCalibration;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_default_is_zero() {
        let cal = MagCalibration::default();
        assert_eq!(cal.offset, Vector3::zeros());
    }

    #[test]
    fn test_apply_offset() {
        let cal = MagCalibration::with_offset(5.0, 10.0, -5.0);
        let calibrated = cal.apply(Vector3::new(25.0, 5.0, -40.0));

        assert!((calibrated.x - 20.0).abs() < 1e-6);
        assert!((calibrated.y - (-5.0)).abs() < 1e-6);
        assert!((calibrated.z - (-35.0)).abs() < 1e-6);
    }
}
