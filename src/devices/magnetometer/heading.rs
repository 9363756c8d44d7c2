//! Two-axis compass heading
//!
//! The bearing is derived from X and Y only, so the sensor must be held level.
//! Quadrants are selected on the signs of X and Y; zero falls into the
//! `else` branches.
//!
//! Declination is added afterwards and the result wrapped once:
//! above 360 for an east (positive) declination, below 0 otherwise. A
//! declination larger than a full turn is not clamped any further.

use super::sample::PhysicalSample;
use std::f32::consts::PI;

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Magnetic bearing in degrees from the X and Y field components
///
/// Always in `[0, 360)`. `X == 0` would divide by zero in the right half
/// plane; those cases return a cardinal bearing: 180 for `Y < 0`, 0 (north)
/// for `Y > 0`, 270 for `Y == 0`.
pub fn quadrant_heading(x: f32, y: f32) -> f32 {
    if x < 0.0 {
        if y > 0.0 {
            90.0 - (y / -x).atan() * RAD_TO_DEG
        } else {
            90.0 + (-y / -x).atan() * RAD_TO_DEG
        }
    } else if x == 0.0 {
        if y < 0.0 {
            180.0
        } else if y > 0.0 {
            0.0
        } else {
            270.0
        }
    } else if y < 0.0 {
        270.0 - (-y / x).atan() * RAD_TO_DEG
    } else {
        270.0 + (y / x).atan() * RAD_TO_DEG
    }
}

/// Add declination and apply the single-step wrap
pub fn apply_declination(heading: f32, declination: f32) -> f32 {
    let deg = heading + declination;
    if declination > 0.0 && deg > 360.0 {
        deg - 360.0
    } else if declination <= 0.0 && deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Heading in degrees for a sample and the local declination
pub fn compute_heading(sample: &PhysicalSample, declination: f32) -> f32 {
    apply_declination(quadrant_heading(sample.x, sample.y), declination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn heading(x: f32, y: f32, declination: f32) -> f32 {
        compute_heading(&Vector3::new(x, y, 0.0), declination)
    }

    #[test]
    fn test_quadrant_one() {
        assert!((heading(-1.0, 1.0, 0.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_quadrant_two() {
        assert!((heading(-1.0, -1.0, 0.0) - 135.0).abs() < 1e-4);
        // Y == 0 with X < 0 takes the quadrant two formula
        assert!((heading(-1.0, 0.0, 0.0) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_quadrant_three() {
        assert!((heading(1.0, -1.0, 0.0) - 225.0).abs() < 1e-4);
    }

    #[test]
    fn test_quadrant_four() {
        assert!((heading(1.0, 1.0, 0.0) - 315.0).abs() < 1e-4);
        assert!((heading(1.0, 0.0, 0.0) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_x_is_cardinal() {
        assert_eq!(quadrant_heading(0.0, -5.0), 180.0);
        assert_eq!(quadrant_heading(0.0, 5.0), 0.0);
        assert_eq!(quadrant_heading(0.0, 0.0), 270.0);
        assert!(heading(0.0, 3.0, 0.0).is_finite());
    }

    #[test]
    fn test_zero_x_matches_formula_limits() {
        let near = quadrant_heading(1e-6, -1.0);
        assert!((near - 180.0).abs() < 1e-2);
        // Approaching 360 from quadrant four lands on north, reported as 0
        let near = quadrant_heading(1e-6, 1.0);
        assert!((near - 360.0).abs() < 1e-2);
        assert_eq!(quadrant_heading(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_heading_stays_below_full_turn() {
        for (x, y) in [(0.0, 5.0), (0.0, -5.0), (0.0, 0.0), (-1.0, 1.0), (1.0, -1.0), (-3.0, 0.0)] {
            let h = heading(x, y, 0.0);
            assert!((0.0..360.0).contains(&h), "({x}, {y}) -> {h}");
        }
    }

    #[test]
    fn test_positive_declination_wraps_once() {
        assert!((apply_declination(350.0, 20.0) - 10.0).abs() < 1e-4);
        assert!((apply_declination(10.0, 400.0) - 50.0).abs() < 1e-4);
        // Exactly 360 is not wrapped
        assert!((apply_declination(350.0, 10.0) - 360.0).abs() < 1e-4);
    }

    #[test]
    fn test_large_declination_is_not_clamped() {
        assert!((apply_declination(10.0, 750.0) - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_declination_wraps_below_zero() {
        assert!((apply_declination(5.0, -10.0) - 355.0).abs() < 1e-4);
        assert!((apply_declination(270.0, -300.0) - 330.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_declination_leaves_heading() {
        assert!((apply_declination(123.5, 0.0) - 123.5).abs() < 1e-4);
    }

    #[test]
    fn test_declination_applied_to_sample() {
        assert!((heading(-1.0, 1.0, 7.5) - 52.5).abs() < 1e-4);
    }
}
