//! Wheel geometry
//!
//! Converts encoder degrees into linear travel for a wheel driven through a
//! gear pair.

use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wheel diameter and gearing between encoder and wheel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelGeometry {
    /// Wheel diameter in inches
    pub wheel_diameter_in: f64,
    /// Teeth on the encoder-side (driving) gear
    pub driving_gear: f64,
    /// Teeth on the wheel-side (driven) gear
    pub driven_gear: f64,
}

impl WheelGeometry {
    /// Create a new geometry
    pub const fn new(wheel_diameter_in: f64, driving_gear: f64, driven_gear: f64) -> Self {
        Self {
            wheel_diameter_in,
            driving_gear,
            driven_gear,
        }
    }

    /// Wheel turns per encoder turn
    pub fn ratio(&self) -> f64 {
        self.driving_gear / self.driven_gear
    }

    /// Convert encoder degrees to inches of wheel travel
    pub fn degrees_to_inches(&self, degrees: f64) -> f64 {
        degrees * PI / 180.0 * self.ratio() * (self.wheel_diameter_in / 2.0)
    }

    /// Convert inches of wheel travel to encoder degrees
    pub fn inches_to_degrees(&self, inches: f64) -> f64 {
        inches / (self.wheel_diameter_in / 2.0) / self.ratio() * 180.0 / PI
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        // 3.25" omni wheel, 36:48 external gearing
        Self::new(3.25, 36.0, 48.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_drive_circumference() {
        let geometry = WheelGeometry::new(4.0, 1.0, 1.0);
        let inches = geometry.degrees_to_inches(360.0);
        assert!((inches - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_gearing_scales_travel() {
        let geometry = WheelGeometry::new(3.25, 36.0, 48.0);
        assert!((geometry.ratio() - 0.75).abs() < 1e-12);

        let direct = WheelGeometry::new(3.25, 1.0, 1.0).degrees_to_inches(720.0);
        let geared = geometry.degrees_to_inches(720.0);
        assert!((geared - direct * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_conversion() {
        let geometry = WheelGeometry::default();
        let degrees = geometry.inches_to_degrees(24.0);
        assert!((geometry.degrees_to_inches(degrees) - 24.0).abs() < 1e-9);
    }
}
