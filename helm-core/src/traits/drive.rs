//! Drivetrain collaborator trait
//!
//! The closed-loop drivetrain (PID, odometry, motor drivers) is owned by an
//! external implementation. The routine sequencer only sees this trait: a
//! handful of motion primitives that complete when the motion has settled
//! or the drivetrain's own safety timeout has expired.

use crate::config::DriveConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor behavior when no voltage is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BrakeMode {
    /// Motors spin freely
    Coast,
    /// Motors actively resist rotation
    #[default]
    Brake,
    /// Motors hold their position
    Hold,
}

/// Non-drive mechanisms a routine can switch on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuator {
    /// Roller intake
    Intake,
    /// Pneumatic goal clamp
    Clamp,
    /// Pneumatic side wings
    Wings,
}

/// Blocking motion primitives of the external drivetrain
///
/// Each motion future resolves only when the drivetrain reports the motion
/// complete. There is no error path: a motion that cannot finish is bounded
/// by the drivetrain's internal timeout, which is opaque to the caller.
#[allow(async_fn_in_trait)]
pub trait Drive {
    /// Apply gearing, speeds, stopping mode, reversal flags and PID gains
    fn configure(&mut self, config: &DriveConfig);

    /// Check if the heading sensor is still calibrating
    fn is_calibrating(&self) -> bool {
        false
    }

    /// Drive forward a distance in inches at a speed percentage
    async fn drive_forward(&mut self, distance_in: f64, speed_pct: f64);

    /// Drive backward a distance in inches at a speed percentage
    async fn drive_backward(&mut self, distance_in: f64, speed_pct: f64);

    /// Turn in place to an absolute heading in degrees
    async fn turn_to_heading(&mut self, heading_deg: f64);

    /// Engage or release a mechanism
    fn set_actuator(&mut self, actuator: Actuator, engaged: bool);

    /// Stop all drive motors using the configured brake mode
    fn stop(&mut self);
}
