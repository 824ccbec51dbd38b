//! Sensor, alert and selector traits
//!
//! Small collaborator interfaces: live sensors polled by event watchers,
//! the controller's haptic motor, and the routine selector owned by the UI.

use super::position::DeviceError;

/// Rumble pattern played when an unknown routine is selected
///
/// Uses the controller's pattern syntax: `-` long, `.` short, ` ` pause.
pub const RUMBLE_INVALID_ROUTINE: &str = "---";

/// A live sensor producing a scalar value
///
/// Optical, color and distance sensors all fit: the value is whatever the
/// device measures (proximity, hue, millimeters).
pub trait Sensor {
    /// Read the current value
    fn read(&self) -> Result<f64, DeviceError>;
}

impl<T: Sensor + ?Sized> Sensor for &T {
    fn read(&self) -> Result<f64, DeviceError> {
        (**self).read()
    }
}

/// Haptic feedback on the driver's controller
pub trait Alert {
    /// Play a rumble pattern
    fn rumble(&mut self, pattern: &str);
}

/// Routine selector owned by the UI
///
/// Consumed once per autonomous period.
pub trait RoutineSelector {
    /// Selector ID of the currently chosen routine
    fn selected(&self) -> u16;
}
