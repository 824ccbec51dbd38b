//! Absolute position device trait
//!
//! Abstracts over the two devices a robot can measure wheel rotation with:
//! a motor's integrated encoder or a standalone absolute rotation sensor.
//! Both report a continuous angle in degrees. Wrapping and drift are
//! hardware characteristics and are not corrected here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of device backing a position source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SourceKind {
    /// Integrated encoder of a drive motor
    #[default]
    MotorEncoder,
    /// Standalone absolute rotation sensor
    RotationSensor,
}

/// Errors reported by encoder and sensor devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// No device is plugged into the configured port
    Disconnected,
    /// A device of the wrong type is plugged into the port
    WrongDevice,
    /// The device has not produced a reading yet
    NotReady,
}

/// Trait for devices that report an absolute angular position
///
/// Devices are port handles: the hardware keeps the state, so resetting
/// takes `&self` and the same device can be shared between a position
/// source and telemetry readers.
pub trait PositionDevice {
    /// Read the current position in degrees
    ///
    /// Reading has no side effects on the device.
    fn position_deg(&self) -> Result<f64, DeviceError>;

    /// Redefine the current physical position as zero
    ///
    /// Every earlier raw reading becomes incomparable with later ones.
    fn reset_position(&self) -> Result<(), DeviceError>;
}

impl<T: PositionDevice + ?Sized> PositionDevice for &T {
    fn position_deg(&self) -> Result<f64, DeviceError> {
        (**self).position_deg()
    }

    fn reset_position(&self) -> Result<(), DeviceError> {
        (**self).reset_position()
    }
}
