//! Position source
//!
//! Binds exactly one position device (motor encoder or rotation sensor) and
//! exposes its raw reading. The source borrows the device: the device is
//! owned by the robot context and outlives every source built on it.

use core::fmt;

use crate::traits::{DeviceError, PositionDevice, SourceKind};

/// A raw position reading from exactly one bound device
///
/// A source can never be unbound; "read before bind" is ruled out by
/// construction.
#[derive(Clone, Copy)]
pub struct PositionSource<'d> {
    kind: SourceKind,
    device: &'d dyn PositionDevice,
}

impl<'d> PositionSource<'d> {
    /// Create a source over a device of the given kind
    pub fn new(device: &'d dyn PositionDevice, kind: SourceKind) -> Self {
        Self { kind, device }
    }

    /// Create a source reading a motor's integrated encoder
    pub fn motor_encoder(device: &'d dyn PositionDevice) -> Self {
        Self::new(device, SourceKind::MotorEncoder)
    }

    /// Create a source reading a standalone rotation sensor
    pub fn rotation_sensor(device: &'d dyn PositionDevice) -> Self {
        Self::new(device, SourceKind::RotationSensor)
    }

    /// Swap the active device
    ///
    /// The last bind wins. Readings taken from the previous device are not
    /// comparable with readings from the new one.
    pub fn bind(&mut self, device: &'d dyn PositionDevice, kind: SourceKind) {
        self.device = device;
        self.kind = kind;
    }

    /// Kind of the active device
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Current absolute position of the active device in degrees
    pub fn read(&self) -> Result<f64, DeviceError> {
        self.device.position_deg()
    }

    /// Make the active device report zero at its current position
    pub fn reset_zero(&self) -> Result<(), DeviceError> {
        self.device.reset_position()
    }
}

impl fmt::Debug for PositionSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionSource")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockEncoder;

    #[test]
    fn test_reads_bound_device() {
        let encoder = MockEncoder::new(42.0);
        let source = PositionSource::motor_encoder(&encoder);

        assert_eq!(source.kind(), SourceKind::MotorEncoder);
        assert_eq!(source.read(), Ok(42.0));
    }

    #[test]
    fn test_last_bind_wins() {
        let motor = MockEncoder::new(10.0);
        let rotation = MockEncoder::new(720.0);

        let mut source = PositionSource::motor_encoder(&motor);
        source.bind(&rotation, SourceKind::RotationSensor);

        assert_eq!(source.kind(), SourceKind::RotationSensor);
        assert_eq!(source.read(), Ok(720.0));

        // Reset only touches the active device
        source.reset_zero().unwrap();
        assert_eq!(rotation.raw(), 0.0);
        assert_eq!(motor.raw(), 10.0);
    }

    #[test]
    fn test_device_fault_propagates() {
        let encoder = MockEncoder::new(0.0);
        encoder.disconnect();
        let source = PositionSource::rotation_sensor(&encoder);

        assert_eq!(source.read(), Err(DeviceError::Disconnected));
        assert_eq!(source.reset_zero(), Err(DeviceError::Disconnected));
    }
}
