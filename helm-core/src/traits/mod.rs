//! Device and collaborator traits
//!
//! These traits define the interface between the motion core and the
//! hardware-specific or externally owned implementations (drivetrain,
//! sensors, controller, routine selector UI).

pub mod drive;
pub mod position;
pub mod sensor;

pub use drive::{Actuator, BrakeMode, Drive};
pub use position::{DeviceError, PositionDevice, SourceKind};
pub use sensor::{Alert, RoutineSelector, Sensor, RUMBLE_INVALID_ROUTINE};
