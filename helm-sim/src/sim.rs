//! Simulated robot hardware
//!
//! A drivetrain that moves at a fixed fraction of top speed, an odometry
//! wheel encoder it turns as it drives, and an intake sensor that sees an
//! object once the robot has driven far enough with the intake running.

use std::cell::Cell;

use embassy_time::{Duration, Timer};

use helm_core::config::DriveConfig;
use helm_core::tracking::WheelGeometry;
use helm_core::traits::{Actuator, Alert, DeviceError, Drive, PositionDevice, Sensor};

/// Top linear speed at 100% (inches per second)
const MAX_SPEED_IN_S: f64 = 48.0;
/// Top turn rate at 100% (degrees per second)
const MAX_TURN_DEG_S: f64 = 360.0;
/// Simulation step
const STEP: Duration = Duration::from_millis(10);
/// Calibration checks before the heading sensor reports ready
const CALIBRATION_POLLS: u32 = 40;

/// Intake sensor reading with an object held
const OBJECT_PRESENT: f64 = 255.0;
/// Intake sensor reading with nothing held
const OBJECT_ABSENT: f64 = 10.0;

/// Odometry wheel encoder
#[derive(Debug, Default)]
pub struct SimEncoder {
    degrees: Cell<f64>,
}

impl SimEncoder {
    fn advance(&self, degrees: f64) {
        self.degrees.set(self.degrees.get() + degrees);
    }
}

impl PositionDevice for SimEncoder {
    fn position_deg(&self) -> Result<f64, DeviceError> {
        Ok(self.degrees.get())
    }

    fn reset_position(&self) -> Result<(), DeviceError> {
        self.degrees.set(0.0);
        Ok(())
    }
}

/// Optical sensor in the intake
#[derive(Debug)]
pub struct SimIntake {
    value: Cell<f64>,
}

impl Default for SimIntake {
    fn default() -> Self {
        Self {
            value: Cell::new(OBJECT_ABSENT),
        }
    }
}

impl Sensor for SimIntake {
    fn read(&self) -> Result<f64, DeviceError> {
        Ok(self.value.get())
    }
}

/// Drivetrain moving in real time
pub struct SimDrive<'a> {
    encoder: &'a SimEncoder,
    intake_sensor: &'a SimIntake,
    geometry: WheelGeometry,
    heading: f64,
    travelled_in: f64,
    intake_on: bool,
    object_at_in: f64,
    calibration_left: Cell<u32>,
}

impl<'a> SimDrive<'a> {
    /// Create a drivetrain with an object `object_at_in` inches ahead
    pub fn new(encoder: &'a SimEncoder, intake_sensor: &'a SimIntake, object_at_in: f64) -> Self {
        Self {
            encoder,
            intake_sensor,
            geometry: WheelGeometry::default(),
            heading: 0.0,
            travelled_in: 0.0,
            intake_on: false,
            object_at_in,
            calibration_left: Cell::new(CALIBRATION_POLLS),
        }
    }

    async fn travel(&mut self, distance_in: f64, speed_pct: f64) {
        let speed = MAX_SPEED_IN_S * speed_pct.clamp(1.0, 100.0) / 100.0;
        let total_ms = (distance_in.abs() / speed * 1000.0) as u64;
        let steps = (total_ms / STEP.as_millis()).max(1);
        let per_step = distance_in / steps as f64;

        for _ in 0..steps {
            Timer::after(STEP).await;
            self.advance(per_step);
        }
    }

    fn advance(&mut self, inches: f64) {
        self.encoder.advance(self.geometry.inches_to_degrees(inches));
        self.travelled_in += inches.abs();
        if self.intake_on && self.travelled_in >= self.object_at_in {
            self.intake_sensor.value.set(OBJECT_PRESENT);
        }
    }
}

impl Drive for SimDrive<'_> {
    fn configure(&mut self, config: &DriveConfig) {
        self.geometry = config.geometry;
        println!(
            "[SIM] drive configured: {}\" wheels, {}:{} gearing, {:?}",
            config.geometry.wheel_diameter_in,
            config.geometry.driving_gear,
            config.geometry.driven_gear,
            config.brake
        );
    }

    fn is_calibrating(&self) -> bool {
        let left = self.calibration_left.get();
        self.calibration_left.set(left.saturating_sub(1));
        left > 0
    }

    async fn drive_forward(&mut self, distance_in: f64, speed_pct: f64) {
        self.travel(distance_in, speed_pct).await;
    }

    async fn drive_backward(&mut self, distance_in: f64, speed_pct: f64) {
        self.travel(-distance_in, speed_pct).await;
    }

    async fn turn_to_heading(&mut self, heading_deg: f64) {
        let delta = (heading_deg - self.heading).abs();
        Timer::after(Duration::from_millis((delta / MAX_TURN_DEG_S * 1000.0) as u64)).await;
        self.heading = heading_deg;
    }

    fn set_actuator(&mut self, actuator: Actuator, engaged: bool) {
        println!("[SIM] {:?} {}", actuator, if engaged { "on" } else { "off" });
        if actuator == Actuator::Intake {
            self.intake_on = engaged;
        }
    }

    fn stop(&mut self) {
        println!("[SIM] drive stopped");
    }
}

/// Controller rumble printed to the console
#[derive(Debug, Default)]
pub struct ConsoleAlert;

impl Alert for ConsoleAlert {
    fn rumble(&mut self, pattern: &str) {
        println!("[SIM] controller rumble \"{}\"", pattern);
    }
}
