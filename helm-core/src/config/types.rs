//! Configuration type definitions
//!
//! These types describe one robot: how its drivetrain is geared and tuned,
//! how watchers poll, and how the autonomous period is timed. Every field
//! has a default so a partial configuration file is enough.

use crate::tracking::WheelGeometry;
use crate::traits::BrakeMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gains and settle rules for one PID loop
///
/// The values are handed to the drivetrain as-is; nothing in this crate
/// runs the loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Error below which the integral term starts accumulating
    pub start_i: f64,
    /// Error band considered settled
    pub settle_error: f64,
    /// Time the error must stay in the band (ms)
    pub settle_time_ms: u32,
}

impl PidGains {
    /// Create a gain set
    pub const fn new(
        kp: f64,
        ki: f64,
        kd: f64,
        start_i: f64,
        settle_error: f64,
        settle_time_ms: u32,
    ) -> Self {
        Self {
            kp,
            ki,
            kd,
            start_i,
            settle_error,
            settle_time_ms,
        }
    }
}

/// Drivetrain setup pushed to the drive before autonomous
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveConfig {
    /// Wheel size and gearing
    pub geometry: WheelGeometry,
    /// Distance between left and right wheels (inches)
    pub track_width_in: f64,
    /// Default straight-line speed (percent)
    pub drive_speed_pct: f64,
    /// Default point-turn speed (percent)
    pub turn_speed_pct: f64,
    /// Default arc-turn speed (percent)
    pub arc_turn_speed_pct: f64,
    /// Stopping mode
    pub brake: BrakeMode,
    /// Reverse each left motor
    pub left_reversed: [bool; 3],
    /// Reverse each right motor
    pub right_reversed: [bool; 3],
    /// Straight drive loop
    pub drive_pid: PidGains,
    /// Heading hold while driving straight
    pub drift_pid: PidGains,
    /// Point turn loop
    pub turn_pid: PidGains,
    /// Arc turn loop
    pub arc_pid: PidGains,
    /// Heading hold while arcing
    pub arc_drift_pid: PidGains,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            geometry: WheelGeometry::default(),
            track_width_in: 13.0,
            drive_speed_pct: 100.0,
            turn_speed_pct: 100.0,
            arc_turn_speed_pct: 40.0,
            brake: BrakeMode::Brake,
            left_reversed: [true; 3],
            right_reversed: [false; 3],
            drive_pid: PidGains::new(0.125, 10.0, 0.005, 12.0, 2.0, 125),
            drift_pid: PidGains::new(0.015, 0.0, 0.0, 1.0, 0.0, 0),
            turn_pid: PidGains::new(0.65, 0.0, 0.65, 3.0, 1.0, 100),
            arc_pid: PidGains::new(0.1, 5.0, 0.0, 3.0, 2.0, 200),
            arc_drift_pid: PidGains::new(0.2, 0.0, 0.0, 1.0, 0.0, 0),
        }
    }
}

/// Event watcher polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatchConfig {
    /// Time between predicate evaluations (ms)
    pub poll_interval_ms: u32,
    /// Give up after this long (ms); `None` waits until fired or cancelled
    pub timeout_ms: Option<u32>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20,
            timeout_ms: None,
        }
    }
}

/// Autonomous period timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutonConfig {
    /// Length of the autonomous period (ms)
    pub period_ms: u32,
    /// How long the capture routine waits for its sensor (ms)
    pub capture_timeout_ms: u32,
    /// Interval between background tracker readings (ms)
    pub telemetry_interval_ms: u32,
    /// Intake sensor reading that means an object is held
    pub capture_threshold: f64,
}

impl Default for AutonConfig {
    fn default() -> Self {
        Self {
            period_ms: 15_000,
            capture_timeout_ms: 3_000,
            telemetry_interval_ms: 20,
            capture_threshold: 100.0,
        }
    }
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotConfig {
    /// Drivetrain setup
    pub drive: DriveConfig,
    /// Watcher polling
    pub watch: WatchConfig,
    /// Autonomous timing
    pub auton: AutonConfig,
}
