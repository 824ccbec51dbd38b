//! Recording collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::Cell;

use embassy_time::{Duration, Timer};

use helm_core::config::DriveConfig;
use helm_core::traits::{Actuator, Alert, Drive, RoutineSelector};

/// One call made on the drivetrain
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Configure,
    Forward(f64, f64),
    Backward(f64, f64),
    Turn(f64),
    Actuator(Actuator, bool),
    Stop,
}

/// Drivetrain that records calls and takes `motion_ms` per motion
pub struct RecordingDrive {
    pub calls: Vec<Call>,
    pub motion_ms: u64,
    pub calibrating_polls: Cell<u32>,
    pub configured: Option<DriveConfig>,
}

impl RecordingDrive {
    pub fn new(motion_ms: u64) -> Self {
        Self {
            calls: Vec::new(),
            motion_ms,
            calibrating_polls: Cell::new(0),
            configured: None,
        }
    }

    /// Report calibrating for the next `polls` checks
    pub fn calibrating_for(mut self, polls: u32) -> Self {
        self.calibrating_polls = Cell::new(polls);
        self
    }

    /// Calls that count as motion primitives
    pub fn primitives(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::Configure | Call::Stop))
            .count()
    }

    async fn settle(&self) {
        if self.motion_ms > 0 {
            Timer::after(Duration::from_millis(self.motion_ms)).await;
        }
    }
}

impl Drive for RecordingDrive {
    fn configure(&mut self, config: &DriveConfig) {
        self.calls.push(Call::Configure);
        self.configured = Some(*config);
    }

    fn is_calibrating(&self) -> bool {
        let left = self.calibrating_polls.get();
        if left == 0 {
            return false;
        }
        self.calibrating_polls.set(left - 1);
        true
    }

    async fn drive_forward(&mut self, distance_in: f64, speed_pct: f64) {
        self.calls.push(Call::Forward(distance_in, speed_pct));
        self.settle().await;
    }

    async fn drive_backward(&mut self, distance_in: f64, speed_pct: f64) {
        self.calls.push(Call::Backward(distance_in, speed_pct));
        self.settle().await;
    }

    async fn turn_to_heading(&mut self, heading_deg: f64) {
        self.calls.push(Call::Turn(heading_deg));
        self.settle().await;
    }

    fn set_actuator(&mut self, actuator: Actuator, engaged: bool) {
        self.calls.push(Call::Actuator(actuator, engaged));
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }
}

/// Alert that remembers every pattern played
#[derive(Default)]
pub struct RecordingAlert {
    pub patterns: Vec<String>,
}

impl Alert for RecordingAlert {
    fn rumble(&mut self, pattern: &str) {
        self.patterns.push(pattern.to_string());
    }
}

/// Selector fixed at one ID
pub struct FixedSelector(pub u16);

impl RoutineSelector for FixedSelector {
    fn selected(&self) -> u16 {
        self.0
    }
}
