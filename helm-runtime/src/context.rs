//! Robot application context
//!
//! Everything a routine touches is owned here and passed down by
//! reference. Each field has a single writer: the sequencer drives the
//! drivetrain and fires alerts, while trackers are shared between the
//! main sequence and background telemetry through a blocking mutex.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use helm_core::config::RobotConfig;
use helm_core::tracking::{MultiTracker, TrackerError, TrackerHandle};
use helm_core::traits::{Alert, Drive, Sensor};

/// Trackers shared between tasks on the same executor
pub struct SharedTrackers<'d> {
    inner: Mutex<NoopRawMutex, RefCell<MultiTracker<'d>>>,
}

impl<'d> SharedTrackers<'d> {
    /// Wrap a tracker arena
    pub fn new(trackers: MultiTracker<'d>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(trackers)),
        }
    }

    /// Run `f` with exclusive access to the trackers
    pub fn with<R>(&self, f: impl FnOnce(&mut MultiTracker<'d>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Start a new tracker at the current position
    pub fn new_tracker(&self) -> Result<TrackerHandle, TrackerError> {
        self.with(|t| t.new_tracker())
    }

    /// Re-zero one tracker
    pub fn reset_tracker(&self, handle: TrackerHandle) -> Result<(), TrackerError> {
        self.with(|t| t.reset_tracker(handle))
    }

    /// Degrees since the tracker was started or reset
    pub fn read(&self, handle: TrackerHandle) -> Result<f64, TrackerError> {
        self.with(|t| t.read(handle))
    }

    /// Zero the device and every tracker
    pub fn reset_all(&self) -> Result<(), TrackerError> {
        self.with(|t| t.reset_all())
    }

    /// Number of live trackers
    pub fn len(&self) -> usize {
        self.with(|t| t.len())
    }

    /// Check if no tracker has been started
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned robot state handed to the sequencer
pub struct RobotContext<'d, D, S, A> {
    /// External drivetrain
    pub drive: D,
    /// Relative trackers on the odometry wheel
    pub trackers: SharedTrackers<'d>,
    /// Intake object sensor
    pub intake: S,
    /// Controller haptics
    pub alert: A,
    /// Robot configuration
    pub config: RobotConfig,
}

impl<'d, D, S, A> RobotContext<'d, D, S, A>
where
    D: Drive,
    S: Sensor,
    A: Alert,
{
    /// Assemble a context
    pub fn new(
        drive: D,
        trackers: MultiTracker<'d>,
        intake: S,
        alert: A,
        config: RobotConfig,
    ) -> Self {
        Self {
            drive,
            trackers: SharedTrackers::new(trackers),
            intake,
            alert,
            config,
        }
    }
}
