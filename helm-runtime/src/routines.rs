//! Autonomous routine variants
//!
//! Each variant is an async fn over a [`Motion`] wrapper. Side actions
//! (telemetry, sensor watchers) run inside the variant's own future, so
//! they are dropped with it when the routine finishes or the period ends.

use embassy_futures::join::join;
use embassy_futures::select::select;
use embassy_time::{Duration, Ticker};

use helm_core::config::RobotConfig;
use helm_core::routine::RoutineId;
use helm_core::tracking::TrackerHandle;
use helm_core::traits::{Actuator, Drive, Sensor};

use crate::context::SharedTrackers;
use crate::rendezvous::Rendezvous;
use crate::sequencer::Motion;
use crate::watcher::{CancelToken, EventWatcher, WatchOutcome};

/// Odom: straight leg length (inches)
const ODOM_LEG_IN: f64 = 24.0;

/// Capture: approach distance to the object (inches)
const CAPTURE_APPROACH_IN: f64 = 18.0;
/// Capture: heading facing the goal (degrees)
const CAPTURE_GOAL_HEADING: f64 = 45.0;
/// Capture: distance from the turn to the goal (inches)
const CAPTURE_SCORE_IN: f64 = 12.0;

/// Dispatch to the routine body for `routine`
pub async fn run<D, S>(
    routine: RoutineId,
    motion: &mut Motion<'_, D>,
    trackers: &SharedTrackers<'_>,
    intake: &S,
    config: &RobotConfig,
) where
    D: Drive,
    S: Sensor,
{
    match routine {
        RoutineId::DoNothing => {}
        RoutineId::Odom => odom(motion, trackers, config).await,
        RoutineId::Capture => capture(motion, intake, config).await,
    }
}

/// Drive out and back while streaming tracker readings
pub async fn odom<D: Drive>(
    motion: &mut Motion<'_, D>,
    trackers: &SharedTrackers<'_>,
    config: &RobotConfig,
) {
    if let Err(e) = trackers.new_tracker() {
        warn!("No tracker for odom telemetry: {:?}", e);
    }

    let speed = config.drive.drive_speed_pct;
    let path = async {
        motion.forward(ODOM_LEG_IN, speed).await;
        motion.turn_to(180.0).await;
        motion.forward(ODOM_LEG_IN, speed).await;
        motion.turn_to(0.0).await;
    };

    let interval = Duration::from_millis(config.auton.telemetry_interval_ms as u64);
    let geometry = config.drive.geometry;
    let telemetry = stream_trackers(trackers, interval, |handle, degrees| {
        info!(
            "tracker {}: {} deg, {} in",
            handle.id(),
            degrees,
            geometry.degrees_to_inches(degrees)
        );
    });

    select(path, telemetry).await;
}

/// Report every live tracker to `sink` once per `interval`, forever
///
/// Trackers that fail to read are skipped for that sample.
pub async fn stream_trackers<F>(trackers: &SharedTrackers<'_>, interval: Duration, mut sink: F)
where
    F: FnMut(TrackerHandle, f64),
{
    let mut ticker = Ticker::every(interval);
    loop {
        trackers.with(|t| {
            for handle in t.handles() {
                if let Ok(degrees) = t.read(handle) {
                    sink(handle, degrees);
                }
            }
        });
        ticker.next().await;
    }
}

/// Drive to an object with the intake running, turn to the goal once the
/// intake sensor reports a capture, then score it
pub async fn capture<D, S>(motion: &mut Motion<'_, D>, intake: &S, config: &RobotConfig)
where
    D: Drive,
    S: Sensor,
{
    let threshold = config.auton.capture_threshold;
    let speed = config.drive.drive_speed_pct;
    let capture_timeout = Duration::from_millis(config.auton.capture_timeout_ms as u64);

    let rendezvous = Rendezvous::new();
    let cancel = CancelToken::new();
    let watcher = EventWatcher::from_config(
        || matches!(intake.read(), Ok(value) if value >= threshold),
        &config.watch,
    )
    .named("intake")
    .cancel_on(&cancel);

    let main = async {
        motion.set_actuator(Actuator::Intake, true);
        motion.forward(CAPTURE_APPROACH_IN, speed).await;
        motion.turn_to(CAPTURE_GOAL_HEADING).await;

        match rendezvous.wait_timeout(capture_timeout).await {
            Ok(WatchOutcome::Fired { .. }) => {
                motion.set_actuator(Actuator::Clamp, true);
                motion.forward(CAPTURE_SCORE_IN, speed).await;
                motion.set_actuator(Actuator::Clamp, false);
            }
            Ok(outcome) => warn!("Intake never reported a capture: {:?}", outcome),
            Err(_) => {}
        }

        motion.set_actuator(Actuator::Intake, false);
        cancel.cancel();
    };

    join(main, watcher.notify(&rendezvous)).await;
}

