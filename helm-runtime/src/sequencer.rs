//! Autonomous routine sequencer
//!
//! Runs exactly one routine per autonomous period:
//!
//! 1. Read the selector and look the routine up in the catalog
//! 2. Issue its motion primitives in order, each awaited to completion
//! 3. Race the whole routine against the end of the period
//! 4. Report the outcome, primitive count and elapsed time
//!
//! Motion primitives are not retried. A primitive that cannot finish is
//! bounded by the drivetrain's own timeout and the sequence moves on.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use helm_core::routine::{
    RoutineEvent, RoutineId, RoutineOutcome, RoutineReport, RoutineState, UnknownRoutine,
};
use helm_core::traits::{
    Actuator, Alert, Drive, RoutineSelector, Sensor, RUMBLE_INVALID_ROUTINE,
};

use crate::context::RobotContext;
use crate::period::PeriodEnd;
use crate::routines;

/// Interval between calibration checks during setup
const CALIBRATION_POLL: Duration = Duration::from_millis(5);

/// Drivetrain wrapper that counts and logs every primitive issued
pub struct Motion<'a, D> {
    drive: &'a mut D,
    state: RoutineState,
}

impl<'a, D: Drive> Motion<'a, D> {
    /// Enter a routine on `drive`
    pub fn start(drive: &'a mut D) -> Self {
        Self {
            drive,
            state: RoutineState::NotStarted.transition(RoutineEvent::Start),
        }
    }

    /// Current routine state
    pub fn state(&self) -> RoutineState {
        self.state
    }

    /// Primitives issued so far
    pub fn primitives(&self) -> u16 {
        self.state.step().unwrap_or(0)
    }

    fn issue(&mut self) {
        self.state = self.state.transition(RoutineEvent::Primitive);
    }

    /// Drive forward and wait for the motion to settle
    pub async fn forward(&mut self, distance_in: f64, speed_pct: f64) {
        self.issue();
        debug!("forward {} in at {}%", distance_in, speed_pct);
        self.drive.drive_forward(distance_in, speed_pct).await;
    }

    /// Drive backward and wait for the motion to settle
    pub async fn backward(&mut self, distance_in: f64, speed_pct: f64) {
        self.issue();
        debug!("backward {} in at {}%", distance_in, speed_pct);
        self.drive.drive_backward(distance_in, speed_pct).await;
    }

    /// Turn to an absolute heading and wait for the turn to settle
    pub async fn turn_to(&mut self, heading_deg: f64) {
        self.issue();
        debug!("turn to {} deg", heading_deg);
        self.drive.turn_to_heading(heading_deg).await;
    }

    /// Switch a mechanism
    pub fn set_actuator(&mut self, actuator: Actuator, engaged: bool) {
        self.issue();
        debug!("{:?} -> {}", actuator, engaged);
        self.drive.set_actuator(actuator, engaged);
    }

    /// Leave the routine, returning the number of primitives issued
    fn finish(&mut self) -> u16 {
        let issued = self.primitives();
        self.state = self.state.transition(RoutineEvent::Finish);
        issued
    }

    /// Stop the drivetrain without counting a primitive
    fn halt(&mut self) {
        self.drive.stop();
    }
}

/// Per-period routine runner
pub struct Sequencer<'a, 'd, D, S, A> {
    ctx: &'a mut RobotContext<'d, D, S, A>,
    period: &'a PeriodEnd,
}

impl<'a, 'd, D, S, A> Sequencer<'a, 'd, D, S, A>
where
    D: Drive,
    S: Sensor,
    A: Alert,
{
    /// Create a sequencer over `ctx` that stops when `period` ends
    pub fn new(ctx: &'a mut RobotContext<'d, D, S, A>, period: &'a PeriodEnd) -> Self {
        Self { ctx, period }
    }

    /// Push drivetrain configuration and wait for heading calibration
    pub async fn prepare(&mut self) {
        self.ctx.drive.configure(&self.ctx.config.drive);

        info!("Calibrating...");
        while self.ctx.drive.is_calibrating() {
            Timer::after(CALIBRATION_POLL).await;
        }
        info!("Calibrated");
    }

    /// Run the routine the selector currently points at
    pub async fn run_selected(&mut self, selector: &impl RoutineSelector) -> RoutineReport {
        self.run(selector.selected()).await
    }

    /// Run the routine with selector ID `selector`
    pub async fn run(&mut self, selector: u16) -> RoutineReport {
        let start = Instant::now();

        let routine = match RoutineId::try_from(selector) {
            Ok(routine) => routine,
            Err(UnknownRoutine(id)) => {
                warn!("Invalid routine {} selected", id);
                self.ctx.alert.rumble(RUMBLE_INVALID_ROUTINE);
                let state = RoutineState::NotStarted.transition(RoutineEvent::Finish);
                return report(selector, RoutineOutcome::UnknownRoutine, state, 0, start);
            }
        };

        info!("Running routine {} ({})", routine.title(), selector);

        let RobotContext {
            drive,
            trackers,
            intake,
            config,
            ..
        } = &mut *self.ctx;
        let period_length = Duration::from_millis(config.auton.period_ms as u64);

        let mut motion = Motion::start(drive);
        let raced = select(
            routines::run(routine, &mut motion, trackers, &*intake, config),
            self.period.wait_or_elapsed(period_length),
        )
        .await;

        let (outcome, primitives) = match raced {
            Either::First(()) => (RoutineOutcome::Success, motion.finish()),
            Either::Second(()) => {
                warn!("Period ended during {}", routine.title());
                motion.halt();
                (RoutineOutcome::AbortedByPeriodEnd, motion.primitives())
            }
        };

        report(selector, outcome, motion.state(), primitives, start)
    }
}

fn report(
    selector: u16,
    outcome: RoutineOutcome,
    state: RoutineState,
    primitives: u16,
    start: Instant,
) -> RoutineReport {
    let elapsed_ms = start.elapsed().as_millis();
    info!("Auto time: {} ms", elapsed_ms);
    RoutineReport {
        selector,
        outcome,
        state,
        primitives,
        elapsed_ms,
    }
}
