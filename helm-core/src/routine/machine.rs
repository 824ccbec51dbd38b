//! Routine state machine
//!
//! An autonomous routine moves through `NotStarted → Running → Completed`,
//! advancing exactly once per motion primitive issued. There is no
//! cancelled state: the competition period ending is an external event that
//! simply stops the routine where it is.

/// Routine execution states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineState {
    /// Routine selected but not entered
    #[default]
    NotStarted,
    /// Routine entered; `step` primitives have been issued so far
    Running { step: u16 },
    /// Ordered sequence finished
    Completed,
}

/// Events that drive the routine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineEvent {
    /// Routine entered
    Start,
    /// One motion primitive issued
    Primitive,
    /// Ordered sequence exhausted
    Finish,
}

impl RoutineState {
    /// Check if the routine is executing
    pub fn is_running(&self) -> bool {
        matches!(self, RoutineState::Running { .. })
    }

    /// Check if the routine has finished its sequence
    pub fn is_complete(&self) -> bool {
        matches!(self, RoutineState::Completed)
    }

    /// Number of primitives issued, if running
    pub fn step(&self) -> Option<u16> {
        match self {
            RoutineState::Running { step } => Some(*step),
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: RoutineEvent) -> Self {
        use RoutineEvent::*;
        use RoutineState::*;

        match (self, event) {
            (NotStarted, Start) => Running { step: 0 },
            // A routine that never starts (unknown selector) still ends
            (NotStarted, Finish) => Completed,

            (Running { step }, Primitive) => Running {
                step: step.saturating_add(1),
            },
            (Running { .. }, Finish) => Completed,

            // Default: stay in current state
            _ => self,
        }
    }
}
