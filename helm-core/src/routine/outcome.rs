//! Routine completion status

use super::machine::RoutineState;

/// How an autonomous routine ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineOutcome {
    /// Every primitive in the sequence completed
    Success,
    /// Selector named no routine; nothing moved
    UnknownRoutine,
    /// Competition period ended before the sequence finished
    AbortedByPeriodEnd,
}

/// Diagnostic summary of one autonomous period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoutineReport {
    /// Selector ID that was run
    pub selector: u16,
    /// How the routine ended
    pub outcome: RoutineOutcome,
    /// State machine position when the routine was left
    pub state: RoutineState,
    /// Motion primitives issued to the drivetrain
    pub primitives: u16,
    /// Wall-clock time from entry to exit in milliseconds
    pub elapsed_ms: u64,
}

impl RoutineReport {
    /// Check if the routine ran to completion
    pub fn is_success(&self) -> bool {
        self.outcome == RoutineOutcome::Success
    }
}
