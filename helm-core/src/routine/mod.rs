//! Autonomous routine model
//!
//! Board-agnostic pieces of the routine sequencer: the state machine, the
//! catalog of selectable routines and the completion report. Execution
//! itself lives in `helm-runtime`.

pub mod catalog;
pub mod machine;
pub mod outcome;

pub use catalog::{RoutineId, UnknownRoutine};
pub use machine::{RoutineEvent, RoutineState};
pub use outcome::{RoutineOutcome, RoutineReport};
