//! Async runtime pieces of the Helm motion core
//!
//! Built on embassy primitives so the same code runs on the robot's
//! executor and on the host:
//!
//! - Event watchers with cancellation and timeout
//! - One-shot rendezvous between watchers and the main sequence
//! - Competition period end signal
//! - Robot context, routine variants and the per-period sequencer

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod context;
pub mod period;
pub mod rendezvous;
pub mod routines;
pub mod sequencer;
pub mod watcher;

pub use context::{RobotContext, SharedTrackers};
pub use period::PeriodEnd;
pub use rendezvous::Rendezvous;
pub use sequencer::{Motion, Sequencer};
pub use watcher::{CancelToken, EventWatcher, WatchOutcome};
