//! Board-agnostic core logic for the Helm motion core
//!
//! This crate contains everything that does not depend on a specific
//! executor or hardware implementation:
//!
//! - Device traits (position devices, drivetrain, sensors, alerts)
//! - Position sources and the multi-tracker offset arena
//! - Autonomous routine state machine and catalog
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod routine;
pub mod tracking;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
