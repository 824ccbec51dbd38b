//! Position tracking
//!
//! A [`PositionSource`] binds one physical encoder or rotation sensor, and a
//! [`MultiTracker`] layers any number of independent relative measurements on
//! top of it.

pub mod geometry;
pub mod multi;
pub mod source;

pub use geometry::WheelGeometry;
pub use multi::{MultiTracker, TrackerError, TrackerHandle, MAX_TRACKERS};
pub use source::PositionSource;
