//! Multiple relative trackers over one position source
//!
//! Each tracker is a "virtual zero": an offset subtracted from the shared
//! raw reading. Several logical measurements ("distance since the routine
//! started", "distance since the last turn") can coexist on a single
//! physical sensor without zeroing the hardware for each of them.
//!
//! Trackers are addressed by [`TrackerHandle`]s. A handle carries the arena
//! generation it was issued in, so handles from before a [`MultiTracker::clear`]
//! are rejected instead of silently reading another tracker's offset.
//!
//! # Concurrency
//!
//! A reset racing a read from another task can observe a reading that is one
//! sample stale. Control loops tolerate this; callers needing a consistent
//! snapshot must read and reset from the same task.

use heapless::Vec;

use super::geometry::WheelGeometry;
use super::source::PositionSource;
use crate::traits::{DeviceError, PositionDevice, SourceKind};

/// Default tracker capacity
pub const MAX_TRACKERS: usize = 8;

/// Handle to one tracker in a [`MultiTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerHandle {
    index: u8,
    generation: u32,
}

impl TrackerHandle {
    /// Dense tracker ID, assigned from 0 in creation order
    pub fn id(&self) -> usize {
        self.index as usize
    }

    /// Arena generation this handle was issued in
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Errors from tracker operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerError {
    /// Handle does not name a tracker in this arena
    InvalidHandle,
    /// Handle was issued before the arena was cleared
    StaleHandle,
    /// Tracker capacity exhausted
    Full,
    /// Every arena generation has been used; the arena can no longer be cleared
    GenerationsExhausted,
    /// The underlying device failed
    Device(DeviceError),
}

impl From<DeviceError> for TrackerError {
    fn from(e: DeviceError) -> Self {
        TrackerError::Device(e)
    }
}

/// Arena of tracker offsets backed by one position source
#[derive(Debug)]
pub struct MultiTracker<'d, const N: usize = MAX_TRACKERS> {
    /// Shared raw reading
    source: PositionSource<'d>,
    /// Offset per tracker in degrees, indexed by tracker ID
    offsets: Vec<f64, N>,
    /// Bumped on every clear, never reused
    generation: u32,
}

impl<'d, const N: usize> MultiTracker<'d, N> {
    /// Create an empty tracker arena
    pub fn new(source: PositionSource<'d>) -> Self {
        Self {
            source,
            offsets: Vec::new(),
            generation: 0,
        }
    }

    /// Get the underlying source
    pub fn source(&self) -> &PositionSource<'d> {
        &self.source
    }

    /// Number of live trackers
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Check if no tracker exists
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Handles of all live trackers, in ID order
    pub fn handles(&self) -> impl Iterator<Item = TrackerHandle> + '_ {
        let generation = self.generation;
        (0..self.offsets.len()).map(move |i| TrackerHandle {
            index: i as u8,
            generation,
        })
    }

    /// Raw reading of the shared source in degrees
    pub fn raw(&self) -> Result<f64, TrackerError> {
        Ok(self.source.read()?)
    }

    /// Create a tracker reading zero at the current position
    ///
    /// The current raw reading becomes the new tracker's offset.
    pub fn new_tracker(&mut self) -> Result<TrackerHandle, TrackerError> {
        if self.offsets.is_full() || self.offsets.len() > u8::MAX as usize {
            return Err(TrackerError::Full);
        }
        let raw = self.source.read()?;
        let index = self.offsets.len() as u8;
        self.offsets.push(raw).map_err(|_| TrackerError::Full)?;

        Ok(TrackerHandle {
            index,
            generation: self.generation,
        })
    }

    /// Re-zero one tracker at the current position
    ///
    /// Other trackers are unaffected.
    pub fn reset_tracker(&mut self, handle: TrackerHandle) -> Result<(), TrackerError> {
        let index = self.check(handle)?;
        let raw = self.source.read()?;
        self.offsets[index] = raw;
        Ok(())
    }

    /// Degrees moved since the tracker was created or last reset
    pub fn read(&self, handle: TrackerHandle) -> Result<f64, TrackerError> {
        let index = self.check(handle)?;
        let raw = self.source.read()?;
        Ok(raw - self.offsets[index])
    }

    /// Linear distance in inches since the tracker was created or last reset
    pub fn read_distance(
        &self,
        handle: TrackerHandle,
        geometry: &WheelGeometry,
    ) -> Result<f64, TrackerError> {
        Ok(geometry.degrees_to_inches(self.read(handle)?))
    }

    /// Zero the device and every tracker
    ///
    /// The raw reading is captured once, then the hardware is zeroed and
    /// every offset set to the new hardware zero. If the hardware refuses
    /// the reset, the offsets fall back to the captured reading so every
    /// tracker still reads zero, and the device error is returned.
    pub fn reset_all(&mut self) -> Result<(), TrackerError> {
        let raw = self.source.read()?;

        match self.source.reset_zero() {
            Ok(()) => {
                self.offsets.iter_mut().for_each(|o| *o = 0.0);
                Ok(())
            }
            Err(e) => {
                self.offsets.iter_mut().for_each(|o| *o = raw);
                Err(e.into())
            }
        }
    }

    /// Rebind the source to another device
    ///
    /// Every tracker is rebased onto the new device and reads zero.
    pub fn rebind(
        &mut self,
        device: &'d dyn PositionDevice,
        kind: SourceKind,
    ) -> Result<(), TrackerError> {
        self.source.bind(device, kind);
        let raw = self.source.read()?;
        self.offsets.iter_mut().for_each(|o| *o = raw);
        Ok(())
    }

    /// Drop every tracker
    ///
    /// Handles issued before the clear become stale. Once the generation
    /// counter is exhausted the arena is left untouched and
    /// [`TrackerError::GenerationsExhausted`] is returned.
    pub fn clear(&mut self) -> Result<(), TrackerError> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or(TrackerError::GenerationsExhausted)?;
        self.offsets.clear();
        self.generation = generation;
        Ok(())
    }

    /// Validate a handle and return its index
    fn check(&self, handle: TrackerHandle) -> Result<usize, TrackerError> {
        if handle.generation != self.generation {
            return Err(TrackerError::StaleHandle);
        }
        let index = handle.index as usize;
        if index >= self.offsets.len() {
            return Err(TrackerError::InvalidHandle);
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockEncoder;
    use proptest::prelude::*;

    #[test]
    fn test_reference_scenario() {
        let encoder = MockEncoder::new(100.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));

        let first = trackers.new_tracker().unwrap();
        assert_eq!(first.id(), 0);

        encoder.set(150.0);
        assert_eq!(trackers.read(first), Ok(50.0));

        let second = trackers.new_tracker().unwrap();
        assert_eq!(second.id(), 1);
        assert_eq!(trackers.read(second), Ok(0.0));

        encoder.set(200.0);
        assert_eq!(trackers.read(first), Ok(100.0));
        assert_eq!(trackers.read(second), Ok(50.0));

        trackers.reset_all().unwrap();
        assert_eq!(trackers.read(first), Ok(0.0));
        assert_eq!(trackers.read(second), Ok(0.0));
        assert_eq!(encoder.resets(), 1);
    }

    #[test]
    fn test_reset_tracker_is_isolated() {
        let encoder = MockEncoder::new(0.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));

        let a = trackers.new_tracker().unwrap();
        let b = trackers.new_tracker().unwrap();

        encoder.set(90.0);
        trackers.reset_tracker(a).unwrap();

        assert_eq!(trackers.read(a), Ok(0.0));
        assert_eq!(trackers.read(b), Ok(90.0));
        // Hardware is never zeroed by a single-tracker reset
        assert_eq!(encoder.resets(), 0);
    }

    #[test]
    fn test_reset_all_with_no_trackers() {
        let encoder = MockEncoder::new(33.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));

        trackers.reset_all().unwrap();
        assert_eq!(encoder.raw(), 0.0);
        assert!(trackers.is_empty());
    }

    /// Device that reads fine but refuses to be zeroed
    struct NoReset<'a>(&'a MockEncoder);

    impl PositionDevice for NoReset<'_> {
        fn position_deg(&self) -> Result<f64, DeviceError> {
            self.0.position_deg()
        }

        fn reset_position(&self) -> Result<(), DeviceError> {
            Err(DeviceError::NotReady)
        }
    }

    #[test]
    fn test_reset_all_hardware_failure_keeps_trackers_consistent() {
        let encoder = MockEncoder::new(0.0);
        let no_reset = NoReset(&encoder);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));
        let a = trackers.new_tracker().unwrap();
        encoder.set(45.0);

        trackers.rebind(&no_reset, SourceKind::RotationSensor).unwrap();
        assert_eq!(trackers.read(a), Ok(0.0));
        encoder.set(60.0);

        assert_eq!(
            trackers.reset_all(),
            Err(TrackerError::Device(DeviceError::NotReady))
        );
        assert_eq!(trackers.read(a), Ok(0.0));
    }

    #[test]
    fn test_device_error_leaves_offsets_untouched() {
        let encoder = MockEncoder::new(10.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));
        let a = trackers.new_tracker().unwrap();

        encoder.disconnect();
        assert_eq!(
            trackers.reset_tracker(a),
            Err(TrackerError::Device(DeviceError::Disconnected))
        );
        assert_eq!(
            trackers.new_tracker(),
            Err(TrackerError::Device(DeviceError::Disconnected))
        );

        encoder.reconnect();
        encoder.set(25.0);
        assert_eq!(trackers.read(a), Ok(15.0));
        assert_eq!(trackers.len(), 1);
    }

    #[test]
    fn test_invalid_and_stale_handles() {
        let encoder = MockEncoder::new(0.0);
        let mut small: MultiTracker<'_, 2> =
            MultiTracker::new(PositionSource::motor_encoder(&encoder));
        let mut other: MultiTracker<'_, 2> =
            MultiTracker::new(PositionSource::motor_encoder(&encoder));

        let a = small.new_tracker().unwrap();
        let _ = small.new_tracker().unwrap();
        assert_eq!(small.new_tracker(), Err(TrackerError::Full));

        // Handle index 1 never issued by `other`
        let _ = other.new_tracker().unwrap();
        let foreign = small.handles().nth(1).unwrap();
        assert_eq!(other.read(foreign), Err(TrackerError::InvalidHandle));

        small.clear().unwrap();
        assert_eq!(small.read(a), Err(TrackerError::StaleHandle));
        assert_eq!(small.reset_tracker(a), Err(TrackerError::StaleHandle));

        let fresh = small.new_tracker().unwrap();
        assert_eq!(fresh.id(), 0);
        assert_eq!(small.read(fresh), Ok(0.0));
    }

    #[test]
    fn test_old_handle_stays_stale_across_many_clears() {
        let encoder = MockEncoder::new(0.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::rotation_sensor(&encoder));
        let old = trackers.new_tracker().unwrap();

        for _ in 0..=u16::MAX as u32 {
            trackers.clear().unwrap();
        }
        encoder.set(30.0);
        let fresh = trackers.new_tracker().unwrap();

        assert_eq!(fresh.id(), old.id());
        assert_eq!(trackers.read(old), Err(TrackerError::StaleHandle));
        assert_eq!(trackers.read(fresh), Ok(0.0));
    }

    #[test]
    fn test_clear_refuses_once_generations_run_out() {
        let encoder = MockEncoder::new(0.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::rotation_sensor(&encoder));
        trackers.generation = u32::MAX - 1;
        let a = trackers.new_tracker().unwrap();

        trackers.clear().unwrap();
        let b = trackers.new_tracker().unwrap();
        assert_eq!(trackers.clear(), Err(TrackerError::GenerationsExhausted));

        // Arena untouched: the live handle still reads, the old one stays stale
        assert_eq!(trackers.len(), 1);
        assert_eq!(trackers.read(b), Ok(0.0));
        assert_eq!(trackers.read(a), Err(TrackerError::StaleHandle));
    }

    #[test]
    fn test_read_distance() {
        let encoder = MockEncoder::new(0.0);
        let mut trackers: MultiTracker = MultiTracker::new(PositionSource::rotation_sensor(&encoder));
        let a = trackers.new_tracker().unwrap();

        // One full turn of a 2" wheel at 1:1 is one circumference
        encoder.set(360.0);
        let geometry = WheelGeometry::new(2.0, 1.0, 1.0);
        let distance = trackers.read_distance(a, &geometry).unwrap();
        assert!((distance - 2.0 * core::f64::consts::PI).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_trackers_are_isolated(
            start in -1000.0f64..1000.0,
            steps in proptest::collection::vec(-500.0f64..500.0, 1..8),
        ) {
            let encoder = MockEncoder::new(start);
            let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));

            let mut captured = std::vec::Vec::new();
            for delta in &steps {
                let handle = trackers.new_tracker().unwrap();
                captured.push((handle, encoder.raw()));
                encoder.advance(*delta);
            }

            for (handle, at_creation) in captured {
                let reading = trackers.read(handle).unwrap();
                prop_assert!((reading - (encoder.raw() - at_creation)).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_reset_all_zeroes_every_tracker(
            count in 0usize..=MAX_TRACKERS,
            raw in -5000.0f64..5000.0,
        ) {
            let encoder = MockEncoder::new(0.0);
            let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));
            for i in 0..count {
                encoder.set(i as f64 * 17.0);
                trackers.new_tracker().unwrap();
            }
            encoder.set(raw);

            trackers.reset_all().unwrap();
            for handle in trackers.handles() {
                prop_assert_eq!(trackers.read(handle).unwrap(), 0.0);
            }
        }

        #[test]
        fn prop_reads_follow_monotonic_source(
            deltas in proptest::collection::vec(0.0f64..50.0, 1..32),
        ) {
            let encoder = MockEncoder::new(0.0);
            let mut trackers: MultiTracker = MultiTracker::new(PositionSource::motor_encoder(&encoder));
            let handle = trackers.new_tracker().unwrap();

            let mut last = trackers.read(handle).unwrap();
            for delta in deltas {
                encoder.advance(delta);
                let reading = trackers.read(handle).unwrap();
                prop_assert!(reading >= last);
                prop_assert!((reading - last - delta).abs() < 1e-9);
                last = reading;
            }
        }
    }
}
