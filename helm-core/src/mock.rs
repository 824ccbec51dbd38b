//! Mock devices for host testing
//!
//! Cell-backed implementations of the device traits. Tests move the raw
//! value by hand to simulate wheel rotation or a sensor changing.

use core::cell::Cell;

use crate::traits::{DeviceError, PositionDevice, Sensor};

/// Mock encoder with a settable raw position
#[derive(Debug)]
pub struct MockEncoder {
    raw: Cell<f64>,
    connected: Cell<bool>,
    resets: Cell<u32>,
}

impl MockEncoder {
    /// Create an encoder reporting `raw` degrees
    pub fn new(raw: f64) -> Self {
        Self {
            raw: Cell::new(raw),
            connected: Cell::new(true),
            resets: Cell::new(0),
        }
    }

    /// Set the raw position
    pub fn set(&self, raw: f64) {
        self.raw.set(raw);
    }

    /// Rotate by `delta` degrees
    pub fn advance(&self, delta: f64) {
        self.raw.set(self.raw.get() + delta);
    }

    /// Current raw position, bypassing the connection check
    pub fn raw(&self) -> f64 {
        self.raw.get()
    }

    /// Number of hardware resets performed
    pub fn resets(&self) -> u32 {
        self.resets.get()
    }

    /// Simulate the cable being pulled
    pub fn disconnect(&self) {
        self.connected.set(false);
    }

    /// Simulate the cable being plugged back in
    pub fn reconnect(&self) {
        self.connected.set(true);
    }
}

impl PositionDevice for MockEncoder {
    fn position_deg(&self) -> Result<f64, DeviceError> {
        if self.connected.get() {
            Ok(self.raw.get())
        } else {
            Err(DeviceError::Disconnected)
        }
    }

    fn reset_position(&self) -> Result<(), DeviceError> {
        if !self.connected.get() {
            return Err(DeviceError::Disconnected);
        }
        self.raw.set(0.0);
        self.resets.set(self.resets.get() + 1);
        Ok(())
    }
}

/// Mock scalar sensor
#[derive(Debug, Default)]
pub struct MockSensor {
    value: Cell<f64>,
    reads: Cell<u32>,
}

impl MockSensor {
    /// Create a sensor reporting `value`
    pub fn new(value: f64) -> Self {
        Self {
            value: Cell::new(value),
            reads: Cell::new(0),
        }
    }

    /// Set the reported value
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }

    /// Number of reads performed
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl Sensor for MockSensor {
    fn read(&self) -> Result<f64, DeviceError> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.value.get())
    }
}
