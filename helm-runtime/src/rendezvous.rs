//! One-shot rendezvous between a routine and its watchers

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, TimeoutError};

use crate::watcher::WatchOutcome;

/// Synchronized one-shot completion point
///
/// A watcher signals it once; the main sequence waits on it, optionally
/// bounded by a timeout. Signalling before anyone waits is fine: the
/// outcome is held until taken.
pub struct Rendezvous {
    signal: Signal<CriticalSectionRawMutex, WatchOutcome>,
}

impl Default for Rendezvous {
    fn default() -> Self {
        Self::new()
    }
}

impl Rendezvous {
    /// Create an unset rendezvous
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Deliver a watcher outcome
    pub fn signal(&self, outcome: WatchOutcome) {
        self.signal.signal(outcome);
    }

    /// Check if an outcome is waiting to be taken
    pub fn is_set(&self) -> bool {
        self.signal.signaled()
    }

    /// Wait for the outcome and take it
    pub async fn wait(&self) -> WatchOutcome {
        self.signal.wait().await
    }

    /// Wait for the outcome, giving up after `timeout`
    pub async fn wait_timeout(&self, timeout: Duration) -> Result<WatchOutcome, TimeoutError> {
        let result = with_timeout(timeout, self.signal.wait()).await;
        if result.is_err() {
            warn!("rendezvous timed out after {} ms", timeout.as_millis());
        }
        result
    }

    /// Drop any pending outcome
    pub fn reset(&self) {
        self.signal.reset();
    }
}
