//! Competition period end
//!
//! The field controller ends autonomous on its own schedule. Whoever sees
//! that happen calls [`PeriodEnd::end`]; the sequencer races the running
//! routine against [`PeriodEnd::wait`] and drops it the moment the period
//! is over.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

/// Signal raised when the autonomous period is over
pub struct PeriodEnd {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for PeriodEnd {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodEnd {
    /// Create a period that has not ended
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Mark the period as over
    pub fn end(&self) {
        self.signal.signal(());
    }

    /// Check if the period has been ended
    pub fn has_ended(&self) -> bool {
        self.signal.signaled()
    }

    /// Wait until the period is ended
    ///
    /// Does not consume the signal, so later waiters also see it.
    pub async fn wait(&self) {
        self.signal.wait().await;
        self.signal.signal(());
    }

    /// Wait until the period is ended or `length` has elapsed
    pub async fn wait_or_elapsed(&self, length: Duration) {
        embassy_futures::select::select(self.wait(), Timer::after(length)).await;
    }

    /// Re-arm for the next period
    pub fn reset(&self) {
        self.signal.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Instant;

    #[test]
    fn test_end_is_sticky() {
        let period = PeriodEnd::new();
        assert!(!period.has_ended());

        period.end();
        block_on(period.wait());
        assert!(period.has_ended());
        block_on(period.wait());
    }

    #[test]
    fn test_elapsed_length_ends_wait() {
        let period = PeriodEnd::new();
        let start = Instant::now();
        block_on(period.wait_or_elapsed(Duration::from_millis(5)));
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(!period.has_ended());
    }

    #[test]
    fn test_reset_rearms() {
        let period = PeriodEnd::new();
        period.end();
        period.reset();
        assert!(!period.has_ended());
    }
}
